use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bank::files::PathError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid branch")]
    InvalidBranch,

    #[error("Branch selection is required")]
    BranchRequired,

    #[error("Semester not found")]
    InvalidSemester,

    /// Semester miss on the subject listing.
    #[error("No subjects found for the selected semester")]
    NoSubjects,

    #[error("No PYQs available for the selected subject yet.")]
    NoPyqsYet,

    /// Subject miss on the file endpoints.
    #[error("Subject not found")]
    SubjectNotFound,

    #[error("PYQ not found")]
    PyqNotFound,

    #[error("Unable to open file")]
    InvalidFilePath(#[from] PathError),

    #[error("Unable to open file")]
    FileSystem(#[from] io::Error),

    #[error("Unable to issue token")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Not Found")]
    RouteNotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBranch | AppError::BranchRequired => StatusCode::BAD_REQUEST,
            AppError::InvalidSemester
            | AppError::NoSubjects
            | AppError::NoPyqsYet
            | AppError::SubjectNotFound
            | AppError::PyqNotFound
            | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::FileSystem(e) if e.kind() == io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::InvalidFilePath(_) | AppError::FileSystem(_) | AppError::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::NoPyqsYet => json!({ "message": self.to_string(), "items": [] }),
            AppError::InvalidFilePath(source) => {
                json!({ "message": self.to_string(), "error": source.to_string() })
            }
            AppError::FileSystem(source) => {
                json!({ "message": self.to_string(), "error": source.to_string() })
            }
            AppError::Token(source) => {
                json!({ "message": self.to_string(), "error": source.to_string() })
            }
            _ => json!({ "message": self.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!("{self}: {body}");
        }

        (status, Json(body)).into_response()
    }
}
