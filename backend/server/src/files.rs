//! # File Responses
//!
//! Streams a single PDF from disk. Paths have already been through
//! [`bank::files::PdfRoot::resolve`] by the time they reach this module.
use std::path::Path;

use axum::{
    body::Body,
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::{error::AppError, utils::attachment_name};

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

pub struct OpenPdf {
    file: File,
    len: u64,
}

impl OpenPdf {
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;

        if !metadata.is_file() {
            return Err(AppError::FileSystem(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            )));
        }

        Ok(Self {
            file,
            len: metadata.len(),
        })
    }

    pub fn respond(self, disposition: Disposition, title: &str) -> Response {
        let disposition = match disposition {
            Disposition::Inline => "inline".to_string(),
            Disposition::Attachment => {
                format!("attachment; filename=\"{}\"", attachment_name(title))
            }
        };

        let headers = [
            (CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
            (CONTENT_LENGTH, HeaderValue::from(self.len)),
            (
                CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ];

        (headers, Body::from_stream(ReaderStream::new(self.file))).into_response()
    }
}
