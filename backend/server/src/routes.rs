use axum::{
    Json,
    extract::{Query, Request, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, Method, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use bank::{
    lookup::{PyqItem, SubjectSummary},
    slug::slugify,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{debug, info};

use crate::{
    analytics::{AnalyticsKey, AnalyticsSnapshot, CounterKind},
    auth::{AuthUser, LoginRequest, LoginResponse, issue_token, token_cookie},
    error::AppError,
    files::{Disposition, OpenPdf},
    state::SharedState,
    utils::{FileQuery, PyqsQuery, SubjectsQuery, get_branch, get_pyq, get_pyqs, get_semester},
};

/// Paths that never fall through to the client app.
const SERVER_PREFIXES: [&str; 3] = ["/api", "/files", "/pdfs"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummary<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub total_subjects: usize,
}

#[derive(Serialize)]
pub struct BranchRef<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
}

#[derive(Serialize)]
pub struct SubjectsResponse<'a> {
    pub branch: BranchRef<'a>,
    pub semester: &'a str,
    pub subjects: Vec<SubjectSummary>,
}

#[derive(Serialize)]
pub struct PyqsResponse<'a> {
    pub branch: &'a str,
    pub semester: &'a str,
    pub subject: String,
    pub items: &'a [PyqItem],
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

pub async fn login_handler(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    // missing or malformed bodies fall through to the branch check
    let payload = payload.map(|Json(payload)| payload).unwrap_or_else(|rejection| {
        debug!("Unreadable login body: {rejection}");
        LoginRequest::default()
    });

    let branch = state
        .bank
        .resolve_branch(payload.branch.as_deref())
        .ok_or(AppError::BranchRequired)?;

    let user = AuthUser::new(payload, &branch.code, &branch.slug);
    let token = issue_token(&user, &state.config.jwt_secret)?;

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = HeaderValue::from_str(&token_cookie(&token, state.config.production)) {
        headers.insert(SET_COOKIE, cookie);
    }

    info!("Issued identity token for {} ({})", user.email, user.branch_slug);

    Ok((headers, Json(LoginResponse { token, user })).into_response())
}

pub async fn branches_handler(State(state): State<SharedState>) -> Response {
    let branches: Vec<BranchSummary> = state
        .bank
        .registry
        .branches()
        .iter()
        .map(|branch| BranchSummary {
            id: &branch.slug,
            code: &branch.code,
            name: &branch.name,
            slug: &branch.slug,
            total_subjects: branch.total_subjects,
        })
        .collect();

    Json(branches).into_response()
}

pub async fn subjects_handler(
    State(state): State<SharedState>,
    Query(query): Query<SubjectsQuery>,
) -> Result<Response, AppError> {
    let branch = get_branch(&state.bank, query.branch.as_deref())?;
    let semester =
        get_semester(branch, query.semester.as_deref()).map_err(|_| AppError::NoSubjects)?;

    let response = SubjectsResponse {
        branch: BranchRef {
            code: &branch.code,
            name: &branch.name,
            slug: &branch.slug,
        },
        semester,
        subjects: state.bank.list_subjects(branch, semester),
    };

    Ok(Json(response).into_response())
}

pub async fn pyqs_handler(
    State(state): State<SharedState>,
    Query(query): Query<PyqsQuery>,
) -> Result<Response, AppError> {
    let branch = get_branch(&state.bank, query.branch.as_deref())?;
    let semester = get_semester(branch, query.semester.as_deref())?;
    let items = get_pyqs(&state.bank, branch, semester, query.subject.as_deref())?;

    let response = PyqsResponse {
        branch: &branch.code,
        semester,
        subject: slugify(query.subject.as_deref().unwrap_or_default()),
        items,
    };

    Ok(Json(response).into_response())
}

pub async fn view_handler(
    State(state): State<SharedState>,
    Query(query): Query<FileQuery>,
) -> Result<Response, AppError> {
    serve_pyq(state, query, CounterKind::Views).await
}

pub async fn download_handler(
    State(state): State<SharedState>,
    Query(query): Query<FileQuery>,
) -> Result<Response, AppError> {
    serve_pyq(state, query, CounterKind::Downloads).await
}

/// Resolves the paper, opens it, then counts the hit. A file that fails to open is not
/// counted.
async fn serve_pyq(
    state: SharedState,
    query: FileQuery,
    kind: CounterKind,
) -> Result<Response, AppError> {
    let resolved = get_pyq(&state.bank, &query)?;
    let path = state.pdf_root.resolve(&resolved.pyq.file)?;

    let pdf = OpenPdf::open(&path).await?;

    let key = AnalyticsKey {
        branch: &resolved.branch.slug,
        semester: resolved.semester,
        subject: &resolved.subject_slug,
        pyq_id: &resolved.pyq.id,
    };
    state.counters.increment(kind, &key.to_string());

    let disposition = match kind {
        CounterKind::Views => Disposition::Inline,
        CounterKind::Downloads => Disposition::Attachment,
    };

    Ok(pdf.respond(disposition, &resolved.pyq.title))
}

pub async fn analytics_handler(State(state): State<SharedState>) -> Json<AnalyticsSnapshot> {
    Json(state.counters.snapshot())
}

pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Serves the built client for page routes when one exists, otherwise a JSON 404.
pub async fn fallback_handler(State(state): State<SharedState>, request: Request) -> Response {
    let serves_client = request.method() == Method::GET
        && !SERVER_PREFIXES
            .iter()
            .any(|prefix| request.uri().path().starts_with(prefix));

    match &state.client_dir {
        Some(client_dir) if serves_client => {
            let index = ServeFile::new(client_dir.join("index.html"));

            match ServeDir::new(client_dir).fallback(index).oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
        _ => AppError::RouteNotFound.into_response(),
    }
}
