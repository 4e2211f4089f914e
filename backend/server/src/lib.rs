//! HTTP surface of the previous year question paper portal.
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Notes |
//! |---|---|---|
//! | POST | `/api/auth/login` | identity stub, see [`auth`] |
//! | GET | `/api/branches` | every branch in dataset order |
//! | GET | `/api/subjects?branch=&semester=` | subjects of one semester |
//! | GET | `/api/pyqs?branch=&semester=&subject=` | papers of one subject |
//! | GET | `/files/view?branch=&sem=&subject=&id=` | inline PDF, counts a view |
//! | GET | `/files/download?branch=&sem=&subject=&id=` | attachment, counts a download |
//! | GET | `/api/analytics` | counter snapshot |
//! | GET | `/health` | liveness |
//! | GET | `/pdfs/**` | raw files, not counted |
//!
//! Anything else is the built client (if present) for GET page routes, or a JSON 404.
//!
//!
//!
//! # Request Flow
//!
//! - Query strings are deserialized into one struct per endpoint, see [`utils`]
//! - Branch, semester and subject are resolved against the startup [`bank::Bank`]
//! - Lookups are pure, the only shared mutable state is the [`analytics::CounterStore`]
//! - File endpoints check the stored path with [`bank::files::PdfRoot`] before touching disk
//!
//!
//!
//! # Errors
//!
//! | Error | Status |
//! |---|---|
//! | invalid branch | 400 |
//! | invalid semester | 404 |
//! | invalid semester on `/api/subjects` | 404, "No subjects found for the selected semester" |
//! | unknown subject on `/api/pyqs` | 404, with `items: []` |
//! | unknown subject on `/files/*` | 404, "Subject not found" |
//! | subject without papers on `/files/*` | 404 |
//! | rejected path, unreadable file | 500, underlying message in `error` |
//!
//! The 500 bodies leak internal error text. Fine for a demo deployment, not beyond it.
//!
//!
//!
//! # Setup
//!
//! Run against the sample dataset.
//! ```sh
//! cd backend
//! RUST_LOG=info,server=debug cargo run
//! ```
//!
//! Run the tests from the workspace root.
//! ```sh
//! cargo test --workspace
//! ```
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
    },
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    analytics_handler, branches_handler, download_handler, fallback_handler, health_handler,
    login_handler, pyqs_handler, subjects_handler, view_handler,
};
use state::{SharedState, State};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).init();
}

pub fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins(&state.config)))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/branches", get(branches_handler))
        .route("/api/subjects", get(subjects_handler))
        .route("/api/pyqs", get(pyqs_handler))
        .route("/api/analytics", get(analytics_handler))
        .route("/files/view", get(view_handler))
        .route("/files/download", get(download_handler))
        .route("/health", get(health_handler))
        .nest_service("/pdfs", ServeDir::new(state.pdf_root.pdf_dir()))
        .fallback(fallback_handler)
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn origins(config: &Config) -> Vec<HeaderValue> {
    config
        .client_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!("Skipping CORS origin {origin}: {e}"))
                .ok()
        })
        .collect()
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing state...");
    let state = State::new(config).context("Failed to load the question bank")?;

    info!(
        "Loaded {} branches and {} subjects.",
        state.bank.registry.len(),
        state.bank.registry.total_subjects()
    );

    match &state.client_dir {
        Some(dir) => info!("Serving client from {}", dir.display()),
        None => info!("No client build at {}", state.config.client_dir.display()),
    }

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
