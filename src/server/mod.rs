//! # HTTP Server for the Label Designer
//!
//! Serves the designer page, its form actions, a print-only view, and a
//! JSON API over one shared session.
//!
//! ## Usage
//!
//! ```bash
//! slabel --data-dir ./slabel-data serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser to design labels.

pub mod handlers;
mod state;
mod static_files;

pub use state::{AppState, ServerConfig, Session};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::SlabelError;
use crate::storage::FileStore;
use crate::workspace::Workspace;

/// Largest accepted import upload.
const IMPORT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use slabel::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), slabel::SlabelError> {
/// let config = ServerConfig {
///     listen_addr: "127.0.0.1:8080".to_string(),
///     data_dir: "./slabel-data".into(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), SlabelError> {
    let store = FileStore::open(&config.data_dir)?;
    let workspace = Workspace::load(Box::new(store));
    let app_state = Arc::new(AppState::new(config.clone(), workspace));
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            SlabelError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    tracing::info!(
        listen = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        "slabel designer listening, open http://{}/",
        config.listen_addr
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| SlabelError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}

/// Build the application router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(static_files::index_handler))
        .route("/print", get(static_files::print_handler))
        .route("/assets/*path", get(static_files::asset_handler))
        // Editor forms
        .route("/editor/save", post(handlers::forms::save))
        .route("/editor/edit/:index", post(handlers::forms::edit))
        .route("/editor/cancel", post(handlers::forms::cancel))
        .route("/editor/clear", post(handlers::forms::request_clear))
        .route("/editor/clear/confirm", post(handlers::forms::confirm_clear))
        .route("/editor/clear/dismiss", post(handlers::forms::dismiss_clear))
        .route("/labels/:index/delete", post(handlers::forms::delete_label))
        // Settings forms
        .route("/settings/border", post(handlers::forms::border))
        .route("/settings/size", post(handlers::forms::size))
        .route("/settings/theme", post(handlers::forms::theme))
        // Export / import
        .route("/export", get(handlers::transfer::export))
        .route(
            "/import",
            post(handlers::transfer::import).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        // JSON API
        .route(
            "/api/labels",
            get(handlers::api::list)
                .post(handlers::api::append)
                .delete(handlers::api::clear),
        )
        .route(
            "/api/labels/:index",
            put(handlers::api::update).delete(handlers::api::delete),
        )
        .route(
            "/api/settings/border",
            get(handlers::api::get_border).put(handlers::api::put_border),
        )
        .route(
            "/api/settings/size",
            get(handlers::api::get_size).put(handlers::api::put_size),
        )
        .route("/api/layout", get(handlers::api::layout))
        .route("/api/export", get(handlers::api::export))
        .route(
            "/api/import",
            post(handlers::api::import).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
