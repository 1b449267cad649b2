//! Page and static asset serving.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::assets::ASSETS;
use crate::render::{RenderMode, page::DesignerPage};

use super::state::AppState;

/// Serve the designer page, draining queued notifications into it.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let notices = session.drain_notices();
    let html = DesignerPage::new(&session.workspace, RenderMode::Screen)
        .editor(&session.editor)
        .notices(&notices)
        .linked_stylesheet(state.stylesheet_href())
        .render();
    Html(html)
}

/// Serve the print-only sheet.
pub async fn print_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    Html(DesignerPage::new(&session.workspace, RenderMode::Print).render())
}

/// Serve embedded assets.
pub async fn asset_handler(Path(path): Path<String>) -> impl IntoResponse {
    // Strip query params if present
    let clean_path = path.split('?').next().unwrap_or(&path);

    match ASSETS.get_file(clean_path) {
        Some(file) => {
            let mime = mime_guess::from_path(clean_path)
                .first_or_octet_stream()
                .to_string();
            // Long cache headers since the page links with a boot-time suffix
            (
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "public, max-age=31536000".to_string()),
                ],
                file.contents().to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
