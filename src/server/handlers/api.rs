//! JSON API handlers.
//!
//! Same session as the form flow, answering with JSON instead of redirects.
//! Out-of-range indices are not errors; the response reports
//! `{"changed": false}`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::label::LabelRecord;
use crate::layout::SheetLayout;
use crate::notify::Notification;
use crate::settings::{BorderSettings, LabelSize};
use crate::transfer::{self, ExportDocument};

use super::super::state::AppState;
use super::error_response;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// Whether a mutation changed anything.
#[derive(Debug, Serialize)]
pub struct Changed {
    pub changed: bool,
}

/// GET /api/labels - all labels in order.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<LabelRecord>> {
    let session = state.session.read().await;
    Json(session.workspace.labels().as_slice().to_vec())
}

/// POST /api/labels - append a label.
pub async fn append(
    State(state): State<Arc<AppState>>,
    Json(label): Json<LabelRecord>,
) -> ApiResult<(StatusCode, Json<Vec<LabelRecord>>)> {
    if !label.has_identity() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter at least a Card Name or Set!".to_string(),
        ));
    }
    let mut session = state.session.write().await;
    session.workspace.add_label(label).map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(session.workspace.labels().as_slice().to_vec()),
    ))
}

/// PUT /api/labels/:index - replace a label.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(label): Json<LabelRecord>,
) -> ApiResult<Json<Changed>> {
    let mut session = state.session.write().await;
    let changed = session
        .workspace
        .update_label(index, label)
        .map_err(error_response)?;
    Ok(Json(Changed { changed }))
}

/// DELETE /api/labels/:index - delete a label.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<Json<Changed>> {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let removed = session.workspace.remove_label(index).map_err(error_response)?;
    if removed.is_some() {
        session.editor.label_removed(index);
    }
    Ok(Json(Changed {
        changed: removed.is_some(),
    }))
}

/// DELETE /api/labels - delete every label.
pub async fn clear(State(state): State<Arc<AppState>>) -> ApiResult<Json<Changed>> {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let changed = !session.workspace.labels().is_empty();
    session.workspace.clear_labels().map_err(error_response)?;
    session.editor.revalidate(&session.workspace);
    Ok(Json(Changed { changed }))
}

/// GET /api/settings/border
pub async fn get_border(State(state): State<Arc<AppState>>) -> Json<BorderSettings> {
    Json(state.session.read().await.workspace.border().clone())
}

/// PUT /api/settings/border - negative sizes are clamped to zero.
pub async fn put_border(
    State(state): State<Arc<AppState>>,
    Json(border): Json<BorderSettings>,
) -> ApiResult<Json<BorderSettings>> {
    let mut session = state.session.write().await;
    session
        .workspace
        .set_border(BorderSettings::new(border.color, border.size))
        .map_err(error_response)?;
    Ok(Json(session.workspace.border().clone()))
}

/// GET /api/settings/size
pub async fn get_size(State(state): State<Arc<AppState>>) -> Json<LabelSize> {
    Json(state.session.read().await.workspace.label_size())
}

/// PUT /api/settings/size - both dimensions must be positive.
pub async fn put_size(
    State(state): State<Arc<AppState>>,
    Json(size): Json<LabelSize>,
) -> ApiResult<Json<LabelSize>> {
    let size = LabelSize::new(size.width_in, size.height_in).map_err(error_response)?;
    let mut session = state.session.write().await;
    session.workspace.set_label_size(size).map_err(error_response)?;
    Ok(Json(session.workspace.label_size()))
}

/// GET /api/layout - the computed sheet grid.
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<SheetLayout> {
    Json(state.session.read().await.workspace.layout())
}

/// GET /api/export - the export document.
pub async fn export(State(state): State<Arc<AppState>>) -> Json<ExportDocument> {
    let session = state.session.read().await;
    Json(ExportDocument::from_workspace(&session.workspace))
}

/// Query parameters for import.
#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    /// File name shown in the success message
    pub name: Option<String>,
}

/// POST /api/import?name= - import a raw export document.
///
/// Answers with the notification; `400` when the document was rejected.
pub async fn import(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> impl IntoResponse {
    let name = query
        .name
        .unwrap_or_else(|| transfer::EXPORT_FILE_NAME.to_string());

    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let notice: Notification = transfer::import_text(&mut session.workspace, &name, &body);
    session.editor.revalidate(&session.workspace);

    let status = if notice.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    (status, Json(notice))
}
