//! Form actions posted by the designer page.
//!
//! Every handler mutates the session and answers `303 See Other` to `/`,
//! where queued notifications are shown.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::SlabelError;
use crate::label::LabelRecord;
use crate::settings::{BorderSettings, LabelSize};

use super::super::state::AppState;
use super::notify_outcome;

fn back() -> Redirect {
    Redirect::to("/")
}

/// POST /editor/save - store the submitted buffers.
pub async fn save(State(state): State<Arc<AppState>>, Form(fields): Form<LabelRecord>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    session.editor.set_fields(fields);
    let result = session.editor.save(&mut session.workspace).map(Some);
    notify_outcome(session, result);
    back()
}

/// POST /editor/edit/:index - load a label into the editor.
pub async fn edit(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    session.editor.begin_edit(&session.workspace, index);
    back()
}

/// POST /editor/cancel - leave edit mode, keeping the typed buffers.
pub async fn cancel(State(state): State<Arc<AppState>>, Form(fields): Form<LabelRecord>) -> Redirect {
    let mut session = state.session.write().await;
    session.editor.set_fields(fields);
    session.editor.cancel_edit();
    back()
}

/// POST /editor/clear - ask for clear-all confirmation, keeping the typed buffers.
pub async fn request_clear(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<LabelRecord>,
) -> Redirect {
    let mut session = state.session.write().await;
    session.editor.set_fields(fields);
    session.editor.request_clear_all();
    back()
}

/// POST /editor/clear/confirm - clear every label.
pub async fn confirm_clear(State(state): State<Arc<AppState>>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let result = session.editor.confirm_clear_all(&mut session.workspace);
    notify_outcome(session, result);
    back()
}

/// POST /editor/clear/dismiss - close the confirmation.
pub async fn dismiss_clear(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.write().await.editor.dismiss_clear_all();
    back()
}

/// POST /labels/:index/delete - delete one label.
pub async fn delete_label(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let result = session.workspace.remove_label(index).map(|removed| {
        if removed.is_some() {
            session.editor.label_removed(index);
        }
        None
    });
    notify_outcome(session, result);
    back()
}

/// Border form fields. Number inputs arrive as text and may be empty.
#[derive(Debug, Deserialize)]
pub struct BorderForm {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
}

/// POST /settings/border - update the global border.
pub async fn border(State(state): State<Arc<AppState>>, Form(form): Form<BorderForm>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let result = parse_number(&form.size, 0.0)
        .map(|size| BorderSettings::new(form.color, size))
        .and_then(|border| session.workspace.set_border(border))
        .map(|()| None);
    notify_outcome(session, result);
    back()
}

/// Size form fields, in inches.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeForm {
    #[serde(default)]
    pub width_in: String,
    #[serde(default)]
    pub height_in: String,
}

/// POST /settings/size - update the label size.
pub async fn size(State(state): State<Arc<AppState>>, Form(form): Form<SizeForm>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let current = session.workspace.label_size();
    let result = parse_number(&form.width_in, current.width_in)
        .and_then(|w| Ok((w, parse_number(&form.height_in, current.height_in)?)))
        .and_then(|(w, h)| LabelSize::new(w, h))
        .and_then(|size| session.workspace.set_label_size(size))
        .map(|()| None);
    notify_outcome(session, result);
    back()
}

/// Theme form field.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: usize,
}

/// POST /settings/theme - select the chrome theme.
pub async fn theme(State(state): State<Arc<AppState>>, Form(form): Form<ThemeForm>) -> Redirect {
    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let result = session.workspace.set_theme(form.theme).map(|()| None);
    notify_outcome(session, result);
    back()
}

/// Parse a number input; blank means `fallback`.
fn parse_number(raw: &str, fallback: f64) -> Result<f64, SlabelError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(fallback);
    }
    raw.parse::<f64>()
        .map_err(|_| SlabelError::Validation(format!("'{}' is not a number", raw)))
}
