//! Export download and file-upload import.

use axum::{
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{IntoResponse, Redirect},
};
use std::sync::Arc;

use crate::notify::Notification;
use crate::transfer::{self, EXPORT_FILE_NAME};

use super::super::state::AppState;
use super::error_response;

/// GET /export - download the workspace as `slab-labels.json`.
pub async fn export(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = state.session.read().await;
    let json = transfer::export_json(&session.workspace).map_err(error_response)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        json,
    ))
}

/// POST /import - multipart upload with a `file` field.
///
/// The upload is read in full before the session is locked.
pub async fn import(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Redirect {
    let upload = read_upload(&mut multipart).await;

    let mut guard = state.session.write().await;
    let session = &mut *guard;
    let notice = match upload {
        Upload::File { name, text } => {
            let notice = transfer::import_text(&mut session.workspace, &name, &text);
            session.editor.revalidate(&session.workspace);
            notice
        }
        Upload::Unreadable { name } => {
            tracing::warn!(file = %name, "upload is not UTF-8 text");
            transfer::import_failed()
        }
        Upload::Missing => Notification::error("Import failed").describe("No file was uploaded."),
    };
    session.notify(notice);

    Redirect::to("/")
}

/// What the `file` field of an import form held.
#[derive(Debug)]
enum Upload {
    Missing,
    Unreadable { name: String },
    File { name: String, text: String },
}

async fn read_upload(multipart: &mut Multipart) -> Upload {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Upload::Missing,
            Err(e) => {
                tracing::warn!(error = %e, "malformed multipart upload");
                return Upload::Missing;
            }
        };
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or(EXPORT_FILE_NAME)
            .to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read upload");
                return Upload::Missing;
            }
        };
        return match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Upload::File { name, text },
            Err(_) => Upload::Unreadable { name },
        };
    }
}
