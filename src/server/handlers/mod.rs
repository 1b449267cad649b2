//! HTTP handlers for the server.
//!
//! - [`forms`]: HTML form actions; each redirects back to `/`
//! - [`api`]: JSON API over the same session
//! - [`transfer`]: export download and multipart import

pub mod api;
pub mod forms;
pub mod transfer;

use axum::http::StatusCode;

use crate::error::SlabelError;
use crate::notify::Notification;

use super::state::Session;

/// Map a library error onto a handler error response.
pub fn error_response(e: SlabelError) -> (StatusCode, String) {
    let status = match e {
        SlabelError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SlabelError::Import(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

/// Queue the outcome of an action as a notification.
///
/// Storage failures become error notices; the form flow never fails the
/// request.
pub fn notify_outcome(session: &mut Session, result: Result<Option<Notification>, SlabelError>) {
    match result {
        Ok(Some(notice)) => session.notify(notice),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "form action failed");
            let notice = match e {
                SlabelError::Validation(msg) => Notification::warning(msg),
                other => Notification::error("Something went wrong").describe(other.to_string()),
            };
            session.notify(notice);
        }
    }
}
