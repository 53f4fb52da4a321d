//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    match state.shorten_service.resolve(&code).await? {
        Some(original_url) => {
            debug!(%code, "redirecting");
            Ok(Redirect::temporary(&original_url))
        }
        None => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
    }
}
