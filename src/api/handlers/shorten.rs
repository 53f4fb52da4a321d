//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/path?q=1" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "http://localhost:3000/r/aB3xY9z" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request when the URL is blank, malformed, uses a
/// non-HTTP(S) scheme, or has no host. Returns 500 Internal Server Error
/// when code generation exhausts its retry budget or the database fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let short_url = state
        .shorten_service
        .shorten(&payload.url, &state.base_url)
        .await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_url })))
}
