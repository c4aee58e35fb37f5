//! Handlers for URL entry endpoints (generate, lookup, list, delete).
//!
//! Lookups answer `200` with `null` when nothing matches, including when the
//! entry exists but belongs to another user.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::{GenerateRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for a user.
///
/// # Endpoint
///
/// `POST /generate`
///
/// # Request Body
///
/// ```json
/// { "url": "https://reddit.com", "username": "Kathy" }
/// ```
///
/// # Response
///
/// The created entry, or `null` when `url` is blank.
///
/// ```json
/// { "id": 1, "longUrl": "https://reddit.com", "shortUrl": "…", "username": "Kathy" }
/// ```
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Option<UrlResponse>>, AppError> {
    let entry = state
        .shortener
        .generate(&payload.url, &payload.username)
        .await?;

    Ok(Json(entry.map(UrlResponse::from)))
}

/// Looks up the entry for a short token without recording an access.
///
/// # Endpoint
///
/// `GET /findurl/{short_url}`
pub async fn find_url_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Option<UrlResponse>>, AppError> {
    let entry = state.shortener.resolve(&short_url).await?;

    Ok(Json(entry.map(UrlResponse::from)))
}

/// Lists every entry owned by a user.
///
/// # Endpoint
///
/// `GET /urlsby/{user}`
pub async fn urls_by_user_handler(
    Path(user): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let entries = state.shortener.list_for_user(&user).await?;

    Ok(Json(entries.into_iter().map(UrlResponse::from).collect()))
}

/// Retrieves an entry by id.
///
/// # Endpoint
///
/// `GET /url/{id}`
pub async fn url_by_id_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Option<UrlResponse>>, AppError> {
    let entry = state.shortener.get_by_id(id).await?;

    Ok(Json(entry.map(UrlResponse::from)))
}

/// Retrieves an entry by id if the given user owns it.
///
/// # Endpoint
///
/// `GET /url/{user}/{id}`
pub async fn url_of_user_by_id_handler(
    Path((user, id)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<Json<Option<UrlResponse>>, AppError> {
    let entry = state.shortener.get_for_user_by_id(&user, id).await?;

    Ok(Json(entry.map(UrlResponse::from)))
}

/// Deletes an entry by id.
///
/// # Endpoint
///
/// `DELETE /delete/{id}`
///
/// Unknown ids succeed with `200` and an empty body.
///
/// # Errors
///
/// Returns 409 Conflict if access statistics reference the entry.
pub async fn delete_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shortener.delete_by_id(id).await?;

    Ok(StatusCode::OK)
}

/// Deletes an entry by id if the given user owns it.
///
/// # Endpoint
///
/// `DELETE /deleteby/{user}/{id}`
///
/// A mismatched owner answers `200` like a successful delete.
///
/// # Errors
///
/// Returns 409 Conflict if access statistics reference the entry.
pub async fn delete_by_user_handler(
    Path((user, id)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shortener.delete_for_user_by_id(&user, id).await?;

    Ok(StatusCode::OK)
}
