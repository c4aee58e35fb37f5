//! Handler for per-token access statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::AccessStatisticResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the accesses recorded for a short token, oldest first.
///
/// # Endpoint
///
/// `GET /stats/{short_url}`
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 1,
///     "urlId": 1,
///     "accessTime": "2024-03-01T12:30:00Z",
///     "userAgent": "Mozilla/5.0",
///     "referrer": "https://google.com",
///     "clientIp": "203.0.113.7"
///   }
/// ]
/// ```
///
/// An unknown token yields an empty array.
pub async fn stats_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccessStatisticResponse>>, AppError> {
    let stats = state.shortener.statistics_for_short_url(&short_url).await?;

    Ok(Json(
        stats
            .into_iter()
            .map(AccessStatisticResponse::from)
            .collect(),
    ))
}
