//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, warn};

use crate::domain::entities::NewAccessStatistic;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::resolve_client_ip;

/// Misspelled variant of `Referer` still sent by some clients.
const REFERRER: HeaderName = HeaderName::from_static("referrer");

/// Redirects a short token to its original URL and records the access.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// # Request Flow
///
/// 1. Capture the access time
/// 2. Resolve the token to its entry
/// 3. Build the `Location` header from the long URL
/// 4. Record user agent, referrer and client address
/// 5. Return 302 Found
///
/// The referrer is read from `Referer`, falling back to `Referrer`.
///
/// # Errors
///
/// Returns 404 Not Found with the text body `URL not found` if the token is unknown.
/// Returns 500 if the stored URL is not a valid header value (nothing is
/// recorded) or if the access cannot be recorded.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let access_time = Utc::now();

    let Some(entry) = state.shortener.resolve(&short_url).await? else {
        debug!(short_url = %short_url, "Short URL not found");
        return Ok((StatusCode::NOT_FOUND, "URL not found").into_response());
    };

    let location = HeaderValue::from_str(&entry.long_url).map_err(|e| {
        warn!(id = entry.id, error = %e, "Stored URL is not a valid Location header");
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "id": entry.id }),
        )
    })?;

    let new_stat = NewAccessStatistic {
        url_id: entry.id,
        access_time,
        user_agent: header_value(&headers, &header::USER_AGENT),
        referrer: header_value(&headers, &header::REFERER)
            .or_else(|| header_value(&headers, &REFERRER)),
        client_ip: Some(resolve_client_ip(&headers, addr, state.behind_proxy)),
    };

    state.shortener.record_access(new_stat).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
