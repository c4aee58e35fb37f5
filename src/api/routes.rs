//! API route configuration.

use crate::api::handlers::{
    delete_by_user_handler, delete_handler, find_url_handler, generate_handler,
    redirect_handler, stats_handler, url_by_id_handler, url_of_user_by_id_handler,
    urls_by_user_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All shortener routes.
///
/// # Endpoints
///
/// - `GET    /findurl/{short_url}`  - Entry for a short token (no access recorded)
/// - `GET    /urlsby/{user}`        - Entries owned by a user
/// - `GET    /url/{id}`             - Entry by id
/// - `GET    /url/{user}/{id}`      - Entry by id, owner-scoped
/// - `GET    /stats/{short_url}`    - Accesses recorded for a short token
/// - `POST   /generate`             - Shorten a URL
/// - `DELETE /delete/{id}`          - Delete by id
/// - `DELETE /deleteby/{user}/{id}` - Delete by id, owner-scoped
/// - `GET    /{short_url}`          - Redirect and record the access
///
/// Static segments take precedence over `/{short_url}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/findurl/{short_url}", get(find_url_handler))
        .route("/urlsby/{user}", get(urls_by_user_handler))
        .route("/url/{id}", get(url_by_id_handler))
        .route("/url/{user}/{id}", get(url_of_user_by_id_handler))
        .route("/stats/{short_url}", get(stats_handler))
        .route("/generate", post(generate_handler))
        .route("/delete/{id}", delete(delete_handler))
        .route("/deleteby/{user}/{id}", delete(delete_by_user_handler))
        .route("/{short_url}", get(redirect_handler))
}
