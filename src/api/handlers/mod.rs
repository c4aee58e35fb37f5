//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod stats;
pub mod urls;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use stats::stats_handler;
pub use urls::{
    delete_by_user_handler, delete_handler, find_url_handler, generate_handler,
    url_by_id_handler, url_of_user_by_id_handler, urls_by_user_handler,
};
