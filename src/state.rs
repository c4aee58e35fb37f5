//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// When true, client addresses are read from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, behind_proxy: bool) -> Self {
        Self {
            shortener,
            behind_proxy,
        }
    }
}
