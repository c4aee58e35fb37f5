#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::{ConnectInfo, Request};
use axum_test::TestServer;
use serde_json::json;
use shortlink_api::AppError;
use shortlink_api::routes::app_router;
use shortlink_api::application::services::ShortenerService;
use shortlink_api::domain::entities::{
    AccessStatistic, NewAccessStatistic, NewUrlEntry, UrlEntry,
};
use shortlink_api::domain::repositories::{StatsRepository, UrlRepository};
use shortlink_api::state::AppState;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

/// In-memory stand-in for the PostgreSQL tables.
///
/// Mirrors the relational constraints the handlers depend on: ids are assigned
/// sequentially, statistics must reference an existing entry, and an entry with
/// statistics cannot be deleted.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    urls: Vec<UrlEntry>,
    stats: Vec<AccessStatistic>,
    next_url_id: i64,
    next_stat_id: i64,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }

    pub fn url_count(&self) -> usize {
        self.inner.lock().unwrap().urls.len()
    }

    pub fn stats(&self) -> Vec<AccessStatistic> {
        self.inner.lock().unwrap().stats.clone()
    }

    pub fn insert_url(&self, long_url: &str, short_url: &str, username: &str) -> UrlEntry {
        let mut tables = self.inner.lock().unwrap();
        tables.next_url_id += 1;
        let entry = UrlEntry::new(
            tables.next_url_id,
            long_url.to_string(),
            short_url.to_string(),
            username.to_string(),
        );
        tables.urls.push(entry.clone());
        entry
    }
}

fn unavailable() -> AppError {
    AppError::internal("Database error", json!({}))
}

#[async_trait]
impl UrlRepository for InMemoryStore {
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        if self.inner.lock().unwrap().unavailable {
            return Err(unavailable());
        }
        Ok(self.insert_url(
            &new_entry.long_url,
            &new_entry.short_url,
            &new_entry.username,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlEntry>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.urls.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlEntry>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .urls
            .iter()
            .filter(|u| u.short_url == short_url)
            .min_by_key(|u| u.id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<UrlEntry>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .urls
            .iter()
            .filter(|u| u.username == username)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().unwrap();
        if tables.stats.iter().any(|s| s.url_id == id) {
            return Err(AppError::conflict(
                "Foreign key constraint violation",
                json!({ "constraint": "stats_url_id_fkey" }),
            ));
        }
        let before = tables.urls.len();
        tables.urls.retain(|u| u.id != id);
        Ok(tables.urls.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.inner.lock().unwrap().unavailable {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn save(&self, new_stat: NewAccessStatistic) -> Result<AccessStatistic, AppError> {
        let mut tables = self.inner.lock().unwrap();
        if !tables.urls.iter().any(|u| u.id == new_stat.url_id) {
            return Err(AppError::conflict(
                "Foreign key constraint violation",
                json!({ "constraint": "stats_url_id_fkey" }),
            ));
        }
        tables.next_stat_id += 1;
        let stat = AccessStatistic::new(
            tables.next_stat_id,
            new_stat.url_id,
            new_stat.access_time,
            new_stat.user_agent,
            new_stat.referrer,
            new_stat.client_ip,
        );
        tables.stats.push(stat.clone());
        Ok(stat)
    }

    async fn find_by_url_id(&self, url_id: i64) -> Result<Vec<AccessStatistic>, AppError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .stats
            .iter()
            .filter(|s| s.url_id == url_id)
            .cloned()
            .collect())
    }
}

pub fn create_test_state(behind_proxy: bool) -> (AppState, Arc<InMemoryStore>) {
    let store = InMemoryStore::new();
    let shortener = Arc::new(ShortenerService::new(store.clone(), store.clone()));

    (AppState::new(shortener, behind_proxy), store)
}

/// The production router (path normalization and tracing included) with a
/// fixed peer address of `127.0.0.1:12345`.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = MockConnectInfoLayer.layer(app_router(state));

    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

pub async fn insert_url(pool: &PgPool, long_url: &str, short_url: &str, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (long_url, short_url, username) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(long_url)
    .bind(short_url)
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_stat(pool: &PgPool, url_id: i64, client_ip: &str) {
    sqlx::query("INSERT INTO stats (url_id, access_time, client_ip) VALUES ($1, NOW(), $2)")
        .bind(url_id)
        .bind(client_ip)
        .execute(pool)
        .await
        .unwrap();
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
