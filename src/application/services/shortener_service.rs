//! URL shortening, lookup and access statistics service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{AccessStatistic, NewAccessStatistic, NewUrlEntry, UrlEntry};
use crate::domain::repositories::{StatsRepository, UrlRepository};
use crate::error::AppError;
use crate::utils::short_token::{is_blank, is_redirect_target, short_token};

/// Service for creating, resolving and managing shortened URLs.
///
/// Every operation is a single round trip to the repositories. "Not found",
/// "blank input" and "owned by someone else" are all reported as `None`
/// (or an empty list); only storage failures become [`AppError`]s.
pub struct ShortenerService {
    url_repository: Arc<dyn UrlRepository>,
    stats_repository: Arc<dyn StatsRepository>,
}

impl ShortenerService {
    /// Creates a new shortener service over the given repositories.
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        stats_repository: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            url_repository,
            stats_repository,
        }
    }

    /// Shortens `long_url` on behalf of `username` and persists the entry.
    ///
    /// The token is derived from the URL text alone, so every user shortening the
    /// same URL gets the same token. No deduplication takes place: each call
    /// stores a new entry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlEntry))` with the persisted entry
    /// - `Ok(None)` if `long_url` is empty or whitespace; nothing is written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` contains bytes that cannot
    /// appear in a `Location` header (control characters such as `\n`).
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn generate(
        &self,
        long_url: &str,
        username: &str,
    ) -> Result<Option<UrlEntry>, AppError> {
        if is_blank(long_url) {
            debug!(username, "Rejected blank URL");
            return Ok(None);
        }

        if !is_redirect_target(long_url) {
            return Err(AppError::bad_request(
                "URL is not a valid redirect target",
                json!({ "url": long_url }),
            ));
        }

        let short_url = short_token(long_url).map_err(|e| {
            AppError::internal("Failed to hash URL", json!({ "reason": e.to_string() }))
        })?;

        let entry = self
            .save(NewUrlEntry {
                long_url: long_url.to_string(),
                short_url,
                username: username.to_string(),
            })
            .await?;

        info!(
            id = entry.id,
            short_url = %entry.short_url,
            username = %entry.username,
            "Short URL generated"
        );

        Ok(Some(entry))
    }

    /// Persists an already assembled entry as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        self.url_repository.save(new_entry).await
    }

    /// Looks up the entry for a short token.
    ///
    /// Does not record an access; callers that redirect must call
    /// [`Self::record_access`] themselves.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, short_url: &str) -> Result<Option<UrlEntry>, AppError> {
        self.url_repository.find_by_short_url(short_url).await
    }

    /// Lists all entries owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_for_user(&self, username: &str) -> Result<Vec<UrlEntry>, AppError> {
        self.url_repository.find_by_username(username).await
    }

    /// Retrieves an entry by id regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<UrlEntry>, AppError> {
        self.url_repository.find_by_id(id).await
    }

    /// Retrieves an entry by id only if `username` owns it.
    ///
    /// An unknown id and an entry owned by someone else both yield `None`;
    /// the difference is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_for_user_by_id(
        &self,
        username: &str,
        id: i64,
    ) -> Result<Option<UrlEntry>, AppError> {
        let entry = self
            .url_repository
            .find_by_id(id)
            .await?
            .filter(|entry| entry.is_owned_by(username));

        if entry.is_none() {
            warn!(id, username, "URL does not belong to user");
        }

        Ok(entry)
    }

    /// Deletes an entry by id. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if access statistics reference the entry.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.url_repository.delete_by_id(id).await?;

        if deleted {
            info!(id, "URL deleted");
        } else {
            debug!(id, "Delete of unknown URL ignored");
        }

        Ok(())
    }

    /// Deletes an entry by id only if `username` owns it.
    ///
    /// A mismatched owner deletes nothing and is not reported to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if access statistics reference the entry.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_for_user_by_id(&self, username: &str, id: i64) -> Result<(), AppError> {
        let owned = self
            .url_repository
            .find_by_id(id)
            .await?
            .is_some_and(|entry| entry.is_owned_by(username));

        if !owned {
            warn!(id, username, "URL does not belong to user");
            return Ok(());
        }

        self.delete_by_id(id).await
    }

    /// Records one access of a short URL as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the referenced entry does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record_access(
        &self,
        new_stat: NewAccessStatistic,
    ) -> Result<AccessStatistic, AppError> {
        let stat = self.stats_repository.save(new_stat).await?;
        debug!(id = stat.id, url_id = stat.url_id, "Access recorded");
        Ok(stat)
    }

    /// Lists the statistics recorded for `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn statistics_for_url(
        &self,
        entry: &UrlEntry,
    ) -> Result<Vec<AccessStatistic>, AppError> {
        self.stats_repository.find_by_url_id(entry.id).await
    }

    /// Lists the statistics recorded for the entry a short token resolves to.
    ///
    /// An unknown token yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn statistics_for_short_url(
        &self,
        short_url: &str,
    ) -> Result<Vec<AccessStatistic>, AppError> {
        match self.resolve(short_url).await? {
            Some(entry) => self.statistics_for_url(&entry).await,
            None => Ok(Vec::new()),
        }
    }

    /// Checks that the URL store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.url_repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockStatsRepository, MockUrlRepository};
    use chrono::Utc;

    fn kathy_entry() -> UrlEntry {
        UrlEntry::new(
            1,
            "https://reddit.com".to_string(),
            short_token("https://reddit.com").unwrap(),
            "Kathy".to_string(),
        )
    }

    fn service(urls: MockUrlRepository, stats: MockStatsRepository) -> ShortenerService {
        ShortenerService::new(Arc::new(urls), Arc::new(stats))
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut mock_urls = MockUrlRepository::new();
        let expected_token = short_token("https://reddit.com").unwrap();

        mock_urls
            .expect_save()
            .withf(move |new_entry| {
                new_entry.long_url == "https://reddit.com"
                    && new_entry.username == "Kathy"
                    && new_entry.short_url == expected_token
            })
            .times(1)
            .returning(|new_entry| {
                Ok(UrlEntry::new(
                    1,
                    new_entry.long_url,
                    new_entry.short_url,
                    new_entry.username,
                ))
            });

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.generate("https://reddit.com", "Kathy").await;

        assert!(result.is_ok());
        let entry = result.unwrap().unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.long_url, "https://reddit.com");
        assert_eq!(entry.username, "Kathy");
        assert_eq!(entry.short_url, short_token("https://reddit.com").unwrap());
    }

    #[tokio::test]
    async fn test_generate_blank_url_writes_nothing() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls.expect_save().times(0);

        let service = service(mock_urls, MockStatsRepository::new());

        for blank in ["", " ", "\t\n"] {
            let result = service.generate(blank, "Kathy").await;
            assert!(result.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_generate_control_characters_rejected() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls.expect_save().times(0);

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.generate("https://example.com/a\nb", "Kathy").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_generate_same_url_same_token_for_different_users() {
        let mut mock_urls = MockUrlRepository::new();
        let mut next_id = 0;

        mock_urls.expect_save().times(2).returning(move |new_entry| {
            next_id += 1;
            Ok(UrlEntry::new(
                next_id,
                new_entry.long_url,
                new_entry.short_url,
                new_entry.username,
            ))
        });

        let service = service(mock_urls, MockStatsRepository::new());

        let first = service
            .generate("https://example.com", "Kathy")
            .await
            .unwrap()
            .unwrap();
        let second = service
            .generate("https://example.com", "Stranger")
            .await
            .unwrap()
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.short_url, second.short_url);
    }

    #[tokio::test]
    async fn test_generate_propagates_storage_error() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.generate("https://reddit.com", "Kathy").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_found_and_unknown() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();
        let token = entry.short_url.clone();

        mock_urls
            .expect_find_by_short_url()
            .returning(move |short_url| {
                if short_url == token {
                    Ok(Some(entry.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = service(mock_urls, MockStatsRepository::new());

        let found = service
            .resolve(&short_token("https://reddit.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().long_url, "https://reddit.com");

        let missing = service.resolve("deadbeef").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();

        mock_urls
            .expect_find_by_username()
            .returning(move |username| {
                if username == "Kathy" {
                    Ok(vec![entry.clone()])
                } else {
                    Ok(vec![])
                }
            });

        let service = service(mock_urls, MockStatsRepository::new());

        let urls = service.list_for_user("Kathy").await.unwrap();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].username, "Kathy");

        let none = service.list_for_user("Stranger").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_for_user_by_id_owner() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();
        mock_urls
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .returning(move |_| Ok(Some(entry.clone())));

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.get_for_user_by_id("Kathy", 1).await.unwrap();
        assert_eq!(result.unwrap().long_url, "https://reddit.com");
    }

    #[tokio::test]
    async fn test_get_for_user_by_id_wrong_owner() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();
        mock_urls
            .expect_find_by_id()
            .returning(move |_| Ok(Some(entry.clone())));

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.get_for_user_by_id("Stranger", 1).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_for_user_by_id_unknown_id() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls.expect_find_by_id().returning(|_| Ok(None));

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.get_for_user_by_id("Kathy", 999).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_unknown_is_noop() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls
            .expect_delete_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(false));

        let service = service(mock_urls, MockStatsRepository::new());

        assert!(service.delete_by_id(42).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_for_user_by_id_owner_deletes() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();
        mock_urls
            .expect_find_by_id()
            .returning(move |_| Ok(Some(entry.clone())));
        mock_urls
            .expect_delete_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(true));

        let service = service(mock_urls, MockStatsRepository::new());

        assert!(service.delete_for_user_by_id("Kathy", 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_for_user_by_id_wrong_owner_keeps_entry() {
        let mut mock_urls = MockUrlRepository::new();
        let entry = kathy_entry();
        mock_urls
            .expect_find_by_id()
            .returning(move |_| Ok(Some(entry.clone())));
        mock_urls.expect_delete_by_id().times(0);

        let service = service(mock_urls, MockStatsRepository::new());

        let result = service.delete_for_user_by_id("Stranger", 1).await;
        assert!(result.is_ok());

        let still_there = service.get_by_id(1).await.unwrap();
        assert!(still_there.is_some());
    }

    #[tokio::test]
    async fn test_delete_for_user_by_id_unknown_id() {
        let mut mock_urls = MockUrlRepository::new();
        mock_urls.expect_find_by_id().returning(|_| Ok(None));
        mock_urls.expect_delete_by_id().times(0);

        let service = service(mock_urls, MockStatsRepository::new());

        assert!(service.delete_for_user_by_id("Kathy", 5).await.is_ok());
    }

    #[tokio::test]
    async fn test_record_access() {
        let mut mock_stats = MockStatsRepository::new();
        let now = Utc::now();

        mock_stats
            .expect_save()
            .withf(|new_stat| {
                new_stat.url_id == 1 && new_stat.user_agent.as_deref() == Some("TestBot/1.0")
            })
            .times(1)
            .returning(|new_stat| {
                Ok(AccessStatistic::new(
                    10,
                    new_stat.url_id,
                    new_stat.access_time,
                    new_stat.user_agent,
                    new_stat.referrer,
                    new_stat.client_ip,
                ))
            });

        let service = service(MockUrlRepository::new(), mock_stats);

        let stat = service
            .record_access(NewAccessStatistic {
                url_id: 1,
                access_time: now,
                user_agent: Some("TestBot/1.0".to_string()),
                referrer: None,
                client_ip: Some("127.0.0.1".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(stat.id, 10);
        assert_eq!(stat.access_time, now);
        assert_eq!(stat.client_ip.as_deref(), Some("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_statistics_for_short_url() {
        let mut mock_urls = MockUrlRepository::new();
        let mut mock_stats = MockStatsRepository::new();
        let entry = kathy_entry();

        mock_urls
            .expect_find_by_short_url()
            .returning(move |_| Ok(Some(entry.clone())));

        mock_stats
            .expect_find_by_url_id()
            .withf(|url_id| *url_id == 1)
            .times(1)
            .returning(|url_id| {
                Ok(vec![
                    AccessStatistic::new(1, url_id, Utc::now(), None, None, None),
                    AccessStatistic::new(2, url_id, Utc::now(), None, None, None),
                ])
            });

        let service = service(mock_urls, mock_stats);

        let stats = service.statistics_for_short_url("anything").await.unwrap();
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.url_id == 1));
    }

    #[tokio::test]
    async fn test_statistics_for_unknown_short_url_is_empty() {
        let mut mock_urls = MockUrlRepository::new();
        let mut mock_stats = MockStatsRepository::new();

        mock_urls.expect_find_by_short_url().returning(|_| Ok(None));
        mock_stats.expect_find_by_url_id().times(0);

        let service = service(mock_urls, mock_stats);

        let stats = service.statistics_for_short_url("unknown").await.unwrap();
        assert!(stats.is_empty());
    }
}
