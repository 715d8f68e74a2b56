// src/services/recent.rs

//! Recent changes loader.
//!
//! The home view must never be blank, so every failure is folded into a
//! fixed fallback record plus a warning message.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::models::{ChangeAuthor, Config, RecentChange, RecentChanges};
use crate::services::retry::{RetryFetcher, RetryPolicy};
use crate::utils::HttpClient;
use crate::utils::url::recent_changes_url;

/// Message shown when the feed answers with nothing.
pub const NO_RECENT_CHANGES: &str = "No recent changes available from the library API.";

/// Record substituted when the feed cannot be loaded.
pub fn fallback_change() -> RecentChange {
    RecentChange {
        id: "1".to_string(),
        comment: "Sample change".to_string(),
        timestamp: "2025-05-28T12:00:00Z".to_string(),
        author: Some(ChangeAuthor {
            display_name: "Test User".to_string(),
        }),
    }
}

/// Service for loading the catalog's change feed.
pub struct RecentChangesLoader {
    config: Arc<Config>,
    fetcher: RetryFetcher,
}

impl RecentChangesLoader {
    pub fn new(client: Arc<dyn HttpClient>, config: Arc<Config>) -> Self {
        let fetcher = RetryFetcher::new(client, RetryPolicy::from(&config.retry));
        Self { config, fetcher }
    }

    /// Load the latest changes. Never fails.
    pub async fn load(&self) -> RecentChanges {
        match self.fetch().await {
            Ok(changes) if changes.is_empty() => {
                log::info!("Recent changes feed is empty");
                RecentChanges {
                    changes,
                    message: Some(NO_RECENT_CHANGES.to_string()),
                }
            }
            Ok(changes) => {
                log::info!("Loaded {} recent change(s)", changes.len());
                RecentChanges {
                    changes,
                    message: None,
                }
            }
            Err(error) => {
                log::error!("Error fetching recent changes: {}", error);
                RecentChanges {
                    changes: vec![fallback_change()],
                    message: Some(format!(
                        "Failed to load recent changes: {error}. Using fallback data."
                    )),
                }
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<RecentChange>> {
        let url = recent_changes_url(&self.config.endpoints, self.config.recent.limit)?;
        let response = self.fetcher.fetch(&url).await?;
        let payload: Value = response.json()?;

        let Value::Array(entries) = payload else {
            log::warn!("Recent changes payload is not an array");
            return Ok(Vec::new());
        };

        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(change) => Some(change),
                Err(e) => {
                    log::debug!("Skipping malformed change entry: {}", e);
                    None
                }
            })
            .collect())
    }
}
