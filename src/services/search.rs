// src/services/search.rs

//! Catalog search loader.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{BookSummary, Config};
use crate::utils::HttpClient;
use crate::utils::url::search_url;

/// Service for searching the catalog. Issues a single request, no retry.
pub struct SearchLoader {
    config: Arc<Config>,
    client: Arc<dyn HttpClient>,
}

impl SearchLoader {
    pub fn new(client: Arc<dyn HttpClient>, config: Arc<Config>) -> Self {
        Self { config, client }
    }

    /// Search the catalog, preserving relevance order.
    pub async fn search(&self, query: &str) -> Result<Vec<BookSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let url = search_url(&self.config.endpoints, query)?;
        let response = self.client.get(&url).await?.error_for_status()?;
        let payload: Value = response.json()?;

        let docs = match payload.get("docs") {
            Some(Value::Array(docs)) => docs,
            _ => {
                log::debug!("Search payload has no docs array, treating as empty");
                return Ok(Vec::new());
            }
        };

        let results: Vec<BookSummary> = docs
            .iter()
            .filter_map(|doc| match BookSummary::deserialize(doc) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::debug!("Skipping malformed search result: {}", e);
                    None
                }
            })
            .collect();

        log::info!("Search for {:?} returned {} result(s)", query, results.len());
        Ok(results)
    }
}
