// src/services/detail.rs

//! Book detail assembler.
//!
//! Builds a [`BookDetail`] in three stages:
//!
//! 1. the work record, which is required: any failure aborts the assembly;
//! 2. author names, fetched concurrently, one request per reference;
//! 3. a Wikipedia summary looked up by title.
//!
//! Stages 2 and 3 only enrich the record. Their failures are logged and
//! dropped, never returned.

use std::sync::Arc;

use futures::future;

use crate::error::{AppError, Result};
use crate::models::{BookDetail, BookRecord, Config, EncyclopediaSummary, QueryResponse};
use crate::utils::HttpClient;
use crate::utils::url::{
    author_url, encyclopedia_page_url, encyclopedia_query_url, normalize_work_id, work_url,
};

/// Title used for the encyclopedia lookup when the record has none.
const FALLBACK_LOOKUP_TITLE: &str = "Unknown";

#[derive(Debug, serde::Deserialize)]
struct AuthorRecord {
    #[serde(default)]
    name: Option<String>,
}

/// Service that merges catalog and encyclopedia data for one book.
pub struct BookDetailAssembler {
    config: Arc<Config>,
    client: Arc<dyn HttpClient>,
}

impl BookDetailAssembler {
    pub fn new(client: Arc<dyn HttpClient>, config: Arc<Config>) -> Self {
        Self { config, client }
    }

    /// Assemble the detail view for a work key.
    ///
    /// Accepts `OL45804W`, `/works/OL45804W`, or a catalog URL.
    pub async fn assemble(&self, book_key: &str) -> Result<BookDetail> {
        let work_id = normalize_work_id(book_key).ok_or(AppError::EmptyKey)?;

        let record = self
            .fetch_record(&work_id)
            .await
            .map_err(|e| AppError::detail(format!("/works/{work_id}"), e))?;

        let author_names = self.resolve_authors(&record).await;

        let lookup_title = record.title.as_deref().unwrap_or(FALLBACK_LOOKUP_TITLE);
        let encyclopedia = match self.fetch_summary(lookup_title).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("Wikipedia lookup for {:?} failed: {}", lookup_title, e);
                None
            }
        };

        let detail = BookDetail::assemble(&work_id, record, author_names, encyclopedia);
        log::info!(
            "Assembled {} ({} author(s), summary: {})",
            detail.key,
            detail.author_names.len(),
            detail.encyclopedia.is_some()
        );
        Ok(detail)
    }

    async fn fetch_record(&self, work_id: &str) -> Result<BookRecord> {
        let url = work_url(&self.config.endpoints, work_id);
        let response = self.client.get(&url).await?.error_for_status()?;
        response.json()
    }

    /// Resolve author names concurrently, keeping reference order.
    async fn resolve_authors(&self, record: &BookRecord) -> Vec<String> {
        let keys = record.author_keys();
        if keys.len() < record.authors.len() {
            log::debug!(
                "{} author reference(s) without a key dropped",
                record.authors.len() - keys.len()
            );
        }

        let lookups = keys.iter().map(|key| async move {
            match self.fetch_author_name(key).await {
                Ok(name) => name,
                Err(e) => {
                    log::debug!("Author {} could not be resolved: {}", key, e);
                    None
                }
            }
        });

        future::join_all(lookups)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn fetch_author_name(&self, author_key: &str) -> Result<Option<String>> {
        let url = author_url(&self.config.endpoints, author_key);
        let response = self.client.get(&url).await?.error_for_status()?;
        let author: AuthorRecord = response.json()?;
        Ok(author.name.filter(|name| !name.trim().is_empty()))
    }

    async fn fetch_summary(&self, title: &str) -> Result<Option<EncyclopediaSummary>> {
        let endpoints = &self.config.endpoints;
        let url = encyclopedia_query_url(endpoints, title)?;
        let response = self.client.get(&url).await?.error_for_status()?;
        let query: QueryResponse = response.json()?;
        let page_url = encyclopedia_page_url(endpoints, title)?;
        Ok(EncyclopediaSummary::from_response(&query, page_url))
    }
}
