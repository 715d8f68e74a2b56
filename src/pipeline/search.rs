// src/pipeline/search.rs

use crate::error::AppError;
use crate::models::{BookSummary, LoadState};
use crate::services::SearchLoader;

use super::{Library, NO_QUERY, SEARCH_FAILED};

impl Library {
    /// Run a catalog search for the results view.
    pub async fn search_books(&self, query: &str) -> LoadState<Vec<BookSummary>> {
        let loader = SearchLoader::new(self.client.clone(), self.config.clone());
        match loader.search(query).await {
            Ok(results) => LoadState::Loaded(results),
            Err(AppError::EmptyQuery) => LoadState::Failed(NO_QUERY.to_string()),
            Err(e) => {
                log::error!("Error searching books: {}", e);
                LoadState::Failed(SEARCH_FAILED.to_string())
            }
        }
    }
}
