// src/pipeline/mod.rs

//! Entry points consumed by the presentation layer.
//!
//! - `load_recent_changes`: home view feed
//! - `search_books`: search results view
//! - `load_book_detail`: single book view
//!
//! Each returns a [`LoadState`] and never an error: failures are logged with
//! their cause and reduced to a fixed user-facing message.

mod detail;
mod recent;
mod search;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::models::{Config, LoadSlot, LoadState};
use crate::utils::HttpClient;
use crate::utils::http::shared_client;

/// Shown when a search fails upstream.
pub const SEARCH_FAILED: &str = "Failed to load search results. Please try again later.";

/// Shown when the primary book record cannot be loaded.
pub const DETAIL_FAILED: &str = "Failed to load book details. Please try again later.";

/// Shown when a search is submitted without a query.
pub const NO_QUERY: &str = "No search query provided.";

/// Shown when the detail view is opened without a key.
pub const NO_KEY: &str = "No book key provided.";

/// Shared handles for issuing view loads.
#[derive(Clone)]
pub struct Library {
    client: Arc<dyn HttpClient>,
    config: Arc<Config>,
}

impl Library {
    /// Create a library over an injected HTTP client.
    pub fn new(client: Arc<dyn HttpClient>, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// Create a library backed by `reqwest`, configured from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = shared_client(&config.http)?;
        Ok(Self::new(client, Arc::new(config)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn lock<T>(slot: &Mutex<LoadSlot<T>>) -> MutexGuard<'_, LoadSlot<T>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `load` for the view behind `slot`.
///
/// The slot shows `Loading` while the load runs. The outcome is applied only
/// if no newer load was started on the same slot in the meantime; returns
/// whether it was applied.
pub async fn load_into<T, F>(slot: &Mutex<LoadSlot<T>>, load: F) -> bool
where
    F: Future<Output = LoadState<T>>,
{
    let ticket = lock(slot).begin();
    let outcome = load.await;
    lock(slot).finish(ticket, outcome)
}
