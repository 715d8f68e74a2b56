// src/pipeline/recent.rs

use crate::models::{LoadState, RecentChanges};
use crate::services::RecentChangesLoader;

use super::Library;

impl Library {
    /// Load the home view feed. Always ends in `Loaded`, possibly with fallback data.
    pub async fn load_recent_changes(&self) -> LoadState<RecentChanges> {
        let loader = RecentChangesLoader::new(self.client.clone(), self.config.clone());
        let changes = loader.load().await;
        if let Some(message) = &changes.message {
            log::warn!("{}", message);
        }
        LoadState::Loaded(changes)
    }
}
