// src/pipeline/detail.rs

use crate::error::AppError;
use crate::models::{BookDetail, LoadState};
use crate::services::BookDetailAssembler;

use super::{DETAIL_FAILED, Library, NO_KEY};

impl Library {
    /// Assemble the single-book view.
    pub async fn load_book_detail(&self, key: &str) -> LoadState<BookDetail> {
        let assembler = BookDetailAssembler::new(self.client.clone(), self.config.clone());
        match assembler.assemble(key).await {
            Ok(detail) => LoadState::Loaded(detail),
            Err(AppError::EmptyKey) => LoadState::Failed(NO_KEY.to_string()),
            Err(e) => {
                log::error!("Error fetching book details: {}", e);
                LoadState::Failed(DETAIL_FAILED.to_string())
            }
        }
    }
}
