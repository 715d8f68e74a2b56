//! Service layer for the library client.
//!
//! This module contains the fetch and merge logic for:
//! - Throttling-aware fetching (`RetryFetcher`)
//! - The catalog change feed (`RecentChangesLoader`)
//! - Catalog search (`SearchLoader`)
//! - Book detail assembly (`BookDetailAssembler`)
//! - Advanced search query syntax (`QueryBuilder`)

mod detail;
mod query;
mod recent;
mod retry;
mod search;

pub use detail::BookDetailAssembler;
pub use query::QueryBuilder;
pub use recent::{NO_RECENT_CHANGES, RecentChangesLoader, fallback_change};
pub use retry::{RetryFetcher, RetryPolicy};
pub use search::SearchLoader;
