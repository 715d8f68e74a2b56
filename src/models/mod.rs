// src/models/mod.rs

//! Domain models for the library client.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod book;
mod config;
mod encyclopedia;
mod recent;
mod state;

// Re-export all public types
pub use book::{
    AuthorRef, BookDetail, BookRecord, BookSummary, CoverSize, Description, Excerpt, KeyRef, Link,
    NO_DESCRIPTION, UNKNOWN_TITLE, cover_url,
};
pub use config::{Config, EndpointConfig, HttpConfig, RecentConfig, RetryConfig};
pub use encyclopedia::{EncyclopediaSummary, NO_SUMMARY, QueryPage, QueryResponse};
pub use recent::{ChangeAuthor, RecentChange, RecentChanges};
pub use state::{LoadSlot, LoadState, Ticket};
