// src/lib.rs

//! Libraria Library
//!
//! Book discovery on top of the Open Library catalog, enriched with
//! Wikipedia summaries.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;
