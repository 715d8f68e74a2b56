//! Wikipedia summary attached to a book.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text shown when the matched page has no extract.
pub const NO_SUMMARY: &str = "No Wikipedia summary available.";

/// Short encyclopedia summary for a book title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncyclopediaSummary {
    pub extract: String,
    pub image_url: Option<String>,
    pub page_url: String,
}

/// `action=query` response envelope.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// Keyed by page id, kept in response order
    #[serde(default)]
    pub pages: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryPage {
    #[serde(default)]
    pub extract: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub source: Option<String>,
}

impl QueryResponse {
    /// First page in response order. This is not necessarily the best title match.
    pub fn first_page(&self) -> Option<QueryPage> {
        let page = self.query.as_ref()?.pages.values().next()?;
        serde_json::from_value(page.clone()).ok()
    }
}

impl EncyclopediaSummary {
    /// Build a summary from the first page of a query response.
    pub fn from_response(response: &QueryResponse, page_url: String) -> Option<Self> {
        let page = response.first_page()?;
        Some(Self {
            extract: page
                .extract
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
            image_url: page.thumbnail.and_then(|t| t.source),
            page_url,
        })
    }
}
