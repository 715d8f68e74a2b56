// src/utils/url.rs

//! Endpoint URL construction and key handling.

use std::sync::OnceLock;

use regex::Regex;
use url::{Url, form_urlencoded};

use crate::error::{AppError, Result};
use crate::models::EndpointConfig;

/// Percent-encode a value for use inside a query string.
pub fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// `GET /recentchanges.json?limit=N`
pub fn recent_changes_url(endpoints: &EndpointConfig, limit: u32) -> Result<String> {
    let mut url = Url::parse(&format!("{}/recentchanges.json", endpoints.catalog()))?;
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string());
    Ok(url.into())
}

/// `GET /search.json?q=<query>`
pub fn search_url(endpoints: &EndpointConfig, query: &str) -> Result<String> {
    let mut url = Url::parse(&format!("{}/search.json", endpoints.catalog()))?;
    url.query_pairs_mut().append_pair("q", query);
    Ok(url.into())
}

/// `GET /works/<id>.json`
pub fn work_url(endpoints: &EndpointConfig, work_id: &str) -> String {
    format!("{}/works/{}.json", endpoints.catalog(), work_id)
}

/// `GET /authors/<id>.json`, from a full author key such as `/authors/OL1A`.
pub fn author_url(endpoints: &EndpointConfig, author_key: &str) -> String {
    let key = author_key.trim();
    if key.starts_with('/') {
        format!("{}{}.json", endpoints.catalog(), key)
    } else {
        format!("{}/{}.json", endpoints.catalog(), key)
    }
}

/// MediaWiki `action=query` request for the intro extract and page image of a title.
pub fn encyclopedia_query_url(endpoints: &EndpointConfig, title: &str) -> Result<String> {
    let mut url = Url::parse(&format!("{}/w/api.php", endpoints.encyclopedia()))?;
    url.query_pairs_mut()
        .append_pair("origin", "*")
        .append_pair("action", "query")
        .append_pair("prop", "extracts|pageimages")
        .append_pair("exintro", "1")
        .append_pair("explaintext", "1")
        .append_pair("titles", title)
        .append_pair("format", "json");
    Ok(url.into())
}

/// Human-facing article URL for a title.
pub fn encyclopedia_page_url(endpoints: &EndpointConfig, title: &str) -> Result<String> {
    let mut url = Url::parse(&format!("{}/wiki/", endpoints.encyclopedia()))?;
    url.path_segments_mut()
        .map_err(|_| AppError::config("encyclopedia_url cannot be a base URL"))?
        .pop_if_empty()
        .push(title);
    Ok(url.into())
}

fn work_key_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(?:https?://[^/]+)?/?(?:works/)?([^/?#]+)").ok())
        .as_ref()
}

/// Extract the work id from `OL45804W`, `/works/OL45804W`, or a catalog URL.
pub fn normalize_work_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let caps = work_key_pattern()?.captures(trimmed)?;
    let id = caps.get(1)?.as_str();
    let id = id.strip_suffix(".json").unwrap_or(id);
    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> EndpointConfig {
        EndpointConfig::default()
    }

    #[test]
    fn test_recent_changes_url() {
        assert_eq!(
            recent_changes_url(&endpoints(), 5).unwrap(),
            "https://openlibrary.org/recentchanges.json?limit=5"
        );
    }

    #[test]
    fn test_search_url_escapes_query() {
        assert_eq!(
            search_url(&endpoints(), "author:Jane Austen & co").unwrap(),
            "https://openlibrary.org/search.json?q=author%3AJane+Austen+%26+co"
        );
    }

    #[test]
    fn test_work_and_author_urls() {
        assert_eq!(
            work_url(&endpoints(), "OL66554W"),
            "https://openlibrary.org/works/OL66554W.json"
        );
        assert_eq!(
            author_url(&endpoints(), "/authors/OL21594A"),
            "https://openlibrary.org/authors/OL21594A.json"
        );
        assert_eq!(
            author_url(&endpoints(), "authors/OL21594A"),
            "https://openlibrary.org/authors/OL21594A.json"
        );
    }

    #[test]
    fn test_encyclopedia_urls() {
        let query = encyclopedia_query_url(&endpoints(), "Pride and Prejudice").unwrap();
        assert!(query.starts_with("https://en.wikipedia.org/w/api.php?origin=*&action=query"));
        assert!(query.contains("titles=Pride+and+Prejudice"));
        assert!(query.ends_with("format=json"));

        assert_eq!(
            encyclopedia_page_url(&endpoints(), "Pride and Prejudice").unwrap(),
            "https://en.wikipedia.org/wiki/Pride%20and%20Prejudice"
        );
    }

    #[test]
    fn test_normalize_work_id() {
        assert_eq!(normalize_work_id("OL45804W"), Some("OL45804W".to_string()));
        assert_eq!(normalize_work_id(" /works/OL45804W "), Some("OL45804W".to_string()));
        assert_eq!(
            normalize_work_id("https://openlibrary.org/works/OL45804W/Fantastic_Mr_Fox"),
            Some("OL45804W".to_string())
        );
        assert_eq!(normalize_work_id("works/OL1W.json"), Some("OL1W".to_string()));
        assert_eq!(normalize_work_id("   "), None);
    }
}
