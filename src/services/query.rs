// src/services/query.rs

//! Structured search fields to catalog query syntax.
//!
//! The catalog accepts `field:value` tokens separated by spaces, e.g.
//! `author:tolkien first_publish_year:1954`.

use crate::utils::url::escape;

/// Optional advanced-search fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pub author: Option<String>,
    pub year: Option<String>,
    pub subject: Option<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Non-blank fields as `(field, trimmed value)` in fixed order.
    fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("author", &self.author),
            ("first_publish_year", &self.year),
            ("subject", &self.subject),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then_some((field, value))
        })
        .collect()
    }

    fn join(&self, encode: fn(&str) -> String) -> Option<String> {
        let tokens: Vec<String> = self
            .fields()
            .into_iter()
            .map(|(field, value)| format!("{field}:{}", encode(value)))
            .collect();
        (!tokens.is_empty()).then(|| tokens.join(" "))
    }

    /// Plain query string for the search loader, or `None` if every field is blank.
    pub fn build(&self) -> Option<String> {
        self.join(str::to_string)
    }

    /// Same tokens with each value URL-escaped, for embedding in links.
    pub fn build_encoded(&self) -> Option<String> {
        self.join(escape)
    }

    /// Route of the search view for these fields.
    pub fn search_path(&self) -> Option<String> {
        self.build()
            .map(|query| format!("/search?query={}", escape(&query)))
    }
}
