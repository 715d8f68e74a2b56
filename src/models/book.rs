//! Book data structures: search hits, raw work records, and the merged detail view.

use serde::{Deserialize, Serialize};

use super::EncyclopediaSummary;

/// Title shown when the catalog has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Text shown when a description wrapper carries no value.
pub const NO_DESCRIPTION: &str = "No description available.";

const WORKS_PREFIX: &str = "/works/";

/// Cover image size understood by the covers service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Build the image URL for a cover id.
pub fn cover_url(covers_base: &str, cover_id: i64, size: CoverSize) -> String {
    format!(
        "{}/b/id/{}-{}.jpg",
        covers_base.trim_end_matches('/'),
        cover_id,
        size.suffix()
    )
}

/// A single search hit, in catalog relevance order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookSummary {
    /// Catalog identifier, e.g. `/works/OL45804W`
    pub key: String,

    #[serde(default = "unknown_title", deserialize_with = "lenient::title")]
    pub title: String,

    #[serde(rename = "author_name", default, deserialize_with = "lenient::list")]
    pub author_names: Vec<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub first_publish_year: Option<i32>,

    #[serde(rename = "cover_i", default, deserialize_with = "lenient::optional")]
    pub cover_id: Option<i64>,
}

impl BookSummary {
    /// Work id without the `/works/` prefix, as used to open the detail view.
    pub fn work_id(&self) -> &str {
        self.key.strip_prefix(WORKS_PREFIX).unwrap_or(&self.key)
    }

    /// Cover image URL, if the hit has a cover.
    pub fn cover_url(&self, covers_base: &str, size: CoverSize) -> Option<String> {
        self.cover_id.map(|id| cover_url(covers_base, id, size))
    }
}

/// The two shapes the catalog uses for a description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Wrapped {
        #[serde(default)]
        value: Option<String>,
    },
}

impl Description {
    /// Normalize either representation to plain text.
    pub fn to_text(&self) -> String {
        match self {
            Description::Text(text) => text.clone(),
            Description::Wrapped { value: Some(text) } => text.clone(),
            Description::Wrapped { value: None } => NO_DESCRIPTION.to_string(),
        }
    }
}

/// Reference from a work to one of its authors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthorRef {
    #[serde(default)]
    pub author: Option<KeyRef>,
}

/// A catalog key, either as `{ "key": ... }` or a bare string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeyRef {
    Object {
        #[serde(default)]
        key: Option<String>,
    },
    Bare(String),
}

impl AuthorRef {
    /// The author key, e.g. `/authors/OL21594A`.
    pub fn key(&self) -> Option<&str> {
        let key = match self.author.as_ref()? {
            KeyRef::Object { key } => key.as_deref()?,
            KeyRef::Bare(key) => key.as_str(),
        };
        (!key.trim().is_empty()).then_some(key)
    }
}

/// A quoted passage from the work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Excerpt {
    #[serde(rename = "excerpt", alias = "text", default, deserialize_with = "lenient::text")]
    pub text: String,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
}

/// External link attached to a work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,
}

/// Loosely typed work record from `/works/<id>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    #[serde(default, deserialize_with = "lenient::optional")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<Description>,

    /// Cover image ids; the first is the primary cover
    #[serde(default, deserialize_with = "lenient::list")]
    pub covers: Vec<i64>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub authors: Vec<AuthorRef>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub subjects: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub subject_people: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub subject_places: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub subject_times: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub excerpts: Vec<Excerpt>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub links: Vec<Link>,
}

impl BookRecord {
    /// Author keys in listing order, skipping references without a key.
    pub fn author_keys(&self) -> Vec<&str> {
        self.authors.iter().filter_map(AuthorRef::key).collect()
    }
}

/// Merged view model for a single book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    /// Catalog identifier, e.g. `/works/OL45804W`
    pub key: String,
    pub title: String,
    /// One entry per resolved author, in reference order
    pub author_names: Vec<String>,
    pub description: Option<String>,
    pub encyclopedia: Option<EncyclopediaSummary>,
    pub record: BookRecord,
}

impl BookDetail {
    /// Merge a work record with its resolved authors and optional summary.
    pub fn assemble(
        work_id: &str,
        record: BookRecord,
        author_names: Vec<String>,
        encyclopedia: Option<EncyclopediaSummary>,
    ) -> Self {
        Self {
            key: format!("{WORKS_PREFIX}{work_id}"),
            title: record
                .title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            author_names,
            description: record.description.as_ref().map(Description::to_text),
            encyclopedia,
            record,
        }
    }

    /// Primary cover id.
    pub fn primary_cover(&self) -> Option<i64> {
        self.record.covers.first().copied()
    }

    /// Primary cover image URL.
    pub fn cover_url(&self, covers_base: &str, size: CoverSize) -> Option<String> {
        self.primary_cover()
            .map(|id| cover_url(covers_base, id, size))
    }

    pub fn first_excerpt(&self) -> Option<&Excerpt> {
        self.record.excerpts.first()
    }
}

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

/// Field decoders for catalog JSON, where optional fields may be null or
/// shaped differently from record to record.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Null or a wrong shape decodes as `None`.
    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
    }

    /// Items that fail to decode are dropped. A non-array decodes as empty.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// A plain string or a `{ "type": ..., "value": ... }` wrapper.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Object(map) => map
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        })
    }

    pub fn title<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let title: Option<String> = optional(deserializer)?;
        Ok(title.unwrap_or_else(super::unknown_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_wire_names() {
        let summary: BookSummary = serde_json::from_str(
            r#"{"key":"/works/OL123M","title":"Pride and Prejudice","author_name":["Jane Austen"],"first_publish_year":1813,"cover_i":12345}"#,
        )
        .unwrap();

        assert_eq!(summary.work_id(), "OL123M");
        assert_eq!(summary.author_names, vec!["Jane Austen"]);
        assert_eq!(summary.first_publish_year, Some(1813));
        assert_eq!(
            summary.cover_url("https://covers.openlibrary.org", CoverSize::Medium),
            Some("https://covers.openlibrary.org/b/id/12345-M.jpg".to_string())
        );
    }

    #[test]
    fn test_summary_missing_title() {
        let summary: BookSummary = serde_json::from_str(r#"{"key":"/works/OL9W"}"#).unwrap();
        assert_eq!(summary.title, UNKNOWN_TITLE);
        assert!(summary.author_names.is_empty());
        assert_eq!(summary.cover_url("https://c", CoverSize::Small), None);
    }

    #[test]
    fn test_description_both_shapes() {
        let plain: BookRecord = serde_json::from_str(r#"{"description":"plain"}"#).unwrap();
        let wrapped: BookRecord =
            serde_json::from_str(r#"{"description":{"type":"/type/text","value":"plain"}}"#)
                .unwrap();

        let plain = BookDetail::assemble("OL1W", plain, vec![], None);
        let wrapped = BookDetail::assemble("OL1W", wrapped, vec![], None);

        assert_eq!(plain.description.as_deref(), Some("plain"));
        assert_eq!(wrapped.description.as_deref(), Some("plain"));
    }

    #[test]
    fn test_description_empty_wrapper() {
        let record: BookRecord = serde_json::from_str(r#"{"description":{}}"#).unwrap();
        let detail = BookDetail::assemble("OL1W", record, vec![], None);
        assert_eq!(detail.description.as_deref(), Some(NO_DESCRIPTION));
    }

    #[test]
    fn test_author_keys_skip_missing() {
        let record: BookRecord = serde_json::from_str(
            r#"{"authors":[{"author":{"key":"/authors/OL1A"}},{"type":{"key":"/type/author_role"}},{"author":"/authors/OL2A"},{"author":{}}]}"#,
        )
        .unwrap();

        assert_eq!(record.author_keys(), vec!["/authors/OL1A", "/authors/OL2A"]);
    }

    #[test]
    fn test_assemble_defaults() {
        let record: BookRecord =
            serde_json::from_str(r#"{"covers":[8739161,-1],"excerpts":[{"excerpt":"It is a truth","comment":"first line"}]}"#)
                .unwrap();
        let detail = BookDetail::assemble("OL66554W", record, vec![], None);

        assert_eq!(detail.key, "/works/OL66554W");
        assert_eq!(detail.title, UNKNOWN_TITLE);
        assert_eq!(detail.description, None);
        assert_eq!(
            detail.cover_url("https://covers.openlibrary.org/", CoverSize::Large),
            Some("https://covers.openlibrary.org/b/id/8739161-L.jpg".to_string())
        );
        assert_eq!(detail.first_excerpt().unwrap().text, "It is a truth");
    }

    #[test]
    fn test_summary_null_fields() {
        let summary: BookSummary = serde_json::from_str(
            r#"{"key":"/works/OL1W","title":null,"author_name":null,"first_publish_year":"1999","cover_i":null}"#,
        )
        .unwrap();

        assert_eq!(summary.title, UNKNOWN_TITLE);
        assert!(summary.author_names.is_empty());
        assert_eq!(summary.first_publish_year, None);
        assert_eq!(summary.cover_id, None);
    }

    #[test]
    fn test_summary_requires_key() {
        assert!(serde_json::from_str::<BookSummary>(r#"{"title":"No key"}"#).is_err());
        assert!(serde_json::from_str::<BookSummary>(r#"{"key":null}"#).is_err());
    }

    #[test]
    fn test_record_null_covers() {
        let record: BookRecord =
            serde_json::from_str(r#"{"title":"Dune","covers":null,"links":null}"#).unwrap();

        assert_eq!(record.title.as_deref(), Some("Dune"));
        assert!(record.covers.is_empty());
        assert!(record.links.is_empty());
    }

    #[test]
    fn test_record_list_drops_bad_items() {
        let record: BookRecord = serde_json::from_str(
            r#"{"subjects":["Fiction",null,7,"Deserts"],"subject_places":"Arrakis","covers":[42,"x",null]}"#,
        )
        .unwrap();

        assert_eq!(record.subjects, vec!["Fiction", "Deserts"]);
        assert!(record.subject_places.is_empty());
        assert_eq!(record.covers, vec![42]);
    }

    #[test]
    fn test_excerpt_wrapped_text() {
        let record: BookRecord = serde_json::from_str(
            r#"{"excerpts":[{"excerpt":{"type":"/type/text","value":"A beginning is the time"},"comment":null}]}"#,
        )
        .unwrap();
        let detail = BookDetail::assemble("OL1W", record, vec![], None);

        let excerpt = detail.first_excerpt().unwrap();
        assert_eq!(excerpt.text, "A beginning is the time");
        assert_eq!(excerpt.comment, None);
    }

    #[test]
    fn test_record_odd_title_and_description() {
        let record: BookRecord =
            serde_json::from_str(r#"{"title":null,"description":42}"#).unwrap();
        let detail = BookDetail::assemble("OL1W", record, vec![], None);

        assert_eq!(detail.title, UNKNOWN_TITLE);
        assert_eq!(detail.description, None);
    }
}
