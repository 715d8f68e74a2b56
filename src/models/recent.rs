//! Recent catalog changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single edit from the catalog's change feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentChange {
    #[serde(default)]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,

    /// ISO-8601 timestamp as sent by the catalog
    #[serde(default)]
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ChangeAuthor>,
}

/// Author attached to a change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeAuthor {
    #[serde(rename = "displayname", alias = "displayName", default)]
    pub display_name: String,
}

impl RecentChange {
    /// Parse the timestamp. The feed omits the offset, so naive values are read as UTC.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(parsed.with_timezone(&Utc));
        }
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Author display name, if the change carries one.
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.display_name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Result of loading the change feed.
///
/// `message` is set whenever the list is empty or substituted.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RecentChanges {
    pub changes: Vec<RecentChange>,
    pub message: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
