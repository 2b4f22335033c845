//! Typed Content Entries
//!
//! Immutable records produced by validation. `Entry` is the tagged
//! variant over the built-in collections; unknown collections keep
//! their validated field map as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// A validated field value. Raw input is loosely typed JSON/YAML;
/// these are the only forms that survive validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Date(NaiveDate),
    String(String),
    StringList(Vec<String>),
}

impl FieldValue {
    /// Render back to the raw front-matter representation. Dates become
    /// `YYYY-MM-DD` strings, so re-validating the result round-trips.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// A fully validated, defaulted entry. Immutable once constructed;
/// only the validator builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedEntry {
    collection: String,
    fields: BTreeMap<String, FieldValue>,
}

impl ValidatedEntry {
    pub(crate) fn new(collection: String, fields: BTreeMap<String, FieldValue>) -> Self {
        Self { collection, fields }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Re-render as raw front-matter values. Validating the result
    /// against the same schema yields an equal entry.
    pub fn to_raw(&self) -> BTreeMap<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }
}

#[derive(Debug, Error)]
#[error("Entry does not match the {collection} record: {source}")]
pub struct EntryError {
    pub collection: String,
    #[source]
    pub source: serde_json::Error,
}

/// A blog post's front-matter, validated and defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub title: String,
    pub description: String,
    pub pub_date: NaiveDate,
    #[serde(default)]
    pub updated_date: Option<NaiveDate>,
    #[serde(default)]
    pub hero_image: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
    pub draft: bool,
}

/// A portfolio project's front-matter, validated and defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    pub featured: bool,
    pub date: NaiveDate,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

/// One entry of any collection. Built-in collections get their typed
/// record; schemas loaded from disk keep the validated field map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Blog(BlogEntry),
    Portfolio(PortfolioEntry),
    Custom(ValidatedEntry),
}

impl Entry {
    pub fn from_validated(entry: &ValidatedEntry) -> Result<Self, EntryError> {
        let mut map = serde_json::Map::new();
        for (name, value) in entry.fields() {
            map.insert(name.clone(), value.to_json());
        }
        let raw = Value::Object(map);

        match entry.collection() {
            "blog" => serde_json::from_value(raw)
                .map(Entry::Blog)
                .map_err(|source| EntryError { collection: "blog".to_string(), source }),
            "portfolio" => serde_json::from_value(raw)
                .map(Entry::Portfolio)
                .map_err(|source| EntryError { collection: "portfolio".to_string(), source }),
            _ => Ok(Entry::Custom(entry.clone())),
        }
    }

    pub fn collection(&self) -> &str {
        match self {
            Entry::Blog(_) => "blog",
            Entry::Portfolio(_) => "portfolio",
            Entry::Custom(v) => v.collection(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Entry::Blog(e) => Some(&e.title),
            Entry::Portfolio(e) => Some(&e.title),
            Entry::Custom(v) => match v.get("title") {
                Some(FieldValue::String(s)) => Some(s.as_str()),
                _ => None,
            },
        }
    }

    /// Draft flag for blog posts; other collections have no draft notion.
    pub fn is_draft(&self) -> bool {
        matches!(self, Entry::Blog(e) if e.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_round_trips_through_json() {
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(date.to_json(), Value::String("2024-01-01".to_string()));

        let list = FieldValue::StringList(vec!["rust".to_string(), "wasm".to_string()]);
        assert_eq!(
            list.to_json(),
            serde_json::json!(["rust", "wasm"])
        );
    }

    #[test]
    fn project_status_uses_kebab_case() {
        let status: ProjectStatus = serde_json::from_value(serde_json::json!("in-progress")).unwrap();
        assert_eq!(status, ProjectStatus::InProgress);
        assert_eq!(
            serde_json::to_value(ProjectStatus::Completed).unwrap(),
            serde_json::json!("completed")
        );
    }

    #[test]
    fn blog_entry_deserializes_camel_case_fields() {
        let entry: BlogEntry = serde_json::from_value(serde_json::json!({
            "title": "Hi",
            "description": "d",
            "pubDate": "2024-01-01",
            "author": "Author",
            "tags": [],
            "draft": false
        }))
        .unwrap();
        assert_eq!(entry.pub_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(entry.updated_date, None);
    }
}
