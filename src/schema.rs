//! Collection Schemas - Declarative Shapes
//!
//! Each collection is an ordered list of field descriptors. The shapes
//! carry no logic; the validator iterates the descriptor list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::entry::FieldValue;
use crate::ENGINE_VERSION;

pub type CollectionName = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Date,
    Boolean,
    StringList,
    Enum { allowed: Vec<String> },
}

impl FieldKind {
    /// Constraint description used in validation reports.
    pub fn expected(&self) -> String {
        match self {
            FieldKind::String => "string".to_string(),
            FieldKind::Date => "date (YYYY-MM-DD or RFC 3339)".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::StringList => "list of strings".to_string(),
            FieldKind::Enum { allowed } => format!("one of [{}]", allowed.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self { name: name.to_string(), kind, required: true, default: None }
    }

    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self { name: name.to_string(), kind, required: false, default: None }
    }

    pub fn with_default(name: &str, kind: FieldKind, default: FieldValue) -> Self {
        Self { name: name.to_string(), kind, required: false, default: Some(default) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    pub collection: CollectionName,
    pub schema_version: String,
    pub engine_min_version: String,
    pub fields: Vec<FieldSpec>,
}

impl CollectionSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const STATUS_VALUES: [&str; 3] = ["completed", "in-progress", "planned"];

/// The `blog` collection shape.
pub fn blog_schema() -> CollectionSchema {
    CollectionSchema {
        collection: "blog".to_string(),
        schema_version: "1.0.0".to_string(),
        engine_min_version: ENGINE_VERSION.to_string(),
        fields: vec![
            FieldSpec::required("title", FieldKind::String),
            FieldSpec::required("description", FieldKind::String),
            FieldSpec::required("pubDate", FieldKind::Date),
            FieldSpec::optional("updatedDate", FieldKind::Date),
            FieldSpec::optional("heroImage", FieldKind::String),
            FieldSpec::with_default(
                "author",
                FieldKind::String,
                FieldValue::String("Author".to_string()),
            ),
            FieldSpec::with_default("tags", FieldKind::StringList, FieldValue::StringList(vec![])),
            FieldSpec::with_default("draft", FieldKind::Boolean, FieldValue::Boolean(false)),
        ],
    }
}

/// The `portfolio` collection shape.
pub fn portfolio_schema() -> CollectionSchema {
    CollectionSchema {
        collection: "portfolio".to_string(),
        schema_version: "1.0.0".to_string(),
        engine_min_version: ENGINE_VERSION.to_string(),
        fields: vec![
            FieldSpec::required("title", FieldKind::String),
            FieldSpec::required("description", FieldKind::String),
            FieldSpec::optional("heroImage", FieldKind::String),
            FieldSpec::with_default(
                "technologies",
                FieldKind::StringList,
                FieldValue::StringList(vec![]),
            ),
            FieldSpec::optional("liveUrl", FieldKind::String),
            FieldSpec::optional("githubUrl", FieldKind::String),
            FieldSpec::with_default("featured", FieldKind::Boolean, FieldValue::Boolean(false)),
            FieldSpec::required("date", FieldKind::Date),
            FieldSpec::with_default(
                "status",
                FieldKind::Enum {
                    allowed: STATUS_VALUES.iter().map(|s| s.to_string()).collect(),
                },
                FieldValue::String("completed".to_string()),
            ),
        ],
    }
}

/// Schema registry - holds the built-ins and any schemas loaded from disk.
pub struct SchemaRegistry {
    schemas: HashMap<CollectionName, CollectionSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self { schemas: HashMap::new() }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(blog_schema());
        registry.register(portfolio_schema());
        registry
    }

    /// Built-ins plus every `*.json` schema definition found in `dir`.
    /// A file defining an existing collection replaces it.
    pub fn load_from_dir(dir: &Path) -> Result<Self, std::io::Error> {
        let mut registry = Self::with_builtins();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json") {
                    let content = fs::read_to_string(&path)?;
                    match serde_json::from_str::<CollectionSchema>(&content) {
                        Ok(schema) => registry.register(schema),
                        Err(err) => {
                            warn!(path = %path.display(), %err, "skipping unreadable schema file");
                        }
                    }
                }
            }
        }
        Ok(registry)
    }

    pub fn get(&self, collection: &str) -> Option<&CollectionSchema> {
        self.schemas.get(collection)
    }

    pub fn list(&self) -> Vec<&CollectionSchema> {
        self.schemas.values().collect()
    }

    pub fn register(&mut self, schema: CollectionSchema) {
        self.schemas.insert(schema.collection.clone(), schema);
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
