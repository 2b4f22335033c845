//! Content Pipeline - Single Entry Point
//!
//! validate_entry is the only validation path; document checking and
//! the CLI both go through it. The pipeline reports per-document
//! failures and leaves abort-or-skip policy to the caller.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::entry::{Entry, EntryError, ValidatedEntry};
use crate::frontmatter::{self, FrontMatterError};
use crate::schema::{CollectionSchema, SchemaRegistry};
use crate::validation::{FieldError, RawFields, ValidationFailure, Validator};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Schema for {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Schema for {0} carries an unparsable version requirement")]
    InvalidSchemaVersion(String),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One document that validated cleanly.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedEntry {
    pub collection: String,
    pub slug: String,
    pub path: PathBuf,
    pub entry: Entry,
}

/// One document that did not, traceable to its source path. Field-level
/// detail is present when the failure came from validation.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl DocumentFailure {
    fn from_error(path: &Path, error: &PipelineError) -> Self {
        let errors = match error {
            PipelineError::Validation(failure) => Some(failure.errors.clone()),
            _ => None,
        };
        Self {
            path: path.to_path_buf(),
            message: error.to_string(),
            errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub entries: Vec<LoadedEntry>,
    pub failures: Vec<DocumentFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The content pipeline - validates raw entries and whole content trees.
pub struct ContentPipeline {
    registry: SchemaRegistry,
    validator: Validator,
}

impl ContentPipeline {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            validator: Validator::new(),
        }
    }

    /// List all known collection schemas.
    pub fn collections(&self) -> Vec<&CollectionSchema> {
        self.registry.list()
    }

    pub fn schema(&self, collection: &str) -> Option<&CollectionSchema> {
        self.registry.get(collection)
    }

    /// Validate one raw entry against its collection's schema.
    ///
    /// This is the ONLY validation entry point.
    pub fn validate_entry(
        &self,
        collection: &str,
        raw: &RawFields,
    ) -> Result<ValidatedEntry, PipelineError> {
        let schema = self
            .registry
            .get(collection)
            .ok_or_else(|| PipelineError::UnknownCollection(collection.to_string()))?;

        self.check_engine_version(schema)?;

        Ok(self.validator.validate(schema, raw)?)
    }

    /// Read, parse, and validate one document, producing its typed entry.
    pub fn check_document(
        &self,
        collection: &str,
        path: &Path,
    ) -> Result<LoadedEntry, PipelineError> {
        debug!(path = %path.display(), "validating content document");

        let source = fs::read_to_string(path)?;
        let document = frontmatter::parse_document(&source)?;
        let validated = self.validate_entry(collection, &document.fields)?;
        let entry = Entry::from_validated(&validated)?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(LoadedEntry {
            collection: collection.to_string(),
            slug,
            path: path.to_path_buf(),
            entry,
        })
    }

    /// Walk an Astro-style content tree (`<dir>/<collection>/<slug>.md`)
    /// and validate every document. Invalid documents never abort the
    /// walk; they are reported alongside the valid entries.
    pub fn load_dir(&self, content_dir: &Path) -> Result<LoadReport, PipelineError> {
        let mut report = LoadReport {
            entries: vec![],
            failures: vec![],
        };

        for dir_entry in fs::read_dir(content_dir)? {
            let dir_entry = dir_entry?;
            let dir_path = dir_entry.path();
            if !dir_path.is_dir() {
                continue;
            }
            let Some(collection) = dir_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.registry.get(collection).is_none() {
                warn!(collection = %collection, "no schema for content directory, skipping");
                continue;
            }

            let mut documents: Vec<PathBuf> = fs::read_dir(&dir_path)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .map_or(false, |e| e == "md" || e == "mdx")
                })
                .collect();
            documents.sort();

            for document in documents {
                match self.check_document(collection, &document) {
                    Ok(loaded) => report.entries.push(loaded),
                    Err(error) => {
                        warn!(path = %document.display(), %error, "document rejected");
                        report.failures.push(DocumentFailure::from_error(&document, &error));
                    }
                }
            }
        }

        Ok(report)
    }

    fn check_engine_version(&self, schema: &CollectionSchema) -> Result<(), PipelineError> {
        let engine = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PipelineError::InvalidSchemaVersion(schema.collection.clone()))?;
        let min = semver::Version::parse(&schema.engine_min_version)
            .map_err(|_| PipelineError::InvalidSchemaVersion(schema.collection.clone()))?;

        if engine < min {
            return Err(PipelineError::EngineVersionMismatch(
                schema.collection.clone(),
                schema.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ContentPipeline {
    fn default() -> Self {
        Self::new(SchemaRegistry::with_builtins())
    }
}
