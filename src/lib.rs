//! Solofolio Content - Collection Schemas and Validation
//!
//! Content entries for the blog and portfolio collections either fully
//! validate or are rejected in full: required fields present and
//! type-correct, optional fields defaulted, every field error for an
//! entry reported together.

pub mod entry;
pub mod frontmatter;
pub mod logger;
pub mod pipeline;
pub mod schema;
pub mod site;
pub mod validation;

pub use entry::{BlogEntry, Entry, FieldValue, PortfolioEntry, ProjectStatus, ValidatedEntry};
pub use frontmatter::{Document, FrontMatterError};
pub use pipeline::{ContentPipeline, DocumentFailure, LoadReport, LoadedEntry, PipelineError};
pub use schema::{CollectionSchema, FieldKind, FieldSpec, SchemaRegistry};
pub use site::{OutputMode, SiteConfig};
pub use validation::{FieldError, FieldErrorKind, RawFields, ValidationFailure, Validator};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
