//! Front-matter Extraction
//!
//! Splits a Markdown document into its leading `---` YAML block and
//! body, and turns the block into the raw field mapping the validator
//! consumes. Document discovery lives in the pipeline; this module
//! never touches the filesystem.

use thiserror::Error;

use crate::validation::RawFields;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("Document has no front-matter block")]
    Missing,

    #[error("Front-matter block is not terminated")]
    Unterminated,

    #[error("Front-matter is not valid YAML: {0}")]
    Malformed(#[from] serde_yaml::Error),

    #[error("Front-matter must be a mapping of field names to values")]
    NotAMapping,

    #[error("Front-matter value for {0} cannot be represented: {1}")]
    Unrepresentable(String, serde_json::Error),
}

/// A source document split into metadata and content.
#[derive(Debug, Clone)]
pub struct Document {
    pub fields: RawFields,
    pub body: String,
}

/// Parse a document's front-matter into raw fields. The block must be
/// the first thing in the document, delimited by `---` lines.
pub fn parse_document(source: &str) -> Result<Document, FrontMatterError> {
    let (block, body) = split(source)?;

    let value: serde_yaml::Value = serde_yaml::from_str(block)?;
    let fields = match value {
        serde_yaml::Value::Mapping(mapping) => {
            let mut fields = RawFields::new();
            for (key, value) in mapping {
                let name = key.as_str().ok_or(FrontMatterError::NotAMapping)?.to_string();
                let raw = serde_json::to_value(&value)
                    .map_err(|e| FrontMatterError::Unrepresentable(name.clone(), e))?;
                fields.insert(name, raw);
            }
            fields
        }
        // An empty block is fine; defaults may cover everything.
        serde_yaml::Value::Null => RawFields::new(),
        _ => return Err(FrontMatterError::NotAMapping),
    };

    Ok(Document { fields, body: body.to_string() })
}

fn split(source: &str) -> Result<(&str, &str), FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let after_open = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
        .ok_or(FrontMatterError::Missing)?;

    let mut offset = 0;
    while offset <= after_open.len() {
        let candidate = &after_open[offset..];
        if let Some(rest) = candidate.strip_prefix("---") {
            if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
                let block = &after_open[..offset];
                let body = rest
                    .strip_prefix("\r\n")
                    .or_else(|| rest.strip_prefix('\n'))
                    .unwrap_or(rest);
                return Ok((block, body));
            }
        }
        match candidate.find('\n') {
            Some(newline) => offset += newline + 1,
            None => break,
        }
    }

    Err(FrontMatterError::Unterminated)
}
