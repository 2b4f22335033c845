//! Content Validation - Exhaustive Field Checking
//!
//! The validator walks a collection's field descriptors and collects
//! every violation. An entry either fully validates or is rejected in
//! full; no partial entry is ever produced.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::entry::{FieldValue, ValidatedEntry};
use crate::schema::{CollectionSchema, FieldKind, FieldSpec};

/// Raw front-matter: field name to loosely-typed value. Unknown fields
/// are ignored by validation.
pub type RawFields = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    MissingRequiredField,
    TypeMismatch,
    EnumConstraintViolation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub expected: String,
    /// Rendered raw value, absent when the field itself was absent.
    pub actual: Option<String>,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::MissingRequiredField => {
                write!(f, "{}: missing required field (expected {})", self.field, self.expected)
            }
            FieldErrorKind::TypeMismatch | FieldErrorKind::EnumConstraintViolation => {
                write!(
                    f,
                    "{}: expected {}, got {}",
                    self.field,
                    self.expected,
                    self.actual.as_deref().unwrap_or("nothing")
                )
            }
        }
    }
}

/// Aggregate failure for one entry, carrying every field error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub collection: String,
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(
            f,
            "Validation failed for {} entry: {}",
            self.collection,
            details.join("; ")
        )
    }
}

impl std::error::Error for ValidationFailure {}

/// Validator - pure and stateless; safe to call from any thread.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check `raw` against `schema`. Field order never affects the
    /// result; all errors are collected before failing.
    pub fn validate(
        &self,
        schema: &CollectionSchema,
        raw: &RawFields,
    ) -> Result<ValidatedEntry, ValidationFailure> {
        let mut fields = BTreeMap::new();
        let mut errors = vec![];

        for spec in &schema.fields {
            match raw.get(&spec.name) {
                Some(value) => match check_value(spec, value) {
                    Ok(validated) => {
                        fields.insert(spec.name.clone(), validated);
                    }
                    Err(error) => errors.push(error),
                },
                None if spec.required => errors.push(FieldError {
                    field: spec.name.clone(),
                    kind: FieldErrorKind::MissingRequiredField,
                    expected: spec.kind.expected(),
                    actual: None,
                }),
                None => {
                    if let Some(default) = &spec.default {
                        fields.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(ValidatedEntry::new(schema.collection.clone(), fields))
        } else {
            Err(ValidationFailure { collection: schema.collection.clone(), errors })
        }
    }
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<FieldValue, FieldError> {
    match &spec.kind {
        FieldKind::String => match value {
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            other => Err(mismatch(spec, other)),
        },
        FieldKind::Date => match value {
            Value::String(s) => parse_date(s)
                .map(FieldValue::Date)
                .ok_or_else(|| mismatch(spec, value)),
            other => Err(mismatch(spec, other)),
        },
        FieldKind::Boolean => match value {
            Value::Bool(b) => Ok(FieldValue::Boolean(*b)),
            other => Err(mismatch(spec, other)),
        },
        FieldKind::StringList => match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        _ => return Err(mismatch(spec, value)),
                    }
                }
                Ok(FieldValue::StringList(out))
            }
            other => Err(mismatch(spec, other)),
        },
        FieldKind::Enum { allowed } => match value {
            Value::String(s) if allowed.iter().any(|a| a == s) => {
                Ok(FieldValue::String(s.clone()))
            }
            // Exact, case-sensitive match only.
            Value::String(_) => Err(FieldError {
                field: spec.name.clone(),
                kind: FieldErrorKind::EnumConstraintViolation,
                expected: spec.kind.expected(),
                actual: Some(value.to_string()),
            }),
            other => Err(mismatch(spec, other)),
        },
    }
}

fn mismatch(spec: &FieldSpec, actual: &Value) -> FieldError {
    FieldError {
        field: spec.name.clone(),
        kind: FieldErrorKind::TypeMismatch,
        expected: spec.kind.expected(),
        actual: Some(actual.to_string()),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 date-time (date part taken).
pub(crate) fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive())
}
