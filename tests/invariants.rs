//! Contract Invariant Tests
//!
//! These tests verify the validation guarantees for the built-in
//! collections end to end.

use chrono::NaiveDate;
use serde_json::json;
use std::fs;

use solofolio_content::{
    entry::{Entry, FieldValue, ProjectStatus},
    pipeline::{ContentPipeline, PipelineError},
    validation::{FieldErrorKind, RawFields},
};

fn raw(value: serde_json::Value) -> RawFields {
    serde_json::from_value(value).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn blog_entry_validates_and_gets_defaults() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "title": "Hi",
        "description": "d",
        "pubDate": "2024-01-01"
    }));

    let entry = pipeline.validate_entry("blog", &input).unwrap();

    assert_eq!(entry.get("title"), Some(&FieldValue::String("Hi".to_string())));
    assert_eq!(entry.get("description"), Some(&FieldValue::String("d".to_string())));
    assert_eq!(entry.get("pubDate"), Some(&FieldValue::Date(date(2024, 1, 1))));
    assert_eq!(entry.get("author"), Some(&FieldValue::String("Author".to_string())));
    assert_eq!(entry.get("tags"), Some(&FieldValue::StringList(vec![])));
    assert_eq!(entry.get("draft"), Some(&FieldValue::Boolean(false)));

    // Optional fields without a default stay absent; that is not an error.
    assert!(entry.get("updatedDate").is_none());
    assert!(entry.get("heroImage").is_none());
}

#[test]
fn blog_missing_title_is_the_only_error() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "description": "d",
        "pubDate": "2024-01-01"
    }));

    let failure = match pipeline.validate_entry("blog", &input) {
        Err(PipelineError::Validation(f)) => f,
        other => panic!("expected a validation failure, got {:?}", other.map(|_| ())),
    };

    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].field, "title");
    assert_eq!(failure.errors[0].kind, FieldErrorKind::MissingRequiredField);
    assert!(failure.errors[0].actual.is_none());
}

#[test]
fn portfolio_entry_validates_and_gets_defaults() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "title": "P",
        "description": "d",
        "date": "2024-01-01"
    }));

    let entry = pipeline.validate_entry("portfolio", &input).unwrap();
    assert_eq!(entry.get("status"), Some(&FieldValue::String("completed".to_string())));
    assert_eq!(entry.get("technologies"), Some(&FieldValue::StringList(vec![])));
    assert_eq!(entry.get("featured"), Some(&FieldValue::Boolean(false)));

    let typed = Entry::from_validated(&entry).unwrap();
    match typed {
        Entry::Portfolio(project) => {
            assert_eq!(project.status, ProjectStatus::Completed);
            assert_eq!(project.date, date(2024, 1, 1));
            assert!(!project.featured);
        }
        other => panic!("expected a portfolio entry, got {:?}", other),
    }
}

#[test]
fn portfolio_rejects_unknown_status() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "title": "P",
        "description": "d",
        "date": "2024-01-01",
        "status": "archived"
    }));

    let failure = match pipeline.validate_entry("portfolio", &input) {
        Err(PipelineError::Validation(f)) => f,
        other => panic!("expected a validation failure, got {:?}", other.map(|_| ())),
    };

    assert_eq!(failure.errors.len(), 1);
    assert_eq!(failure.errors[0].field, "status");
    assert_eq!(failure.errors[0].kind, FieldErrorKind::EnumConstraintViolation);
}

#[test]
fn all_errors_for_one_entry_are_reported_together() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "pubDate": "soon",
        "draft": "yes"
    }));

    let failure = match pipeline.validate_entry("blog", &input) {
        Err(PipelineError::Validation(f)) => f,
        other => panic!("expected a validation failure, got {:?}", other.map(|_| ())),
    };

    let mut fields: Vec<&str> = failure.errors.iter().map(|e| e.field.as_str()).collect();
    fields.sort();
    assert_eq!(fields, vec!["description", "draft", "pubDate", "title"]);
}

#[test]
fn validation_is_idempotent() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "title": "Hi",
        "description": "d",
        "pubDate": "2024-01-01",
        "tags": ["rust", "ssg"],
        "heroImage": "/images/hero.png"
    }));

    let first = pipeline.validate_entry("blog", &input).unwrap();
    let second = pipeline.validate_entry("blog", &first.to_raw()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn typed_blog_entry_matches_validated_values() {
    let pipeline = ContentPipeline::default();
    let input = raw(json!({
        "title": "Hi",
        "description": "d",
        "pubDate": "2024-01-01",
        "updatedDate": "2024-02-01T08:00:00Z",
        "tags": ["rust"]
    }));

    let validated = pipeline.validate_entry("blog", &input).unwrap();
    let typed = Entry::from_validated(&validated).unwrap();

    match typed {
        Entry::Blog(post) => {
            assert_eq!(post.title, "Hi");
            assert_eq!(post.pub_date, date(2024, 1, 1));
            assert_eq!(post.updated_date, Some(date(2024, 2, 1)));
            assert_eq!(post.author, "Author");
            assert_eq!(post.tags, vec!["rust"]);
            assert!(!post.draft);
        }
        other => panic!("expected a blog entry, got {:?}", other),
    }
}

#[test]
fn content_tree_check_reports_failures_by_path() {
    let content_dir = tempfile::tempdir().unwrap();
    let blog_dir = content_dir.path().join("blog");
    let portfolio_dir = content_dir.path().join("portfolio");
    fs::create_dir(&blog_dir).unwrap();
    fs::create_dir(&portfolio_dir).unwrap();

    fs::write(
        blog_dir.join("hello.md"),
        "---\ntitle: Hello\ndescription: First post\npubDate: 2024-01-01\n---\n# Hello\n",
    )
    .unwrap();
    fs::write(
        portfolio_dir.join("broken.md"),
        "---\ndescription: No title here\ndate: 2024-01-01\n---\nbody\n",
    )
    .unwrap();

    let pipeline = ContentPipeline::default();
    let report = pipeline.load_dir(content_dir.path()).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].slug, "hello");
    assert_eq!(report.entries[0].collection, "blog");
    assert_eq!(report.entries[0].entry.title(), Some("Hello"));

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].path.ends_with("broken.md"));
    let errors = report.failures[0].errors.as_ref().unwrap();
    assert!(errors.iter().any(|e| e.field == "title"));
    assert!(!report.is_clean());
}

#[test]
fn non_markdown_files_are_ignored() {
    let content_dir = tempfile::tempdir().unwrap();
    let blog_dir = content_dir.path().join("blog");
    fs::create_dir(&blog_dir).unwrap();
    fs::write(blog_dir.join("notes.txt"), "not content").unwrap();

    let pipeline = ContentPipeline::default();
    let report = pipeline.load_dir(content_dir.path()).unwrap();
    assert!(report.entries.is_empty());
    assert!(report.is_clean());
}
