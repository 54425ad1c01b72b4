// ============================================================
// Layer 3 — Pipeline Error Taxonomy
// ============================================================
// Every failure the pipeline can report, as one typed enum.
//
// The batch steps (ingest, validate, preprocess, train) abort on
// the first error, so each variant carries enough detail to tell
// the operator which constraint broke and where:
//   - the offending column(s)
//   - the offending value(s) or counts
//   - for missing files, which pipeline step produces them
//
// The application layer wraps these in anyhow for context.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::path::PathBuf;

/// All errors raised by validation, splitting, training and serving.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// An expected input artifact does not exist yet
    #[error("{what} not found at '{}'. Run: {hint}", .path.display())]
    MissingFile {
        what: &'static str,
        path: PathBuf,
        hint: &'static str,
    },

    #[error("Validation failed: Dataset is empty.")]
    EmptyDataset,

    /// A data row has more fields than the header. `row` is 1-based,
    /// counting data rows after the header.
    #[error("Validation failed: Row {row} has {found} fields but the header has {expected}.")]
    RaggedRow {
        row:      usize,
        expected: usize,
        found:    usize,
    },

    /// Column set differs from the schema. Both lists are always computed.
    #[error("Validation failed: {}", describe_columns(.missing, .extra))]
    Schema {
        missing: Vec<String>,
        extra:   Vec<String>,
    },

    #[error("Validation failed: Null values found: {}", describe_nulls(.counts))]
    NullValues {
        counts: Vec<(String, usize)>,
    },

    #[error("Validation failed: Column '{column}' must be {expected}, got {actual}")]
    InvalidType {
        column:   String,
        expected: &'static str,
        actual:   &'static str,
    },

    #[error("Validation failed: '{column}' must be {rule} ({violations} offending rows).")]
    OutOfRange {
        column:     String,
        rule:       String,
        violations: usize,
    },

    #[error("Validation failed: '{column}' must contain only 0/1. Found: [{}]", .found.join(", "))]
    InvalidTarget {
        column: String,
        found:  Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Model not found at '{}'. Run: student-performance train", .path.display())]
    ModelNotFound {
        path: PathBuf,
    },

    #[error("Model artifact is unusable: {0}")]
    ModelFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used by the data, ml and infra layers.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

fn quoted_list(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", inner.join(", "))
}

fn describe_columns(missing: &[String], extra: &[String]) -> String {
    match (missing.is_empty(), extra.is_empty()) {
        (false, false) => format!(
            "Missing columns: {}; Unexpected columns: {}",
            quoted_list(missing),
            quoted_list(extra)
        ),
        (false, true) => format!("Missing columns: {}", quoted_list(missing)),
        (true, false) => format!("Unexpected columns: {}", quoted_list(extra)),
        (true, true) => "column set mismatch".to_string(),
    }
}

fn describe_nulls(counts: &[(String, usize)]) -> String {
    let inner: Vec<String> = counts
        .iter()
        .map(|(col, n)| format!("'{col}': {n}"))
        .collect();
    format!("{{{}}}", inner.join(", "))
}
