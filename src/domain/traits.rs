// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams where one implementation can be swapped for another
// without touching the code that uses it:
//
//   TableSource  — anything that yields a raw, unvalidated table
//                  (CsvLoader today)
//   Classifier   — any binary model over the four features
//                  (LogisticRegression today)
//   Persistable  — anything that can be written to / read from a path
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::data::table::RawTable;
use crate::domain::error::PipelineResult;
use crate::domain::record::FeatureVector;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can load a raw table of records.
pub trait TableSource {
    fn load_table(&self) -> PipelineResult<RawTable>;
}

// ─── Classifier ───────────────────────────────────────────────────────────────
/// A trained binary classifier.
///
/// Implementations must be deterministic: the same row always
/// yields the same class.
pub trait Classifier {
    /// Predict the class (0 or 1) of a single row.
    fn predict_row(&self, row: &FeatureVector) -> u8;

    /// Predict every row in order.
    fn predict(&self, rows: &[FeatureVector]) -> Vec<u8> {
        rows.iter().map(|r| self.predict_row(r)).collect()
    }
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> PipelineResult<()>;

    fn load(path: &Path) -> PipelineResult<Self>;
}
