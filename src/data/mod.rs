// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a CSV file on disk to aligned feature/label
// arrays ready for training.
//
// The pipeline flows in this order:
//
//   CSV file
//       │
//       ▼
//   CsvLoader         → reads rows into a loosely typed RawTable
//       │
//       ▼
//   validator         → enforces STUDENT_SCHEMA, fails on first violation
//       │
//       ▼
//   ValidatedDataset  → typed, immutable StudentRecords
//       │
//       ▼
//   splitter          → stratified, seeded train/test partition
//       │
//       ▼
//   LabeledSet        → features + labels, row aligned
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loosely typed table of raw cells
pub mod table;

/// Reads and writes CSV files
pub mod loader;

/// Schema validation
pub mod validator;

/// Validated dataset and labelled feature sets
pub mod dataset;

/// Seeded, stratified train/test split
pub mod splitter;
