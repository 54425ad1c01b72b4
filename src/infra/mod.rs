// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the files the pipeline leaves behind between steps:
//
//   split_store.rs    — Train/test split persistence
//                       Writes X_train / X_test / y_train / y_test
//                       CSVs after `preprocess` and reads them
//                       back for `train`.
//
//   artifact_store.rs — Model artifact saving and loading
//                       One JSON file holding the fitted weights,
//                       the scaler, the feature order and the
//                       training config.
//
//   metrics.rs        — Evaluation report writer
//                       Writes the classification report to a CSV
//                       next to the model.
//
// Why is this a separate layer?
//   These concerns are used by several use cases but don't belong
//   to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap local files for object storage)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)

/// Train/test split CSV files
pub mod split_store;

/// Model artifact saving and loading
pub mod artifact_store;

/// Classification report CSV writer
pub mod metrics;
