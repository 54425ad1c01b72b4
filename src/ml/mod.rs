// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one.
//
// What's in this layer:
//
//   model.rs      — The logistic-regression classifier
//                   • LogisticModule<B>: burn Linear(4 → 1) used to fit
//                   • StandardScaler: per-feature standardisation
//                   • LogisticRegression: fitted f64 weights for inference
//
//   trainer.rs    — The fitting loop
//                   Full-batch Adam on the NdArray CPU backend with
//                   an L2 penalty; deterministic from zero weights
//
//   evaluator.rs  — Classification report on the test split
//                   Precision / recall / F1 / support per class
//
//   predictor.rs  — The prediction service
//                   Loads the artifact once, checks the feature
//                   order, answers single-student predictions
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Logistic-regression model and feature scaler
pub mod model;

/// Deterministic training loop
pub mod trainer;

/// Test-set classification report
pub mod evaluator;

/// Load-once prediction service
pub mod predictor;
