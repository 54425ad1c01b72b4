// ============================================================
// Layer 3 — Student Record Domain Types
// ============================================================
// Plain data structs for one student observation and for the
// request/response pair of the prediction endpoint.
//
//   StudentRecord      — a validated row (four features + result)
//   FeatureVector      — the four features in training order
//   PredictionRequest  — JSON body of POST /predict
//   PredictionResponse — JSON reply: {"prediction": 0|1, "label": ...}
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::schema::FEATURE_COUNT;

/// Feature values in the fixed order
/// [attendance, study_hours, previous_marks, assignments].
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One validated student row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub attendance:     f64,
    pub study_hours:    f64,
    pub previous_marks: f64,
    pub assignments:    f64,
    pub result:         u8,
}

impl StudentRecord {
    pub fn features(&self) -> FeatureVector {
        [self.attendance, self.study_hours, self.previous_marks, self.assignments]
    }
}

/// The four feature values for one student, as received over HTTP.
/// Every key is required; serde rejects missing or non-numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub attendance:     f64,
    pub study_hours:    f64,
    pub previous_marks: f64,
    pub assignments:    f64,
}

impl PredictionRequest {
    /// Assemble the model input in training order.
    pub fn to_features(&self) -> FeatureVector {
        [self.attendance, self.study_hours, self.previous_marks, self.assignments]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: u8,
    pub label:      String,
}

impl PredictionResponse {
    /// Class 1 is a pass; anything else is a fail.
    pub fn from_class(class: u8) -> Self {
        let label = if class == 1 { "PASS" } else { "FAIL" };
        Self { prediction: class, label: label.to_string() }
    }
}
