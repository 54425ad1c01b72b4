// ============================================================
// Layer 3 — Declarative Record Schema
// ============================================================
// The expected shape of a student record, written down once as
// data rather than as a chain of hand-written checks.
//
// Each FieldSpec says:
//   - the column name
//   - whether the column is a model input or the target
//   - what kind of values it holds
//   - which constraint its values must satisfy
//
// The validator (Layer 4) walks STUDENT_SCHEMA uniformly, so adding
// a field later is one more entry in the table below.
//
// Feature order matters: the model is trained on the features in
// exactly the order they appear here, and the prediction service
// rebuilds its input vector in the same order.
//
// Reference: Rust Book §6 (Enums), §5 (Structs)

/// Whether a column is a model input or the label being predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Feature,
    Target,
}

/// The kind of values a column must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any finite number
    Numeric,
    /// A class label; checked against the allowed label set only
    Label,
}

/// The value constraint attached to a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Inclusive bounds; either side may be open
    Range { min: Option<f64>, max: Option<f64> },
    /// Value must equal one of the listed numbers
    OneOf(&'static [f64]),
}

impl Constraint {
    /// Returns true if `value` satisfies the constraint.
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Constraint::Range { min, max } => {
                min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
            }
            Constraint::OneOf(allowed) => allowed.iter().any(|&a| a == value),
        }
    }

    /// Human readable form used in error messages, e.g. "between 0 and 100".
    pub fn describe(&self) -> String {
        match *self {
            Constraint::Range { min: Some(lo), max: Some(hi) } => {
                format!("between {lo} and {hi}")
            }
            Constraint::Range { min: Some(lo), max: None } => format!(">= {lo}"),
            Constraint::Range { min: None, max: Some(hi) } => format!("<= {hi}"),
            Constraint::Range { min: None, max: None } => "any number".to_string(),
            Constraint::OneOf(allowed) => {
                let parts: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
                format!("one of {{{}}}", parts.join(", "))
            }
        }
    }
}

/// One column of the record schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name:       &'static str,
    pub role:       FieldRole,
    pub kind:       FieldKind,
    pub constraint: Constraint,
}

const PERCENT: Constraint = Constraint::Range { min: Some(0.0), max: Some(100.0) };
const NON_NEGATIVE: Constraint = Constraint::Range { min: Some(0.0), max: None };
const BINARY: Constraint = Constraint::OneOf(&[0.0, 1.0]);

pub const TARGET_COLUMN: &str = "result";

/// The student record schema, in column order.
pub const STUDENT_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "attendance",     role: FieldRole::Feature, kind: FieldKind::Numeric, constraint: PERCENT },
    FieldSpec { name: "study_hours",    role: FieldRole::Feature, kind: FieldKind::Numeric, constraint: NON_NEGATIVE },
    FieldSpec { name: "previous_marks", role: FieldRole::Feature, kind: FieldKind::Numeric, constraint: PERCENT },
    FieldSpec { name: "assignments",    role: FieldRole::Feature, kind: FieldKind::Numeric, constraint: PERCENT },
    FieldSpec { name: TARGET_COLUMN,    role: FieldRole::Target,  kind: FieldKind::Label,   constraint: BINARY },
];

/// Number of model input features.
pub const FEATURE_COUNT: usize = 4;

/// Feature names in training order.
pub fn feature_names() -> Vec<String> {
    STUDENT_SCHEMA
        .iter()
        .filter(|f| f.role == FieldRole::Feature)
        .map(|f| f.name.to_string())
        .collect()
}
