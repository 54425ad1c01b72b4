// ============================================================
// Layer 4 — Schema Validator
// ============================================================
// Checks a raw table against STUDENT_SCHEMA and fails loudly on
// the first broken rule. Bad rows are never dropped or coerced.
//
// Checks run in this fixed order; the first failure is returned:
//
//   1. Emptiness      → EmptyDataset
//      Row width      → RaggedRow (more fields than the header)
//   2. Column set     → Schema { missing, extra }
//   3. Nulls          → NullValues { (column, count)… }
//   4. Types          → InvalidType (numeric columns only)
//   5. Ranges         → OutOfRange (Range constraints, schema order)
//   6. Target domain  → InvalidTarget (OneOf constraint on `result`)
//
// The table is only borrowed; validation has no side effects.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §13 (Iterators)

use std::cmp::Ordering;

use crate::data::table::{ColumnType, RawTable, Value};
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::schema::{Constraint, FieldKind, FieldSpec, STUDENT_SCHEMA};

/// Validate `table` against the student schema.
pub fn validate(table: &RawTable) -> PipelineResult<()> {
    validate_against(table, STUDENT_SCHEMA)
}

/// Validate `table` against an arbitrary schema descriptor.
pub fn validate_against(table: &RawTable, schema: &[FieldSpec]) -> PipelineResult<()> {
    // ── 1: Emptiness ──────────────────────────────────────────────────────────
    if table.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    if let Some((idx, found)) = table.first_overlong_row() {
        return Err(PipelineError::RaggedRow {
            row:      idx + 1,
            expected: table.columns().len(),
            found,
        });
    }

    // ── 2: Column completeness (both directions, reported together) ───────────
    let names: Vec<&str> = schema.iter().map(|f| f.name).collect();
    let (missing, extra) = compare_columns(table.columns(), &names);
    if !missing.is_empty() || !extra.is_empty() {
        return Err(PipelineError::Schema { missing, extra });
    }

    // Every schema column is present from here on
    let columns: Vec<(&FieldSpec, usize)> = schema
        .iter()
        .filter_map(|f| table.column_index(f.name).map(|idx| (f, idx)))
        .collect();

    // ── 3: Nulls ──────────────────────────────────────────────────────────────
    let counts: Vec<(String, usize)> = columns
        .iter()
        .map(|(f, idx)| (f.name.to_string(), table.null_count(*idx)))
        .filter(|(_, n)| *n > 0)
        .collect();
    if !counts.is_empty() {
        return Err(PipelineError::NullValues { counts });
    }

    // ── 4: Types ──────────────────────────────────────────────────────────────
    for (field, idx) in columns.iter().filter(|(f, _)| f.kind == FieldKind::Numeric) {
        let actual = table.column_type(*idx);
        if actual != ColumnType::Numeric {
            return Err(PipelineError::InvalidType {
                column:   field.name.to_string(),
                expected: ColumnType::Numeric.name(),
                actual:   actual.name(),
            });
        }
    }

    // ── 5: Ranges ─────────────────────────────────────────────────────────────
    for (field, idx) in &columns {
        if let Constraint::Range { .. } = field.constraint {
            let violations = table
                .column(*idx)
                .filter(|v| v.as_number().map_or(false, |n| !field.constraint.admits(n)))
                .count();
            if violations > 0 {
                return Err(PipelineError::OutOfRange {
                    column: field.name.to_string(),
                    rule:   field.constraint.describe(),
                    violations,
                });
            }
        }
    }

    // ── 6: Target domain ──────────────────────────────────────────────────────
    for (field, idx) in &columns {
        if let Constraint::OneOf(_) = field.constraint {
            let mut offending: Vec<&Value> = table
                .column(*idx)
                .filter(|v| match v {
                    Value::Number(n) => !field.constraint.admits(*n),
                    _ => true,
                })
                .collect();
            if !offending.is_empty() {
                offending.sort_by(|a, b| compare_values(a, b));
                offending.dedup();
                return Err(PipelineError::InvalidTarget {
                    column: field.name.to_string(),
                    found:  offending.iter().map(|v| v.to_string()).collect(),
                });
            }
        }
    }

    Ok(())
}

/// Compare a header against the expected column names.
///
/// Returns `(missing, extra)`. A name repeated in the header counts as
/// extra from its second occurrence on, so a duplicated column never
/// passes for the expected one.
pub fn compare_columns<S: AsRef<str>>(columns: &[String], expected: &[S]) -> (Vec<String>, Vec<String>) {
    let missing = expected
        .iter()
        .map(|e| e.as_ref())
        .filter(|e| !columns.iter().any(|c| c == e))
        .map(str::to_string)
        .collect();
    let extra = columns
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            !expected.iter().any(|e| e.as_ref() == c.as_str()) || columns[..*i].contains(*c)
        })
        .map(|(_, c)| c.clone())
        .collect();
    (missing, extra)
}

/// Numbers ascending, then text lexicographically.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Number(_), _)                => Ordering::Less,
        (_, Value::Number(_))                => Ordering::Greater,
        (Value::Text(x), Value::Text(y))     => x.cmp(y),
        (Value::Text(_), Value::Null)        => Ordering::Less,
        (Value::Null, Value::Text(_))        => Ordering::Greater,
        (Value::Null, Value::Null)           => Ordering::Equal,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 5] = ["attendance", "study_hours", "previous_marks", "assignments", "result"];

    fn table_of(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| Value::parse(c)).collect())
                .collect(),
        )
    }

    fn valid_rows() -> Vec<&'static [&'static str]> {
        vec![
            &["92", "5",   "88", "95", "1"],
            &["40", "0.5", "35", "20", "0"],
            &["0",  "0",   "0",  "0",  "0"],
            &["100","12",  "100","100","1"],
        ]
    }

    #[test]
    fn test_valid_dataset_passes() {
        let t = table_of(&HEADER, &valid_rows());
        assert!(validate(&t).is_ok());
    }

    #[test]
    fn test_empty_dataset() {
        let t = table_of(&HEADER, &[]);
        assert!(matches!(validate(&t), Err(PipelineError::EmptyDataset)));
    }

    #[test]
    fn test_missing_assignments_column() {
        let t = table_of(
            &["attendance", "study_hours", "previous_marks", "result"],
            &[&["92", "5", "88", "1"]],
        );
        match validate(&t) {
            Err(PipelineError::Schema { missing, extra }) => {
                assert_eq!(missing, vec!["assignments".to_string()]);
                assert!(extra.is_empty());
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_extra_reported_together() {
        let t = table_of(
            &["attendance", "study_hours", "previous_marks", "result", "age"],
            &[&["92", "5", "88", "1", "17"]],
        );
        match validate(&t) {
            Err(PipelineError::Schema { missing, extra }) => {
                assert_eq!(missing, vec!["assignments".to_string()]);
                assert_eq!(extra, vec!["age".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_column_alone_is_rejected() {
        let mut header = HEADER.to_vec();
        header.push("student_id");
        let t = table_of(&header, &[&["92", "5", "88", "95", "1", "7"]]);
        assert!(matches!(
            validate(&t),
            Err(PipelineError::Schema { ref missing, ref extra }) if missing.is_empty() && extra == &["student_id"]
        ));
    }

    #[test]
    fn test_null_counts_per_column() {
        let t = table_of(&HEADER, &[
            &["",   "5", "88", "95", "1"],
            &["",   "5", "",   "95", "0"],
            &["50", "5", "60", "95", "1"],
        ]);
        match validate(&t) {
            Err(PipelineError::NullValues { counts }) => {
                assert_eq!(counts, vec![("attendance".to_string(), 2), ("previous_marks".to_string(), 1)]);
            }
            other => panic!("expected null error, got {other:?}"),
        }
    }

    #[test]
    fn test_text_in_numeric_column_is_type_error() {
        let t = table_of(&HEADER, &[&["92", "five", "88", "95", "1"]]);
        assert!(matches!(
            validate(&t),
            Err(PipelineError::InvalidType { ref column, actual: "text", .. }) if column == "study_hours"
        ));
    }

    #[test]
    fn test_negative_study_hours_is_range_error_not_type_error() {
        let t = table_of(&HEADER, &[&["92", "-1", "88", "95", "1"]]);
        assert!(matches!(
            validate(&t),
            Err(PipelineError::OutOfRange { ref column, violations: 1, .. }) if column == "study_hours"
        ));
    }

    #[test]
    fn test_first_violated_range_is_reported() {
        // attendance and assignments both out of range; attendance comes first
        let t = table_of(&HEADER, &[&["101", "5", "88", "120", "1"]]);
        assert!(matches!(
            validate(&t),
            Err(PipelineError::OutOfRange { ref column, .. }) if column == "attendance"
        ));
    }

    #[test]
    fn test_each_percent_column_is_bounded() {
        for (col, row) in [
            ("previous_marks", ["50", "5", "100.5", "95", "1"]),
            ("assignments",    ["50", "5", "88",    "-3", "1"]),
        ] {
            let t = table_of(&HEADER, &[&row]);
            match validate(&t) {
                Err(PipelineError::OutOfRange { column, .. }) => assert_eq!(column, col),
                other => panic!("expected range error for {col}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_target_domain_reports_sorted_offenders() {
        let t = table_of(&HEADER, &[
            &["92", "5", "88", "95", "2"],
            &["92", "5", "88", "95", "1"],
            &["92", "5", "88", "95", "yes"],
            &["92", "5", "88", "95", "-1"],
            &["92", "5", "88", "95", "2"],
        ]);
        match validate(&t) {
            Err(PipelineError::InvalidTarget { column, found }) => {
                assert_eq!(column, "result");
                assert_eq!(found, vec!["-1", "2", "yes"]);
            }
            other => panic!("expected target error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let t      = table_of(&HEADER, &valid_rows());
        let before = t.clone();
        validate(&t).unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn test_overlong_row_is_rejected_with_row_number() {
        let t = table_of(&HEADER, &[
            &["92", "5", "88", "95", "1"],
            &["92", "5", "88", "95", "1", "999"],
            &["40", "1", "30", "20", "0"],
        ]);
        match validate(&t) {
            Err(PipelineError::RaggedRow { row, expected, found }) => {
                assert_eq!((row, expected, found), (2, 5, 6));
            }
            other => panic!("expected ragged row error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_target_column_is_extra() {
        let mut header = HEADER.to_vec();
        header.push("result");
        let t = table_of(&header, &[&["92", "5", "88", "95", "1", "0"]]);
        match validate(&t) {
            Err(PipelineError::Schema { missing, extra }) => {
                assert!(missing.is_empty());
                assert_eq!(extra, vec!["result".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_columns_counts_each_repeat() {
        let columns: Vec<String> = ["a", "b", "a", "a", "c"].iter().map(|s| s.to_string()).collect();
        let (missing, extra) = compare_columns(&columns, &["a", "b", "d"]);
        assert_eq!(missing, vec!["d".to_string()]);
        assert_eq!(extra, vec!["a".to_string(), "a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_missing_value_marker_counts_as_null() {
        let t = table_of(&HEADER, &[
            &["NA",  "5", "88",  "95", "1"],
            &["50",  "5", "N/A", "95", "0"],
        ]);
        match validate(&t) {
            Err(PipelineError::NullValues { counts }) => {
                assert_eq!(counts, vec![("attendance".to_string(), 1), ("previous_marks".to_string(), 1)]);
            }
            other => panic!("expected null error, got {other:?}"),
        }
    }
}
