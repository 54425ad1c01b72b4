use crate::data::table::{RawTable, Value};
use crate::data::validator::validate;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::{FeatureVector, StudentRecord};
use crate::domain::schema::STUDENT_SCHEMA;

/// A dataset that has passed validation. Immutable from here on.
#[derive(Debug, Clone)]
pub struct ValidatedDataset {
    records: Vec<StudentRecord>,
}

impl ValidatedDataset {
    /// Validate `table` and convert its rows to typed records.
    pub fn from_table(table: &RawTable) -> PipelineResult<Self> {
        validate(table)?;

        let idx: Vec<usize> = STUDENT_SCHEMA
            .iter()
            .map(|f| {
                table.column_index(f.name).ok_or_else(|| PipelineError::Schema {
                    missing: vec![f.name.to_string()],
                    extra:   Vec::new(),
                })
            })
            .collect::<PipelineResult<_>>()?;

        // Validation guarantees every cell below is a number
        let num = |row: &[Value], i: usize| row[idx[i]].as_number().unwrap_or_default();

        let records = table
            .rows()
            .iter()
            .map(|row| StudentRecord {
                attendance:     num(row, 0),
                study_hours:    num(row, 1),
                previous_marks: num(row, 2),
                assignments:    num(row, 3),
                result:         num(row, 4) as u8,
            })
            .collect();

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Separate the target column from the features, keeping row alignment.
    pub fn to_labeled(&self) -> LabeledSet {
        LabeledSet {
            features: self.records.iter().map(StudentRecord::features).collect(),
            labels:   self.records.iter().map(|r| r.result).collect(),
        }
    }
}

/// Features and labels for one side of a split.
/// Row `i` of `features` corresponds to row `i` of `labels`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledSet {
    pub features: Vec<FeatureVector>,
    pub labels:   Vec<u8>,
}

impl LabeledSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct label values present.
    pub fn distinct_labels(&self) -> usize {
        let mut seen: Vec<u8> = self.labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[[f64; 5]]) -> RawTable {
        RawTable::new(
            STUDENT_SCHEMA.iter().map(|f| f.name.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|&v| Value::Number(v)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_from_table_builds_typed_records() {
        let ds = ValidatedDataset::from_table(&raw(&[[92.0, 5.0, 88.0, 95.0, 1.0]])).unwrap();
        assert_eq!(
            ds.records[0],
            StudentRecord { attendance: 92.0, study_hours: 5.0, previous_marks: 88.0, assignments: 95.0, result: 1 }
        );
    }

    #[test]
    fn test_column_order_in_file_does_not_matter() {
        let table = RawTable::new(
            vec!["result".into(), "assignments".into(), "previous_marks".into(), "study_hours".into(), "attendance".into()],
            vec![vec![Value::Number(0.0), Value::Number(10.0), Value::Number(20.0), Value::Number(3.0), Value::Number(40.0)]],
        );
        let set = ValidatedDataset::from_table(&table).unwrap().to_labeled();
        assert_eq!(set.features[0], [40.0, 3.0, 20.0, 10.0]);
        assert_eq!(set.labels, vec![0]);
    }

    #[test]
    fn test_invalid_table_is_refused() {
        let err = ValidatedDataset::from_table(&raw(&[[120.0, 5.0, 88.0, 95.0, 1.0]])).unwrap_err();
        assert!(matches!(err, PipelineError::OutOfRange { ref column, .. } if column == "attendance"));
    }

    #[test]
    fn test_distinct_labels() {
        let set = LabeledSet { features: vec![[0.0; 4]; 3], labels: vec![1, 1, 0] };
        assert_eq!(set.distinct_labels(), 2);
    }
}
