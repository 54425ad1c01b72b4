// ============================================================
// Layer 6 — Split Store
// ============================================================
// Persists the train/test partition as four CSV files so that
// `preprocess` and `train` can run as separate commands:
//
//   data/processed/
//     X_train.csv   ← attendance,study_hours,previous_marks,assignments
//     X_test.csv
//     y_train.csv   ← result
//     y_test.csv
//
// Rows in X_* and y_* are aligned line by line. Reading goes
// through the same CsvLoader as the raw data, then checks the
// header and that every cell is a number (labels: 0 or 1).
//
// Reference: csv crate documentation

use std::path::PathBuf;

use crate::data::dataset::LabeledSet;
use crate::data::loader::{write_table, CsvLoader};
use crate::data::table::{RawTable, Value};
use crate::data::validator::compare_columns;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::FeatureVector;
use crate::domain::schema::{feature_names, TARGET_COLUMN};
use crate::domain::traits::TableSource;

const PRODUCED_BY: &str = "student-performance preprocess";

/// Which half of the partition a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Train,
    Test,
}

impl Part {
    fn suffix(self) -> &'static str {
        match self {
            Part::Train => "train",
            Part::Test  => "test",
        }
    }
}

/// Reads and writes the four split files inside one directory.
pub struct SplitStore {
    dir: PathBuf,
}

impl SplitStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn features_path(&self, part: Part) -> PathBuf {
        self.dir.join(format!("X_{}.csv", part.suffix()))
    }

    pub fn labels_path(&self, part: Part) -> PathBuf {
        self.dir.join(format!("y_{}.csv", part.suffix()))
    }

    /// Write both halves, replacing any previous split.
    pub fn save(&self, train: &LabeledSet, test: &LabeledSet) -> PipelineResult<()> {
        for (part, set) in [(Part::Train, train), (Part::Test, test)] {
            write_table(&self.features_path(part), &features_table(set))?;
            write_table(&self.labels_path(part), &labels_table(set))?;
            tracing::debug!("Wrote {} {} rows to '{}'", set.len(), part.suffix(), self.dir.display());
        }
        Ok(())
    }

    /// Read one half back into aligned features and labels.
    pub fn load(&self, part: Part) -> PipelineResult<LabeledSet> {
        let x = CsvLoader::new(self.features_path(part), "Split features", PRODUCED_BY).load_table()?;
        let y = CsvLoader::new(self.labels_path(part), "Split labels", PRODUCED_BY).load_table()?;

        let features = read_features(&x)?;
        let labels   = read_labels(&y)?;
        if features.len() != labels.len() {
            return Err(PipelineError::Config(format!(
                "{} split has {} feature rows but {} labels; re-run {}",
                part.suffix(),
                features.len(),
                labels.len(),
                PRODUCED_BY
            )));
        }
        Ok(LabeledSet { features, labels })
    }
}

fn features_table(set: &LabeledSet) -> RawTable {
    let rows = set
        .features
        .iter()
        .map(|row| row.iter().map(|&v| Value::Number(v)).collect())
        .collect();
    RawTable::new(feature_names(), rows)
}

fn labels_table(set: &LabeledSet) -> RawTable {
    let rows = set.labels.iter().map(|&l| vec![Value::Number(f64::from(l))]).collect();
    RawTable::new(vec![TARGET_COLUMN.to_string()], rows)
}

fn check_header(table: &RawTable, expected: &[String]) -> PipelineResult<()> {
    if let Some((idx, found)) = table.first_overlong_row() {
        return Err(PipelineError::RaggedRow { row: idx + 1, expected: table.columns().len(), found });
    }
    let (missing, extra) = compare_columns(table.columns(), expected);
    if !missing.is_empty() || !extra.is_empty() {
        return Err(PipelineError::Schema { missing, extra });
    }
    Ok(())
}

fn number(value: &Value, column: &str) -> PipelineResult<f64> {
    value.as_number().ok_or_else(|| PipelineError::InvalidType {
        column:   column.to_string(),
        expected: "numeric",
        actual:   if value.is_null() { "empty" } else { "text" },
    })
}

fn read_features(table: &RawTable) -> PipelineResult<Vec<FeatureVector>> {
    let names = feature_names();
    check_header(table, &names)?;
    let idx: Vec<usize> = names.iter().filter_map(|n| table.column_index(n)).collect();

    table
        .rows()
        .iter()
        .map(|row| {
            let mut out: FeatureVector = Default::default();
            for (slot, (&i, name)) in out.iter_mut().zip(idx.iter().zip(&names)) {
                *slot = number(&row[i], name)?;
            }
            Ok(out)
        })
        .collect()
}

fn read_labels(table: &RawTable) -> PipelineResult<Vec<u8>> {
    check_header(table, &[TARGET_COLUMN.to_string()])?;
    let mut labels = Vec::with_capacity(table.row_count());
    let mut bad    = Vec::new();
    for row in table.rows() {
        let v = number(&row[0], TARGET_COLUMN)?;
        if v == 0.0 || v == 1.0 {
            labels.push(v as u8);
        } else {
            bad.push(row[0].to_string());
        }
    }
    if !bad.is_empty() {
        bad.sort();
        bad.dedup();
        return Err(PipelineError::InvalidTarget { column: TARGET_COLUMN.to_string(), found: bad });
    }
    Ok(labels)
}
