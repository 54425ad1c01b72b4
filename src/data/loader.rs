// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads a CSV file with a header row into a RawTable, and writes
// a RawTable back out.
//
// The reader is deliberately lenient: it accepts ragged rows
// (flexible mode) and keeps every cell as a raw Value. Rejecting
// bad data is the validator's job, not the reader's — that way the
// operator sees "Missing columns: ['assignments']" instead of a
// low-level CSV parse error.
//
// A missing input file is reported as PipelineError::MissingFile
// with a hint naming the pipeline step that produces the file.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::fs;
use std::path::{Path, PathBuf};

use crate::data::table::{RawTable, Value};
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::TableSource;

/// Loads one CSV file as a raw table.
/// Implements the TableSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
    /// What the file is, for error messages ("Processed data")
    what: &'static str,
    /// Command that produces the file
    hint: &'static str,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>, what: &'static str, hint: &'static str) -> Self {
        Self { path: path.into(), what, hint }
    }
}

impl TableSource for CsvLoader {
    fn load_table(&self) -> PipelineResult<RawTable> {
        if !self.path.exists() {
            return Err(PipelineError::MissingFile {
                what: self.what,
                path: self.path.clone(),
                hint: self.hint,
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Value::parse).collect());
        }

        tracing::debug!(
            "Read {} rows x {} columns from '{}'",
            rows.len(),
            columns.len(),
            self.path.display()
        );
        Ok(RawTable::new(columns, rows))
    }
}

/// Write a raw table as CSV with a header row, creating parent directories.
/// Null cells are written as empty fields. Rows are written at their own
/// width, so an overlong row survives the copy for the validator to see.
pub fn write_table(path: &Path, table: &RawTable) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported() {
        let dir    = tempfile::tempdir().unwrap();
        let loader = CsvLoader::new(dir.path().join("nope.csv"), "Raw data", "add the raw CSV");
        let err    = loader.load_table().unwrap_err();
        assert!(matches!(err, PipelineError::MissingFile { .. }));
    }

    #[test]
    fn test_reads_ragged_rows_and_blanks() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "a,b,c\n1,,x\n2\n").unwrap();

        let table = CsvLoader::new(&path, "Test", "n/a").load_table().unwrap();
        assert_eq!(table.columns(), &["a", "b", "c"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][0], Value::Number(1.0));
        assert!(table.rows()[0][1].is_null());
        assert_eq!(table.rows()[0][2], Value::Text("x".into()));
        assert!(table.rows()[1][2].is_null());
    }

    #[test]
    fn test_write_then_read_preserves_cells() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let table = RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Number(92.5), Value::Null]],
        );

        write_table(&path, &table).unwrap();
        let back = CsvLoader::new(&path, "Test", "n/a").load_table().unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_overlong_row_survives_read_and_write() {
        let dir  = tempfile::tempdir().unwrap();
        let src  = dir.path().join("in.csv");
        let dst  = dir.path().join("out.csv");
        fs::write(&src, "a,b\n1,2,999\n3,4\n").unwrap();

        let table = CsvLoader::new(&src, "Test", "n/a").load_table().unwrap();
        assert_eq!(table.rows()[0].len(), 3);
        assert_eq!(table.rows()[0][2], Value::Number(999.0));

        write_table(&dst, &table).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "a,b\n1,2,999\n3,4\n");
    }
}
