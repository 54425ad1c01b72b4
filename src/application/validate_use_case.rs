// ============================================================
// Layer 2 — ValidateUseCase
// ============================================================
// Checks the processed CSV against the student schema:
//
//   Step 1: Read processed CSV             (Layer 4 - data)
//   Step 2: Run the ordered schema checks  (Layer 4 - data)
//   Step 3: Build typed StudentRecords     (Layer 4 - data)
//
// The first failing check aborts with a message naming the
// violated constraint and the offending columns or values.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::config::PipelinePaths;
use crate::data::dataset::ValidatedDataset;
use crate::data::loader::CsvLoader;
use crate::domain::traits::TableSource;

/// Read `path` and validate it; shared with the preprocess step.
pub fn load_validated(path: &Path) -> Result<ValidatedDataset> {
    let loader = CsvLoader::new(path, "Processed data", "student-performance ingest");
    let table  = loader
        .load_table()
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::debug!("Loaded {} rows for validation", table.row_count());

    let dataset = ValidatedDataset::from_table(&table)?;
    Ok(dataset)
}

pub struct ValidateUseCase {
    paths: PipelinePaths,
}

impl ValidateUseCase {
    pub fn new(paths: PipelinePaths) -> Self {
        Self { paths }
    }

    pub fn execute(&self) -> Result<ValidatedDataset> {
        let path = &self.paths.processed_path;
        tracing::info!("Validating '{}'", path.display());
        let dataset = load_validated(path)?;
        tracing::info!("Data validation passed: {} rows", dataset.len());
        Ok(dataset)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use std::fs;

    fn paths_with(dir: &Path, csv: &str) -> PipelinePaths {
        let processed_path = dir.join("student_data.csv");
        fs::write(&processed_path, csv).unwrap();
        PipelinePaths { processed_path, ..PipelinePaths::default() }
    }

    #[test]
    fn test_valid_file_passes() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = paths_with(
            dir.path(),
            "attendance,study_hours,previous_marks,assignments,result\n90,5,85,88,1\n40,1,35,30,0\n",
        );
        let dataset = ValidateUseCase::new(paths).execute().unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_missing_column_message() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = paths_with(dir.path(), "attendance,study_hours,previous_marks,result\n90,5,85,1\n");
        let err   = ValidateUseCase::new(paths).execute().unwrap_err();
        let inner = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(inner, PipelineError::Schema { .. }));
        assert_eq!(inner.to_string(), "Validation failed: Missing columns: ['assignments']");
    }

    #[test]
    fn test_overlong_row_fails_with_row_number() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = paths_with(
            dir.path(),
            "attendance,study_hours,previous_marks,assignments,result\n92,5,88,95,1,999\n40,1,30,20,0\n",
        );
        let err = ValidateUseCase::new(paths).execute().unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>().unwrap().to_string(),
            "Validation failed: Row 1 has 6 fields but the header has 5."
        );
    }

    #[test]
    fn test_duplicate_header_fails() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = paths_with(
            dir.path(),
            "attendance,study_hours,previous_marks,assignments,result,result\n92,5,88,95,1,0\n",
        );
        let err = ValidateUseCase::new(paths).execute().unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>().unwrap().to_string(),
            "Validation failed: Unexpected columns: ['result']"
        );
    }

    #[test]
    fn test_missing_processed_file_names_ingest() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = PipelinePaths { processed_path: dir.path().join("none.csv"), ..PipelinePaths::default() };
        let err   = ValidateUseCase::new(paths).execute().unwrap_err();
        assert!(format!("{err:#}").contains("Run: student-performance ingest"));
    }
}
