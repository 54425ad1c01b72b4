// ============================================================
// Layer 2 — IngestUseCase
// ============================================================
// Copies the raw CSV into the processed area:
//
//   Step 1: Read raw CSV into a RawTable   (Layer 4 - data)
//   Step 2: Log a per-column summary       (type, non-null count)
//   Step 3: Write the processed CSV        (Layer 4 - data)
//
// No validation happens here; a broken file is copied as-is so
// the `validate` step can report exactly what is wrong with it.

use anyhow::{Context, Result};

use crate::application::config::PipelinePaths;
use crate::data::loader::{write_table, CsvLoader};
use crate::data::table::RawTable;
use crate::domain::traits::TableSource;

/// One line of the column summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name:     String,
    pub kind:     &'static str,
    pub non_null: usize,
}

pub fn summarise(table: &RawTable) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnSummary {
            name:     name.clone(),
            kind:     table.column_type(idx).name(),
            non_null: table.row_count() - table.null_count(idx),
        })
        .collect()
}

pub struct IngestUseCase {
    paths: PipelinePaths,
}

impl IngestUseCase {
    pub fn new(paths: PipelinePaths) -> Self {
        Self { paths }
    }

    /// Returns the number of rows copied.
    pub fn execute(&self) -> Result<usize> {
        let raw_path = &self.paths.raw_path;

        // ── Step 1: Read the raw file ─────────────────────────────────────────
        tracing::info!("Reading raw data from '{}'", raw_path.display());
        let loader = CsvLoader::new(raw_path, "Raw data", "student-performance ingest --raw-path <file>");
        let table  = loader
            .load_table()
            .with_context(|| format!("Failed to read '{}'", raw_path.display()))?;

        // ── Step 2: Column summary ────────────────────────────────────────────
        tracing::info!("{} rows x {} columns", table.row_count(), table.columns().len());
        for col in summarise(&table) {
            tracing::info!("  {:<16} {:<8} {} non-null", col.name, col.kind, col.non_null);
        }
        if table.is_empty() {
            tracing::warn!("Raw file has a header but no rows");
        }

        // ── Step 3: Write processed copy ──────────────────────────────────────
        let out = &self.paths.processed_path;
        write_table(out, &table)
            .with_context(|| format!("Failed to write '{}'", out.display()))?;
        tracing::info!("Saved processed data to '{}'", out.display());

        Ok(table.row_count())
    }
}
