// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Turns the processed CSV into the four split files:
//
//   Step 1: Load + validate processed CSV  (Layer 4 - data)
//   Step 2: Stratified, seeded split       (Layer 4 - data)
//   Step 3: Write X/y train/test CSVs      (Layer 6 - infra)
//
// Re-running with the same seed overwrites the files with an
// identical partition.

use anyhow::{Context, Result};

use crate::application::config::PipelinePaths;
use crate::application::validate_use_case::load_validated;
use crate::data::splitter::{split, SplitConfig};
use crate::infra::split_store::SplitStore;

pub struct PreprocessUseCase {
    paths:  PipelinePaths,
    config: SplitConfig,
}

/// Row counts of the written split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub train_rows: usize,
    pub test_rows:  usize,
    pub stratified: bool,
}

impl PreprocessUseCase {
    pub fn new(paths: PipelinePaths, config: SplitConfig) -> Self {
        Self { paths, config }
    }

    pub fn execute(&self) -> Result<SplitSummary> {
        // ── Step 1: Validate ──────────────────────────────────────────────────
        tracing::info!("Loading '{}'", self.paths.processed_path.display());
        let dataset = load_validated(&self.paths.processed_path)?;
        tracing::info!("Validated {} rows", dataset.len());

        // ── Step 2: Split ─────────────────────────────────────────────────────
        let parts = split(&dataset, self.config)?;
        tracing::info!(
            "Split: {} train, {} test (test_fraction={}, seed={}, stratified={})",
            parts.train.len(),
            parts.test.len(),
            self.config.test_fraction,
            self.config.seed,
            parts.stratified
        );
        if !parts.stratified {
            tracing::warn!("Only one class present in 'result'; split is not stratified");
        }

        // ── Step 3: Persist ───────────────────────────────────────────────────
        let store = SplitStore::new(&self.paths.data_dir);
        store
            .save(&parts.train, &parts.test)
            .with_context(|| format!("Failed to write splits to '{}'", self.paths.data_dir.display()))?;
        tracing::info!("Preprocessing completed; splits saved to '{}'", self.paths.data_dir.display());

        Ok(SplitSummary {
            train_rows: parts.train.len(),
            test_rows:  parts.test.len(),
            stratified: parts.stratified,
        })
    }
}
