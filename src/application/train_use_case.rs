// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the training run in order:
//
//   Step 1: Load train/test splits        (Layer 6 - infra)
//   Step 2: Fit logistic regression       (Layer 5 - ml)
//   Step 3: Evaluate on the test split    (Layer 5 - ml)
//   Step 4: Save model artifact           (Layer 6 - infra)
//   Step 5: Write metrics.csv             (Layer 6 - infra)
//
// The artifact is only written after evaluation succeeds, so a
// failed run never replaces a working model.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};

use crate::application::config::PipelinePaths;
use crate::infra::{
    artifact_store::{ArtifactStore, ModelArtifact},
    metrics::MetricsWriter,
    split_store::{Part, SplitStore},
};
use crate::ml::evaluator::{evaluate, ClassificationReport};
use crate::ml::trainer::{train, TrainConfig};

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    paths:  PipelinePaths,
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(paths: PipelinePaths, config: TrainConfig) -> Self {
        Self { paths, config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<ClassificationReport> {
        let cfg = &self.config;

        // ── Step 1: Load splits ───────────────────────────────────────────────
        let splits = SplitStore::new(&self.paths.data_dir);
        let train_set = splits.load(Part::Train).context("Failed to load training split")?;
        let test_set  = splits.load(Part::Test).context("Failed to load test split")?;
        tracing::info!("Loaded {} train / {} test rows", train_set.len(), test_set.len());

        // ── Step 2: Fit ───────────────────────────────────────────────────────
        let model = train(&train_set, cfg)?;

        // ── Step 3: Evaluate ──────────────────────────────────────────────────
        let report = evaluate(&model, &test_set);
        tracing::info!("Test accuracy: {:.4}", report.accuracy);
        println!("\nClassification report:\n\n{report}");

        // ── Step 4: Save artifact ─────────────────────────────────────────────
        let store = ArtifactStore::new(&self.paths.model_path);
        store
            .save(&ModelArtifact::new(model, *cfg))
            .with_context(|| format!("Failed to save model to '{}'", store.path().display()))?;
        tracing::info!("Model saved to '{}'", store.path().display());

        // ── Step 5: Metrics ───────────────────────────────────────────────────
        let metrics = MetricsWriter::beside(store.path());
        metrics
            .write(&report)
            .with_context(|| format!("Failed to write '{}'", metrics.csv_path().display()))?;
        tracing::info!("Metrics saved to '{}'", metrics.csv_path().display());

        Ok(report)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::preprocess_use_case::{tests::write_student_csv, PreprocessUseCase};
    use crate::data::splitter::SplitConfig;
    use crate::domain::error::PipelineError;
    use std::path::Path;

    fn paths(dir: &Path) -> PipelinePaths {
        PipelinePaths {
            processed_path: dir.join("student_data.csv"),
            data_dir:       dir.join("processed"),
            model_path:     dir.join("models/logistic_model.json"),
            ..PipelinePaths::default()
        }
    }

    #[test]
    fn test_train_writes_artifact_and_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let p   = paths(dir.path());
        write_student_csv(&p.processed_path, 20, 20);
        PreprocessUseCase::new(p.clone(), SplitConfig::default()).execute().unwrap();

        let report = TrainUseCase::new(p.clone(), TrainConfig::default()).execute().unwrap();
        assert_eq!(report.total, 8);
        assert_eq!(report.accuracy, 1.0);
        assert!(p.model_path.is_file());
        assert!(dir.path().join("models/metrics.csv").is_file());
    }

    #[test]
    fn test_train_before_preprocess_names_preprocess() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrainUseCase::new(paths(dir.path()), TrainConfig::default()).execute().unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::MissingFile { .. })));
        assert!(format!("{err:#}").contains("student-performance preprocess"));
    }
}
