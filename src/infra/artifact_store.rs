// ============================================================
// Layer 6 — Model Artifact Store
// ============================================================
// Saves and restores the trained model as ONE JSON file.
//
// What the artifact holds:
//   1. feature_names — the exact column order the model was fitted on
//   2. model         — weights, bias and feature scaler
//   3. train_config  — hyperparameters used for the fit
//   4. created_at    — UTC timestamp, for the operator
//
// Why keep the feature order inside the artifact?
//   The prediction service rebuilds its input vector from a JSON
//   request. If that order ever drifted from the training order the
//   model would silently score garbage, so the service refuses to
//   load an artifact whose order differs from the schema.
//
// File layout:
//   models/
//     logistic_model.json   ← the artifact (overwritten on each train)
//     metrics.csv           ← evaluation report (see metrics.rs)
//
// Reference: serde_json crate documentation
//            Rust Book §9 (Error Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::schema::feature_names;
use crate::domain::traits::Persistable;
use crate::ml::model::LogisticRegression;
use crate::ml::trainer::TrainConfig;

/// Default location of the model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/logistic_model.json";

/// The trained classifier plus the feature ordering it expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub model:         LogisticRegression,
    pub train_config:  TrainConfig,
    pub created_at:    DateTime<Utc>,
}

impl ModelArtifact {
    /// Wrap a freshly fitted model with the schema's feature order.
    pub fn new(model: LogisticRegression, train_config: TrainConfig) -> Self {
        Self {
            feature_names: feature_names(),
            model,
            train_config,
            created_at: Utc::now(),
        }
    }
}

impl Persistable for ModelArtifact {
    fn save(&self, path: &Path) -> PipelineResult<()> {
        if let Some(parent) = path.parent() {
            // create_dir_all creates parent directories too, like `mkdir -p`
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn load(path: &Path) -> PipelineResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Owns the single well-known artifact location.
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the artifact, replacing any previous one.
    pub fn save(&self, artifact: &ModelArtifact) -> PipelineResult<()> {
        if self.exists() {
            tracing::info!("Overwriting existing model at '{}'", self.path.display());
        }
        artifact.save(&self.path)?;
        tracing::debug!("Saved model artifact to '{}'", self.path.display());
        Ok(())
    }

    /// Read the artifact back. Absent file → ModelNotFound.
    pub fn load(&self) -> PipelineResult<ModelArtifact> {
        if !self.exists() {
            return Err(PipelineError::ModelNotFound { path: self.path.clone() });
        }
        ModelArtifact::load(&self.path)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::Classifier;
    use crate::ml::trainer::{tests::separable_set, train};

    #[test]
    fn test_missing_artifact_is_model_not_found() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("models/logistic_model.json"));
        assert!(matches!(store.load(), Err(PipelineError::ModelNotFound { .. })));
    }

    #[test]
    fn test_corrupt_artifact_is_serialization_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ArtifactStore::new(&path).load(),
            Err(PipelineError::Serialization(_))
        ));
    }

    #[test]
    fn test_round_trip_gives_identical_predictions() {
        let set   = separable_set();
        let cfg   = TrainConfig { max_iter: 300, ..TrainConfig::default() };
        let model = train(&set, &cfg).unwrap();

        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("models/logistic_model.json"));
        store.save(&ModelArtifact::new(model.clone(), cfg)).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.model, model);
        assert_eq!(loaded.feature_names, feature_names());

        let samples = [[92.0, 5.0, 88.0, 95.0], [30.0, 1.0, 25.0, 20.0], [55.0, 2.5, 50.0, 45.0]];
        for row in &samples {
            assert_eq!(loaded.model.predict_row(row), model.predict_row(row));
            assert_eq!(loaded.model.decision_function(row), model.decision_function(row));
        }
    }

    #[test]
    fn test_save_overwrites_previous_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("m.json"));
        let first = train(&separable_set(), &TrainConfig { max_iter: 10, ..TrainConfig::default() }).unwrap();
        let second = train(&separable_set(), &TrainConfig { max_iter: 50, ..TrainConfig::default() }).unwrap();

        store.save(&ModelArtifact::new(first, TrainConfig::default())).unwrap();
        store.save(&ModelArtifact::new(second.clone(), TrainConfig::default())).unwrap();
        assert_eq!(store.load().unwrap().model, second);
    }
}
