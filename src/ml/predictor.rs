// ============================================================
// Layer 5 — Prediction Service
// ============================================================
// Loads the model artifact once and answers single-student
// predictions for the HTTP server.
//
// Load-time checks (fail fast, before the server binds):
//   - artifact missing            → ModelNotFound
//   - artifact not valid JSON     → Serialization
//   - feature order ≠ schema      → ModelFormat
//   - weight / scaler shape wrong → ModelFormat
//
// After loading the service is read-only, so it can be shared
// between request handlers behind a plain Arc with no locking.

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::record::{PredictionRequest, PredictionResponse};
use crate::domain::schema::feature_names;
use crate::domain::traits::Classifier;
use crate::infra::artifact_store::{ArtifactStore, ModelArtifact};
use crate::ml::model::LogisticRegression;

#[derive(Debug)]
pub struct PredictionService {
    model:         LogisticRegression,
    feature_names: Vec<String>,
}

impl PredictionService {
    /// Read the artifact from `store` and check it against the schema.
    pub fn load(store: &ArtifactStore) -> PipelineResult<Self> {
        let artifact = store.load()?;
        let service  = Self::from_artifact(artifact)?;
        tracing::info!(
            "Model loaded from '{}' (features: {})",
            store.path().display(),
            service.feature_names.join(", ")
        );
        Ok(service)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> PipelineResult<Self> {
        let expected = feature_names();
        if artifact.feature_names != expected {
            return Err(PipelineError::ModelFormat(format!(
                "model was trained on features [{}] but the schema expects [{}]",
                artifact.feature_names.join(", "),
                expected.join(", ")
            )));
        }
        if !artifact.model.is_well_formed() {
            return Err(PipelineError::ModelFormat(
                "model weights do not match the feature count".into(),
            ));
        }
        Ok(Self { model: artifact.model, feature_names: artifact.feature_names })
    }

    /// Classify one student.
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResponse {
        let class = self.model.predict_row(&request.to_features());
        PredictionResponse::from_class(class)
    }
}
