// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Plain config structs the use cases run from. The CLI layer
// converts its clap arguments into these, so nothing below
// Layer 1 ever sees a clap type.
//
// The split and training hyperparameters live next to the code
// that uses them (data::splitter::SplitConfig and
// ml::trainer::TrainConfig); this file holds the paths and the
// server settings.
//
// Reference: Rust Book §5 (Structs)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::infra::artifact_store::DEFAULT_MODEL_PATH;

/// Where every pipeline file lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelinePaths {
    /// Raw CSV as delivered
    pub raw_path:       PathBuf,
    /// Copy written by `ingest`, read by `validate` and `preprocess`
    pub processed_path: PathBuf,
    /// Directory holding X_train / X_test / y_train / y_test
    pub data_dir:       PathBuf,
    /// Model artifact; metrics.csv is written beside it
    pub model_path:     PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            raw_path:       PathBuf::from("data/raw/student_data.csv"),
            processed_path: PathBuf::from("data/processed/student_data.csv"),
            data_dir:       PathBuf::from("data/processed"),
            model_path:     PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Settings for the HTTP prediction server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeConfig {
    pub model_path:  PathBuf,
    pub listen_addr: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_path:  PathBuf::from(DEFAULT_MODEL_PATH),
            listen_addr: "0.0.0.0:8000".to_string(),
        }
    }
}
