// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the five subcommands, one per pipeline step:
//   ingest → validate → preprocess → train → serve
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → PathBuf, f64, etc.)
//
// Every flag can also come from a STUDENT_* environment variable.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::config::{PipelinePaths, ServeConfig};
use crate::data::splitter::SplitConfig;
use crate::ml::trainer::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the raw CSV into the processed area and summarise its columns
    Ingest(IngestArgs),

    /// Check the processed CSV against the student schema
    Validate(ValidateArgs),

    /// Validate, then write a stratified train/test split
    Preprocess(PreprocessArgs),

    /// Fit the classifier, print its report and save the model
    Train(TrainArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Raw CSV as delivered
    #[arg(long, env = "STUDENT_RAW_PATH", default_value = "data/raw/student_data.csv")]
    pub raw_path: PathBuf,

    /// Where to write the processed copy
    #[arg(long, env = "STUDENT_PROCESSED_PATH", default_value = "data/processed/student_data.csv")]
    pub processed_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Processed CSV to check
    #[arg(long, env = "STUDENT_PROCESSED_PATH", default_value = "data/processed/student_data.csv")]
    pub processed_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Processed CSV to split
    #[arg(long, env = "STUDENT_PROCESSED_PATH", default_value = "data/processed/student_data.csv")]
    pub processed_path: PathBuf,

    /// Directory for X_train.csv, X_test.csv, y_train.csv, y_test.csv
    #[arg(long, env = "STUDENT_DATA_DIR", default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Fraction of rows held out for evaluation, strictly between 0 and 1
    #[arg(long, env = "STUDENT_TEST_FRACTION", default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Shuffle seed; the same seed gives the same split
    #[arg(long, env = "STUDENT_SEED", default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory holding the split files written by `preprocess`
    #[arg(long, env = "STUDENT_DATA_DIR", default_value = "data/processed")]
    pub data_dir: PathBuf,

    /// Where to save the model artifact (metrics.csv goes beside it)
    #[arg(long, env = "STUDENT_MODEL_PATH", default_value = "models/logistic_model.json")]
    pub model_path: PathBuf,

    /// Number of full-batch optimiser steps
    #[arg(long, env = "STUDENT_MAX_ITER", default_value_t = 1000)]
    pub max_iter: usize,

    /// Adam step size
    #[arg(long, env = "STUDENT_LEARNING_RATE", default_value_t = 0.05)]
    pub learning_rate: f64,

    /// Inverse L2 regularisation strength
    #[arg(long, env = "STUDENT_C", default_value_t = 1.0)]
    pub c: f64,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Model artifact written by `train`
    #[arg(long, env = "STUDENT_MODEL_PATH", default_value = "models/logistic_model.json")]
    pub model_path: PathBuf,

    /// Address the HTTP server binds to
    #[arg(long, env = "STUDENT_LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,
}

// ─── CLI → application config ─────────────────────────────────────────────────
// This is the boundary between Layer 1 and Layer 2:
// the application layer never sees clap types.

impl From<&IngestArgs> for PipelinePaths {
    fn from(a: &IngestArgs) -> Self {
        PipelinePaths {
            raw_path:       a.raw_path.clone(),
            processed_path: a.processed_path.clone(),
            ..PipelinePaths::default()
        }
    }
}

impl From<&ValidateArgs> for PipelinePaths {
    fn from(a: &ValidateArgs) -> Self {
        PipelinePaths { processed_path: a.processed_path.clone(), ..PipelinePaths::default() }
    }
}

impl From<&PreprocessArgs> for PipelinePaths {
    fn from(a: &PreprocessArgs) -> Self {
        PipelinePaths {
            processed_path: a.processed_path.clone(),
            data_dir:       a.output_dir.clone(),
            ..PipelinePaths::default()
        }
    }
}

impl From<&PreprocessArgs> for SplitConfig {
    fn from(a: &PreprocessArgs) -> Self {
        SplitConfig { test_fraction: a.test_fraction, seed: a.seed }
    }
}

impl From<&TrainArgs> for PipelinePaths {
    fn from(a: &TrainArgs) -> Self {
        PipelinePaths {
            data_dir:   a.data_dir.clone(),
            model_path: a.model_path.clone(),
            ..PipelinePaths::default()
        }
    }
}

impl From<&TrainArgs> for TrainConfig {
    fn from(a: &TrainArgs) -> Self {
        TrainConfig {
            max_iter:      a.max_iter,
            learning_rate: a.learning_rate,
            c:             a.c,
        }
    }
}

impl From<&ServeArgs> for ServeConfig {
    fn from(a: &ServeArgs) -> Self {
        ServeConfig { model_path: a.model_path.clone(), listen_addr: a.listen_addr.clone() }
    }
}
