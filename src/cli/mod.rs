// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Five commands, run in pipeline order:
//   1. `ingest`     — raw CSV → processed CSV
//   2. `validate`   — schema check of the processed CSV
//   3. `preprocess` — train/test split files
//   4. `train`      — model artifact + metrics
//   5. `serve`      — HTTP prediction API
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::Commands;

use crate::application::{
    ingest_use_case::IngestUseCase,
    preprocess_use_case::PreprocessUseCase,
    serve_use_case::ServeUseCase,
    train_use_case::TrainUseCase,
    validate_use_case::ValidateUseCase,
};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "student-performance",
    version,
    about = "Validate student records, train a pass/fail classifier and serve predictions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ingest(args) => {
                let rows = IngestUseCase::new((&args).into()).execute()?;
                println!("Data ingestion completed: {rows} rows written to {}", args.processed_path.display());
            }
            Commands::Validate(args) => {
                let dataset = ValidateUseCase::new((&args).into()).execute()?;
                println!("Data validation passed: {} rows", dataset.len());
            }
            Commands::Preprocess(args) => {
                let summary = PreprocessUseCase::new((&args).into(), (&args).into()).execute()?;
                println!(
                    "Preprocessing completed: {} train / {} test rows in {}",
                    summary.train_rows,
                    summary.test_rows,
                    args.output_dir.display()
                );
            }
            Commands::Train(args) => {
                let report = TrainUseCase::new((&args).into(), (&args).into()).execute()?;
                println!(
                    "Training complete (accuracy {:.4}). Model saved to {}",
                    report.accuracy,
                    args.model_path.display()
                );
            }
            Commands::Serve(args) => {
                tracing::info!("Starting server on {}", args.listen_addr);
                ServeUseCase::new((&args).into()).execute()?;
            }
        }
        Ok(())
    }
}
