// ============================================================
// Layer 6 — Metrics Writer
// ============================================================
// Writes the classification report to a CSV file next to the
// model after each training run.
//
// Why write metrics to CSV?
//   - Easy to open in a spreadsheet
//   - Gives a permanent record of how the saved model scored
//   - Nothing downstream parses it, it is for humans
//
// Rows recorded:
//   - one row per class (0 = FAIL, 1 = PASS)
//   - accuracy
//   - macro avg and weighted avg
//
// Output file: models/metrics.csv (overwritten each run)
//
// Example CSV output:
//   label,precision,recall,f1_score,support
//   0,0.900000,0.947368,0.923077,19
//   1,0.952381,0.909091,0.930233,22
//   accuracy,,,0.926829,41
//   macro avg,0.926190,0.928230,0.926655,41
//   weighted avg,0.928107,0.926829,0.926899,41
//
// Reference: csv crate documentation
//            Rust Book §12 (I/O and File Handling)

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::PipelineResult;
use crate::ml::evaluator::{ClassMetrics, ClassificationReport};

pub const METRICS_FILE: &str = "metrics.csv";

/// Writes classification reports to `<dir>/metrics.csv`.
pub struct MetricsWriter {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsWriter {
    /// Place the metrics file in the same directory as the model.
    pub fn beside(model_path: &Path) -> Self {
        let dir = model_path.parent().unwrap_or_else(|| Path::new("."));
        Self { csv_path: dir.join(METRICS_FILE) }
    }

    /// Replace the CSV with `report`.
    pub fn write(&self, report: &ClassificationReport) -> PipelineResult<()> {
        if let Some(parent) = self.csv_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut w = csv::Writer::from_path(&self.csv_path)?;
        w.write_record(["label", "precision", "recall", "f1_score", "support"])?;

        for m in &report.per_class {
            w.write_record(metric_row(&m.class.to_string(), m))?;
        }
        w.write_record([
            "accuracy".to_string(),
            String::new(),
            String::new(),
            format!("{:.6}", report.accuracy),
            report.total.to_string(),
        ])?;
        w.write_record(metric_row("macro avg", &report.macro_avg))?;
        w.write_record(metric_row("weighted avg", &report.weighted_avg))?;
        w.flush()?;

        tracing::debug!("Wrote metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

fn metric_row(label: &str, m: &ClassMetrics) -> [String; 5] {
    [
        label.to_string(),
        format!("{:.6}", m.precision),
        format!("{:.6}", m.recall),
        format!("{:.6}", m.f1),
        m.support.to_string(),
    ]
}
