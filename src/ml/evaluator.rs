// ============================================================
// Layer 5 — Evaluation Report
// ============================================================
// Scores a trained classifier on the held-out test set.
//
// Per class (0 = FAIL, 1 = PASS):
//   precision = TP / (TP + FP)
//   recall    = TP / (TP + FN)
//   f1        = 2·P·R / (P + R)
//   support   = number of true rows of that class
//
// Plus overall accuracy and macro / support-weighted averages.
// Any 0/0 is reported as 0.0.
//
// The report is for humans: it is printed after training and
// written next to the model, but nothing downstream reads it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::dataset::LabeledSet;
use crate::domain::traits::Classifier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub class:     u8,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub per_class:    Vec<ClassMetrics>,
    pub accuracy:     f64,
    pub macro_avg:    ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub total:        usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 { 0.0 } else { 2.0 * precision * recall / (precision + recall) }
}

/// Compare predictions with ground truth label by label.
pub fn report(predicted: &[u8], actual: &[u8]) -> ClassificationReport {
    let total   = actual.len();
    let correct = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();

    let per_class: Vec<ClassMetrics> = [0u8, 1u8]
        .iter()
        .map(|&class| {
            let tp = predicted.iter().zip(actual).filter(|&(&p, &a)| p == class && a == class).count();
            let fp = predicted.iter().zip(actual).filter(|&(&p, &a)| p == class && a != class).count();
            let fn_ = predicted.iter().zip(actual).filter(|&(&p, &a)| p != class && a == class).count();
            let precision = ratio(tp, tp + fp);
            let recall    = ratio(tp, tp + fn_);
            ClassMetrics { class, precision, recall, f1: f1(precision, recall), support: tp + fn_ }
        })
        .collect();

    let k = per_class.len() as f64;
    let macro_avg = ClassMetrics {
        class:     0,
        precision: per_class.iter().map(|m| m.precision).sum::<f64>() / k,
        recall:    per_class.iter().map(|m| m.recall).sum::<f64>() / k,
        f1:        per_class.iter().map(|m| m.f1).sum::<f64>() / k,
        support:   total,
    };

    let weight = |m: &ClassMetrics| ratio(m.support, total);
    let weighted_avg = ClassMetrics {
        class:     0,
        precision: per_class.iter().map(|m| m.precision * weight(m)).sum(),
        recall:    per_class.iter().map(|m| m.recall * weight(m)).sum(),
        f1:        per_class.iter().map(|m| m.f1 * weight(m)).sum(),
        support:   total,
    };

    ClassificationReport {
        per_class,
        accuracy: ratio(correct, total),
        macro_avg,
        weighted_avg,
        total,
    }
}

/// Predict every test row with `model` and score the result.
pub fn evaluate(model: &impl Classifier, test: &LabeledSet) -> ClassificationReport {
    let predicted = model.predict(&test.features);
    report(&predicted, &test.labels)
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>14} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for m in &self.per_class {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                m.class, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>14} {:>10} {:>10} {:>10.2} {:>10}", "accuracy", "", "", self.accuracy, self.total)?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
