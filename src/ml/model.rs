// ============================================================
// Layer 5 — Logistic Regression Model
// ============================================================
// Two views of the same classifier:
//
//   LogisticModule<B>   — the burn Module used while fitting.
//                         A single bias-free Linear(5 → 1) layer over
//                         the four features plus a constant 1 column,
//                         so the intercept is the last weight and its
//                         gradient comes out of the same matmul as the
//                         others. Weights start at zero.
//
//   LogisticRegression  — the fitted, backend-free classifier.
//                         Plain f64 weights + the feature scaler,
//                         serialisable into the model artifact and
//                         cheap to evaluate per request.
//
// Prediction:
//   z = w · ((x - mean) / scale) + b
//   class = 1 if z > 0 else 0       (i.e. sigmoid(z) > 0.5)
//
// Reference: Burn Book §3 (Building Blocks)

use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::domain::record::FeatureVector;
use crate::domain::schema::FEATURE_COUNT;
use crate::domain::traits::Classifier;

// ─── LogisticModule ───────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct LogisticModule<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> LogisticModule<B> {
    /// Zero-initialised layer over `n_features` inputs plus the intercept column.
    pub fn new(n_features: usize, device: &B::Device) -> Self {
        let linear = LinearConfig::new(n_features + 1, 1)
            .with_bias(false)
            .with_initializer(Initializer::Zeros)
            .init(device);
        Self { linear }
    }

    /// x: [batch, n_features + 1] (last column all ones) → logits: [batch, 1]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(x)
    }
}

// ─── StandardScaler ───────────────────────────────────────────────────────────
/// Per-feature standardisation fitted on the training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean:  Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit mean and population standard deviation per column.
    /// Constant columns get a scale of 1 so they map to zero.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let n = rows.len().max(1) as f64;
        let mut mean  = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![0.0; FEATURE_COUNT];

        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v / n;
            }
        }
        for row in rows {
            for ((s, v), m) in scale.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2) / n;
            }
        }
        for s in scale.iter_mut() {
            *s = s.sqrt();
            if *s <= f64::EPSILON {
                *s = 1.0;
            }
        }
        Self { mean, scale }
    }

    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (row[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

// ─── LogisticRegression ───────────────────────────────────────────────────────
/// A fitted binary logistic-regression classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias:    f64,
    pub scaler:  StandardScaler,
}

impl LogisticRegression {
    /// Raw logit for one row.
    pub fn decision_function(&self, row: &FeatureVector) -> f64 {
        let x = self.scaler.transform(row);
        self.weights
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.bias
    }

    /// True if the weight and scaler shapes match the feature count.
    pub fn is_well_formed(&self) -> bool {
        self.weights.len() == FEATURE_COUNT
            && self.scaler.mean.len() == FEATURE_COUNT
            && self.scaler.scale.len() == FEATURE_COUNT
            && self.weights.iter().chain(&self.scaler.mean).chain(&self.scaler.scale).all(|v| v.is_finite())
            && self.bias.is_finite()
    }
}

impl Classifier for LogisticRegression {
    fn predict_row(&self, row: &FeatureVector) -> u8 {
        u8::from(self.decision_function(row) > 0.0)
    }
}
