// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Fits L2-regularised logistic regression with full-batch Adam
// on burn's NdArray CPU backend.
//
// Objective (matches the usual C-parameterised formulation):
//   loss = mean( -y·log σ(z) - (1-y)·log σ(-z) )  +  ‖w‖² / (2·C·n)
//
// Determinism:
//   - weights start at zero (no RNG involved)
//   - every step sees the whole training set in the same order
//   - the intercept rides along as a constant-1 input column, so
//     every gradient reduction over rows is a single matmul
//   - burn-ndarray is built without `simd` and `multi-threads`
//     (see Cargo.toml), so reductions always sum in the same order
// So identical inputs and hyperparameters give identical weights.
//
// Key burn insight:
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - Weights are read back as plain f32 and stored as f64 in
//     LogisticRegression, so inference never touches burn
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{activation::log_sigmoid, TensorData},
};
use serde::{Deserialize, Serialize};

use crate::data::dataset::LabeledSet;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::schema::FEATURE_COUNT;
use crate::ml::model::{LogisticModule, LogisticRegression, StandardScaler};

type TrainBackend = Autodiff<NdArray>;

// ─── Training Configuration ──────────────────────────────────────────────────
// Serialisable so it can be stored in the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of full-batch optimiser steps
    pub max_iter:      usize,
    pub learning_rate: f64,
    /// Inverse regularisation strength; larger means weaker L2 penalty
    pub c:             f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_iter:      1000,
            learning_rate: 0.05,
            c:             1.0,
        }
    }
}

impl TrainConfig {
    fn check(&self) -> PipelineResult<()> {
        if self.max_iter == 0 {
            return Err(PipelineError::Config("max_iter must be at least 1".into()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(PipelineError::Config(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(PipelineError::Config(format!("c must be a positive number, got {}", self.c)));
        }
        Ok(())
    }
}

/// Fit a logistic-regression classifier on `train`.
///
/// Fails with `Training` when fewer than two distinct labels are
/// present, when the set is empty, or when features and labels
/// disagree in length.
pub fn train(train: &LabeledSet, cfg: &TrainConfig) -> PipelineResult<LogisticRegression> {
    cfg.check()?;

    if train.features.len() != train.labels.len() {
        return Err(PipelineError::Training(format!(
            "{} feature rows but {} labels",
            train.features.len(),
            train.labels.len()
        )));
    }
    if train.is_empty() {
        return Err(PipelineError::Training("training set is empty".into()));
    }
    if let Some(bad) = train.labels.iter().find(|&&l| l > 1) {
        return Err(PipelineError::Training(format!("label {bad} is not binary")));
    }
    let classes = train.distinct_labels();
    if classes < 2 {
        return Err(PipelineError::Training(format!(
            "need at least 2 distinct labels in the training set, found {classes}"
        )));
    }

    let n      = train.len();
    let scaler = StandardScaler::fit(&train.features);

    // ── Build tensors ─────────────────────────────────────────────────────────
    // Scaled features followed by the intercept column
    let width = FEATURE_COUNT + 1;
    let flat: Vec<f32> = train
        .features
        .iter()
        .flat_map(|row| scaler.transform(row).into_iter().chain(std::iter::once(1.0)))
        .map(|v| v as f32)
        .collect();
    let targets: Vec<f32> = train.labels.iter().map(|&l| f32::from(l)).collect();

    let device = NdArrayDevice::default();
    let x = Tensor::<TrainBackend, 2>::from_data(TensorData::new(flat, [n, width]), &device);
    let y = Tensor::<TrainBackend, 2>::from_data(TensorData::new(targets, [n, 1]), &device);

    // ── Model + Adam ──────────────────────────────────────────────────────────
    let mut model: LogisticModule<TrainBackend> = LogisticModule::new(FEATURE_COUNT, &device);
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();
    let penalty_scale = 1.0 / (2.0 * cfg.c * n as f64);

    tracing::info!(
        "Fitting logistic regression: {} rows, {} features, max_iter={}, lr={}, C={}",
        n, FEATURE_COUNT, cfg.max_iter, cfg.learning_rate, cfg.c
    );

    let mut last_loss = f64::NAN;
    for step in 1..=cfg.max_iter {
        let logits = model.forward(x.clone());

        // -[y·log σ(z) + (1-y)·log σ(-z)]
        let positive = y.clone() * log_sigmoid(logits.clone());
        let negative = y.clone().neg().add_scalar(1.0) * log_sigmoid(logits.neg());
        let data_loss = (positive + negative).mean().neg();

        // The intercept (last row of the weight matrix) is not penalised
        let w = model.linear.weight.val().slice([0..FEATURE_COUNT, 0..1]);
        let penalty = (w.clone() * w).sum().mul_scalar(penalty_scale);
        let loss = data_loss + penalty;

        if step == 1 || step % 100 == 0 || step == cfg.max_iter {
            last_loss = loss.clone().into_scalar().elem::<f64>();
            tracing::debug!("step {:>4}/{} | loss={:.6}", step, cfg.max_iter, last_loss);
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.learning_rate, model, grads);
    }

    // ── Read the fitted parameters back ───────────────────────────────────────
    let mut weights = to_f64(model.linear.weight.val().into_data())?;
    if weights.len() != width {
        return Err(PipelineError::Training(format!(
            "expected {} fitted parameters, got {}",
            width,
            weights.len()
        )));
    }
    let bias = weights.pop().unwrap_or(0.0);

    let fitted = LogisticRegression { weights, bias, scaler };
    if !fitted.is_well_formed() {
        return Err(PipelineError::Training(
            "optimisation diverged (non-finite weights); try a smaller learning rate".into(),
        ));
    }

    tracing::info!("Training complete: final loss={:.6}", last_loss);
    Ok(fitted)
}

fn to_f64(data: TensorData) -> PipelineResult<Vec<f64>> {
    data.convert::<f32>()
        .to_vec::<f32>()
        .map(|v| v.into_iter().map(f64::from).collect())
        .map_err(|e| PipelineError::Training(format!("cannot read fitted weights: {e:?}")))
}
