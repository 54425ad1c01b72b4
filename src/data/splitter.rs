// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Partitions a validated dataset into a training set and a held
// out test set.
//
// Sizes:
//   n_test  = ceil(test_fraction * n)
//   n_train = n - n_test
//
// Stratification:
//   When `result` has more than one distinct value, each class gets
//   test slots in proportion to its frequency (largest remainder,
//   ties broken by class label), so both sides keep roughly the
//   class balance of the source. With a single class the split is a
//   plain shuffle-and-cut, since there is nothing to stratify on.
//
// Reproducibility:
//   All shuffling goes through one StdRng seeded from `seed`, so the
//   same seed on the same input yields the same partition.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::dataset::{LabeledSet, ValidatedDataset};
use crate::domain::error::{PipelineError, PipelineResult};

/// Splitter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of rows held out for evaluation; must lie in (0, 1)
    pub test_fraction: f64,
    pub seed:          u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { test_fraction: 0.2, seed: 42 }
    }
}

/// Train and test sides of a split.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: LabeledSet,
    pub test:  LabeledSet,
    /// Source row indices of `train`, in output order
    pub train_rows: Vec<usize>,
    /// Source row indices of `test`, in output order
    pub test_rows:  Vec<usize>,
    pub stratified: bool,
}

/// Split `dataset` into (train, test).
pub fn split(dataset: &ValidatedDataset, cfg: SplitConfig) -> PipelineResult<Split> {
    let SplitConfig { test_fraction, seed } = cfg;

    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PipelineError::Config(format!(
            "test_fraction must lie in (0, 1), got {test_fraction}"
        )));
    }

    let all = dataset.to_labeled();
    let total = all.len();
    let n_test = (test_fraction * total as f64).ceil() as usize;
    let n_train = total.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(PipelineError::Config(format!(
            "test_fraction={test_fraction} on {total} rows leaves {n_train} train and {n_test} test rows; \
             both sides must be non-empty"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // Group row indices by class; BTreeMap keeps class order stable
    let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (i, &label) in all.labels.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }
    let stratified = by_class.len() > 1;

    let (mut train_rows, mut test_rows) = if stratified {
        let quotas = allocate_test_slots(&by_class, n_test, total);
        let mut train_rows = Vec::with_capacity(n_train);
        let mut test_rows  = Vec::with_capacity(n_test);
        for (label, rows) in by_class.iter_mut() {
            rows.shuffle(&mut rng);
            let k = quotas[label].min(rows.len());
            test_rows.extend_from_slice(&rows[..k]);
            train_rows.extend_from_slice(&rows[k..]);
        }
        (train_rows, test_rows)
    } else {
        let mut rows: Vec<usize> = (0..total).collect();
        rows.shuffle(&mut rng);
        let train_rows = rows.split_off(n_test);
        (train_rows, rows)
    };

    // Mix classes within each side
    train_rows.shuffle(&mut rng);
    test_rows.shuffle(&mut rng);

    let pick = |rows: &[usize]| LabeledSet {
        features: rows.iter().map(|&i| all.features[i]).collect(),
        labels:   rows.iter().map(|&i| all.labels[i]).collect(),
    };
    let train = pick(&train_rows);
    let test  = pick(&test_rows);

    tracing::debug!(
        "Dataset split: {} training, {} test (stratified: {})",
        train.len(),
        test.len(),
        stratified
    );

    Ok(Split { train, test, train_rows, test_rows, stratified })
}

/// Per-class test quotas summing to `n_test`, proportional to class size.
fn allocate_test_slots(
    by_class: &BTreeMap<u8, Vec<usize>>,
    n_test:   usize,
    total:    usize,
) -> BTreeMap<u8, usize> {
    let mut quotas    = BTreeMap::new();
    let mut remainders = Vec::with_capacity(by_class.len());
    let mut assigned  = 0usize;

    for (&label, rows) in by_class {
        let exact = n_test as f64 * rows.len() as f64 / total as f64;
        let floor = exact.floor() as usize;
        quotas.insert(label, floor);
        remainders.push((exact - floor as f64, label));
        assigned += floor;
    }

    // Largest fractional part first; equal remainders go to the lower label
    remainders.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, label) in remainders.into_iter().take(n_test.saturating_sub(assigned)) {
        if let Some(q) = quotas.get_mut(&label) {
            *q += 1;
        }
    }
    quotas
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{RawTable, Value};
    use crate::domain::schema::STUDENT_SCHEMA;

    /// `n` rows where every `every`-th row is a pass. Row i has attendance = i
    /// (kept inside [0, 100]) so rows are distinguishable.
    fn dataset(n: usize, every: usize) -> ValidatedDataset {
        let rows = (0..n)
            .map(|i| {
                vec![
                    Value::Number((i % 101) as f64),
                    Value::Number((i / 101) as f64),
                    Value::Number(50.0),
                    Value::Number(50.0),
                    Value::Number(if i % every == 0 { 1.0 } else { 0.0 }),
                ]
            })
            .collect();
        let table = RawTable::new(STUDENT_SCHEMA.iter().map(|f| f.name.to_string()).collect(), rows);
        ValidatedDataset::from_table(&table).unwrap()
    }

    #[test]
    fn test_correct_split_sizes() {
        let s = split(&dataset(100, 4), SplitConfig::default()).unwrap();
        assert_eq!(s.train.len(), 80);
        assert_eq!(s.test.len(),  20);
    }

    #[test]
    fn test_split_is_a_partition() {
        let s = split(&dataset(57, 3), SplitConfig { test_fraction: 0.3, seed: 7 }).unwrap();
        let mut all: Vec<usize> = s.train_rows.iter().chain(&s.test_rows).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..57).collect::<Vec<_>>());
        assert!(s.train_rows.iter().all(|r| !s.test_rows.contains(r)));
    }

    #[test]
    fn test_features_and_labels_stay_aligned() {
        let ds = dataset(40, 2);
        let source = ds.to_labeled();
        let s = split(&ds, SplitConfig::default()).unwrap();
        for (pos, &row) in s.test_rows.iter().enumerate() {
            assert_eq!(s.test.features[pos], source.features[row]);
            assert_eq!(s.test.labels[pos],   source.labels[row]);
        }
    }

    #[test]
    fn test_same_seed_same_partition() {
        let ds = dataset(50, 3);
        let a  = split(&ds, SplitConfig::default()).unwrap();
        let b  = split(&ds, SplitConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stratification_preserves_class_balance() {
        // 25 passes out of 100
        let s = split(&dataset(100, 4), SplitConfig::default()).unwrap();
        assert!(s.stratified);
        let passes = s.test.labels.iter().filter(|&&l| l == 1).count();
        assert_eq!(passes, 5);
    }

    #[test]
    fn test_single_class_skips_stratification() {
        let s = split(&dataset(10, 1), SplitConfig::default()).unwrap();
        assert!(!s.stratified);
        assert_eq!(s.test.len(), 2);
        assert_eq!(s.train.len(), 8);
    }

    #[test]
    fn test_fraction_out_of_bounds_is_config_error() {
        let ds = dataset(10, 2);
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let cfg = SplitConfig { test_fraction: bad, seed: 1 };
            assert!(matches!(split(&ds, cfg), Err(PipelineError::Config(_))));
        }
    }

    #[test]
    fn test_too_few_rows_is_config_error() {
        // ceil(0.2 * 1) = 1 test row leaves nothing to train on
        let ds = dataset(1, 1);
        assert!(matches!(split(&ds, SplitConfig::default()), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_quotas_sum_to_test_size() {
        let mut by_class = BTreeMap::new();
        by_class.insert(0u8, (0..7).collect::<Vec<_>>());
        by_class.insert(1u8, (7..10).collect::<Vec<_>>());
        let q = allocate_test_slots(&by_class, 3, 10);
        assert_eq!(q.values().sum::<usize>(), 3);
        assert_eq!(q[&0], 2);
        assert_eq!(q[&1], 1);
    }
}
