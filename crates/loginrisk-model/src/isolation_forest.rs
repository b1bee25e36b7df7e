//! Isolation forest outlier detector
//!
//! An ensemble of random binary trees, each grown on a subsample of the
//! training rows by picking a random feature and a random threshold between
//! that feature's min and max in the node. Outliers are isolated close to
//! the root, so a short average path length means an anomalous row.
//!
//! Scoring follows the usual conventions:
//!
//! - `score_samples(x) = -2^(-E[h(x)] / c(psi))`, where `h` is the path
//!   length, `psi` the subsample size and `c` the average path length of an
//!   unsuccessful binary search tree lookup. Lower means more anomalous.
//! - `offset` is the `contamination` quantile of the training scores.
//! - `decision_function(x) = score_samples(x) - offset`; negative means outlier.
//!
//! A fitted forest is immutable. Every method used after `fit` takes
//! `&self`, so a trained forest can be shared across threads freely.

use crate::error::{ModelError, Result};
use crate::matrix::FeatureMatrix;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Isolation forest hyper-parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForestConfig {
    /// Number of trees
    pub n_estimators: usize,

    /// Rows drawn (without replacement) per tree, capped at the training size
    pub max_samples: usize,

    /// Expected fraction of outliers in the training data, in (0, 0.5]
    pub contamination: f64,

    /// Seed for the tree-growing RNG
    pub seed: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: 256,
            contamination: 0.05,
            seed: 42,
        }
    }
}

impl IsolationForestConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter {
                name: "n_estimators".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_samples == 0 {
            return Err(ModelError::InvalidParameter {
                name: "max_samples".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(ModelError::InvalidParameter {
                name: "contamination".to_string(),
                message: format!("must be in (0, 0.5], got {}", self.contamination),
            });
        }
        Ok(())
    }
}

/// Binary outlier verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Outlier,
}

impl Verdict {
    pub fn is_outlier(&self) -> bool {
        matches!(self, Verdict::Outlier)
    }
}

/// Full detector output for one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyScore {
    /// Raw `score_samples` value, in [-1, 0)
    pub score: f64,

    /// `score - offset`; negative for outliers
    pub margin: f64,

    /// Verdict derived from the margin
    pub verdict: Verdict,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow(matrix: &FeatureMatrix, rows: Vec<usize>, max_depth: usize, rng: &mut StdRng) -> Self {
        Self {
            root: grow_node(matrix, rows, 0, max_depth, rng),
        }
    }

    fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                    depth += 1;
                }
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
            }
        }
    }
}

fn grow_node(
    matrix: &FeatureMatrix,
    rows: Vec<usize>,
    depth: usize,
    max_depth: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= max_depth || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // only features that still vary inside this node can split it
    let mut candidates = Vec::with_capacity(matrix.n_cols());
    for feature in 0..matrix.n_cols() {
        let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
            let v = matrix.row(r)[feature];
            (lo.min(v), hi.max(v))
        });
        if max > min {
            candidates.push((feature, min, max));
        }
    }
    if candidates.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .into_iter()
        .partition(|&r| matrix.row(r)[feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(matrix, left_rows, depth + 1, max_depth, rng)),
        right: Box::new(grow_node(matrix, right_rows, depth + 1, max_depth, rng)),
    }
}

/// Average path length of an unsuccessful search in a binary search tree of `n` nodes
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated quantile of an unsorted sample, `q` in [0, 1]
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Trained isolation forest
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    n_features: usize,
    sample_size: usize,
    offset: f64,
    config: IsolationForestConfig,
}

impl IsolationForest {
    /// Fit a forest on the training matrix
    pub fn fit(matrix: &FeatureMatrix, config: IsolationForestConfig) -> Result<Self> {
        config.validate()?;
        let n_rows = matrix.n_rows();
        if n_rows == 0 || matrix.n_cols() == 0 {
            return Err(ModelError::EmptyTrainingData);
        }

        let sample_size = config.max_samples.min(n_rows);
        let max_depth = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_estimators)
            .map(|_| {
                let rows = index::sample(&mut rng, n_rows, sample_size).into_vec();
                IsolationTree::grow(matrix, rows, max_depth, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            n_features: matrix.n_cols(),
            sample_size,
            offset: 0.0,
            config,
        };

        let training_scores: Vec<f64> = matrix.rows().map(|row| forest.raw_score(row)).collect();
        forest.offset = quantile(&training_scores, forest.config.contamination);

        debug!(
            trees = forest.trees.len(),
            sample_size,
            max_depth,
            offset = forest.offset,
            "isolation forest fitted"
        );

        Ok(forest)
    }

    /// Raw anomaly score; lower is more anomalous
    pub fn score_samples(&self, row: &[f64]) -> Result<f64> {
        self.check_width(row)?;
        Ok(self.raw_score(row))
    }

    /// Signed distance to the outlier threshold; negative for outliers
    pub fn decision_function(&self, row: &[f64]) -> Result<f64> {
        Ok(self.score_samples(row)? - self.offset)
    }

    /// Binary outlier verdict
    pub fn predict(&self, row: &[f64]) -> Result<Verdict> {
        Ok(self.evaluate(row)?.verdict)
    }

    /// Score, margin and verdict in one pass
    pub fn evaluate(&self, row: &[f64]) -> Result<AnomalyScore> {
        let score = self.score_samples(row)?;
        let margin = score - self.offset;
        let verdict = if margin < 0.0 {
            Verdict::Outlier
        } else {
            Verdict::Normal
        };
        Ok(AnomalyScore {
            score,
            margin,
            verdict,
        })
    }

    /// Threshold applied to raw scores
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }

    fn check_width(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_features {
            return Err(ModelError::WidthMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        Ok(())
    }

    fn raw_score(&self, row: &[f64]) -> f64 {
        let mean_depth =
            self.trees.iter().map(|t| t.path_length(row)).sum::<f64>() / self.trees.len() as f64;
        let norm = average_path_length(self.sample_size);
        // a single-row sample has no depth to normalise against
        let ratio = if norm > 0.0 { mean_depth / norm } else { 1.0 };
        -(2f64.powf(-ratio))
    }
}
