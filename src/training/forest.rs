//! Bagged ensemble of CART trees with Gini threshold splits.
//!
//! Features are integer codes and are split as ordinals (`code <= threshold`
//! goes left). Each tree sees a bootstrap sample and, at every node, searches a
//! random subset of features. When none of the sampled features can split the
//! node, the search keeps going through the remaining ones before giving up.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::common::error::{AdvisorError, AdvisorResult};
use crate::inference::domain::Classifier;

use super::domain::{ForestConfig, Trainer};

#[derive(Clone, Debug)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: usize,
        left: usize,
        right: usize,
    },
}

#[derive(Copy, Clone, Debug)]
struct SplitChoice {
    feature: usize,
    threshold: usize,
    impurity: f64,
}

/// A single fully grown classification tree.
#[derive(Clone, Debug)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree over `sample`, a list of row indices (repeats allowed).
    pub fn fit(
        rows: &[Vec<usize>],
        labels: &[usize],
        sample: &[usize],
        n_classes: usize,
        features_per_node: usize,
        cfg: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let mut grower = Grower {
            rows,
            labels,
            n_classes,
            n_features: rows.first().map_or(0, Vec::len),
            features_per_node,
            max_depth: cfg.max_depth,
            min_samples_split: cfg.min_samples_split,
            rng,
            nodes: Vec::new(),
        };
        let mut sample = sample.to_vec();
        grower.grow(&mut sample, 0);
        Self {
            nodes: grower.nodes,
        }
    }

    /// Class distribution of the leaf `row` lands in.
    pub fn predict_proba(&self, row: &[usize]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0);
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

struct Grower<'a> {
    rows: &'a [Vec<usize>],
    labels: &'a [usize],
    n_classes: usize,
    n_features: usize,
    features_per_node: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
}

impl Grower<'_> {
    /// Grow the subtree for `sample` and return its node index.
    fn grow(&mut self, sample: &mut [usize], depth: usize) -> usize {
        let counts = self.class_counts(sample);
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let depth_capped = self.max_depth.is_some_and(|max| depth >= max);
        let too_small = sample.len() < self.min_samples_split.max(2);

        if !(pure || depth_capped || too_small) {
            if let Some(split) = self.best_split(sample, &counts) {
                let rows = self.rows;
                let mid = partition(sample, |i| rows[i][split.feature] <= split.threshold);
                let (left_sample, right_sample) = sample.split_at_mut(mid);
                let left = self.grow(left_sample, depth + 1);
                let right = self.grow(right_sample, depth + 1);
                self.nodes[id] = Node::Split {
                    feature: split.feature,
                    threshold: split.threshold,
                    left,
                    right,
                };
                return id;
            }
        }

        let total = sample.len().max(1) as f64;
        self.nodes[id] = Node::Leaf {
            distribution: counts.iter().map(|&c| c as f64 / total).collect(),
        };
        id
    }

    fn class_counts(&self, sample: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in sample {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn best_split(&mut self, sample: &[usize], parent: &[usize]) -> Option<SplitChoice> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(&mut *self.rng);

        let mut best: Option<SplitChoice> = None;
        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.features_per_node && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_threshold(sample, feature, parent) {
                if best.map_or(true, |b| candidate.impurity < b.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Lowest weighted Gini over thresholds between distinct values of `feature`.
    fn best_threshold(
        &self,
        sample: &[usize],
        feature: usize,
        parent: &[usize],
    ) -> Option<SplitChoice> {
        let n = sample.len();
        if n < 2 {
            return None;
        }

        let mut pairs: Vec<(usize, usize)> = sample
            .iter()
            .map(|&i| (self.rows[i][feature], self.labels[i]))
            .collect();
        pairs.sort_unstable();

        let mut left = vec![0usize; self.n_classes];
        let mut right = parent.to_vec();
        let mut best: Option<SplitChoice> = None;

        for k in 0..n - 1 {
            let (value, label) = pairs[k];
            left[label] += 1;
            right[label] -= 1;
            if value == pairs[k + 1].0 {
                continue;
            }
            let n_left = k + 1;
            let n_right = n - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;
            if best.map_or(true, |b| impurity < b.impurity) {
                best = Some(SplitChoice {
                    feature,
                    threshold: value,
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Move indices satisfying `goes_left` to the front; returns the boundary.
fn partition(sample: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..sample.len() {
        if goes_left(sample[i]) {
            sample.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

/// Ensemble of decision trees; probabilities are the mean of leaf distributions.
#[derive(Clone, Debug)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    pub fn fit(
        rows: &[Vec<usize>],
        labels: &[usize],
        n_classes: usize,
        cfg: &ForestConfig,
    ) -> AdvisorResult<Self> {
        if rows.is_empty() {
            return Err(AdvisorError::training("no training rows"));
        }
        if rows.len() != labels.len() {
            return Err(AdvisorError::training(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if n_classes == 0 {
            return Err(AdvisorError::training("no classes to learn"));
        }
        if cfg.n_trees == 0 {
            return Err(AdvisorError::training("forest needs at least one tree"));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(AdvisorError::training(format!(
                "label {bad} outside {n_classes} classes"
            )));
        }
        let n_features = rows[0].len();
        if n_features == 0 || rows.iter().any(|r| r.len() != n_features) {
            return Err(AdvisorError::training("rows must share a non-zero width"));
        }

        let per_node = cfg.features_per_node(n_features);
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let trees = (0..cfg.n_trees)
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.gen());
                let sample: Vec<usize> = (0..rows.len())
                    .map(|_| tree_rng.gen_range(0..rows.len()))
                    .collect();
                DecisionTree::fit(rows, labels, &sample, n_classes, per_node, cfg, &mut tree_rng)
            })
            .collect::<Vec<_>>();

        debug!(
            trees = trees.len(),
            rows = rows.len(),
            nodes = trees.iter().map(DecisionTree::node_count).sum::<usize>(),
            "fitted random forest"
        );
        Ok(Self { trees, n_classes })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, row: &[usize]) -> Vec<f64> {
        let mut acc = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (a, p) in acc.iter_mut().zip(tree.predict_proba(row)) {
                *a += p;
            }
        }
        let n = self.trees.len() as f64;
        acc.iter_mut().for_each(|a| *a /= n);
        acc
    }
}

/// [`Trainer`] that fits a [`RandomForest`].
#[derive(Clone, Debug, Default)]
pub struct ForestTrainer {
    pub config: ForestConfig,
}

impl ForestTrainer {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }
}

impl Trainer for ForestTrainer {
    type Model = RandomForest;

    fn fit(
        &self,
        rows: &[Vec<usize>],
        labels: &[usize],
        n_classes: usize,
    ) -> AdvisorResult<RandomForest> {
        RandomForest::fit(rows, labels, n_classes, &self.config)
    }
}
