use crate::util::euclidean_distance;
use itertools::Itertools;
use std::collections::HashMap;

/// Below this many observations `predict` stays at the neutral multiplier.
pub const MIN_OBSERVATIONS: usize = 4;
/// Number of neighbors consulted by the classifier.
pub const NEIGHBORS: usize = 3;
/// Multiplier returned while the training set is too small to trust.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;
/// Each difficulty class maps to `class * LABEL_MULTIPLIER_STEP`.
pub const LABEL_MULTIPLIER_STEP: f64 = 0.5;

/// Scores are bucketed into difficulty classes of this width.
const LABEL_SCORE_BUCKET: u32 = 10;

/// One round outcome used to train the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub score: u32,
    pub misses: u32,
}

/// Online difficulty estimator: accumulates (score, misses) outcomes and
/// classifies new pairs with a k-nearest-neighbor majority vote over the
/// full history. The model lives in memory only and is never persisted.
#[derive(Debug, Default)]
pub struct DifficultyEstimator {
    observations: Vec<Observation>,
    labels: Vec<u32>,
}

impl DifficultyEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Append one outcome to the training set. The class label is derived
    /// from the score alone: `score / 10`.
    pub fn observe(&mut self, score: u32, misses: u32) {
        self.observations.push(Observation { score, misses });
        self.labels.push(score / LABEL_SCORE_BUCKET);
    }

    /// Difficulty multiplier for the given running (score, misses) pair.
    ///
    /// With fewer than [`MIN_OBSERVATIONS`] outcomes on record this
    /// short-circuits to [`NEUTRAL_MULTIPLIER`]; otherwise the predicted
    /// class times [`LABEL_MULTIPLIER_STEP`].
    pub fn predict(&self, score: u32, misses: u32) -> f64 {
        if self.observations.len() < MIN_OBSERVATIONS {
            return NEUTRAL_MULTIPLIER;
        }

        f64::from(self.classify(score, misses)) * LABEL_MULTIPLIER_STEP
    }

    /// k-NN majority vote over Euclidean distance in (score, misses) space.
    ///
    /// Tie-breaking is fixed for reproducibility: neighbors are ordered by
    /// (distance, insertion index), so equidistant observations resolve
    /// lowest-index-first, and a vote tie resolves to the smallest label
    /// among the tied labels.
    fn classify(&self, score: u32, misses: u32) -> u32 {
        let query = (f64::from(score), f64::from(misses));

        let neighbors = self
            .observations
            .iter()
            .enumerate()
            .map(|(idx, obs)| {
                let point = (f64::from(obs.score), f64::from(obs.misses));
                (euclidean_distance(query, point), idx)
            })
            .sorted_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .take(NEIGHBORS)
            .map(|(_, idx)| idx);

        let mut votes: HashMap<u32, usize> = HashMap::new();
        for idx in neighbors {
            *votes.entry(self.labels[idx]).or_insert(0) += 1;
        }

        votes
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .next()
            .map(|(label, _)| label)
            .unwrap_or(0)
    }
}
