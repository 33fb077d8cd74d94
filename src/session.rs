use crate::config::Config;
use crate::difficulty::DifficultyEstimator;
use crate::round_log::RoundLog;
use crate::score_store::{partition_sort, ScoreStore, SCOREBOARD_CAPACITY};

/// Round rules, derived from the persisted [`Config`].
#[derive(Debug, Clone)]
pub struct RoundConfig {
    pub miss_tolerance: u32,
    pub miss_speed_decay: f64,
    pub base_fall_speed: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RoundConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            miss_tolerance: cfg.miss_tolerance,
            miss_speed_decay: cfg.miss_speed_decay,
            base_fall_speed: cfg.base_fall_speed,
        }
    }
}

/// Transient per-round counters, passed by the loop body instead of living
/// in ambient globals.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub score: u32,
    pub misses: u32,
    pub speed_multiplier: f64,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            score: 0,
            misses: 0,
            speed_multiplier: 1.0,
        }
    }
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&mut self) {
        self.score += 1;
    }

    /// Count a miss and decay the round's speed multiplier. With the
    /// default tolerance of 1 the round ends on the first miss, so the
    /// decayed value is never read back; the decay is kept because the
    /// tolerance is configurable.
    pub fn miss(&mut self, config: &RoundConfig) {
        self.misses += 1;
        self.speed_multiplier *= config.miss_speed_decay;
    }

    pub fn is_over(&self, config: &RoundConfig) -> bool {
        self.misses >= config.miss_tolerance
    }
}

/// Owns the score store and the difficulty estimator for the lifetime of
/// the process; the live game loop holds only a [`RoundState`] and calls
/// in at tick and round boundaries.
#[derive(Debug)]
pub struct GameSession {
    pub config: RoundConfig,
    store: ScoreStore,
    estimator: DifficultyEstimator,
    round_log: Option<RoundLog>,
}

impl GameSession {
    pub fn new(config: RoundConfig, store: ScoreStore) -> Self {
        Self {
            config,
            store,
            estimator: DifficultyEstimator::new(),
            round_log: None,
        }
    }

    pub fn with_round_log(mut self, round_log: RoundLog) -> Self {
        self.round_log = Some(round_log);
        self
    }

    pub fn estimator(&self) -> &DifficultyEstimator {
        &self.estimator
    }

    pub fn ranked_scores(&self) -> Vec<u32> {
        self.store.top_n(SCOREBOARD_CAPACITY)
    }

    /// Target fall speed for the current tick: base speed scaled by the
    /// round's own multiplier and the learned difficulty multiplier.
    pub fn fall_speed(&self, state: &RoundState) -> f64 {
        self.config.base_fall_speed
            * state.speed_multiplier
            * self.estimator.predict(state.score, state.misses)
    }

    /// Commit a finished round: train the estimator on the outcome, append
    /// the round log, persist the score and return the ranked top-10 for
    /// display. Storage failures are logged and degrade to the in-memory
    /// ranking; the round-end flow never panics.
    pub fn finish_round(&mut self, state: &RoundState) -> Vec<u32> {
        self.estimator.observe(state.score, state.misses);

        if let Some(ref round_log) = self.round_log {
            let multiplier = self.estimator.predict(state.score, state.misses);
            if let Err(e) = round_log.append(state.score, state.misses, multiplier) {
                log::warn!("could not append round log {}: {e}", round_log.path().display());
            }
        }

        match self.store.record(state.score) {
            Ok(ranked) => ranked,
            Err(e) => {
                log::warn!(
                    "could not persist score {} to {}: {e}",
                    state.score,
                    self.store.path().display()
                );
                let mut scores = self.store.load();
                scores.push(state.score);
                let mut ranked = partition_sort(&scores);
                ranked.truncate(SCOREBOARD_CAPACITY);
                ranked
            }
        }
    }
}
