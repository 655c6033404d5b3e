//! Tsetlin Machine orchestration: validation, training step, inference and
//! state export.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Config, Rule,
    error::{Error, Result},
    feedback::{FeedbackParams, PoolRole},
    literals::{check_example, pack_input},
    pool::ClassPool,
    utils::{FastRng, rng_from_entropy, rng_from_seed},
    vote
};

/// # Overview
///
/// Tsetlin Machine with one clause pool per class.
///
/// With `n_classes == 1` the machine runs in binary mode: a single pool,
/// labels `{0, 1}`, prediction `1` iff the score is positive. Otherwise each
/// training step updates the target class and one randomly drawn competing
/// class, and prediction is the argmax of the class scores (ties go to the
/// lowest class).
///
/// The automaton states are the only learned state. `fit` takes `&mut self`
/// and `predict` takes `&self`, so inference never overlaps a training step;
/// see [`SharedMachine`](crate::SharedMachine) for use across threads.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::{Config, TsetlinMachine};
///
/// let config = Config::builder()
///     .clauses(20)
///     .features(2)
///     .classes(2)
///     .threshold(10)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let mut tm = TsetlinMachine::new(config).unwrap();
///
/// let x = [[0, 0], [0, 1], [1, 0], [1, 1]];
/// let y = [0, 0, 1, 0];
///
/// for _ in 0..100 {
///     for (xi, &yi) in x.iter().zip(&y) {
///         tm.fit(xi, yi).unwrap();
///     }
/// }
///
/// assert!(tm.predict(&[1, 0]).unwrap() < 2);
/// ```
#[derive(Debug, Clone)]
pub struct TsetlinMachine<R = FastRng> {
    config: Config,
    pools:  Vec<ClassPool>,
    params: FeedbackParams,
    rng:    R
}

impl TsetlinMachine<FastRng> {
    /// # Overview
    ///
    /// Creates machine from a validated config. Seeds the random source from
    /// `config.seed`, or from entropy when unset.
    pub fn new(config: Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => rng_from_seed(seed),
            None => rng_from_entropy()
        };
        Self::with_rng(config, rng)
    }
}

impl<R> TsetlinMachine<R> {
    /// # Overview
    ///
    /// Creates machine drawing all feedback randomness from `rng`.
    pub fn with_rng(config: Config, rng: R) -> Result<Self> {
        config.validate()?;

        let n_pools = if config.is_binary() { 1 } else { config.n_classes };
        let pools = (0..n_pools)
            .map(|_| ClassPool::new(config.n_clauses, config.n_features, config.n_states))
            .collect::<Result<_>>()?;

        debug!(
            n_classes = config.n_classes,
            n_clauses = config.n_clauses,
            n_features = config.n_features,
            n_states = config.n_states,
            threshold = config.threshold,
            s = config.s,
            "created tsetlin machine"
        );

        Ok(Self {
            config,
            pools,
            params: FeedbackParams::from_config(&config),
            rng
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.config.n_features
    }

    /// # Overview
    ///
    /// Number of accepted labels (2 in binary mode).
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.config.n_labels()
    }

    /// # Overview
    ///
    /// Clause pools, one per class (a single pool in binary mode).
    #[inline]
    pub fn pools(&self) -> &[ClassPool] {
        &self.pools
    }

    /// # Overview
    ///
    /// Predicts the label of `x`. Read-only.
    pub fn predict(&self, x: &[u8]) -> Result<usize> {
        let scores = self.class_scores(x)?;
        Ok(vote::decide(&scores))
    }

    /// # Overview
    ///
    /// Vote sum of every pool for `x`.
    pub fn class_scores(&self, x: &[u8]) -> Result<Vec<i32>> {
        self.check_example(x)?;
        let packed = pack_input(x);
        Ok(self.pools.iter().map(|pool| pool.score(&packed)).collect())
    }

    /// # Overview
    ///
    /// Vote sum of one class. In binary mode the only pool is class 0.
    pub fn score(&self, x: &[u8], class: usize) -> Result<i32> {
        self.check_example(x)?;
        let pool = self.pools.get(class).ok_or(Error::InvalidLabel {
            label:    class,
            n_labels: self.pools.len()
        })?;
        Ok(pool.score(&pack_input(x)))
    }

    /// # Overview
    ///
    /// Fraction of correctly predicted examples.
    pub fn evaluate(&self, xs: &[Vec<u8>], ys: &[usize]) -> Result<f32> {
        if xs.len() != ys.len() {
            return Err(Error::LabelCountMismatch {
                examples: xs.len(),
                labels:   ys.len()
            });
        }
        if xs.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut correct = 0usize;
        for (x, &y) in xs.iter().zip(ys) {
            self.check_label(y)?;
            if self.predict(x)? == y {
                correct += 1;
            }
        }
        Ok(correct as f32 / xs.len() as f32)
    }

    /// # Overview
    ///
    /// Flat automaton states ordered pool, clause, literal.
    pub fn export_state(&self) -> Vec<i16> {
        let mut states = Vec::with_capacity(self.state_len());
        for pool in &self.pools {
            pool.export_states(&mut states);
        }
        debug!(len = states.len(), "exported automaton states");
        states
    }

    /// # Overview
    ///
    /// Replaces every automaton state with `states`, laid out as by
    /// [`Self::export_state`]. Nothing is written unless the whole slice is
    /// valid.
    pub fn import_state(&mut self, states: &[i16]) -> Result<()> {
        let expected = self.state_len();
        if states.len() != expected {
            return Err(Error::StateLength {
                expected,
                got: states.len()
            });
        }

        let max = 2 * self.config.n_states;
        if let Some((index, &state)) = states
            .iter()
            .enumerate()
            .find(|&(_, &s)| !(1..=max).contains(&s))
        {
            return Err(Error::StateOutOfRange { index, state });
        }

        let per_pool = expected / self.pools.len();
        for (pool, chunk) in self.pools.iter_mut().zip(states.chunks_exact(per_pool)) {
            pool.load_states(chunk);
        }
        debug!(len = states.len(), "imported automaton states");
        Ok(())
    }

    /// # Overview
    ///
    /// Learned rules of every clause, pool by pool.
    pub fn rules(&self) -> Vec<Rule> {
        self.pools
            .iter()
            .enumerate()
            .flat_map(|(class, pool)| {
                pool.clauses()
                    .iter()
                    .map(move |clause| Rule::from_clause(class, clause))
            })
            .collect()
    }

    fn state_len(&self) -> usize {
        self.pools.len() * self.config.n_clauses * 2 * self.config.n_features
    }

    fn check_example(&self, x: &[u8]) -> Result<()> {
        check_example(x, self.config.n_features).inspect_err(|e| {
            debug!(error = %e, "rejected example");
        })
    }

    fn check_label(&self, y: usize) -> Result<()> {
        let n_labels = self.config.n_labels();
        if y >= n_labels {
            debug!(label = y, n_labels, "rejected label");
            return Err(Error::InvalidLabel { label: y, n_labels });
        }
        Ok(())
    }
}

impl<R: Rng> TsetlinMachine<R> {
    /// # Overview
    ///
    /// One online training step on `(x, y)`.
    ///
    /// Validates the example and label before touching any automaton. All
    /// involved pools are evaluated before feedback starts.
    pub fn fit(&mut self, x: &[u8], y: usize) -> Result<()> {
        self.check_example(x)?;
        self.check_label(y)?;

        let packed = pack_input(x);
        let t = self.config.threshold as f32;

        if self.config.is_binary() {
            let pool = &mut self.pools[0];
            let outputs = pool.evaluate(&packed);
            let score = pool.score_outputs(&outputs);
            let role = if y == 1 {
                PoolRole::Target
            } else {
                PoolRole::Competing
            };
            trace!(label = y, score, "binary training step");
            pool.feedback(x, &outputs, role, score, t, &self.params, &mut self.rng);
            return Ok(());
        }

        let competing = self.draw_competing(y);

        let target_out = self.pools[y].evaluate(&packed);
        let competing_out = self.pools[competing].evaluate(&packed);
        let target_score = self.pools[y].score_outputs(&target_out);
        let competing_score = self.pools[competing].score_outputs(&competing_out);

        trace!(
            label = y,
            competing,
            target_score,
            competing_score,
            "training step"
        );

        self.pools[y].feedback(
            x,
            &target_out,
            PoolRole::Target,
            target_score,
            t,
            &self.params,
            &mut self.rng
        );
        self.pools[competing].feedback(
            x,
            &competing_out,
            PoolRole::Competing,
            competing_score,
            t,
            &self.params,
            &mut self.rng
        );
        Ok(())
    }

    /// Uniform draw from every class except `y`.
    fn draw_competing(&mut self, y: usize) -> usize {
        let r = self.rng.random_range(0..self.pools.len() - 1);
        if r >= y { r + 1 } else { r }
    }
}

/// # Overview
///
/// Serializable snapshot: configuration plus flat automaton states.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    pub config: Config,
    pub states: Vec<i16>
}

#[cfg(feature = "serde")]
impl TsetlinMachine<FastRng> {
    /// # Overview
    ///
    /// Rebuilds a machine from a snapshot. The random source is reseeded
    /// from `config.seed` (or entropy), not restored.
    pub fn from_state(state: &MachineState) -> Result<Self> {
        let mut tm = Self::new(state.config)?;
        tm.import_state(&state.states)?;
        Ok(tm)
    }
}

#[cfg(feature = "serde")]
impl<R> TsetlinMachine<R> {
    pub fn to_state(&self) -> MachineState {
        MachineState {
            config: self.config,
            states: self.export_state()
        }
    }
}
