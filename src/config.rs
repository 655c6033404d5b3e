//! Configuration and builder for Tsetlin Machine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Largest memory depth whose `2 * n_states` still fits in `i16`.
pub const MAX_STATES: i16 = i16::MAX / 2;

/// # Overview
///
/// Configuration parameters for a Tsetlin Machine.
///
/// `n_clauses` is the pool size of each class. `n_classes == 1` selects
/// binary mode with labels `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[must_use]
pub struct Config {
    pub n_clauses:           usize,
    pub n_features:          usize,
    pub n_classes:           usize,
    pub n_states:            i16,
    pub s:                   f32,
    pub threshold:           i32,
    pub seed:                Option<u64>,
    pub boost_true_positive: bool
}

impl Config {
    /// # Overview
    ///
    /// Creates a new ConfigBuilder.
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// # Overview
    ///
    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.n_clauses == 0 {
            return Err(Error::InvalidConfiguration(ConfigError::MissingClauses));
        }
        if !self.n_clauses.is_multiple_of(2) {
            return Err(Error::InvalidConfiguration(ConfigError::OddClauses));
        }
        if self.n_features == 0 {
            return Err(Error::InvalidConfiguration(ConfigError::MissingFeatures));
        }
        if self.n_classes == 0 {
            return Err(Error::InvalidConfiguration(ConfigError::MissingClasses));
        }
        if self.n_states < 1 || self.n_states > MAX_STATES {
            return Err(Error::InvalidConfiguration(ConfigError::InvalidStates));
        }
        if !self.s.is_finite() || self.s <= 1.0 {
            return Err(Error::InvalidConfiguration(ConfigError::InvalidSpecificity));
        }
        if self.threshold <= 0 {
            return Err(Error::InvalidConfiguration(ConfigError::InvalidThreshold));
        }
        Ok(())
    }

    /// # Overview
    ///
    /// True when the machine has a single pool and labels `{0, 1}`.
    #[inline]
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.n_classes == 1
    }

    /// # Overview
    ///
    /// Number of accepted labels: 2 in binary mode, `n_classes` otherwise.
    #[inline]
    #[must_use]
    pub fn n_labels(&self) -> usize {
        if self.is_binary() { 2 } else { self.n_classes }
    }

    /// # Overview
    ///
    /// Number of automata in the whole machine.
    #[inline]
    #[must_use]
    pub fn n_automata(&self) -> usize {
        self.n_classes * self.n_clauses * 2 * self.n_features
    }

    /// # Overview
    ///
    /// Pre-computed probability for strengthening: (s-1)/s.
    #[inline]
    #[must_use]
    pub fn prob_strengthen(&self) -> f32 {
        (self.s - 1.0) / self.s
    }

    /// # Overview
    ///
    /// Pre-computed probability for weakening: 1/s.
    #[inline]
    #[must_use]
    pub fn prob_weaken(&self) -> f32 {
        1.0 / self.s
    }

    /// # Overview
    ///
    /// Pre-computed integer threshold for strengthening.
    ///
    /// Converts float probability to u32 for faster comparison:
    /// `rng.random::<u32>() < threshold` replaces a float draw.
    #[inline]
    #[must_use]
    pub fn threshold_strengthen(&self) -> u32 {
        prob_to_threshold(self.prob_strengthen())
    }

    /// # Overview
    ///
    /// Pre-computed integer threshold for weakening.
    #[inline]
    #[must_use]
    pub fn threshold_weaken(&self) -> u32 {
        prob_to_threshold(self.prob_weaken())
    }
}

/// Converts probability [0.0, 1.0] to integer threshold for fast comparison.
///
/// Usage: `rng.random::<u32>() < threshold` is equivalent to
/// `rng.random::<f32>() < probability`.
#[inline]
#[must_use]
pub fn prob_to_threshold(prob: f32) -> u32 {
    (prob.clamp(0.0, 1.0) as f64 * u32::MAX as f64) as u32
}

/// # Overview
///
/// Builder for Config with validation.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    n_clauses:           Option<usize>,
    n_features:          Option<usize>,
    n_classes:           Option<usize>,
    n_states:            Option<i16>,
    s:                   Option<f32>,
    threshold:           Option<i32>,
    seed:                Option<u64>,
    boost_true_positive: bool
}

impl ConfigBuilder {
    /// # Overview
    ///
    /// Sets the number of clauses per class (must be even).
    pub fn clauses(mut self, n: usize) -> Self {
        self.n_clauses = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of input features.
    pub fn features(mut self, n: usize) -> Self {
        self.n_features = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of classes (default: 2, 1 = binary mode).
    pub fn classes(mut self, n: usize) -> Self {
        self.n_classes = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets states per automaton action (default: 100).
    pub fn states(mut self, n: i16) -> Self {
        self.n_states = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets specificity parameter s (default: 3.9).
    pub fn specificity(mut self, s: f32) -> Self {
        self.s = Some(s);
        self
    }

    /// # Overview
    ///
    /// Sets vote threshold T (default: 15).
    pub fn threshold(mut self, t: i32) -> Self {
        self.threshold = Some(t);
        self
    }

    /// Seeds the machine's random source. Without a seed it is drawn from
    /// entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Always strengthen true literals of firing clauses under Type I.
    pub fn boost_true_positive(mut self, boost: bool) -> Self {
        self.boost_true_positive = boost;
        self
    }

    /// # Overview
    ///
    /// Builds and validates the Config.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            n_clauses:           self.n_clauses.ok_or(ConfigError::MissingClauses)?,
            n_features:          self.n_features.ok_or(ConfigError::MissingFeatures)?,
            n_classes:           self.n_classes.unwrap_or(2),
            n_states:            self.n_states.unwrap_or(100),
            s:                   self.s.unwrap_or(3.9),
            threshold:           self.threshold.unwrap_or(15),
            seed:                self.seed,
            boost_true_positive: self.boost_true_positive
        };
        config.validate()?;
        Ok(config)
    }
}
