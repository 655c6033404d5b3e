//! Type I and Type II feedback mechanisms.
//!
//! # Routing
//!
//! | Pool role | Polarity | Feedback |
//! |-----------|----------|----------|
//! | Target    | Positive | Type I |
//! | Target    | Negative | Type II (firing clauses only) |
//! | Competing | Positive | Type II (firing clauses only) |
//! | Competing | Negative | Type I |
//!
//! A clause only receives feedback when it wins a Bernoulli draw with
//! [`selection_probability`], which shrinks as the class score approaches
//! the threshold.

use rand::Rng;

use crate::{Automaton, Config, Polarity, config::prob_to_threshold};

/// # Overview
///
/// Which reinforcement rule is applied to a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    TypeI,
    TypeII
}

/// # Overview
///
/// Role of a class pool in one training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolRole {
    /// Pool of the true label: its score should rise.
    Target,
    /// Pool of a competing label: its score should fall.
    Competing
}

/// # Overview
///
/// Pre-computed integer thresholds for the hot loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackParams {
    /// Threshold for `(s-1)/s`.
    pub strengthen:          u32,
    /// Threshold for `1/s`.
    pub weaken:              u32,
    pub boost_true_positive: bool
}

impl FeedbackParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            strengthen:          config.threshold_strengthen(),
            weaken:              config.threshold_weaken(),
            boost_true_positive: config.boost_true_positive
        }
    }

    /// # Overview
    ///
    /// Builds thresholds directly from specificity `s`.
    pub fn from_specificity(s: f32) -> Self {
        Self {
            strengthen:          prob_to_threshold((s - 1.0) / s),
            weaken:              prob_to_threshold(1.0 / s),
            boost_true_positive: false
        }
    }
}

/// # Overview
///
/// Probability that a clause of a pool receives feedback.
///
/// `score` is clamped to `[-t, t]`. Target pools use `(t - v) / 2t`,
/// competing pools `(t + v) / 2t`.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::feedback::{PoolRole, selection_probability};
///
/// assert_eq!(selection_probability(PoolRole::Target, 0, 10.0), 0.5);
/// assert_eq!(selection_probability(PoolRole::Target, 25, 10.0), 0.0);
/// assert_eq!(selection_probability(PoolRole::Competing, 25, 10.0), 1.0);
/// ```
#[inline]
pub fn selection_probability(role: PoolRole, score: i32, t: f32) -> f32 {
    let v = (score as f32).clamp(-t, t);
    match role {
        PoolRole::Target => (t - v) / (2.0 * t),
        PoolRole::Competing => (t + v) / (2.0 * t)
    }
}

/// # Overview
///
/// Feedback a selected clause receives, or `None` when it is left alone.
#[inline]
pub fn route(role: PoolRole, polarity: Polarity, fires: bool) -> Option<FeedbackKind> {
    match (role, polarity) {
        (PoolRole::Target, Polarity::Positive) | (PoolRole::Competing, Polarity::Negative) => {
            Some(FeedbackKind::TypeI)
        }
        _ if fires => Some(FeedbackKind::TypeII),
        _ => None
    }
}

/// # Overview
///
/// Type I feedback: reinforces the pattern the clause should recognise.
///
/// When clause fires: strengthen true literals with `(s-1)/s` (always when
/// boosted), weaken false literals with `1/s`.
/// When clause doesn't fire: weaken every automaton with `1/s`.
///
/// `automata` must hold two automata per value of `x`.
pub fn type_i<R: Rng>(
    automata: &mut [Automaton],
    x: &[u8],
    fires: bool,
    params: &FeedbackParams,
    rng: &mut R
) {
    debug_assert_eq!(automata.len(), 2 * x.len());

    if !fires {
        for a in automata.iter_mut() {
            if rng.random::<u32>() < params.weaken {
                a.decrement();
            }
        }
        return;
    }

    for (k, &xk) in x.iter().enumerate() {
        let (truthy, falsy) = if xk == 1 {
            (2 * k, 2 * k + 1)
        } else {
            (2 * k + 1, 2 * k)
        };

        if params.boost_true_positive || rng.random::<u32>() < params.strengthen {
            automata[truthy].increment();
        }
        if rng.random::<u32>() < params.weaken {
            automata[falsy].decrement();
        }
    }
}

/// # Overview
///
/// Type II feedback: corrects false positives.
///
/// For a firing clause, every excluded automaton whose literal is false
/// moves toward include, so the clause stops firing on this input.
/// Deterministic. Same width precondition as [`type_i`].
pub fn type_ii(automata: &mut [Automaton], x: &[u8], fires: bool) {
    debug_assert_eq!(automata.len(), 2 * x.len());

    if !fires {
        return;
    }

    for (k, &xk) in x.iter().enumerate() {
        let falsy = if xk == 0 { 2 * k } else { 2 * k + 1 };
        if !automata[falsy].is_included() {
            automata[falsy].increment();
        }
    }
}
