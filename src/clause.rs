//! Clause - a conjunction of literals backed by a team of automata.

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Automaton,
    error::Result,
    feedback::{FeedbackKind, FeedbackParams, type_i, type_ii},
    literals::n_words
};

/// # Overview
///
/// Whether a clause votes for (+1) or against (-1) its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    Positive,
    Negative
}

impl Polarity {
    /// # Overview
    ///
    /// Positive for even clause indices, negative for odd ones.
    #[inline]
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[inline(always)]
    pub fn sign(self) -> i32 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1
        }
    }
}

/// # Overview
///
/// A clause with 2*n_features automata.
///
/// - automata[2*k] controls literal x_k
/// - automata[2*k+1] controls literal NOT x_k
///
/// `include` and `negated` are bitmasks of the included literals, rebuilt
/// from the automata after every mutation.
#[derive(Debug, Clone)]
#[repr(align(64))]
pub struct Clause {
    automata:   Vec<Automaton>,
    include:    Vec<u64>,
    negated:    Vec<u64>,
    polarity:   Polarity,
    n_features: usize
}

impl Clause {
    /// # Overview
    ///
    /// Creates clause with given features, states, and polarity. Every
    /// automaton starts at the exclude boundary, so the clause is empty.
    ///
    /// Fails when `n_states` is outside `1..=MAX_STATES`.
    pub fn new(n_features: usize, n_states: i16, polarity: Polarity) -> Result<Self> {
        let words = n_words(n_features);
        Ok(Self {
            automata: vec![Automaton::new(n_states)?; 2 * n_features],
            include: vec![0; words],
            negated: vec![0; words],
            polarity,
            n_features
        })
    }

    #[inline(always)]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    #[inline(always)]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[inline(always)]
    pub fn automata(&self) -> &[Automaton] {
        &self.automata
    }

    /// # Overview
    ///
    /// Mutable automata for in-crate tests. Callers must rebuild the masks.
    #[cfg(test)]
    pub(crate) fn automata_mut(&mut self) -> &mut [Automaton] {
        &mut self.automata
    }

    /// # Overview
    ///
    /// Number of included literals.
    pub fn included_literals(&self) -> usize {
        self.include
            .iter()
            .chain(&self.negated)
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// # Overview
    ///
    /// Evaluates clause on packed input. A word violates the clause when an
    /// included literal is false: `(include & !x) | (negated & x) != 0`.
    #[inline]
    pub fn evaluate(&self, x_packed: &[u64]) -> bool {
        debug_assert_eq!(x_packed.len(), self.include.len());

        self.include
            .iter()
            .zip(&self.negated)
            .zip(x_packed)
            .all(|((&inc, &neg), &x)| (inc & !x) | (neg & x) == 0)
    }

    /// # Overview
    ///
    /// Scalar evaluation on unpacked input. Agrees with [`Self::evaluate`].
    ///
    /// `x` must hold exactly `n_features` values; validate it with
    /// [`check_example`](crate::literals::check_example) first.
    pub fn evaluate_literals(&self, x: &[u8]) -> bool {
        debug_assert_eq!(x.len(), self.n_features);

        x.iter().enumerate().all(|(k, &xk)| {
            let violates_pos = self.automata[2 * k].is_included() && xk == 0;
            let violates_neg = self.automata[2 * k + 1].is_included() && xk == 1;
            !(violates_pos || violates_neg)
        })
    }

    /// # Overview
    ///
    /// Returns polarity sign if fires, 0 otherwise.
    #[inline(always)]
    pub fn vote(&self, x_packed: &[u64]) -> i32 {
        if self.evaluate(x_packed) {
            self.polarity.sign()
        } else {
            0
        }
    }

    /// # Overview
    ///
    /// Applies one feedback round to every automaton of the team, then
    /// rebuilds the literal masks. `x` must hold exactly `n_features` values.
    pub fn team_feedback<R: Rng>(
        &mut self,
        x: &[u8],
        fires: bool,
        kind: FeedbackKind,
        params: &FeedbackParams,
        rng: &mut R
    ) {
        debug_assert_eq!(x.len(), self.n_features);

        match kind {
            FeedbackKind::TypeI => type_i(&mut self.automata, x, fires, params, rng),
            FeedbackKind::TypeII => type_ii(&mut self.automata, x, fires)
        }
        self.rebuild_masks();
    }

    /// # Overview
    ///
    /// Overwrites automaton states. `states` must hold 2*n_features values
    /// already checked to lie in [1, 2*n_states].
    pub(crate) fn load_states(&mut self, states: &[i16]) {
        debug_assert_eq!(states.len(), self.automata.len());
        for (a, &state) in self.automata.iter_mut().zip(states) {
            a.restore(state);
        }
        self.rebuild_masks();
    }

    pub(crate) fn rebuild_masks(&mut self) {
        self.include.fill(0);
        self.negated.fill(0);

        for k in 0..self.n_features {
            let bit = 1u64 << (k % 64);
            if self.automata[2 * k].is_included() {
                self.include[k / 64] |= bit;
            }
            if self.automata[2 * k + 1].is_included() {
                self.negated[k / 64] |= bit;
            }
        }
    }
}
