//! Tsetlin Automaton - the atomic unit of memory.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::MAX_STATES,
    error::{ConfigError, Error, Result}
};

/// # Overview
///
/// Action taken by an automaton for its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Include,
    Exclude
}

/// # Overview
///
/// A single Tsetlin Automaton with states from 1 to 2*n_states.
/// States 1..=n_states exclude the literal, states
/// (n_states+1)..=2*n_states include it.
///
/// The action is never stored; it is always derived from the state.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::{Action, Automaton};
///
/// let mut automaton = Automaton::new(100).unwrap();
/// assert_eq!(automaton.action(), Action::Exclude);
///
/// automaton.observe(true);
/// assert_eq!(automaton.action(), Action::Include);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Automaton {
    state:    i16,
    n_states: i16
}

impl Automaton {
    /// # Overview
    ///
    /// Creates automaton at the boundary (last exclude state).
    ///
    /// `n_states` must lie in `1..=MAX_STATES`.
    #[inline]
    pub fn new(n_states: i16) -> Result<Self> {
        Self::with_state(n_states, n_states)
    }

    /// # Overview
    ///
    /// Creates automaton with specific initial state in `[1, 2*n_states]`.
    #[inline]
    pub fn with_state(state: i16, n_states: i16) -> Result<Self> {
        if !(1..=MAX_STATES).contains(&n_states) {
            return Err(ConfigError::InvalidStates.into());
        }
        if !(1..=2 * n_states).contains(&state) {
            return Err(Error::InvalidState {
                state,
                max: 2 * n_states
            });
        }
        Ok(Self {
            state,
            n_states
        })
    }

    /// Overwrites the state with a value already checked against
    /// `[1, 2*n_states]`.
    #[inline]
    pub(crate) fn restore(&mut self, state: i16) {
        debug_assert!((1..=2 * self.n_states).contains(&state));
        self.state = state;
    }

    /// # Overview
    ///
    /// Current action, a pure function of the state.
    #[inline]
    pub fn action(&self) -> Action {
        if self.is_included() {
            Action::Include
        } else {
            Action::Exclude
        }
    }

    /// # Overview
    ///
    /// Returns true if state > n_states (include literal).
    #[inline(always)]
    pub fn is_included(&self) -> bool {
        self.state > self.n_states
    }

    #[inline(always)]
    pub fn state(&self) -> i16 {
        self.state
    }

    #[inline(always)]
    pub fn n_states(&self) -> i16 {
        self.n_states
    }

    /// # Overview
    ///
    /// Reward moves toward include, penalty toward exclude. Saturates at
    /// both ends.
    #[inline]
    pub fn observe(&mut self, reward: bool) {
        if reward {
            self.increment();
        } else {
            self.decrement();
        }
    }

    /// # Overview
    ///
    /// Increments state. Capped at 2*n_states.
    #[inline(always)]
    pub fn increment(&mut self) {
        if self.state < 2 * self.n_states {
            self.state += 1;
        }
    }

    /// # Overview
    ///
    /// Decrements state. Floored at 1.
    #[inline(always)]
    pub fn decrement(&mut self) {
        if self.state > 1 {
            self.state -= 1;
        }
    }
}
