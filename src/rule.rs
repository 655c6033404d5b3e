//! Rule extraction for interpretability.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Clause, Polarity};

/// # Overview
///
/// A human-readable rule extracted from a clause.
///
/// Represents a conjunction: `(x[i1] AND x[i2] AND NOT x[j1] AND NOT x[j2])`
/// voting for or against `class`.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::{Config, Rule, TsetlinMachine};
///
/// let config = Config::builder().clauses(4).features(3).seed(1).build().unwrap();
/// let tm = TsetlinMachine::new(config).unwrap();
///
/// let rules = tm.rules();
/// assert_eq!(rules.len(), 8);
/// assert!(rules.iter().all(Rule::is_empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    pub class:    usize,
    pub included: Vec<usize>,
    pub negated:  Vec<usize>,
    pub polarity: Polarity
}

impl Rule {
    /// # Overview
    ///
    /// Extracts rule from a clause of the given class pool.
    pub fn from_clause(class: usize, clause: &Clause) -> Self {
        let mut included = Vec::new();
        let mut negated = Vec::new();
        let automata = clause.automata();

        for k in 0..clause.n_features() {
            if automata[2 * k].is_included() {
                included.push(k);
            }
            if automata[2 * k + 1].is_included() {
                negated.push(k);
            }
        }

        Self {
            class,
            included,
            negated,
            polarity: clause.polarity()
        }
    }

    /// # Overview
    ///
    /// Returns true if rule has no active literals (matches everything).
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.negated.is_empty()
    }

    /// # Overview
    ///
    /// Returns number of active literals.
    pub fn complexity(&self) -> usize {
        self.included.len() + self.negated.len()
    }

    /// # Overview
    ///
    /// True when some feature appears both plain and negated, so the rule
    /// can never fire.
    pub fn is_contradiction(&self) -> bool {
        self.included.iter().any(|k| self.negated.contains(k))
    }
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = match self.polarity {
            Polarity::Positive => "+",
            Polarity::Negative => "-"
        };

        if self.is_empty() {
            return write!(f, "{sign} TRUE");
        }

        let parts: Vec<String> = self
            .included
            .iter()
            .map(|i| format!("x[{i}]"))
            .chain(self.negated.iter().map(|i| format!("NOT x[{i}]")))
            .collect();

        write!(f, "{sign} ({})", parts.join(" AND "))
    }
}
