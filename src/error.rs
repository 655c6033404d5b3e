//! Error types for the Tsetlin engine.
//!
//! Every error is detected before any automaton is touched, so a rejected
//! call never leaves the machine partially updated.

use thiserror::Error;

/// # Overview
///
/// Reasons a [`Config`](crate::Config) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("n_clauses is required and must be > 0")]
    MissingClauses,
    #[error("n_clauses must be even")]
    OddClauses,
    #[error("n_features is required and must be > 0")]
    MissingFeatures,
    #[error("n_classes must be > 0")]
    MissingClasses,
    #[error("s must be finite and > 1.0")]
    InvalidSpecificity,
    #[error("threshold must be > 0")]
    InvalidThreshold,
    #[error("n_states must be in 1..=16383")]
    InvalidStates
}

/// # Overview
///
/// Errors that can occur when building or using a Tsetlin Machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("shape mismatch: expected {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("feature {index} is {value}, expected 0 or 1")]
    InvalidFeature { index: usize, value: u8 },

    #[error("label {label} out of range, expected 0..{n_labels}")]
    InvalidLabel { label: usize, n_labels: usize },

    #[error("state length mismatch: expected {expected}, got {got}")]
    StateLength { expected: usize, got: usize },

    #[error("state {state} outside 1..={max}")]
    InvalidState { state: i16, max: i16 },

    #[error("automaton {index} has state {state} outside the valid range")]
    StateOutOfRange { index: usize, state: i16 },

    #[error("dataset cannot be empty")]
    EmptyDataset,

    #[error("{examples} examples but {labels} labels")]
    LabelCountMismatch { examples: usize, labels: usize },

    #[error("machine lock poisoned by a panicking writer")]
    Poisoned
}

/// # Overview
///
/// Result type for Tsetlin Machine operations.
pub type Result<T> = core::result::Result<T, Error>;
