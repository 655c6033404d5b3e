//! # Tsetlin Engine
//!
//! Learning engine for the Tsetlin Machine: teams of finite-state automata
//! learn Boolean clauses over binary features, and polarity-signed clause
//! votes decide the class.
//!
//! # Features
//!
//! - `parallel` (default): clause evaluation and feedback on rayon
//! - `serde`: serialization of configs, rules and machine snapshots
//!
//! # Examples
//!
//! ```
//! use tsetlin_engine::{Config, TsetlinMachine};
//!
//! let config = Config::builder()
//!     .clauses(20)
//!     .features(2)
//!     .classes(2)
//!     .threshold(10)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut tm = TsetlinMachine::new(config).unwrap();
//!
//! tm.fit(&[1, 0], 1).unwrap();
//! tm.fit(&[0, 1], 0).unwrap();
//!
//! let label = tm.predict(&[1, 0]).unwrap();
//! assert!(label < 2);
//! ```

mod automaton;
mod clause;
mod config;
pub mod error;
pub mod feedback;
pub mod literals;
mod machine;
mod model;
pub mod pool;
mod rule;
mod shared;
pub mod utils;
pub mod vote;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use automaton::{Action, Automaton};
pub use clause::{Clause, Polarity};
pub use config::{Config, ConfigBuilder, MAX_STATES};
pub use error::{ConfigError, Error, Result};
#[cfg(feature = "serde")]
pub use machine::MachineState;
pub use machine::TsetlinMachine;
pub use model::Classifier;
pub use pool::ClassPool;
pub use rule::Rule;
pub use shared::SharedMachine;
