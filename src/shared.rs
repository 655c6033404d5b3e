//! Thread-safe handle enforcing a single writer and many readers.

use std::sync::{Arc, RwLock};

use rand::Rng;

use crate::{
    Classifier, TsetlinMachine,
    error::{Error, Result},
    utils::FastRng
};

/// # Overview
///
/// Shared [`TsetlinMachine`] behind a read-write lock.
///
/// `fit` holds the write lock for the whole training step; `predict` and
/// the other read operations hold read locks and may run concurrently with
/// each other, never with a training step. Clones share the same machine.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use tsetlin_engine::{Config, SharedMachine, TsetlinMachine};
///
/// let config = Config::builder().clauses(10).features(2).seed(7).build().unwrap();
/// let shared = SharedMachine::new(TsetlinMachine::new(config).unwrap());
///
/// let reader = shared.clone();
/// let handle = thread::spawn(move || reader.predict(&[1, 0]).unwrap());
///
/// shared.fit(&[1, 0], 1).unwrap();
/// assert!(handle.join().unwrap() < 2);
/// ```
#[derive(Debug)]
pub struct SharedMachine<R = FastRng> {
    inner: Arc<RwLock<TsetlinMachine<R>>>
}

impl<R> Clone for SharedMachine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner)
        }
    }
}

impl<R> SharedMachine<R> {
    pub fn new(machine: TsetlinMachine<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(machine))
        }
    }

    /// # Overview
    ///
    /// Predicts under a read lock.
    pub fn predict(&self, x: &[u8]) -> Result<usize> {
        self.read(|tm| tm.predict(x))
    }

    /// # Overview
    ///
    /// Class scores under a read lock.
    pub fn class_scores(&self, x: &[u8]) -> Result<Vec<i32>> {
        self.read(|tm| tm.class_scores(x))
    }

    /// # Overview
    ///
    /// Consistent snapshot of all automaton states.
    pub fn export_state(&self) -> Result<Vec<i16>> {
        self.read(|tm| Ok(tm.export_state()))
    }

    /// # Overview
    ///
    /// Replaces all automaton states under the write lock.
    pub fn import_state(&self, states: &[i16]) -> Result<()> {
        self.write(|tm| tm.import_state(states))
    }

    /// Runs `f` with shared access to the machine.
    pub fn read<T>(&self, f: impl FnOnce(&TsetlinMachine<R>) -> Result<T>) -> Result<T> {
        let guard = self.inner.read().map_err(|_| Error::Poisoned)?;
        f(&*guard)
    }

    /// Runs `f` with exclusive access to the machine.
    pub fn write<T>(&self, f: impl FnOnce(&mut TsetlinMachine<R>) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| Error::Poisoned)?;
        f(&mut *guard)
    }
}

impl<R: Rng> SharedMachine<R> {
    /// # Overview
    ///
    /// One training step under the write lock.
    pub fn fit(&self, x: &[u8], y: usize) -> Result<()> {
        self.write(|tm| tm.fit(x, y))
    }
}

impl<R: Rng> Classifier for SharedMachine<R> {
    fn fit(&mut self, x: &[u8], y: usize) -> Result<()> {
        SharedMachine::fit(self, x, y)
    }

    fn predict(&self, x: &[u8]) -> Result<usize> {
        SharedMachine::predict(self, x)
    }
}
