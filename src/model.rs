//! The `fit` / `predict` contract consumed by external training loops.

use rand::Rng;

use crate::{TsetlinMachine, error::Result};

/// Online classifier over fixed-width binary examples.
///
/// Training loops, data loaders and bindings drive the engine through this
/// trait; they never touch clauses or automata directly.
///
/// # Example
///
/// ```
/// use tsetlin_engine::{Classifier, Config, TsetlinMachine};
///
/// fn train_epoch<C: Classifier>(model: &mut C, x: &[Vec<u8>], y: &[usize]) {
///     for (xi, &yi) in x.iter().zip(y) {
///         model.fit(xi, yi).unwrap();
///     }
/// }
///
/// let config = Config::builder().clauses(10).features(2).seed(3).build().unwrap();
/// let mut tm = TsetlinMachine::new(config).unwrap();
///
/// let x = vec![vec![0, 1], vec![1, 0]];
/// let y = vec![0, 1];
/// train_epoch(&mut tm, &x, &y);
/// assert_eq!(tm.predict_batch(&x).unwrap().len(), 2);
/// ```
pub trait Classifier {
    /// One training step on a single labelled example.
    fn fit(&mut self, x: &[u8], y: usize) -> Result<()>;

    /// Predicts the label of a single example.
    fn predict(&self, x: &[u8]) -> Result<usize>;

    /// Predicts every example, failing on the first invalid one.
    fn predict_batch(&self, xs: &[Vec<u8>]) -> Result<Vec<usize>> {
        xs.iter().map(|x| self.predict(x)).collect()
    }
}

impl<R: Rng> Classifier for TsetlinMachine<R> {
    fn fit(&mut self, x: &[u8], y: usize) -> Result<()> {
        TsetlinMachine::fit(self, x, y)
    }

    fn predict(&self, x: &[u8]) -> Result<usize> {
        TsetlinMachine::predict(self, x)
    }
}
