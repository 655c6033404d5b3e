//! Data-parallel inference over many examples using rayon.
//!
//! Inference is read-only, so examples are spread across threads while the
//! machine is shared by reference.

use rayon::prelude::*;

use crate::{
    TsetlinMachine,
    error::{Error, Result}
};

/// # Overview
///
/// Parallel prediction. Fails if any example is invalid.
pub fn predict_batch<R: Sync>(tm: &TsetlinMachine<R>, x: &[Vec<u8>]) -> Result<Vec<usize>> {
    x.par_iter().map(|xi| tm.predict(xi)).collect()
}

/// # Overview
///
/// Parallel accuracy over a labelled set.
pub fn evaluate_parallel<R: Sync>(
    tm: &TsetlinMachine<R>,
    x: &[Vec<u8>],
    y: &[usize]
) -> Result<f32> {
    if x.len() != y.len() {
        return Err(Error::LabelCountMismatch {
            examples: x.len(),
            labels:   y.len()
        });
    }
    if x.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let n_labels = tm.n_classes();
    let correct = x
        .par_iter()
        .zip(y.par_iter())
        .map(|(xi, &yi)| {
            if yi >= n_labels {
                return Err(Error::InvalidLabel {
                    label: yi,
                    n_labels
                });
            }
            Ok(usize::from(tm.predict(xi)? == yi))
        })
        .sum::<Result<usize>>()?;

    Ok(correct as f32 / x.len() as f32)
}
