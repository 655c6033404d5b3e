//! Voting aggregation: class scores to a label.

/// # Overview
///
/// Index of the highest score. Ties go to the lowest index; an empty slice
/// yields 0.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::vote::argmax;
///
/// assert_eq!(argmax(&[3, 7, 7, -1]), 1);
/// assert_eq!(argmax(&[0, 0, 0]), 0);
/// ```
#[inline]
pub fn argmax(scores: &[i32]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

/// # Overview
///
/// Binary decision: 1 iff the score is strictly positive.
#[inline(always)]
pub fn binary_decision(score: i32) -> usize {
    usize::from(score > 0)
}

/// # Overview
///
/// Label from per-pool scores: binary decision for a single pool, argmax
/// otherwise.
#[inline]
pub fn decide(scores: &[i32]) -> usize {
    match scores {
        [score] => binary_decision(*score),
        _ => argmax(scores)
    }
}
