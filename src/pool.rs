//! Class pool - the polarity-split clause team of one class.
//!
//! Clause evaluation and feedback are independent across clauses: each
//! clause reads the shared input and mutates only its own automata. With the
//! `parallel` feature large pools are processed on the rayon thread pool;
//! collecting the evaluation results is the barrier before feedback.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    Clause, Polarity,
    error::Result,
    feedback::{FeedbackParams, PoolRole, route, selection_probability},
    utils::{bernoulli, rng_from_seed, sub_seeds}
};

/// Pools smaller than this are processed on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_CLAUSES: usize = 128;

/// # Overview
///
/// Clause pool of one class. Clause `i` is positive for even `i` and
/// negative for odd `i`, so the pool is split evenly between polarities.
#[derive(Debug, Clone)]
pub struct ClassPool {
    clauses: Vec<Clause>
}

impl ClassPool {
    pub fn new(n_clauses: usize, n_features: usize, n_states: i16) -> Result<Self> {
        let clauses = (0..n_clauses)
            .map(|i| Clause::new(n_features, n_states, Polarity::alternating(i)))
            .collect::<Result<_>>()?;
        Ok(Self { clauses })
    }

    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// # Overview
    ///
    /// Output of every clause on packed input.
    pub fn evaluate(&self, x_packed: &[u64]) -> Vec<bool> {
        #[cfg(feature = "parallel")]
        if self.clauses.len() >= PARALLEL_MIN_CLAUSES {
            return self
                .clauses
                .par_iter()
                .map(|c| c.evaluate(x_packed))
                .collect();
        }

        self.clauses.iter().map(|c| c.evaluate(x_packed)).collect()
    }

    /// # Overview
    ///
    /// Polarity-signed sum of firing clauses.
    pub fn score(&self, x_packed: &[u64]) -> i32 {
        #[cfg(feature = "parallel")]
        if self.clauses.len() >= PARALLEL_MIN_CLAUSES {
            return self.clauses.par_iter().map(|c| c.vote(x_packed)).sum();
        }

        self.clauses.iter().map(|c| c.vote(x_packed)).sum()
    }

    /// # Overview
    ///
    /// Score from already computed clause outputs.
    pub fn score_outputs(&self, outputs: &[bool]) -> i32 {
        self.clauses
            .iter()
            .zip(outputs)
            .filter(|&(_, &fires)| fires)
            .map(|(c, _)| c.polarity().sign())
            .sum()
    }

    /// # Overview
    ///
    /// One feedback round over the pool.
    ///
    /// `outputs` are the clause outputs computed before any mutation and
    /// `score` the pool's unclamped vote sum. One sub-seed per clause is
    /// drawn from `rng` up front; each clause then draws its selection and
    /// per-automaton trials from its own generator.
    #[allow(clippy::too_many_arguments)]
    pub fn feedback<R: Rng>(
        &mut self,
        x: &[u8],
        outputs: &[bool],
        role: PoolRole,
        score: i32,
        threshold: f32,
        params: &FeedbackParams,
        rng: &mut R
    ) {
        debug_assert_eq!(outputs.len(), self.clauses.len());

        let prob = selection_probability(role, score, threshold);
        let seeds = sub_seeds(rng, self.clauses.len());

        let update = |clause: &mut Clause, fires: bool, seed: u64| {
            let mut clause_rng = rng_from_seed(seed);
            if !bernoulli(&mut clause_rng, prob) {
                return;
            }
            if let Some(kind) = route(role, clause.polarity(), fires) {
                clause.team_feedback(x, fires, kind, params, &mut clause_rng);
            }
        };

        #[cfg(feature = "parallel")]
        if self.clauses.len() >= PARALLEL_MIN_CLAUSES {
            self.clauses
                .par_iter_mut()
                .zip(outputs.par_iter())
                .zip(seeds.par_iter())
                .for_each(|((clause, &fires), &seed)| update(clause, fires, seed));
            return;
        }

        for ((clause, &fires), &seed) in self.clauses.iter_mut().zip(outputs).zip(&seeds) {
            update(clause, fires, seed);
        }
    }

    /// # Overview
    ///
    /// Appends automaton states, clause by clause, to `out`.
    pub(crate) fn export_states(&self, out: &mut Vec<i16>) {
        for clause in &self.clauses {
            out.extend(clause.automata().iter().map(|a| a.state()));
        }
    }

    /// # Overview
    ///
    /// Loads pre-validated states laid out as by [`Self::export_states`].
    pub(crate) fn load_states(&mut self, states: &[i16]) {
        let stride = states.len() / self.clauses.len().max(1);
        for (clause, chunk) in self.clauses.iter_mut().zip(states.chunks_exact(stride)) {
            clause.load_states(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literals::pack_input;

    #[test]
    fn alternating_polarity() {
        let pool = ClassPool::new(4, 2, 100).unwrap();
        let polarities: Vec<_> = pool.clauses().iter().map(|c| c.polarity()).collect();
        assert_eq!(
            polarities,
            vec![
                Polarity::Positive,
                Polarity::Negative,
                Polarity::Positive,
                Polarity::Negative
            ]
        );
    }

    #[test]
    fn fresh_pool_scores_zero() {
        let pool = ClassPool::new(10, 3, 100).unwrap();
        let x = pack_input(&[1, 0, 1]);

        assert!(pool.evaluate(&x).iter().all(|&fires| fires));
        assert_eq!(pool.score(&x), 0);
    }

    #[test]
    fn score_outputs_matches_score() {
        let mut pool = ClassPool::new(8, 3, 5).unwrap();
        let params = FeedbackParams::from_specificity(3.0);
        let mut rng = rng_from_seed(3);
        let x = [1, 0, 1];
        let packed = pack_input(&x);

        for _ in 0..20 {
            let outputs = pool.evaluate(&packed);
            let score = pool.score_outputs(&outputs);
            pool.feedback(&x, &outputs, PoolRole::Target, score, 5.0, &params, &mut rng);
        }

        for probe in [[0, 0, 0], [1, 0, 1], [0, 1, 1]] {
            let packed = pack_input(&probe);
            assert_eq!(pool.score(&packed), pool.score_outputs(&pool.evaluate(&packed)));
        }
    }

    #[test]
    fn saturated_target_receives_no_feedback() {
        let mut pool = ClassPool::new(6, 2, 10).unwrap();
        let params = FeedbackParams::from_specificity(3.0);
        let mut rng = rng_from_seed(11);
        let x = [1, 0];
        let outputs = pool.evaluate(&pack_input(&x));

        pool.feedback(&x, &outputs, PoolRole::Target, 50, 10.0, &params, &mut rng);

        let mut states = Vec::new();
        pool.export_states(&mut states);
        assert!(states.iter().all(|&s| s == 10));
    }

    #[test]
    fn export_load_roundtrip() {
        let mut pool = ClassPool::new(4, 2, 10).unwrap();
        let states: Vec<i16> = (0..16).map(|i| (i % 20 + 1) as i16).collect();
        pool.load_states(&states);

        let mut exported = Vec::new();
        pool.export_states(&mut exported);
        assert_eq!(exported, states);
    }
}
