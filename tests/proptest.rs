//! Property-based tests for the Tsetlin engine.

use proptest::prelude::*;
use tsetlin_engine::{
    Automaton, Clause, Config, ConfigError, Error, Polarity, TsetlinMachine, literals::pack_input
};

fn binary_vec(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=1, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Automaton state stays within bounds after any sequence of observations.
    #[test]
    fn automaton_state_bounds(
        n_states in 1i16..200,
        rewards in prop::collection::vec(any::<bool>(), 0..1000)
    ) {
        let mut a = Automaton::new(n_states).unwrap();

        for reward in rewards {
            a.observe(reward);
            prop_assert!(a.state() >= 1);
            prop_assert!(a.state() <= 2 * n_states);
        }
    }

    /// Action is a pure function of state.
    #[test]
    fn action_depends_only_on_state(
        n_states in 1i16..100,
        steps_a in prop::collection::vec(any::<bool>(), 0..300),
        steps_b in prop::collection::vec(any::<bool>(), 0..300)
    ) {
        let mut a = Automaton::new(n_states).unwrap();
        let mut b = Automaton::new(n_states).unwrap();
        steps_a.into_iter().for_each(|r| a.observe(r));
        steps_b.into_iter().for_each(|r| b.observe(r));

        if a.state() == b.state() {
            prop_assert_eq!(a.action(), b.action());
        }
        prop_assert_eq!(a.is_included(), a.state() > n_states);
    }

    /// Empty clause (no active literals) always fires.
    #[test]
    fn empty_clause_always_fires(input in binary_vec(1..200)) {
        let clause = Clause::new(input.len(), 100, Polarity::Positive).unwrap();

        prop_assert!(clause.evaluate(&pack_input(&input)));
        prop_assert!(clause.evaluate_literals(&input));
    }

    /// Packed and scalar evaluation agree on trained clauses.
    #[test]
    fn packed_matches_scalar(
        n_features in 1usize..100,
        seed in 0u64..1000,
        probes in prop::collection::vec(binary_vec(100), 1..8)
    ) {
        let config = Config::builder()
            .clauses(4)
            .features(n_features)
            .states(5)
            .classes(1)
            .threshold(2)
            .seed(seed)
            .build()
            .unwrap();
        let mut tm = TsetlinMachine::new(config).unwrap();

        for probe in &probes {
            tm.fit(&probe[..n_features], usize::from(probe[0] == 1)).unwrap();
        }

        for probe in &probes {
            let x = &probe[..n_features];
            let packed = pack_input(x);
            for clause in tm.pools()[0].clauses() {
                prop_assert_eq!(clause.evaluate(&packed), clause.evaluate_literals(x));
            }
        }
    }

    /// Prediction is always a valid label.
    #[test]
    fn prediction_in_range(
        n_clauses in (1usize..10).prop_map(|n| n * 2),
        n_classes in 1usize..6,
        input in binary_vec(2..16)
    ) {
        let config = Config::builder()
            .clauses(n_clauses)
            .features(input.len())
            .classes(n_classes)
            .seed(0)
            .build()
            .unwrap();
        let tm = TsetlinMachine::new(config).unwrap();

        let pred = tm.predict(&input).unwrap();
        prop_assert!(pred < tm.n_classes());
    }

    /// Training keeps every automaton in bounds.
    #[test]
    fn training_keeps_states_in_bounds(
        n_features in 2usize..8,
        n_classes in 1usize..4,
        seed in 0u64..1000
    ) {
        let config = Config::builder()
            .clauses(10)
            .features(n_features)
            .classes(n_classes)
            .states(3)
            .threshold(3)
            .seed(seed)
            .build()
            .unwrap();
        let mut tm = TsetlinMachine::new(config).unwrap();
        let n_labels = tm.n_classes();

        for i in 0..40 {
            let x: Vec<u8> = (0..n_features).map(|j| ((i + j) % 2) as u8).collect();
            tm.fit(&x, i % n_labels).unwrap();
        }

        prop_assert!(tm.export_state().iter().all(|&s| (1..=6).contains(&s)));
    }

    /// Same seed produces same results.
    #[test]
    fn deterministic_training(seed in 0u64..1000) {
        let config = Config::builder()
            .clauses(10)
            .features(2)
            .classes(3)
            .seed(seed)
            .build()
            .unwrap();

        let x = [[0, 0], [0, 1], [1, 0], [1, 1]];
        let y = [0, 1, 2, 0];

        let mut tm1 = TsetlinMachine::new(config).unwrap();
        let mut tm2 = TsetlinMachine::new(config).unwrap();

        for _ in 0..20 {
            for (xi, &yi) in x.iter().zip(&y) {
                tm1.fit(xi, yi).unwrap();
                tm2.fit(xi, yi).unwrap();
            }
        }

        prop_assert_eq!(tm1.export_state(), tm2.export_state());
        for xi in &x {
            prop_assert_eq!(tm1.predict(xi).unwrap(), tm2.predict(xi).unwrap());
        }
    }

    /// Rejected calls never change state.
    #[test]
    fn rejected_fit_is_atomic(
        seed in 0u64..1000,
        width in 0usize..10
    ) {
        prop_assume!(width != 4);
        let config = Config::builder()
            .clauses(6)
            .features(4)
            .seed(seed)
            .build()
            .unwrap();
        let mut tm = TsetlinMachine::new(config).unwrap();
        tm.fit(&[1, 0, 1, 0], 1).unwrap();
        let before = tm.export_state();

        let result = tm.fit(&vec![1u8; width], 0);

        prop_assert_eq!(result, Err(Error::ShapeMismatch { expected: 4, got: width }));
        prop_assert_eq!(tm.export_state(), before);
    }

    /// Config validation works correctly.
    #[test]
    fn config_validation(
        n_clauses in 1usize..100,
        n_features in 0usize..50,
        s in 0.5f32..5.0,
        threshold in -5i32..50
    ) {
        let result = Config::builder()
            .clauses(n_clauses)
            .features(n_features)
            .specificity(s)
            .threshold(threshold)
            .build();

        if n_clauses % 2 != 0 {
            prop_assert_eq!(result, Err(Error::InvalidConfiguration(ConfigError::OddClauses)));
        } else if n_features == 0 {
            prop_assert_eq!(result, Err(Error::InvalidConfiguration(ConfigError::MissingFeatures)));
        } else if s <= 1.0 {
            prop_assert_eq!(result, Err(Error::InvalidConfiguration(ConfigError::InvalidSpecificity)));
        } else if threshold <= 0 {
            prop_assert_eq!(result, Err(Error::InvalidConfiguration(ConfigError::InvalidThreshold)));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
