//! Benchmarks for Tsetlin engine operations.

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tsetlin_engine::{
    Clause, Config, Polarity, TsetlinMachine, feedback, literals::pack_input,
    utils::rng_from_seed
};

fn alternating(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 2) as u8).collect()
}

fn dataset(n_examples: usize, n_features: usize) -> (Vec<Vec<u8>>, Vec<usize>) {
    let x = (0..n_examples)
        .map(|i| (0..n_features).map(|j| ((i + j) % 2) as u8).collect())
        .collect();
    let y = (0..n_examples).map(|i| i % 2).collect();
    (x, y)
}

fn bench_clause_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("clause_evaluate");

    for n_features in [16, 64, 256, 1024] {
        let clause = Clause::new(n_features, 100, Polarity::Positive).unwrap();
        let x = alternating(n_features);
        let packed = pack_input(&x);

        group.bench_with_input(BenchmarkId::new("packed", n_features), &n_features, |b, _| {
            b.iter(|| black_box(clause.evaluate(black_box(&packed))));
        });
        group.bench_with_input(BenchmarkId::new("scalar", n_features), &n_features, |b, _| {
            b.iter(|| black_box(clause.evaluate_literals(black_box(&x))));
        });
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for n_clauses in [10, 50, 100, 200] {
        let config = Config::builder()
            .clauses(n_clauses)
            .features(64)
            .seed(42)
            .build()
            .unwrap();
        let tm = TsetlinMachine::new(config).unwrap();
        let x = alternating(64);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_clauses),
            &n_clauses,
            |b, _| {
                b.iter(|| black_box(tm.predict(black_box(&x))));
            }
        );
    }

    group.finish();
}

fn bench_fit_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_step");

    for n_clauses in [50, 200, 512] {
        let config = Config::builder()
            .clauses(n_clauses)
            .features(64)
            .seed(42)
            .build()
            .unwrap();
        let (x, y) = dataset(100, 64);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_clauses),
            &n_clauses,
            |b, _| {
                let mut tm = TsetlinMachine::new(config).unwrap();
                b.iter(|| {
                    for (xi, &yi) in x.iter().zip(&y) {
                        tm.fit(black_box(xi), black_box(yi)).unwrap();
                    }
                });
            }
        );
    }

    group.finish();
}

fn bench_multiclass_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiclass_predict");

    for n_classes in [3, 5, 10] {
        let config = Config::builder()
            .clauses(50)
            .features(64)
            .classes(n_classes)
            .seed(25)
            .build()
            .unwrap();
        let tm = TsetlinMachine::new(config).unwrap();
        let x = alternating(64);

        group.bench_with_input(
            BenchmarkId::from_parameter(n_classes),
            &n_classes,
            |b, _| {
                b.iter(|| black_box(tm.predict(black_box(&x))));
            }
        );
    }

    group.finish();
}

fn bench_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("feedback");
    let params = feedback::FeedbackParams::from_specificity(3.9);

    for n_features in [64, 256, 1024] {
        let x = alternating(n_features);

        group.bench_with_input(
            BenchmarkId::new("type_i", n_features),
            &n_features,
            |b, &n| {
                let mut clause = Clause::new(n, 100, Polarity::Positive).unwrap();
                let mut rng = rng_from_seed(42);
                b.iter(|| {
                    clause.team_feedback(
                        black_box(&x),
                        true,
                        feedback::FeedbackKind::TypeI,
                        &params,
                        &mut rng
                    );
                });
            }
        );

        group.bench_with_input(
            BenchmarkId::new("type_ii", n_features),
            &n_features,
            |b, &n| {
                let mut clause = Clause::new(n, 100, Polarity::Negative).unwrap();
                let mut rng = rng_from_seed(42);
                b.iter(|| {
                    clause.team_feedback(
                        black_box(&x),
                        true,
                        feedback::FeedbackKind::TypeII,
                        &params,
                        &mut rng
                    );
                });
            }
        );
    }

    group.finish();
}

fn bench_rule_extraction(c: &mut Criterion) {
    let config = Config::builder()
        .clauses(100)
        .features(64)
        .seed(42)
        .build()
        .unwrap();
    let mut tm = TsetlinMachine::new(config).unwrap();

    let (x, y) = dataset(100, 64);
    for _ in 0..20 {
        for (xi, &yi) in x.iter().zip(&y) {
            tm.fit(xi, yi).unwrap();
        }
    }

    c.bench_function("rule_extraction_100_clauses", |b| {
        b.iter(|| black_box(tm.rules()));
    });
}

#[cfg(feature = "parallel")]
fn bench_predict_batch(c: &mut Criterion) {
    let config = Config::builder()
        .clauses(100)
        .features(64)
        .seed(42)
        .build()
        .unwrap();
    let tm = TsetlinMachine::new(config).unwrap();
    let (x, _) = dataset(1000, 64);

    c.bench_function("predict_batch_1000", |b| {
        b.iter(|| black_box(tsetlin_engine::parallel::predict_batch(&tm, black_box(&x))));
    });
}

#[cfg(not(feature = "parallel"))]
fn bench_predict_batch(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_clause_evaluate,
    bench_predict,
    bench_fit_step,
    bench_multiclass_predict,
    bench_feedback,
    bench_rule_extraction,
    bench_predict_batch
);
criterion_main!(benches);
