//! Benchmarks for the numeric algorithms.
//!
//! Includes:
//! - Continued-fraction collapse at increasing depth and precision
//! - Nested radicals
//! - Polynomial evaluation over a point range

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ramanujan_algorithms::polynomial::{evaluate_at, XArg};
use ramanujan_algorithms::{continued_fraction, nested_radical};
use ramanujan_precision::{Number, Precision};

fn integers(values: impl IntoIterator<Item = i64>, precision: Precision) -> Vec<Number> {
    values
        .into_iter()
        .map(|v| Number::from_i64(v, precision.working_digits()))
        .collect()
}

/// Benchmark the continued fraction of e, `3 - 1/(4 - 2/(5 - ...))`.
fn bench_continued_fraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("continued_fraction_e");

    for (depth, digits) in [(50, 15), (200, 15), (200, 50), (400, 100)] {
        let precision = Precision::new(digits);
        let a = integers(3..3 + depth, precision);
        let b = integers((1..depth).map(|k| -k), precision);

        group.bench_with_input(
            BenchmarkId::new(format!("{digits}_digits"), depth),
            &depth,
            |bench, _| bench.iter(|| black_box(continued_fraction(&a, Some(&b), precision))),
        );
    }

    group.finish();
}

/// Benchmark nested radicals of ones, which converge to phi.
fn bench_nested_radical(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_radical");

    for depth in [50, 200] {
        let precision = Precision::new(30);
        let ones = integers(std::iter::repeat(1).take(depth), precision);

        group.bench_with_input(BenchmarkId::new("ones", depth), &depth, |bench, _| {
            bench.iter(|| black_box(nested_radical(&ones, &ones, precision)));
        });
    }

    group.finish();
}

/// Benchmark evaluating `1 + 2x + 3x^2` at every point of a range.
fn bench_polynomial_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial_range");

    for end in [100, 1000] {
        let precision = Precision::DEFAULT;
        let x = XArg::range(0, end, precision);

        group.bench_with_input(BenchmarkId::new("quadratic", end), &end, |bench, _| {
            bench.iter(|| black_box(evaluate_at(&[1, 2, 3], &x, precision)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_continued_fraction,
    bench_nested_radical,
    bench_polynomial_range
);
criterion_main!(benches);
