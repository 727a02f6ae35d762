//! Criterion benchmarks for u-compare resolution and adapters.
//!
//! Uses synthetic integer and string data to measure cascade overhead
//! against plain `Ord`, independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use u_compare::bulk::{distinct_indices, SortEngine};
use u_compare::{compare, hash_of, Comparable, Comparer, EqualityComparer, Shared};

// ===========================================================================
// Data
// ===========================================================================

fn shuffled(n: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut values: Vec<i64> = (0..n as i64).collect();
    values.shuffle(&mut rng);
    values
}

fn words(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| {
            let len = rng.random_range(1..6);
            (0..len)
                .map(|_| {
                    let c = rng.random_range(b'a'..=b'e') as char;
                    if rng.random_bool(0.5) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_compare_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_pair");
    let (a, b) = (17i64, 42i64);
    let (sa, sb) = (Shared::new(17i64), Shared::new(42i64));
    let boxed: (Box<dyn Comparable>, Box<dyn Comparable>) = (Box::new(17i64), Box::new(42i64));

    group.bench_function("ord", |bench| {
        bench.iter(|| black_box(&a).cmp(black_box(&b)))
    });
    group.bench_function("native", |bench| {
        bench.iter(|| compare(Some(black_box(&a)), Some(black_box(&b))))
    });
    group.bench_function("shared", |bench| {
        bench.iter(|| compare(Some(black_box(&sa)), Some(black_box(&sb))))
    });
    group.bench_function("trait_object", |bench| {
        bench.iter(|| {
            compare::<dyn Comparable, dyn Comparable>(
                Some(black_box(&*boxed.0)),
                Some(black_box(&*boxed.1)),
            )
        })
    });
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    group.sample_size(20);

    for &n in &[1_000usize, 10_000] {
        let values = shuffled(n);
        let descending = Comparer::<i64>::with_strategy(|a, b| b.cmp(a));
        let engine = SortEngine::new()
            .with_key(Comparer::<i64>::with_strategy(|a, b| (a % 10).cmp(&(b % 10))))
            .with_key(Comparer::new());

        group.bench_with_input(BenchmarkId::new("std", n), &values, |b, v| {
            b.iter(|| {
                let mut v = v.clone();
                v.sort_by(|x, y| y.cmp(x));
                black_box(v)
            })
        });
        group.bench_with_input(BenchmarkId::new("comparer", n), &values, |b, v| {
            b.iter(|| {
                let mut v = v.clone();
                v.sort_by(descending.as_fn());
                black_box(v)
            })
        });
        group.bench_with_input(BenchmarkId::new("two_keys", n), &values, |b, v| {
            b.iter(|| black_box(engine.sort_indices(black_box(v))))
        });
    }
    group.finish();
}

fn bench_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("distinct");
    group.sample_size(20);

    let case_blind = EqualityComparer::<String>::from_parts(
        Some(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
        Some(|s: &String| hash_of(&s.to_ascii_lowercase())),
    )
    .unwrap();

    for &n in &[1_000usize, 10_000] {
        let items = words(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(distinct_indices(black_box(items), &case_blind)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compare_pair, bench_sort, bench_distinct);
criterion_main!(benches);
