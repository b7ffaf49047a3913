use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use setenrich::set::gene_set;
use setenrich::{background_pvalue, multi_set_pvalues, BatchConfig, SetCollection, Universe};

fn universe() -> Universe {
    (0..20_000).map(|i| format!("GENE{i}")).collect()
}

fn collection(prefix: &str, count: usize, size: usize, offset: usize) -> SetCollection {
    SetCollection::positional(
        prefix,
        (0..count).map(|i| gene_set((0..size).map(|j| format!("GENE{}", offset + i * 37 + j * 11)))),
    )
}

/// Background estimates of all pairs, each with its own seeded random generator
fn parallel_background(
    references: &SetCollection,
    queries: &SetCollection,
    universe: &Universe,
    repeats: u32,
) -> f64 {
    let pairs: Vec<_> = references
        .iter()
        .flat_map(|reference| queries.iter().map(move |query| (reference, query)))
        .collect();
    pairs
        .par_iter()
        .enumerate()
        .map(|(idx, ((_, reference), (_, query)))| {
            let mut rng = StdRng::seed_from_u64(idx as u64);
            background_pvalue(query.len(), universe, reference, repeats, &mut rng)
                .expect("valid parameters")
        })
        .sum()
}

fn enrichment_benchmark(c: &mut Criterion) {
    let universe = universe();
    let references = collection("ref", 4, 500, 0);
    let queries = collection("que", 10, 200, 3_000);
    let config = BatchConfig::default().with_repeats(100).with_seed(42);

    c.bench_function("batch 4x10", |b| {
        b.iter(|| {
            multi_set_pvalues(
                black_box(&references),
                black_box(&queries),
                black_box(&universe),
                &config,
            )
        })
    });

    c.bench_function("background-parallel 4x10", |b| {
        b.iter(|| {
            parallel_background(
                black_box(&references),
                black_box(&queries),
                black_box(&universe),
                100,
            )
        })
    });
}

criterion_group!(enrichment, enrichment_benchmark);
criterion_main!(enrichment);
