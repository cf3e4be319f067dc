// Semantic scorer benchmarks.
// Critical paths:
// - crates/core/src/vector.rs (cosine/centroid/project_onto)
// - crates/core/src/scorer.rs (similarity/midpoint_score/cluster_heat/rarity)
// - crates/core/src/embedding/mod.rs (EmbeddingService cache hit/miss)

use std::sync::Arc;

use brainprint_core::embedding::{EmbeddingService, MockEmbeddingProvider};
use brainprint_core::scorer::SemanticScorer;
use brainprint_core::vector;
use brainprint_shared::EmbeddingProvider;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn scorer(dim: usize, cache_capacity: usize) -> SemanticScorer {
    let provider: Arc<dyn EmbeddingProvider> = Arc::new(MockEmbeddingProvider::new(dim));
    SemanticScorer::new(Arc::new(EmbeddingService::new(provider, cache_capacity)))
}

fn cosine_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_cosine");
    for dim in &[16usize, 128, 300] {
        let a: Vec<f64> = (0..*dim).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..*dim).map(|i| (i as f64 * 0.61).cos()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |bch, _| {
            bch.iter(|| black_box(vector::cosine(&a, &b).unwrap()));
        });
    }
    group.finish();
}

fn centroid_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_centroid");
    for count in &[5usize, 25, 100] {
        let vectors: Vec<Vec<f64>> = (0..*count)
            .map(|n| (0..64).map(|i| ((n * 7 + i) as f64 * 0.11).sin()).collect())
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |bch, _| {
            bch.iter(|| black_box(vector::centroid(&vectors).unwrap()));
        });
    }
    group.finish();
}

fn similarity_cache_hit_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let s = scorer(300, 10_000);

    // Warm the cache: every later call in this benchmark hits it.
    runtime.block_on(async {
        s.similarity("cat", "dog", "en").await.unwrap();
    });

    c.bench_function("scorer_similarity_cache_hit", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(s.similarity("cat", "dog", "en").await.unwrap());
        });
    });
}

fn similarity_cache_miss_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("scorer_similarity_cache_miss", |b| {
        let mut counter = 0u64;
        b.to_async(&runtime).iter(|| {
            counter += 1;
            let s = scorer(300, 10_000);
            let word_a = format!("word_a_{counter}");
            let word_b = format!("word_b_{counter}");
            async move {
                black_box(s.similarity(&word_a, &word_b, "en").await.unwrap());
            }
        });
    });
}

fn midpoint_score_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let s = scorer(300, 10_000);

    c.bench_function("scorer_midpoint_score", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(s.midpoint_score("bridge", "ocean", "mountain", "en").await.unwrap());
        });
    });
}

fn cluster_heat_ranking_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let s = scorer(128, 10_000);
    let words: Vec<String> = (0..50).map(|i| format!("word{i}")).collect();

    let mut group = c.benchmark_group("scorer_rank_by_cluster_heat");
    group.bench_function("50_words", |b| {
        b.to_async(&runtime).iter(|| async {
            let center = s.cluster_center(&words, "en").await.unwrap();
            black_box(s.rank_by_cluster_heat(&words, &center, "en").await.unwrap());
        });
    });
    group.finish();
}

fn rarity_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let s = scorer(64, 10_000);

    c.bench_function("scorer_rarity_with_pattern", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(s.rarity("cat", Some("CVC"), "en").await.unwrap());
        });
    });
}

criterion_group!(
    benches,
    cosine_benchmark,
    centroid_benchmark,
    similarity_cache_hit_benchmark,
    similarity_cache_miss_benchmark,
    midpoint_score_benchmark,
    cluster_heat_ranking_benchmark,
    rarity_benchmark,
);
criterion_main!(benches);
