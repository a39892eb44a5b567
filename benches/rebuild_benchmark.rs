//! End-to-end rebuild benchmark over synthetic corpora

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use galaxis::graph::{Category, Concept, ConceptId};
use galaxis::layout::LayoutStrategy;
use galaxis::pipeline::{Pipeline, PipelineConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_corpus(n: u64, dimensions: usize) -> Vec<Concept> {
    let categories = ["Science & Technology", "History", "Geography", "General"];
    let mut rng = StdRng::seed_from_u64(424242);

    (0..n)
        .map(|i| {
            let embedding: Vec<f32> = (0..dimensions).map(|_| rng.gen_range(-1.0..1.0)).collect();
            Concept::new(
                ConceptId::new(i),
                format!("concept-{i}"),
                Some(Category::new(categories[(i % 4) as usize])),
                embedding,
            )
            .unwrap()
        })
        .collect()
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    group.sample_size(10);

    for &n in &[200u64, 1000] {
        let corpus = synthetic_corpus(n, 64);
        let config = PipelineConfig {
            seed: Some(1),
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();

        group.bench_with_input(BenchmarkId::new("procedural", n), &corpus, |b, corpus| {
            b.iter(|| pipeline.rebuild(black_box(corpus.clone())).unwrap())
        });
    }

    let corpus = synthetic_corpus(500, 64);
    let mut config = PipelineConfig {
        seed: Some(1),
        ..PipelineConfig::default()
    };
    config.layout.strategy = LayoutStrategy::Force;
    config.layout.force.iterations = 100;
    let pipeline = Pipeline::new(config).unwrap();

    group.bench_function("force_500", |b| {
        b.iter(|| pipeline.rebuild(black_box(corpus.clone())).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_rebuild);
criterion_main!(benches);
