use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use index::VectorIndex;

const DIM: usize = 384;

fn sample_vector(id: usize) -> Vec<f32> {
    (0..DIM)
        .map(|i| (((id * 31 + i * 17) % 97) as f32 * 0.01).sin())
        .collect()
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_index");

    group.bench_function("add_single", |b| {
        let v = sample_vector(1);
        b.iter_batched(
            VectorIndex::new,
            |mut index| index.add(black_box(v.clone())).expect("add"),
            criterion::BatchSize::SmallInput,
        )
    });

    for size in [100, 1_000, 10_000].iter() {
        let mut index = VectorIndex::with_dimension(DIM);
        for id in 0..*size {
            index.add(sample_vector(id)).expect("add");
        }
        let query = sample_vector(size + 1);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("search_top5_{size}"), |b| {
            b.iter(|| index.search(black_box(&query), black_box(5)).expect("search"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
