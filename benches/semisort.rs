use block_pseudorand::block_rand;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use semisort::{sequential_semisort, Semisort};
use std::time::Duration;

fn gen_keys(n: usize, domain: u64) -> Vec<u64> {
    block_rand::<u64>(n)
        .into_iter()
        .map(|v| v % domain)
        .collect()
}

fn bench_semisort(c: &mut Criterion) {
    let mut group = c.benchmark_group("semisort");
    group.sample_size(10).warm_up_time(Duration::from_secs(1));

    for (name, n, domain) in [
        ("uniform", 1_000_000, u64::MAX),
        ("skewed", 1_000_000, 1_000),
        ("uniform", 10_000_000, u64::MAX),
        ("skewed", 10_000_000, 1_000),
    ] {
        let input = gen_keys(n, domain);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(
            BenchmarkId::new(format!("parallel_{name}"), n),
            &input,
            |bench, input| {
                bench.iter(|| {
                    let mut data = input.clone();
                    data.semisort_builder().with_seed(1).sort().unwrap();
                    black_box(data);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new(format!("sequential_{name}"), n),
            &input,
            |bench, input| {
                bench.iter(|| {
                    let mut data = input.clone();
                    sequential_semisort(&mut data);
                    black_box(data);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new(format!("full_sort_{name}"), n),
            &input,
            |bench, input| {
                bench.iter(|| {
                    let mut data = input.clone();
                    data.sort_unstable();
                    black_box(data);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_semisort);
criterion_main!(benches);
