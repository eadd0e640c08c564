//! Benchmarks for duravec storage operations

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use duravec::{Config, LayoutKind, PersistentVector};
use tempfile::TempDir;

fn bench_config(dir: &std::path::Path, layout: LayoutKind) -> Config {
    Config::builder()
        .data_dir(dir)
        .layout(layout)
        .growth_batch(1000)
        .build()
}

fn append_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");

    for layout in [LayoutKind::Packed, LayoutKind::Discrete] {
        group.bench_function(format!("{:?}", layout), |b| {
            b.iter_batched(
                || {
                    let temp = TempDir::new().unwrap();
                    let vec = PersistentVector::open(bench_config(temp.path(), layout)).unwrap();
                    (temp, vec)
                },
                |(_temp, mut vec)| {
                    for i in 0..500 {
                        vec.push_back(format!("loop {}", i).as_bytes()).unwrap();
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn read_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("at");

    for layout in [LayoutKind::Packed, LayoutKind::Discrete] {
        let temp = TempDir::new().unwrap();
        let mut vec = PersistentVector::open(bench_config(temp.path(), layout)).unwrap();
        for i in 0..1000 {
            vec.push_back(format!("loop {}", i).as_bytes()).unwrap();
        }

        group.bench_function(format!("{:?}_sequential", layout), |b| {
            b.iter(|| {
                for i in 0..1000u64 {
                    black_box(vec.at(i).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, append_benchmarks, read_benchmarks);
criterion_main!(benches);
