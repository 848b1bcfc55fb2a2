use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazyq::Enumerable;

fn make_values(rows: usize) -> Vec<i64> {
    (0..rows as i64).map(|i| (i * 7919) % 1024).collect()
}

fn bench_filter_map_sum(c: &mut Criterion) {
    let values = make_values(4096);
    let seq = Enumerable::from_vec(values.clone());

    c.bench_function("lazyq_filter_map_sum", |b| {
        b.iter(|| {
            let total = seq
                .filter(|x| x % 3 == 0)
                .map(|x| x * 2)
                .sum()
                .unwrap_or(0);
            black_box(total)
        })
    });

    c.bench_function("std_filter_map_sum", |b| {
        b.iter(|| {
            let total: i64 = values.iter().filter(|x| *x % 3 == 0).map(|x| x * 2).sum();
            black_box(total)
        })
    });
}

fn bench_group_by(c: &mut Criterion) {
    let seq = Enumerable::from_vec(make_values(4096));
    c.bench_function("lazyq_group_by_mod_16", |b| {
        b.iter(|| black_box(seq.group_by(|x| x % 16).count()))
    });
}

fn bench_order_by(c: &mut Criterion) {
    let seq = Enumerable::from_vec(make_values(4096));
    c.bench_function("lazyq_order_by_then_take", |b| {
        b.iter(|| black_box(seq.order_by(|x| *x).take(10).to_vec()))
    });
}

criterion_group!(pipelines, bench_filter_map_sum, bench_group_by, bench_order_by);
criterion_main!(pipelines);
