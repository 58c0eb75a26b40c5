use criterion::{criterion_group, criterion_main, Criterion};
use cursorflow::prelude::*;
use std::hint::black_box;

fn make_factory(len: usize) -> ArrayFactory<u64> {
    ArrayFactory::new((0..len as u64).collect::<Vec<_>>())
}

fn bench_combinator_chain(c: &mut Criterion) {
    let factory = make_factory(10_000);
    c.bench_function("filter_map_limit_chain", |b| {
        b.iter(|| {
            let chain = factory
                .cursor()
                .filter(|v, _| v % 3 != 0)
                .map(|v, _| v * 2)
                .reiterate(|v, _| {
                    black_box(v);
                })
                .limit(5_000);
            reduce(chain, 0u64, |acc, v| acc.wrapping_add(v)).unwrap()
        })
    });
}

fn bench_boxed_chain(c: &mut Criterion) {
    let factory = make_factory(10_000);
    c.bench_function("boxed_chain_to_array", |b| {
        b.iter(|| {
            let mut chain = factory.cursor().boxed();
            for _ in 0..8 {
                chain = chain.map(|v, _| v + 1).boxed();
            }
            to_array(chain, None).unwrap().len()
        })
    });
}

criterion_group!(cursors, bench_combinator_chain, bench_boxed_chain);
criterion_main!(cursors);
