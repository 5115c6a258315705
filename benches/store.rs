//! Record store benchmarks: unbalanced tree vs balanced map.
//!
//! Run with: `cargo bench --bench store`
//!
//! Sorted keys degenerate the tree into a chain; shuffled keys keep it shallow.
//! The btree backend is insensitive to key order.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use intmemo::record::AnalysisRecord;
use intmemo::store::btree::BTreeStore;
use intmemo::store::traits::RecordStore;
use intmemo::store::tree::TreeStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const SIZES: [i32; 3] = [256, 1_024, 4_096];

fn shuffled(n: i32) -> Vec<i32> {
    let mut keys: Vec<i32> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(0x5eed));
    keys
}

fn fill<S: RecordStore>(store: &mut S, keys: &[i32]) {
    for &key in keys {
        store.upsert(AnalysisRecord::new(key));
    }
}

// ============================================================================
// Upsert
// ============================================================================

fn bench_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_upsert");
    for n in SIZES {
        let sorted: Vec<i32> = (0..n).collect();
        let random = shuffled(n);

        group.bench_with_input(BenchmarkId::new("tree_sorted", n), &sorted, |b, keys| {
            b.iter_batched(
                TreeStore::new,
                |mut store| fill(&mut store, black_box(keys)),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("tree_shuffled", n), &random, |b, keys| {
            b.iter_batched(
                TreeStore::new,
                |mut store| fill(&mut store, black_box(keys)),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("btree_sorted", n), &sorted, |b, keys| {
            b.iter_batched(
                BTreeStore::new,
                |mut store| fill(&mut store, black_box(keys)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_lookup");
    for n in SIZES {
        let random = shuffled(n);

        let mut chain = TreeStore::new();
        fill(&mut chain, &(0..n).collect::<Vec<_>>());
        let mut bushy = TreeStore::new();
        fill(&mut bushy, &random);
        let mut btree = BTreeStore::new();
        fill(&mut btree, &random);

        group.bench_function(BenchmarkId::new("tree_chain", n), |b| {
            b.iter(|| {
                for &key in &random {
                    black_box(chain.lookup(key));
                }
            })
        });
        group.bench_function(BenchmarkId::new("tree_shuffled", n), |b| {
            b.iter(|| {
                for &key in &random {
                    black_box(bushy.lookup(key));
                }
            })
        });
        group.bench_function(BenchmarkId::new("btree", n), |b| {
            b.iter(|| {
                for &key in &random {
                    black_box(btree.lookup(key));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_upsert, bench_lookup);
criterion_main!(benches);
