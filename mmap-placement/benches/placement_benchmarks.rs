//! Placement benchmarks

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mmap_placement::{
    AddressSpaceBounds, CacheAliasConfig, Interval, PlacementFlags, PlacementPolicy, VmaSnapshot,
};

const PAGE: usize = 4096;

/// A fragmented address space: 512 mappings of 4 pages with 4-page holes
fn fragmented() -> VmaSnapshot {
    let mut space = VmaSnapshot::new();
    for i in 0..512 {
        let start = 0x2000_0000 + i * 8 * PAGE;
        space.insert(Interval::new(start, start + 4 * PAGE)).unwrap();
    }
    space
}

fn setup() -> (AddressSpaceBounds, CacheAliasConfig) {
    let bounds = AddressSpaceBounds::new(0x1000_0000, 0x6000_0000, PAGE).unwrap();
    let cache = CacheAliasConfig::vipt_aliasing(4 * PAGE, PAGE).unwrap();
    (bounds, cache)
}

fn bench_fixed_path(c: &mut Criterion) {
    let (bounds, cache) = setup();
    let space = fragmented();
    let policy = PlacementPolicy::new(bounds, cache, &space);
    let flags = PlacementFlags::FIXED | PlacementFlags::SHARED;
    c.bench_function("place_fixed", |b| {
        b.iter(|| policy.place(black_box(0x3000_3000), PAGE, 3, flags))
    });
}

fn bench_hint_path(c: &mut Criterion) {
    let (bounds, cache) = setup();
    let space = fragmented();
    let policy = PlacementPolicy::new(bounds, cache, &space);
    c.bench_function("place_hint", |b| {
        b.iter(|| policy.place(black_box(0x4000_0000), 8 * PAGE, 1, PlacementFlags::SHARED))
    });
}

fn bench_search_path(c: &mut Criterion) {
    let (bounds, cache) = setup();
    let space = fragmented();
    let policy = PlacementPolicy::new(bounds, cache, &space);
    c.bench_function("place_search", |b| {
        b.iter(|| policy.place(0, black_box(2 * PAGE), 3, PlacementFlags::FILE_BACKED))
    });
}

criterion_group!(benches, bench_fixed_path, bench_hint_path, bench_search_path);

criterion_main!(benches);
