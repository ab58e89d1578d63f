use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::{BTreeMap, HashMap, VecDeque};
use vessel::{ChainedHashMap, RbTreeMap, RingDeque};

const N: u64 = 1000;

/// Multiplicative scramble so tree inserts are not sequential.
fn scrambled(i: u64) -> u64 {
    i.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32
}

fn bench_deque(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque");

    group.bench_function("std_vec_deque_push_both_ends", |b| {
        b.iter(|| {
            let mut dq = VecDeque::new();
            for i in 0..N {
                dq.push_back(black_box(i));
                dq.push_front(black_box(i));
            }
            black_box(dq.len());
        });
    });

    group.bench_function("ring_deque_push_both_ends", |b| {
        b.iter(|| {
            let mut dq = RingDeque::new().unwrap();
            for i in 0..N {
                dq.push_back(black_box(i)).unwrap();
                dq.push_front(black_box(i)).unwrap();
            }
            black_box(dq.len());
        });
    });

    group.bench_function("std_vec_deque_insert_middle", |b| {
        b.iter(|| {
            let mut dq = VecDeque::new();
            for i in 0..N {
                dq.insert(dq.len() / 2, black_box(i));
            }
            black_box(dq.len());
        });
    });

    group.bench_function("ring_deque_insert_middle", |b| {
        b.iter(|| {
            let mut dq = RingDeque::new().unwrap();
            for i in 0..N {
                dq.insert(dq.len() / 2, black_box(i)).unwrap();
            }
            black_box(dq.len());
        });
    });

    group.finish();
}

fn bench_hash_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_map");

    group.bench_function("std_hash_map_insert_get", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..N {
                map.insert(i, i);
            }
            for i in 0..N {
                black_box(map.get(&i));
            }
        });
    });

    group.bench_function("chained_hash_map_insert_get", |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new().unwrap();
            for i in 0..N {
                map.insert(i, i).unwrap();
            }
            for i in 0..N {
                black_box(map.get(&i));
            }
        });
    });

    group.finish();
}

fn bench_tree_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_map");

    group.bench_function("std_btree_map_insert_remove", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N {
                map.insert(scrambled(i), i);
            }
            for i in 0..N {
                black_box(map.remove(&scrambled(i)));
            }
        });
    });

    group.bench_function("rb_tree_map_insert_remove", |b| {
        b.iter(|| {
            let mut map = RbTreeMap::new().unwrap();
            for i in 0..N {
                map.insert(scrambled(i), i).unwrap();
            }
            for i in 0..N {
                black_box(map.remove(&scrambled(i)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_deque, bench_hash_map, bench_tree_map);
criterion_main!(benches);
