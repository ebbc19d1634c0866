/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]

//! `BTreeSet` baseline for `benches/rbtree.rs`, one bench per tree bench and in the same order.

use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::BTreeSet;
use std::hint::black_box;

fn std_btree_set_insert(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("std b-tree set insert", move |b| {
        b.iter(|| (0..limit).fold(BTreeSet::new(), |mut set, i: usize| {
            set.insert(i);
            set
        }));
    });
}

fn std_btree_set_insert_ref(c: &mut Criterion) {
    let limit = 100_000;
    let values: Vec<usize> = (0..limit).collect();

    c.bench_function("std b-tree set insert borrowed", move |b| {
        b.iter(|| {
            let set: BTreeSet<&usize> = values.iter().collect();

            black_box(set.len());
        });
    });
}

fn std_btree_set_delete(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("std b-tree set delete", move |b| {
        b.iter_with_setup(
            || (0..limit).collect::<BTreeSet<usize>>(),
            |mut set| {
                for i in 0..limit {
                    black_box(set.take(&i));
                }

                set
            },
        );
    });
}

fn std_btree_set_delete_min(c: &mut Criterion) {
    let limit = 100_000;

    c.bench_function("std b-tree set delete min", move |b| {
        b.iter_with_setup(
            || (0..limit).collect::<BTreeSet<usize>>(),
            |mut set| {
                while let Some(min) = set.pop_first() {
                    black_box(min);
                }

                set
            },
        );
    });
}

fn std_btree_set_find(c: &mut Criterion) {
    let limit = 100_000;
    let set: BTreeSet<usize> = (0..limit).collect();

    c.bench_function("std b-tree set find", move |b| {
        b.iter(|| {
            for i in 0..limit {
                black_box(set.get(&i));
            }
        });
    });
}

fn std_btree_set_iterate(c: &mut Criterion) {
    let limit = 100_000;
    let set: BTreeSet<usize> = (0..limit).collect();

    c.bench_function("std b-tree set iterate", move |b| {
        b.iter(|| {
            for v in &set {
                black_box(v);
            }
        });
    });
}

fn std_btree_set_fold(c: &mut Criterion) {
    let limit = 100_000;
    let set: BTreeSet<usize> = (0..limit).collect();

    c.bench_function("std b-tree set fold in order", move |b| {
        b.iter(|| black_box(set.iter().fold(0_usize, |sum, v| sum.wrapping_add(*v))));
    });
}

criterion_group!(
    benches,
    std_btree_set_insert,
    std_btree_set_insert_ref,
    std_btree_set_delete,
    std_btree_set_delete_min,
    std_btree_set_find,
    std_btree_set_iterate,
    std_btree_set_fold
);
criterion_main!(benches);
