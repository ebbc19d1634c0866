/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]

//! Arena growth failures, driven by an allocator that refuses every request on the current
//! thread while armed.

use pretty_assertions::assert_eq;
use rbtree::{Color, InsertError, InsertOutcome, Payload, RedBlackTree, ReplaceError};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static REFUSE: Cell<bool> = const { Cell::new(false) };
}

struct RefusingAllocator;

impl RefusingAllocator {
    fn refusing() -> bool {
        REFUSE.try_with(Cell::get).unwrap_or(false)
    }
}

unsafe impl GlobalAlloc for RefusingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if Self::refusing() {
            std::ptr::null_mut()
        } else {
            System.alloc(layout)
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if Self::refusing() {
            std::ptr::null_mut()
        } else {
            System.realloc(ptr, layout, new_size)
        }
    }
}

#[global_allocator]
static ALLOCATOR: RefusingAllocator = RefusingAllocator;

/// Runs `f` with every allocation of this thread failing.
fn refusing_allocations<R>(f: impl FnOnce() -> R) -> R {
    REFUSE.with(|r| r.set(true));
    let result = f();
    REFUSE.with(|r| r.set(false));

    result
}

/// Inserts keys from `next` on, without allocating, until the arena is full.  Returns the first
/// key that did not fit and the outcome of that insertion.
fn fill_arena(tree: &mut RedBlackTree<'_, u32>, mut next: u32) -> (u32, InsertOutcome) {
    refusing_allocations(|| loop {
        match tree.insert(next) {
            InsertOutcome::Inserted(_) => next += 1,
            outcome => return (next, outcome),
        }
    })
}

fn assert_sound(tree: &RedBlackTree<'_, u32>, expected: &[u32]) {
    let values: Vec<u32> = tree.iter().copied().collect();

    assert_eq!(values, expected);
    assert_eq!(tree.count(), expected.len());
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tree.color(tree.first()), Color::Black);
}

#[test]
fn test_insert_allocation_failure() {
    let capacity = 32;
    let mut tree = RedBlackTree::with_capacity(capacity);

    for i in 0..capacity as u32 {
        let _ = tree.insert(i);
    }

    let (rejected, outcome) = fill_arena(&mut tree, capacity as u32);
    let inserted: Vec<u32> = (0..rejected).collect();

    assert!(matches!(outcome, InsertOutcome::AllocationFailed(_)));
    assert_eq!(outcome.node(), None);
    assert!(matches!(outcome.into_result(), Err(InsertError::Alloc(_))));
    assert_sound(&tree, &inserted);
    assert_eq!(tree.find(&rejected), None);

    let node = tree.insert(rejected).into_result().unwrap();

    assert_eq!(tree[node], rejected);
    assert_eq!(tree.count(), inserted.len() + 1);
}

#[test]
fn test_insert_allocation_failure_keeps_duplicates_detected() {
    let mut tree = RedBlackTree::with_capacity(4);

    for i in [10, 20, 30, 40] {
        let _ = tree.insert(i);
    }

    let (rejected, _) = fill_arena(&mut tree, 41);
    let twenty = tree.find(&20).unwrap();

    // Duplicates are found before any slot is requested.
    let outcome = refusing_allocations(|| tree.insert(20));

    assert_eq!(outcome, InsertOutcome::AlreadyExists(twenty));

    let mut expected = vec![10, 20, 30, 40];
    expected.extend(41..rejected);

    assert_sound(&tree, &expected);
}

#[test]
fn test_freed_slot_needs_no_allocation() {
    let mut tree = RedBlackTree::with_capacity(8);

    for i in 0..8 {
        let _ = tree.insert(i * 10);
    }

    let (rejected, _) = fill_arena(&mut tree, 100);
    let thirty = tree.find(&30).unwrap();

    assert_eq!(tree.delete(thirty).and_then(Payload::into_owned), Some(30));

    let outcome = refusing_allocations(|| tree.insert(35));

    assert_eq!(outcome, InsertOutcome::Inserted(thirty));

    let mut expected = vec![0, 10, 20, 35, 40, 50, 60, 70];
    expected.extend(100..rejected);

    assert_sound(&tree, &expected);
}

#[test]
fn test_replace_allocation_failure() {
    let mut tree = RedBlackTree::with_capacity(16);

    for i in 0..16 {
        let _ = tree.insert(i * 2);
    }

    let (rejected, _) = fill_arena(&mut tree, 100);
    let victim = tree.find(&10).unwrap();
    let (left, right, parent, color) = (
        tree.left(victim),
        tree.right(victim),
        tree.parent(victim),
        tree.color(victim),
    );

    let result = refusing_allocations(|| tree.replace(victim, Payload::Owned(11)));

    assert!(matches!(result, Err(ReplaceError::Alloc(_))));
    assert_eq!(tree.get(victim), Some(&10));
    assert_eq!(tree.left(victim), left);
    assert_eq!(tree.right(victim), right);
    assert_eq!(tree.parent(victim), parent);
    assert_eq!(tree.color(victim), color);

    let mut expected: Vec<u32> = (0..16).map(|i| i * 2).collect();
    expected.extend(100..rejected);

    assert_sound(&tree, &expected);

    let (new, old) = tree.replace(victim, Payload::Owned(11)).unwrap();

    assert_eq!(old, Payload::Owned(10));
    assert_eq!(tree[new], 11);
}
