/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]

// Note: Keep this in sync with `README.md`.  Note that the doc links must be removed.
//! # Red-black tree
//!
//! An ordered container of unique values, implemented as a
//! [red-black tree](https://en.wikipedia.org/wiki/Red-black_tree) whose nodes live in an arena
//! and are addressed by [`NodeId`] handles.
//!
//! The tree supports insertion with duplicate detection, deletion by handle, exact lookup,
//! minimum and maximum, successor and predecessor navigation, pre-, in- and post-order walks that
//! stop as soon as the callback returns a non-zero code, and teardown with a per-payload
//! destructor.
//!
//! Each insertion decides who owns the value: [`RedBlackTree::insert`] moves it into the tree,
//! [`RedBlackTree::insert_ref`] only keeps a reference to it.
//!
//! ## Example
//!
//! ```rust
//! use rbtree::{InsertOutcome, Order, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//!
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     assert!(tree.insert(key).is_inserted());
//! }
//!
//! // Equal values are rejected and the blocking node is reported.
//! let five = tree.find(&5).unwrap();
//! assert_eq!(tree.insert(5), InsertOutcome::AlreadyExists(five));
//!
//! assert_eq!(tree[tree.min()], 1);
//! assert_eq!(tree[tree.successor(five)], 7);
//! assert_eq!(tree.successor(tree.max()), tree.nil());
//!
//! let mut sum = 0;
//! tree.apply_all(&mut sum, Order::InOrder, |v, sum| {
//!     *sum += v;
//!     0
//! });
//! assert_eq!(sum, 37);
//!
//! let payload = tree.delete(five).unwrap();
//! assert_eq!(payload.into_owned(), Some(5));
//! assert_eq!(tree.find(&5), None);
//! ```

pub mod comparator;
pub mod error;
pub mod tree;

pub use comparator::{Comparator, NaturalOrder, Reversed};
pub use error::{AllocError, InsertError, ReplaceError};
pub use tree::{Color, InsertOutcome, Iter, NodeId, Order, Payload, RedBlackTree};
