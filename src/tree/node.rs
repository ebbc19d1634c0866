/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::ops::Deref;

/// Handle to a slot of a [`RedBlackTree`](super::RedBlackTree).
///
/// Handles stay valid until the node they designate is deleted.  Once a node is deleted its
/// slot is recycled by a later insertion, so a stale handle may come to designate a different
/// node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The shared terminal standing in for every absent child or parent.
    pub(crate) const NIL: NodeId = NodeId(0);
    /// The fake root whose left child is the real root.
    pub(crate) const ROOT: NodeId = NodeId(1);

    #[must_use]
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// A value stored in the tree, together with who owns it.
///
/// The ownership mode is picked per insertion: [`insert`](super::RedBlackTree::insert) moves the
/// value into the tree, [`insert_ref`](super::RedBlackTree::insert_ref) only records a reference
/// to a value the caller keeps.  Deleting a node hands its payload back, so the caller can always
/// tell which mode applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payload<'a, T> {
    Owned(T),
    Borrowed(&'a T),
}

impl<'a, T> Payload<'a, T> {
    #[must_use]
    pub fn get(&self) -> &T {
        match *self {
            Payload::Owned(ref value) => value,
            Payload::Borrowed(value) => value,
        }
    }

    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self, Payload::Owned(_))
    }

    /// Returns the value if the tree owned it.
    #[must_use]
    pub fn into_owned(self) -> Option<T> {
        match self {
            Payload::Owned(value) => Some(value),
            Payload::Borrowed(_) => None,
        }
    }

    /// Returns the value, cloning it out of the caller's storage if it was borrowed.
    #[must_use]
    pub fn into_value(self) -> T
    where
        T: Clone,
    {
        match self {
            Payload::Owned(value) => value,
            Payload::Borrowed(value) => value.clone(),
        }
    }
}

impl<T> Deref for Payload<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> AsRef<T> for Payload<'_, T> {
    fn as_ref(&self) -> &T {
        self.get()
    }
}

/// An arena slot.
///
/// Live nodes carry a payload.  The two sentinels and vacant slots carry none; a vacant slot
/// chains to the next vacant one through `parent`.
#[derive(Debug)]
pub(crate) struct Node<'a, T> {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) color: Color,
    pub(crate) data: Option<Payload<'a, T>>,
}

impl<'a, T> Node<'a, T> {
    pub(crate) fn sentinel() -> Node<'a, T> {
        Node {
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
            color: Color::Black,
            data: None,
        }
    }

    pub(crate) fn new_red(data: Payload<'a, T>, parent: NodeId) -> Node<'a, T> {
        Node {
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent,
            color: Color::Red,
            data: Some(data),
        }
    }

    pub(crate) fn vacant(next_free: NodeId) -> Node<'a, T> {
        Node {
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: next_free,
            color: Color::Black,
            data: None,
        }
    }
}
