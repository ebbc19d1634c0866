/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::node::NodeId;
use super::RedBlackTree;
use std::iter::FusedIterator;

/// The order in which a walk visits a node relative to its subtrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, node, right subtree.  This visits payloads in ascending order.
    InOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// A pending step of a walk: either a subtree still to be unfolded or a node to hand to the
/// callback.
#[derive(Clone, Copy, Debug)]
pub(super) enum Frame {
    Expand(NodeId),
    Visit(NodeId),
}

impl<'a, T, C> RedBlackTree<'a, T, C> {
    /// Walks the subtree rooted at `start` in the given `order`, calling `f` with each node and
    /// `ctx`.
    ///
    /// As soon as `f` returns a non-zero value the walk stops and that value is returned.  A walk
    /// that visits every node returns `0`.  Starting at the super-root walks the whole tree;
    /// starting at `nil` or at a vacant slot visits nothing.
    ///
    /// ```
    /// # use rbtree::*;
    /// #
    /// let tree = rb_tree![10, 20, 30, 40];
    /// let mut seen = Vec::new();
    ///
    /// let code = tree.traverse(tree.root(), &mut seen, Order::InOrder, |node, seen| {
    ///     seen.push(tree[node]);
    ///     if tree[node] == 30 { -1 } else { 0 }
    /// });
    ///
    /// assert_eq!(code, -1);
    /// assert_eq!(seen, vec![10, 20, 30]);
    /// ```
    pub fn traverse<X, F>(&self, start: NodeId, ctx: &mut X, order: Order, mut f: F) -> i32
    where
        F: FnMut(NodeId, &mut X) -> i32,
    {
        self.walk(start, order, |node| f(node, &mut *ctx))
    }

    /// Same walk as [`traverse`](RedBlackTree::traverse), handing `f` the payloads instead of
    /// the nodes.
    pub fn apply<X, F>(&self, start: NodeId, ctx: &mut X, order: Order, mut f: F) -> i32
    where
        F: FnMut(&T, &mut X) -> i32,
    {
        self.walk(start, order, |node| f(self.key(node), &mut *ctx))
    }

    /// [`apply`](RedBlackTree::apply) over the whole tree.
    pub fn apply_all<X, F>(&self, ctx: &mut X, order: Order, f: F) -> i32
    where
        F: FnMut(&T, &mut X) -> i32,
    {
        self.apply(self.first(), ctx, order, f)
    }

    fn walk<F>(&self, start: NodeId, order: Order, mut visit: F) -> i32
    where
        F: FnMut(NodeId) -> i32,
    {
        let start = if start == NodeId::ROOT { self.first() } else { start };

        if !self.is_live(start) {
            return 0;
        }

        let capacity = 3 * walk_utils::conservative_height(self.nodes.len()) + 1;
        let mut stack: Vec<Frame> = Vec::with_capacity(capacity);

        stack.push(Frame::Expand(start));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Expand(NodeId::NIL) => (),
                Frame::Expand(node) => {
                    let n = self.node(node);

                    // Pushed in reverse: the last frame pushed is the first one handled.
                    match order {
                        Order::PreOrder => {
                            stack.push(Frame::Expand(n.right));
                            stack.push(Frame::Expand(n.left));
                            stack.push(Frame::Visit(node));
                        }
                        Order::InOrder => {
                            stack.push(Frame::Expand(n.right));
                            stack.push(Frame::Visit(node));
                            stack.push(Frame::Expand(n.left));
                        }
                        Order::PostOrder => {
                            stack.push(Frame::Visit(node));
                            stack.push(Frame::Expand(n.right));
                            stack.push(Frame::Expand(n.left));
                        }
                    }
                }
                Frame::Visit(node) => {
                    let code = visit(node);

                    if code != 0 {
                        return code;
                    }
                }
            }
        }

        0
    }

    /// Iterates over the payloads in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, 'a, T, C> {
        Iter::new(self)
    }
}

mod walk_utils {
    use std::mem::size_of;

    pub fn lg_floor(size: usize) -> usize {
        debug_assert!(size > 0);

        let c: usize = 8 * size_of::<usize>() - size.leading_zeros() as usize;

        c - 1
    }

    /// Upper bound on the height of a red-black tree holding `size` nodes.
    pub fn conservative_height(size: usize) -> usize {
        if size > 0 {
            2 * lg_floor(size.saturating_add(1))
        } else {
            0
        }
    }
}

/// In-order iterator over the payloads of a [`RedBlackTree`], driven by
/// [`successor`](RedBlackTree::successor) and [`predecessor`](RedBlackTree::predecessor).
#[derive(Debug)]
pub struct Iter<'t, 'a, T, C> {
    tree: &'t RedBlackTree<'a, T, C>,

    front: NodeId,
    back: NodeId,

    done: bool,
}

impl<'t, 'a, T, C> Iter<'t, 'a, T, C> {
    fn new(tree: &'t RedBlackTree<'a, T, C>) -> Iter<'t, 'a, T, C> {
        Iter {
            tree,
            front: tree.min(),
            back: tree.max(),
            done: tree.is_empty(),
        }
    }
}

impl<'t, 'a, T, C> Iterator for Iter<'t, 'a, T, C> {
    type Item = &'t T;

    fn next(&mut self) -> Option<&'t T> {
        if self.done {
            return None;
        }

        let current = self.front;

        // Front and back met: this is the last element in either direction.
        if current == self.back {
            self.done = true;
        } else {
            self.front = self.tree.successor(current);
        }

        Some(self.tree.key(current))
    }
}

impl<'t, 'a, T, C> DoubleEndedIterator for Iter<'t, 'a, T, C> {
    fn next_back(&mut self) -> Option<&'t T> {
        if self.done {
            return None;
        }

        let current = self.back;

        if current == self.front {
            self.done = true;
        } else {
            self.back = self.tree.predecessor(current);
        }

        Some(self.tree.key(current))
    }
}

impl<'t, 'a, T, C> FusedIterator for Iter<'t, 'a, T, C> {}
