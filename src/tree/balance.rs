/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Rotations and the two fixup procedures.
//!
//! A red-black tree is a binary search tree where each node is either red or black and
//!
//!   1. the root is black;
//!   2. every leaf (`nil`) is black;
//!   3. both children of a red node are black;
//!   4. every path from a node down to a leaf crosses the same number of black nodes.
//!
//! Because the tree hangs from the super-root, the real root is never special-cased when it has
//! to rotate: it is just the left child of a black node.

use super::node::{Color, NodeId};
use super::RedBlackTree;

impl<'a, T, C> RedBlackTree<'a, T, C> {
    /// Rotates left around `node`.
    ///
    /// ```text
    ///        ┏━━━┓                  ┏━━━┓
    ///        ┃ n ┃                  ┃ c ┃
    ///        ┗━━━┛                  ┗━━━┛
    ///         ╱ ╲                    ╱ ╲
    ///        a  ┏━━━┓     ──▶     ┏━━━┓  d
    ///           ┃ c ┃             ┃ n ┃
    ///           ┗━━━┛             ┗━━━┛
    ///            ╱ ╲               ╱ ╲
    ///           b   d             a   b
    /// ```
    pub(super) fn rotate_left(&mut self, node: NodeId) {
        let child = self.node(node).right;
        let migrating = self.node(child).left;

        self.node_mut(node).right = migrating;

        if migrating != NodeId::NIL {
            self.node_mut(migrating).parent = node;
        }

        let parent = self.node(node).parent;

        self.node_mut(child).parent = parent;
        self.replace_child(parent, node, child);

        self.node_mut(child).left = node;
        self.node_mut(node).parent = child;
    }

    /// Mirror image of [`rotate_left`](RedBlackTree::rotate_left).
    pub(super) fn rotate_right(&mut self, node: NodeId) {
        let child = self.node(node).left;
        let migrating = self.node(child).right;

        self.node_mut(node).left = migrating;

        if migrating != NodeId::NIL {
            self.node_mut(migrating).parent = node;
        }

        let parent = self.node(node).parent;

        self.node_mut(child).parent = parent;
        self.replace_child(parent, node, child);

        self.node_mut(child).right = node;
        self.node_mut(node).parent = child;
    }

    #[inline]
    fn color_of(&self, node: NodeId) -> Color {
        self.node(node).color
    }

    #[inline]
    fn paint(&mut self, node: NodeId, color: Color) {
        self.node_mut(node).color = color;
    }

    /// Restores the invariants after the red leaf `node` was spliced in.
    ///
    /// While the parent is red we are in one of these cases (shown with the parent as a left
    /// child, the other side is the mirror image):
    ///
    ///   1. The uncle is red.  Parent and uncle become black, the grandparent red, and we carry
    ///      on from the grandparent.
    ///   2. The uncle is black and `node` is a right child.  Rotating left around the parent
    ///      swaps the roles of the two and turns this into case 3.
    ///   3. The uncle is black and `node` is a left child.  Parent and grandparent swap colors
    ///      and we rotate right around the grandparent.  No red node has a red parent anymore.
    pub(super) fn insert_fixup(&mut self, mut node: NodeId) {
        while self.color_of(self.node(node).parent) == Color::Red {
            let parent = self.node(node).parent;
            let grandparent = self.node(parent).parent;

            if parent == self.node(grandparent).left {
                let uncle = self.node(grandparent).right;

                if self.color_of(uncle) == Color::Red {
                    self.paint(parent, Color::Black);
                    self.paint(uncle, Color::Black);
                    self.paint(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.node(parent).right {
                        node = parent;
                        self.rotate_left(node);
                    }

                    let parent = self.node(node).parent;
                    let grandparent = self.node(parent).parent;

                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.node(grandparent).left;

                if self.color_of(uncle) == Color::Red {
                    self.paint(parent, Color::Black);
                    self.paint(uncle, Color::Black);
                    self.paint(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.node(parent).left {
                        node = parent;
                        self.rotate_right(node);
                    }

                    let parent = self.node(node).parent;
                    let grandparent = self.node(parent).parent;

                    self.paint(parent, Color::Black);
                    self.paint(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.first();
        self.paint(root, Color::Black);
    }

    /// Restores the invariants after a black node was removed above `node`, which is now one
    /// black node short compared to its sibling's subtree.  `node` may be `nil`, in which case
    /// its parent link was set by the caller.
    pub(super) fn repair(&mut self, mut node: NodeId) {
        while node != self.first() && self.color_of(node) == Color::Black {
            let parent = self.node(node).parent;

            if node == self.node(parent).left {
                let mut sibling = self.node(parent).right;

                if self.color_of(sibling) == Color::Red {
                    self.paint(sibling, Color::Black);
                    self.paint(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.node(self.node(node).parent).right;
                }

                let near = self.node(sibling).left;
                let far = self.node(sibling).right;

                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    self.paint(sibling, Color::Red);
                    node = self.node(node).parent;
                } else {
                    if self.color_of(far) == Color::Black {
                        self.paint(near, Color::Black);
                        self.paint(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.node(self.node(node).parent).right;
                    }

                    let parent = self.node(node).parent;
                    let far = self.node(sibling).right;

                    self.paint(sibling, self.color_of(parent));
                    self.paint(parent, Color::Black);
                    self.paint(far, Color::Black);
                    self.rotate_left(parent);

                    node = self.first();
                }
            } else {
                let mut sibling = self.node(parent).left;

                if self.color_of(sibling) == Color::Red {
                    self.paint(sibling, Color::Black);
                    self.paint(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.node(self.node(node).parent).left;
                }

                let near = self.node(sibling).right;
                let far = self.node(sibling).left;

                if self.color_of(near) == Color::Black && self.color_of(far) == Color::Black {
                    self.paint(sibling, Color::Red);
                    node = self.node(node).parent;
                } else {
                    if self.color_of(far) == Color::Black {
                        self.paint(near, Color::Black);
                        self.paint(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.node(self.node(node).parent).left;
                    }

                    let parent = self.node(node).parent;
                    let far = self.node(sibling).left;

                    self.paint(sibling, self.color_of(parent));
                    self.paint(parent, Color::Black);
                    self.paint(far, Color::Black);
                    self.rotate_right(parent);

                    node = self.first();
                }
            }
        }

        self.paint(node, Color::Black);
    }
}
