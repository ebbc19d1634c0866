/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

mod balance;
mod node;
mod traverse;

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{AllocError, InsertError, ReplaceError};
use log::{error, trace};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::ops::Index;

pub use self::node::{Color, NodeId, Payload};
pub use self::traverse::{Iter, Order};

/// Creates a [`RedBlackTree`](tree/struct.RedBlackTree.html) owning the given values:
///
/// ```
/// # use rbtree::*;
/// #
/// let mut t = RedBlackTree::new();
///
/// let _ = t.insert(1);
/// let _ = t.insert(2);
/// let _ = t.insert(3);
///
/// assert_eq!(rb_tree![3, 1, 2], t);
/// ```
#[macro_export]
macro_rules! rb_tree {
    ($($e:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut t = $crate::RedBlackTree::new();
            $(
                let _ = t.insert($e);
            )*
            t
        }
    };
}

/// Result of an insertion.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The payload was stored in a new node.
    Inserted(NodeId),
    /// A node comparing equal already exists.  The tree is unchanged.
    AlreadyExists(NodeId),
    /// No slot could be allocated for the new node.  The tree is unchanged.
    AllocationFailed(AllocError),
}

impl InsertOutcome {
    #[must_use]
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }

    /// The new node, or the existing node that blocked the insertion.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            InsertOutcome::Inserted(id) | InsertOutcome::AlreadyExists(id) => Some(id),
            InsertOutcome::AllocationFailed(_) => None,
        }
    }

    pub fn into_result(self) -> Result<NodeId, InsertError> {
        match self {
            InsertOutcome::Inserted(id) => Ok(id),
            InsertOutcome::AlreadyExists(id) => Err(InsertError::Duplicate(id)),
            InsertOutcome::AllocationFailed(e) => Err(InsertError::Alloc(e)),
        }
    }
}

/// An ordered container implemented as a
/// [red-black tree](https://en.wikipedia.org/wiki/Red-Black_tree) whose nodes live in an arena.
///
/// Every node carries a [`Payload`]: either a value moved into the tree or a reference to a
/// value the caller keeps alive for `'a`.  Both kinds can be mixed in one tree.  Payloads that
/// compare equal under the tree's [`Comparator`] are rejected, never chained.
///
/// Nodes are addressed by [`NodeId`].  Two sentinel slots exist for the whole life of the tree:
/// [`nil`](RedBlackTree::nil), the terminal every absent child or parent points to, and
/// [`root`](RedBlackTree::root), a fake root whose left child is the real root.  Navigation
/// reports "no such node" by returning `nil`.
///
/// # Complexity
///
/// Let *n* be the number of elements in the tree.
///
/// ## Temporal complexity
///
/// | Operation                     | Average   | Worst case  |
/// |:----------------------------- | ---------:| -----------:|
/// | `new()`                       |      Θ(1) |        Θ(1) |
/// | `insert()`                    | Θ(log(n)) |   Θ(log(n)) |
/// | `delete()`                    | Θ(log(n)) |   Θ(log(n)) |
/// | `find()`                      | Θ(log(n)) |   Θ(log(n)) |
/// | `min()`, `max()`              | Θ(log(n)) |   Θ(log(n)) |
/// | `successor()`, `predecessor()`|      Θ(1) |   Θ(log(n)) |
/// | `count()`                     |      Θ(n) |        Θ(n) |
/// | `traverse()`, `apply()`       |      Θ(n) |        Θ(n) |
///
/// The population is not cached: [`count`](RedBlackTree::count) walks the whole tree.
///
/// # Implementation details
///
/// Insertion and deletion follow the classic bottom-up algorithms with parent links, as in
/// "Introduction to Algorithms" by Cormen, Leiserson, Rivest and Stein, chapter 13.  Every walk
/// over the tree uses an explicit stack instead of recursion.
pub struct RedBlackTree<'a, T, C = NaturalOrder> {
    nodes: Vec<node::Node<'a, T>>,
    /// Head of the chain of vacant slots, `NIL` when there is none.
    free: NodeId,
    comparator: C,
}

impl<'a, T> RedBlackTree<'a, T>
where
    T: Ord,
{
    #[must_use]
    pub fn new() -> RedBlackTree<'a, T> {
        RedBlackTree::with_comparator(NaturalOrder)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> RedBlackTree<'a, T> {
        RedBlackTree::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<'a, T, C> RedBlackTree<'a, T, C>
where
    C: Comparator<T>,
{
    #[must_use]
    pub fn with_comparator(comparator: C) -> RedBlackTree<'a, T, C> {
        RedBlackTree::with_capacity_and_comparator(0, comparator)
    }

    /// Creates an empty tree with room for `capacity` nodes before the arena has to grow.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> RedBlackTree<'a, T, C> {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));

        nodes.push(node::Node::sentinel());
        nodes.push(node::Node::sentinel());

        RedBlackTree {
            nodes,
            free: NodeId::NIL,
            comparator,
        }
    }

    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Moves `value` into the tree.
    pub fn insert(&mut self, value: T) -> InsertOutcome {
        self.insert_payload(Payload::Owned(value))
    }

    /// Stores a reference to `value`, which stays owned by the caller.
    pub fn insert_ref(&mut self, value: &'a T) -> InsertOutcome {
        self.insert_payload(Payload::Borrowed(value))
    }

    /// Inserts `payload` unless a node comparing equal already exists.
    ///
    /// On [`AlreadyExists`](InsertOutcome::AlreadyExists) and
    /// [`AllocationFailed`](InsertOutcome::AllocationFailed) the payload is dropped and the tree
    /// is left as it was.
    pub fn insert_payload(&mut self, payload: Payload<'a, T>) -> InsertOutcome {
        let mut node = self.first();
        let mut parent = NodeId::ROOT;
        let mut ordering = Ordering::Less;

        while node != NodeId::NIL {
            parent = node;
            ordering = self.comparator.compare(payload.get(), self.key(node));

            node = match ordering {
                Ordering::Less => self.node(node).left,
                Ordering::Equal => return InsertOutcome::AlreadyExists(node),
                Ordering::Greater => self.node(node).right,
            };
        }

        let node = match self.allocate(node::Node::new_red(payload, parent)) {
            Ok(id) => id,
            Err(e) => return InsertOutcome::AllocationFailed(e),
        };

        // Below the super-root `ordering` is still `Less`, so the new node becomes its left child.
        if ordering == Ordering::Less {
            self.node_mut(parent).left = node;
        } else {
            self.node_mut(parent).right = node;
        }

        trace!("spliced {:?} under {:?}", node, parent);

        self.insert_fixup(node);

        InsertOutcome::Inserted(node)
    }

    #[must_use]
    pub fn find(&self, key: &T) -> Option<NodeId> {
        let mut node = self.first();

        while node != NodeId::NIL {
            node = match self.comparator.compare(key, self.key(node)) {
                Ordering::Less => self.node(node).left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => self.node(node).right,
            };
        }

        None
    }

    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// Removes `node` from the tree and hands its payload back.
    ///
    /// Returns `None`, leaving the tree untouched, if `node` is a sentinel or a vacant slot.
    pub fn delete(&mut self, node: NodeId) -> Option<Payload<'a, T>> {
        if !self.is_live(node) {
            return None;
        }

        let victim = node;

        // The node physically detached from its position: the victim itself if it has a free
        // child slot, its successor otherwise.
        let detached = if self.node(victim).left == NodeId::NIL || self.node(victim).right == NodeId::NIL {
            victim
        } else {
            self.successor(victim)
        };

        let child = match self.node(detached).left {
            NodeId::NIL => self.node(detached).right,
            left => left,
        };
        let parent = self.node(detached).parent;

        // `child` may be nil.  Its parent link is still written since the repair climbs from it.
        self.node_mut(child).parent = parent;
        self.replace_child(parent, detached, child);

        if self.node(detached).color == Color::Black {
            self.repair(child);
        }

        if detached != victim {
            // The successor takes over the victim's place, so every other handle stays valid.
            let node::Node {
                left,
                right,
                parent,
                color,
                ..
            } = *self.node(victim);

            {
                let successor = self.node_mut(detached);
                successor.left = left;
                successor.right = right;
                successor.parent = parent;
                successor.color = color;
            }

            self.node_mut(left).parent = detached;
            self.node_mut(right).parent = detached;
            self.replace_child(parent, victim, detached);
        }

        trace!("detached {:?}", victim);

        self.release(victim)
    }

    /// Substitutes a new node holding `payload` for `victim`, at the same position and with the
    /// same color.  The victim's slot is freed and its payload returned along with the handle of
    /// the new node.
    ///
    /// No rebalancing is done and the order is not checked: `payload` must compare like the
    /// payload it replaces relative to every other node.
    pub fn replace(
        &mut self,
        victim: NodeId,
        payload: Payload<'a, T>,
    ) -> Result<(NodeId, Payload<'a, T>), ReplaceError> {
        if !self.is_live(victim) {
            return Err(ReplaceError::NotANode(victim));
        }

        debug_assert!(self.fits_between_neighbors(victim, payload.get()));

        let node::Node {
            left,
            right,
            parent,
            color,
            ..
        } = *self.node(victim);

        let new = self.allocate(node::Node {
            left,
            right,
            parent,
            color,
            data: Some(payload),
        })?;

        self.replace_child(parent, victim, new);

        if left != NodeId::NIL {
            self.node_mut(left).parent = new;
        }
        if right != NodeId::NIL {
            self.node_mut(right).parent = new;
        }

        trace!("replaced {:?} by {:?}", victim, new);

        self.release(victim)
            .map(|old| (new, old))
            .ok_or(ReplaceError::NotANode(victim))
    }

    fn fits_between_neighbors(&self, node: NodeId, value: &T) -> bool {
        let prior = self.predecessor(node);
        let next = self.successor(node);

        (prior == NodeId::NIL || self.comparator.compare(self.key(prior), value) == Ordering::Less)
            && (next == NodeId::NIL
                || self.comparator.compare(value, self.key(next)) == Ordering::Less)
    }
}

impl<'a, T, C> RedBlackTree<'a, T, C> {
    /// The terminal node returned when there is no node to return.
    #[must_use]
    #[inline]
    pub fn nil(&self) -> NodeId {
        NodeId::NIL
    }

    /// The super-root.  Its left child is the real root.
    #[must_use]
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The real root, `nil` if the tree is empty.
    #[must_use]
    #[inline]
    pub fn first(&self) -> NodeId {
        self.node(NodeId::ROOT).left
    }

    #[must_use]
    #[inline]
    pub fn is_nil(&self, node: NodeId) -> bool {
        node == NodeId::NIL
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first() == NodeId::NIL
    }

    /// Number of payloads in the tree.  This walks the whole tree.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut count = 0;

        self.apply_all(&mut count, Order::InOrder, |_, c| {
            *c += 1;
            0
        });

        count
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.payload(node).map(Payload::get)
    }

    #[must_use]
    pub fn payload(&self, node: NodeId) -> Option<&Payload<'a, T>> {
        self.nodes.get(node.0).and_then(|n| n.data.as_ref())
    }

    /// Color of `node`.  Sentinels and vacant slots are black.
    #[must_use]
    pub fn color(&self, node: NodeId) -> Color {
        self.nodes.get(node.0).map_or(Color::Black, |n| n.color)
    }

    /// Left child of `node`, `nil` if there is none.
    #[must_use]
    pub fn left(&self, node: NodeId) -> NodeId {
        if self.is_live(node) {
            self.node(node).left
        } else {
            NodeId::NIL
        }
    }

    /// Right child of `node`, `nil` if there is none.
    #[must_use]
    pub fn right(&self, node: NodeId) -> NodeId {
        if self.is_live(node) {
            self.node(node).right
        } else {
            NodeId::NIL
        }
    }

    /// Parent of `node`.  The real root's parent is the super-root.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> NodeId {
        if self.is_live(node) {
            self.node(node).parent
        } else {
            NodeId::NIL
        }
    }

    /// The node with the smallest payload, `nil` if the tree is empty.
    #[must_use]
    pub fn min(&self) -> NodeId {
        let mut node = self.first();

        while self.node(node).left != NodeId::NIL {
            node = self.node(node).left;
        }

        node
    }

    /// The node with the largest payload, `nil` if the tree is empty.
    #[must_use]
    pub fn max(&self) -> NodeId {
        let mut node = self.first();

        while self.node(node).right != NodeId::NIL {
            node = self.node(node).right;
        }

        node
    }

    /// The node following `node` in order, `nil` if `node` is the maximum.
    #[must_use]
    pub fn successor(&self, node: NodeId) -> NodeId {
        if !self.is_live(node) {
            return NodeId::NIL;
        }

        let mut succ = self.node(node).right;

        if succ != NodeId::NIL {
            while self.node(succ).left != NodeId::NIL {
                succ = self.node(succ).left;
            }

            succ
        } else {
            // No right subtree: climb until we arrive from a left child.  The super-root's right
            // child is always nil, so the climb stops there at the latest.
            let mut node = node;
            succ = self.node(node).parent;

            while node == self.node(succ).right {
                node = succ;
                succ = self.node(succ).parent;
            }

            if succ == NodeId::ROOT {
                NodeId::NIL
            } else {
                succ
            }
        }
    }

    /// The node preceding `node` in order, `nil` if `node` is the minimum.
    #[must_use]
    pub fn predecessor(&self, node: NodeId) -> NodeId {
        if !self.is_live(node) {
            return NodeId::NIL;
        }

        let mut prior = self.node(node).left;

        if prior != NodeId::NIL {
            while self.node(prior).right != NodeId::NIL {
                prior = self.node(prior).right;
            }

            prior
        } else {
            let mut node = node;
            prior = self.node(node).parent;

            while prior != NodeId::ROOT && node == self.node(prior).left {
                node = prior;
                prior = self.node(prior).parent;
            }

            if prior == NodeId::ROOT {
                NodeId::NIL
            } else {
                prior
            }
        }
    }

    /// Consumes the tree, dropping every payload.
    pub fn destroy(self) {
        self.destroy_with(drop);
    }

    /// Consumes the tree, handing every payload to `destructor` in post-order before its node is
    /// released.
    ///
    /// Borrowed payloads are handed over too, so the destructor decides what to do with them.
    pub fn destroy_with<F>(mut self, destructor: F)
    where
        F: FnMut(Payload<'a, T>),
    {
        self.teardown(destructor);
    }

    /// Removes every node, dropping the payloads.  The tree stays usable.
    pub fn clear(&mut self) {
        self.teardown(drop);
    }

    fn teardown<F>(&mut self, mut destructor: F)
    where
        F: FnMut(Payload<'a, T>),
    {
        let mut stack = vec![traverse::Frame::Expand(self.first())];

        while let Some(frame) = stack.pop() {
            match frame {
                traverse::Frame::Expand(node) => {
                    if node != NodeId::NIL {
                        let n = self.node(node);

                        stack.push(traverse::Frame::Visit(node));
                        stack.push(traverse::Frame::Expand(n.right));
                        stack.push(traverse::Frame::Expand(n.left));
                    }
                }
                traverse::Frame::Visit(node) => {
                    if let Some(payload) = self.node_mut(node).data.take() {
                        destructor(payload);
                    }
                }
            }
        }

        self.nodes.truncate(2);
        self.nodes[NodeId::NIL.0] = node::Node::sentinel();
        self.nodes[NodeId::ROOT.0] = node::Node::sentinel();
        self.free = NodeId::NIL;
    }

    #[inline]
    fn node(&self, id: NodeId) -> &node::Node<'a, T> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut node::Node<'a, T> {
        &mut self.nodes[id.0]
    }

    /// Payload of a node known to be live.
    fn key(&self, id: NodeId) -> &T {
        match self.node(id).data {
            Some(ref payload) => payload.get(),
            None => unreachable!("{id:?} has no payload"),
        }
    }

    fn is_live(&self, id: NodeId) -> bool {
        id.0 > NodeId::ROOT.0 && self.nodes.get(id.0).is_some_and(|n| n.data.is_some())
    }

    /// Points whichever link of `parent` referenced `old` to `new`.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let p = self.node_mut(parent);

        if p.left == old {
            p.left = new;
        } else {
            p.right = new;
        }
    }

    fn allocate(&mut self, node: node::Node<'a, T>) -> Result<NodeId, AllocError> {
        if self.free != NodeId::NIL {
            let id = self.free;

            self.free = self.node(id).parent;
            *self.node_mut(id) = node;

            return Ok(id);
        }

        if let Err(e) = self.nodes.try_reserve(1) {
            error!("cannot grow the node arena past {} slots: {}", self.nodes.len(), e);
            return Err(AllocError::from(e));
        }

        self.nodes.push(node);

        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Vacates the slot of `id` and returns the payload it held.
    fn release(&mut self, id: NodeId) -> Option<Payload<'a, T>> {
        let next_free = self.free;
        let data = std::mem::replace(self.node_mut(id), node::Node::vacant(next_free)).data;

        self.free = id;

        data
    }
}

impl<'a, T> Default for RedBlackTree<'a, T>
where
    T: Ord,
{
    fn default() -> RedBlackTree<'a, T> {
        RedBlackTree::new()
    }
}

impl<'a, T, C> Index<NodeId> for RedBlackTree<'a, T, C> {
    type Output = T;

    fn index(&self, node: NodeId) -> &T {
        self.get(node).expect("no payload at node")
    }
}

impl<'a, T, C> PartialEq for RedBlackTree<'a, T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackTree<'a, T, C>) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'a, T: Eq, C> Eq for RedBlackTree<'a, T, C> {}

impl<'a, T, C> Debug for RedBlackTree<'a, T, C>
where
    T: Debug,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> Display for RedBlackTree<'a, T, C>
where
    T: Display,
{
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        fmt.write_str("{")?;

        for v in self.iter() {
            if !first {
                fmt.write_str(", ")?;
            }
            v.fmt(fmt)?;
            first = false;
        }

        fmt.write_str("}")
    }
}

impl<'t, 'a, T, C> IntoIterator for &'t RedBlackTree<'a, T, C> {
    type Item = &'t T;
    type IntoIter = Iter<'t, 'a, T, C>;

    fn into_iter(self) -> Iter<'t, 'a, T, C> {
        self.iter()
    }
}

impl<'a, T> FromIterator<T> for RedBlackTree<'a, T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> RedBlackTree<'a, T> {
        let mut tree = RedBlackTree::new();

        tree.extend(into_iter);

        tree
    }
}

impl<'a, T, C> Extend<T> for RedBlackTree<'a, T, C>
where
    C: Comparator<T>,
{
    /// Inserts every value, dropping the ones that compare equal to a stored payload.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            let _ = self.insert(v);
        }
    }
}
