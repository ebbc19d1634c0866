/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use std::cmp::Ordering;

/// A total order over the payloads of a tree.
///
/// Any `Fn(&T, &T) -> Ordering` is a comparator, so a tree can be ordered by a plain function
/// or a closure:
///
/// ```
/// # use rbtree::*;
/// # use std::cmp::Ordering;
/// #
/// fn descending(a: &i32, b: &i32) -> Ordering {
///     b.cmp(a)
/// }
///
/// let mut tree = RedBlackTree::with_comparator(descending);
///
/// let _ = tree.insert(1);
/// let _ = tree.insert(2);
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders payloads by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Reverses the order of another comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn by_len(a: &str, b: &str) -> Ordering {
        a.len().cmp(&b.len())
    }

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7, &7), Ordering::Equal);
    }

    #[test]
    fn test_function_comparator() {
        assert_eq!(by_len.compare("abc", "zz"), Ordering::Greater);
        assert_eq!(by_len.compare("ab", "zz"), Ordering::Equal);
    }

    #[test]
    fn test_reversed() {
        assert_eq!(Reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reversed(by_len).compare("a", "bb"), Ordering::Greater);
    }
}
