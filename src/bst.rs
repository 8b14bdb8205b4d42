//! An ordered set stored in an unbalanced Binary Search Tree.
//!
//! Every operation starts with the same walk: compare the target against the element under a
//! cursor and go left or right until either an equal element or a bottom slot turns up. The
//! bottom slot is exactly where the target would be inserted. All structural change is then
//! done with the cursor primitives of [`CursorMut`].
//!
//! Nothing here rebalances the tree. Its shape is whatever the order of [`Bst::add`] and
//! [`Bst::remove`] calls produces, so ascending insertions build a list. [`Bst::from_sorted`]
//! and [`Bst::rebalance`] build a tree of minimal height instead.
//!
//! # Examples
//!
//! ```
//! use cursor_bst::Bst;
//!
//! let mut set = Bst::from_sorted((0..500).step_by(2).collect());
//!
//! assert!(set.contains(&248));
//! assert!(!set.contains(&249));
//!
//! let mut found = set.interval_search(&10, &20);
//! found.sort();
//! assert_eq!(found, vec![&10, &12, &14, &16, &18, &20]);
//!
//! let around = set.pred_succ(&249);
//! assert_eq!((around.pred, around.element, around.succ), (Some(&248), None, Some(&250)));
//!
//! assert!(set.add(249));
//! assert_eq!(set.remove(&248), Some(248));
//! assert_eq!(set.len(), 250);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use crate::cursor::{Cursor, CursorMut};
use crate::error::Error;
use crate::tree::{Link, Node, Tree};

/// In debug builds, trees up to this size have their cached length checked against a full
/// count after every mutation.
const DEBUG_COUNT_LIMIT: usize = 64;

/// An ordered set of `T`. Elements are their own keys: two elements comparing
/// [`Equal`][Ordering::Equal] are the same element as far as the set is concerned.
#[derive(Clone)]
pub struct Bst<T> {
    tree: Tree<T>,
    len: usize,
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Bst<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The neighbourhood of a target element, see [`Bst::pred_succ`].
#[derive(Debug, PartialEq, Eq)]
pub struct PredSucc<'a, T> {
    /// The largest stored element less than the target.
    pub pred: Option<&'a T>,
    /// The stored element equal to the target.
    pub element: Option<&'a T>,
    /// The smallest stored element greater than the target.
    pub succ: Option<&'a T>,
}

impl<'a, T> Clone for PredSucc<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for PredSucc<'a, T> {}

impl<T> Bst<T> {
    /// Generates a new, empty set.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            len: 0,
        }
    }

    /// Builds a set of minimal height from elements that are **already sorted in ascending
    /// order and contain no duplicates**.
    ///
    /// The input is not checked. Unsorted or duplicated input still produces a well formed
    /// tree, but lookups on it will give meaningless answers. Sort and dedup first if in any
    /// doubt.
    ///
    /// The middle element becomes the root and each half is built the same way beneath it,
    /// giving a height of `ceil(log2(n + 1))` in `O(n)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Bst;
    ///
    /// let set = Bst::from_sorted((1..=7).collect());
    ///
    /// assert_eq!(set.len(), 7);
    /// assert_eq!(set.height(), 3);
    /// assert!(set.contains(&4));
    /// ```
    pub fn from_sorted(sorted: Vec<T>) -> Self {
        let len = sorted.len();
        let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        let tree = Self::build_balanced(&mut slots);
        log::trace!("built a balanced tree from {} sorted elements", len);

        Self { tree, len }
    }

    /// Builds the subtree for `sorted`, taking every element out of its slot.
    fn build_balanced(sorted: &mut [Option<T>]) -> Tree<T> {
        let mut tree = Tree::new();
        if sorted.is_empty() {
            return tree;
        }

        let (left, rest) = sorted.split_at_mut((sorted.len() - 1) / 2);
        let (mid, right) = rest
            .split_first_mut()
            .expect("Non-empty range => midpoint");
        {
            let mut cursor = tree.cursor_mut();
            cursor
                .insert(mid.take().expect("Each slot is visited once"))
                .expect("Fresh tree => empty root");

            let mut cursor = cursor.left();
            cursor
                .paste(Self::build_balanced(left))
                .expect("Fresh root => empty left slot");

            let mut cursor = cursor.up().expect("Walked down from the root").right();
            cursor
                .paste(Self::build_balanced(right))
                .expect("Fresh root => empty right slot");
        }

        tree
    }

    /// The number of elements in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the underlying tree. This is `O(n)`.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.tree
            .cursor()
            .leftmost()
            .and_then(|cursor| cursor.consult())
            .ok()
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        self.tree
            .cursor()
            .rightmost()
            .and_then(|cursor| cursor.consult())
            .ok()
    }

    /// Visits the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree, self.len)
    }

    /// Rebuilds the tree with minimal height, keeping the same elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Bst;
    ///
    /// let mut set: Bst<_> = (0..15).collect();
    /// assert_eq!(set.height(), 15);
    ///
    /// set.rebalance();
    /// assert_eq!(set.height(), 4);
    /// assert_eq!(set.len(), 15);
    /// ```
    pub fn rebalance(&mut self) {
        let sorted: Vec<T> = mem::take(self).into_iter().collect();
        log::trace!("rebalancing {} elements", sorted.len());
        *self = Self::from_sorted(sorted);
    }

    fn debug_check_len(&self) {
        if cfg!(debug_assertions) && self.len <= DEBUG_COUNT_LIMIT {
            assert_eq!(
                self.tree.count(),
                self.len,
                "cached length drifted from the node count"
            );
        }
    }
}

impl<T> Bst<T>
where
    T: Ord,
{
    /// Walks to the node equal to `element`, or to the bottom slot where it would go.
    fn locate(&self, element: &T) -> Cursor<'_, T> {
        let mut cursor = self.tree.cursor();
        while let Ok(current) = cursor.consult() {
            cursor = match element.cmp(current) {
                Ordering::Less => cursor.left(),
                Ordering::Equal => break,
                Ordering::Greater => cursor.right(),
            };
        }

        cursor
    }

    /// [`Bst::locate`] but for changing the tree. Takes the tree rather than `self` so the
    /// cached length can still be updated while the cursor is alive.
    fn locate_mut<'a>(tree: &'a mut Tree<T>, element: &T) -> CursorMut<'a, T> {
        let mut cursor = tree.cursor_mut();
        loop {
            let ordering = match cursor.consult() {
                Ok(current) => element.cmp(current),
                Err(_) => break,
            };
            cursor = match ordering {
                Ordering::Less => cursor.left(),
                Ordering::Equal => break,
                Ordering::Greater => cursor.right(),
            };
        }

        cursor
    }

    /// Adds `element` to the set. Returns `false`, leaving the set untouched, if an equal
    /// element is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Bst;
    ///
    /// let mut set = Bst::new();
    ///
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        {
            let mut cursor = Self::locate_mut(&mut self.tree, &element);
            if !cursor.is_bottom() {
                return false;
            }
            cursor
                .insert(element)
                .expect("Located a bottom slot => slot is free");
        }
        self.len += 1;

        self.debug_check_len();
        true
    }

    /// Removes the element equal to `element` and returns it. Does nothing if there is none.
    ///
    /// The target is rotated left until it has no right child, which keeps the in-order
    /// sequence intact. Its left subtree, if any, then takes its place. This is `O(height)`
    /// and makes no attempt to keep the tree balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Bst;
    ///
    /// let mut set = Bst::from_sorted(vec![1, 2, 3]);
    ///
    /// assert_eq!(set.remove(&2), Some(2));
    /// assert_eq!(set.remove(&2), None);
    /// assert!(!set.contains(&2));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove(&mut self, element: &T) -> Option<T> {
        let removed = {
            let mut cursor = Self::locate_mut(&mut self.tree, element);
            if cursor.is_bottom() {
                return None;
            }
            self.len -= 1;

            let mut rotations = 0;
            while cursor.has_right() {
                cursor.rotate_left().expect("Rotate left => right child");
                // The target is now the left child of what used to be its right child.
                cursor = cursor.left();
                rotations += 1;
            }
            log::trace!("pushed target down with {} left rotations", rotations);

            if cursor.is_leaf() {
                cursor.cut().expect("Found target => target exists")
            } else {
                let mut left = cursor.left();
                let subtree = left
                    .cut()
                    .expect("Not a leaf and no right child => left child");
                let mut cursor = left.up().expect("Walked down from the target");
                let removed = cursor.cut().expect("Target is still in its slot");
                cursor
                    .paste(subtree)
                    .expect("Cutting the target leaves its slot empty");
                removed
            }
        };

        self.debug_check_len();
        removed.into_element()
    }

    /// Whether an element equal to `element` is in the set.
    pub fn contains(&self, element: &T) -> bool {
        !self.locate(element).is_bottom()
    }

    /// The stored element equal to `element`. It compares equal to `element` but need not be
    /// identical to it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no stored element compares equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::{Bst, Error};
    ///
    /// let set = Bst::from_sorted(vec![1, 2, 3]);
    ///
    /// assert_eq!(set.get(&2), Ok(&2));
    /// assert_eq!(set.get(&4), Err(Error::NotFound));
    /// ```
    pub fn get(&self, element: &T) -> Result<&T, Error> {
        self.locate(element)
            .consult()
            .map_err(|_| Error::NotFound)
    }

    /// Every element `e` with `min <= e <= max`, in no particular order. Subtrees that cannot
    /// hold anything in range are skipped. An inverted range finds nothing.
    pub fn interval_search(&self, min: &T, max: &T) -> Vec<&T> {
        let mut found = Vec::new();
        // Subtrees still to search. A list-shaped tree is as deep as it is long.
        let mut pending: Vec<&Node<T>> = self.tree.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            let current = &node.element;
            if current >= min && current <= max {
                found.push(current);
            }

            // Anything bigger can only be on the right and anything smaller on the left.
            if current < max {
                pending.extend(node.right.as_deref());
            }
            if current > min {
                pending.extend(node.left.as_deref());
            }
        }

        found
    }

    /// The closest elements on either side of `element`, and `element` itself if present.
    ///
    /// Each comparison on the way down narrows one of the bounds. If an equal element turns
    /// up, its own subtrees hold closer neighbours than anything seen on the way down.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_bst::Bst;
    ///
    /// let set = Bst::from_sorted((0..10).collect());
    ///
    /// let found = set.pred_succ(&5);
    /// assert_eq!((found.pred, found.element, found.succ), (Some(&4), Some(&5), Some(&6)));
    ///
    /// let below = set.pred_succ(&-1);
    /// assert_eq!((below.pred, below.element, below.succ), (None, None, Some(&0)));
    ///
    /// let above = set.pred_succ(&10);
    /// assert_eq!((above.pred, above.element, above.succ), (Some(&9), None, None));
    /// ```
    pub fn pred_succ(&self, element: &T) -> PredSucc<'_, T> {
        let mut found = PredSucc {
            pred: None,
            element: None,
            succ: None,
        };

        let mut cursor = self.tree.cursor();
        while let Ok(current) = cursor.consult() {
            cursor = match element.cmp(current) {
                Ordering::Less => {
                    found.succ = Some(current);
                    cursor.left()
                }
                Ordering::Greater => {
                    found.pred = Some(current);
                    cursor.right()
                }
                Ordering::Equal => {
                    if cursor.has_left() {
                        found.pred = cursor
                            .clone()
                            .left()
                            .rightmost()
                            .and_then(|c| c.consult())
                            .map(Some)
                            .expect("Has left => rightmost exists");
                    }
                    if cursor.has_right() {
                        found.succ = cursor
                            .right()
                            .leftmost()
                            .and_then(|c| c.consult())
                            .map(Some)
                            .expect("Has right => leftmost exists");
                    }
                    found.element = Some(current);
                    break;
                }
            };
        }

        found
    }
}

impl<T> FromIterator<T> for Bst<T>
where
    T: Ord,
{
    /// Adds each element in turn. Sorted input builds a list-shaped tree, prefer
    /// [`Bst::from_sorted`] for that.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for Bst<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a Bst<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Bst<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.tree.into_link(), self.len)
    }
}

/// An in-order iterator over borrowed elements. See [`Bst::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose left subtree is done but which haven't been yielded yet.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a Tree<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An in-order iterator that takes the elements out of the set.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Drop for IntoIter<T> {
    // Yielding detaches each node from its children so nothing is dropped recursively.
    fn drop(&mut self) {
        self.by_ref().for_each(drop);
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
