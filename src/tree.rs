//! The substrate the set is built on: a binary tree that knows nothing about ordering.
//!
//! A [`Tree`] is a single, possibly empty, root slot. Every node exclusively owns its two
//! children so subtrees only ever change hands by being moved. All navigation and structural
//! change goes through the cursors handed out by [`Tree::cursor`] and [`Tree::cursor_mut`].
//!
//! # Examples
//!
//! ```
//! use cursor_bst::Tree;
//!
//! let mut tree = Tree::new();
//! let mut cursor = tree.cursor_mut();
//! cursor.insert(2).unwrap();
//!
//! let mut right = cursor.right();
//! right.insert(3).unwrap();
//!
//! // Lift `3` above `2`.
//! let mut root = right.up().unwrap();
//! root.rotate_left().unwrap();
//! assert_eq!(root.consult(), Ok(&3));
//! assert_eq!(root.left().consult(), Ok(&2));
//!
//! assert_eq!(tree.height(), 2);
//! ```

use std::fmt;

use crate::cursor::{Cursor, CursorMut};

/// An owned, possibly empty, child slot.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// One element and its two subtrees.
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn leaf(element: T) -> Self {
        Self {
            element,
            left: None,
            right: None,
        }
    }
}

/// A binary tree of elements with no ordering rules of its own.
///
/// Trees are also what [`CursorMut::cut`] hands back and what [`CursorMut::paste`] consumes,
/// so a detached subtree always has exactly one owner.
pub struct Tree<T> {
    pub(crate) root: Link<T>,
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    // Same as `Drop`: a derived `Clone` would recurse once per level.
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        {
            let mut stack: Vec<(&Node<T>, &mut Link<T>)> = self
                .root
                .as_deref()
                .map(|node| (node, &mut cloned.root))
                .into_iter()
                .collect();
            while let Some((node, slot)) = stack.pop() {
                let copy = slot.insert(Box::new(Node::leaf(node.element.clone())));
                if let Some(left) = node.left.as_deref() {
                    stack.push((left, &mut copy.left));
                }
                if let Some(right) = node.right.as_deref() {
                    stack.push((right, &mut copy.right));
                }
            }
        }

        cloned
    }
}

impl<T> fmt::Debug for Tree<T> {
    /// Only the shape is shown. Walk the tree with a [`Cursor`] to see the elements.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.count())
            .field("height", &self.height())
            .finish()
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // Incrementally built trees can degenerate into a list so don't let `Box` recurse.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub(crate) fn from_link(root: Link<T>) -> Self {
        Self { root }
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a lone root has a
    /// height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }

    /// Counts the nodes by walking the whole tree.
    pub(crate) fn count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        count
    }

    /// A read-only cursor positioned at the root (or at bottom if the tree is empty).
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.root.as_deref())
    }

    /// A mutating cursor positioned at the root slot. The tree is exclusively borrowed for as
    /// long as the cursor lives.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(&mut self.root)
    }

    /// Takes the element out of the root, dropping anything beneath it.
    pub(crate) fn into_element(mut self) -> Option<T> {
        self.root.take().map(|root| {
            let Node {
                element,
                left,
                right,
            } = *root;
            drop(Self::from_link(left));
            drop(Self::from_link(right));
            element
        })
    }

    pub(crate) fn into_link(mut self) -> Link<T> {
        self.root.take()
    }
}
