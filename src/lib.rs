//! An ordered set built on a Binary Search Tree (BST) whose every structural change goes
//! through a cursor.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This crate does not rebalance as it goes, so the
//! height depends on the order elements arrive in: anywhere from `O(lg N)` to `N`.
//! [`Bst::from_sorted`] builds the shortest possible tree from sorted input.
//!
//! ## Layout
//!
//! - [`tree`] holds the shape: a [`Tree`] of owned nodes that knows nothing about ordering.
//! - [`cursor`] moves around a tree and changes it: [`Cursor`] reads, [`CursorMut`] can also
//!   insert, cut, paste, and rotate.
//! - [`Bst`] decides *where* to go and leaves all the pointer work to the cursor.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod bst;
pub mod cursor;
pub mod error;
pub mod tree;


pub use crate::bst::{Bst, IntoIter, Iter, PredSucc};
pub use crate::cursor::{Cursor, CursorMut};
pub use crate::error::{CursorError, Error};
pub use crate::tree::Tree;
