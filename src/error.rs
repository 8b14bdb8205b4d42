//! Errors surfaced by the cursor primitives and by the set itself.

use thiserror::Error;

/// A structural operation was attempted from a cursor state that does not allow it.
///
/// The set never lets these escape: seeing one from inside [`Bst`][crate::Bst] means an
/// algorithm broke an invariant, so it panics instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor denotes no node, so there is nothing to consult, cut, or walk from.
    #[error("cursor is at the bottom of the tree")]
    Bottom,
    /// `insert` or `paste` was called on a slot already holding a node.
    #[error("position is already occupied")]
    Occupied,
    /// `rotate_left` needs a right child to lift up.
    #[error("cannot rotate left without a right child")]
    NoRightChild,
    /// `up` was called at the position the walk started from.
    #[error("cursor has no recorded parent")]
    AtRoot,
    /// The cursor walked further down than a bottom position and has no slot to fill.
    #[error("cursor is below the bottom of the tree")]
    NoSlot,
}

/// Errors returned by [`Bst`][crate::Bst] lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No stored element compares equal to the one asked for.
    #[error("element not present, check `contains` first")]
    NotFound,
}
