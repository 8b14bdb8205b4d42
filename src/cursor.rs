//! Positions over a [`Tree`].
//!
//! A cursor is either at a node or at *bottom*, meaning "no node here". Bottom is both an
//! empty subtree and the exact slot a new node can be inserted or a detached subtree pasted
//! into. Cursors remember the positions they walked down through so [`Cursor::up`] and
//! [`CursorMut::up`] can return to them; there are no parent pointers in the tree itself.
//!
//! [`Cursor`] only reads. [`CursorMut`] can also [`insert`][CursorMut::insert],
//! [`cut`][CursorMut::cut], [`paste`][CursorMut::paste] and
//! [`rotate_left`][CursorMut::rotate_left]. None of these know anything about ordering.
//!
//! Moving down from bottom keeps the cursor at bottom. `up` still retraces the walk, but a
//! [`CursorMut`] that far down has no slot to fill so `insert` and `paste` fail with
//! [`CursorError::NoSlot`].

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::CursorError;
use crate::tree::{Link, Node, Tree};

/// A read-only position in a [`Tree`].
pub struct Cursor<'a, T> {
    node: Option<&'a Node<T>>,
    ancestors: Vec<Option<&'a Node<T>>>,
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            ancestors: self.ancestors.clone(),
        }
    }
}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("depth", &self.ancestors.len())
            .field("element", &self.node.map(|n| &n.element))
            .finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            node: root,
            ancestors: Vec::new(),
        }
    }

    /// Whether this position denotes no node.
    pub fn is_bottom(&self) -> bool {
        self.node.is_none()
    }

    /// Whether this position is a node with no children. Always `false` at bottom.
    pub fn is_leaf(&self) -> bool {
        self.node
            .map_or(false, |n| n.left.is_none() && n.right.is_none())
    }

    /// Whether this position is a node with a left child.
    pub fn has_left(&self) -> bool {
        self.node.map_or(false, |n| n.left.is_some())
    }

    /// Whether this position is a node with a right child.
    pub fn has_right(&self) -> bool {
        self.node.map_or(false, |n| n.right.is_some())
    }

    /// The element stored here. The reference outlives the cursor.
    pub fn consult(&self) -> Result<&'a T, CursorError> {
        self.node.map(|n| &n.element).ok_or(CursorError::Bottom)
    }

    /// Moves to the left child slot, which may be bottom.
    pub fn left(self) -> Self {
        self.descend(|n| n.left.as_deref())
    }

    /// Moves to the right child slot, which may be bottom.
    pub fn right(self) -> Self {
        self.descend(|n| n.right.as_deref())
    }

    /// Moves back to the position this cursor came down from.
    ///
    /// # Errors
    ///
    /// [`CursorError::AtRoot`] if the cursor is where its walk started.
    pub fn up(mut self) -> Result<Self, CursorError> {
        self.node = self.ancestors.pop().ok_or(CursorError::AtRoot)?;
        Ok(self)
    }

    /// Follows left children until there are none, stopping at the smallest node of this
    /// subtree.
    ///
    /// # Errors
    ///
    /// [`CursorError::Bottom`] if there is no subtree here.
    pub fn leftmost(mut self) -> Result<Self, CursorError> {
        if self.is_bottom() {
            return Err(CursorError::Bottom);
        }
        while self.has_left() {
            self = self.left();
        }

        Ok(self)
    }

    /// Follows right children until there are none. See [`Cursor::leftmost`].
    pub fn rightmost(mut self) -> Result<Self, CursorError> {
        if self.is_bottom() {
            return Err(CursorError::Bottom);
        }
        while self.has_right() {
            self = self.right();
        }

        Ok(self)
    }

    fn descend(mut self, child: impl FnOnce(&'a Node<T>) -> Option<&'a Node<T>>) -> Self {
        let next = self.node.and_then(child);
        self.ancestors.push(self.node);
        self.node = next;
        self
    }
}

/// A position in a [`Tree`] that can change the tree's shape.
///
/// The cursor points at a *slot*: the tree's root or one of a node's child links. Every
/// structural primitive acts on that slot and everything beneath it, never above it, so the
/// slots recorded on the way down stay valid.
pub struct CursorMut<'a, T> {
    /// `None` once the cursor has moved below a bottom position.
    slot: Option<NonNull<Link<T>>>,
    ancestors: Vec<Option<NonNull<Link<T>>>>,
    _marker: PhantomData<&'a mut Link<T>>,
}

impl<'a, T> fmt::Debug for CursorMut<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("depth", &self.ancestors.len())
            .field("element", &self.consult().ok())
            .finish()
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(root: &'a mut Link<T>) -> Self {
        Self {
            slot: Some(NonNull::from(root)),
            ancestors: Vec::new(),
            _marker: PhantomData,
        }
    }

    fn link(&self) -> Option<&Link<T>> {
        // SAFETY: `slot` was derived from the `&'a mut` this cursor was created from, either
        // directly or through the child links of nodes it owns. Primitives only ever replace
        // the contents of the current slot so the slot itself (and every slot in `ancestors`)
        // is never moved or freed while the cursor exists. Only the top of the walk is ever
        // dereferenced and `&self` prevents a simultaneous `link_mut`.
        self.slot.map(|slot| unsafe { slot.as_ref() })
    }

    fn link_mut(&mut self) -> Option<&mut Link<T>> {
        // SAFETY: See `link`. `&mut self` makes this the only live reference into the slot.
        self.slot.map(|mut slot| unsafe { slot.as_mut() })
    }

    fn node(&self) -> Option<&Node<T>> {
        self.link().and_then(|link| link.as_deref())
    }

    /// Whether this position denotes no node.
    pub fn is_bottom(&self) -> bool {
        self.node().is_none()
    }

    /// Whether this position is a node with no children. Always `false` at bottom.
    pub fn is_leaf(&self) -> bool {
        self.node()
            .map_or(false, |n| n.left.is_none() && n.right.is_none())
    }

    /// Whether this position is a node with a left child.
    pub fn has_left(&self) -> bool {
        self.node().map_or(false, |n| n.left.is_some())
    }

    /// Whether this position is a node with a right child.
    pub fn has_right(&self) -> bool {
        self.node().map_or(false, |n| n.right.is_some())
    }

    /// The element stored here.
    pub fn consult(&self) -> Result<&T, CursorError> {
        self.node().map(|n| &n.element).ok_or(CursorError::Bottom)
    }

    /// Moves to the left child slot, which may be bottom.
    pub fn left(self) -> Self {
        self.descend(|n| &mut n.left)
    }

    /// Moves to the right child slot, which may be bottom.
    pub fn right(self) -> Self {
        self.descend(|n| &mut n.right)
    }

    /// Moves back to the slot this cursor came down from.
    ///
    /// # Errors
    ///
    /// [`CursorError::AtRoot`] if the cursor is where its walk started.
    pub fn up(mut self) -> Result<Self, CursorError> {
        self.slot = self.ancestors.pop().ok_or(CursorError::AtRoot)?;
        Ok(self)
    }

    /// Follows left children until there are none.
    ///
    /// # Errors
    ///
    /// [`CursorError::Bottom`] if there is no subtree here.
    pub fn leftmost(mut self) -> Result<Self, CursorError> {
        if self.is_bottom() {
            return Err(CursorError::Bottom);
        }
        while self.has_left() {
            self = self.left();
        }

        Ok(self)
    }

    /// Follows right children until there are none. See [`CursorMut::leftmost`].
    pub fn rightmost(mut self) -> Result<Self, CursorError> {
        if self.is_bottom() {
            return Err(CursorError::Bottom);
        }
        while self.has_right() {
            self = self.right();
        }

        Ok(self)
    }

    /// Creates a leaf holding `element` at this bottom position.
    ///
    /// # Errors
    ///
    /// - [`CursorError::Occupied`] if there is already a node here.
    /// - [`CursorError::NoSlot`] if the cursor moved below bottom.
    pub fn insert(&mut self, element: T) -> Result<(), CursorError> {
        let link = self.link_mut().ok_or(CursorError::NoSlot)?;
        if link.is_some() {
            return Err(CursorError::Occupied);
        }
        *link = Some(Box::new(Node::leaf(element)));

        Ok(())
    }

    /// Detaches the subtree rooted here and hands it back. The slot becomes bottom and the
    /// cursor stays on it, ready for a [`paste`][CursorMut::paste].
    ///
    /// # Errors
    ///
    /// [`CursorError::Bottom`] if there is nothing here to cut.
    pub fn cut(&mut self) -> Result<Tree<T>, CursorError> {
        let link = self.link_mut().ok_or(CursorError::Bottom)?;
        let root = link.take().ok_or(CursorError::Bottom)?;

        Ok(Tree::from_link(Some(root)))
    }

    /// Attaches `tree` at this bottom position. Pasting an empty tree changes nothing.
    ///
    /// # Errors
    ///
    /// - [`CursorError::Occupied`] if there is already a node here, even when `tree` is
    ///   empty.
    /// - [`CursorError::NoSlot`] if the cursor moved below bottom and `tree` is not empty.
    pub fn paste(&mut self, tree: Tree<T>) -> Result<(), CursorError> {
        match self.link_mut() {
            Some(link) if link.is_some() => Err(CursorError::Occupied),
            Some(link) => {
                *link = tree.into_link();
                Ok(())
            }
            None if tree.is_empty() => Ok(()),
            None => Err(CursorError::NoSlot),
        }
    }

    /// Rotates the subtree here to the left. This moves the right child up vertically and
    /// the current node down vertically; the in-order sequence is unchanged. The cursor stays
    /// on the same slot, which now holds the former right child.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoRightChild`] if there is no right child to lift. The tree is left
    /// untouched.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      slot                      slot
    ///       |                         |
    ///    old_root                  new_root
    ///    /     \                   /     \
    ///   x    new_root  rotate -> old_root  z
    ///         /  \               /  \
    ///        y    z             x    y
    /// ```
    pub fn rotate_left(&mut self) -> Result<(), CursorError> {
        let link = self.link_mut().ok_or(CursorError::NoRightChild)?;
        let mut old_root = link.take().ok_or(CursorError::NoRightChild)?;
        let mut new_root = match old_root.right.take() {
            Some(new_root) => new_root,
            None => {
                *link = Some(old_root);
                return Err(CursorError::NoRightChild);
            }
        };

        old_root.right = new_root.left.take();
        new_root.left = Some(old_root);
        *link = Some(new_root);

        Ok(())
    }

    fn descend(mut self, child: impl FnOnce(&mut Node<T>) -> &mut Link<T>) -> Self {
        let next = self
            .link_mut()
            .and_then(|link| link.as_deref_mut())
            .map(|n| NonNull::from(child(n)));
        self.ancestors.push(self.slot);
        self.slot = next;
        self
    }
}
