#![forbid(unsafe_code)]

//! Cursor state machine over a [`Tree`].
//!
//! The [`Controller`] owns the tree and the single active-item cursor. It
//! exposes four navigation transitions and the check/radio mutations:
//!
//! | Operation | Moves to | Fails with |
//! |-----------|----------|------------|
//! | [`advance`](Controller::advance) | next sibling | [`Reason::NoNext`] |
//! | [`retreat`](Controller::retreat) | previous sibling | [`Reason::NoPrev`] |
//! | [`descend`](Controller::descend) | submenu head, or fires *utilized* on a leaf | never |
//! | [`ascend`](Controller::ascend) | parent | [`Reason::NoParent`] |
//!
//! A transition that moves the cursor notifies the listener once, after the
//! move is committed. A failed transition changes nothing and notifies
//! nobody.
//!
//! # Radio scoping
//!
//! Radio groups are resolved as `(level, group number)` pairs. Selecting a
//! radio item only touches items of the same group number *on the same
//! sibling level*; two submenus may both use group 1 without interference.

use std::fmt;

use crate::error::{MenuError, Reason, Result};
use crate::event::MenuListener;
use crate::intent::{Intent, Outcome};
use crate::item::{Item, ItemKind, NodeId};
use crate::logging::{debug, debug_span, trace};
use crate::tree::Tree;

/// Result of [`Controller::descend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descend {
    /// The cursor moved to the head of the submenu.
    Entered(NodeId),
    /// The active item is a leaf; the cursor stayed and *utilized* fired.
    Utilized(NodeId),
}

/// Menu controller: tree, cursor and listener.
pub struct Controller<D = ()> {
    tree: Tree<D>,
    active: NodeId,
    listener: Option<Box<dyn MenuListener<D>>>,
}

impl<D> fmt::Debug for Controller<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("items", &self.tree.len())
            .field("active", &self.active)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<D> Controller<D> {
    /// Wrap `tree`. The root becomes the active item.
    #[must_use]
    pub fn new(tree: Tree<D>) -> Self {
        let active = tree.root();
        Self {
            tree,
            active,
            listener: None,
        }
    }

    /// The controlled tree.
    #[must_use]
    pub fn tree(&self) -> &Tree<D> {
        &self.tree
    }

    /// Give the tree back, dropping cursor and listener.
    #[must_use]
    pub fn into_tree(self) -> Tree<D> {
        self.tree
    }

    /// The active item handle.
    #[must_use]
    pub fn active(&self) -> NodeId {
        self.active
    }

    /// The active item.
    #[must_use]
    pub fn active_item(&self) -> &Item<D> {
        &self.tree[self.active]
    }

    /// Item behind `node`.
    #[must_use]
    pub fn item(&self, node: NodeId) -> Option<&Item<D>> {
        self.tree.get(node)
    }

    /// Mutable item behind `node`, for updating tag and payload.
    pub fn item_mut(&mut self, node: NodeId) -> Option<&mut Item<D>> {
        self.tree.get_mut(node)
    }

    /// Install the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl MenuListener<D> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove and return the listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn MenuListener<D>>> {
        self.listener.take()
    }

    /// Move to the next sibling.
    pub fn advance(&mut self) -> Result<NodeId> {
        match self.tree.next(self.active) {
            Some(next) => Ok(self.move_to(next)),
            None => Err(reject(Reason::NoNext)),
        }
    }

    /// Move to the previous sibling.
    pub fn retreat(&mut self) -> Result<NodeId> {
        match self.tree.prev(self.active) {
            Some(prev) => Ok(self.move_to(prev)),
            None => Err(reject(Reason::NoPrev)),
        }
    }

    /// Enter the submenu of the active item, or signal that a leaf was
    /// utilized.
    pub fn descend(&mut self) -> Result<Descend> {
        match self.tree.first_child(self.active) {
            Some(head) => Ok(Descend::Entered(self.move_to(head))),
            None => {
                let leaf = self.active;
                debug!(item = %leaf, id = self.tree[leaf].id(), "item utilized");
                self.notify_utilized(leaf);
                Ok(Descend::Utilized(leaf))
            }
        }
    }

    /// Move to the parent of the active item.
    pub fn ascend(&mut self) -> Result<NodeId> {
        match self.tree.parent(self.active) {
            Some(parent) => Ok(self.move_to(parent)),
            None => Err(reject(Reason::NoParent)),
        }
    }

    /// Put the cursor on an arbitrary item, for example a position restored
    /// by the host at startup.
    ///
    /// The item must be reachable from the root; detached items are
    /// rejected with [`MenuError::InvalidArgument`].
    pub fn set_active(&mut self, node: NodeId) -> Result<NodeId> {
        self.tree.check_node(node)?;
        if !self.is_reachable(node) {
            return Err(MenuError::InvalidArgument("item is not reachable from the root"));
        }
        if node != self.active {
            self.move_to(node);
        }
        Ok(node)
    }

    /// Search the menu for a user id; see [`Tree::find`].
    ///
    /// The root is tested first, then the top-level menu. With `recursive`
    /// unset only the top-level items are scanned.
    pub fn find(&self, id: i32, recursive: bool) -> Result<NodeId> {
        let root = self.tree.root();
        if self.tree[root].id() == id {
            return Ok(root);
        }
        self.tree
            .first_child(root)
            .and_then(|top| self.tree.find(top, id, recursive))
            .ok_or(MenuError::NotFound { id })
    }

    /// Set the flag of a checkable item.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<()> {
        let item = self.lookup_mut(node)?;
        if !item.is_checkable() {
            return Err(reject(Reason::NotCheckable));
        }
        item.set_checked(checked);
        debug!(item = %node, checked, "checkable item set");
        Ok(())
    }

    /// Flip a checkable item; returns the new flag.
    pub fn toggle(&mut self, node: NodeId) -> Result<bool> {
        let checked = !self.lookup_mut(node)?.is_checked();
        self.set_checked(node, checked)?;
        Ok(checked)
    }

    /// Check a radio item and uncheck the other members of its group on the
    /// same level. Selecting an already checked item succeeds.
    pub fn select_radio(&mut self, node: NodeId) -> Result<NodeId> {
        let item = self.lookup_mut(node)?;
        let Some(group) = item.radio_group() else {
            return Err(reject(Reason::NotRadio));
        };

        // Walk the whole level even when `node` is already checked; other
        // members may be checked too.
        let mut cursor = Some(self.tree.first_of_level(node));
        while let Some(candidate) = cursor {
            cursor = self.tree.next(candidate);
            let member = self.tree.item_mut_unchecked(candidate);
            if member.radio_group() == Some(group) {
                member.set_checked(candidate == node);
            }
        }
        debug!(item = %node, group = group.get(), "radio item selected");
        Ok(node)
    }

    /// Run one input intent against the active item.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome> {
        let _span = debug_span!("menu_apply", ?intent).entered();
        trace!(active = %self.active, "applying intent");
        match intent {
            Intent::Advance => self.advance().map(Outcome::Moved),
            Intent::Retreat => self.retreat().map(Outcome::Moved),
            Intent::Back => self.ascend().map(Outcome::Moved),
            Intent::Enter => Ok(match self.descend()? {
                Descend::Entered(head) => Outcome::Moved(head),
                Descend::Utilized(leaf) => Outcome::Utilized(leaf),
            }),
            Intent::Toggle => {
                let item = self.active;
                match self.tree[item].kind() {
                    ItemKind::Checkable => self
                        .toggle(item)
                        .map(|checked| Outcome::Toggled { item, checked }),
                    ItemKind::Radio(_) => self.select_radio(item).map(|item| Outcome::Toggled {
                        item,
                        checked: true,
                    }),
                    ItemKind::Plain => Err(reject(Reason::NotToggleable)),
                }
            }
        }
    }

    fn move_to(&mut self, new: NodeId) -> NodeId {
        let old = self.active;
        self.active = new;
        debug!(from = %old, to = %new, "active item changed");
        self.notify_active_changed(old, new);
        new
    }

    fn is_reachable(&self, node: NodeId) -> bool {
        let root = self.tree.root();
        node == root || self.tree.ancestors(node).any(|n| n == root)
    }

    fn lookup_mut(&mut self, node: NodeId) -> Result<&mut Item<D>> {
        self.tree
            .get_mut(node)
            .ok_or(MenuError::InvalidArgument("node does not belong to this tree"))
    }

    fn notify_active_changed(&mut self, old: NodeId, new: NodeId) {
        if let Some(mut listener) = self.listener.take() {
            listener.on_active_changed(self, old, new);
            self.listener = Some(listener);
        }
    }

    fn notify_utilized(&mut self, item: NodeId) {
        if let Some(mut listener) = self.listener.take() {
            listener.on_utilized(self, item);
            self.listener = Some(listener);
        }
    }
}

fn reject(reason: Reason) -> MenuError {
    trace!(%reason, "operation not applicable");
    MenuError::NotApplicable(reason)
}
