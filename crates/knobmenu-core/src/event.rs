#![forbid(unsafe_code)]

//! Change notifications emitted by the [`Controller`].
//!
//! A controller carries at most one [`MenuListener`]. Listeners are called
//! after the cursor has been committed, with a shared borrow of the
//! controller, so they observe the new state. Each navigation call notifies
//! at most once.
//!
//! Hosts that prefer pulling over callbacks can install an
//! [`mpsc::Sender`] and drain the matching receiver after every call:
//!
//! ```
//! use std::sync::mpsc;
//! use knobmenu_core::{Controller, Item, MenuEvent, MenuNode, Tree};
//!
//! let tree: Tree = Tree::from_node(
//!     MenuNode::new(Item::new(0, "root")).child(MenuNode::new(Item::new(1, "Start"))),
//! );
//! let (tx, rx) = mpsc::channel();
//! let mut menu = Controller::new(tree);
//! menu.set_listener(tx);
//!
//! menu.descend().unwrap(); // root -> Start
//! menu.descend().unwrap(); // Start is a leaf
//!
//! let events: Vec<MenuEvent> = rx.try_iter().collect();
//! assert!(matches!(events[0], MenuEvent::ActiveChanged { .. }));
//! assert!(matches!(events[1], MenuEvent::Utilized { .. }));
//! ```

use std::sync::mpsc;

use crate::controller::Controller;
use crate::item::NodeId;

/// A notification, in pull form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    /// The cursor moved from `old` to `new`.
    ActiveChanged {
        /// Previously active item.
        old: NodeId,
        /// Currently active item.
        new: NodeId,
    },
    /// A leaf was entered: the selection signal for terminal actions.
    Utilized {
        /// The entered leaf.
        item: NodeId,
    },
}

/// Receiver of controller notifications.
///
/// Both methods default to doing nothing. Implementations must not assume
/// they can navigate the menu from inside a callback; the controller is only
/// borrowed immutably.
pub trait MenuListener<D> {
    /// The active item changed. `menu.active()` already equals `new`.
    fn on_active_changed(&mut self, menu: &Controller<D>, old: NodeId, new: NodeId) {
        let _ = (menu, old, new);
    }

    /// `descend` was called on a leaf.
    fn on_utilized(&mut self, menu: &Controller<D>, item: NodeId) {
        let _ = (menu, item);
    }
}

impl<D> MenuListener<D> for mpsc::Sender<MenuEvent> {
    fn on_active_changed(&mut self, _menu: &Controller<D>, old: NodeId, new: NodeId) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.send(MenuEvent::ActiveChanged { old, new });
    }

    fn on_utilized(&mut self, _menu: &Controller<D>, item: NodeId) {
        let _ = self.send(MenuEvent::Utilized { item });
    }
}

/// Adapter turning a closure into a [`MenuListener`].
///
/// ```
/// use knobmenu_core::{Controller, FnListener, MenuEvent, Tree};
///
/// let mut menu: Controller = Controller::new(Tree::default());
/// menu.set_listener(FnListener::new(|menu: &Controller, event: MenuEvent| {
///     if let MenuEvent::Utilized { item } = event {
///         assert_eq!(item, menu.active());
///     }
/// }));
/// menu.descend().unwrap();
/// ```
pub struct FnListener<F> {
    f: F,
}

impl<F> FnListener<F> {
    /// Wrap `f`, called with every event.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> std::fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

impl<D, F> MenuListener<D> for FnListener<F>
where
    F: FnMut(&Controller<D>, MenuEvent),
{
    fn on_active_changed(&mut self, menu: &Controller<D>, old: NodeId, new: NodeId) {
        (self.f)(menu, MenuEvent::ActiveChanged { old, new });
    }

    fn on_utilized(&mut self, menu: &Controller<D>, item: NodeId) {
        (self.f)(menu, MenuEvent::Utilized { item });
    }
}
