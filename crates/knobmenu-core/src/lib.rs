#![forbid(unsafe_code)]

//! Menu engine for devices driven by a single rotary knob.
//!
//! A [`Tree`] arena holds the menu [`Item`]s, linked into sibling levels
//! and submenus by [`NodeId`] handles. A [`Controller`] owns the tree, keeps
//! the active-item cursor and reports changes to a [`MenuListener`].
//!
//! ```
//! use knobmenu_core::{Controller, Descend, Item, MenuNode, RadioGroup, Tree};
//!
//! let units = RadioGroup::new(16).unwrap();
//! let tree: Tree = Tree::from_node(
//!     MenuNode::new(Item::new(0, "root"))
//!         .child(MenuNode::new(Item::new(11, "Minimal frequency")))
//!         .child(
//!             MenuNode::new(Item::new(16, "Frequency units"))
//!                 .child(MenuNode::new(Item::radio(161, "RPM", units, true)))
//!                 .child(MenuNode::new(Item::radio(162, "Hz", units, false))),
//!         ),
//! );
//!
//! let mut menu = Controller::new(tree);
//! menu.descend().unwrap();
//! menu.advance().unwrap();
//! assert!(matches!(menu.descend(), Ok(Descend::Entered(_))));
//!
//! let hz = menu.find(162, true).unwrap();
//! menu.select_radio(hz).unwrap();
//! assert_eq!(menu.tree().checked_radio(hz, units), Some(hz));
//! ```

pub mod controller;
pub mod error;
pub mod event;
pub mod intent;
pub mod item;
pub mod logging;
pub mod tree;

pub use controller::{Controller, Descend};
pub use error::{MenuError, Reason, Result};
pub use event::{FnListener, MenuEvent, MenuListener};
pub use intent::{Intent, Outcome};
pub use item::{Item, ItemKind, NodeId, RadioGroup};
pub use tree::{MenuNode, Siblings, Tree};
