#![forbid(unsafe_code)]

//! Input intents and their outcomes.
//!
//! The input driver (debouncing, long-press detection, rotation speed)
//! lives outside this crate. It turns raw device events into [`Intent`]s,
//! which [`Controller::apply`](crate::Controller::apply) executes against
//! the active item.

use crate::item::NodeId;

/// A discrete navigation request from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move to the next sibling.
    Advance,
    /// Move to the previous sibling.
    Retreat,
    /// Enter the submenu, or utilize a leaf.
    Enter,
    /// Leave to the parent item.
    Back,
    /// Toggle a checkable item or select a radio item.
    Toggle,
}

/// What an applied [`Intent`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The cursor moved to this item.
    Moved(NodeId),
    /// The active leaf was utilized; the cursor did not move.
    Utilized(NodeId),
    /// The check state of `item` is now `checked`.
    Toggled {
        /// The toggled item.
        item: NodeId,
        /// Flag after the change.
        checked: bool,
    },
}

impl Outcome {
    /// The item the outcome refers to.
    #[must_use]
    pub fn node(self) -> NodeId {
        match self {
            Self::Moved(node) | Self::Utilized(node) => node,
            Self::Toggled { item, .. } => item,
        }
    }
}
