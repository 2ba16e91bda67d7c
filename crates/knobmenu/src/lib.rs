#![forbid(unsafe_code)]

//! knobmenu public facade crate.
//!
//! Re-exports the menu model and controller from `knobmenu-core` and, with
//! the default `render` feature, the viewport renderer from
//! `knobmenu-render`.
//!
//! ```
//! use knobmenu::prelude::*;
//!
//! let tree: Tree = Tree::from_node(
//!     MenuNode::new(Item::new(0, "root"))
//!         .child(MenuNode::new(Item::new(1, "Start")))
//!         .child(MenuNode::new(Item::new(2, "Stop"))),
//! );
//! let mut menu = Controller::new(tree);
//! menu.apply(Intent::Enter)?;
//! assert_eq!(menu.apply(Intent::Advance)?, Outcome::Moved(menu.active()));
//!
//! let mut lcd = ListRenderer::new(1);
//! let (_, lines) = lcd.render_lines(&menu, 8);
//! assert_eq!(lines, ["> Stop  "]);
//! # Ok::<(), MenuError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use knobmenu_core::{
    Controller, Descend, FnListener, Intent, Item, ItemKind, MenuError, MenuEvent, MenuListener,
    MenuNode, NodeId, Outcome, RadioGroup, Reason, Result, Siblings, Tree,
};

// --- Render re-exports -----------------------------------------------------

#[cfg(feature = "render")]
pub use knobmenu_render::{ListRenderer, RenderItem, RenderPass, RowFormat};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Controller, Descend, Intent, Item, MenuError, MenuEvent, MenuListener, MenuNode, NodeId,
        Outcome, RadioGroup, Result, Tree,
    };

    #[cfg(feature = "render")]
    pub use crate::{ListRenderer, RowFormat};

    pub use crate::core;
    #[cfg(feature = "render")]
    pub use crate::render;
}

pub use knobmenu_core as core;
#[cfg(feature = "render")]
pub use knobmenu_render as render;
