#![forbid(unsafe_code)]

//! Viewport rendering for knobmenu.
//!
//! - [`ListRenderer`] - scrolls a fixed-height window over the active level
//! - [`RowFormat`] - turns a visible item into a fixed-width text row
//!
//! ```
//! use knobmenu_core::{Controller, Item, MenuNode, Tree};
//! use knobmenu_render::{ListRenderer, RowFormat};
//!
//! let tree: Tree = Tree::from_node(
//!     MenuNode::new(Item::new(0, "root"))
//!         .child(MenuNode::new(Item::new(1, "Start")))
//!         .child(MenuNode::new(Item::checkable(2, "Loop", true))),
//! );
//! let mut menu = Controller::new(tree);
//! menu.descend().unwrap();
//!
//! let mut lcd = ListRenderer::new(2).with_row_format(RowFormat::ascii());
//! let (_, lines) = lcd.render_lines(&menu, 12);
//! assert_eq!(lines, ["> Start     ", "  [x] Loop  "]);
//! ```

pub mod list;
pub mod row;

pub use list::{ListRenderer, RenderItem, RenderPass};
pub use row::{RowFormat, display_width};
