#![forbid(unsafe_code)]

//! Scrolling list renderer.
//!
//! Shows the level that contains the active item through a window of
//! `viewport_size` consecutive siblings. The renderer performs no I/O: it
//! hands each visible item to a callback, and the host draws it.
//!
//! # Scroll policy
//!
//! The offset moves as little as possible. If the active item is above the
//! window the window starts at it; if below, the window ends at it;
//! otherwise the offset is kept. The offset belongs to one level only: when
//! the active item's level changes, the offset restarts from 0 before the
//! adjustment.
//!
//! ```
//! use knobmenu_core::{Controller, Item, Tree};
//! use knobmenu_render::ListRenderer;
//!
//! let mut tree: Tree = Tree::default();
//! let root = tree.root();
//! for id in 0..5 {
//!     tree.append_child(root, Item::new(id, format!("Item {id}"))).unwrap();
//! }
//! let mut menu = Controller::new(tree);
//! menu.descend().unwrap();
//! for _ in 0..4 {
//!     menu.advance().unwrap();
//! }
//!
//! let mut renderer = ListRenderer::new(2);
//! let mut visible = Vec::new();
//! let pass = renderer.render(&menu, |row| visible.push(row.index));
//! assert_eq!(pass.scroll_offset, 3);
//! assert_eq!(visible, [3, 4]);
//! ```

use knobmenu_core::{Controller, Item, NodeId, Tree};

use crate::row::RowFormat;

/// One visible item handed to the render callback.
#[derive(Debug)]
pub struct RenderItem<'a, D> {
    /// Handle of the item.
    pub node: NodeId,
    /// The item itself.
    pub item: &'a Item<D>,
    /// Whether this is the active item.
    pub is_active: bool,
    /// Whether the item opens a submenu.
    pub has_submenu: bool,
    /// Position within the level, counted from the first sibling.
    pub index: usize,
    /// Position within the viewport (0 is the top row).
    pub viewport_index: usize,
}

impl<D> Clone for RenderItem<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for RenderItem<'_, D> {}

/// Summary of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPass {
    /// First visible index after the pass.
    pub scroll_offset: usize,
    /// Index of the active item within its level.
    pub active_index: usize,
    /// Number of items in the rendered level.
    pub level_len: usize,
    /// Number of callback invocations.
    pub rendered: usize,
    /// Items exist above the window.
    pub more_above: bool,
    /// Items exist below the window.
    pub more_below: bool,
}

/// Viewport state for rendering the active level as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRenderer {
    viewport_size: usize,
    scroll_offset: usize,
    /// Head of the level `scroll_offset` was computed for.
    level_head: Option<NodeId>,
    row_format: RowFormat,
}

impl Default for ListRenderer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ListRenderer {
    /// Create a renderer showing `viewport_size` rows (at least one).
    #[must_use]
    pub fn new(viewport_size: usize) -> Self {
        Self {
            viewport_size: viewport_size.max(1),
            scroll_offset: 0,
            level_head: None,
            row_format: RowFormat::default(),
        }
    }

    /// Set the row format used by [`render_lines`](Self::render_lines).
    #[must_use]
    pub fn with_row_format(mut self, row_format: RowFormat) -> Self {
        self.row_format = row_format;
        self
    }

    #[must_use]
    pub fn row_format(&self) -> &RowFormat {
        &self.row_format
    }

    /// Number of rows in the window.
    #[must_use]
    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    /// Resize the window. Takes effect on the next pass; 0 is treated as 1.
    pub fn set_viewport_size(&mut self, viewport_size: usize) {
        self.viewport_size = viewport_size.max(1);
    }

    /// First visible index as of the last pass.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Forget the scroll position.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.level_head = None;
    }

    /// Render the level holding the controller's active item.
    pub fn render<D>(
        &mut self,
        menu: &Controller<D>,
        on_item: impl FnMut(RenderItem<'_, D>),
    ) -> RenderPass {
        self.render_level(menu.tree(), menu.active(), on_item)
    }

    /// Render the level holding `active` in `tree`.
    ///
    /// Calls `on_item` once per visible item, top to bottom.
    pub fn render_level<D>(
        &mut self,
        tree: &Tree<D>,
        active: NodeId,
        mut on_item: impl FnMut(RenderItem<'_, D>),
    ) -> RenderPass {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "menu_render",
            active = %active,
            viewport = self.viewport_size,
            offset = self.scroll_offset
        )
        .entered();

        if !tree.contains(active) {
            return RenderPass::default();
        }

        let top = tree.first_of_level(active);
        if self.level_head != Some(top) {
            self.scroll_offset = 0;
            self.level_head = Some(top);
        }

        let active_index = tree.index_in_level(active);
        self.scroll_to(active_index);

        let mut rendered = 0;
        let mut level_len = 0;
        for (index, node) in tree.siblings_from(top).enumerate() {
            level_len = index + 1;
            if index < self.scroll_offset || rendered == self.viewport_size {
                continue;
            }
            on_item(RenderItem {
                node,
                item: &tree[node],
                is_active: node == active,
                has_submenu: tree.has_submenu(node),
                index,
                viewport_index: index - self.scroll_offset,
            });
            rendered += 1;
        }

        RenderPass {
            scroll_offset: self.scroll_offset,
            active_index,
            level_len,
            rendered,
            more_above: self.scroll_offset > 0,
            more_below: self.scroll_offset + self.viewport_size < level_len,
        }
    }

    /// Render the active level as text rows of `width` cells.
    ///
    /// Always returns `viewport_size` rows; rows past the end of a short
    /// level are blank.
    pub fn render_lines<D>(&mut self, menu: &Controller<D>, width: usize) -> (RenderPass, Vec<String>) {
        let format = self.row_format.clone();
        let mut lines = Vec::with_capacity(self.viewport_size);
        let pass = self.render(menu, |row| lines.push(format.format_row(&row, width)));
        lines.resize(self.viewport_size, " ".repeat(width));
        (pass, lines)
    }

    /// Minimal movement that brings `index` into the window.
    fn scroll_to(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.viewport_size {
            self.scroll_offset = index + 1 - self.viewport_size;
        }
    }
}
