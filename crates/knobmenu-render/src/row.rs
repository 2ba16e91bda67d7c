#![forbid(unsafe_code)]

//! Character-display row formatting.
//!
//! A row is laid out as
//!
//! ```text
//! <cursor|blank><state marker + ' '><caption ...padding...><submenu marker>
//! ```
//!
//! and is always exactly `width` cells wide. Widths are measured per
//! grapheme cluster, so wide characters never get split.

use std::borrow::Cow;

use knobmenu_core::{Item, ItemKind};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::list::RenderItem;

/// Marker set and layout for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFormat {
    cursor: Cow<'static, str>,
    blank: Cow<'static, str>,
    checked: Cow<'static, str>,
    unchecked: Cow<'static, str>,
    radio_on: Cow<'static, str>,
    radio_off: Cow<'static, str>,
    submenu: Cow<'static, str>,
    ellipsis: Cow<'static, str>,
}

impl Default for RowFormat {
    fn default() -> Self {
        Self::ascii()
    }
}

impl RowFormat {
    /// Markers that any HD44780-style character LCD can show.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            cursor: Cow::Borrowed("> "),
            blank: Cow::Borrowed("  "),
            checked: Cow::Borrowed("[x]"),
            unchecked: Cow::Borrowed("[ ]"),
            radio_on: Cow::Borrowed("(*)"),
            radio_off: Cow::Borrowed("( )"),
            submenu: Cow::Borrowed(">"),
            ellipsis: Cow::Borrowed(""),
        }
    }

    /// Markers for terminals and graphic displays.
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            cursor: Cow::Borrowed("▶ "),
            blank: Cow::Borrowed("  "),
            checked: Cow::Borrowed("☑"),
            unchecked: Cow::Borrowed("☐"),
            radio_on: Cow::Borrowed("◉"),
            radio_off: Cow::Borrowed("○"),
            submenu: Cow::Borrowed("›"),
            ellipsis: Cow::Borrowed("…"),
        }
    }

    /// Marker in front of the active row. Inactive rows get the same
    /// number of blank cells.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<Cow<'static, str>>) -> Self {
        self.cursor = cursor.into();
        self.blank = Cow::Owned(" ".repeat(display_width(&self.cursor)));
        self
    }

    /// Markers for checked and unchecked checkable items.
    #[must_use]
    pub fn with_check_markers(
        mut self,
        checked: impl Into<Cow<'static, str>>,
        unchecked: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.checked = checked.into();
        self.unchecked = unchecked.into();
        self
    }

    /// Markers for selected and unselected radio items.
    #[must_use]
    pub fn with_radio_markers(
        mut self,
        on: impl Into<Cow<'static, str>>,
        off: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.radio_on = on.into();
        self.radio_off = off.into();
        self
    }

    /// Right-aligned marker on items that open a submenu.
    #[must_use]
    pub fn with_submenu_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.submenu = marker.into();
        self
    }

    /// Appended to captions that had to be cut. Empty disables it.
    #[must_use]
    pub fn with_ellipsis(mut self, ellipsis: impl Into<Cow<'static, str>>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// State marker for `item`, `None` for plain items.
    #[must_use]
    pub fn state_marker<D>(&self, item: &Item<D>) -> Option<&str> {
        let marker = match (item.kind(), item.is_checked()) {
            (ItemKind::Plain, _) => return None,
            (ItemKind::Checkable, true) => &self.checked,
            (ItemKind::Checkable, false) => &self.unchecked,
            (ItemKind::Radio(_), true) => &self.radio_on,
            (ItemKind::Radio(_), false) => &self.radio_off,
        };
        Some(marker.as_ref())
    }

    /// Format `row` into exactly `width` display cells.
    #[must_use]
    pub fn format_row<D>(&self, row: &RenderItem<'_, D>, width: usize) -> String {
        let mut line = String::with_capacity(width);
        line.push_str(if row.is_active { self.cursor.as_ref() } else { self.blank.as_ref() });
        if let Some(marker) = self.state_marker(row.item) {
            line.push_str(marker);
            line.push(' ');
        }

        let suffix: &str = if row.has_submenu { self.submenu.as_ref() } else { "" };
        let room = width.saturating_sub(display_width(&line) + display_width(suffix));
        line.push_str(&self.fit_caption(row.item.caption(), room));

        let used = display_width(&line) + display_width(suffix);
        if used < width {
            line.extend(std::iter::repeat_n(' ', width - used));
        }
        line.push_str(suffix);

        // Markers alone may overflow a very narrow display.
        let (visible, cells) = take_cells(&line, width);
        let mut out = visible.to_string();
        out.extend(std::iter::repeat_n(' ', width - cells));
        out
    }

    /// Caption cut to `room` cells, ending in the ellipsis when one fits.
    fn fit_caption<'t>(&self, caption: &'t str, room: usize) -> Cow<'t, str> {
        if display_width(caption) <= room {
            return Cow::Borrowed(caption);
        }
        let marker = display_width(&self.ellipsis);
        if marker >= room {
            return Cow::Borrowed(take_cells(caption, room).0);
        }
        let (head, _) = take_cells(caption, room - marker);
        Cow::Owned(format!("{head}{}", self.ellipsis))
    }
}

/// Display width of `text` in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest prefix of `text` that fits in `room` cells without splitting a
/// grapheme, with its width.
fn take_cells(text: &str, room: usize) -> (&str, usize) {
    let mut used = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let w = grapheme.width();
        if used + w > room {
            return (&text[..offset], used);
        }
        used += w;
    }
    (text, used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knobmenu_core::{NodeId, RadioGroup, Tree};

    fn row<'a>(item: &'a Item, is_active: bool, has_submenu: bool) -> RenderItem<'a, ()> {
        let tree: Tree = Tree::default();
        RenderItem {
            node: tree.root(),
            item,
            is_active,
            has_submenu,
            index: 0,
            viewport_index: 0,
        }
    }

    fn group() -> RadioGroup {
        RadioGroup::new(14).unwrap()
    }

    // ==========================================================================
    // ascii rows
    // ==========================================================================

    #[test]
    fn plain_rows_pad_to_width() {
        let item = Item::new(11, "Min Freq");
        let f = RowFormat::ascii();
        assert_eq!(f.format_row(&row(&item, true, false), 16), "> Min Freq      ");
        assert_eq!(f.format_row(&row(&item, false, false), 16), "  Min Freq      ");
    }

    #[test]
    fn state_markers_follow_item_kind() {
        let f = RowFormat::ascii();
        let on = Item::checkable(15, "Floating", true);
        let off = Item::checkable(15, "Floating", false);
        let linear = Item::radio(141, "Linear", group(), true);
        let quad = Item::radio(142, "Quadratic", group(), false);

        assert_eq!(f.format_row(&row(&on, false, false), 14), "  [x] Floating");
        assert_eq!(f.format_row(&row(&off, false, false), 14), "  [ ] Floating");
        assert_eq!(f.format_row(&row(&linear, true, false), 14), "> (*) Linear  ");
        assert_eq!(f.format_row(&row(&quad, false, false), 14), "  ( ) Quadrati");
    }

    #[test]
    fn submenu_marker_is_right_aligned() {
        let item = Item::new(14, "Curve");
        let f = RowFormat::ascii();
        assert_eq!(f.format_row(&row(&item, false, true), 12), "  Curve    >");
    }

    #[test]
    fn long_caption_keeps_submenu_marker() {
        let item = Item::new(16, "Frequency units");
        let f = RowFormat::ascii();
        assert_eq!(f.format_row(&row(&item, true, true), 10), "> Frequen>");
    }

    #[test]
    fn tiny_width_still_exact() {
        let item = Item::checkable(1, "x", true);
        let f = RowFormat::ascii();
        for width in 0..8 {
            let line = f.format_row(&row(&item, true, true), width);
            assert_eq!(display_width(&line), width, "{line:?}");
        }
    }

    // ==========================================================================
    // unicode rows
    // ==========================================================================

    #[test]
    fn unicode_caption_gets_ellipsis() {
        let item = Item::new(1, "Acceleration");
        let f = RowFormat::unicode();
        let line = f.format_row(&row(&item, false, false), 8);
        assert_eq!(line, "  Accel…");
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        let item = Item::new(1, "频率单位");
        let f = RowFormat::ascii();
        // 2 cells of cursor leave 5 for the caption: two wide chars, one pad.
        assert_eq!(f.format_row(&row(&item, false, false), 7), "  频率 ");
    }

    #[test]
    fn custom_cursor_resizes_blank() {
        let item = Item::new(1, "A");
        let f = RowFormat::ascii().with_cursor("-->");
        assert_eq!(f.format_row(&row(&item, true, false), 5), "-->A ");
        assert_eq!(f.format_row(&row(&item, false, false), 5), "   A ");
    }

    #[test]
    fn plain_item_has_no_state_marker() {
        let item: Item = Item::new(0, "Back");
        assert_eq!(RowFormat::ascii().state_marker(&item), None);
        let radio: Item = Item::radio(1, "r", group(), false);
        assert_eq!(RowFormat::unicode().state_marker(&radio), Some("○"));
    }

    // ==========================================================================
    // caption fitting
    // ==========================================================================

    #[test]
    fn take_cells_stops_on_grapheme_boundaries() {
        assert_eq!(take_cells("hello world", 5), ("hello", 5));
        assert_eq!(take_cells("你好", 3), ("你", 2));
        assert_eq!(take_cells("e\u{301}x", 1), ("e\u{301}", 1));
        assert_eq!(take_cells("hi", 8), ("hi", 2));
    }

    #[test]
    fn ellipsis_only_when_it_leaves_room() {
        let f = RowFormat::ascii().with_ellipsis("...");
        assert_eq!(f.fit_caption("hello world", 8), "hello...");
        assert_eq!(f.fit_caption("hi", 8), "hi");
        assert_eq!(f.fit_caption("hello", 2), "he");
        assert_eq!(RowFormat::ascii().fit_caption("hello", 3), "hel");
    }

    #[test]
    fn node_handle_is_carried() {
        let item = Item::new(0, "x");
        let root: NodeId = Tree::<()>::default().root();
        assert_eq!(row(&item, false, false).node, root);
    }
}
