#![forbid(unsafe_code)]

//! Menu items and their kinds.
//!
//! An [`Item`] is pure state: a user id, a caption, host payload and a kind.
//! Structure (parent, submenu, siblings) is owned by the [`Tree`](crate::Tree)
//! arena, which stores links next to each item as [`NodeId`]s.

use std::borrow::Cow;
use std::fmt;

use crate::error::{MenuError, Result};

/// Stable handle of an item inside one [`Tree`](crate::Tree).
///
/// Handles are plain indices: cheap to copy and never owning. A handle is
/// only meaningful for the tree that produced it. Indices are 32-bit, so a
/// tree addresses indices up to [`NodeId::MAX_INDEX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Largest arena index a handle can carry.
    pub const MAX_INDEX: usize = u32::MAX as usize;

    /// `index` must not exceed [`MAX_INDEX`](Self::MAX_INDEX).
    pub(crate) const fn new(index: usize) -> Self {
        debug_assert!(index <= Self::MAX_INDEX);
        Self(index as u32)
    }

    /// Arena slot of this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Number of a radio group, in `1..=254`.
///
/// Groups are scoped to one sibling level: the same number used in two
/// different submenus names two unrelated groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RadioGroup(u8);

impl RadioGroup {
    /// Smallest valid group number.
    pub const MIN: u8 = 1;
    /// Largest valid group number.
    pub const MAX: u8 = 254;

    /// Create a group number, rejecting values outside `1..=254`.
    pub fn new(number: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(MenuError::InvalidArgument(
                "radio group number must be in 1..=254",
            ))
        }
    }

    /// The raw group number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RadioGroup {
    type Error = MenuError;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

/// What an item does when it is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    /// Regular entry; the checked flag is ignored.
    #[default]
    Plain,
    /// Member of a mutually exclusive group at its level.
    Radio(RadioGroup),
    /// Independently toggled entry.
    Checkable,
}

/// One entry of a menu.
///
/// `D` is host payload attached to the item. The core never interprets it.
///
/// ```
/// use knobmenu_core::{Item, ItemKind, RadioGroup};
///
/// let item: Item = Item::radio(141, "Linear curve", RadioGroup::new(14).unwrap(), true);
/// assert_eq!(item.id(), 141);
/// assert!(item.is_checked());
/// assert!(matches!(item.kind(), ItemKind::Radio(g) if g.get() == 14));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Item<D = ()> {
    id: i32,
    caption: Cow<'static, str>,
    tag: i32,
    data: Option<D>,
    kind: ItemKind,
    checked: bool,
}

impl<D> Item<D> {
    /// Create a plain item.
    #[must_use]
    pub fn new(id: i32, caption: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id,
            caption: caption.into(),
            tag: 0,
            data: None,
            kind: ItemKind::Plain,
            checked: false,
        }
    }

    /// Create a radio item in `group`.
    #[must_use]
    pub fn radio(
        id: i32,
        caption: impl Into<Cow<'static, str>>,
        group: RadioGroup,
        checked: bool,
    ) -> Self {
        Self {
            kind: ItemKind::Radio(group),
            checked,
            ..Self::new(id, caption)
        }
    }

    /// Create a checkable item.
    #[must_use]
    pub fn checkable(id: i32, caption: impl Into<Cow<'static, str>>, checked: bool) -> Self {
        Self {
            kind: ItemKind::Checkable,
            checked,
            ..Self::new(id, caption)
        }
    }

    /// Set the user tag.
    #[must_use]
    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }

    /// Attach host payload.
    #[must_use]
    pub fn with_data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// User id. Not required to be unique.
    #[must_use]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Display label.
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// User tag.
    #[must_use]
    pub fn tag(&self) -> i32 {
        self.tag
    }

    /// Replace the user tag.
    pub fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    /// Host payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    /// Mutable host payload, if any.
    pub fn data_mut(&mut self) -> Option<&mut D> {
        self.data.as_mut()
    }

    /// Replace the host payload, returning the previous one.
    pub fn set_data(&mut self, data: Option<D>) -> Option<D> {
        std::mem::replace(&mut self.data, data)
    }

    /// Item kind.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Radio group, if this is a radio item.
    #[must_use]
    pub fn radio_group(&self) -> Option<RadioGroup> {
        match self.kind {
            ItemKind::Radio(group) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.kind == ItemKind::Plain
    }

    #[must_use]
    pub fn is_radio(&self) -> bool {
        matches!(self.kind, ItemKind::Radio(_))
    }

    #[must_use]
    pub fn is_checkable(&self) -> bool {
        self.kind == ItemKind::Checkable
    }

    /// Checked flag. Always `false` for plain items.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked && self.kind != ItemKind::Plain
    }

    pub(crate) fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}
