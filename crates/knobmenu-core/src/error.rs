#![forbid(unsafe_code)]

//! Error taxonomy for menu operations.
//!
//! Every failure is local and recoverable. Operations that have no legal
//! target report [`MenuError::NotApplicable`] and leave all state untouched.

use std::fmt;

/// The precondition an operation found unsatisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The active item is the last of its level.
    NoNext,
    /// The active item is the first of its level.
    NoPrev,
    /// The active item has no parent (it is the root).
    NoParent,
    /// The item is not a checkable item.
    NotCheckable,
    /// The item is not a radio item.
    NotRadio,
    /// The item is neither checkable nor radio.
    NotToggleable,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoNext => "no next sibling",
            Self::NoPrev => "no previous sibling",
            Self::NoParent => "no parent item",
            Self::NotCheckable => "item is not checkable",
            Self::NotRadio => "item is not a radio item",
            Self::NotToggleable => "item is neither checkable nor radio",
        };
        f.write_str(text)
    }
}

/// Errors reported by tree construction, navigation and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The operation has no legal target in the current state.
    NotApplicable(Reason),
    /// No item carries the requested user id.
    NotFound {
        /// The id that was searched for.
        id: i32,
    },
    /// A malformed construction call or a foreign node handle.
    InvalidArgument(&'static str),
}

impl MenuError {
    /// Whether this is a "nothing happened" outcome rather than misuse.
    #[must_use]
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable(_))
    }
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable(reason) => write!(f, "operation not applicable: {reason}"),
            Self::NotFound { id } => write!(f, "no menu item with id {id}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<Reason> for MenuError {
    fn from(reason: Reason) -> Self {
        Self::NotApplicable(reason)
    }
}

/// Standard result type for menu APIs.
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            MenuError::NotApplicable(Reason::NoNext).to_string(),
            "operation not applicable: no next sibling"
        );
        assert_eq!(
            MenuError::NotFound { id: 42 }.to_string(),
            "no menu item with id 42"
        );
        assert_eq!(
            MenuError::InvalidArgument("already linked").to_string(),
            "invalid argument: already linked"
        );
    }

    #[test]
    fn reason_converts_into_not_applicable() {
        let err: MenuError = Reason::NotRadio.into();
        assert!(err.is_not_applicable());
        assert!(!MenuError::NotFound { id: 1 }.is_not_applicable());
    }
}
