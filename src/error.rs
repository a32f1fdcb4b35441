//! Error taxonomy for the core table operations, hand-rolled in the style
//! the rest of this codebase uses for its own fallible boundaries (see
//! `repo::pile::{OpenError, InsertError, ...}`): plain enums with manual
//! `Display`/`Error` impls rather than a derive macro.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaglevError {
    /// A mutation was attempted before `init`.
    Uninitialized,
    /// An empty or over-length node name.
    InvalidName { reason: &'static str },
    /// `add` of a name that already exists.
    DuplicateName(String),
    /// `add` would exceed the configured node-count ceiling.
    CapacityExceeded { max: usize },
    /// `init` was given a size that can't be turned into a table.
    InvalidSize(String),
}

impl fmt::Display for MaglevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaglevError::Uninitialized => write!(f, "maglev table is not initialized"),
            MaglevError::InvalidName { reason } => write!(f, "invalid node name: {reason}"),
            MaglevError::DuplicateName(name) => write!(f, "node '{name}' already exists"),
            MaglevError::CapacityExceeded { max } => {
                write!(f, "maximum number of nodes ({max}) reached")
            }
            MaglevError::InvalidSize(size) => write!(f, "invalid table size '{size}'"),
        }
    }
}

impl std::error::Error for MaglevError {}
