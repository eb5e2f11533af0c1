//! Position-tagged content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (page, offset) coordinate in the source volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub page: u32,
    pub offset: u32,
}

impl Position {
    pub fn new(page: u32, offset: u32) -> Self {
        Self { page, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page, self.offset)
    }
}

/// Decoded content plus the position it was read from.
///
/// `text` is `None` when the read or decode failed. The position is recorded
/// either way, so absent content still takes part in deduplication and in
/// position export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionedText {
    pub text: Option<String>,
    pub page: u32,
    pub offset: u32,
}

impl PositionedText {
    pub fn new(text: Option<String>, position: Position) -> Self {
        Self {
            text,
            page: position.page,
            offset: position.offset,
        }
    }

    /// Content that could not be read at `position`.
    pub fn absent(position: Position) -> Self {
        Self::new(None, position)
    }

    pub fn position(&self) -> Position {
        Position::new(self.page, self.offset)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.text.is_some()
    }
}
