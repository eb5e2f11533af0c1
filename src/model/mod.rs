//! Core data model for dictionary volumes.
//!
//! This module contains:
//! - Positions and position-tagged content
//! - The book (document root), its subbooks and entries
//! - Character and disc code classification tags

mod book;
mod text;

// Re-export book types
pub use book::{Book, CharCode, DiscCode, Entry, Subbook};

// Re-export positioned content
pub use text::{Position, PositionedText};
