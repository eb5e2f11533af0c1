//! Post-import transforms over the document model
//!
//! - Dedup: collapse entries surfaced by more than one search mode

pub mod dedup;

pub use dedup::{dedup_book, dedup_subbook};
