//! Positional duplicate elimination.
//!
//! The importer runs every search mode a subbook supports and keeps the union
//! of their hits, so the same physical entry usually shows up more than once.
//! Two entries are duplicates when their body text sits at the same
//! (page, offset); heading positions and decoded content are not compared.
//!
//! Removal is swap-and-shrink: a duplicate at slot `i` is overwritten by the
//! last entry and slot `i` is examined again. The result holds exactly one
//! entry per distinct text position, but entry order is not preserved and
//! which of several duplicates survives is unspecified.

use std::collections::{HashMap, HashSet};

use log::info;

use crate::model::{Book, Subbook};

/// Remove positional duplicates from one subbook. Returns the number removed.
pub fn dedup_subbook(subbook: &mut Subbook) -> usize {
    // Seen offsets, keyed by page; only pages that occur get a set
    let mut seen: HashMap<u32, HashSet<u32>> = HashMap::new();

    let before = subbook.entries.len();
    let mut i = 0;
    while i < subbook.entries.len() {
        let text = &subbook.entries[i].text;
        let offsets = seen.entry(text.page).or_default();
        if offsets.insert(text.offset) {
            i += 1;
        } else {
            // Slot i now holds the former last entry; examine it next
            subbook.entries.swap_remove(i);
        }
    }

    before - subbook.entries.len()
}

/// Remove positional duplicates from every subbook. Returns the number removed.
pub fn dedup_book(book: &mut Book) -> usize {
    let mut removed = 0;
    for subbook in book.subbooks_mut() {
        let before = subbook.len();
        let dropped = dedup_subbook(subbook);
        info!(
            "Subbook {}: {} entries, {} after removing duplicates",
            subbook.title.as_deref().unwrap_or("(untitled)"),
            before,
            subbook.len()
        );
        removed += dropped;
    }
    removed
}
