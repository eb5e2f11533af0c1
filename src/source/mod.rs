//! Dictionary source capability interface.
//!
//! The `DictionarySource` trait is the boundary to whatever actually reads an
//! EPWING/EB volume: a binding to the native EB library, the bundled
//! [`PagedSource`], or a test fake. The importer only talks to this trait.
//!
//! A source is stateful in the same way the EB library is:
//! - [`set_subbook`](DictionarySource::set_subbook) selects the subbook that
//!   title, copyright and search calls apply to
//! - [`begin_search`](DictionarySource::begin_search) starts a hit enumeration
//!   that [`next_hits`](DictionarySource::next_hits) drains in batches
//! - [`seek`](DictionarySource::seek) positions the reader that
//!   [`read`](DictionarySource::read) pulls raw bytes from
//!
//! Resources held by a source are released when it is dropped.

mod catalog;
mod paged;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use catalog::{Catalog, CatalogHits, CatalogSubbook};
pub use paged::{PAGE_SIZE, PagedSource};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::model::{CharCode, DiscCode, Position};

/// Identifier of a subbook within a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubbookCode(pub u32);

impl fmt::Display for SubbookCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Search index a hit enumeration walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Alphabetic,
    Kana,
    AsIs,
}

impl SearchMode {
    /// All modes, in the order the importer runs them.
    pub const ALL: [SearchMode; 3] = [SearchMode::Alphabetic, SearchMode::Kana, SearchMode::AsIs];
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::Alphabetic => "alphabetic",
            SearchMode::Kana => "kana",
            SearchMode::AsIs => "as-is",
        })
    }
}

/// Which kind of content a read pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadKind {
    Heading,
    Text,
}

/// A single search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub heading: Position,
    pub text: Position,
}

impl Hit {
    pub fn new(heading: Position, text: Position) -> Self {
        Self { heading, text }
    }
}

/// Capability set consumed by the importer.
pub trait DictionarySource {
    // --- Volume ---

    /// Character set of the volume.
    fn character_code(&mut self) -> Result<CharCode, SourceError>;

    /// Disc format family of the volume.
    fn disc_type(&mut self) -> Result<DiscCode, SourceError>;

    /// Codes of all subbooks, in volume order.
    fn subbook_list(&mut self) -> Result<Vec<SubbookCode>, SourceError>;

    // --- Subbook ---

    /// Make `code` the current subbook.
    fn set_subbook(&mut self, code: SubbookCode) -> Result<(), SourceError>;

    /// Title of the current subbook.
    fn subbook_title(&mut self) -> Result<String, SourceError>;

    /// Whether the current subbook carries a copyright notice.
    fn has_copyright(&mut self) -> bool;

    /// Position of the current subbook's copyright notice.
    fn copyright_position(&mut self) -> Result<Position, SourceError>;

    // --- Search ---

    /// Start enumerating every hit of `mode` in the current subbook.
    ///
    /// Fails if the subbook has no index for `mode`.
    fn begin_search(&mut self, mode: SearchMode) -> Result<(), SourceError>;

    /// Next batch of at most `max` hits. An empty batch ends the enumeration.
    fn next_hits(&mut self, max: usize) -> Result<Vec<Hit>, SourceError>;

    // --- Content ---

    /// Move the reader to `position`.
    fn seek(&mut self, position: Position) -> Result<(), SourceError>;

    /// Read at most `max_len` raw bytes of `kind` content from the reader.
    fn read(&mut self, kind: ReadKind, max_len: usize) -> Result<Vec<u8>, SourceError>;
}

impl<S: DictionarySource + ?Sized> DictionarySource for &mut S {
    fn character_code(&mut self) -> Result<CharCode, SourceError> {
        (**self).character_code()
    }

    fn disc_type(&mut self) -> Result<DiscCode, SourceError> {
        (**self).disc_type()
    }

    fn subbook_list(&mut self) -> Result<Vec<SubbookCode>, SourceError> {
        (**self).subbook_list()
    }

    fn set_subbook(&mut self, code: SubbookCode) -> Result<(), SourceError> {
        (**self).set_subbook(code)
    }

    fn subbook_title(&mut self) -> Result<String, SourceError> {
        (**self).subbook_title()
    }

    fn has_copyright(&mut self) -> bool {
        (**self).has_copyright()
    }

    fn copyright_position(&mut self) -> Result<Position, SourceError> {
        (**self).copyright_position()
    }

    fn begin_search(&mut self, mode: SearchMode) -> Result<(), SourceError> {
        (**self).begin_search(mode)
    }

    fn next_hits(&mut self, max: usize) -> Result<Vec<Hit>, SourceError> {
        (**self).next_hits(max)
    }

    fn seek(&mut self, position: Position) -> Result<(), SourceError> {
        (**self).seek(position)
    }

    fn read(&mut self, kind: ReadKind, max_len: usize) -> Result<Vec<u8>, SourceError> {
        (**self).read(kind, max_len)
    }
}
