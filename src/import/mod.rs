//! Importer for pulling dictionary volumes into the document model.
//!
//! The `Importer` walks a [`DictionarySource`]:
//! 1. Resolves the volume's character and disc codes
//! 2. Lists the subbooks and activates each one in turn
//! 3. Runs the alphabetic, kana and as-is searches of every subbook and
//!    reads the heading and text of every hit
//!
//! Only three conditions abort an import: the source cannot be initialized,
//! the volume cannot be opened, or its subbook list cannot be read. Every
//! other failure is logged or simply recorded as absent content, and the
//! import carries on with whatever it could read.
//!
//! The same entry is normally found by several search modes, so an imported
//! subbook contains duplicates until
//! [`dedup_book`](crate::transform::dedup_book) runs.

use std::path::Path;

use log::{debug, info, warn};

use crate::error::{ImportError, SourceError};
use crate::io::FileSource;
use crate::model::{Book, CharCode, DiscCode, Entry, Position, PositionedText, Subbook};
use crate::source::{Catalog, DictionarySource, PagedSource, ReadKind, SearchMode, SubbookCode};
use crate::util::{decode_text, trim_partial_sequence};

/// Hits requested per batch.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Read buffer size, including the terminator byte.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Entries a subbook has room for before its store first grows.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Configuration for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Hits requested per batch. Affects throughput only, never output.
    pub batch_size: usize,
    /// Bound on a single heading or text read, including the terminator.
    /// Longer content is truncated.
    pub read_buffer_size: usize,
    /// Initial entry capacity of each subbook.
    pub initial_capacity: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl ImportConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.read_buffer_size = read_buffer_size;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity.max(1);
        self
    }

    /// Maximum number of content bytes a single read returns.
    fn read_limit(&self) -> usize {
        self.read_buffer_size.saturating_sub(1)
    }
}

/// Builds a [`Book`] from a [`DictionarySource`].
#[derive(Debug, Clone, Default)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    /// Create a new Importer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an Importer with the specified configuration.
    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import every subbook of `source`.
    ///
    /// The source is consumed and dropped before this returns, on success and
    /// on failure alike. Pass `&mut source` to keep it.
    pub fn import<S: DictionarySource>(&self, mut source: S) -> Result<Book, ImportError> {
        let char_code = match source.character_code() {
            Ok(CharCode::Invalid) => {
                warn!("Unrecognized character code, treating as invalid");
                CharCode::Invalid
            }
            Ok(code) => code,
            Err(e) => {
                warn!("Cannot resolve character code: {e}");
                CharCode::Invalid
            }
        };
        let disc_code = match source.disc_type() {
            Ok(DiscCode::Invalid) => {
                warn!("Unrecognized disc code, treating as invalid");
                DiscCode::Invalid
            }
            Ok(code) => code,
            Err(e) => {
                warn!("Cannot resolve disc code: {e}");
                DiscCode::Invalid
            }
        };

        let codes = source
            .subbook_list()
            .map_err(ImportError::SubbookListUnavailable)?;
        info!(
            "Importing {} subbook(s) ({char_code}, {disc_code})",
            codes.len()
        );

        let mut book = Book::new(char_code, disc_code);
        for code in codes {
            if let Err(e) = source.set_subbook(code) {
                warn!("Skipping subbook {code}: {e}");
                continue;
            }
            let subbook = self.import_subbook(&mut source, code, char_code)?;
            book.push_subbook(subbook);
        }

        info!(
            "Imported {} entries from {} subbook(s)",
            book.entry_count(),
            book.subbooks().len()
        );
        Ok(book)
    }

    /// Import the currently active subbook.
    fn import_subbook<S: DictionarySource>(
        &self,
        source: &mut S,
        code: SubbookCode,
        char_code: CharCode,
    ) -> Result<Subbook, ImportError> {
        let mut subbook = Subbook::with_capacity(self.config.initial_capacity)?;

        subbook.title = match source.subbook_title() {
            Ok(title) => Some(title),
            Err(e) => {
                warn!("Subbook {code}: cannot read title: {e}");
                None
            }
        };

        if source.has_copyright() {
            match source.copyright_position() {
                Ok(position) => {
                    subbook.copyright =
                        self.read_content(source, position, ReadKind::Text, char_code);
                }
                Err(e) => warn!("Subbook {code}: cannot locate copyright: {e}"),
            }
        }

        for mode in SearchMode::ALL {
            if let Err(e) = source.begin_search(mode) {
                debug!("Subbook {code}: no {mode} search ({e})");
                continue;
            }

            // An empty batch ends the mode, so never ask for zero hits
            let batch_size = self.config.batch_size.max(1);
            let mut found = 0;
            loop {
                let hits = match source.next_hits(batch_size) {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!("Subbook {code}: {mode} search stopped: {e}");
                        break;
                    }
                };
                if hits.is_empty() {
                    break;
                }

                found += hits.len();
                for hit in hits {
                    let heading =
                        self.read_content(source, hit.heading, ReadKind::Heading, char_code);
                    let text = self.read_content(source, hit.text, ReadKind::Text, char_code);
                    *subbook.entries.append_slot()? = Entry::new(heading, text);
                }
            }
            debug!("Subbook {code}: {found} {mode} hit(s)");
        }

        Ok(subbook)
    }

    /// Read one field. Any failure leaves the text absent.
    fn read_content<S: DictionarySource>(
        &self,
        source: &mut S,
        position: Position,
        kind: ReadKind,
        char_code: CharCode,
    ) -> PositionedText {
        let text = self.read_text(source, position, kind, char_code);
        PositionedText::new(text, position)
    }

    fn read_text<S: DictionarySource>(
        &self,
        source: &mut S,
        position: Position,
        kind: ReadKind,
        char_code: CharCode,
    ) -> Option<String> {
        source.seek(position).ok()?;

        let limit = self.config.read_limit();
        let raw = source.read(kind, limit).ok()?;
        let raw = if raw.len() >= limit {
            trim_partial_sequence(&raw[..limit], char_code)
        } else {
            &raw[..]
        };
        decode_text(raw, char_code)
    }
}

/// Import a volume described by a catalog file and a text image file.
///
/// A catalog that cannot be loaded is an initialization failure; a text image
/// that cannot be opened is an open failure.
pub fn import_files(
    catalog_path: impl AsRef<Path>,
    text_path: impl AsRef<Path>,
    config: &ImportConfig,
) -> Result<Book, ImportError> {
    let catalog = Catalog::load(catalog_path).map_err(ImportError::SourceInit)?;
    let image = FileSource::open(text_path)
        .map_err(|e| ImportError::Open(SourceError::Io(e)))?;
    Importer::with_config(config.clone()).import(PagedSource::new(catalog, image))
}
