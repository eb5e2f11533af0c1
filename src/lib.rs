//! # epwing-json
//!
//! Extracts dictionary content from EPWING/EB volumes and writes it as JSON.
//!
//! ## Pipeline
//!
//! - [`Importer`] pulls every entry out of a [`DictionarySource`], running the
//!   alphabetic, kana and as-is searches of each subbook
//! - [`dedup_book`] removes the entries found by more than one search
//! - [`JsonExporter`] encodes the result
//!
//! ## Quick Start
//!
//! ```no_run
//! use epwing_json::{ImportConfig, JsonConfig, dedup_book, import_files};
//! use epwing_json::export::{Exporter, JsonExporter};
//!
//! let mut book = import_files("catalog.json", "HONMON", &ImportConfig::default())?;
//! dedup_book(&mut book);
//!
//! let config = JsonConfig::default().with_pretty_print(true);
//! JsonExporter::with_config(config).export(&book, &mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Sources
//!
//! Anything implementing [`DictionarySource`] can be imported, such as a
//! binding to the native EB library:
//!
//! ```ignore
//! let book = Importer::new().import(MyEbBinding::open("/mnt/cdrom")?)?;
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod io;
pub mod model;
pub mod source;
pub mod transform;
pub mod util;

use std::io::Write;

pub use error::{Error, ExportError, ImportError, Result, SourceError, StoreError};
pub use export::{Exporter, JsonConfig, JsonExporter};
pub use import::{ImportConfig, Importer, import_files};
pub use model::{Book, CharCode, DiscCode, Entry, Position, PositionedText, Subbook};
pub use source::{DictionarySource, Hit, ReadKind, SearchMode, SubbookCode};
pub use transform::dedup_book;

/// Import `source`, remove duplicates and write the JSON document to `writer`.
///
/// Returns the deduplicated book.
pub fn convert<S, W>(
    source: S,
    import_config: &ImportConfig,
    json_config: &JsonConfig,
    writer: &mut W,
) -> Result<Book>
where
    S: DictionarySource,
    W: Write,
{
    let mut book = Importer::with_config(import_config.clone()).import(source)?;
    dedup_book(&mut book);
    JsonExporter::with_config(*json_config).export(&book, writer)?;
    Ok(book)
}
