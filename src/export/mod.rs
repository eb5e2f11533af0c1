//! Export module for writing dictionary volumes.
//!
//! Provides the `Exporter` trait and the JSON implementation.
//!
//! # Architecture
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write` destination
//!
//! # Example
//!
//! ```
//! use epwing_json::export::{Exporter, JsonConfig, JsonExporter};
//! use epwing_json::model::{Book, CharCode, DiscCode};
//!
//! let book = Book::new(CharCode::JisX0208, DiscCode::Epwing);
//! let mut out = Vec::new();
//! JsonExporter::new().export(&book, &mut out)?;
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"{"charCode":"jisx0208","discCode":"epwing","subbooks":[]}"#
//! );
//! # Ok::<(), epwing_json::error::ExportError>(())
//! ```

use std::io::Write;

use crate::error::ExportError;
use crate::model::Book;

mod json;

pub use json::{JsonConfig, JsonExporter, encode_book};

/// Trait for exporting books to specific formats.
///
/// Exporters hold their configuration, and the `export` method writes to any
/// `Write` destination:
/// - `std::fs::File` for disk output
/// - `Vec<u8>` for in-memory output
/// - `std::io::Stdout` for piping
pub trait Exporter {
    /// Export the book to the provided writer.
    fn export<W: Write>(&self, book: &Book, writer: &mut W) -> Result<(), ExportError>;
}
