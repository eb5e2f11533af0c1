//! Error types for epwing-json operations.

use thiserror::Error;

/// Errors reported by a [`DictionarySource`](crate::source::DictionarySource) call.
///
/// The importer decides per call site whether one of these is fatal or is
/// absorbed into the document model as absent data.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("invalid position: page {page}, offset {offset}")]
    InvalidPosition { page: u32, offset: u32 },
}

/// Errors raised by [`RecordStore`](crate::util::RecordStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("cannot allocate storage for {0} records")]
    Allocation(usize),

    #[error("record store has been released")]
    Released,
}

/// Fatal import failures. Everything else is absorbed into the model.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot initialize dictionary source: {0}")]
    SourceInit(SourceError),

    #[error("cannot open dictionary: {0}")]
    Open(SourceError),

    #[error("subbook list unavailable: {0}")]
    SubbookListUnavailable(SourceError),

    #[error("allocation failed: {0}")]
    Allocation(#[from] StoreError),
}

/// Failures writing the JSON document to its sink.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that can occur anywhere in the import/dedup/export pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, Error>;
