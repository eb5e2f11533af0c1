//! JSON description of a volume's structure.
//!
//! A catalog carries what the EB library would otherwise pull from a disc's
//! `CATALOG(S)` file and search indexes: volume codes, subbook list, titles,
//! copyright positions and the hit lists of each search mode.
//!
//! ```json
//! {
//!     "charCode": "jisx0208",
//!     "discCode": "epwing",
//!     "subbooks": [
//!         {
//!             "code": 0,
//!             "title": "Daijirin",
//!             "copyright": {"page": 1, "offset": 0},
//!             "hits": {
//!                 "kana": [{"heading": {"page": 2, "offset": 0}, "text": {"page": 2, "offset": 16}}]
//!             }
//!         }
//!     ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Hit, SearchMode, SubbookCode};
use crate::error::SourceError;
use crate::model::Position;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub char_code: Option<String>,
    #[serde(default)]
    pub disc_code: Option<String>,
    /// `None` when the volume's subbook list cannot be read.
    #[serde(default)]
    pub subbooks: Option<Vec<CatalogSubbook>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSubbook {
    pub code: SubbookCode,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub copyright: Option<Position>,
    /// Subbook is listed but cannot be opened.
    #[serde(default)]
    pub broken: bool,
    #[serde(default)]
    pub hits: CatalogHits,
}

/// Hit lists per search mode. `None` means the subbook has no such index.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogHits {
    #[serde(default)]
    pub alphabetic: Option<Vec<Hit>>,
    #[serde(default)]
    pub kana: Option<Vec<Hit>>,
    #[serde(default)]
    pub as_is: Option<Vec<Hit>>,
}

impl CatalogHits {
    pub fn for_mode(&self, mode: SearchMode) -> Option<&[Hit]> {
        match mode {
            SearchMode::Alphabetic => self.alphabetic.as_deref(),
            SearchMode::Kana => self.kana.as_deref(),
            SearchMode::AsIs => self.as_is.as_deref(),
        }
    }
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn subbook(&self, code: SubbookCode) -> Option<&CatalogSubbook> {
        self.subbooks.as_ref()?.iter().find(|s| s.code == code)
    }
}
