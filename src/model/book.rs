use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;
use crate::util::RecordStore;

use super::PositionedText;

/// Character set a volume is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharCode {
    Iso8859_1,
    JisX0208,
    JisX0208Gb2312,
    #[default]
    Invalid,
}

impl CharCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharCode::Iso8859_1 => "iso8859-1",
            CharCode::JisX0208 => "jisx0208",
            CharCode::JisX0208Gb2312 => "jisx0208/gb2312",
            CharCode::Invalid => "invalid",
        }
    }
}

/// Unknown names resolve to [`CharCode::Invalid`].
impl FromStr for CharCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "iso8859-1" => CharCode::Iso8859_1,
            "jisx0208" => CharCode::JisX0208,
            "jisx0208/gb2312" => CharCode::JisX0208Gb2312,
            _ => CharCode::Invalid,
        })
    }
}

impl fmt::Display for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disc format family of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscCode {
    Eb,
    Epwing,
    #[default]
    Invalid,
}

impl DiscCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscCode::Eb => "eb",
            DiscCode::Epwing => "epwing",
            DiscCode::Invalid => "invalid",
        }
    }
}

/// Unknown names resolve to [`DiscCode::Invalid`].
impl FromStr for DiscCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "eb" => DiscCode::Eb,
            "epwing" => DiscCode::Epwing,
            _ => DiscCode::Invalid,
        })
    }
}

impl fmt::Display for DiscCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dictionary entry: headword plus body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub heading: PositionedText,
    pub text: PositionedText,
}

impl Entry {
    pub fn new(heading: PositionedText, text: PositionedText) -> Self {
        Self { heading, text }
    }
}

/// One logical sub-dictionary within a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subbook {
    pub title: Option<String>,
    pub copyright: PositionedText,
    pub entries: RecordStore<Entry>,
}

impl Subbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subbook with room for `capacity` entries before growing.
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        Ok(Self {
            entries: RecordStore::with_capacity(capacity)?,
            ..Self::default()
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an entry, preserving insertion order.
    pub fn push(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.entries.push(entry)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A dictionary volume: classification tags plus its subbooks.
///
/// The character and disc codes are fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    char_code: CharCode,
    disc_code: DiscCode,
    subbooks: Vec<Subbook>,
}

impl Book {
    pub fn new(char_code: CharCode, disc_code: DiscCode) -> Self {
        Self {
            char_code,
            disc_code,
            subbooks: Vec::new(),
        }
    }

    pub fn char_code(&self) -> CharCode {
        self.char_code
    }

    pub fn disc_code(&self) -> DiscCode {
        self.disc_code
    }

    pub fn subbooks(&self) -> &[Subbook] {
        &self.subbooks
    }

    pub fn subbooks_mut(&mut self) -> &mut [Subbook] {
        &mut self.subbooks
    }

    pub fn push_subbook(&mut self, subbook: Subbook) {
        self.subbooks.push(subbook);
    }

    /// Total number of entries across all subbooks.
    pub fn entry_count(&self) -> usize {
        self.subbooks.iter().map(Subbook::len).sum()
    }
}
