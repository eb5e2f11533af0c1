//! Dictionary source over a page-addressed volume image.
//!
//! Content is stored the way EB stores its text file: fixed-size pages,
//! numbered from 1, each holding raw bytes in the volume's character set.
//! Structure (subbooks, search hits) comes from a [`Catalog`].

use memchr::memchr;

use super::{Catalog, CatalogSubbook, DictionarySource, Hit, ReadKind, SearchMode, SubbookCode};
use crate::error::SourceError;
use crate::io::ByteSource;
use crate::model::{CharCode, DiscCode, Position};

/// Size of one EB page in bytes.
pub const PAGE_SIZE: u64 = 2048;

/// Hit list of the running search and how far it has been drained.
struct SearchCursor {
    hits: Vec<Hit>,
    next: usize,
}

/// A [`DictionarySource`] reading a [`Catalog`] plus a raw text image.
pub struct PagedSource<B> {
    catalog: Catalog,
    image: B,
    subbook: Option<SubbookCode>,
    search: Option<SearchCursor>,
    address: Option<u64>,
}

impl<B: ByteSource> PagedSource<B> {
    pub fn new(catalog: Catalog, image: B) -> Self {
        Self {
            catalog,
            image,
            subbook: None,
            search: None,
            address: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Byte address of `position` in the image.
    pub fn address_of(position: Position) -> Option<u64> {
        let page = u64::from(position.page).checked_sub(1)?;
        Some(page * PAGE_SIZE + u64::from(position.offset))
    }

    fn current(&self) -> Result<&CatalogSubbook, SourceError> {
        let code = self
            .subbook
            .ok_or_else(|| SourceError::NotFound("no subbook selected".into()))?;
        self.catalog
            .subbook(code)
            .ok_or_else(|| SourceError::NotFound(format!("subbook {code}")))
    }
}

impl<B: ByteSource> DictionarySource for PagedSource<B> {
    fn character_code(&mut self) -> Result<CharCode, SourceError> {
        let name = self
            .catalog
            .char_code
            .as_deref()
            .ok_or_else(|| SourceError::NotFound("character code".into()))?;
        Ok(name.parse().unwrap_or_default())
    }

    fn disc_type(&mut self) -> Result<DiscCode, SourceError> {
        let name = self
            .catalog
            .disc_code
            .as_deref()
            .ok_or_else(|| SourceError::NotFound("disc code".into()))?;
        Ok(name.parse().unwrap_or_default())
    }

    fn subbook_list(&mut self) -> Result<Vec<SubbookCode>, SourceError> {
        let subbooks = self
            .catalog
            .subbooks
            .as_ref()
            .ok_or_else(|| SourceError::NotFound("subbook list".into()))?;
        Ok(subbooks.iter().map(|s| s.code).collect())
    }

    fn set_subbook(&mut self, code: SubbookCode) -> Result<(), SourceError> {
        self.subbook = None;
        self.search = None;

        let subbook = self
            .catalog
            .subbook(code)
            .ok_or_else(|| SourceError::NotFound(format!("subbook {code}")))?;
        if subbook.broken {
            return Err(SourceError::Unsupported(format!(
                "subbook {code} cannot be opened"
            )));
        }

        self.subbook = Some(code);
        Ok(())
    }

    fn subbook_title(&mut self) -> Result<String, SourceError> {
        self.current()?
            .title
            .clone()
            .ok_or_else(|| SourceError::NotFound("subbook title".into()))
    }

    fn has_copyright(&mut self) -> bool {
        self.current().is_ok_and(|s| s.copyright.is_some())
    }

    fn copyright_position(&mut self) -> Result<Position, SourceError> {
        self.current()?
            .copyright
            .ok_or_else(|| SourceError::NotFound("copyright".into()))
    }

    fn begin_search(&mut self, mode: SearchMode) -> Result<(), SourceError> {
        self.search = None;
        let hits = self
            .current()?
            .hits
            .for_mode(mode)
            .ok_or_else(|| SourceError::Unsupported(format!("{mode} search")))?
            .to_vec();
        self.search = Some(SearchCursor { hits, next: 0 });
        Ok(())
    }

    fn next_hits(&mut self, max: usize) -> Result<Vec<Hit>, SourceError> {
        let cursor = self
            .search
            .as_mut()
            .ok_or_else(|| SourceError::NotFound("no search in progress".into()))?;
        let end = cursor.hits.len().min(cursor.next.saturating_add(max));
        let batch = cursor.hits[cursor.next..end].to_vec();
        cursor.next = end;
        Ok(batch)
    }

    fn seek(&mut self, position: Position) -> Result<(), SourceError> {
        self.address = None;
        let address = Self::address_of(position)
            .filter(|&address| address < self.image.len())
            .ok_or(SourceError::InvalidPosition {
                page: position.page,
                offset: position.offset,
            })?;
        self.address = Some(address);
        Ok(())
    }

    fn read(&mut self, kind: ReadKind, max_len: usize) -> Result<Vec<u8>, SourceError> {
        let address = self
            .address
            .ok_or_else(|| SourceError::NotFound("no read position".into()))?;
        let mut bytes = self.image.read_up_to(address, max_len)?;

        if let Some(end) = memchr(0, &bytes) {
            bytes.truncate(end);
        }
        if kind == ReadKind::Heading {
            let kept = bytes
                .iter()
                .rposition(|b| !b.is_ascii_whitespace())
                .map_or(0, |last| last + 1);
            bytes.truncate(kept);
        }
        Ok(bytes)
    }
}
