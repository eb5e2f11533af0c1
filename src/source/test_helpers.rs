//! In-memory fake source for importer tests.
//!
//! Content is keyed by position and stored already encoded, so tests can feed
//! malformed bytes. Failures are injected per call site.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::{DictionarySource, Hit, ReadKind, SearchMode, SubbookCode};
use crate::error::SourceError;
use crate::model::{CharCode, DiscCode, Position};

#[derive(Debug, Clone, Default)]
pub struct FakeSubbook {
    pub code: u32,
    pub title: Option<String>,
    pub copyright: Option<Position>,
    pub broken: bool,
    pub hits: HashMap<SearchMode, Vec<Hit>>,
    /// Modes whose enumeration fails after this many batches.
    pub failing_after: HashMap<SearchMode, usize>,
}

impl FakeSubbook {
    pub fn new(code: u32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn copyright(mut self, position: Position) -> Self {
        self.copyright = Some(position);
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    pub fn hits(mut self, mode: SearchMode, hits: Vec<Hit>) -> Self {
        self.hits.insert(mode, hits);
        self
    }

    pub fn fail_after(mut self, mode: SearchMode, batches: usize) -> Self {
        self.failing_after.insert(mode, batches);
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeSource {
    pub char_code: Option<CharCode>,
    pub disc_code: Option<DiscCode>,
    /// `None` makes the subbook list fail.
    pub subbooks: Option<Vec<FakeSubbook>>,
    pub content: HashMap<Position, Vec<u8>>,
    pub unseekable: HashSet<Position>,
    /// Size of every batch request seen, in order.
    pub batch_requests: Vec<usize>,
    pub released: ReleaseFlag,
    current: Option<usize>,
    search: Option<FakeSearch>,
    position: Option<Position>,
}

impl FakeSource {
    pub fn new(char_code: CharCode, disc_code: DiscCode) -> Self {
        Self {
            char_code: Some(char_code),
            disc_code: Some(disc_code),
            subbooks: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn subbook(mut self, subbook: FakeSubbook) -> Self {
        self.subbooks.get_or_insert_with(Vec::new).push(subbook);
        self
    }

    pub fn content(mut self, position: Position, bytes: &[u8]) -> Self {
        self.content.insert(position, bytes.to_vec());
        self
    }

    pub fn unseekable(mut self, position: Position) -> Self {
        self.unseekable.insert(position);
        self
    }

    fn current(&self) -> Result<&FakeSubbook, SourceError> {
        let index = self
            .current
            .ok_or_else(|| SourceError::NotFound("no subbook selected".into()))?;
        self.subbooks
            .as_ref()
            .and_then(|s| s.get(index))
            .ok_or_else(|| SourceError::NotFound("subbook".into()))
    }
}

/// Enumeration state of the running search.
#[derive(Debug)]
struct FakeSearch {
    hits: Vec<Hit>,
    next: usize,
    /// Batches left before enumeration fails.
    fail_after: usize,
}

/// Set when the owning source is dropped.
#[derive(Debug, Default)]
pub struct ReleaseFlag(pub Rc<Cell<bool>>);

impl Drop for ReleaseFlag {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

/// Hit at text position `(page, offset)` with its heading just before it.
pub fn hit(page: u32, offset: u32) -> Hit {
    Hit::new(
        Position::new(page, offset.saturating_sub(1)),
        Position::new(page, offset),
    )
}

impl DictionarySource for FakeSource {
    fn character_code(&mut self) -> Result<CharCode, SourceError> {
        self.char_code
            .ok_or_else(|| SourceError::NotFound("character code".into()))
    }

    fn disc_type(&mut self) -> Result<DiscCode, SourceError> {
        self.disc_code
            .ok_or_else(|| SourceError::NotFound("disc code".into()))
    }

    fn subbook_list(&mut self) -> Result<Vec<SubbookCode>, SourceError> {
        let subbooks = self
            .subbooks
            .as_ref()
            .ok_or_else(|| SourceError::NotFound("subbook list".into()))?;
        Ok(subbooks.iter().map(|s| SubbookCode(s.code)).collect())
    }

    fn set_subbook(&mut self, code: SubbookCode) -> Result<(), SourceError> {
        self.current = None;
        let index = self
            .subbooks
            .as_ref()
            .and_then(|s| s.iter().position(|s| s.code == code.0 && !s.broken))
            .ok_or_else(|| SourceError::Unsupported(format!("subbook {code}")))?;
        self.current = Some(index);
        Ok(())
    }

    fn subbook_title(&mut self) -> Result<String, SourceError> {
        self.current()?
            .title
            .clone()
            .ok_or_else(|| SourceError::NotFound("title".into()))
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
        let subbook = self.current()?;
        let hits = subbook
            .hits
            .get(&mode)
            .cloned()
            .ok_or_else(|| SourceError::Unsupported(format!("{mode}")))?;
        let fail_after = subbook.failing_after.get(&mode).copied().unwrap_or(usize::MAX);
        self.search = Some(FakeSearch {
            hits,
            next: 0,
            fail_after,
        });
        Ok(())
    }

    fn next_hits(&mut self, max: usize) -> Result<Vec<Hit>, SourceError> {
        self.batch_requests.push(max);
        let search = self
            .search
            .as_mut()
            .ok_or_else(|| SourceError::NotFound("search".into()))?;
        if search.fail_after == 0 {
            return Err(SourceError::Unsupported("batch failure".into()));
        }
        search.fail_after -= 1;
        let end = search.hits.len().min(search.next.saturating_add(max));
        let batch = search.hits[search.next..end].to_vec();
        search.next = end;
        Ok(batch)
    }

    fn seek(&mut self, position: Position) -> Result<(), SourceError> {
        if self.unseekable.contains(&position) {
            self.position = None;
            return Err(SourceError::InvalidPosition {
                page: position.page,
                offset: position.offset,
            });
        }
        self.position = Some(position);
        Ok(())
    }

    fn read(&mut self, _kind: ReadKind, max_len: usize) -> Result<Vec<u8>, SourceError> {
        let position = self
            .position
            .ok_or_else(|| SourceError::NotFound("position".into()))?;
        let bytes = self
            .content
            .get(&position)
            .ok_or_else(|| SourceError::NotFound(format!("content at {position}")))?;
        Ok(bytes[..bytes.len().min(max_len)].to_vec())
    }
}
