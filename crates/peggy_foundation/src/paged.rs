//! File-backed input with a single cached page.
//!
//! `PagedSource` exposes any `Read + Seek` byte stream as a [`Source`]. Reads
//! are served from one cached page; a request outside it seeks and reloads.
//! Requests longer than a page bypass the cache.
//!
//! [`Source::window`] returns at most one page of text, so regular-expression
//! matchers cannot see past one page of lookahead on a paged input.
//!
//! I/O failures after construction cannot be reported through the `Source`
//! interface. The read yields `None` (a no-match for the asking matcher) and
//! the first such error is kept for [`PagedSource::take_error`].

use std::borrow::Cow;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use crate::Result;
use crate::source::Source;

/// Default page size in bytes.
pub const DEFAULT_PAGE_SIZE: usize = 1024;

/// Smallest page that can always hold one UTF-8 character.
const MIN_PAGE_SIZE: usize = 4;

#[derive(Debug, Default)]
struct Page {
    offset: usize,
    bytes: Vec<u8>,
}

impl Page {
    fn covers(&self, range: &Range<usize>) -> bool {
        range.start >= self.offset && range.end <= self.offset + self.bytes.len()
    }

    fn bytes(&self, range: Range<usize>) -> &[u8] {
        &self.bytes[range.start - self.offset..range.end - self.offset]
    }
}

/// A paged, random-access view over a byte stream holding UTF-8 text.
#[derive(Debug)]
pub struct PagedSource<R> {
    reader: RefCell<R>,
    len: usize,
    page_size: usize,
    page: RefCell<Page>,
    error: RefCell<Option<io::Error>>,
}

impl PagedSource<File> {
    /// Opens a file as a paged source.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be opened or measured.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> PagedSource<R> {
    /// Wraps a reader, measuring its length.
    ///
    /// # Errors
    /// Returns an I/O error if the stream cannot be seeked.
    pub fn new(mut reader: R) -> Result<Self> {
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        let len = usize::try_from(end).map_err(|_| {
            crate::Error::from(io::Error::new(
                io::ErrorKind::InvalidInput,
                "input too large to address",
            ))
        })?;
        Ok(Self {
            reader: RefCell::new(reader),
            len,
            page_size: DEFAULT_PAGE_SIZE,
            page: RefCell::new(Page::default()),
            error: RefCell::new(None),
        })
    }

    /// Builder method to set the page size (at least 4 bytes).
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(MIN_PAGE_SIZE);
        self.page = RefCell::new(Page::default());
        self
    }

    /// Returns the page size in bytes.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the first I/O error seen while reading, clearing it.
    pub fn take_error(&self) -> Option<io::Error> {
        self.error.borrow_mut().take()
    }

    fn record_error(&self, err: io::Error) {
        let mut slot = self.error.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    fn read_at(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        let mut reader = self.reader.borrow_mut();
        let mut buf = vec![0; len];
        let result = reader
            .seek(SeekFrom::Start(offset as u64))
            .and_then(|_| reader.read_exact(&mut buf));
        match result {
            Ok(()) => Some(buf),
            Err(err) => {
                self.record_error(err);
                None
            }
        }
    }

    fn load_page(&self, offset: usize) -> Option<()> {
        let len = self.page_size.min(self.len - offset);
        let bytes = self.read_at(offset, len)?;
        *self.page.borrow_mut() = Page { offset, bytes };
        Some(())
    }

    fn read_bytes(&self, range: Range<usize>) -> Option<Vec<u8>> {
        if range.start > range.end || range.end > self.len {
            return None;
        }
        if range.is_empty() {
            return Some(Vec::new());
        }
        if range.len() > self.page_size {
            return self.read_at(range.start, range.len());
        }
        if !self.page.borrow().covers(&range) {
            self.load_page(range.start)?;
        }
        Some(self.page.borrow().bytes(range).to_vec())
    }
}

impl<R: Read + Seek> Source for PagedSource<R> {
    fn len(&self) -> usize {
        self.len
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        let bytes = self.read_bytes(range)?;
        String::from_utf8(bytes).ok().map(Cow::Owned)
    }

    fn window(&self, start: usize) -> Option<Cow<'_, str>> {
        if start > self.len {
            return None;
        }
        let end = start.saturating_add(self.page_size).min(self.len);
        let mut bytes = self.read_bytes(start..end)?;
        match std::str::from_utf8(&bytes) {
            Ok(_) => {}
            // A character straddling the page end is cut off; one starting
            // before `start` means `start` is not a character boundary.
            Err(err) if err.valid_up_to() == 0 && err.error_len().is_some() => return None,
            Err(err) => bytes.truncate(err.valid_up_to()),
        }
        String::from_utf8(bytes).ok().map(Cow::Owned)
    }
}
