//! Random-access input for the matcher engine.
//!
//! The engine never walks its input sequentially; every matcher asks for the
//! text at an explicit offset. A [`Source`] is anything that can answer those
//! questions: an in-memory string, or a paged view over a file
//! ([`crate::PagedSource`]).
//!
//! Offsets are bytes into UTF-8 text. A range that falls outside the input or
//! splits a character yields `None`, which matchers treat as "no match".

use std::borrow::Cow;
use std::ops::Range;
use std::rc::Rc;

/// Indexed, sliceable, length-bounded view over text to parse.
pub trait Source {
    /// Total length of the input in bytes.
    fn len(&self) -> usize;

    /// Returns true if the input is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the text in `range`.
    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>>;

    /// Returns text starting at `start`, running to the end of the input or
    /// to an implementation-defined lookahead limit.
    fn window(&self, start: usize) -> Option<Cow<'_, str>> {
        self.slice(start..self.len())
    }

    /// Returns the character starting at `pos`.
    fn char_at(&self, pos: usize) -> Option<char> {
        let end = pos.checked_add(4)?.min(self.len());
        let text = self.slice(pos..end).or_else(|| self.window(pos))?;
        text.chars().next()
    }

    /// Returns true if the input holds exactly `pattern` at `pos`.
    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        let Some(end) = pos.checked_add(pattern.len()) else {
            return false;
        };
        self.slice(pos..end).is_some_and(|text| text == pattern)
    }
}

impl Source for str {
    fn len(&self) -> usize {
        str::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        self.get(range).map(Cow::Borrowed)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.get(pos..)?.chars().next()
    }

    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        self.as_bytes()
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(pattern.as_bytes()))
            && self.is_char_boundary(pos)
    }
}

impl Source for String {
    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        Source::slice(self.as_str(), range)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        Source::char_at(self.as_str(), pos)
    }

    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        Source::starts_with_at(self.as_str(), pos, pattern)
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        (**self).slice(range)
    }

    fn window(&self, start: usize) -> Option<Cow<'_, str>> {
        (**self).window(start)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        (**self).char_at(pos)
    }

    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        (**self).starts_with_at(pos, pattern)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        (**self).slice(range)
    }

    fn window(&self, start: usize) -> Option<Cow<'_, str>> {
        (**self).window(start)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        (**self).char_at(pos)
    }

    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        (**self).starts_with_at(pos, pattern)
    }
}

impl<S: Source + ?Sized> Source for Rc<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        (**self).slice(range)
    }

    fn window(&self, start: usize) -> Option<Cow<'_, str>> {
        (**self).window(start)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        (**self).char_at(pos)
    }

    fn starts_with_at(&self, pos: usize, pattern: &str) -> bool {
        (**self).starts_with_at(pos, pattern)
    }
}
