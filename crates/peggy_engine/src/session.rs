//! Match sessions.
//!
//! A [`Session`] is one input being parsed. It owns the source, a cursor, the
//! memo table every matcher shares while parsing that input, and a tracer.
//! Matchers hold no per-parse state, so one grammar can serve any number of
//! sessions, one after another or side by side.

use peggy_foundation::Source;

use crate::config::SessionConfig;
use crate::matcher::Matcher;
use crate::memo::{MemoStats, MemoTable};
use crate::node::Node;
use crate::trace::Tracer;

/// Input, cursor, memo table, and tracer for one parse.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
    position: usize,
    memo: MemoTable,
    tracer: Tracer,
}

impl<S: Source> Session<S> {
    /// Creates a session with the default configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(source: S, config: SessionConfig) -> Self {
        Self {
            source,
            position: 0,
            memo: MemoTable::with_capacity(config.memo_capacity),
            tracer: Tracer::new(config.tracer),
        }
    }

    /// Returns the input.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the session, returning the input.
    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Returns the input length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor. Positions past the end are allowed; every matcher
    /// fails there.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Returns the number of bytes after the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Returns true if the cursor is at or past the end of the input.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.len()
    }

    /// Matches at the cursor and, on success, advances past the match.
    pub fn consume(&mut self, matcher: &Matcher) -> Option<Node> {
        let position = self.position;
        let node = matcher.match_at(self, position)?;
        self.position = node.end();
        Some(node)
    }

    /// Returns the memo table.
    #[must_use]
    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    pub(crate) fn memo_mut(&mut self) -> &mut MemoTable {
        &mut self.memo
    }

    /// Returns memo lookup counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// Returns the tracer.
    #[must_use]
    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer for reconfiguration between matches.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }
}
