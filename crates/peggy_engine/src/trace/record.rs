//! Trace event and record types.
//!
//! One event is recorded per step of memoized dispatch: an attempt that
//! misses the memo table, a memo hit, the outcome of an attempt, and a call
//! into a forward that was never defined.

use std::fmt;

use crate::matcher::MatcherId;

// =============================================================================
// Trace Event
// =============================================================================

/// Events recorded while matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// Recognition is about to run for a (matcher, position) pair.
    Attempt {
        /// The matcher being tried.
        matcher: MatcherId,
        /// Its display name.
        name: String,
        /// Byte offset of the attempt.
        position: usize,
    },

    /// A cached outcome was returned without running recognition.
    MemoHit {
        /// The matcher looked up.
        matcher: MatcherId,
        /// Its display name.
        name: String,
        /// Byte offset of the lookup.
        position: usize,
        /// Whether the cached outcome is a success.
        matched: bool,
    },

    /// An attempt succeeded.
    Matched {
        /// The matcher that succeeded.
        matcher: MatcherId,
        /// Its display name.
        name: String,
        /// Byte offset of the attempt.
        position: usize,
        /// Consumed length in bytes.
        len: usize,
    },

    /// An attempt failed.
    NoMatch {
        /// The matcher that failed.
        matcher: MatcherId,
        /// Its display name.
        name: String,
        /// Byte offset of the attempt.
        position: usize,
    },

    /// A forward placeholder was matched before being defined.
    UndefinedForward {
        /// The forward placeholder.
        matcher: MatcherId,
        /// Its display name.
        name: String,
        /// Byte offset of the attempt.
        position: usize,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Attempt { .. } => "attempt",
            Self::MemoHit { .. } => "memo-hit",
            Self::Matched { .. } => "matched",
            Self::NoMatch { .. } => "no-match",
            Self::UndefinedForward { .. } => "undefined-forward",
        }
    }

    /// Returns the matcher the event is about.
    #[must_use]
    pub fn matcher(&self) -> MatcherId {
        match self {
            Self::Attempt { matcher, .. }
            | Self::MemoHit { matcher, .. }
            | Self::Matched { matcher, .. }
            | Self::NoMatch { matcher, .. }
            | Self::UndefinedForward { matcher, .. } => *matcher,
        }
    }

    /// Returns the matcher's name as recorded.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Attempt { name, .. }
            | Self::MemoHit { name, .. }
            | Self::Matched { name, .. }
            | Self::NoMatch { name, .. }
            | Self::UndefinedForward { name, .. } => name,
        }
    }

    /// Returns the input position the event is about.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Attempt { position, .. }
            | Self::MemoHit { position, .. }
            | Self::Matched { position, .. }
            | Self::NoMatch { position, .. }
            | Self::UndefinedForward { position, .. } => *position,
        }
    }

    /// Returns true if this event closes an attempt.
    #[must_use]
    pub fn is_outcome(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::NoMatch { .. })
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attempt { name, position, .. } => write!(f, "try {name} @ {position}"),
            Self::MemoHit {
                name,
                position,
                matched,
                ..
            } => {
                let outcome = if *matched { "match" } else { "no match" };
                write!(f, "memo {name} @ {position} ({outcome})")
            }
            Self::Matched {
                name,
                position,
                len,
                ..
            } => write!(f, "ok {name} @ {position}..{}", position + len),
            Self::NoMatch { name, position, .. } => write!(f, "fail {name} @ {position}"),
            Self::UndefinedForward { name, position, .. } => {
                write!(f, "undefined forward {name} @ {position}")
            }
        }
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// Nesting depth of the attempt this event belongs to.
    pub depth: usize,
    /// Timestamp in nanoseconds since the tracer was created.
    pub timestamp_ns: u64,
    /// The trace event.
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, depth: usize, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            depth,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
