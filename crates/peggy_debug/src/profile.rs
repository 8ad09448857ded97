//! Per-matcher match statistics aggregated from a trace.
//!
//! A profile answers "which rules did the work": how often each matcher was
//! recognized, how often it succeeded or failed, and how often the memo
//! table answered for it instead. Counts are keyed by matcher name, so
//! unnamed matchers of one variant are pooled under the variant name.

use std::collections::HashMap;
use std::fmt;

use peggy_engine::{TraceEvent, TraceRecord, Tracer};

/// Counters for one matcher name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileEntry {
    /// Recognitions run (memo misses).
    pub attempts: u64,
    /// Recognitions that succeeded.
    pub matches: u64,
    /// Recognitions that failed.
    pub failures: u64,
    /// Lookups answered by the memo table.
    pub memo_hits: u64,
}

impl ProfileEntry {
    /// Returns attempts plus memo hits.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.attempts + self.memo_hits
    }
}

/// Match statistics by matcher name.
#[derive(Clone, Debug, Default)]
pub struct MatchProfile {
    entries: HashMap<String, ProfileEntry>,
    undefined_forwards: u64,
}

impl MatchProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates every record in the tracer's buffer.
    #[must_use]
    pub fn from_tracer(tracer: &Tracer) -> Self {
        Self::from_records(tracer.buffer().iter())
    }

    /// Aggregates the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TraceRecord>) -> Self {
        let mut profile = Self::new();
        for record in records {
            profile.add(&record.event);
        }
        profile
    }

    /// Adds one event to the counters.
    pub fn add(&mut self, event: &TraceEvent) {
        if let TraceEvent::UndefinedForward { .. } = event {
            self.undefined_forwards += 1;
        }
        let entry = self.entries.entry(event.name().to_string()).or_default();
        match event {
            TraceEvent::Attempt { .. } => entry.attempts += 1,
            TraceEvent::Matched { .. } => entry.matches += 1,
            TraceEvent::NoMatch { .. } => entry.failures += 1,
            TraceEvent::MemoHit { .. } => entry.memo_hits += 1,
            TraceEvent::UndefinedForward { .. } => {}
        }
    }

    /// Returns the counters for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProfileEntry> {
        self.entries.get(name)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns calls into undefined forwards.
    #[must_use]
    pub fn undefined_forwards(&self) -> u64 {
        self.undefined_forwards
    }

    /// Returns the totals across all names.
    #[must_use]
    pub fn total(&self) -> ProfileEntry {
        self.entries
            .values()
            .fold(ProfileEntry::default(), |acc, e| ProfileEntry {
                attempts: acc.attempts + e.attempts,
                matches: acc.matches + e.matches,
                failures: acc.failures + e.failures,
                memo_hits: acc.memo_hits + e.memo_hits,
            })
    }

    /// Returns entries ordered by attempts, most first, then by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &ProfileEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| b.1.attempts.cmp(&a.1.attempts).then(a.0.cmp(b.0)));
        entries
    }
}

impl fmt::Display for MatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("matcher".len());
        writeln!(
            f,
            "{:<width$} {:>8} {:>8} {:>8} {:>8}",
            "matcher", "attempts", "matches", "failures", "memo"
        )?;
        for (name, entry) in self.sorted() {
            writeln!(
                f,
                "{name:<width$} {:>8} {:>8} {:>8} {:>8}",
                entry.attempts, entry.matches, entry.failures, entry.memo_hits
            )?;
        }
        if self.undefined_forwards > 0 {
            writeln!(f, "undefined forwards: {}", self.undefined_forwards)?;
        }
        Ok(())
    }
}
