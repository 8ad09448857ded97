//! Packrat memo table.
//!
//! Maps (matcher, position) to the outcome of the first attempt at that
//! pair. A cached no-match is an entry like any other; only a missing key
//! means "not tried yet". Entries are written once and never replaced.

use std::collections::HashMap;

use crate::matcher::MatcherId;
use crate::node::Node;

/// A cached match outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Memoized {
    /// The matcher failed at this position.
    NoMatch,
    /// The matcher succeeded, producing this node.
    Matched(Node),
}

impl Memoized {
    /// Returns the cached node for a success.
    #[must_use]
    pub fn node(&self) -> Option<&Node> {
        match self {
            Self::NoMatch => None,
            Self::Matched(node) => Some(node),
        }
    }

    /// Returns true for a cached success.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Converts back to the outcome form used by recognition.
    #[must_use]
    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::NoMatch => None,
            Self::Matched(node) => Some(node),
        }
    }
}

impl From<Option<Node>> for Memoized {
    fn from(outcome: Option<Node>) -> Self {
        outcome.map_or(Self::NoMatch, Self::Matched)
    }
}

/// Lookup counters for a memo table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups answered from the table.
    pub hits: u64,
    /// Lookups that found no entry.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
}

impl MemoStats {
    /// Fraction of lookups answered from the table, or 0 with no lookups.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Write-once cache of match outcomes for one session.
#[derive(Debug, Default)]
pub struct MemoTable {
    entries: HashMap<(MatcherId, usize), Memoized>,
    hits: u64,
    misses: u64,
}

impl MemoTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the entry for (`id`, `pos`) without touching the counters.
    #[must_use]
    pub fn get(&self, id: MatcherId, pos: usize) -> Option<&Memoized> {
        self.entries.get(&(id, pos))
    }

    /// Returns true if (`id`, `pos`) has been tried.
    #[must_use]
    pub fn contains(&self, id: MatcherId, pos: usize) -> bool {
        self.entries.contains_key(&(id, pos))
    }

    /// Looks up (`id`, `pos`), counting a hit or a miss.
    pub fn lookup(&mut self, id: MatcherId, pos: usize) -> Option<Memoized> {
        match self.entries.get(&(id, pos)) {
            Some(entry) => {
                self.hits += 1;
                Some(entry.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores the outcome for (`id`, `pos`) unless one is already stored.
    ///
    /// Returns false, leaving the table unchanged, if the key was present.
    pub fn insert(&mut self, id: MatcherId, pos: usize, outcome: Memoized) -> bool {
        match self.entries.entry((id, pos)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the lookup counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    /// Iterates over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (MatcherId, usize, &Memoized)> {
        self.entries.iter().map(|(&(id, pos), entry)| (id, pos, entry))
    }
}
