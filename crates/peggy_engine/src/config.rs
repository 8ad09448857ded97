//! Configuration for match sessions.

use crate::trace::TracerConfig;

/// Initial memo table capacity used by [`SessionConfig::default`].
pub const DEFAULT_MEMO_CAPACITY: usize = 256;

/// Configuration for a [`crate::Session`].
///
/// Controls tracing and the initial size of the memo table.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Tracer settings; tracing is off unless enabled here.
    pub tracer: TracerConfig,

    /// Entries to reserve in the memo table up front.
    pub memo_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracer: TracerConfig::default(),
            memo_capacity: DEFAULT_MEMO_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that records every event in the trace buffer.
    #[must_use]
    pub fn traced() -> Self {
        Self {
            tracer: TracerConfig::new().enabled(),
            ..Self::default()
        }
    }

    /// Creates a configuration that records every event and echoes it to
    /// stderr.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            tracer: TracerConfig::new().enabled().to_stderr(),
            ..Self::default()
        }
    }

    /// Builder method to set tracer settings.
    #[must_use]
    pub fn with_tracer(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }

    /// Builder method to set the initial memo capacity.
    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo_capacity = capacity;
        self
    }
}
