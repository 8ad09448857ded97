//! Tracing of memoized dispatch.
//!
//! Every session owns a [`Tracer`]. It is disabled by default and costs one
//! branch per event in that state. When enabled it records attempts, memo
//! hits, outcomes, and calls into undefined forwards into a ring buffer,
//! optionally echoing each one to stderr.
//!
//! Formatting for humans and machines lives in the debug layer; this module
//! only records.

pub mod buffer;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use crate::matcher::Matcher;

// =============================================================================
// Trace Output
// =============================================================================

/// Where trace output should be sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (traces still recorded in buffer).
    #[default]
    None,
    /// Also write each record to stderr.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Configuration for the tracer.
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Whether tracing is enabled.
    pub enabled: bool,
    /// Maximum records to keep in buffer.
    pub buffer_size: usize,
    /// Where to output traces.
    pub output: TraceOutput,
    /// Filter for specific event types (empty = all).
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10000,
            output: TraceOutput::None,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// Creates a new tracer configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to enable tracing.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Builder method to set buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to output to stderr.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Builder method to keep only the given event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records match events for one session.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    depth: usize,
    start_time: Instant,
}

impl Tracer {
    /// Creates a new tracer with the given configuration.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        let buffer_size = config.buffer_size;
        Self {
            config,
            buffer: TraceBuffer::new(buffer_size),
            depth: 0,
            start_time: Instant::now(),
        }
    }

    /// Creates a tracer with default configuration (disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Creates an enabled tracer that outputs to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(TracerConfig::new().enabled().to_stderr())
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets the trace output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.config.output = output;
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Returns the nesting depth of the attempt in progress.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Records a trace event at the current depth.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        if !self.config.event_filter.is_empty()
            && !self
                .config
                .event_filter
                .iter()
                .any(|kept| kept == event.event_type())
        {
            return;
        }

        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(self.depth, timestamp_ns, event);

        if self.config.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                Self::output_record(record);
            }
        }
    }

    fn output_record(record: &TraceRecord) {
        let indent = "  ".repeat(record.depth);
        let _ = writeln!(io::stderr(), "[{:06}] {indent}{}", record.id, record.event);
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Dispatch events
    // -------------------------------------------------------------------------
    //
    // Events are only built when tracing is on. Depth is tracked either way so
    // that enabling the tracer between matches keeps indentation right.

    /// Records the start of recognition and enters one level.
    #[inline]
    pub fn attempt(&mut self, matcher: &Matcher, position: usize) {
        if self.config.enabled {
            self.record_internal(TraceEvent::Attempt {
                matcher: matcher.id(),
                name: matcher.name(),
                position,
            });
        }
        self.depth += 1;
    }

    /// Leaves one level and records a success.
    #[inline]
    pub fn matched(&mut self, matcher: &Matcher, position: usize, len: usize) {
        self.depth = self.depth.saturating_sub(1);
        if self.config.enabled {
            self.record_internal(TraceEvent::Matched {
                matcher: matcher.id(),
                name: matcher.name(),
                position,
                len,
            });
        }
    }

    /// Leaves one level and records a failure.
    #[inline]
    pub fn no_match(&mut self, matcher: &Matcher, position: usize) {
        self.depth = self.depth.saturating_sub(1);
        if self.config.enabled {
            self.record_internal(TraceEvent::NoMatch {
                matcher: matcher.id(),
                name: matcher.name(),
                position,
            });
        }
    }

    /// Records a memo table hit.
    #[inline]
    pub fn memo_hit(&mut self, matcher: &Matcher, position: usize, matched: bool) {
        if self.config.enabled {
            self.record_internal(TraceEvent::MemoHit {
                matcher: matcher.id(),
                name: matcher.name(),
                position,
                matched,
            });
        }
    }

    /// Records a call into a forward with no delegate.
    #[inline]
    pub fn undefined_forward(&mut self, matcher: &Matcher, position: usize) {
        if self.config.enabled {
            self.record_internal(TraceEvent::UndefinedForward {
                matcher: matcher.id(),
                name: matcher.name(),
                position,
            });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("config", &self.config)
            .field("records", &self.buffer.len())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
