//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::fmt::Write;

use peggy_engine::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats a single trace record to a string.
    fn format(&self, record: &TraceRecord) -> String;

    /// Formats multiple records.
    fn format_many(&self, records: &[&TraceRecord]) -> String {
        records
            .iter()
            .map(|r| self.format(r))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form, indented by nesting depth.
#[derive(Clone, Debug)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record IDs.
    pub show_ids: bool,
    /// Whether to indent by depth.
    pub indent: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self {
            show_timestamps: false,
            show_ids: false,
            indent: true,
        }
    }
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record IDs.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    /// Builder method to print every record flush left.
    #[must_use]
    pub fn flat(mut self) -> Self {
        self.indent = false;
        self
    }

    /// Formats timestamp in microseconds.
    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut line = String::new();

        if self.show_ids {
            let _ = write!(line, "[{:06}] ", record.id);
        }

        if self.show_timestamps {
            let _ = write!(
                line,
                "{:>10} ",
                Self::format_timestamp(record.timestamp_ns)
            );
        }

        if self.indent {
            line.push_str(&"  ".repeat(record.depth));
        }

        let _ = match &record.event {
            TraceEvent::Attempt { name, position, .. } => write!(line, "? {name} @{position}"),
            TraceEvent::MemoHit {
                name,
                position,
                matched,
                ..
            } => {
                let outcome = if *matched { "hit" } else { "hit, failed" };
                write!(line, "= {name} @{position} ({outcome})")
            }
            TraceEvent::Matched {
                name,
                position,
                len,
                ..
            } => write!(line, "+ {name} @{position} [{len}]"),
            TraceEvent::NoMatch { name, position, .. } => write!(line, "- {name} @{position}"),
            TraceEvent::UndefinedForward { name, position, .. } => {
                write!(line, "! {name} @{position} (undefined forward)")
            }
        };

        line
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print JSON arrays.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Escapes a string for JSON.
    fn escape_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", u32::from(c));
                }
                c => out.push(c),
            }
        }
        out
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let event = &record.event;
        let extra = match event {
            TraceEvent::MemoHit { matched, .. } => format!(",\"matched\":{matched}"),
            TraceEvent::Matched { len, .. } => format!(",\"len\":{len}"),
            TraceEvent::Attempt { .. }
            | TraceEvent::NoMatch { .. }
            | TraceEvent::UndefinedForward { .. } => String::new(),
        };

        format!(
            "{{\"id\":{},\"depth\":{},\"timestamp_ns\":{},\"type\":\"{}\",\"matcher\":{},\"name\":\"{}\",\"position\":{}{}}}",
            record.id,
            record.depth,
            record.timestamp_ns,
            record.event_type(),
            event.matcher().as_u64(),
            Self::escape_string(event.name()),
            event.position(),
            extra
        )
    }

    fn format_many(&self, records: &[&TraceRecord]) -> String {
        let items: Vec<_> = records.iter().map(|r| self.format(r)).collect();
        if self.pretty {
            format!("[\n  {}\n]", items.join(",\n  "))
        } else {
            format!("[{}]", items.join(","))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
