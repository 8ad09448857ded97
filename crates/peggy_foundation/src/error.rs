//! Error types for peggy.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! A failed match is not an error. These types cover grammar construction,
//! action evaluation, and input I/O.

use std::fmt;

use thiserror::Error;

/// The main error type for peggy operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context stack, creating the
    /// context if there is none yet.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates an invalid character range error.
    #[must_use]
    pub fn invalid_range(from: char, to: char) -> Self {
        Self::new(ErrorKind::InvalidRange { from, to })
    }

    /// Creates a left recursion error.
    #[must_use]
    pub fn left_recursion(path: Vec<String>) -> Self {
        Self::new(ErrorKind::LeftRecursion { path })
    }

    /// Creates an unresolved forward reference error.
    #[must_use]
    pub fn unresolved_forward(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedForward { name: name.into() })
    }

    /// Creates an operand out of range error.
    #[must_use]
    pub fn operand_out_of_range(matcher: impl Into<String>, index: usize, arity: usize) -> Self {
        Self::new(ErrorKind::OperandOutOfRange {
            matcher: matcher.into(),
            index,
            arity,
        })
    }

    /// Creates a not-a-forward error.
    #[must_use]
    pub fn not_forward(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotForward { name: name.into() })
    }

    /// Creates an action failure error.
    #[must_use]
    pub fn action(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionFailed {
            message: message.into(),
        })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A regular expression failed to compile.
    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// The compiler's complaint.
        message: String,
    },

    /// A character range whose lower bound exceeds its upper bound.
    #[error("invalid character range [{from}-{to}]")]
    InvalidRange {
        /// Lower bound.
        from: char,
        /// Upper bound.
        to: char,
    },

    /// A rule can reach itself without consuming input.
    #[error("left recursion: {}", .path.join(" -> "))]
    LeftRecursion {
        /// Names of the matchers on the cycle, starting and ending with the same one.
        path: Vec<String>,
    },

    /// A forward declaration was never given a delegate.
    #[error("unresolved forward reference: {name}")]
    UnresolvedForward {
        /// Name of the forward placeholder.
        name: String,
    },

    /// An operand slot index is out of range for a matcher.
    #[error("operand {index} out of range for {matcher} (arity {arity})")]
    OperandOutOfRange {
        /// Name of the matcher.
        matcher: String,
        /// The requested slot.
        index: usize,
        /// Number of slots the matcher has.
        arity: usize,
    },

    /// `define` was called on something other than a forward placeholder.
    #[error("{name} is not a forward declaration")]
    NotForward {
        /// Name of the matcher.
        name: String,
    },

    /// A semantic action reported a failure.
    #[error("action failed: {message}")]
    ActionFailed {
        /// Description supplied by the action.
        message: String,
    },

    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(std::io::Error),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the matcher involved.
    pub matcher: Option<String>,
    /// Byte offset in the input.
    pub position: Option<usize>,
    /// Stack of enclosing evaluations, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the matcher name.
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = Some(matcher.into());
        self
    }

    /// Sets the input position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(matcher) = &self.matcher {
            write!(f, "in {matcher}")?;
            if let Some(position) = self.position {
                write!(f, " at {position}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
