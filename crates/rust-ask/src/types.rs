//! Common types used throughout rust-ask.

use std::fmt;

/// Per-attempt context passed to generators and `format` callbacks.
///
/// A fresh value is built for every iteration of the prompt loop.
/// `previous_answer` is the transformed answer of the preceding iteration of
/// the same call, or empty on the first attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    /// Zero-based retry counter.
    pub iteration: usize,
    /// The transformed answer from the previous iteration.
    pub previous_answer: String,
}

impl Attempt {
    /// The context of the first attempt.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            iteration: 0,
            previous_answer: String::new(),
        }
    }

    /// Whether this is the first attempt.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.iteration == 0
    }

    /// The context following this one, given the answer just rejected.
    #[must_use]
    pub(crate) fn next(&self, rejected: String) -> Self {
        Self {
            iteration: self.iteration + 1,
            previous_answer: rejected,
        }
    }
}

/// Lifecycle events delivered to `on` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptEvent {
    /// Before the question is written.
    BeforeAsk,
    /// The read has been issued and the question written; the answer is
    /// still outstanding.
    Ask,
    /// A raw line has been received.
    Answer,
}

impl PromptEvent {
    /// The event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeAsk => "beforeAsk",
            Self::Ask => "ask",
            Self::Answer => "answer",
        }
    }
}

impl fmt::Display for PromptEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Reads are allowed.
    #[default]
    Open,
    /// A channel failure occurred; reads are refused but the reader
    /// has not been closed yet.
    Failed,
    /// The session has been closed.
    Closed,
}

impl SessionState {
    /// Check if the session can still be read from.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a new session ID.
    #[must_use]
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}
