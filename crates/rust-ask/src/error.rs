//! Error types for rust-ask.
//!
//! Only genuine faults are errors: the line channel failing, a caller
//! callback failing, misuse of a closed session, or bad configuration.
//! A rejected answer is not an error; the prompt loop simply asks again.

use thiserror::Error;

use crate::types::PromptEvent;

/// Boxed error produced by caller-supplied callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The callback that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStage {
    /// The `format` callback.
    Format,
    /// The `accept` predicate.
    Accept,
    /// An `on` hook, for the given event.
    Hook(PromptEvent),
}

impl std::fmt::Display for CallbackStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format => f.write_str("format"),
            Self::Accept => f.write_str("accept"),
            Self::Hook(event) => write!(f, "on({})", event.as_str()),
        }
    }
}

/// The main error type for rust-ask operations.
#[derive(Debug, Error)]
pub enum AskError {
    /// An I/O error on the line channel.
    #[error("{context}: {source}")]
    Io {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input ended before a line could be read.
    #[error("end of input reached while waiting for an answer")]
    Eof,

    /// A line exceeded the configured maximum length.
    #[error("input line exceeds maximum length of {max} bytes")]
    LineTooLong {
        /// The configured limit.
        max: usize,
    },

    /// The session was used after it closed or failed.
    #[error("session is closed")]
    SessionClosed,

    /// A caller-supplied callback failed.
    #[error("{stage} callback failed: {source}")]
    Callback {
        /// Which callback failed.
        stage: CallbackStage,
        /// The error it returned.
        #[source]
        source: BoxError,
    },

    /// A caller-imposed deadline passed before an answer was accepted.
    #[error("no answer accepted within {after:?}")]
    TimedOut {
        /// The deadline that elapsed.
        after: std::time::Duration,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// The blocking wrapper could not start its runtime.
    #[error("failed to build tokio runtime: {source}")]
    Runtime {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for rust-ask operations.
pub type Result<T> = std::result::Result<T, AskError>;

impl AskError {
    /// Create an I/O error with context.
    pub fn io_context(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a callback error.
    pub fn callback(stage: CallbackStage, source: impl Into<BoxError>) -> Self {
        Self::Callback {
            stage,
            source: source.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error came from the line channel.
    #[must_use]
    pub const fn is_channel_failure(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Eof | Self::LineTooLong { .. })
    }

    /// Whether this error came from a caller callback.
    #[must_use]
    pub const fn is_callback_failure(&self) -> bool {
        matches!(self, Self::Callback { .. })
    }

    /// Whether this error reports use of a closed session.
    #[must_use]
    pub const fn is_session_closed(&self) -> bool {
        matches!(self, Self::SessionClosed)
    }

    /// Whether a caller deadline elapsed.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// The failing callback, if this is a callback error.
    #[must_use]
    pub const fn callback_stage(&self) -> Option<CallbackStage> {
        match self {
            Self::Callback { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
