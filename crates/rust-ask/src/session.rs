//! Session resource wrapping one line-reading channel.
//!
//! A [`Session`] is shared as `Arc<Session>` between the scope that owns it
//! and every prompt issued against it. Only the owning scope closes it; see
//! [`crate::scope`] for the ownership rules.

use std::sync::{Mutex, PoisonError};

use crate::config::AskConfig;
use crate::error::{AskError, Result};
use crate::reader::{LineReader, StdioReader};
use crate::types::{SessionId, SessionState};

/// One interactive line-reading channel.
pub struct Session {
    /// Unique session identifier.
    id: SessionId,
    /// The underlying channel. Held for the duration of a read.
    reader: tokio::sync::Mutex<Box<dyn LineReader>>,
    /// Current session state.
    state: Mutex<SessionState>,
}

impl Session {
    /// Adopt an existing reader.
    pub fn from_reader(reader: impl LineReader + 'static) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, "Session opened");
        Self {
            id,
            reader: tokio::sync::Mutex::new(Box::new(reader)),
            state: Mutex::new(SessionState::Open),
        }
    }

    /// Open a session on the process's standard input and output.
    #[must_use]
    pub fn open(config: &AskConfig) -> Self {
        Self::from_reader(StdioReader::stdio(&config.reader))
    }

    /// Get the session ID.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Get the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if the session has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state() == SessionState::Closed
    }

    fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Write `prompt` and read one line.
    ///
    /// # Errors
    ///
    /// Returns [`AskError::SessionClosed`] if the session is closed or has
    /// already failed. A channel error moves the session to
    /// [`SessionState::Failed`] and is returned as-is.
    pub async fn read_line(&self, prompt: &str) -> Result<String> {
        let mut reader = self.reader.lock().await;
        if !self.state().is_usable() {
            return Err(AskError::SessionClosed);
        }

        match reader.read_line(prompt).await {
            Ok(line) => {
                tracing::trace!(session = %self.id, bytes = line.len(), "Line read");
                Ok(line)
            }
            Err(e) => {
                tracing::debug!(session = %self.id, error = %e, "Channel failed");
                self.set_state(SessionState::Failed);
                Err(e)
            }
        }
    }

    /// Close the underlying channel.
    ///
    /// The session is closed afterwards even if the channel reported an
    /// error while closing.
    ///
    /// # Errors
    ///
    /// Returns [`AskError::SessionClosed`] if the session was already closed,
    /// or the channel's own close error.
    pub async fn close(&self) -> Result<()> {
        let mut reader = self.reader.lock().await;
        if self.is_closed() {
            return Err(AskError::SessionClosed);
        }
        self.set_state(SessionState::Closed);

        let result = reader.close().await;
        match &result {
            Ok(()) => tracing::debug!(session = %self.id, "Session closed"),
            Err(e) => tracing::warn!(session = %self.id, error = %e, "Session closed with error"),
        }
        result
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
