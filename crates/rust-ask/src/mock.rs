//! Scripted line reader for testing.
//!
//! [`MockReader`] answers prompts from a queue of lines and errors and records
//! what it was asked. Clones share state, so a test can hand one clone to a
//! session and keep another to inspect afterwards.
//!
//! # Example
//!
//! ```rust
//! use rust_ask::mock::MockReader;
//! use rust_ask::{AskConfig, Asker};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rust_ask::Result<()> {
//! let mock = MockReader::with_lines(["maybe", "y"]);
//! let asker = Asker::with_opener(AskConfig::default(), mock.opener());
//!
//! let answer = asker
//!     .ask_with("Continue? ", rust_ask::AskOptions::new().accept_list(["y", "n"]))
//!     .await?;
//! assert_eq!(answer, "y");
//! assert_eq!(mock.read_count(), 2);
//! assert_eq!(mock.close_count(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;

use crate::config::AskConfig;
use crate::error::{AskError, Result};
use crate::reader::LineReader;

/// One scripted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockInput {
    /// Answer with a line.
    Line(String),
    /// Fail the read with an I/O error.
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<MockInput>,
    prompts: Vec<String>,
    reads: usize,
    closes: usize,
    close_error: Option<String>,
}

/// A scripted reader.
#[derive(Debug, Clone, Default)]
pub struct MockReader {
    state: Arc<Mutex<MockState>>,
}

impl MockReader {
    /// Create a reader with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader that answers with `lines` in order.
    #[must_use]
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reader = Self::new();
        for line in lines {
            reader.push_line(line);
        }
        reader
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a line.
    pub fn push_line(&self, line: impl Into<String>) {
        self.lock().script.push_back(MockInput::Line(line.into()));
    }

    /// Queue a read failure.
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().script.push_back(MockInput::Error(message.into()));
    }

    /// Make the next close fail.
    pub fn fail_close(&self, message: impl Into<String>) {
        self.lock().close_error = Some(message.into());
    }

    /// Every prompt written so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Number of reads attempted.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    /// Number of times the reader was closed.
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.lock().closes
    }

    /// Number of scripted responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lock().script.len()
    }

    /// An opener for [`crate::Asker::with_opener`] that hands out clones of
    /// this reader.
    pub fn opener(&self) -> impl Fn(&AskConfig) -> Result<Self> + Send + Sync + 'static {
        let reader = self.clone();
        move |_| Ok(reader.clone())
    }
}

impl LineReader for MockReader {
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        let next = {
            let mut state = self.lock();
            state.prompts.push(prompt.to_string());
            state.reads += 1;
            state.script.pop_front()
        };
        Box::pin(async move {
            match next {
                Some(MockInput::Line(line)) => Ok(line),
                Some(MockInput::Error(message)) => Err(AskError::io_context(
                    "reading answer",
                    io::Error::new(io::ErrorKind::BrokenPipe, message),
                )),
                None => Err(AskError::Eof),
            }
        })
    }

    fn close(&mut self) -> BoxFuture<'_, Result<()>> {
        let error = {
            let mut state = self.lock();
            state.closes += 1;
            state.close_error.take()
        };
        Box::pin(async move {
            match error {
                Some(message) => Err(AskError::io_context(
                    "closing output",
                    io::Error::new(io::ErrorKind::BrokenPipe, message),
                )),
                None => Ok(()),
            }
        })
    }
}
