//! The line-reading channel behind a session.
//!
//! A [`LineReader`] writes a prompt and reads back one line. It is the only
//! place rust-ask touches I/O; everything above it works against the trait.
//!
//! - [`StdioReader`]: reads from any buffered async reader and writes to any
//!   async writer, with [`StdioReader::stdio`] binding the process streams.
//! - [`crate::mock::MockReader`]: a scripted reader for tests.

mod stdio;

use futures::future::BoxFuture;

use crate::error::Result;

pub use stdio::{StdinReader, StdioReader};

/// A channel that can show a prompt and read back one line.
pub trait LineReader: Send {
    /// Write `prompt` and read one line of input, without its terminator.
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;

    /// Release the channel. No reads follow a close.
    fn close(&mut self) -> BoxFuture<'_, Result<()>>;
}

impl<R: LineReader + ?Sized> LineReader for Box<R> {
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        (**self).read_line(prompt)
    }

    fn close(&mut self) -> BoxFuture<'_, Result<()>> {
        (**self).close()
    }
}
