//! Line reader over async byte streams.

use futures::future::BoxFuture;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

use super::LineReader;
use crate::config::ReaderConfig;
use crate::error::{AskError, Result};

/// Reader bound to the process's standard input and output.
pub type StdinReader = StdioReader<BufReader<Stdin>, Stdout>;

/// A line reader over a buffered input stream and an output stream.
///
/// Prompts are written to the output and flushed before reading. A line ends
/// at `\n`; a preceding `\r` is dropped as well. Input that ends without a
/// terminator is returned as the final line.
#[derive(Debug)]
pub struct StdioReader<R, W> {
    input: R,
    output: W,
    max_line_length: usize,
}

impl StdinReader {
    /// Bind to the process's standard streams.
    #[must_use]
    pub fn stdio(config: &ReaderConfig) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), config)
    }
}

impl<R, W> StdioReader<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a reader over the given streams.
    pub fn new(input: R, output: W, config: &ReaderConfig) -> Self {
        Self {
            input,
            output,
            max_line_length: config.max_line_length,
        }
    }

    /// Consume the reader, returning the streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    async fn prompt_and_read(&mut self, prompt: &str) -> Result<String> {
        self.output
            .write_all(prompt.as_bytes())
            .await
            .map_err(|e| AskError::io_context("writing prompt", e))?;
        self.output
            .flush()
            .await
            .map_err(|e| AskError::io_context("flushing prompt", e))?;

        let mut line = Vec::new();
        loop {
            let available = self
                .input
                .fill_buf()
                .await
                .map_err(|e| AskError::io_context("reading answer", e))?;

            if available.is_empty() {
                if line.is_empty() {
                    return Err(AskError::Eof);
                }
                break;
            }

            let (used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (available.len(), false),
            };
            line.extend_from_slice(&available[..used]);
            self.input.consume(used);

            if done {
                break;
            }
            // A trailing `\r` may still turn out to be part of the terminator.
            let pending_cr = usize::from(line.last() == Some(&b'\r'));
            if line.len() > self.max_line_length.saturating_add(pending_cr) {
                return Err(AskError::LineTooLong {
                    max: self.max_line_length,
                });
            }
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        if line.len() > self.max_line_length {
            return Err(AskError::LineTooLong {
                max: self.max_line_length,
            });
        }

        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    async fn shutdown(&mut self) -> Result<()> {
        self.output
            .shutdown()
            .await
            .map_err(|e| AskError::io_context("closing output", e))
    }
}

impl<R, W> LineReader for StdioReader<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        Box::pin(self.prompt_and_read(prompt))
    }

    fn close(&mut self) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.shutdown())
    }
}
