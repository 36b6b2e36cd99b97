//! Caller-side deadlines.
//!
//! The prompt loop has no timeout of its own. A caller that wants one races
//! the ask against a timer with [`TimeoutExt`]; an elapsed deadline comes
//! back as [`AskError::TimedOut`].
//!
//! When the timer wins, the ask future is dropped. For a single-shot
//! [`Asker::ask`](crate::Asker::ask) that drops its owned session without
//! closing it. To keep close-exactly-once, put the deadline inside a scoped
//! batch: the scope still closes its session when the block returns.
//!
//! ```rust,no_run
//! use rust_ask::{Asker, TimeoutExt};
//!
//! # async fn demo() -> rust_ask::Result<()> {
//! let asker = Asker::default();
//! let name = asker
//!     .scoped(async |ask| match ask.ask("Name: ").with_timeout_secs(30).await {
//!         Err(e) if e.is_timeout() => Ok("anonymous".to_string()),
//!         other => other,
//!     })
//!     .await?;
//! println!("{name}");
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;

use crate::error::{AskError, Result};

/// Deadlines for futures that resolve to a rust-ask [`Result`].
pub trait TimeoutExt<T>: Future<Output = Result<T>> + Sized {
    /// Fail with [`AskError::TimedOut`] if `self` is not done within
    /// `duration`.
    fn with_timeout(self, duration: Duration) -> impl Future<Output = Result<T>> {
        tokio::time::timeout(duration, self).map(move |outcome| {
            outcome.unwrap_or_else(|_| Err(AskError::TimedOut { after: duration }))
        })
    }

    /// [`TimeoutExt::with_timeout`] in whole seconds.
    fn with_timeout_secs(self, secs: u64) -> impl Future<Output = Result<T>> {
        self.with_timeout(Duration::from_secs(secs))
    }
}

impl<T, F: Future<Output = Result<T>>> TimeoutExt<T> for F {}
