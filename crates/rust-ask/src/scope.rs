//! Session ownership and the caller-facing entry points.
//!
//! [`Asker`] decides where sessions come from and when they close:
//!
//! - [`Asker::ask`] is single-shot. It opens a session, asks one question,
//!   and closes the session once the answer (or error) is in.
//! - [`Asker::scoped`] opens one session for a whole block. The block gets a
//!   [`Scope`] whose `ask` never closes anything; the session closes exactly
//!   once after the block finishes, whether it returned `Ok`, `Err`, or
//!   panicked.
//!
//! An `Asker` built with [`Asker::with_session`] borrows someone else's
//! session and never closes it.
//!
//! # Example
//!
//! ```rust,no_run
//! use rust_ask::{AskConfig, AskOptions, Asker};
//!
//! # async fn demo() -> rust_ask::Result<()> {
//! let asker = Asker::new(AskConfig::default());
//!
//! let (name, sure) = asker
//!     .scoped(async |ask| {
//!         let name = ask.ask("Name: ").await?;
//!         let sure = ask
//!             .ask_with("Sure? [y/n] ", AskOptions::new().accept_list(["y", "n"]))
//!             .await?;
//!         Ok::<_, rust_ask::AskError>((name, sure))
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::ops::Deref;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::config::AskConfig;
use crate::engine;
use crate::error::{AskError, Result};
use crate::options::AskOptions;
use crate::question::{Prompt, Question};
use crate::reader::LineReader;
use crate::session::Session;

/// The properties bag seen by every question generator in a scope.
///
/// Always carries the session; `X` holds whatever the properties factory
/// adds. Custom fields are reached through `Deref`.
#[derive(Debug)]
pub struct Properties<X = ()> {
    session: Arc<Session>,
    ext: X,
}

impl<X> Properties<X> {
    /// Bundle a session with custom fields.
    pub const fn new(session: Arc<Session>, ext: X) -> Self {
        Self { session, ext }
    }

    /// The session questions are asked on.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The custom fields.
    #[must_use]
    pub const fn ext(&self) -> &X {
        &self.ext
    }
}

impl<X> Deref for Properties<X> {
    type Target = X;

    fn deref(&self) -> &X {
        &self.ext
    }
}

type OpenerFn = dyn Fn(&AskConfig) -> Result<Box<dyn LineReader>> + Send + Sync;
type FactoryFn<X> = dyn Fn(&Arc<Session>) -> X + Send + Sync;

/// Where an [`Asker`] gets its sessions.
#[derive(Clone)]
enum SessionSource {
    /// Open a fresh, owned session for each call or scope.
    Open(Arc<OpenerFn>),
    /// Use a session owned elsewhere.
    Shared(Arc<Session>),
}

/// Entry point for asking questions.
pub struct Asker<X = ()> {
    config: AskConfig,
    source: SessionSource,
    factory: Arc<FactoryFn<X>>,
}

impl Asker {
    /// Ask on the process's standard input and output.
    #[must_use]
    pub fn new(config: AskConfig) -> Self {
        Self::from_source(
            config,
            SessionSource::Open(Arc::new(
                |config: &AskConfig| -> Result<Box<dyn LineReader>> {
                    let reader = crate::reader::StdioReader::stdio(&config.reader);
                    Ok(Box::new(reader))
                },
            )),
        )
    }

    /// Ask on readers produced by `opener`, one per owned session.
    pub fn with_opener<F, R>(config: AskConfig, opener: F) -> Self
    where
        F: Fn(&AskConfig) -> Result<R> + Send + Sync + 'static,
        R: LineReader + 'static,
    {
        Self::from_source(
            config,
            SessionSource::Open(Arc::new(
                move |config: &AskConfig| -> Result<Box<dyn LineReader>> {
                    Ok(Box::new(opener(config)?))
                },
            )),
        )
    }

    /// Ask on a session owned elsewhere. It is never closed by this asker.
    #[must_use]
    pub fn with_session(config: AskConfig, session: Arc<Session>) -> Self {
        Self::from_source(config, SessionSource::Shared(session))
    }

    fn from_source(config: AskConfig, source: SessionSource) -> Self {
        Self {
            config,
            source,
            factory: Arc::new(|_: &Arc<Session>| ()),
        }
    }
}

impl Default for Asker {
    fn default() -> Self {
        Self::new(AskConfig::default())
    }
}

impl<X> Asker<X> {
    /// Replace the properties factory.
    ///
    /// `factory` runs once per single-shot call and once per scoped batch;
    /// every question inside that batch sees the same bag.
    #[must_use]
    pub fn properties<Y, F>(self, factory: F) -> Asker<Y>
    where
        F: Fn(&Arc<Session>) -> Y + Send + Sync + 'static,
    {
        Asker {
            config: self.config,
            source: self.source,
            factory: Arc::new(factory),
        }
    }

    /// The configuration sessions are opened with.
    #[must_use]
    pub const fn config(&self) -> &AskConfig {
        &self.config
    }

    /// Get a session and whether this asker owns it.
    fn acquire(&self) -> Result<(Arc<Session>, bool)> {
        match &self.source {
            SessionSource::Open(opener) => {
                let reader = opener(&self.config)?;
                Ok((Arc::new(Session::from_reader(reader)), true))
            }
            SessionSource::Shared(session) => Ok((Arc::clone(session), false)),
        }
    }

    fn bag(&self, session: Arc<Session>) -> Properties<X> {
        let ext = (self.factory)(&session);
        Properties::new(session, ext)
    }

    /// Ask one question.
    ///
    /// An owned session is closed once the call settles: with an answer,
    /// with an error, or with a panic from a callback (resumed after
    /// closing). If both the loop and the close fail, the loop's error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns channel and callback errors from the prompt loop, and channel
    /// errors from closing.
    pub async fn ask(&self, question: impl Into<Question<X>>) -> Result<String> {
        let question = question.into();
        let (scope, owned) = self.enter()?;
        let outcome = AssertUnwindSafe(engine::run(scope.properties(), &question))
            .catch_unwind()
            .await;
        Self::leave(&scope, owned, outcome).await
    }

    /// Ask one literal question with options.
    ///
    /// # Errors
    ///
    /// See [`Asker::ask`].
    pub async fn ask_with(
        &self,
        question: impl Into<String>,
        options: AskOptions,
    ) -> Result<String> {
        self.ask(Prompt::new(question).with_options(options)).await
    }

    /// Run `block` with one shared session.
    ///
    /// The session opens before the block and, if owned, closes exactly
    /// once after it: on `Ok`, on `Err`, and on panic (the panic is resumed
    /// after closing). A close error replaces an `Ok` result; it never masks
    /// the block's own error.
    ///
    /// # Errors
    ///
    /// Returns the block's error, or the close error on an otherwise
    /// successful block.
    pub async fn scoped<F, T, E>(&self, block: F) -> std::result::Result<T, E>
    where
        F: AsyncFnOnce(&Scope<X>) -> std::result::Result<T, E>,
        E: From<AskError>,
    {
        let (scope, owned) = self.enter()?;
        let outcome = AssertUnwindSafe(block(&scope)).catch_unwind().await;
        Self::leave(&scope, owned, outcome).await
    }

    /// Open the session and properties bag for a scoped batch.
    pub(crate) fn enter(&self) -> Result<(Scope<X>, bool)> {
        let (session, owned) = self.acquire()?;
        let scope = Scope {
            props: self.bag(session),
        };
        tracing::debug!(session = %scope.session().id(), owned, "Scope entered");
        Ok((scope, owned))
    }

    /// Close an owned scope's session and settle the block's outcome.
    pub(crate) async fn leave<T, E>(
        scope: &Scope<X>,
        owned: bool,
        outcome: std::thread::Result<std::result::Result<T, E>>,
    ) -> std::result::Result<T, E>
    where
        E: From<AskError>,
    {
        if !owned {
            return outcome.unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        }

        let closed = scope.session().close().await;
        tracing::debug!(session = %scope.session().id(), "Scope left");
        match outcome {
            Err(panic) => std::panic::resume_unwind(panic),
            Ok(Ok(value)) => closed.map(|()| value).map_err(E::from),
            Ok(Err(e)) => Err(e),
        }
    }
}

impl<X> Clone for Asker<X> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            source: self.source.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<X> std::fmt::Debug for Asker<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            SessionSource::Open(_) => "open".to_string(),
            SessionSource::Shared(session) => session.id().to_string(),
        };
        f.debug_struct("Asker")
            .field("config", &self.config)
            .field("source", &source)
            .finish()
    }
}

/// The bound asker handed to a scoped block.
///
/// Every question goes to the same session with the same properties bag,
/// and nothing here closes the session.
#[derive(Debug)]
pub struct Scope<X = ()> {
    props: Properties<X>,
}

impl<X> Scope<X> {
    /// Ask one question on the scope's session.
    ///
    /// # Errors
    ///
    /// Returns channel and callback errors from the prompt loop.
    pub async fn ask(&self, question: impl Into<Question<X>>) -> Result<String> {
        engine::run(&self.props, &question.into()).await
    }

    /// Ask one literal question with options.
    ///
    /// # Errors
    ///
    /// See [`Scope::ask`].
    pub async fn ask_with(
        &self,
        question: impl Into<String>,
        options: AskOptions,
    ) -> Result<String> {
        self.ask(Prompt::new(question).with_options(options)).await
    }

    /// Run a nested block on the same session and properties.
    pub async fn scoped<F, T>(&self, block: F) -> T
    where
        F: AsyncFnOnce(&Self) -> T,
    {
        block(self).await
    }

    /// The properties bag shared by this scope.
    #[must_use]
    pub const fn properties(&self) -> &Properties<X> {
        &self.props
    }

    /// The scope's session.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        self.props.session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockReader;

    fn asker(mock: &MockReader) -> Asker {
        Asker::with_opener(AskConfig::default(), mock.opener())
    }

    #[tokio::test]
    async fn single_shot_closes_owned_session() {
        let mock = MockReader::with_lines(["hello"]);
        assert_eq!(asker(&mock).ask("Say: ").await.unwrap(), "hello");
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn single_shot_closes_on_failure() {
        let mock = MockReader::new();
        assert!(asker(&mock).ask("Say: ").await.unwrap_err().is_channel_failure());
        assert_eq!(mock.close_count(), 1);
    }

    #[tokio::test]
    async fn close_error_surfaces_on_success() {
        let mock = MockReader::with_lines(["x"]);
        mock.fail_close("broken pipe");
        assert!(asker(&mock).ask("? ").await.unwrap_err().is_channel_failure());
    }

    #[tokio::test]
    async fn shared_session_is_left_open() {
        let mock = MockReader::with_lines(["a", "b"]);
        let session = Arc::new(Session::from_reader(mock.clone()));
        let asker = Asker::with_session(AskConfig::default(), Arc::clone(&session));

        assert_eq!(asker.ask("1? ").await.unwrap(), "a");
        assert_eq!(asker.scoped(async |s| s.ask("2? ").await).await.unwrap(), "b");
        assert_eq!(mock.close_count(), 0);
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn nested_scope_reuses_session() {
        let mock = MockReader::with_lines(["outer", "inner"]);
        let (outer, inner) = asker(&mock)
            .scoped(async |scope| {
                let outer = scope.ask("o? ").await?;
                let id = scope.session().id();
                let inner = scope
                    .scoped(async |nested| {
                        assert_eq!(nested.session().id(), id);
                        nested.ask("i? ").await
                    })
                    .await?;
                Ok::<_, AskError>((outer, inner))
            })
            .await
            .unwrap();

        assert_eq!((outer.as_str(), inner.as_str()), ("outer", "inner"));
        assert_eq!(mock.close_count(), 1);
    }
}
