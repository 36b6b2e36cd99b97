//! Synchronous wrapper for programs without an async runtime.
//!
//! [`BlockingAsker`] owns a current-thread tokio runtime and drives the
//! async [`Asker`] on it. Its scoped blocks are plain closures.
//!
//! Do not use it from inside an async context; tokio refuses to block on a
//! runtime from within another one.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::config::AskConfig;
use crate::error::{AskError, Result};
use crate::options::AskOptions;
use crate::question::Question;
use crate::scope::{Asker, Properties, Scope};
use crate::session::Session;

/// A blocking asker.
#[derive(Debug)]
pub struct BlockingAsker<X = ()> {
    /// The tokio runtime.
    runtime: Runtime,
    /// The inner async asker.
    inner: Asker<X>,
}

impl BlockingAsker {
    /// Ask on the process's standard input and output.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built.
    pub fn new(config: AskConfig) -> Result<Self> {
        Self::from_asker(Asker::new(config))
    }
}

impl<X> BlockingAsker<X> {
    /// Wrap an existing asker.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built.
    pub fn from_asker(inner: Asker<X>) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| AskError::Runtime { source })?;
        Ok(Self { runtime, inner })
    }

    /// The wrapped asker.
    #[must_use]
    pub const fn asker(&self) -> &Asker<X> {
        &self.inner
    }

    /// Ask one question, blocking until it is answered.
    ///
    /// # Errors
    ///
    /// See [`Asker::ask`].
    pub fn ask(&self, question: impl Into<Question<X>>) -> Result<String> {
        self.runtime.block_on(self.inner.ask(question))
    }

    /// Ask one literal question with options.
    ///
    /// # Errors
    ///
    /// See [`Asker::ask`].
    pub fn ask_with(&self, question: impl Into<String>, options: AskOptions) -> Result<String> {
        self.runtime.block_on(self.inner.ask_with(question, options))
    }

    /// Run a synchronous `block` with one shared session.
    ///
    /// Session ownership follows [`Asker::scoped`]: an owned session closes
    /// exactly once after the block returns or panics.
    ///
    /// # Errors
    ///
    /// Returns the block's error, or the close error on an otherwise
    /// successful block.
    pub fn scoped<F, T, E>(&self, block: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&BlockingScope<'_, X>) -> std::result::Result<T, E>,
        E: From<AskError>,
    {
        let (scope, owned) = self.inner.enter()?;
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            block(&BlockingScope {
                runtime: &self.runtime,
                scope: &scope,
            })
        }));
        self.runtime
            .block_on(Asker::<X>::leave(&scope, owned, outcome))
    }
}

/// The bound asker handed to a blocking scoped block.
#[derive(Debug)]
pub struct BlockingScope<'a, X = ()> {
    runtime: &'a Runtime,
    scope: &'a Scope<X>,
}

impl<X> BlockingScope<'_, X> {
    /// Ask one question on the scope's session.
    ///
    /// # Errors
    ///
    /// See [`Scope::ask`].
    pub fn ask(&self, question: impl Into<Question<X>>) -> Result<String> {
        self.runtime.block_on(self.scope.ask(question))
    }

    /// Ask one literal question with options.
    ///
    /// # Errors
    ///
    /// See [`Scope::ask`].
    pub fn ask_with(&self, question: impl Into<String>, options: AskOptions) -> Result<String> {
        self.runtime.block_on(self.scope.ask_with(question, options))
    }

    /// Run a nested block on the same session and properties.
    pub fn scoped<F, T>(&self, block: F) -> T
    where
        F: FnOnce(&Self) -> T,
    {
        block(self)
    }

    /// The properties bag shared by this scope.
    #[must_use]
    pub const fn properties(&self) -> &Properties<X> {
        self.scope.properties()
    }

    /// The scope's session.
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        self.scope.session()
    }
}
