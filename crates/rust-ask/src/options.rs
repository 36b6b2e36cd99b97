//! Per-question options: trimming, formatting, acceptance, and hooks.
//!
//! Every field is optional and the defaults are pass-through: no trimming,
//! no formatting, every answer accepted, no hooks.
//!
//! ```rust
//! use rust_ask::AskOptions;
//!
//! let options = AskOptions::new()
//!     .trim(true)
//!     .format(|answer, _| answer.to_lowercase())
//!     .accept_list(["y", "n"]);
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::{AskError, BoxError, CallbackStage, Result};
use crate::types::{Attempt, PromptEvent};

type FormatFn = dyn Fn(&str, &Attempt) -> std::result::Result<String, BoxError> + Send + Sync;
type PredicateFn =
    dyn Fn(String) -> BoxFuture<'static, std::result::Result<bool, BoxError>> + Send + Sync;
type HookFn =
    dyn Fn(PromptEvent) -> BoxFuture<'static, std::result::Result<(), BoxError>> + Send + Sync;

/// Replaces an answer after trimming.
///
/// Receives the (possibly trimmed) answer and the attempt context. Its
/// result is both the value checked by [`Accept`] and the
/// `previous_answer` seen by the next attempt.
#[derive(Clone)]
pub struct Format(Arc<FormatFn>);

impl Format {
    /// Wrap an infallible formatter.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &Attempt) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(move |answer: &str, attempt: &Attempt| {
            Ok::<_, BoxError>(f(answer, attempt))
        }))
    }

    /// Wrap a formatter that can fail. A failure aborts the prompt.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&str, &Attempt) -> std::result::Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |answer: &str, attempt: &Attempt| {
            f(answer, attempt).map_err(Into::<BoxError>::into)
        }))
    }

    pub(crate) fn apply(&self, answer: &str, attempt: &Attempt) -> Result<String> {
        (self.0)(answer, attempt).map_err(|e| AskError::callback(CallbackStage::Format, e))
    }
}

impl std::fmt::Debug for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Format(..)")
    }
}

/// An acceptance predicate, possibly asynchronous.
#[derive(Clone)]
pub struct Predicate(Arc<PredicateFn>);

impl Predicate {
    async fn call(&self, answer: &str) -> Result<bool> {
        (self.0)(answer.to_string())
            .await
            .map_err(|e| AskError::callback(CallbackStage::Accept, e))
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Decides whether an answer ends the prompt loop.
#[derive(Debug, Clone)]
pub enum Accept {
    /// A fixed verdict.
    Always(bool),
    /// Accept only members of the list. An empty list accepts everything.
    List(Vec<String>),
    /// Ask a predicate.
    Predicate(Predicate),
}

impl Accept {
    /// Accept only the given answers.
    pub fn one_of<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(answers.into_iter().map(Into::into).collect())
    }

    /// Accept answers for which `f` returns true.
    pub fn when<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Predicate(Arc::new(move |answer: String| {
            futures::future::ready(Ok::<_, BoxError>(f(&answer))).boxed()
        })))
    }

    /// Accept answers for which `f` returns `Ok(true)`. An error aborts the
    /// prompt.
    pub fn try_when<F, E>(f: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::Predicate(Predicate(Arc::new(move |answer: String| {
            futures::future::ready(f(&answer).map_err(Into::<BoxError>::into)).boxed()
        })))
    }

    /// Accept answers for which the future returned by `f` resolves to true.
    pub fn when_async<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::Predicate(Predicate(Arc::new(move |answer: String| {
            f(answer).map(Ok::<_, BoxError>).boxed()
        })))
    }

    /// Asynchronous form of [`Accept::try_when`].
    pub fn try_when_async<F, Fut, E>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<bool, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Self::Predicate(Predicate(Arc::new(move |answer: String| {
            f(answer).map(|r| r.map_err(Into::<BoxError>::into)).boxed()
        })))
    }

    /// Accept answers matching a regular expression.
    #[must_use]
    pub fn matching(pattern: regex::Regex) -> Self {
        Self::when(move |answer| pattern.is_match(answer))
    }

    /// Compute the verdict for an answer.
    pub async fn verdict(&self, answer: &str) -> Result<bool> {
        match self {
            Self::Always(verdict) => Ok(*verdict),
            Self::List(answers) => Ok(answers.is_empty() || answers.iter().any(|a| a == answer)),
            Self::Predicate(predicate) => predicate.call(answer).await,
        }
    }
}

impl From<bool> for Accept {
    fn from(verdict: bool) -> Self {
        Self::Always(verdict)
    }
}

impl From<Vec<String>> for Accept {
    fn from(answers: Vec<String>) -> Self {
        Self::List(answers)
    }
}

impl<const N: usize> From<[&str; N]> for Accept {
    fn from(answers: [&str; N]) -> Self {
        Self::one_of(answers)
    }
}

/// Receives [`PromptEvent`]s. Every hook is awaited before the loop moves
/// on; a synchronous hook is simply a future that is already complete.
#[derive(Clone)]
pub struct Hook(Arc<HookFn>);

impl Hook {
    /// Wrap a synchronous hook.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(PromptEvent) + Send + Sync + 'static,
    {
        Self(Arc::new(move |event: PromptEvent| {
            f(event);
            futures::future::ready(Ok::<_, BoxError>(())).boxed()
        }))
    }

    /// Wrap a synchronous hook that can fail.
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(PromptEvent) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |event: PromptEvent| {
            futures::future::ready(f(event).map_err(Into::<BoxError>::into)).boxed()
        }))
    }

    /// Wrap an asynchronous hook.
    pub fn from_async<F, Fut, E>(f: F) -> Self
    where
        F: Fn(PromptEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |event: PromptEvent| {
            f(event).map(|r| r.map_err(Into::<BoxError>::into)).boxed()
        }))
    }

    pub(crate) async fn emit(&self, event: PromptEvent) -> Result<()> {
        (self.0)(event)
            .await
            .map_err(|e| AskError::callback(CallbackStage::Hook(event), e))
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// Options for one question.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    /// Strip surrounding whitespace from the raw answer.
    pub trim: bool,
    /// Replace the answer after trimming.
    pub format: Option<Format>,
    /// Decide whether the answer ends the loop. Unset accepts everything.
    pub accept: Option<Accept>,
    /// Lifecycle hook.
    pub on: Option<Hook>,
}

impl AskOptions {
    /// Pass-through options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to trim the raw answer.
    #[must_use]
    pub const fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set an infallible formatter.
    #[must_use]
    pub fn format<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Attempt) -> String + Send + Sync + 'static,
    {
        self.format = Some(Format::new(f));
        self
    }

    /// Set a formatter that can fail.
    #[must_use]
    pub fn try_format<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Attempt) -> std::result::Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.format = Some(Format::fallible(f));
        self
    }

    /// Set the acceptance rule.
    #[must_use]
    pub fn accept(mut self, accept: impl Into<Accept>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Accept only the given answers.
    #[must_use]
    pub fn accept_list<I, S>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept(Accept::one_of(answers))
    }

    /// Accept answers for which `f` returns true.
    #[must_use]
    pub fn accept_if<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.accept(Accept::when(f))
    }

    /// Accept answers for which the future returned by `f` resolves to true.
    #[must_use]
    pub fn accept_if_async<F, Fut>(self, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.accept(Accept::when_async(f))
    }

    /// Set a synchronous hook.
    #[must_use]
    pub fn on<F>(mut self, f: F) -> Self
    where
        F: Fn(PromptEvent) + Send + Sync + 'static,
    {
        self.on = Some(Hook::new(f));
        self
    }

    /// Set a prepared hook.
    #[must_use]
    pub fn hook(mut self, hook: Hook) -> Self {
        self.on = Some(hook);
        self
    }

    pub(crate) async fn emit(&self, event: PromptEvent) -> Result<()> {
        match &self.on {
            Some(hook) => hook.emit(event).await,
            None => Ok(()),
        }
    }

    /// Trim, then format.
    pub(crate) fn transform(&self, raw: String, attempt: &Attempt) -> Result<String> {
        let answer = if self.trim {
            raw.trim().to_string()
        } else {
            raw
        };
        match &self.format {
            Some(format) => format.apply(&answer, attempt),
            None => Ok(answer),
        }
    }

    pub(crate) async fn verdict(&self, answer: &str) -> Result<bool> {
        match &self.accept {
            Some(accept) => accept.verdict(answer).await,
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn default_accepts_everything() {
        let options = AskOptions::new();
        assert!(options.verdict("").await.unwrap());
        assert!(options.verdict("anything").await.unwrap());
    }

    #[tokio::test]
    async fn list_membership() {
        let accept = Accept::one_of(["y", "n"]);
        assert!(accept.verdict("y").await.unwrap());
        assert!(!accept.verdict("Y").await.unwrap());
        assert!(!accept.verdict("").await.unwrap());
        assert!(Accept::List(Vec::new()).verdict("x").await.unwrap());
    }

    #[tokio::test]
    async fn fixed_and_predicate_verdicts() {
        assert!(!Accept::from(false).verdict("y").await.unwrap());
        assert!(Accept::when(|a| a.len() > 2).verdict("abc").await.unwrap());
        let slow = Accept::when_async(|a| async move {
            tokio::task::yield_now().await;
            a == "ok"
        });
        assert!(slow.verdict("ok").await.unwrap());
        assert!(!slow.verdict("no").await.unwrap());
    }

    #[tokio::test]
    async fn regex_acceptance() {
        let accept = Accept::matching(regex::Regex::new(r"^\d+$").unwrap());
        assert!(accept.verdict("123").await.unwrap());
        assert!(!accept.verdict("12a").await.unwrap());
    }

    #[tokio::test]
    async fn predicate_failure_is_accept_error() {
        let accept = Accept::try_when(|_| Err::<bool, _>("bad"));
        let err = accept.verdict("x").await.unwrap_err();
        assert_eq!(err.callback_stage(), Some(CallbackStage::Accept));
    }

    #[test]
    fn trim_runs_before_format() {
        let options = AskOptions::new()
            .trim(true)
            .format(|answer, _| format!("{}bar", answer.to_lowercase()));
        let out = options.transform("  Foo  ".to_string(), &Attempt::first()).unwrap();
        assert_eq!(out, "foobar");
    }

    #[test]
    fn format_sees_attempt() {
        let options = AskOptions::new().format(|answer, attempt| {
            format!("{answer}#{}:{}", attempt.iteration, attempt.previous_answer)
        });
        let attempt = Attempt::first().next("prev".to_string());
        assert_eq!(options.transform("a".into(), &attempt).unwrap(), "a#1:prev");
    }

    #[tokio::test]
    async fn hooks_receive_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = AskOptions::new().on(move |event| sink.lock().unwrap().push(event));

        options.emit(PromptEvent::BeforeAsk).await.unwrap();
        options.emit(PromptEvent::Answer).await.unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![PromptEvent::BeforeAsk, PromptEvent::Answer]
        );
    }

    #[tokio::test]
    async fn async_hook_failure_names_event() {
        let options = AskOptions::new().hook(Hook::from_async(|event| async move {
            if event == PromptEvent::Ask {
                Err("no")
            } else {
                Ok(())
            }
        }));
        assert!(options.emit(PromptEvent::BeforeAsk).await.is_ok());
        let err = options.emit(PromptEvent::Ask).await.unwrap_err();
        assert_eq!(err.callback_stage(), Some(CallbackStage::Hook(PromptEvent::Ask)));
    }
}
