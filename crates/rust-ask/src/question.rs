//! Question definitions: literal prompts and per-attempt generators.
//!
//! A [`Question`] is either a literal [`Prompt`] asked identically on every
//! attempt, or a generator called once per attempt with the [`Attempt`]
//! context and the scope's [`Properties`], so the text and the options can
//! change between retries.

use std::borrow::Cow;
use std::sync::Arc;

use crate::options::AskOptions;
use crate::scope::Properties;
use crate::types::Attempt;

/// A question together with its options.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    /// Text written before reading the answer.
    pub question: String,
    /// How the answer is transformed and validated.
    pub options: AskOptions,
}

impl Prompt {
    /// A question with pass-through options.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: AskOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: AskOptions) -> Self {
        self.options = options;
        self
    }
}

impl From<&str> for Prompt {
    fn from(question: &str) -> Self {
        Self::new(question)
    }
}

impl From<String> for Prompt {
    fn from(question: String) -> Self {
        Self::new(question)
    }
}

impl<S: Into<String>> From<(S, AskOptions)> for Prompt {
    fn from((question, options): (S, AskOptions)) -> Self {
        Self::new(question).with_options(options)
    }
}

type GeneratorFn<X> = dyn Fn(&Attempt, &Properties<X>) -> Prompt + Send + Sync;

/// What to ask on each attempt.
pub enum Question<X = ()> {
    /// The same prompt on every attempt.
    Literal(Prompt),
    /// A prompt built per attempt.
    Generator(Arc<GeneratorFn<X>>),
}

impl<X> Question<X> {
    /// A literal question with options.
    pub fn literal(question: impl Into<String>, options: AskOptions) -> Self {
        Self::Literal(Prompt::new(question).with_options(options))
    }

    /// A question built per attempt by `f`.
    ///
    /// ```rust
    /// use rust_ask::{AskOptions, Prompt, Question};
    ///
    /// let question: Question = Question::generate(|attempt, _props| {
    ///     Prompt::new(format!("Question {} [{}]: ", attempt.iteration, attempt.previous_answer))
    ///         .with_options(AskOptions::new().accept_if(|a| a.contains('!')))
    /// });
    /// ```
    pub fn generate<F, P>(f: F) -> Self
    where
        F: Fn(&Attempt, &Properties<X>) -> P + Send + Sync + 'static,
        P: Into<Prompt>,
    {
        Self::Generator(Arc::new(
            move |attempt: &Attempt, props: &Properties<X>| -> Prompt { f(attempt, props).into() },
        ))
    }

    /// The prompt for this attempt.
    pub fn resolve(&self, attempt: &Attempt, props: &Properties<X>) -> Cow<'_, Prompt> {
        match self {
            Self::Literal(prompt) => Cow::Borrowed(prompt),
            Self::Generator(generate) => Cow::Owned(generate(attempt, props)),
        }
    }
}

impl<X> Clone for Question<X> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(prompt) => Self::Literal(prompt.clone()),
            Self::Generator(generate) => Self::Generator(Arc::clone(generate)),
        }
    }
}

impl<X> std::fmt::Debug for Question<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(prompt) => f.debug_tuple("Literal").field(prompt).finish(),
            Self::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl<X> From<Prompt> for Question<X> {
    fn from(prompt: Prompt) -> Self {
        Self::Literal(prompt)
    }
}

impl<X> From<&str> for Question<X> {
    fn from(question: &str) -> Self {
        Self::Literal(Prompt::new(question))
    }
}

impl<X> From<String> for Question<X> {
    fn from(question: String) -> Self {
        Self::Literal(Prompt::new(question))
    }
}
