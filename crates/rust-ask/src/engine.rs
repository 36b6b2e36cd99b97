//! The prompt loop.
//!
//! One call to [`run`] asks until an answer is accepted:
//!
//! 1. Resolve the question for the current [`Attempt`].
//! 2. Emit [`PromptEvent::BeforeAsk`].
//! 3. Issue the read, which writes the question, and emit
//!    [`PromptEvent::Ask`] while it is in flight.
//! 4. Emit [`PromptEvent::Answer`] once the line is in.
//! 5. Trim (if enabled), then format (if set).
//! 6. Compute the verdict. Accepted answers are returned; rejected ones
//!    become `previous_answer` of the next attempt.
//!
//! There is no retry limit. Any error (channel, hook, `format`, `accept`)
//! ends the loop immediately.

use crate::error::Result;
use crate::question::Question;
use crate::scope::Properties;
use crate::types::{Attempt, PromptEvent};

/// Ask `question` on the session in `props` until an answer is accepted.
///
/// # Errors
///
/// Returns the first channel or callback error encountered.
pub async fn run<X>(props: &Properties<X>, question: &Question<X>) -> Result<String> {
    let session = props.session();
    let mut attempt = Attempt::first();

    loop {
        let prompt = question.resolve(&attempt, props);
        let options = &prompt.options;

        options.emit(PromptEvent::BeforeAsk).await?;
        // The read is polled first, so the prompt is out before `Ask` runs.
        let (raw, ()) = futures::try_join!(
            session.read_line(&prompt.question),
            options.emit(PromptEvent::Ask)
        )?;
        options.emit(PromptEvent::Answer).await?;

        let answer = options.transform(raw, &attempt)?;
        let accepted = options.verdict(&answer).await?;

        tracing::trace!(
            session = %session.id(),
            iteration = attempt.iteration,
            accepted,
            "Answer checked"
        );

        if accepted {
            return Ok(answer);
        }
        attempt = attempt.next(answer);
    }
}
