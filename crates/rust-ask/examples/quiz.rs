//! Scoped batch example.
//!
//! Asks three questions on one session. The last one is built per attempt
//! and shows the previous rejected answer in its prompt, unless the
//! properties bag has been muted.
//!
//! Run with: `RUST_LOG=rust_ask=debug cargo run --example quiz --features logging`

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_ask::prelude::*;
use rust_ask::Session;

/// Controls shared by every question in the quiz.
#[derive(Debug, Default)]
struct Controls {
    muted: AtomicBool,
}

impl Controls {
    fn mute(&self) {
        self.muted.store(true, Ordering::Relaxed);
    }

    fn unmute(&self) {
        self.muted.store(false, Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }
}

fn riddle() -> Question<Controls> {
    Question::generate(|attempt: &Attempt, props: &Properties<Controls>| {
        let shown = if props.is_muted() || attempt.is_first() {
            String::new()
        } else {
            attempt.previous_answer.clone()
        };
        Prompt::new(format!("Question 3 [{shown}]: ")).with_options(
            AskOptions::new()
                .trim(true)
                .format(|answer, _| answer.to_lowercase())
                .accept_if(|answer| answer == "echo"),
        )
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AskConfig::from_env()?;
    config.logging.init()?;

    let asker = Asker::new(config).properties(|_: &Arc<Session>| Controls::default());

    let (name, colour, riddle_answer) = asker
        .scoped(async |ask| {
            let name = ask
                .ask_with("Question 1, your name: ", AskOptions::new().trim(true))
                .await?;

            let colour = ask
                .ask_with(
                    "Question 2, red, green or blue? ",
                    AskOptions::new()
                        .trim(true)
                        .accept_list(["red", "green", "blue"])
                        .on(|event| tracing::debug!(%event, "colour prompt")),
                )
                .await?;

            println!("What speaks back but has no voice?");
            let answer = ask.ask(riddle()).await?;

            ask.properties().mute();
            println!("Again, without hints this time.");
            ask.ask(riddle()).await?;
            ask.properties().unmute();

            Ok::<_, AskError>((name, colour, answer))
        })
        .await?;

    println!("Thanks {name}: {colour}, {riddle_answer}.");
    Ok(())
}
