//! Single-shot confirmation example.
//!
//! Asks one yes/no question on stdin/stdout, re-prompting until the answer
//! is `y` or `n`. Case and surrounding whitespace are ignored.
//!
//! Run with: `cargo run --example confirm`

use rust_ask::{AskConfig, AskOptions, BlockingAsker};

fn main() -> rust_ask::Result<()> {
    let asker = BlockingAsker::new(AskConfig::from_env()?)?;

    let options = AskOptions::new()
        .trim(true)
        .format(|answer, _| answer.to_lowercase())
        .accept_list(["y", "n"]);

    let answer = asker.ask_with("Continue [y/n]: ", options)?;
    if answer == "y" {
        println!("Continuing.");
    } else {
        println!("Stopped.");
    }
    Ok(())
}
