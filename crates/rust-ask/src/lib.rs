//! rust-ask: validated line prompts for command-line programs
//!
//! This crate asks a question, reads one line of response, optionally trims,
//! formats, and validates it, and asks again until the answer is accepted.
//!
//! # Features
//!
//! - **Retry loop** with per-attempt context: question generators see the
//!   iteration number and the previous answer
//! - **Options** for trimming, formatting, acceptance (fixed, list,
//!   predicate, regex), and lifecycle hooks, sync or async
//! - **Scoped sessions**: many questions on one channel, closed exactly once
//! - **Blocking API** for programs without an async runtime
//! - **Mock reader** for testing prompt flows
//!
//! # Example
//!
//! ```rust,no_run
//! use rust_ask::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let asker = Asker::new(AskConfig::default());
//!     let answer = asker
//!         .ask_with(
//!             "Continue [y/n]: ",
//!             AskOptions::new()
//!                 .trim(true)
//!                 .format(|a, _| a.to_lowercase())
//!                 .accept_list(["y", "n"]),
//!         )
//!         .await?;
//!     println!("You said {answer}");
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod config;
pub mod engine;
pub mod error;
pub mod mock;
pub mod options;
pub mod prelude;
pub mod question;
pub mod reader;
pub mod scope;
pub mod session;
pub mod types;
pub mod util;

pub use blocking::{BlockingAsker, BlockingScope};
pub use config::{AskConfig, LogFormat, LoggingConfig, ReaderConfig};
pub use error::{AskError, BoxError, CallbackStage, Result};
pub use options::{Accept, AskOptions, Format, Hook, Predicate};
pub use question::{Prompt, Question};
pub use reader::{LineReader, StdinReader, StdioReader};
pub use scope::{Asker, Properties, Scope};
pub use session::Session;
pub use types::{Attempt, PromptEvent, SessionId, SessionState};
pub use util::TimeoutExt;
