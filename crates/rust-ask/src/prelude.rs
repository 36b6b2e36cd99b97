//! Convenient re-exports for common rust-ask usage.
//!
//! ```rust
//! use rust_ask::prelude::*;
//! ```

pub use crate::blocking::{BlockingAsker, BlockingScope};
pub use crate::config::AskConfig;
pub use crate::error::{AskError, Result};
pub use crate::options::{Accept, AskOptions, Hook};
pub use crate::question::{Prompt, Question};
pub use crate::scope::{Asker, Properties, Scope};
pub use crate::types::{Attempt, PromptEvent};
pub use crate::util::TimeoutExt;
