//! Content assembly and run orchestration for the magpie bot.
//!
//! One bot run picks a content mode, builds a persona-framed prompt, asks
//! the rotation layer for text, publishes the result, and records what
//! happened so the next run avoids repeating the same mode.
//!
//! - [`Orchestrator`]: the full cycle behind [`magpie_core::BotRunner`]
//! - [`ContentAssembler`]: prompt construction plus generation
//! - [`FileStateStore`]: best-effort JSON persistence of run history

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod orchestrator;
mod persona;
mod prompt;
mod state;

pub use assembly::ContentAssembler;
pub use orchestrator::Orchestrator;
pub use persona::persona;
pub use prompt::{build_prompt, LengthHint};
pub use state::FileStateStore;
