//! Error types for the magpie content bot.
//!
//! This crate provides the foundation error types used throughout the
//! magpie workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use magpie_error::{MagpieResult, NewsError};
//!
//! fn fetch_articles() -> MagpieResult<String> {
//!     Err(NewsError::new("Connection refused"))?
//! }
//!
//! match fetch_articles() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod news;
mod publish;
mod rotation;
mod server;
mod state;

pub use config::ConfigError;
pub use error::{MagpieError, MagpieErrorKind, MagpieResult};
pub use generation::{FailureClass, GenerationError, GenerationErrorKind};
pub use news::NewsError;
pub use publish::{PublishError, PublishErrorKind};
pub use rotation::{RotationError, RotationErrorKind};
pub use server::ServerError;
pub use state::StateError;
