//! Core data types and collaborator interfaces for the magpie content bot.
//!
//! This crate provides the foundation types shared across the workspace:
//! content modes, persisted bot state, run reports, the dashboard log sink,
//! environment configuration, and the trait seams behind which the news
//! source, publisher, state store, and bot entrypoint live.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod article;
mod config;
mod interface;
mod key;
mod log;
mod mode;
mod report;
mod state;

pub use article::Article;
pub use config::MagpieConfig;
pub use interface::{BotRunner, NewsSource, Publisher, StateStore};
pub use key::ApiKey;
pub use log::{LogEvent, LogLevel, LogSink};
pub use mode::{available_modes, Mode};
pub use report::{BotSnapshot, RunReport};
pub use state::BotState;
