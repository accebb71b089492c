//! Social platform I/O for the magpie content bot.
//!
//! - [`PostPublisher`]: X v2 create-tweet client with bounded retry for
//!   transient rate limits and terminal handling of 403-class failures.
//! - [`NewsFetcher`]: dev.to article source picking one random candidate
//!   from the current top-rising list.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod news;
mod publisher;

pub use news::NewsFetcher;
pub use publisher::PostPublisher;
