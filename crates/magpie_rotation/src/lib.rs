//! Multi-key, multi-model rotation and retry for generation requests.
//!
//! This crate is the availability layer in front of the generation backend.
//! It survives per-key and per-model rate limiting by tracking timed
//! cooldowns, picking the best available (key, model) pair on every attempt,
//! and classifying failures into ledger updates and rotation moves — with a
//! bounded attempt budget guaranteeing either forward progress or a clean
//! terminal failure.
//!
//! - [`CooldownLedger`]: per-resource unavailability timestamps
//! - [`select_key`] / [`select_model`]: next usable resource, or nothing
//! - [`RotationController`]: the attempt loop orchestrating it all
//! - [`Clock`]: injected time source so tests run on a virtual clock

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod controller;
mod generator;
mod ledger;
mod selector;

pub use clock::{Clock, TokioClock, VirtualClock};
pub use controller::{Generation, RotationController};
pub use generator::TextGenerator;
pub use ledger::CooldownLedger;
pub use selector::{select_key, select_model};
