//! Generation backend drivers for the magpie content bot.
//!
//! Currently a single driver: [`GeminiDriver`], speaking the Gemini
//! `generateContent` REST API. The driver performs exactly one request per
//! call; all retry, rotation, and cooldown policy belongs to
//! `magpie_rotation`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::GeminiDriver;
