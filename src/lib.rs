//! A scramble/reveal text animation.
//!
//! The middle row of a three row grid of random glyphs reveals a word one character at a time,
//! holds it, scrambles it again and moves on to the next word.

pub mod config;
pub mod scramble;
pub mod session;
pub mod terminal;

pub use config::{Config, ConfigChange, ConfigError, ConfigFile, ConfigUpdate};
pub use session::ScrambleSession;
