//! dumpscrub CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `dumpscrub` binary.

pub mod cli;
pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod input;
pub mod output;

// Re-export commonly used types
pub use cli::Args;
