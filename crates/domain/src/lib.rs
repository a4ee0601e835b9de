//! Shared building blocks for the auxi crates: the error type, the TOML
//! configuration model, and structured trace events.

pub mod config;
pub mod error;
pub mod trace;

pub use error::{Error, Result};
