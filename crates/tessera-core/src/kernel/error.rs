//! # Tessera Core Kernel Errors
//!
//! Defines the crate-wide [`Error`] type.
//!
//! Each subsystem owns a typed error enum ([`EventSystemError`],
//! [`ConfigError`]); this module aggregates them so that public APIs can
//! return a single `Result` and callers can still match on the subsystem
//! variant.
use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::event::error::EventSystemError;
use thiserror::Error as ThisError; // Import ThisError

/// Error type shared by the Tessera core
#[derive(Debug, ThisError)]
pub enum Error {
    /// Event construction, handler or queue failure
    #[error("Event system error: {0}")]
    EventSystem(#[from] EventSystemError),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
