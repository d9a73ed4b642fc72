//! # Tessera Core Kernel
//!
//! Ties the subsystems together.
//!
//! - [`Application`](bootstrap::Application) builds the event type registry,
//!   the factory and the dispatcher from a [`FrameworkConfig`](crate::config::FrameworkConfig)
//!   and runs inbound requests through them.
//! - [`constants`] holds protocol names and defaults.
//! - [`error`] defines the crate-wide [`Error`](error::Error) and `Result`.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Application;
pub use error::{Error, Result};
// Test module declaration
#[cfg(test)]
mod tests;
