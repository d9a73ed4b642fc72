//! # Tessera Core
//!
//! Server-side event core for Tessera components: building events from
//! client requests, resolving the handler that receives them and deciding
//! whether they are delivered now or queued on their page.
pub mod config;
pub mod event;
pub mod kernel;
pub mod ui;

// Re-export key public types for the binary and embedders
pub use config::FrameworkConfig;
pub use event::{Event, EventDispatcher, EventFactory, EventTypeRegistry, Request};
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use ui::{Component, ExecutionContext, Page, Widget};

#[cfg(test)]
mod tests;
