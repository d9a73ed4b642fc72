//! # Tessera Core UI Collaborators
//!
//! The minimal view of pages and components the event core needs.
//!
//! - [`Page`](page::Page): owns an [`EventQueue`](crate::event::EventQueue)
//!   and an attribute map.
//! - [`ExecutionContext`](context::ExecutionContext): the page currently being
//!   processed by one flow, passed explicitly through dispatch calls.
//! - [`Component`](component::Component): a dispatch target with an optional
//!   owning page and a local receive hook. [`Widget`](component::Widget) is the
//!   stock implementation backed by a [`HandlerTable`](crate::event::HandlerTable).
//! - [`ClientChannel`](client::ClientChannel): the browser side, reduced to
//!   "call me back once you have caught up".
pub mod client;
pub mod component;
pub mod context;
pub mod page;

pub use client::{AckContinuation, AckFuture, ClientChannel, LoopbackChannel};
pub use component::{Component, ComponentRef, ComponentTree, Widget, WidgetTree};
pub use context::ExecutionContext;
pub use page::{Page, PageRef};

// Test module declaration
#[cfg(test)]
mod tests;
