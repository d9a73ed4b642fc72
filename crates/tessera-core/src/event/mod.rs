//! # Tessera Core Event System
//!
//! Events are owned values (`Box<dyn Event>`) describing one occurrence
//! directed at a component. Every event carries an [`EventBase`] with its
//! type string, origin target, current target and optional JSON payload;
//! concrete event types add typed fields on top of it.
//!
//! - [`registry`] maps type names to constructible event descriptors.
//! - [`factory`] builds events from a type name or an inbound request.
//! - [`resolver`] holds explicitly registered handlers and picks the best one.
//! - [`dispatcher`] decides between immediate and deferred delivery.
//! - [`queue`] is the per-page FIFO used for deferred delivery.
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod queue;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod types;

use std::any::{Any, TypeId};
use std::fmt;

use serde_json::Value;

use crate::kernel::constants;
use crate::ui::{ComponentRef, PageRef};

/// State shared by every event type.
#[derive(Clone, Default)]
pub struct EventBase {
    event_type: String,
    target: Option<ComponentRef>,
    current_target: Option<ComponentRef>,
    data: Option<Value>,
}

// Components are printed by id only
impl fmt::Debug for EventBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBase")
         .field("event_type", &self.event_type)
         .field("target", &self.target.as_ref().map(|c| c.id().to_string()))
         .field("current_target", &self.current_target.as_ref().map(|c| c.id().to_string()))
         .field("data", &self.data)
         .finish()
    }
}

impl EventBase {
    /// Create a base whose current target starts out equal to `target`.
    pub fn new(event_type: impl Into<String>, target: Option<ComponentRef>, data: Option<Value>) -> Self {
        Self {
            event_type: event_type.into(),
            current_target: target.clone(),
            target,
            data,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> Option<&ComponentRef> {
        self.target.as_ref()
    }

    pub fn current_target(&self) -> Option<&ComponentRef> {
        self.current_target.as_ref()
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Bind the event to a component. Both the target and the current target change.
    pub fn bind(&mut self, target: ComponentRef) {
        self.current_target = Some(target.clone());
        self.target = Some(target);
    }

    pub fn set_current_target(&mut self, current_target: Option<ComponentRef>) {
        self.current_target = current_target;
    }

    /// Populate the type and payload from a request. Part of construction only.
    pub(crate) fn wire(&mut self, scanner: &ParameterScanner<'_>) -> Result<(), WireError> {
        self.event_type = scanner.required::<String>(constants::TYPE_FIELD)?;
        self.event_type = strip_on_prefix(&self.event_type);
        self.data = Some(Value::Object(scanner.payload().clone()));
        Ok(())
    }
}

/// Core event trait
pub trait Event: Any + fmt::Debug + Send + Sync {
    /// Shared event state
    fn base(&self) -> &EventBase;

    /// Mutable shared event state
    fn base_mut(&mut self) -> &mut EventBase;

    /// Clone this event
    fn clone_event(&self) -> Box<dyn Event>;

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Cast to mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// View this event as `type_id`: its own type or one of the event types
    /// it extends. Handlers declared for an ancestor type receive the view.
    fn view_as(&self, type_id: TypeId) -> Option<&dyn Any> {
        let any = self.as_any();
        (any.type_id() == type_id).then_some(any)
    }

    /// The wrapped event, for events that forward an earlier one.
    fn original_event(&self) -> Option<&dyn Event> {
        None
    }

    fn event_type(&self) -> &str {
        self.base().event_type()
    }

    fn target(&self) -> Option<&ComponentRef> {
        self.base().target()
    }

    fn current_target(&self) -> Option<&ComponentRef> {
        self.base().current_target()
    }

    fn data(&self) -> Option<&Value> {
        self.base().data()
    }

    /// Owning page, derived from the target.
    fn page(&self) -> Option<PageRef> {
        self.target().and_then(|target| target.page())
    }
}

impl Clone for Box<dyn Event> {
    fn clone(&self) -> Self {
        self.clone_event()
    }
}

/// Normalize an `on`-prefixed alias: `onLoad` becomes `load`.
///
/// The prefix is only stripped when `on` is followed by an ASCII uppercase
/// letter, so `online` and a bare `on` pass through unchanged.
pub fn strip_on_prefix(event_type: &str) -> String {
    let Some(rest) = event_type.strip_prefix(constants::ON_PREFIX) else {
        return event_type.to_string();
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut normalized = String::with_capacity(rest.len());
            normalized.push(first.to_ascii_lowercase());
            normalized.push_str(chars.as_str());
            normalized
        }
        _ => event_type.to_string(),
    }
}

/// Re-export important types
pub use dispatcher::{Delivery, EventDispatcher, EventListener, SendToCurrentTarget, get_original_event, route};
pub use error::{BoxError, EventSystemError, WireError};
pub use factory::{EventFactory, Request};
pub use queue::EventQueue;
pub use registry::{EventClass, EventDescriptor, EventTypeRegistry, FromParts};
pub use resolver::{HandlerId, HandlerResult, HandlerTable};
pub use scanner::ParameterScanner;
pub use types::{ChangeEvent, ClickEvent, ForwardedEvent, GenericEvent, MouseEvent, ResizeEvent};

// Test module declaration
#[cfg(test)]
mod tests;
