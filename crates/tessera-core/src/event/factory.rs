use std::any::TypeId;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::error::EventSystemError;
use crate::event::registry::EventTypeRegistry;
use crate::event::scanner::ParameterScanner;
use crate::event::types::GenericEvent;
use crate::event::{Event, strip_on_prefix};
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::ui::{ComponentRef, ComponentTree};

/// Inbound message from the client, already parsed off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Discriminator; only `"event"` requests carry events
    #[serde(rename = "type")]
    pub kind: String,
    /// Payload; event requests need a map with a `type` key
    #[serde(default)]
    pub data: Value,
}

impl Request {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self { kind: kind.into(), data }
    }

    /// An `"event"` request with the given payload.
    pub fn event(data: Value) -> Self {
        Self::new(constants::EVENT_REQUEST_TYPE, data)
    }

    pub fn is_event(&self) -> bool {
        self.kind == constants::EVENT_REQUEST_TYPE
    }

    /// Payload map of an event request, or `InvalidRequest`.
    pub fn event_payload(&self) -> Result<&Map<String, Value>> {
        if !self.is_event() {
            return Err(EventSystemError::invalid_request(format!(
                "request of type '{}' does not carry an event", self.kind
            )).into());
        }
        self.data.as_object().ok_or_else(|| {
            EventSystemError::invalid_request("event payload is not a map").into()
        })
    }
}

/// Builds events from type names or inbound requests.
#[derive(Debug, Clone)]
pub struct EventFactory {
    registry: Arc<EventTypeRegistry>,
    generic_fallback: bool,
}

impl EventFactory {
    pub fn new(registry: Arc<EventTypeRegistry>) -> Self {
        Self { registry, generic_fallback: true }
    }

    /// Whether request decoding ends its fallback chain with [`GenericEvent`].
    pub fn with_generic_fallback(mut self, enabled: bool) -> Self {
        self.generic_fallback = enabled;
        self
    }

    pub fn registry(&self) -> &EventTypeRegistry {
        &self.registry
    }

    /// Canonical type name of a registered event type.
    pub fn type_name_of<E: Event>(&self) -> Option<&'static str> {
        self.registry.type_name_of(TypeId::of::<E>())
    }

    /// Build an event for `event_type` (an `on` prefix is stripped).
    ///
    /// Unregistered names give a [`GenericEvent`]. Registered types use their
    /// default constructor when neither `target` nor `data` is given and their
    /// (target, data) constructor otherwise; a missing constructor is a
    /// configuration error. Always returns an event or an error.
    pub fn create_from_name_and_data(
        &self,
        event_type: &str,
        target: Option<ComponentRef>,
        data: Option<Value>,
    ) -> Result<Box<dyn Event>> {
        let event_type = strip_on_prefix(event_type);
        let Some(descriptor) = self.registry.resolve(&event_type) else {
            return Ok(Box::new(GenericEvent::new(event_type, target, data)));
        };

        if target.is_none() && data.is_none() {
            return descriptor.construct_default().ok_or_else(|| {
                EventSystemError::configuration(&event_type, "no default constructor").into()
            });
        }
        descriptor.construct_from_parts(target, data).ok_or_else(|| {
            EventSystemError::configuration(&event_type, "no (target, data) constructor").into()
        })
    }

    /// Decode the event carried by `request`.
    ///
    /// Tries the registered type for the payload's `type`, then each registered
    /// ancestor, then (unless disabled) [`GenericEvent`]. `Ok(None)` when every
    /// attempt fails to wire; `InvalidRequest` when the request is not an event.
    pub fn create_from_request(&self, request: &Request) -> Result<Option<Box<dyn Event>>> {
        let payload = request.event_payload()?;
        let event_type = match payload.get(constants::TYPE_FIELD) {
            Some(Value::String(event_type)) => strip_on_prefix(event_type),
            _ => return Err(EventSystemError::invalid_request("event payload has no string 'type'").into()),
        };
        let scanner = ParameterScanner::new(payload);

        for descriptor in self.registry.lineage(&event_type) {
            match descriptor.construct_wired(&scanner) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => log::debug!(
                    "Could not build '{}' as '{}': {}", event_type, descriptor.type_name(), e
                ),
            }
        }

        if self.generic_fallback {
            match GenericEvent::from_payload(&scanner) {
                Ok(event) => return Ok(Some(Box::new(event))),
                Err(e) => log::debug!("Could not build '{}' as a generic event: {}", event_type, e),
            }
        }

        log::warn!("No event type could be built for request of type '{}'", event_type);
        Ok(None)
    }

    /// Like [`create_from_request`](Self::create_from_request), binding the
    /// event to the component named by the payload's `target` id when `tree`
    /// knows it.
    pub fn create_from_request_in(
        &self,
        request: &Request,
        tree: &dyn ComponentTree,
    ) -> Result<Option<Box<dyn Event>>> {
        let Some(mut event) = self.create_from_request(request)? else {
            return Ok(None);
        };
        let target_id = request.data.get(constants::TARGET_FIELD).and_then(Value::as_str);
        if let Some(target_id) = target_id {
            match tree.find(target_id) {
                Some(component) => event.base_mut().bind(component),
                None => log::debug!("Event target '{}' is not in the component tree", target_id),
            }
        }
        Ok(Some(event))
    }
}
