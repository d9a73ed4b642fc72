use std::any::{type_name, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::Value;

use crate::event::error::{EventSystemError, WireError};
use crate::event::scanner::ParameterScanner;
use crate::event::types::{ChangeEvent, ClickEvent, MouseEvent, ResizeEvent};
use crate::event::Event;
use crate::kernel::error::Result;
use crate::ui::ComponentRef;

/// Builds an event with no target and no payload.
pub type DefaultConstructor = fn() -> Box<dyn Event>;

/// Builds an event from a target and a payload.
pub type PartsConstructor = fn(Option<ComponentRef>, Option<Value>) -> Box<dyn Event>;

/// Populates a freshly constructed event from a request payload.
pub type WireFn = fn(&mut dyn Event, &ParameterScanner<'_>) -> std::result::Result<(), WireError>;

/// An event type that can be registered by name.
pub trait EventClass: Event + Sized {
    /// Canonical type name, lower camel case without an `on` prefix.
    const EVENT_TYPE: &'static str;

    /// Type name of the coarser event this one falls back to.
    const PARENT: Option<&'static str> = None;

    /// Populate declared fields from a request payload.
    fn wire(&mut self, scanner: &ParameterScanner<'_>) -> std::result::Result<(), WireError>;
}

/// Event types constructible from a target and a payload.
pub trait FromParts: EventClass {
    fn from_parts(target: Option<ComponentRef>, data: Option<Value>) -> Self;
}

/// Everything the factory needs to build one registered event type.
#[derive(Clone)]
pub struct EventDescriptor {
    type_name: &'static str,
    type_id: TypeId,
    rust_name: &'static str,
    parent: Option<&'static str>,
    default_ctor: Option<DefaultConstructor>,
    parts_ctor: Option<PartsConstructor>,
    wire: WireFn,
}

impl fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDescriptor")
         .field("type_name", &self.type_name)
         .field("rust_name", &self.rust_name)
         .field("parent", &self.parent)
         .field("default_ctor", &self.default_ctor.is_some())
         .field("parts_ctor", &self.parts_ctor.is_some())
         .finish()
    }
}

fn construct_default<E: EventClass + Default>() -> Box<dyn Event> {
    Box::new(E::default())
}

fn construct_from_parts<E: FromParts>(target: Option<ComponentRef>, data: Option<Value>) -> Box<dyn Event> {
    Box::new(E::from_parts(target, data))
}

fn wire_as<E: EventClass>(event: &mut dyn Event, scanner: &ParameterScanner<'_>) -> std::result::Result<(), WireError> {
    match event.as_any_mut().downcast_mut::<E>() {
        Some(event) => event.wire(scanner),
        None => Err(WireError::TypeMismatch { expected: E::EVENT_TYPE.to_string() }),
    }
}

impl EventDescriptor {
    fn bare<E: EventClass>() -> Self {
        Self {
            type_name: E::EVENT_TYPE,
            type_id: TypeId::of::<E>(),
            rust_name: type_name::<E>(),
            parent: E::PARENT,
            default_ctor: None,
            parts_ctor: None,
            wire: wire_as::<E>,
        }
    }

    /// Descriptor with only a default constructor.
    pub fn of<E: EventClass + Default>() -> Self {
        Self {
            default_ctor: Some(construct_default::<E>),
            ..Self::bare::<E>()
        }
    }

    /// Descriptor with both a default and a (target, data) constructor.
    pub fn with_parts<E: FromParts + Default>() -> Self {
        Self {
            parts_ctor: Some(construct_from_parts::<E>),
            ..Self::of::<E>()
        }
    }

    /// Descriptor with only a (target, data) constructor.
    pub fn parts_only<E: FromParts>() -> Self {
        Self {
            parts_ctor: Some(construct_from_parts::<E>),
            ..Self::bare::<E>()
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type path, for diagnostics.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    pub fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    pub fn has_default_constructor(&self) -> bool {
        self.default_ctor.is_some()
    }

    pub fn has_parts_constructor(&self) -> bool {
        self.parts_ctor.is_some()
    }

    pub fn construct_default(&self) -> Option<Box<dyn Event>> {
        self.default_ctor.map(|ctor| ctor())
    }

    pub fn construct_from_parts(&self, target: Option<ComponentRef>, data: Option<Value>) -> Option<Box<dyn Event>> {
        self.parts_ctor.map(|ctor| ctor(target, data))
    }

    /// Default-construct and wire from the payload.
    pub fn construct_wired(&self, scanner: &ParameterScanner<'_>) -> std::result::Result<Box<dyn Event>, WireError> {
        let mut event = self.construct_default().ok_or_else(|| WireError::NoDefaultConstructor {
            event_type: self.type_name.to_string(),
        })?;
        (self.wire)(event.as_mut(), scanner)?;
        Ok(event)
    }
}

/// Two-way mapping between event type names and registered Rust types.
///
/// Built once during bootstrap and shared read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct EventTypeRegistry {
    by_type: HashMap<&'static str, EventDescriptor>,
    by_rust_type: HashMap<TypeId, &'static str>,
}

impl EventTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the events the framework ships with.
    pub fn with_builtin_events() -> Self {
        let mut registry = Self::new();
        for descriptor in [
            EventDescriptor::with_parts::<ResizeEvent>(),
            EventDescriptor::of::<MouseEvent>(),
            EventDescriptor::of::<ClickEvent>(),
            EventDescriptor::with_parts::<ChangeEvent>(),
        ] {
            if let Err(e) = registry.register(descriptor) {
                log::error!("Built-in event types clash: {}", e);
                debug_assert!(false, "built-in event types clash: {}", e);
            }
        }
        registry
    }

    /// Register a descriptor. Type names and Rust types must both be unique.
    pub fn register(&mut self, descriptor: EventDescriptor) -> Result<()> {
        if self.by_type.contains_key(descriptor.type_name) {
            return Err(EventSystemError::configuration(descriptor.type_name, "event type is already registered").into());
        }
        if let Some(existing) = self.by_rust_type.get(&descriptor.type_id) {
            return Err(EventSystemError::configuration(
                descriptor.type_name,
                format!("{} is already registered as '{}'", descriptor.rust_name, existing),
            ).into());
        }
        log::debug!("Registering event type '{}' -> {}", descriptor.type_name, descriptor.rust_name);
        self.by_rust_type.insert(descriptor.type_id, descriptor.type_name);
        self.by_type.insert(descriptor.type_name, descriptor);
        Ok(())
    }

    /// Convenience wrapper for [`EventDescriptor::of`].
    pub fn register_class<E: EventClass + Default>(&mut self) -> Result<()> {
        self.register(EventDescriptor::of::<E>())
    }

    pub fn resolve(&self, event_type: &str) -> Option<&EventDescriptor> {
        self.by_type.get(event_type)
    }

    /// Canonical type name registered for a Rust type.
    pub fn type_name_of(&self, type_id: TypeId) -> Option<&'static str> {
        self.by_rust_type.get(&type_id).copied()
    }

    pub fn type_name<E: Event>(&self) -> Option<&'static str> {
        self.type_name_of(TypeId::of::<E>())
    }

    /// The descriptor for `event_type` followed by its registered ancestors,
    /// most specific first. Stops at the first unregistered or repeated parent.
    pub fn lineage(&self, event_type: &str) -> Vec<&EventDescriptor> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = self.resolve(event_type);
        while let Some(descriptor) = next {
            if !seen.insert(descriptor.type_name) {
                log::warn!("Event type '{}' has a cyclic parent chain", event_type);
                break;
            }
            chain.push(descriptor);
            next = descriptor.parent.and_then(|parent| self.resolve(parent));
        }
        chain
    }

    /// Registered descriptors, sorted by type name.
    pub fn descriptors(&self) -> Vec<&EventDescriptor> {
        let mut all: Vec<_> = self.by_type.values().collect();
        all.sort_by_key(|d| d.type_name);
        all
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}
