use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::event::error::{BoxError, EventSystemError};
use crate::event::{Event, strip_on_prefix};
use crate::kernel::error::Result;

/// Identifier handed out on handler registration
pub type HandlerId = u64;

/// What a handler reports back. Errors are wrapped by [`HandlerTable::invoke`].
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Handler taking a concrete event type.
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    async fn handle(&self, event: &E) -> HandlerResult;
}

/// Handler taking any event.
#[async_trait]
pub trait AnyEventHandler: Send + Sync {
    async fn handle(&self, event: &dyn Event) -> HandlerResult;
}

/// Handler taking no argument.
#[async_trait]
pub trait BareHandler: Send + Sync {
    async fn handle(&self) -> HandlerResult;
}

/// Parameter count of a resolved handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Receives the event
    One,
    /// Receives nothing
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accepts {
    /// Only events of this concrete type
    Type(TypeId),
    /// Every event
    Any,
    /// No parameter
    Nothing,
}

struct HandlerEntry {
    id: HandlerId,
    accepts: Accepts,
    handler: Box<dyn AnyEventHandler>,
}

/// A handler picked for one event.
pub struct ResolvedHandler<'a> {
    name: &'a str,
    entry: &'a HandlerEntry,
}

impl fmt::Debug for ResolvedHandler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedHandler")
         .field("name", &self.name)
         .field("id", &self.entry.id)
         .field("arity", &self.arity())
         .finish()
    }
}

impl ResolvedHandler<'_> {
    pub fn id(&self) -> HandlerId {
        self.entry.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn arity(&self) -> Arity {
        match self.entry.accepts {
            Accepts::Nothing => Arity::Zero,
            Accepts::Type(_) | Accepts::Any => Arity::One,
        }
    }
}

// Adapters erasing the three call shapes to AnyEventHandler

pub(crate) struct Typed<E, H> {
    handler: H,
    _event: PhantomData<fn(&E)>,
}

impl<E, H> Typed<E, H> {
    pub(crate) fn new(handler: H) -> Self {
        Self { handler, _event: PhantomData }
    }
}

#[async_trait]
impl<E: Event, H: EventHandler<E>> AnyEventHandler for Typed<E, H> {
    async fn handle(&self, event: &dyn Event) -> HandlerResult {
        let view = event.view_as(TypeId::of::<E>()).and_then(|view| view.downcast_ref::<E>());
        match view {
            Some(view) => self.handler.handle(view).await,
            None => Err(format!(
                "handler for {} cannot take event '{}'", std::any::type_name::<E>(), event.event_type()
            ).into()),
        }
    }
}

struct Bare<H>(H);

#[async_trait]
impl<H: BareHandler> AnyEventHandler for Bare<H> {
    async fn handle(&self, _event: &dyn Event) -> HandlerResult {
        self.0.handle().await
    }
}

/// Handlers of one receiver, keyed by handler name.
///
/// Resolution is recomputed on every call against the current registrations.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Vec<HandlerEntry>>,
    next_handler_id: HandlerId,
}

// Manual Debug implementation for HandlerTable
impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
         .field("names", &self.handlers.keys().collect::<Vec<_>>())
         .field("handler_count", &self.len())
         .finish()
    }
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: &str, accepts: Accepts, handler: Box<dyn AnyEventHandler>) -> HandlerId {
        self.next_handler_id += 1;
        let id = self.next_handler_id;
        self.handlers
            .entry(strip_on_prefix(name))
            .or_default()
            .push(HandlerEntry { id, accepts, handler });
        id
    }

    /// Register a handler for one concrete event type.
    pub fn register_typed<E, H>(&mut self, name: &str, handler: H) -> HandlerId
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        self.insert(name, Accepts::Type(TypeId::of::<E>()), Box::new(Typed::<E, H>::new(handler)))
    }

    /// Register a handler accepting every event.
    pub fn register_untyped<H: AnyEventHandler + 'static>(&mut self, name: &str, handler: H) -> HandlerId {
        self.insert(name, Accepts::Any, Box::new(handler))
    }

    /// Register a handler that does not look at the event.
    pub fn register_bare<H: BareHandler + 'static>(&mut self, name: &str, handler: H) -> HandlerId {
        self.insert(name, Accepts::Nothing, Box::new(Bare(handler)))
    }

    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let mut found = false;
        self.handlers.values_mut().for_each(|entries| {
            let len_before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() < len_before { found = true; }
        });
        self.handlers.retain(|_, entries| !entries.is_empty());
        found
    }

    /// Find the best handler for `event`.
    ///
    /// `name` defaults to the event's type. A one-argument handler accepting
    /// the event's runtime type, or a type it extends (see [`Event::view_as`]),
    /// wins over a zero-argument one; among equals the earliest registration
    /// wins. `None` means no handler, which is not an error.
    pub fn resolve(&self, name: Option<&str>, event: &dyn Event) -> Option<ResolvedHandler<'_>> {
        let key = strip_on_prefix(name.unwrap_or(event.event_type()));
        let (name, entries) = self.handlers.get_key_value(key.as_str())?;
        let one_arg = entries.iter().find(|entry| match entry.accepts {
            Accepts::Type(type_id) => event.view_as(type_id).is_some(),
            Accepts::Any => true,
            Accepts::Nothing => false,
        });
        one_arg
            .or_else(|| entries.iter().find(|entry| entry.accepts == Accepts::Nothing))
            .map(|entry| ResolvedHandler { name: name.as_str(), entry })
    }

    /// Resolve and run a handler. `Ok(false)` when there is none; handler
    /// failures come back as `HandlerInvocationFailure`.
    pub async fn invoke(&self, name: Option<&str>, event: &dyn Event) -> Result<bool> {
        let Some(resolved) = self.resolve(name, event) else {
            log::debug!("No handler '{}' for event '{}'", name.unwrap_or(event.event_type()), event.event_type());
            return Ok(false);
        };
        resolved.entry.handler.handle(event).await.map_err(|source| {
            EventSystemError::HandlerInvocationFailure {
                handler: resolved.name.to_string(),
                event_type: event.event_type().to_string(),
                source,
            }
        })?;
        Ok(true)
    }

    /// Handler names with at least one registration.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

//--------------------------------------------------
// Helper Functions
//--------------------------------------------------

/// Wraps a synchronous closure as an [`EventHandler`].
pub struct SyncTypedHandler<E, F> {
    f: F,
    _event: PhantomData<fn(&E)>,
}

#[async_trait]
impl<E, F> EventHandler<E> for SyncTypedHandler<E, F>
where E: Event, F: Fn(&E) -> HandlerResult + Send + Sync {
    async fn handle(&self, event: &E) -> HandlerResult { (self.f)(event) }
}

/// Wraps a synchronous closure as an [`AnyEventHandler`].
pub struct SyncHandler<F>(F);

#[async_trait]
impl<F> AnyEventHandler for SyncHandler<F>
where F: Fn(&dyn Event) -> HandlerResult + Send + Sync {
    async fn handle(&self, event: &dyn Event) -> HandlerResult { (self.0)(event) }
}

/// Wraps a synchronous closure as a [`BareHandler`].
pub struct SyncBareHandler<F>(F);

#[async_trait]
impl<F> BareHandler for SyncBareHandler<F>
where F: Fn() -> HandlerResult + Send + Sync {
    async fn handle(&self) -> HandlerResult { (self.0)() }
}

/// Helper function to create typed synchronous handlers
pub fn sync_typed_handler<E, F>(f: F) -> SyncTypedHandler<E, F>
where E: Event, F: Fn(&E) -> HandlerResult + Send + Sync {
    SyncTypedHandler { f, _event: PhantomData }
}

/// Helper function to create synchronous handlers accepting any event
pub fn sync_handler<F>(f: F) -> SyncHandler<F>
where F: Fn(&dyn Event) -> HandlerResult + Send + Sync {
    SyncHandler(f)
}

/// Helper function to create synchronous zero-argument handlers
pub fn sync_bare_handler<F>(f: F) -> SyncBareHandler<F>
where F: Fn() -> HandlerResult + Send + Sync {
    SyncBareHandler(f)
}
