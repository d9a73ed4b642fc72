use std::sync::Arc;

use crate::config::FrameworkConfig;
use crate::event::{Delivery, EventDispatcher, EventFactory, EventTypeRegistry, Request};
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::ui::{ComponentTree, ExecutionContext};

/// Wires the registry, factory and dispatcher together from one config.
#[derive(Debug, Clone)]
pub struct Application {
    config: FrameworkConfig,
    registry: Arc<EventTypeRegistry>,
    factory: EventFactory,
    dispatcher: EventDispatcher,
}

impl Application {
    /// Application with default settings and the built-in event types.
    pub fn new() -> Self {
        Self::with_config(FrameworkConfig::default())
    }

    /// Application with the built-in event types.
    pub fn with_config(config: FrameworkConfig) -> Self {
        Self::with_registry(config, EventTypeRegistry::with_builtin_events())
    }

    /// Application using a caller-populated registry.
    pub fn with_registry(config: FrameworkConfig, registry: EventTypeRegistry) -> Self {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
        log::info!("Registered event types: {}", registry.len());

        let registry = Arc::new(registry);
        let factory = EventFactory::new(registry.clone())
            .with_generic_fallback(config.dispatch.generic_fallback);
        let dispatcher = EventDispatcher::new(config.dispatch.clone());

        Self { config, registry, factory, dispatcher }
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<EventTypeRegistry> {
        &self.registry
    }

    pub fn factory(&self) -> &EventFactory {
        &self.factory
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Decode `request`, bind it within `tree` and deliver it under `ctx`.
    /// `Ok(None)` when no event could be built from the request.
    pub async fn handle_request(
        &self,
        request: &Request,
        tree: &dyn ComponentTree,
        ctx: &ExecutionContext,
    ) -> Result<Option<Delivery>> {
        let Some(event) = self.factory.create_from_request_in(request, tree)? else {
            return Ok(None);
        };
        let delivery = self.dispatcher.fire_event(event, ctx).await?;
        Ok(Some(delivery))
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
