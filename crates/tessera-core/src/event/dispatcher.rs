use std::fmt;

use async_trait::async_trait;

use crate::config::DispatchSettings;
use crate::event::error::EventSystemError;
use crate::event::Event;
use crate::kernel::error::Result;
use crate::ui::{AckFuture, ClientChannel, ComponentRef, ExecutionContext, PageRef};

/// Receives events the dispatcher decided to deliver now.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn on_event(&self, event: &dyn Event) -> Result<()>;
}

/// Default listener: hands the event to its current target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendToCurrentTarget;

#[async_trait]
impl EventListener for SendToCurrentTarget {
    async fn on_event(&self, event: &dyn Event) -> Result<()> {
        EventDispatcher::send(event, event.current_target()).await
    }
}

/// How an event is to be delivered.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// No target: nothing to deliver
    Skip,
    /// Target page is active (or the target has no page): call the listener now
    Immediate,
    /// Target page is not active: queue on that page
    Deferred(PageRef),
}

impl PartialEq for Delivery {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Delivery::Skip, Delivery::Skip) => true,
            (Delivery::Immediate, Delivery::Immediate) => true,
            (Delivery::Deferred(a), Delivery::Deferred(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl Eq for Delivery {}

/// Decide how `event` is delivered under `ctx`. Has no side effects.
pub fn route(event: &dyn Event, ctx: &ExecutionContext) -> Delivery {
    let Some(target) = event.target() else {
        return Delivery::Skip;
    };
    match target.page() {
        Some(page) if !ctx.is_active(&page) => Delivery::Deferred(page),
        _ => Delivery::Immediate,
    }
}

/// Follow a forwarding chain to the event that started it.
pub fn get_original_event(event: &dyn Event) -> &dyn Event {
    let mut current = event;
    while let Some(inner) = current.original_event() {
        current = inner;
    }
    current
}

/// Delivery engine: executes [`route`] decisions and owns the replay policy.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    settings: DispatchSettings,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
         .field("settings", &self.settings)
         .finish()
    }
}

impl EventDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Deliver through the default listener.
    pub async fn fire_event(&self, event: Box<dyn Event>, ctx: &ExecutionContext) -> Result<Delivery> {
        self.fire_event_with(event, &SendToCurrentTarget, ctx).await
    }

    /// Deliver now through `listener`, or queue on the target's page when that
    /// page is not the active one.
    pub async fn fire_event_with(
        &self,
        event: Box<dyn Event>,
        listener: &dyn EventListener,
        ctx: &ExecutionContext,
    ) -> Result<Delivery> {
        let delivery = route(event.as_ref(), ctx);
        match &delivery {
            Delivery::Skip => {
                log::debug!("Event '{}' has no target; nothing to deliver", event.event_type());
            }
            Delivery::Deferred(page) => {
                log::debug!("Deferring event '{}' to inactive page '{}'", event.event_type(), page.id());
                page.event_queue().enqueue(event).await;
            }
            Delivery::Immediate => {
                listener.on_event(event.as_ref()).await?;
            }
        }
        Ok(delivery)
    }

    /// Hand `event` to `target`'s receive hook right away. A missing target is a no-op.
    pub async fn send(event: &dyn Event, target: Option<&ComponentRef>) -> Result<()> {
        match target {
            Some(target) => target.fire_event(event).await,
            None => Ok(()),
        }
    }

    /// Always queue. The page is `page`, else the target's page, else the
    /// active page; with none of those the post fails.
    pub async fn post(&self, event: Box<dyn Event>, page: Option<PageRef>, ctx: &ExecutionContext) -> Result<PageRef> {
        let page = page
            .or_else(|| event.page())
            .or_else(|| ctx.active_page().cloned())
            .ok_or_else(|| EventSystemError::QueueOperationFailed {
                operation: "post".to_string(),
                reason: format!("no page available for event '{}'", event.event_type()),
            })?;
        log::debug!("Posting event '{}' to page '{}'", event.event_type(), page.id());
        page.event_queue().enqueue(event).await;
        Ok(page)
    }

    /// Deliver to the current target once `client` acknowledges a dummy round
    /// trip. Without an acknowledgment the event is never delivered.
    pub fn echo(&self, event: Box<dyn Event>, client: &dyn ClientChannel) {
        log::debug!("Echoing event '{}' through the client", event.event_type());
        client.request_ack(Box::new(move || -> AckFuture {
            Box::pin(async move {
                let target = event.current_target().cloned();
                EventDispatcher::send(event.as_ref(), target.as_ref()).await
            })
        }));
    }

    /// Deliver every event queued on `page`, oldest first, with `page` active.
    pub async fn replay(&self, page: &PageRef) -> Result<usize> {
        let ctx = ExecutionContext::for_page(page.clone());
        let mut count = 0;
        // Events posted by handlers during replay are picked up too
        while let Some(event) = page.event_queue().dequeue().await {
            self.fire_event(event, &ctx).await?;
            count += 1;
        }
        if count > 0 {
            log::debug!("Replayed {} queued event(s) on page '{}'", count, page.id());
        }
        Ok(count)
    }

    /// Switch `ctx` to `page`; replays the page queue when configured to.
    pub async fn activate(&self, ctx: &mut ExecutionContext, page: PageRef) -> Result<usize> {
        ctx.activate(page.clone());
        if self.settings.replay_on_activate {
            self.replay(&page).await
        } else {
            Ok(0)
        }
    }
}
