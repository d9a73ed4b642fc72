use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::event::{Event, HandlerTable};
use crate::kernel::error::Result;
use crate::ui::page::PageRef;

/// Something events can be directed at.
#[async_trait]
pub trait Component: Send + Sync + fmt::Debug {
    fn id(&self) -> &str;

    /// Owning page, if the component is attached to one.
    fn page(&self) -> Option<PageRef>;

    /// Local synchronous receive hook.
    async fn fire_event(&self, event: &dyn Event) -> Result<()>;
}

/// Shared handle to a component
pub type ComponentRef = Arc<dyn Component>;

/// Lookup of components by id.
pub trait ComponentTree: Send + Sync {
    fn find(&self, id: &str) -> Option<ComponentRef>;
}

/// Stock component: an id, an optional page and a handler table.
///
/// Handlers run while the table is read-locked, so a handler must not
/// register handlers on its own widget.
pub struct Widget {
    id: String,
    page: RwLock<Option<PageRef>>,
    handlers: tokio::sync::RwLock<HandlerTable>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
         .field("id", &self.id)
         .field("page", &self.page().map(|p| p.id().to_string()))
         .finish_non_exhaustive()
    }
}

impl Widget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page: RwLock::new(None),
            handlers: tokio::sync::RwLock::new(HandlerTable::new()),
        }
    }

    /// Replace the handler table.
    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = tokio::sync::RwLock::new(handlers);
        self
    }

    /// Attach to `page` before sharing.
    pub fn attached_to(self, page: PageRef) -> Self {
        self.attach(page);
        self
    }

    pub fn attach(&self, page: PageRef) -> Option<PageRef> {
        self.page.write().unwrap_or_else(|e| e.into_inner()).replace(page)
    }

    pub fn detach(&self) -> Option<PageRef> {
        self.page.write().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn handlers(&self) -> &tokio::sync::RwLock<HandlerTable> {
        &self.handlers
    }

    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Component for Widget {
    fn id(&self) -> &str {
        &self.id
    }

    fn page(&self) -> Option<PageRef> {
        self.page.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn fire_event(&self, event: &dyn Event) -> Result<()> {
        let handlers = self.handlers.read().await;
        if !handlers.invoke(None, event).await? {
            log::debug!("Widget '{}' has no handler for '{}'", self.id, event.event_type());
        }
        Ok(())
    }
}

/// In-memory [`ComponentTree`].
#[derive(Debug, Default, Clone)]
pub struct WidgetTree {
    components: HashMap<String, ComponentRef>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: ComponentRef) -> Option<ComponentRef> {
        self.components.insert(component.id().to_string(), component)
    }

    pub fn remove(&mut self, id: &str) -> Option<ComponentRef> {
        self.components.remove(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentTree for WidgetTree {
    fn find(&self, id: &str) -> Option<ComponentRef> {
        self.components.get(id).cloned()
    }
}
