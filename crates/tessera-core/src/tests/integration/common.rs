#![cfg(test)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::event::{Event, EventListener};
use crate::kernel::error::Result;
use crate::ui::{Component, ComponentRef, PageRef};

/// Component that records the type of every event it receives.
#[derive(Debug)]
pub struct RecordingComponent {
    id: String,
    page: Option<PageRef>,
    received: Mutex<Vec<String>>,
}

impl RecordingComponent {
    pub fn detached(id: &str) -> Arc<Self> {
        Arc::new(Self { id: id.to_string(), page: None, received: Mutex::new(Vec::new()) })
    }

    pub fn on_page(id: &str, page: &PageRef) -> Arc<Self> {
        Arc::new(Self { id: id.to_string(), page: Some(page.clone()), received: Mutex::new(Vec::new()) })
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Component for RecordingComponent {
    fn id(&self) -> &str {
        &self.id
    }

    fn page(&self) -> Option<PageRef> {
        self.page.clone()
    }

    async fn fire_event(&self, event: &dyn Event) -> Result<()> {
        self.received.lock().unwrap().push(event.event_type().to_string());
        Ok(())
    }
}

/// Coerce a recording component into a component handle.
pub fn as_ref(component: &Arc<RecordingComponent>) -> ComponentRef {
    component.clone()
}

/// Listener counting how often it was called.
#[derive(Debug, Default)]
pub struct CountingListener {
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl CountingListener {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventListener for CountingListener {
    async fn on_event(&self, event: &dyn Event) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(event.event_type().to_string());
        Ok(())
    }
}
