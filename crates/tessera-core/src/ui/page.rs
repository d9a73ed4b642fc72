use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::event::EventQueue;

/// Shared handle to a page
pub type PageRef = Arc<Page>;

/// One rendered page. Pages are compared by id.
pub struct Page {
    id: String,
    queue: EventQueue,
    attributes: RwLock<HashMap<String, Value>>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
         .field("id", &self.id)
         .field("queue", &self.queue)
         .finish_non_exhaustive()
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Page {}

impl Page {
    pub fn new(id: impl Into<String>) -> PageRef {
        Arc::new(Self {
            id: id.into(),
            queue: EventQueue::new(),
            attributes: RwLock::new(HashMap::new()),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Events deferred until this page becomes active.
    pub fn event_queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        // A poisoned map is still readable
        let attributes = self.attributes.read().unwrap_or_else(|e| e.into_inner());
        attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<Value> {
        let attributes = self.attributes.read().unwrap_or_else(|e| e.into_inner());
        attributes.get(name).cloned()
    }

    /// Set an attribute, returning the previous value.
    pub fn set_attribute(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        let mut attributes = self.attributes.write().unwrap_or_else(|e| e.into_inner());
        attributes.insert(name.into(), value)
    }

    pub fn remove_attribute(&self, name: &str) -> Option<Value> {
        let mut attributes = self.attributes.write().unwrap_or_else(|e| e.into_inner());
        attributes.remove(name)
    }
}
