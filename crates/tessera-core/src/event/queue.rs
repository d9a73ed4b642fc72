use std::collections::VecDeque;
use std::fmt;

use tokio::sync::Mutex; // Use tokio's Mutex

use crate::event::Event;

/// FIFO of events waiting for their page to become active.
#[derive(Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<Box<dyn Event>>>,
}

// Manual Debug implementation; the lock is only peeked at
impl fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("EventQueue");
        match self.events.try_lock() {
            Ok(events) => debug.field("len", &events.len()),
            Err(_) => debug.field("len", &"<locked>"),
        };
        debug.finish()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub async fn enqueue(&self, event: Box<dyn Event>) {
        self.events.lock().await.push_back(event);
    }

    /// Take the oldest pending event.
    pub async fn dequeue(&self) -> Option<Box<dyn Event>> {
        self.events.lock().await.pop_front()
    }

    /// Take every pending event, oldest first.
    pub async fn drain(&self) -> Vec<Box<dyn Event>> {
        self.events.lock().await.drain(..).collect()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}
