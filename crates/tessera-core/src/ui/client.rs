use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::kernel::error::Result;

/// Future produced by an [`AckContinuation`].
pub type AckFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Work to run once the client acknowledges a round trip.
pub type AckContinuation = Box<dyn FnOnce() -> AckFuture + Send>;

/// The browser side of a page, reduced to acknowledgments.
pub trait ClientChannel: Send + Sync {
    /// Issue a no-op call to the client and run `on_ack` when it answers.
    /// A lost acknowledgment means `on_ack` never runs.
    fn request_ack(&self, on_ack: AckContinuation);
}

/// In-process client that acknowledges when told to.
#[derive(Default)]
pub struct LoopbackChannel {
    pending: Mutex<Vec<AckContinuation>>,
}

impl fmt::Debug for LoopbackChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopbackChannel")
         .field("pending", &self.pending_count())
         .finish()
    }
}

impl LoopbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Acknowledge every pending round trip in request order.
    ///
    /// Stops at the first continuation that fails; the rest stay dropped.
    pub async fn acknowledge_all(&self) -> Result<usize> {
        let pending: Vec<_> = std::mem::take(&mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()));
        let count = pending.len();
        for on_ack in pending {
            on_ack().await?;
        }
        Ok(count)
    }

    /// Forget every pending round trip, as if the connection dropped.
    pub fn disconnect(&self) -> usize {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        let count = pending.len();
        pending.clear();
        count
    }
}

impl ClientChannel for LoopbackChannel {
    fn request_ack(&self, on_ack: AckContinuation) {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).push(on_ack);
    }
}
