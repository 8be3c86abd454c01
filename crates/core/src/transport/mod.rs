//! Transport contract between the builders and the in-sim receiver.
//!
//! The real socket lives outside the core; anything that can ship a wire string and call
//! back once with a response text fits. Every query carries an id that the receiver echoes
//! back, so a reply only ever reaches the query that asked for it.

mod loopback;

pub use loopback::{LoopbackTransport, Responder};

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Called at most once with the next response text.
pub type ResponseHandler = Box<dyn FnOnce(String) + Send>;

pub trait Transport: Send + Sync {
    /// Ship a finished wire string. `false` means the transport refused it.
    fn send(&self, payload: &str) -> bool;

    /// Register a one-shot handler for the reply to query `id`. Dropping the returned
    /// handle unregisters it.
    fn subscribe_once(&self, id: u64, handler: ResponseHandler) -> Subscription;
}

#[derive(Default)]
struct HubInner {
    handlers: Mutex<IndexMap<u64, ResponseHandler>>,
}

/// Routes query replies to their waiting handler by query id. Transports own one and feed
/// it from their receive side.
#[derive(Clone, Default)]
pub struct ResponseHub {
    inner: Arc<HubInner>,
}

impl ResponseHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_once(&self, id: u64, handler: ResponseHandler) -> Subscription {
        self.inner.handlers.lock().insert(id, handler);
        Subscription {
            hub: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Hand `response` to the handler waiting on query `id`. A reply nobody waits for any
    /// more (the query timed out) is dropped. Returns whether a handler fired.
    pub fn deliver(&self, id: u64, response: &str) -> bool {
        let handler = self.inner.handlers.lock().shift_remove(&id);
        match handler {
            Some(h) => {
                h(response.to_string());
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.lock().len()
    }
}

/// Handle to a pending one-shot subscription; unsubscribes on drop.
pub struct Subscription {
    hub: Weak<HubInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.handlers.lock().shift_remove(&self.id);
        }
    }
}
