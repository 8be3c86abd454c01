use parking_lot::Mutex;
use serde_json::Value;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use crate::transport::{ResponseHandler, ResponseHub, Subscription, Transport};

/// Maps a query `(func, args)` to a response text, or `None` to stay silent.
pub type Responder = Box<dyn Fn(&str, &[String]) -> Option<String> + Send + Sync>;

/// In-process stand-in for the simulator link.
///
/// Records every payload, and answers query payloads through an optional responder on a
/// background thread after `delay`.
pub struct LoopbackTransport {
    hub: ResponseHub,
    sent: Mutex<Vec<String>>,
    responder: Option<Responder>,
    delay: Duration,
    refuse: AtomicBool,
}

impl LoopbackTransport {
    /// Accepts everything, never answers.
    pub fn silent() -> Self {
        Self {
            hub: ResponseHub::new(),
            sent: Mutex::new(Vec::new()),
            responder: None,
            delay: Duration::ZERO,
            refuse: AtomicBool::new(false),
        }
    }

    pub fn answering<F>(responder: F) -> Self
    where
        F: Fn(&str, &[String]) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            responder: Some(Box::new(responder)),
            ..Self::silent()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make subsequent `send` calls fail (or succeed again).
    pub fn refuse_sends(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn hub(&self) -> &ResponseHub {
        &self.hub
    }

    /// Pull `(func, args, id)` out of a payload whose last command is a query.
    pub fn query_of(payload: &str) -> Option<(String, Vec<String>, u64)> {
        let v: Value = serde_json::from_str(payload).ok()?;
        let last = v.as_array()?.last()?;
        if last.get("f")?.as_str()? != "Query" {
            return None;
        }
        let a = last.get("a")?;
        let func = a.get("func")?.as_str()?.to_string();
        let args = a
            .get("args")?
            .as_array()?
            .iter()
            .filter_map(|x| x.as_str().map(str::to_string))
            .collect();
        let id = a.get("id")?.as_u64()?;
        Some((func, args, id))
    }
}

impl Transport for LoopbackTransport {
    fn send(&self, payload: &str) -> bool {
        if self.refuse.load(Ordering::SeqCst) {
            return false;
        }
        self.sent.lock().push(payload.to_string());

        let reply = self.responder.as_ref().and_then(|r| {
            let (func, args, id) = Self::query_of(payload)?;
            r(&func, &args).map(|text| (id, text))
        });
        if let Some((id, reply)) = reply {
            let hub = self.hub.clone();
            let delay = self.delay;
            thread::spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                hub.deliver(id, &reply);
            });
        }
        true
    }

    fn subscribe_once(&self, id: u64, handler: ResponseHandler) -> Subscription {
        self.hub.subscribe_once(id, handler)
    }
}
