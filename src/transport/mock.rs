//! Scriptable transport double for tests.
//!
//! `MockTransport` records sent payloads, lets tests flip the reported
//! connectivity, and answers sends through a configurable behavior:
//! respond synchronously, hold the completion forever, or drop it.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::SubscriptionId;

use super::event::{EventKind, TransportEvent};
use super::handle::{Completion, EventListener, ListenerHandle, Transport};

// ============================================================================
// Types
// ============================================================================

/// Synchronous responder: payload in, outcome out.
pub type Responder = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// What the mock does with each send.
enum SendBehavior {
    /// Drop the completion without invoking it.
    Drop,
    /// Stash the completion and never invoke it.
    Hold,
    /// Invoke the completion synchronously with the responder's outcome.
    Respond(Responder),
}

// ============================================================================
// MockTransport
// ============================================================================

/// In-memory transport double.
pub struct MockTransport {
    connected: AtomicBool,
    behavior: Mutex<SendBehavior>,
    listeners: Mutex<FxHashMap<EventKind, Vec<(SubscriptionId, EventListener)>>>,
    next_subscription: AtomicU64,
    sent: Mutex<Vec<Value>>,
    held: Mutex<Vec<Completion>>,
}

impl MockTransport {
    /// Creates a connected mock that drops completions until configured.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(true),
            behavior: Mutex::new(SendBehavior::Drop),
            listeners: Mutex::new(FxHashMap::default()),
            next_subscription: AtomicU64::new(1),
            sent: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        })
    }

    /// Answers every send synchronously with the responder's outcome.
    pub fn respond_with(&self, responder: impl Fn(Value) -> Result<Value> + Send + Sync + 'static) {
        *self.behavior.lock() = SendBehavior::Respond(Box::new(responder));
    }

    /// Stashes every completion without invoking it (request stays pending).
    pub fn hold_completions(&self) {
        *self.behavior.lock() = SendBehavior::Hold;
    }

    /// Drops every completion without invoking it.
    pub fn drop_completions(&self) {
        *self.behavior.lock() = SendBehavior::Drop;
    }

    /// Flips the reported connectivity.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Delivers an event to every listener of its kind.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &TransportEvent) -> usize {
        let listeners = self.listeners.lock();
        match listeners.get(&event.kind()) {
            Some(entries) => {
                for (_, listener) in entries {
                    listener(event);
                }
                entries.len()
            }
            None => 0,
        }
    }

    /// Number of active listeners for the given kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Payloads passed to `send`, in order.
    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, payload: Value, completion: Completion) {
        self.sent.lock().push(payload.clone());

        let behavior = self.behavior.lock();
        match &*behavior {
            SendBehavior::Drop => drop(completion),
            SendBehavior::Hold => self.held.lock().push(completion),
            SendBehavior::Respond(responder) => completion(responder(payload)),
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn subscribe(&self, kind: EventKind, listener: EventListener) -> ListenerHandle {
        let id = SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .entry(kind)
            .or_default()
            .push((id, listener));
        ListenerHandle::new(kind, id)
    }

    fn unsubscribe(&self, handle: &ListenerHandle) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(entries) = listeners.get_mut(&handle.kind) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(id, _)| *id != handle.id);
        entries.len() < before
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emit_reaches_only_matching_kind() {
        let transport = MockTransport::new();
        let handle = transport.subscribe(EventKind::Data, Box::new(|_| {}));

        assert_eq!(transport.emit(&TransportEvent::Data(json!(1))), 1);
        assert_eq!(transport.emit(&TransportEvent::End), 0);

        assert!(transport.unsubscribe(&handle));
        assert!(!transport.unsubscribe(&handle));
        assert_eq!(transport.emit(&TransportEvent::Data(json!(1))), 0);
    }

    #[test]
    fn test_responder_answers_synchronously() {
        let transport = MockTransport::new();
        transport.respond_with(|payload| Ok(json!({ "echo": payload })));

        let answered = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&answered);
        transport.send(
            json!({"id": 1}),
            Box::new(move |outcome| {
                assert!(outcome.is_ok());
                flag.store(true, Ordering::SeqCst);
            }),
        );

        assert!(answered.load(Ordering::SeqCst));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn test_connectivity_flag() {
        let transport = MockTransport::new();
        assert!(transport.is_connected());
        transport.set_connected(false);
        assert!(!transport.is_connected());
    }
}
