//! Listener registry: logical categories over transport events.
//!
//! The provider reacts to five logical event categories while the
//! transport only emits four named events: `connect` serves both the
//! connect and ready categories. The registry binds exactly one canonical
//! listener per transport event kind and dispatches internally to every
//! category mapped onto that kind, so removal is always handle-based and
//! never depends on closure identity.
//!
//! | Category | Transport event |
//! |----------|-----------------|
//! | `Message` | `data` |
//! | `Error` | `error` |
//! | `Connect` | `connect` |
//! | `Ready` | `connect` (shared) |
//! | `Close` | `end` |
//!
//! The registry also keeps the id-keyed pending table used for
//! per-request cleanup when a completion fires.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::identifiers::RequestId;
use crate::transport::{EventKind, EventListener, ListenerHandle, Transport, TransportEvent};

// ============================================================================
// EventCategory
// ============================================================================

/// Logical event categories the provider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Raw data from the remote end.
    Message,
    /// Transport-level error.
    Error,
    /// Channel established.
    Connect,
    /// Provider ready for dispatch (same underlying event as [`Connect`](Self::Connect)).
    Ready,
    /// Channel closed by the remote end.
    Close,
}

impl EventCategory {
    /// All logical categories.
    pub const ALL: [EventCategory; 5] = [
        Self::Message,
        Self::Error,
        Self::Connect,
        Self::Ready,
        Self::Close,
    ];

    /// The transport event kind this category is served by.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            Self::Message => EventKind::Data,
            Self::Error => EventKind::Error,
            Self::Connect | Self::Ready => EventKind::Connect,
            Self::Close => EventKind::End,
        }
    }

    /// Categories served by a transport event kind.
    #[inline]
    #[must_use]
    pub(crate) const fn for_kind(kind: EventKind) -> &'static [EventCategory] {
        match kind {
            EventKind::Data => &[Self::Message],
            EventKind::Error => &[Self::Error],
            EventKind::Connect => &[Self::Connect, Self::Ready],
            EventKind::End => &[Self::Close],
        }
    }

    /// Returns the category name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Error => "error",
            Self::Connect => "connect",
            Self::Ready => "ready",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Types
// ============================================================================

/// Handler invoked for events of one logical category.
///
/// Stored behind `Arc` so dispatch can clone handlers out of the registry
/// lock before invoking them.
pub(crate) type CategoryHandler = Arc<dyn Fn(&TransportEvent) + Send + Sync>;

// ============================================================================
// ListenerRegistry
// ============================================================================

#[derive(Default)]
struct RegistryState {
    /// Logical handlers by category.
    handlers: FxHashMap<EventCategory, CategoryHandler>,
    /// Canonical transport subscription per event kind.
    bindings: FxHashMap<EventKind, ListenerHandle>,
    /// In-flight request ids awaiting completion cleanup.
    pending: FxHashSet<RequestId>,
}

/// Category-keyed listener bookkeeping owned by one provider instance.
pub(crate) struct ListenerRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RegistryState::default())),
        }
    }

    /// Installs the logical handler for a category.
    pub(crate) fn install(&self, category: EventCategory, handler: CategoryHandler) {
        self.state.lock().handlers.insert(category, handler);
    }

    /// Binds one canonical listener per transport event kind.
    ///
    /// A stale binding for a kind is unsubscribed before the replacement
    /// takes effect, so rebinding cannot duplicate dispatch.
    pub(crate) fn bind_all(&self, transport: &dyn Transport) {
        for kind in EventKind::ALL {
            let state = Arc::clone(&self.state);
            let listener: EventListener =
                Box::new(move |event| Self::dispatch(&state, kind, event));

            let handle = transport.subscribe(kind, listener);
            let stale = self.state.lock().bindings.insert(kind, handle);
            if let Some(stale) = stale {
                transport.unsubscribe(&stale);
                debug!(kind = %kind, "replaced stale canonical listener");
            }
        }
        trace!("canonical listeners bound");
    }

    /// Removes a category's handler and unbinds its transport listener.
    ///
    /// Connect and ready share one underlying `connect` listener, so
    /// removing either clears both categories along with the binding.
    /// Returns `true` if a transport listener was actually unbound.
    pub(crate) fn remove_category(
        &self,
        transport: &dyn Transport,
        category: EventCategory,
    ) -> bool {
        let kind = category.kind();
        let handle = {
            let mut state = self.state.lock();
            for cleared in EventCategory::for_kind(kind) {
                state.handlers.remove(cleared);
            }
            state.bindings.remove(&kind)
        };

        match handle {
            Some(handle) => {
                debug!(category = %category, kind = %kind, "category listener removed");
                transport.unsubscribe(&handle)
            }
            None => false,
        }
    }

    /// Tracks an in-flight request id.
    pub(crate) fn track_pending(&self, id: RequestId) {
        self.state.lock().pending.insert(id);
    }

    /// Drops the pending entry for a completed request.
    ///
    /// Returns `true` if the id was tracked.
    pub(crate) fn clear_pending(&self, id: RequestId) -> bool {
        self.state.lock().pending.remove(&id)
    }

    /// Number of tracked in-flight request ids.
    pub(crate) fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Invokes every installed handler mapped onto `kind`.
    ///
    /// Handlers are cloned out of the lock first; they never run under it.
    fn dispatch(state: &Mutex<RegistryState>, kind: EventKind, event: &TransportEvent) {
        let handlers: Vec<CategoryHandler> = {
            let guard = state.lock();
            EventCategory::for_kind(kind)
                .iter()
                .filter_map(|category| guard.handlers.get(category).cloned())
                .collect()
        };

        for handler in &handlers {
            handler(event);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use crate::transport::mock::MockTransport;

    fn counting_handler() -> (CategoryHandler, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let handler: CategoryHandler = Arc::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (handler, count)
    }

    #[test]
    fn test_category_kind_mapping() {
        assert_eq!(EventCategory::Message.kind(), EventKind::Data);
        assert_eq!(EventCategory::Error.kind(), EventKind::Error);
        assert_eq!(EventCategory::Connect.kind(), EventKind::Connect);
        assert_eq!(EventCategory::Ready.kind(), EventKind::Connect);
        assert_eq!(EventCategory::Close.kind(), EventKind::End);

        assert_eq!(
            EventCategory::for_kind(EventKind::Connect),
            &[EventCategory::Connect, EventCategory::Ready]
        );
    }

    #[test]
    fn test_connect_event_reaches_connect_and_ready() {
        let transport = MockTransport::new();
        let registry = ListenerRegistry::new();

        let (connect_handler, connects) = counting_handler();
        let (ready_handler, readies) = counting_handler();
        registry.install(EventCategory::Connect, connect_handler);
        registry.install(EventCategory::Ready, ready_handler);
        registry.bind_all(transport.as_ref());

        // One canonical listener per kind, even with two logical categories.
        assert_eq!(transport.listener_count(EventKind::Connect), 1);
        assert_eq!(transport.emit(&TransportEvent::Connect), 1);

        assert_eq!(connects.load(Ordering::SeqCst), 1);
        assert_eq!(readies.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_without_installed_handler_is_silent() {
        let transport = MockTransport::new();
        let registry = ListenerRegistry::new();
        registry.bind_all(transport.as_ref());

        assert_eq!(transport.emit(&TransportEvent::Data(json!(1))), 1);
    }

    #[test]
    fn test_remove_close_leaves_other_categories_intact() {
        let transport = MockTransport::new();
        let registry = ListenerRegistry::new();

        let (close_handler, closes) = counting_handler();
        let (message_handler, messages) = counting_handler();
        registry.install(EventCategory::Close, close_handler);
        registry.install(EventCategory::Message, message_handler);
        registry.bind_all(transport.as_ref());

        assert!(registry.remove_category(transport.as_ref(), EventCategory::Close));

        assert_eq!(transport.listener_count(EventKind::End), 0);
        assert_eq!(transport.emit(&TransportEvent::End), 0);
        assert_eq!(closes.load(Ordering::SeqCst), 0);

        assert_eq!(transport.emit(&TransportEvent::Data(json!("0x1"))), 1);
        assert_eq!(messages.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_removing_ready_clears_the_shared_connect_binding() {
        let transport = MockTransport::new();
        let registry = ListenerRegistry::new();

        let (connect_handler, connects) = counting_handler();
        registry.install(EventCategory::Connect, connect_handler);
        registry.bind_all(transport.as_ref());

        assert!(registry.remove_category(transport.as_ref(), EventCategory::Ready));

        assert_eq!(transport.listener_count(EventKind::Connect), 0);
        assert_eq!(transport.emit(&TransportEvent::Connect), 0);
        assert_eq!(connects.load(Ordering::SeqCst), 0);

        // Second removal finds nothing to unbind.
        assert!(!registry.remove_category(transport.as_ref(), EventCategory::Connect));
    }

    #[test]
    fn test_rebinding_replaces_stale_listeners() {
        let transport = MockTransport::new();
        let registry = ListenerRegistry::new();

        registry.bind_all(transport.as_ref());
        registry.bind_all(transport.as_ref());

        for kind in EventKind::ALL {
            assert_eq!(transport.listener_count(kind), 1, "kind {kind}");
        }
    }

    #[test]
    fn test_pending_bookkeeping() {
        let registry = ListenerRegistry::new();
        let id = RequestId::new(7);

        assert_eq!(registry.pending_count(), 0);
        registry.track_pending(id);
        assert_eq!(registry.pending_count(), 1);

        assert!(registry.clear_pending(id));
        assert!(!registry.clear_pending(id));
        assert_eq!(registry.pending_count(), 0);
    }
}
