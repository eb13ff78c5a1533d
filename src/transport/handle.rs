//! The transport handle contract.
//!
//! A transport is an always-connected channel to a remote procedure
//! executor: a local IPC socket, a pipe to a child process, or any
//! injected object satisfying [`Transport`]. The provider owns exactly
//! one handle, set at construction.
//!
//! # Contract
//!
//! - `send(payload, completion)` transmits a payload and invokes the
//!   completion callback at most once with the outcome. The transport is
//!   responsible for routing each response to the completion of the send
//!   that caused it; the provider does not re-correlate by id.
//! - `is_connected()` reports current connectivity; the provider never
//!   caches it.
//! - `subscribe`/`unsubscribe` manage named-event listeners by handle, so
//!   removal never depends on closure identity.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

use crate::error::Result;
use crate::identifiers::SubscriptionId;

use super::event::{EventKind, TransportEvent};

// ============================================================================
// Callback Types
// ============================================================================

/// Completion callback for a single `send` invocation.
///
/// Invoked at most once by the transport, with the raw response on success
/// or the transport's error on failure.
pub type Completion = Box<dyn FnOnce(Result<Value>) + Send>;

/// Listener invoked for each event of a subscribed kind.
pub type EventListener = Box<dyn Fn(&TransportEvent) + Send + Sync>;

// ============================================================================
// ListenerHandle
// ============================================================================

/// Handle identifying one active subscription on a transport.
///
/// Returned by [`Transport::subscribe`]; passing it to
/// [`Transport::unsubscribe`] removes exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    /// Event kind the listener is bound to.
    pub kind: EventKind,
    /// Subscription id within that kind.
    pub id: SubscriptionId,
}

impl ListenerHandle {
    /// Creates a handle from its parts.
    #[inline]
    #[must_use]
    pub const fn new(kind: EventKind, id: SubscriptionId) -> Self {
        Self { kind, id }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// The injected transport contract.
///
/// Implementations must invoke each [`Completion`] at most once; the
/// provider relies on that guarantee rather than enforcing it.
pub trait Transport: Send + Sync {
    /// Transmits a payload; the completion fires asynchronously with the
    /// outcome.
    fn send(&self, payload: Value, completion: Completion);

    /// Reports current connectivity.
    fn is_connected(&self) -> bool;

    /// Registers a listener for the given event kind.
    fn subscribe(&self, kind: EventKind, listener: EventListener) -> ListenerHandle;

    /// Removes the listener identified by `handle`.
    ///
    /// Returns `true` if a listener was actually removed.
    fn unsubscribe(&self, handle: &ListenerHandle) -> bool;
}
