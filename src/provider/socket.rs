//! The socket provider core.
//!
//! Owns the injected transport handle, manages listener lifecycle, and
//! dispatches single and batched JSON-RPC requests whose responses arrive
//! through per-send completion callbacks.
//!
//! Response routing is the transport's job: each completion belongs to the
//! send that created it, so the provider never re-correlates responses by
//! id. The id-keyed pending table exists purely for cleanup bookkeeping.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::RequestId;
use crate::protocol::method::MethodDescriptor;
use crate::protocol::payload::{Payload, PayloadMapper};
use crate::protocol::response::validate;
use crate::transport::{Completion, Transport, TransportEvent};

use super::listeners::{EventCategory, ListenerRegistry};

// ============================================================================
// SocketProvider
// ============================================================================

/// JSON-RPC provider over an injected, always-connected transport.
///
/// The transport reference is set at construction and immutable
/// thereafter; reconnection is out of scope.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use jsonrpc_socket_provider::SocketProvider;
/// use serde_json::json;
///
/// let provider = SocketProvider::new(Arc::new(my_transport));
/// provider.register_event_listeners();
///
/// let balance = provider
///     .send("eth_getBalance", vec![json!("0xabc"), json!("latest")])
///     .await?;
/// ```
pub struct SocketProvider {
    /// The one connection reference.
    transport: Arc<dyn Transport>,
    /// Assigns fresh request ids.
    mapper: PayloadMapper,
    /// Category bindings and pending-id bookkeeping.
    listeners: ListenerRegistry,
}

impl SocketProvider {
    /// Creates a provider over the given transport.
    ///
    /// No listeners are bound yet; call
    /// [`register_event_listeners`](Self::register_event_listeners) once
    /// per connection lifetime.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            mapper: PayloadMapper::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Binds the provider's internal handlers to the transport's events.
    ///
    /// Exactly one canonical listener is bound per transport event; the
    /// `connect` binding serves both the connect and ready categories.
    /// Re-registering replaces the previous bindings instead of stacking
    /// duplicates.
    pub fn register_event_listeners(&self) {
        self.listeners.install(
            EventCategory::Message,
            Arc::new(|event| {
                if let TransportEvent::Data(payload) = event {
                    trace!(payload = %payload, "transport data received");
                }
            }),
        );
        self.listeners.install(
            EventCategory::Error,
            Arc::new(|event| {
                if let TransportEvent::Error(message) = event {
                    warn!(error = %message, "transport error");
                }
            }),
        );
        self.listeners.install(
            EventCategory::Connect,
            Arc::new(|_| debug!("transport connected")),
        );
        self.listeners.install(
            EventCategory::Ready,
            Arc::new(|_| debug!("provider ready")),
        );
        self.listeners.install(
            EventCategory::Close,
            Arc::new(|_| debug!("transport connection ended")),
        );

        self.listeners.bind_all(self.transport.as_ref());
        debug!("event listeners registered");
    }

    /// Removes the listener bound for a logical category.
    ///
    /// Connect and ready share one underlying `connect` listener;
    /// removing either clears both. Returns `true` if a transport
    /// listener was actually unbound.
    pub fn remove_category_listener(&self, category: EventCategory) -> bool {
        self.listeners
            .remove_category(self.transport.as_ref(), category)
    }

    /// Drops the pending-cleanup entry keyed by a request id.
    ///
    /// Runs automatically when a completion fires; exposed for callers
    /// that abandon a request out of band. Returns `true` if the id was
    /// tracked.
    pub fn clear_pending_cleanup(&self, id: RequestId) -> bool {
        self.listeners.clear_pending(id)
    }

    /// Number of in-flight requests awaiting completion.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.listeners.pending_count()
    }

    /// Reports success without any teardown.
    ///
    /// The injected transport is always-connected by construction and has
    /// no close operation for this adapter to call.
    #[inline]
    pub fn disconnect(&self) -> bool {
        true
    }

    /// Current transport connectivity, queried fresh on every call.
    #[inline]
    #[must_use]
    pub fn connected(&self) -> bool {
        self.transport.is_connected()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Sends a single request and resolves with its `result` field.
    ///
    /// # Errors
    ///
    /// - [`Error::Rpc`] / [`Error::InvalidResponse`] when the response
    ///   fails classification; the classifier's error propagates verbatim.
    /// - Transport-level errors from [`send_payload`](Self::send_payload).
    pub async fn send(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = self.mapper.to_payload(method, params);
        trace!(id = %request.id, method = %request.method, "dispatching request");

        let response = self.send_payload(Payload::Single(request)).await?;
        validate(&response)?;

        // A validated response always carries a result member.
        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Sends an ordered batch and resolves with the raw response array.
    ///
    /// Each descriptor's `before_execution` hook runs exactly once, in
    /// input order, before the descriptor is mapped to a payload entry.
    /// No per-element validation happens at this layer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidResponse`] when the batch reply is not an array.
    /// - Transport-level errors from [`send_payload`](Self::send_payload).
    pub async fn send_batch<M>(
        &self,
        methods: &mut [Box<dyn MethodDescriptor<M>>],
        module: &M,
    ) -> Result<Vec<Value>> {
        let mut requests = Vec::with_capacity(methods.len());
        for method in methods.iter_mut() {
            method.before_execution(module);
            requests.push(
                self.mapper
                    .to_payload(method.rpc_method(), method.parameters()),
            );
        }

        trace!(count = requests.len(), "dispatching batch");
        let response = self.send_payload(Payload::Batch(requests)).await?;

        match response {
            Value::Array(entries) => Ok(entries),
            other => Err(Error::invalid_response(format!(
                "batch response is not an array: {other}"
            ))),
        }
    }

    /// Transmits a payload and resolves with the raw response.
    ///
    /// Wraps the transport's callback-based send in a single-resolution
    /// future. Whatever the outcome (response, transport error, or a
    /// dropped completion), the id-keyed pending entry is cleared first.
    /// A batch payload carries no id, so its cleanup step is a no-op.
    ///
    /// No timeout is imposed: if the transport never invokes nor drops
    /// the completion, the operation stays pending indefinitely.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the payload cannot be serialized.
    /// - [`Error::Transport`] as reported by the completion callback.
    /// - [`Error::ChannelClosed`] if the transport dropped the completion
    ///   without invoking it.
    pub async fn send_payload(&self, payload: Payload) -> Result<Value> {
        let wire = serde_json::to_value(&payload)?;

        let request_id = payload.id();
        if let Some(id) = request_id {
            self.listeners.track_pending(id);
        }

        let (sender, receiver) = oneshot::channel();
        let completion: Completion = Box::new(move |outcome| {
            // Receiver may have been dropped by an abandoned caller.
            let _ = sender.send(outcome);
        });

        self.transport.send(wire, completion);

        let outcome = receiver.await;
        if let Some(id) = request_id {
            self.listeners.clear_pending(id);
            trace!(id = %id, "pending entry cleared");
        }

        outcome?
    }
}

// ============================================================================
// Tests
// ============================================================================
