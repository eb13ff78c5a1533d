//! JSON-RPC socket provider over an injected, event-driven transport.
//!
//! This library dispatches single and batched JSON-RPC requests through a
//! persistent transport handle (a local IPC socket, a pipe, any object
//! implementing [`Transport`]) and correlates their asynchronous
//! completions.
//!
//! # Architecture
//!
//! The provider sits between RPC callers and the transport:
//!
//! - **Caller side**: `send` / `send_batch` build payloads with fresh ids
//!   and return futures.
//! - **Transport side**: `data`, `error`, `connect`, and `end` events
//!   arrive independently of request order; each send's response arrives
//!   through its own completion callback.
//!
//! Key design points:
//!
//! - One canonical listener per transport event, dispatching internally
//!   to the logical categories mapped onto it (`connect` serves both the
//!   connect and ready categories); removal is handle-based, never by
//!   closure identity.
//! - Completions are wrapped in `oneshot` channels: exactly one
//!   resolution per send, no timeout, no cancellation.
//! - No id-matching table for routing: the transport invokes the right
//!   completion; the provider keeps ids only for cleanup bookkeeping.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use jsonrpc_socket_provider::{Result, SocketProvider};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Any object implementing Transport works: IPC socket, pipe, ...
//!     let provider = SocketProvider::new(Arc::new(my_ipc_transport));
//!     provider.register_event_listeners();
//!
//!     let balance = provider
//!         .send("eth_getBalance", vec![json!("0xabc"), json!("latest")])
//!         .await?;
//!     println!("balance: {balance}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`provider`] | [`SocketProvider`] core and listener registry |
//! | [`protocol`] | Payload mapping, response classification, batch descriptors |
//! | [`transport`] | The injected [`Transport`] contract and its events |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for provider entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// JSON-RPC protocol helpers.
///
/// Payload construction, response classification, batch descriptors.
pub mod protocol;

/// The provider layer.
///
/// [`SocketProvider`] and its listener lifecycle.
pub mod provider;

/// Transport layer contract.
///
/// The injected [`Transport`] trait and its event types.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Provider types
pub use provider::{EventCategory, SocketProvider};

// Protocol types
pub use protocol::{JSONRPC_VERSION, JsonRpcRequest, MethodDescriptor, Payload, PayloadMapper, RpcCall};

// Transport types
pub use transport::{Completion, EventKind, EventListener, ListenerHandle, Transport, TransportEvent};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{RequestId, SubscriptionId};
