//! Transport layer contract.
//!
//! The provider talks to a remote procedure executor through an injected
//! transport handle. The transport owns the channel (IPC socket, pipe,
//! anything persistent); the provider owns listener lifecycle and
//! request/response completion on top of it.
//!
//! ```text
//! ┌──────────────────┐                         ┌──────────────────┐
//! │  SocketProvider  │  send(payload, done)    │  Transport       │
//! │                  │────────────────────────►│  (injected)      │
//! │  ListenerRegistry│  data/error/connect/end │                  │
//! │                  │◄────────────────────────│  remote executor │
//! └──────────────────┘        events           └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | Event kinds and payload-carrying events |
//! | `handle` | The [`Transport`] trait and callback typedefs |

// ============================================================================
// Submodules
// ============================================================================

/// Transport event types.
pub mod event;

/// The transport handle contract.
pub mod handle;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use event::{EventKind, TransportEvent};
pub use handle::{Completion, EventListener, ListenerHandle, Transport};
