//! JSON-RPC protocol helpers.
//!
//! This module holds the wire-facing pieces the provider composes:
//! payload construction with fresh ids, response classification, and the
//! descriptor seam batch callers implement.
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | [`JsonRpcRequest`] | provider → transport | single call entry |
//! | [`Payload`] | provider → transport | one request or a batch array |
//! | raw [`serde_json::Value`] | transport → provider | response, classified by [`validate`] |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `payload` | Request types and the id-assigning mapper |
//! | `response` | Success/error classification of raw responses |
//! | `method` | Batch method-descriptor seam |

// ============================================================================
// Submodules
// ============================================================================

/// Request payloads and the id-assigning mapper.
pub mod payload;

/// Response classification.
pub mod response;

/// Method descriptors for batch dispatch.
pub mod method;

// ============================================================================
// Re-exports
// ============================================================================

pub use method::{MethodDescriptor, RpcCall};
pub use payload::{JSONRPC_VERSION, JsonRpcRequest, Payload, PayloadMapper};
pub use response::validate;
