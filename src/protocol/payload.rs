//! JSON-RPC request payloads and the id-assigning mapper.
//!
//! Requests are write-only from the provider's point of view: they are
//! serialized and handed to the transport, never parsed back.
//!
//! # Format
//!
//! Single request:
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "eth_getBalance",
//!   "params": ["0xabc", "latest"]
//! }
//! ```
//!
//! A batch is a plain array of such objects, submitted and answered as a
//! single unit.

// ============================================================================
// Imports
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::identifiers::RequestId;

// ============================================================================
// Constants
// ============================================================================

/// JSON-RPC protocol version marker.
pub const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// JsonRpcRequest
// ============================================================================

/// A single JSON-RPC request entry.
///
/// Construct through [`PayloadMapper::to_payload`] so the id is fresh and
/// unique within the owning provider instance.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    /// Protocol version marker, always `"2.0"`.
    pub jsonrpc: &'static str,

    /// Unique identifier for this request.
    pub id: RequestId,

    /// RPC method name.
    pub method: String,

    /// Ordered method parameters.
    pub params: Vec<Value>,
}

// ============================================================================
// Payload
// ============================================================================

/// What actually goes over the wire: one request or a batch array.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A single request object.
    Single(JsonRpcRequest),
    /// An ordered batch of request objects.
    Batch(Vec<JsonRpcRequest>),
}

impl Payload {
    /// The id to key per-request cleanup on.
    ///
    /// A batch array has no top-level id, so batch completions skip the
    /// id-keyed cleanup step.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<RequestId> {
        match self {
            Self::Single(request) => Some(request.id),
            Self::Batch(_) => None,
        }
    }

    /// Number of request entries carried.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(requests) => requests.len(),
        }
    }

    /// Returns `true` if this is an empty batch.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// PayloadMapper
// ============================================================================

/// Maps `(method, params)` pairs to requests with fresh unique ids.
///
/// Ids count up from 1 per mapper instance; concurrent calls each observe
/// a distinct id.
#[derive(Debug)]
pub struct PayloadMapper {
    next_id: AtomicU64,
}

impl PayloadMapper {
    /// Creates a mapper whose first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    /// Builds a request for `method` with a fresh id.
    pub fn to_payload(&self, method: impl Into<String>, params: Vec<Value>) -> JsonRpcRequest {
        let id = RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: method.into(),
            params,
        }
    }
}

impl Default for PayloadMapper {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
