//! Method descriptors for batch dispatch.
//!
//! Higher-level modules describe each RPC call through
//! [`MethodDescriptor`]; the provider runs the `before_execution` hook and
//! maps the descriptor to a payload entry. `M` is the module context the
//! hook may read to finalize parameters.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;

// ============================================================================
// MethodDescriptor
// ============================================================================

/// One entry of a batch request.
///
/// `before_execution` runs exactly once per descriptor, before the
/// descriptor is mapped to a payload entry.
pub trait MethodDescriptor<M>: Send {
    /// Finalizes parameters using module context.
    fn before_execution(&mut self, _module: &M) {}

    /// RPC method name.
    fn rpc_method(&self) -> &str;

    /// Ordered method parameters.
    fn parameters(&self) -> Vec<Value>;
}

// ============================================================================
// RpcCall
// ============================================================================

/// A plain call with fixed parameters and a no-op hook.
#[derive(Debug, Clone)]
pub struct RpcCall {
    method: String,
    params: Vec<Value>,
}

impl RpcCall {
    /// Creates a call descriptor.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

impl<M> MethodDescriptor<M> for RpcCall {
    fn rpc_method(&self) -> &str {
        &self.method
    }

    fn parameters(&self) -> Vec<Value> {
        self.params.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
