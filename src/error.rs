//! Error types for the socket provider.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use jsonrpc_socket_provider::{Result, SocketProvider};
//!
//! async fn example(provider: &SocketProvider) -> Result<()> {
//!     let balance = provider.send("eth_getBalance", vec![]).await?;
//!     println!("{balance}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Transport | [`Error::Transport`], [`Error::ChannelClosed`] |
//! | Response | [`Error::Rpc`], [`Error::InvalidResponse`] |
//! | External | [`Error::Json`] |
//!
//! Failures are per-request: nothing here is fatal to the process, and no
//! retry happens at this layer.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Transport-level failure.
    ///
    /// Surfaced through the transport's completion callback or its `error`
    /// event; propagated unmodified to the caller.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    // ========================================================================
    // Response Errors
    // ========================================================================
    /// RPC-level error response.
    ///
    /// Returned when the response carries a JSON-RPC `error` object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the remote end.
        message: String,
    },

    /// Malformed or unexpected response.
    ///
    /// Returned when a response fails classification: not an object, wrong
    /// version marker, missing id or result, or a non-array batch reply.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what made the response invalid.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport dropped the completion callback without invoking it.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an RPC error.
    #[inline]
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[inline]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a transport-level error.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ChannelClosed(_))
    }

    /// Returns `true` if this is an RPC-level error response.
    #[inline]
    #[must_use]
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }

    /// Returns `true` if this is a malformed-response error.
    #[inline]
    #[must_use]
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
