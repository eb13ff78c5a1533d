//! Transport event types.
//!
//! A transport delivers four named events independently of request order:
//!
//! | Event | Payload | Meaning |
//! |-------|---------|---------|
//! | `data` | raw response value | unsolicited data from the remote end |
//! | `error` | error description | transport-level failure |
//! | `connect` | none | channel established |
//! | `end` | none | channel closed by the remote end |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

// ============================================================================
// EventKind
// ============================================================================

/// The transport-level event namespace.
///
/// Subscriptions are keyed by kind; a transport holds at most one canonical
/// provider listener per kind at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Raw data delivered by the remote end.
    Data,
    /// Transport-level error.
    Error,
    /// Channel established.
    Connect,
    /// Channel closed by the remote end.
    End,
}

impl EventKind {
    /// All event kinds a transport emits.
    pub const ALL: [EventKind; 4] = [Self::Data, Self::Error, Self::Connect, Self::End];

    /// Returns the wire-level event name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Error => "error",
            Self::Connect => "connect",
            Self::End => "end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TransportEvent
// ============================================================================

/// An event delivered by the transport to its subscribers.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Raw data from the remote end.
    Data(Value),
    /// Transport-level error description.
    Error(String),
    /// Channel established.
    Connect,
    /// Channel closed by the remote end.
    End,
}

impl TransportEvent {
    /// Returns the kind this event belongs to.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Data(_) => EventKind::Data,
            Self::Error(_) => EventKind::Error,
            Self::Connect => EventKind::Connect,
            Self::End => EventKind::End,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
