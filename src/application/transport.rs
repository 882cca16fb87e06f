//! The outbound message port the use cases send through.
//!
//! The transport is a best-effort, connectionless sender of
//! address + argument-list messages to a fixed peer endpoint: no
//! acknowledgement, no ordering guarantee across messages, at-most-once
//! delivery. Callers must treat every send as "dispatched", never as
//! "received".

use rosc::OscType;
use thiserror::Error;

/// Errors that can occur in the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer endpoint could not be resolved or the sender is otherwise
    /// unable to attempt the send.
    #[error("peer endpoint unavailable: {0}")]
    Unavailable(String),
    /// The message could not be encoded to the wire format.
    #[error("failed to encode message for {addr}: {reason}")]
    Encode { addr: String, reason: String },
    /// The socket send failed.
    #[error("socket send error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fire-and-forget sender of OSC-style messages to the helper.
///
/// Implementations live in the infrastructure layer:
/// [`UdpOscTransport`](crate::infrastructure::osc::udp::UdpOscTransport)
/// for production and
/// [`MockTransport`](crate::infrastructure::osc::mock::MockTransport) for
/// tests.
pub trait MessageTransport: Send + Sync {
    /// Sends one message with the given OSC address and ordered, typed
    /// argument list.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the send could not be attempted or
    /// the datagram could not be put on the wire. Success means
    /// "dispatched", not "peer acknowledged".
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<(), TransportError>;
}
