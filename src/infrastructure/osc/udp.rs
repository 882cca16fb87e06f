//! UDP implementation of the outbound message port.
//!
//! Binds an ephemeral local socket once and fires each message at the
//! helper's endpoint as a single OSC datagram. `rosc` handles the OSC
//! type-tag and padding rules; this module only maps errors and puts the
//! bytes on the wire.
//!
//! Plain blocking `UdpSocket` is fine here: a UDP send copies the datagram
//! into the kernel buffer and returns, so there is nothing to await.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use rosc::{OscMessage, OscPacket, OscType};
use tracing::trace;

use crate::application::transport::{MessageTransport, TransportError};

/// Fire-and-forget OSC sender over UDP.
pub struct UdpOscTransport {
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpOscTransport {
    /// Binds an ephemeral local socket aimed at `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] when no local socket can be bound.
    pub fn new(peer: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        Ok(Self { socket, peer })
    }

    /// Resolves a `host:port` pair to a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unavailable`] when the name does not
    /// resolve to any address.
    pub fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
        let target = format!("{host}:{port}");
        target
            .to_socket_addrs()
            .map_err(|e| TransportError::Unavailable(format!("{target}: {e}")))?
            .next()
            .ok_or_else(|| TransportError::Unavailable(target))
    }

    /// The endpoint all messages are sent to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl MessageTransport for UdpOscTransport {
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<(), TransportError> {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args,
        });
        let bytes = rosc::encoder::encode(&packet).map_err(|e| TransportError::Encode {
            addr: addr.to_string(),
            reason: format!("{e:?}"),
        })?;
        self.socket.send_to(&bytes, self.peer)?;
        trace!("sent {addr} ({} bytes) to {}", bytes.len(), self.peer);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
