//! The registered-client session record.

use std::net::SocketAddr;

/// A live registration with the helper service.
///
/// Created once a local identity (port number) has been chosen and
/// announced; owned exclusively by the simulator. `connected` flips to
/// `false` on withdrawal and guards against a second withdrawal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The helper's UDP endpoint all messages are sent to.
    pub peer_addr: SocketAddr,
    /// The local port number this process is known by to the helper.
    pub local_port: u16,
    /// Whether the registration is still in effect.
    pub connected: bool,
}

impl Session {
    /// Creates a session for a freshly announced identity.
    pub fn new(peer_addr: SocketAddr, local_port: u16) -> Self {
        Self {
            peer_addr,
            local_port,
            connected: true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
