//! RegistrationClient: announce/withdraw this process's identity to the helper.
//!
//! The helper keys clients on a local port number and a role string. The
//! protocol is fire-and-forget, so "announce succeeded" only means the
//! datagram was dispatched — the identity scan therefore stops at the
//! first port whose announce could be sent at all.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::transport::{MessageTransport, TransportError};
use crate::domain::protocol;

/// Error type for registration operations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The underlying send could not be attempted or failed.
    #[error("registration send failed: {0}")]
    Transport(#[from] TransportError),
    /// Every candidate port in the scan range failed to register.
    #[error("no local player port could be registered in {base}..={last} ({attempts} candidates)")]
    Exhausted { base: u16, last: u16, attempts: u16 },
}

/// Announces and withdraws the "player" identity over the transport.
pub struct RegistrationClient {
    transport: Arc<dyn MessageTransport>,
}

impl RegistrationClient {
    /// Creates a client that registers through the given transport.
    pub fn new(transport: Arc<dyn MessageTransport>) -> Self {
        Self { transport }
    }

    /// Sends `/m1-addClient (port, "player")` to the helper.
    ///
    /// One outbound message, no retries. Success means the message was
    /// dispatched, not that the helper acknowledged it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Transport`] when the send could not be
    /// attempted.
    pub fn announce(&self, port: u16) -> Result<(), RegistrationError> {
        self.transport
            .send(protocol::ADD_CLIENT, protocol::add_client(port))?;
        info!("announced player identity on port {port}");
        Ok(())
    }

    /// Sends `/m1-removeClient (port, "player")` to the helper.
    ///
    /// Deliberately infallible to the caller: a failed withdrawal on a
    /// best-effort transport is logged and ignored.
    pub fn withdraw(&self, port: u16) {
        match self
            .transport
            .send(protocol::REMOVE_CLIENT, protocol::remove_client(port))
        {
            Ok(()) => info!("withdrew player identity on port {port}"),
            Err(e) => warn!("failed to withdraw player identity on port {port}: {e}"),
        }
    }

    /// Scans `base_port .. base_port + attempts`, announcing each candidate
    /// in turn, and returns the first port whose announce dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Exhausted`] after the bounded number of
    /// candidates has been tried without a single successful dispatch.
    pub fn register_first_available(
        &self,
        base_port: u16,
        attempts: u16,
    ) -> Result<u16, RegistrationError> {
        for offset in 0..attempts {
            let port = base_port.saturating_add(offset);
            match self.announce(port) {
                Ok(()) => return Ok(port),
                Err(e) => debug!("port {port} unusable, trying next: {e}"),
            }
        }
        Err(RegistrationError::Exhausted {
            base: base_port,
            last: base_port.saturating_add(attempts.saturating_sub(1)),
            attempts,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
