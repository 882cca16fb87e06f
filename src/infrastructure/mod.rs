//! Infrastructure layer for the playhead simulator.
//!
//! Contains the outside-world adapters: the UDP/OSC transport and the
//! Mach1 settings-file lookup.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `domain`, but MUST NOT be imported by them (the `MessageTransport`
//! trait in the application layer is the seam).
//!
//! # Sub-modules
//!
//! - **`osc`** – [`MessageTransport`](crate::application::transport::MessageTransport)
//!   implementations: the production UDP sender built on `rosc`, and a
//!   recording mock for tests.
//!
//! - **`settings`** – Reads the helper's UDP port from the external Mach1
//!   `settings.json`, falling back to the documented default.

pub mod osc;
pub mod settings;
