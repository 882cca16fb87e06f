//! Application layer use cases for the playhead simulator.
//!
//! # What use cases does the simulator have?
//!
//! - **`register_player`** – Announces this process's identity (a local
//!   port number) to the helper service and withdraws it on shutdown. Also
//!   performs the bounded sequential port scan that picks the identity.
//!
//! - **`simulate_playhead`** – The orchestrator: owns the session and the
//!   virtual clock, drives the fixed-rate emission loop, applies loop-wrap
//!   policy, and reacts to cancellation.
//!
//! Both use cases send through the [`transport::MessageTransport`] port;
//! the UDP/OSC adapter and a recording mock live in the infrastructure
//! layer.

pub mod register_player;
pub mod simulate_playhead;
pub mod transport;
