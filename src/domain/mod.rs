//! Domain types for the playhead simulator.
//!
//! This layer holds plain data and pure logic only — no sockets, no file
//! system, no async. The infrastructure layer adapts these types to the
//! outside world.
//!
//! # Sub-modules
//!
//! - **`config`** – [`SimulatorConfig`], the single source of truth for all
//!   runtime settings.
//! - **`window`** – [`PlaybackWindow`], the `[start, end)` time window the
//!   virtual cursor moves through, with its `start < end` invariant.
//! - **`clock`** – [`VirtualTransportClock`], the wall-clock-anchored
//!   elapsed-time source that feeds `/playerPosition`.
//! - **`session`** – [`Session`], the registered-client record owned by the
//!   simulator.
//! - **`protocol`** – OSC address constants and argument-list builders for
//!   every outbound message.

pub mod clock;
pub mod config;
pub mod protocol;
pub mod session;
pub mod window;

pub use clock::VirtualTransportClock;
pub use config::SimulatorConfig;
pub use session::Session;
pub use window::{PlaybackWindow, WindowError};
