//! Simulator configuration types.
//!
//! [`SimulatorConfig`] is the single source of truth for all runtime
//! settings. It can be constructed from CLI arguments (preferred for
//! production) or from sensible defaults (useful for local development and
//! tests).
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads inside the domain) keeps the simulator easy to embed in
//! tests. The binary entry point is responsible for populating the struct
//! from CLI args, environment variables, and the Mach1 settings file.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::window::PlaybackWindow;

/// All runtime configuration for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// The helper service's UDP endpoint.
    pub helper_addr: SocketAddr,
    /// The playback window the virtual cursor sweeps.
    pub window: PlaybackWindow,
    /// Emission cadence in frames per second. Invariant: `> 0`; validated
    /// where the config is built (CLI boundary).
    pub frame_rate: f64,
    /// First local port number tried during registration.
    pub base_port: u16,
    /// How many consecutive port numbers to try before giving up.
    pub scan_attempts: u16,
}

impl SimulatorConfig {
    /// The fixed sleep period between frames.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}

impl Default for SimulatorConfig {
    /// Returns a config suitable for local development without any external
    /// configuration: a looping 20 s – 50 s window at 60 fps against a
    /// helper on localhost.
    fn default() -> Self {
        Self {
            // Safe: compile-time-known valid address and window bounds.
            helper_addr: "127.0.0.1:10301".parse().unwrap(),
            window: PlaybackWindow::new(20.0, 50.0, true).unwrap(),
            frame_rate: 60.0,
            base_port: 10301,
            scan_attempts: 99,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
