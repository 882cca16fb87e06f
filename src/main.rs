//! playhead-sim — entry point.
//!
//! Registers this process with the Mach1 helper service as a "player"
//! client, then publishes a synthetic DAW playhead over OSC/UDP at a fixed
//! frame cadence until the playback window ends or Ctrl+C is pressed.
//!
//! # Usage
//!
//! ```text
//! playhead-sim [OPTIONS]
//!
//! Options:
//!   --helper-host <HOST>   Helper hostname or IP [default: 127.0.0.1]
//!   --helper-port <PORT>   Helper UDP port (overrides settings.json lookup)
//!   --start-pos <SECS>     Window start position [default: 20]
//!   --end-pos <SECS>       Window end position [default: 50]
//!   --no-loop              Stop at the window end instead of wrapping
//!   --frame-rate <FPS>     Emission cadence [default: 60]
//!   --base-port <PORT>     First local identity port to try [default: 10301]
//!   --scan-attempts <N>    How many identity ports to try [default: 99]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable         | Default     | Description                       |
//! |------------------|-------------|-----------------------------------|
//! | `M1_HELPER_HOST` | `127.0.0.1` | Helper hostname or IP             |
//! | `M1_HELPER_PORT` | (settings)  | Helper UDP port                   |
//! | `M1_FRAME_RATE`  | `60`        | Emission cadence (fps)            |
//!
//! # Exit codes
//!
//! `0` on normal or cancelled completion; nonzero when setup fails or no
//! local identity could be registered.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use playhead_sim::application::simulate_playhead::{CancelToken, PlayheadSimulator};
use playhead_sim::application::transport::MessageTransport;
use playhead_sim::domain::{PlaybackWindow, SimulatorConfig};
use playhead_sim::infrastructure::osc::udp::UdpOscTransport;
use playhead_sim::infrastructure::settings::resolve_helper_port;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Synthetic DAW playhead publisher for the Mach1 helper service.
#[derive(Debug, Parser)]
#[command(
    name = "playhead-sim",
    about = "Publishes a synthetic DAW transport position to the Mach1 helper over OSC/UDP",
    version
)]
struct Cli {
    /// Hostname or IP address of the helper service.
    #[arg(long, default_value = "127.0.0.1", env = "M1_HELPER_HOST")]
    helper_host: String,

    /// UDP port of the helper service.
    ///
    /// When omitted, the port is read from the Mach1 `settings.json`
    /// (key `helperPort`), falling back to 10301.
    #[arg(long, env = "M1_HELPER_PORT")]
    helper_port: Option<u16>,

    /// Playback window start position, in seconds.
    #[arg(long, default_value_t = 20.0)]
    start_pos: f64,

    /// Playback window end position, in seconds.
    #[arg(long, default_value_t = 50.0)]
    end_pos: f64,

    /// Stop at the window end instead of wrapping back to the start.
    #[arg(long)]
    no_loop: bool,

    /// Emission cadence in frames per second.
    #[arg(long, default_value_t = 60.0, env = "M1_FRAME_RATE")]
    frame_rate: f64,

    /// First local port number tried when registering an identity.
    #[arg(long, default_value_t = 10301)]
    base_port: u16,

    /// How many consecutive local ports to try before giving up.
    #[arg(long, default_value_t = 99)]
    scan_attempts: u16,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`SimulatorConfig`],
    /// consulting the Mach1 settings file when no helper port was given.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty playback window, a non-positive frame
    /// rate, or an unresolvable helper host.
    fn into_config(self) -> anyhow::Result<SimulatorConfig> {
        let window = PlaybackWindow::new(self.start_pos, self.end_pos, !self.no_loop)?;
        anyhow::ensure!(
            self.frame_rate > 0.0,
            "frame rate must be > 0, got {}",
            self.frame_rate
        );

        let helper_port = self.helper_port.unwrap_or_else(resolve_helper_port);
        let helper_addr = UdpOscTransport::resolve(&self.helper_host, helper_port)
            .with_context(|| format!("invalid helper endpoint '{}'", self.helper_host))?;

        Ok(SimulatorConfig {
            helper_addr,
            window,
            frame_rate: self.frame_rate,
            base_port: self.base_port,
            scan_attempts: self.scan_attempts,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging; `RUST_LOG` controls the level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_config()?;

    info!(
        "playhead-sim starting — helper={}, window {}s..{}s, loop={}, {} fps",
        config.helper_addr,
        config.window.start_position,
        config.window.end_position,
        config.window.loop_playback,
        config.frame_rate
    );

    let transport = Arc::new(
        UdpOscTransport::new(config.helper_addr).context("failed to bind local UDP socket")?,
    );
    let mut simulator = PlayheadSimulator::new(
        Arc::clone(&transport) as Arc<dyn MessageTransport>,
        config.window,
        config.frame_rate,
    );

    let port = simulator
        .register(config.helper_addr, config.base_port, config.scan_attempts)
        .context("failed to register a player identity with the helper")?;
    info!("registered player on port {port}");

    // ── Graceful shutdown ─────────────────────────────────────────────────────
    //
    // Ctrl+C cancels the emission loop; the simulator sends the final
    // "stopped playing" message itself, and withdrawal happens exactly once
    // below regardless of how the loop ended.
    let cancel = CancelToken::new();
    let cancel_clone = Arc::clone(&cancel);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — stopping playhead");
                cancel_clone.cancel();
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    simulator.run(Arc::clone(&cancel)).await;
    simulator.shutdown();

    info!("playhead-sim stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
