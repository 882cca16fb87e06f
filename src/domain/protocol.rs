//! OSC addresses and argument-list builders for the helper protocol.
//!
//! The helper service keys every message on its OSC address and expects a
//! fixed argument order and typing per address. This module is the single
//! place that knows those shapes; the rest of the crate passes the built
//! argument vectors to a [`MessageTransport`](crate::application::transport::MessageTransport)
//! without inspecting them.
//!
//! Wire typing follows what the helper actually parses: counters and flags
//! travel as `i32`, time and rate values as `f32`.

use rosc::OscType;

/// Registers a client with the helper. Args: `(port: i32, role: string)`.
pub const ADD_CLIENT: &str = "/m1-addClient";
/// Deregisters a client. Args: `(port: i32, role: string)`.
pub const REMOVE_CLIENT: &str = "/m1-removeClient";
/// Playhead position report. Args: `(sequence: i32, elapsed_ms: f32)`.
pub const PLAYER_POSITION: &str = "/playerPosition";
/// Play/pause state report. Args: `(sequence: i32, flag: i32 ∈ {0,1})`.
pub const PLAYER_IS_PLAYING: &str = "/playerIsPlaying";
/// Frame rate report. Args: `(rate: f32)`.
pub const PLAYER_FRAME_RATE: &str = "/playerFrameRate";

/// The role string this process registers under.
pub const ROLE_PLAYER: &str = "player";

/// Arguments for [`ADD_CLIENT`].
pub fn add_client(port: u16) -> Vec<OscType> {
    vec![
        OscType::Int(i32::from(port)),
        OscType::String(ROLE_PLAYER.to_string()),
    ]
}

/// Arguments for [`REMOVE_CLIENT`].
pub fn remove_client(port: u16) -> Vec<OscType> {
    vec![
        OscType::Int(i32::from(port)),
        OscType::String(ROLE_PLAYER.to_string()),
    ]
}

/// Arguments for [`PLAYER_POSITION`].
///
/// The sequence number is truncated to `i32` for the wire; at 60 fps that
/// is over a year of continuous frames before wrapping.
pub fn player_position(sequence: u64, elapsed_ms: f64) -> Vec<OscType> {
    vec![OscType::Int(sequence as i32), OscType::Float(elapsed_ms as f32)]
}

/// Arguments for [`PLAYER_IS_PLAYING`].
pub fn player_is_playing(sequence: u64, playing: bool) -> Vec<OscType> {
    vec![
        OscType::Int(sequence as i32),
        OscType::Int(i32::from(playing)),
    ]
}

/// Arguments for [`PLAYER_FRAME_RATE`].
pub fn player_frame_rate(rate: f64) -> Vec<OscType> {
    vec![OscType::Float(rate as f32)]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
