//! playhead-sim library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does playhead-sim do?
//!
//! Some Mach1 tooling (monitors, video players) synchronises to a DAW's
//! transport position, which the DAW publishes through a local *helper*
//! service. During development there is not always a DAW running, so this
//! process stands in for one: it registers itself with the helper as a
//! "player" client and then publishes a synthetic, steadily advancing
//! playhead over OSC/UDP at a fixed frame cadence.
//!
//! The simulator:
//!
//! 1. Reads the helper's UDP port from the Mach1 `settings.json` (or a CLI
//!    override), falling back to the documented default.
//! 2. Scans a bounded range of local port numbers and announces itself to
//!    the helper with `/m1-addClient` under the first usable one.
//! 3. Emits a `/playerPosition`, `/playerIsPlaying`, `/playerFrameRate`
//!    triplet once per frame, looping over a configured playback window.
//! 4. On Ctrl+C, sends a final "stopped playing" message and withdraws the
//!    registration with `/m1-removeClient`.
//!
//! Everything is fire-and-forget over UDP: no acknowledgements, no retries,
//! at-most-once delivery.

/// Domain layer: configuration, playback window, virtual clock, session,
/// and the OSC address/argument vocabulary.
pub mod domain;

/// Application layer: use cases for the simulator.
pub mod application;

/// Infrastructure layer: UDP/OSC transport adapters and the external
/// settings lookup.
pub mod infrastructure;
