//! The playback window the virtual cursor moves through.

use thiserror::Error;

/// Error type for playback window construction.
#[derive(Debug, Error, PartialEq)]
pub enum WindowError {
    /// The window is empty or inverted; the cursor would never advance.
    #[error("playback window is empty: start {start}s must be before end {end}s")]
    EmptyWindow { start: f64, end: f64 },
}

/// The time window (in seconds) that the simulated playhead sweeps.
///
/// Immutable for the lifetime of one simulation run. When `loop_playback`
/// is set, the cursor wraps back to `start_position` on reaching
/// `end_position`; otherwise the run terminates there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackWindow {
    /// Where the cursor (and the reported elapsed time) starts, in seconds.
    pub start_position: f64,
    /// Where the cursor wraps or the run ends, in seconds.
    pub end_position: f64,
    /// Whether the cursor wraps back to `start_position` at the end.
    pub loop_playback: bool,
}

impl PlaybackWindow {
    /// Creates a window, enforcing the `start_position < end_position`
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::EmptyWindow`] when `start >= end` (including
    /// NaN inputs, which fail the comparison).
    pub fn new(start: f64, end: f64, loop_playback: bool) -> Result<Self, WindowError> {
        if !(start < end) {
            return Err(WindowError::EmptyWindow { start, end });
        }
        Ok(Self {
            start_position: start,
            end_position: end,
            loop_playback,
        })
    }

    /// The window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_position - self.start_position
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
