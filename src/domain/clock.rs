//! The virtual transport clock behind `/playerPosition`.
//!
//! The clock anchors a monotonic wall-clock reference (`Instant`) and
//! carries a virtual offset in seconds. The reported value is *elapsed wall
//! time since the anchor plus the offset*, in milliseconds — a time delta
//! transmitted under the name "position".
//!
//! On every loop wrap the simulator calls [`rebase`](VirtualTransportClock::rebase)
//! with the window's start position, so the reported value re-seeds to the
//! same starting value each loop instead of accumulating total session
//! time. Downstream listeners rely on that wrap-reset, so it is part of the
//! contract here, not an accident.

use std::time::Instant;

/// A wall-clock-anchored elapsed-time source.
///
/// Between rebases, `elapsed_ms()` is monotonically non-decreasing because
/// it derives from `Instant` (a monotonic clock) rather than from tick
/// counting — small emission-latency drift is absorbed automatically.
#[derive(Debug)]
pub struct VirtualTransportClock {
    /// Wall-clock reference point; reset exactly once per loop wrap.
    wall_reference: Instant,
    /// Offset carried on top of the anchor, in seconds.
    virtual_offset: f64,
}

impl VirtualTransportClock {
    /// Anchors the clock at the current instant with the given starting
    /// offset (seconds).
    pub fn start(initial_offset: f64) -> Self {
        Self {
            wall_reference: Instant::now(),
            virtual_offset: initial_offset,
        }
    }

    /// Elapsed wall time since the anchor plus the carried offset, in
    /// milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.wall_reference.elapsed().as_secs_f64() * 1000.0 + self.virtual_offset * 1000.0
    }

    /// Re-anchors the clock at the current instant with a new offset.
    ///
    /// Called on loop wrap so elapsed time restarts cleanly rather than
    /// carrying wall-clock drift from the previous loop.
    pub fn rebase(&mut self, new_offset: f64) {
        self.wall_reference = Instant::now();
        self.virtual_offset = new_offset;
    }

    /// The currently carried virtual offset, in seconds.
    pub fn virtual_offset(&self) -> f64 {
        self.virtual_offset
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
