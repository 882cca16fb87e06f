//! PlayheadSimulator: the fixed-cadence emission loop and its state machine.
//!
//! The simulator owns the session and the virtual clock, and drives a
//! single cooperative loop:
//!
//! ```text
//! Idle → Registering → Running → (Looping → Running)* → Stopped
//!                         │
//!                         └─ cancellation ──────────────→ Stopped
//! ```
//!
//! Each frame emits three messages in fixed order — `/playerPosition`,
//! `/playerIsPlaying`, `/playerFrameRate` — then advances a virtual cursor
//! by one frame period and sleeps until the next tick. The inter-frame
//! sleep is the only suspension point; a [`CancelToken`] wakes it promptly
//! via `tokio::select!`.
//!
//! The reported position is an elapsed-time delta from the clock, not the
//! cursor: the cursor only decides when the window wraps or the run ends.
//! On wrap the clock is rebased to the window start, so the reported value
//! re-seeds to the same starting value each loop while the sequence number
//! keeps climbing.
//!
//! Steady-state send failures are logged and swallowed — the transport is
//! best-effort and a dropped frame is indistinguishable from a dropped
//! datagram anyway.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::time;
use tracing::{debug, info, trace, warn};

use crate::application::register_player::{RegistrationClient, RegistrationError};
use crate::application::transport::MessageTransport;
use crate::domain::clock::VirtualTransportClock;
use crate::domain::protocol;
use crate::domain::session::Session;
use crate::domain::window::PlaybackWindow;

/// Cooperative cancellation signal shared between the Ctrl+C handler and
/// the emission loop.
///
/// Cancellation is idempotent: the first `cancel()` wins, later calls are
/// no-ops. The token is checked at the top of each loop iteration and
/// raced against the inter-frame sleep, so delivery during the sleep wakes
/// the loop promptly instead of swallowing the remaining interval.
#[derive(Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Creates a token, ready to be shared via `Arc`.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Requests cancellation. Safe to call from any task, any number of
    /// times.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.notify.notified();
            // Re-check after registering the waiter so a cancel() that
            // raced the registration is not missed.
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// The simulator's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Not yet registered with the helper.
    Idle,
    /// A registration scan is in flight.
    Registering,
    /// The emission loop is producing frames.
    Running,
    /// Transient: the cursor just wrapped back to the window start.
    Looping,
    /// Terminal: the loop has exited; only withdrawal remains.
    Stopped,
}

/// The orchestrator: owns the clock and session, drives the emission loop.
pub struct PlayheadSimulator {
    transport: Arc<dyn MessageTransport>,
    registration: RegistrationClient,
    window: PlaybackWindow,
    frame_rate: f64,
    state: SimulatorState,
    session: Option<Session>,
    /// Next sequence number to emit; increments by exactly 1 per frame
    /// triplet and never resets, not even across loop wraps.
    sequence: u64,
}

impl PlayheadSimulator {
    /// Creates an idle simulator.
    ///
    /// # Panics
    ///
    /// Panics when `frame_rate` is not strictly positive; the CLI boundary
    /// validates user input before construction.
    pub fn new(
        transport: Arc<dyn MessageTransport>,
        window: PlaybackWindow,
        frame_rate: f64,
    ) -> Self {
        assert!(frame_rate > 0.0, "frame rate must be > 0");
        let registration = RegistrationClient::new(Arc::clone(&transport));
        Self {
            transport,
            registration,
            window,
            frame_rate,
            state: SimulatorState::Idle,
            session: None,
            sequence: 0,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// The registration session, once one exists.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Registers this process with the helper, scanning the candidate port
    /// range for a usable local identity.
    ///
    /// On success the simulator holds a connected [`Session`] and is ready
    /// to [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Exhausted`] when no candidate port
    /// could be registered; the simulator drops back to `Idle` so the
    /// caller may retry with a different range.
    pub fn register(
        &mut self,
        peer_addr: std::net::SocketAddr,
        base_port: u16,
        attempts: u16,
    ) -> Result<u16, RegistrationError> {
        self.state = SimulatorState::Registering;
        match self.registration.register_first_available(base_port, attempts) {
            Ok(port) => {
                self.session = Some(Session::new(peer_addr, port));
                self.state = SimulatorState::Running;
                Ok(port)
            }
            Err(e) => {
                self.state = SimulatorState::Idle;
                Err(e)
            }
        }
    }

    /// Drives the emission loop until the window ends (with looping off) or
    /// `cancel` fires.
    ///
    /// Cancellation emits exactly one final `/playerIsPlaying` with flag 0
    /// and then stops without further position or frame-rate messages; it
    /// is a graceful outcome, not an error. Natural termination at the
    /// window end sends no stop message.
    pub async fn run(&mut self, cancel: Arc<CancelToken>) {
        if self.session.is_none() {
            warn!("run() called before a session was registered; nothing to do");
            return;
        }

        self.state = SimulatorState::Running;
        let period = time::Duration::from_secs_f64(1.0 / self.frame_rate);
        let step = 1.0 / self.frame_rate;
        let mut clock = VirtualTransportClock::start(self.window.start_position);
        let mut cursor = self.window.start_position;

        info!(
            "playhead running: window {:.3}s..{:.3}s, loop={}, {} fps",
            self.window.start_position,
            self.window.end_position,
            self.window.loop_playback,
            self.frame_rate
        );

        loop {
            if cancel.is_cancelled() {
                self.emit_stopped();
                break;
            }

            let elapsed_ms = clock.elapsed_ms();
            self.emit_frame(elapsed_ms);
            cursor += step;

            if cursor >= self.window.end_position {
                if self.window.loop_playback {
                    self.state = SimulatorState::Looping;
                    cursor = self.window.start_position;
                    clock.rebase(self.window.start_position);
                    debug!(
                        "loop wrap: cursor reset to {:.3}s (sequence continues at {})",
                        cursor,
                        self.sequence + 1
                    );
                    self.state = SimulatorState::Running;
                } else {
                    debug!("window end reached at cursor {cursor:.3}s; stopping");
                    self.sequence += 1;
                    break;
                }
            }

            self.sequence += 1;

            tokio::select! {
                _ = time::sleep(period) => {}
                _ = cancel.cancelled() => {
                    self.emit_stopped();
                    break;
                }
            }
        }

        self.state = SimulatorState::Stopped;
        info!("playhead stopped after {} frames", self.sequence);
    }

    /// Withdraws the registration. Exactly one `/m1-removeClient` is sent,
    /// and only if the session ever connected; repeated calls are no-ops.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if session.connected {
                self.registration.withdraw(session.local_port);
                session.connected = false;
            }
        }
    }

    /// Emits one position → isPlaying → frameRate triplet for the current
    /// sequence number.
    fn emit_frame(&self, elapsed_ms: f64) {
        self.send_best_effort(
            protocol::PLAYER_POSITION,
            protocol::player_position(self.sequence, elapsed_ms),
        );
        self.send_best_effort(
            protocol::PLAYER_IS_PLAYING,
            protocol::player_is_playing(self.sequence, true),
        );
        self.send_best_effort(
            protocol::PLAYER_FRAME_RATE,
            protocol::player_frame_rate(self.frame_rate),
        );
        trace!("frame {}: elapsed {elapsed_ms:.1} ms", self.sequence);
    }

    /// Emits the final "stopped playing" message, tagged with the sequence
    /// number of the last emitted frame.
    fn emit_stopped(&self) {
        let last_seq = self.sequence.saturating_sub(1);
        self.send_best_effort(
            protocol::PLAYER_IS_PLAYING,
            protocol::player_is_playing(last_seq, false),
        );
        info!("cancellation received; sent stopped-playing message");
    }

    /// Sends one message, logging and swallowing failures. A single lost
    /// datagram must never abort the running loop.
    fn send_best_effort(&self, addr: &str, args: Vec<rosc::OscType>) {
        if let Err(e) = self.transport.send(addr, args) {
            warn!("best-effort send to {addr} failed: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
