//! Integration tests for the full playhead lifecycle.
//!
//! # Purpose
//!
//! These tests exercise the simulator through its *public* API in the same
//! way the binary entry point uses it, against the recording
//! `MockTransport`. They verify:
//!
//! - The happy path: register, emit frames at the configured cadence,
//!   wrap at the window end, stop on cancellation, withdraw once.
//! - The error paths: port-scan fallback to the next candidate, and the
//!   bounded give-up after the whole range fails.
//! - The wire-visible properties: fixed per-frame message order, sequence
//!   numbers that climb across wraps, and elapsed values that re-seed to
//!   the window start after each wrap.
//!
//! # Timing
//!
//! The reference scenario runs a 30-second window at 60 fps; here the same
//! semantics are exercised with millisecond-scale windows at 1000 fps so a
//! wrap happens every few frames. Elapsed-time assertions use generous
//! tolerances because the inter-frame sleep is best-effort.

use std::sync::Arc;

use rosc::OscType;

use playhead_sim::application::simulate_playhead::{CancelToken, PlayheadSimulator, SimulatorState};
use playhead_sim::application::transport::MessageTransport;
use playhead_sim::domain::protocol;
use playhead_sim::domain::window::PlaybackWindow;
use playhead_sim::infrastructure::osc::mock::{MockTransport, SentMessage};

const PEER: &str = "127.0.0.1:10301";

fn new_simulator(window: PlaybackWindow, frame_rate: f64) -> (PlayheadSimulator, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let simulator = PlayheadSimulator::new(
        Arc::clone(&transport) as Arc<dyn MessageTransport>,
        window,
        frame_rate,
    );
    (simulator, transport)
}

fn int_arg(msg: &SentMessage, index: usize) -> i32 {
    match msg.args[index] {
        OscType::Int(v) => v,
        ref other => panic!("expected int arg, got {other:?}"),
    }
}

fn float_arg(msg: &SentMessage, index: usize) -> f64 {
    match msg.args[index] {
        OscType::Float(v) => f64::from(v),
        ref other => panic!("expected float arg, got {other:?}"),
    }
}

/// Cancels the token after `millis` of wall time.
fn cancel_after(cancel: &Arc<CancelToken>, millis: u64) {
    let trigger = Arc::clone(cancel);
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
        trigger.cancel();
    });
}

// ── Scenario: looping playback with wrap re-seeding ───────────────────────────

/// A scaled-down version of the reference scenario (20 s – 50 s looping at
/// 60 fps): the first triplet carries sequence 0 and elapsed ≈ the window
/// start in milliseconds; each wrap re-seeds elapsed to the same starting
/// value while the sequence keeps climbing.
#[tokio::test]
async fn test_looping_run_reseeds_elapsed_and_keeps_sequence_climbing() {
    // Arrange – 5 frames per loop at 1000 fps
    let window = PlaybackWindow::new(20.0, 20.005, true).unwrap();
    let (mut simulator, transport) = new_simulator(window, 1000.0);
    simulator.register(PEER.parse().unwrap(), 10301, 1).unwrap();

    let cancel = CancelToken::new();
    cancel_after(&cancel, 100);

    // Act
    simulator.run(Arc::clone(&cancel)).await;

    // Assert
    let positions = transport.sent_to(protocol::PLAYER_POSITION);
    assert!(positions.len() >= 20, "expected many frames, got {}", positions.len());

    // First frame: sequence 0, elapsed ≈ 20 000 ms.
    assert_eq!(int_arg(&positions[0], 0), 0);
    let first_elapsed = float_arg(&positions[0], 1);
    assert!(
        (first_elapsed - 20_000.0).abs() < 100.0,
        "first elapsed must be ≈20000 ms, got {first_elapsed}"
    );

    // Sequence numbers climb by exactly 1 per frame, across wraps.
    for (i, msg) in positions.iter().enumerate() {
        assert_eq!(int_arg(msg, 0), i as i32, "sequence must never reset");
    }

    // Elapsed is non-decreasing within a loop segment, and every drop (a
    // wrap) re-seeds to approximately the window start.
    let elapsed: Vec<f64> = positions.iter().map(|m| float_arg(m, 1)).collect();
    let mut wraps = 0;
    for pair in elapsed.windows(2) {
        if pair[1] < pair[0] {
            wraps += 1;
            assert!(
                (pair[1] - 20_000.0).abs() < 500.0,
                "post-wrap elapsed must re-seed to ≈20000 ms, got {}",
                pair[1]
            );
        }
    }
    assert!(wraps >= 2, "expected at least two wraps, saw {wraps}");
}

// ── Scenario: bounded termination without looping ─────────────────────────────

/// With looping off, the run stops at the first tick where the cursor
/// reaches the window end — no wrap, no stop message, terminal state.
#[tokio::test]
async fn test_non_looping_run_terminates_at_window_end() {
    // Arrange – exactly 10 frames fit in the window
    let window = PlaybackWindow::new(0.0, 0.0095, false).unwrap();
    let (mut simulator, transport) = new_simulator(window, 1000.0);
    simulator.register(PEER.parse().unwrap(), 10301, 1).unwrap();

    // Act – no cancellation; the window end terminates the run
    simulator.run(CancelToken::new()).await;

    // Assert
    assert_eq!(simulator.state(), SimulatorState::Stopped);
    assert_eq!(transport.count_to(protocol::PLAYER_POSITION), 10);

    // Elapsed never resets: no wrap happened.
    let elapsed: Vec<f64> = transport
        .sent_to(protocol::PLAYER_POSITION)
        .iter()
        .map(|m| float_arg(m, 1))
        .collect();
    for pair in elapsed.windows(2) {
        assert!(pair[1] >= pair[0], "elapsed must be non-decreasing without wraps");
    }

    // Natural termination sends no isPlaying=0.
    let playing = transport.sent_to(protocol::PLAYER_IS_PLAYING);
    assert!(playing.iter().all(|m| int_arg(m, 1) == 1));
}

// ── Scenario: port-scan registration ──────────────────────────────────────────

/// When the first candidate port fails, the scan announces the next one
/// and that becomes the session identity — one addClient per attempted
/// port up through the first success.
#[tokio::test]
async fn test_port_scan_falls_through_to_second_candidate() {
    // Arrange
    let window = PlaybackWindow::new(0.0, 1.0, false).unwrap();
    let (mut simulator, transport) = new_simulator(window, 60.0);
    transport.fail_next(1);

    // Act
    let port = simulator
        .register(PEER.parse().unwrap(), 10301, 99)
        .expect("second candidate must register");

    // Assert
    assert_eq!(port, 10302);
    assert_eq!(simulator.session().unwrap().local_port, 10302);
    let adds = transport.sent_to(protocol::ADD_CLIENT);
    assert_eq!(adds.len(), 2, "one addClient per attempted port");
    assert_eq!(int_arg(&adds[0], 0), 10301);
    assert_eq!(int_arg(&adds[1], 0), 10302);
}

/// When every candidate in the bounded range fails, registration surfaces
/// the exhaustion to the caller and the simulator stays idle.
#[tokio::test]
async fn test_port_scan_exhaustion_is_surfaced() {
    // Arrange
    let window = PlaybackWindow::new(0.0, 1.0, false).unwrap();
    let (mut simulator, transport) = new_simulator(window, 60.0);
    transport.fail_all();

    // Act
    let result = simulator.register(PEER.parse().unwrap(), 10301, 99);

    // Assert
    assert!(result.is_err());
    assert_eq!(simulator.state(), SimulatorState::Idle);
    assert_eq!(transport.count_to(protocol::ADD_CLIENT), 99);
}

// ── Scenario: cancellation and withdrawal ─────────────────────────────────────

/// Cancellation mid-loop produces exactly one isPlaying=0 as the final
/// playback message, followed (after shutdown) by exactly one
/// removeClient, and no further position messages.
#[tokio::test]
async fn test_cancellation_then_shutdown_message_ordering() {
    // Arrange – an effectively endless looping window
    let window = PlaybackWindow::new(0.0, 600.0, true).unwrap();
    let (mut simulator, transport) = new_simulator(window, 200.0);
    simulator.register(PEER.parse().unwrap(), 10301, 1).unwrap();

    let cancel = CancelToken::new();
    cancel_after(&cancel, 30);

    // Act
    simulator.run(Arc::clone(&cancel)).await;
    simulator.shutdown();
    // A second cancellation after Stopped must be a no-op.
    cancel.cancel();
    simulator.shutdown();

    // Assert
    let sent = transport.sent.lock().unwrap();

    // Exactly one stop message and one withdrawal.
    let stops: Vec<usize> = sent
        .iter()
        .enumerate()
        .filter(|(_, m)| m.addr == protocol::PLAYER_IS_PLAYING && m.args[1] == OscType::Int(0))
        .map(|(i, _)| i)
        .collect();
    let removes: Vec<usize> = sent
        .iter()
        .enumerate()
        .filter(|(_, m)| m.addr == protocol::REMOVE_CLIENT)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(stops.len(), 1, "exactly one stopped-playing message");
    assert_eq!(removes.len(), 1, "exactly one withdrawal");

    // Ordering: stop message, then withdrawal, with nothing after it.
    assert!(stops[0] < removes[0]);
    assert_eq!(removes[0], sent.len() - 1, "removeClient must be the last message");

    // No position or frame-rate messages after the stop.
    assert!(sent[stops[0]..]
        .iter()
        .all(|m| m.addr != protocol::PLAYER_POSITION && m.addr != protocol::PLAYER_FRAME_RATE));
}

/// The full lifecycle in one pass: the wire sees addClient first, then
/// frame triplets in fixed order, then the withdrawal.
#[tokio::test]
async fn test_full_lifecycle_wire_order() {
    // Arrange
    let window = PlaybackWindow::new(0.0, 0.0025, false).unwrap();
    let (mut simulator, transport) = new_simulator(window, 1000.0);

    // Act
    simulator.register(PEER.parse().unwrap(), 10301, 99).unwrap();
    simulator.run(CancelToken::new()).await;
    simulator.shutdown();

    // Assert
    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.first().unwrap().addr, protocol::ADD_CLIENT);
    assert_eq!(sent.last().unwrap().addr, protocol::REMOVE_CLIENT);

    // Every frame between them is a position → isPlaying → frameRate triplet.
    let frames = &sent[1..sent.len() - 1];
    assert_eq!(frames.len() % 3, 0, "frames must come in triplets");
    for triplet in frames.chunks(3) {
        assert_eq!(triplet[0].addr, protocol::PLAYER_POSITION);
        assert_eq!(triplet[1].addr, protocol::PLAYER_IS_PLAYING);
        assert_eq!(triplet[2].addr, protocol::PLAYER_FRAME_RATE);
        // Position and isPlaying share the frame's sequence number.
        assert_eq!(triplet[0].args[0], triplet[1].args[0]);
    }

    // The reported frame rate matches the configured cadence.
    // Release the guard first: sent_to locks the same mutex.
    drop(sent);
    let rates = transport.sent_to(protocol::PLAYER_FRAME_RATE);
    assert!(rates.iter().all(|m| m.args == vec![OscType::Float(1000.0)]));
}
