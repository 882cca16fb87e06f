//! Mock transport for unit and integration testing.
//!
//! The real transport fires UDP datagrams that test code cannot observe
//! without opening sockets. `MockTransport` replaces the socket with
//! in-memory recording: every send attempt is pushed into a
//! `Mutex<Vec<...>>` so assertions can inspect exactly what was emitted
//! and in what order.
//!
//! # Simulating failures
//!
//! Call [`fail_all`](MockTransport::fail_all) to make every subsequent
//! send return a [`TransportError`], or [`fail_next`](MockTransport::fail_next)
//! to fail only the next *n* sends (used by the port-scan tests). Failed
//! sends are still recorded — the record reflects what callers attempted,
//! which is what scan-behaviour assertions count.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use rosc::OscType;

use crate::application::transport::{MessageTransport, TransportError};

/// One recorded send attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    /// The OSC address the message was sent to.
    pub addr: String,
    /// The ordered argument list.
    pub args: Vec<OscType>,
}

/// A transport that records all sends without touching the network.
#[derive(Default)]
pub struct MockTransport {
    /// Every send attempt, in emission order.
    pub sent: Mutex<Vec<SentMessage>>,
    /// When set, every send fails.
    fail_all: AtomicBool,
    /// Fail this many upcoming sends, then succeed again.
    fail_remaining: AtomicUsize,
}

impl MockTransport {
    /// Creates a mock with an empty record that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Makes the next `n` sends fail, after which sends succeed again.
    pub fn fail_next(&self, n: usize) {
        self.fail_remaining.store(n, Ordering::SeqCst);
    }

    /// All recorded messages sent to `addr`, in order.
    pub fn sent_to(&self, addr: &str) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.addr == addr)
            .cloned()
            .collect()
    }

    /// How many messages were sent to `addr`.
    pub fn count_to(&self, addr: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.addr == addr)
            .count()
    }

    fn take_failure(&self) -> bool {
        if self.fail_all.load(Ordering::SeqCst) {
            return true;
        }
        self.fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl MessageTransport for MockTransport {
    /// Records the send attempt, then fails it when a failure is scheduled.
    fn send(&self, addr: &str, args: Vec<OscType>) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(SentMessage {
            addr: addr.to_string(),
            args,
        });
        if self.take_failure() {
            return Err(TransportError::Unavailable("mock failure".to_string()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
