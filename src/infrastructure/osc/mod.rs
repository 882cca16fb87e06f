//! OSC transport adapters.
//!
//! `udp` is the production sender; `mock` records messages in memory for
//! unit and integration tests.

pub mod mock;
pub mod udp;
