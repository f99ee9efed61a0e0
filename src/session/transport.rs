//! Upload transports
//!
//! The transport receives progress ticks while content moves and a
//! final settle call once it has all arrived. `TimedTransport` paces
//! the ticks with real sleeps the way an end user sees an upload bar;
//! `MemoryTransport` records them for assertions.

use std::thread;
use std::time::Duration;

use super::errors::SessionResult;
use crate::config::IngestConfig;

/// Receiver for upload progress
pub trait UploadTransport {
    /// Deliver a progress tick, 0 through 100.
    fn send(&mut self, percent: u8) -> SessionResult<()>;

    /// Settle the upload after the last tick.
    fn finalize(&mut self) -> SessionResult<()>;
}

/// Transport that paces progress with wall-clock delays
#[derive(Debug, Clone)]
pub struct TimedTransport {
    step_delay: Duration,
    settle_delay: Duration,
}

impl TimedTransport {
    /// Create a transport with explicit delays.
    pub fn new(step_delay: Duration, settle_delay: Duration) -> Self {
        Self {
            step_delay,
            settle_delay,
        }
    }

    /// Create a transport using the configured delays.
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.step_delay(), config.settle_delay())
    }
}

impl UploadTransport for TimedTransport {
    fn send(&mut self, _percent: u8) -> SessionResult<()> {
        thread::sleep(self.step_delay);
        Ok(())
    }

    fn finalize(&mut self) -> SessionResult<()> {
        thread::sleep(self.settle_delay);
        Ok(())
    }
}

/// Transport that records every tick, for tests
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Vec<u8>,
    finalized: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the ticks received so far, in order.
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Check whether the upload was settled.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl UploadTransport for MemoryTransport {
    fn send(&mut self, percent: u8) -> SessionResult<()> {
        self.sent.push(percent);
        Ok(())
    }

    fn finalize(&mut self) -> SessionResult<()> {
        self.finalized = true;
        Ok(())
    }
}
