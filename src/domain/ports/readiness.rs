//! Ports used by the readiness poller

use std::time::Duration;

/// Blocks between polls. Tests substitute a recorder that never sleeps.
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Receives one tick per poll so a progress indicator can advance.
pub trait PollProgress {
    fn start(&mut self, _total: u32) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}

/// Progress sink that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl PollProgress for NoProgress {}
