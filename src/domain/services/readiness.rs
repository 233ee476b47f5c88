//! Bounded fixed-interval polling
//!
//! The front-end build container signals progress only by creating marker
//! files, so readiness is a blocking sleep-and-recheck loop with an iteration
//! cap (150 x 2 s, about five minutes).

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::ports::{FileSystem, Pause, PollProgress};

pub struct ReadinessPoller<'a> {
    pause: &'a dyn Pause,
    interval: Duration,
    max_iterations: u32,
}

impl<'a> ReadinessPoller<'a> {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
    pub const DEFAULT_MAX_ITERATIONS: u32 = 150;

    pub fn new(pause: &'a dyn Pause) -> Self {
        Self {
            pause,
            interval: Self::DEFAULT_INTERVAL,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Pause, then check, up to `max_iterations` times.
    ///
    /// Returns `true` as soon as `is_ready` does; `false` once the budget is
    /// spent. `is_ready` is called exactly once per iteration.
    pub fn wait_until(
        &self,
        mut is_ready: impl FnMut() -> bool,
        progress: &mut dyn PollProgress,
    ) -> bool {
        progress.start(self.max_iterations);
        let mut ready = false;
        let mut rounds = 0;
        while !ready && rounds < self.max_iterations {
            self.pause.pause(self.interval);
            ready = is_ready();
            rounds += 1;
            progress.advance();
            debug!(round = rounds, ready, "readiness poll");
        }
        progress.finish();
        if ready {
            info!(rounds, "ready");
        } else {
            info!(rounds, "gave up waiting");
        }
        ready
    }

    /// Wait for `path` to exist.
    pub fn wait_for_path(
        &self,
        fs: &dyn FileSystem,
        path: &Path,
        progress: &mut dyn PollProgress,
    ) -> bool {
        debug!(path = %path.display(), "waiting for sentinel");
        self.wait_until(|| fs.exists(path), progress)
    }
}
