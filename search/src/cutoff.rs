//! Depth and wall-clock cutoffs.
//!
//! Checked once per frontier pop, never preemptively.

use std::time::{Duration, Instant};

use crate::outcome::TerminationReason;
use crate::policy::SearchPolicy;

#[derive(Debug, Clone, Copy)]
pub struct Cutoff {
    started: Instant,
    max_depth: Option<u32>,
    max_time: Option<Duration>,
}

impl Cutoff {
    /// Start the clock for `policy`'s limits.
    #[must_use]
    pub fn start(policy: &SearchPolicy) -> Self {
        Self {
            started: Instant::now(),
            max_depth: policy.max_depth,
            max_time: policy.max_time,
        }
    }

    /// The cutoff that applies to a node popped at `depth`, if any.
    ///
    /// Depth is tested before time.
    #[must_use]
    pub fn check(&self, depth: u32) -> Option<TerminationReason> {
        if self.max_depth.is_some_and(|max| depth > max) {
            return Some(TerminationReason::DepthCutoff);
        }
        if self.time_exceeded() {
            return Some(TerminationReason::TimeCutoff);
        }
        None
    }

    #[must_use]
    pub fn time_exceeded(&self) -> bool {
        self.max_time.is_some_and(|max| self.started.elapsed() > max)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
