//! Search policy: capacities, cutoffs and the heuristic selector.

use std::time::Duration;

use lodestar_kernel::collections::{DEFAULT_HASH_CAPACITY, DEFAULT_HEAP_CAPACITY};

use crate::error::SearchError;

/// Budget and sizing configuration shared by every search algorithm.
///
/// All capacities are hard bounds: exceeding one ends the search with
/// [`SearchError::CapacityExceeded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Maximum number of entries in the open frontier (heap or stack).
    pub frontier_capacity: usize,
    /// Maximum number of entries in the closed set.
    pub closed_capacity: usize,
    /// Initial bucket count of the closed set. Must not exceed
    /// `closed_capacity`.
    pub bucket_count: usize,
    /// Let the closed set double its bucket count as it fills.
    pub grow_closed_set: bool,
    /// Stop at the first popped node deeper than this (`None` = unlimited).
    pub max_depth: Option<u32>,
    /// Stop at the first pop after this much wall-clock time.
    pub max_time: Option<Duration>,
    /// Passed verbatim to [`lodestar_kernel::capability::Heuristical::heuristic_distance`].
    pub heuristic_param: i32,
}

impl SearchPolicy {
    /// Check capacities and bucket geometry.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if a capacity is zero or
    /// `bucket_count` is zero or larger than `closed_capacity`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.frontier_capacity == 0 {
            return Err(invalid("frontier_capacity must be at least 1"));
        }
        if self.closed_capacity == 0 {
            return Err(invalid("closed_capacity must be at least 1"));
        }
        if self.bucket_count == 0 || self.bucket_count > self.closed_capacity {
            return Err(invalid(format!(
                "bucket_count {} must be in 1..={}",
                self.bucket_count, self.closed_capacity
            )));
        }
        Ok(())
    }

    /// The same policy with every capacity halved (minimum 1).
    ///
    /// Used to split one budget between two search directions.
    #[must_use]
    pub fn halved(&self) -> Self {
        let closed_capacity = (self.closed_capacity / 2).max(1);
        Self {
            frontier_capacity: (self.frontier_capacity / 2).max(1),
            closed_capacity,
            bucket_count: (self.bucket_count / 2).clamp(1, closed_capacity),
            ..self.clone()
        }
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            frontier_capacity: DEFAULT_HEAP_CAPACITY,
            closed_capacity: DEFAULT_HASH_CAPACITY,
            bucket_count: DEFAULT_HASH_CAPACITY,
            grow_closed_set: false,
            max_depth: None,
            max_time: None,
            heuristic_param: 0,
        }
    }
}

fn invalid(detail: impl Into<String>) -> SearchError {
    SearchError::InvalidPolicy {
        detail: detail.into(),
    }
}
