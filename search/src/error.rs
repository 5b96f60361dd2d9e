//! Typed search errors.
//!
//! Every runtime outcome that is not a failure (goal reached, cutoff,
//! exhaustion) is a [`crate::outcome::TerminationReason`] inside an `Ok`
//! result. `SearchError` is reserved for conditions the caller must act on.

use std::fmt;

use lodestar_kernel::error::CollectionError;
use thiserror::Error;

/// Which bounded container overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Frontier,
    ClosedSet,
    Stack,
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Frontier => "frontier",
            Self::ClosedSet => "closed set",
            Self::Stack => "stack",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A frontier, closed set or stack is full. The session stays in the
    /// running phase until [`crate::session::PathSearch::reset_processing`].
    #[error("{structure} capacity of {capacity} exceeded")]
    CapacityExceeded {
        structure: Structure,
        capacity: usize,
    },

    /// Configuration was changed mid-search, or a search was started
    /// without a start or finish state.
    #[error("invalid session state: {detail}")]
    InvalidState { detail: String },

    /// Bidirectional reconstruction found no operation linking two adjacent
    /// states of the backward chain.
    #[error("no operation reconnects the backward chain at depth {depth}")]
    IrreconcilablePath { depth: u32 },

    /// A policy or configuration value is out of range.
    #[error("invalid policy: {detail}")]
    InvalidPolicy { detail: String },
}

impl SearchError {
    /// Lift a container failure into a search failure naming `structure`.
    #[must_use]
    pub fn from_collection(structure: Structure, err: CollectionError) -> Self {
        match err {
            CollectionError::CapacityExceeded { capacity } => Self::CapacityExceeded {
                structure,
                capacity,
            },
            CollectionError::InvalidGeometry { .. } => Self::InvalidPolicy {
                detail: format!("{structure}: {err}"),
            },
        }
    }

    pub(crate) fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState {
            detail: detail.into(),
        }
    }
}
