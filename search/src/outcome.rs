//! Search results: the generated path, counters and termination reason.

use std::fmt;
use std::time::Duration;

use lodestar_kernel::capability::{Equatable, Generative};

use crate::node::{NodeArena, NodeId};

/// Why a search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The popped state equals the finish state.
    GoalReached,
    /// A popped node was deeper than `max_depth`. The path is best-effort.
    DepthCutoff,
    /// `max_time` elapsed. The path is best-effort.
    TimeCutoff,
    /// The frontier emptied without reaching the finish state. No path.
    Exhausted,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::DepthCutoff => "depth_cutoff",
            Self::TimeCutoff => "time_cutoff",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States from start to end plus the operations between them.
///
/// `operations[0]` is `None`; `operations[i]` turned `states[i - 1]` into
/// `states[i]`.
#[derive(Debug, Clone)]
pub struct GeneratedPath<S: Generative> {
    pub states: Vec<S>,
    pub operations: Vec<Option<S::Op>>,
}

impl<S: Generative> GeneratedPath<S> {
    /// A single-state path.
    #[must_use]
    pub fn single(state: S) -> Self {
        Self {
            states: vec![state],
            operations: vec![None],
        }
    }

    /// Number of states (moves + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of operations applied.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[must_use]
    pub fn last(&self) -> Option<&S> {
        self.states.last()
    }

    pub(crate) fn push(&mut self, op: S::Op, state: S) {
        self.operations.push(Some(op));
        self.states.push(state);
    }
}

impl<S: Generative + Equatable> GeneratedPath<S> {
    /// Replay every operation from `states[0]` and check each result.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.states.len() != self.operations.len() || self.operations.first() != Some(&None) {
            return false;
        }
        self.states.windows(2).zip(&self.operations[1..]).all(|(pair, op)| {
            op.as_ref()
                .and_then(|op| pair[0].generate(op))
                .is_some_and(|next| next.is_equal(&pair[1]))
        })
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier.
    pub searched_nodes: u64,
    /// Roots plus every successor `generate` returned.
    pub generated_nodes: u64,
    /// Successors admitted to the closed set (or reopened at a better cost).
    pub generated_unique_nodes: u64,
    pub max_open_size: usize,
    pub max_closed_size: usize,
    pub elapsed: Duration,
    pub heuristic_param: i32,
}

impl SearchStats {
    #[must_use]
    pub fn new(heuristic_param: i32) -> Self {
        Self {
            heuristic_param,
            ..Self::default()
        }
    }

    /// Record frontier and closed-set high-water marks.
    pub fn observe(&mut self, open: usize, closed: usize) {
        self.max_open_size = self.max_open_size.max(open);
        self.max_closed_size = self.max_closed_size.max(closed);
    }
}

/// Outcome of one `find_path` call.
#[derive(Debug, Clone)]
pub struct SearchResult<S: Generative> {
    /// `Some` unless the search exhausted its frontier.
    pub path: Option<GeneratedPath<S>>,
    pub stats: SearchStats,
    pub termination: TerminationReason,
}

impl<S: Generative> SearchResult<S> {
    #[must_use]
    pub fn exhausted(stats: SearchStats) -> Self {
        Self {
            path: None,
            stats,
            termination: TerminationReason::Exhausted,
        }
    }

    /// Returns `true` only if the path ends on the finish state.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination == TerminationReason::GoalReached
    }
}

/// Rebuild the path ending at `id` by walking parent links to the root.
#[must_use]
pub fn reconstruct_path<S>(arena: &NodeArena<S>, id: NodeId) -> GeneratedPath<S>
where
    S: Generative + Clone,
{
    let chain: Vec<_> = arena.ancestors(id).collect();
    let mut path = GeneratedPath {
        states: Vec::with_capacity(chain.len()),
        operations: Vec::with_capacity(chain.len()),
    };
    for node in chain.into_iter().rev() {
        path.states.push(node.state.clone());
        path.operations.push(node.last_op.clone());
    }
    path
}
