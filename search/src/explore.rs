//! Reachable-state enumeration.
//!
//! [`StateExplorer::explore`] lists distinct states reachable from a start
//! in breadth-first order. [`StateExplorer::explore_at_depth`] lists only
//! the states whose shortest distance from the start is exactly `depth`,
//! holding only the last three layers in memory.

use log::debug;

use lodestar_kernel::capability::SearchState;
use lodestar_kernel::collections::{Chain, ChainedHashSet, MinHeap};

use crate::closed::ClosedSet;
use crate::cutoff::Cutoff;
use crate::error::{SearchError, Structure};
use crate::node::{FrontierEntry, NodeArena, NodeId, SearchNode};
use crate::policy::SearchPolicy;

/// One enumerated state.
#[derive(Debug, Clone)]
pub struct ExploredState<S: SearchState> {
    pub state: S,
    /// Shortest distance from the start, in moves.
    pub depth: u32,
    /// Operation that produced `state` from its BFS parent (`None` for the
    /// start).
    pub op: Option<S::Op>,
}

impl<S: SearchState> ExploredState<S> {
    fn from_node(node: &SearchNode<S>) -> Self {
        Self {
            state: node.state.clone(),
            depth: node.depth,
            op: node.last_op.clone(),
        }
    }
}

/// Enumerates a state space through the [`SearchState`] capabilities.
#[derive(Debug, Clone, Default)]
pub struct StateExplorer {
    policy: SearchPolicy,
}

impl StateExplorer {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Up to `frontier_capacity` distinct states reachable from `start`,
    /// ordered by depth, start first.
    ///
    /// Enumeration stops early at the first state deeper than `max_depth`
    /// or once `max_time` has elapsed.
    ///
    /// # Errors
    ///
    /// [`SearchError::CapacityExceeded`] if the closed set fills up before
    /// `frontier_capacity` states are found.
    pub fn explore<S: SearchState>(&self, start: &S) -> Result<Vec<ExploredState<S>>, SearchError> {
        let policy = &self.policy;
        let limit = policy.frontier_capacity;
        let cutoff = Cutoff::start(policy);
        let mut arena = NodeArena::new();
        let mut closed = ClosedSet::new(policy)?;
        let mut frontier = MinHeap::new(limit);
        let mut collected = Chain::new();

        let root = arena.push(SearchNode::root(start.clone(), 0, 0, 0));
        closed.insert(&arena, root)?;
        enqueue(&mut frontier, &arena, root)?;

        while let Some(entry) = frontier.extract_min() {
            let node = arena.get(entry.node);
            if cutoff.check(node.depth).is_some() || collected.len() >= limit {
                break;
            }
            collected.push_back(ExploredState::from_node(node));

            let parent = node.clone();
            for op in parent.state.operations().into_iter().rev() {
                if arena.len() >= limit {
                    break;
                }
                let Some(state) = parent.state.generate(&op) else {
                    continue;
                };
                if closed.contains(&arena, &state, state.stable_hash()) {
                    continue;
                }
                let depth = parent.depth + 1;
                let child = arena.push(SearchNode::child(
                    state,
                    entry.node,
                    op,
                    depth,
                    i64::from(depth),
                    0,
                    i64::from(depth),
                ));
                closed.insert(&arena, child)?;
                enqueue(&mut frontier, &arena, child)?;
            }
        }

        debug!(
            "explore: {} states in {:?}",
            collected.len(),
            cutoff.elapsed()
        );
        Ok(collected.into_vec())
    }

    /// The states at exactly `depth` moves from `start`, assuming every
    /// move can be undone (a state two layers back is the deepest a
    /// successor can revisit).
    ///
    /// Only three layers are alive at once: the one being built and the
    /// two before it. Older layers are dropped as the window rolls.
    ///
    /// Returns an empty list if the space runs out before `depth` or if
    /// `max_time` elapses first.
    ///
    /// # Errors
    ///
    /// [`SearchError::CapacityExceeded`] if one layer holds more than
    /// `frontier_capacity` states or more than `closed_capacity` distinct
    /// states.
    pub fn explore_at_depth<S: SearchState>(
        &self,
        start: &S,
        depth: u32,
    ) -> Result<Vec<ExploredState<S>>, SearchError> {
        let policy = &self.policy;
        let cutoff = Cutoff::start(policy);

        let mut previous = Layer::new(policy)?;
        let mut current = Layer::new(policy)?;
        current.push(
            ExploredState {
                state: start.clone(),
                depth: 0,
                op: None,
            },
            start.stable_hash(),
            policy,
        )?;

        for level in 1..=depth {
            if cutoff.time_exceeded() {
                debug!("explore_at_depth: time limit reached at layer {level}");
                return Ok(Vec::new());
            }
            let mut next = Layer::new(policy)?;
            for parent in &current.states {
                for op in parent.state.operations().into_iter().rev() {
                    let Some(state) = parent.state.generate(&op) else {
                        continue;
                    };
                    let hash = state.stable_hash();
                    if previous.contains(&state, hash)
                        || current.contains(&state, hash)
                        || next.contains(&state, hash)
                    {
                        continue;
                    }
                    let explored = ExploredState {
                        state,
                        depth: level,
                        op: Some(op),
                    };
                    next.push(explored, hash, policy)?;
                }
            }
            if next.states.is_empty() {
                return Ok(Vec::new());
            }
            previous = std::mem::replace(&mut current, next);
        }

        Ok(current.states)
    }
}

/// One breadth-first layer: its states plus a hash index into them.
struct Layer<S: SearchState> {
    states: Vec<ExploredState<S>>,
    index: ChainedHashSet<usize>,
}

impl<S: SearchState> Layer<S> {
    fn new(policy: &SearchPolicy) -> Result<Self, SearchError> {
        let index = ChainedHashSet::with_growth(
            policy.bucket_count,
            policy.closed_capacity,
            policy.grow_closed_set,
        )
        .map_err(|err| SearchError::from_collection(Structure::ClosedSet, err))?;
        Ok(Self {
            states: Vec::new(),
            index,
        })
    }

    fn contains(&self, state: &S, hash: u32) -> bool {
        self.index
            .contains_by(hash, |&i| self.states[i].state.is_equal(state))
    }

    fn push(
        &mut self,
        explored: ExploredState<S>,
        hash: u32,
        policy: &SearchPolicy,
    ) -> Result<(), SearchError> {
        if self.states.len() >= policy.frontier_capacity {
            return Err(SearchError::CapacityExceeded {
                structure: Structure::Frontier,
                capacity: policy.frontier_capacity,
            });
        }
        let Self { states, index } = self;
        index
            .add_by(hash, states.len(), |&i| states[i].state.is_equal(&explored.state))
            .map_err(|err| SearchError::from_collection(Structure::ClosedSet, err))?;
        states.push(explored);
        Ok(())
    }
}

fn enqueue<S: SearchState>(
    frontier: &mut MinHeap<FrontierEntry>,
    arena: &NodeArena<S>,
    id: NodeId,
) -> Result<(), SearchError> {
    frontier
        .insert(FrontierEntry::new(arena.get(id).rank, id))
        .map_err(|err| SearchError::from_collection(Structure::Frontier, err))
}
