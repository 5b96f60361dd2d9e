//! Bidirectional breadth-first search.
//!
//! Two frontier/closed-set pairs share one node arena: forward from the
//! start, backward from the finish. Each step advances whichever side's
//! shallowest frontier node is not deeper than the other's. Backward nodes
//! are generated with the ordinary forward operations, so a backward parent
//! link records "this state was reached from the parent", not the move that
//! leads toward the finish. [`splice`] re-discovers those moves.
//!
//! The run ends when a popped node's state is already in the opposite
//! closed set. The opposite side does not move while one layer drains, so
//! the rest of the popped layer is scanned for a shallower match before the
//! path is built; the result is as short as unidirectional BFS.
//!
//! Each direction gets half of the policy's capacities.

use log::{debug, trace};

use lodestar_kernel::capability::SearchState;
use lodestar_kernel::collections::MinHeap;

use crate::closed::ClosedSet;
use crate::cutoff::Cutoff;
use crate::error::{SearchError, Structure};
use crate::node::{FrontierEntry, NodeArena, NodeId, SearchNode};
use crate::outcome::{reconstruct_path, GeneratedPath, SearchResult, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

struct Side {
    frontier: MinHeap<FrontierEntry>,
    closed: ClosedSet,
}

impl Side {
    fn new(policy: &SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            frontier: MinHeap::new(policy.frontier_capacity),
            closed: ClosedSet::new(policy)?,
        })
    }

    fn min_depth(&self) -> Option<i64> {
        self.frontier.peek_min().map(|entry| entry.key)
    }

    fn admit<S: SearchState>(&mut self, arena: &NodeArena<S>, id: NodeId) -> Result<(), SearchError> {
        self.frontier
            .insert(FrontierEntry::new(arena.get(id).rank, id))
            .map_err(|err| SearchError::from_collection(Structure::Frontier, err))?;
        self.closed.insert(arena, id)?;
        Ok(())
    }
}

/// Run one bidirectional search.
pub(crate) fn run<S: SearchState>(
    start: &S,
    finish: &S,
    policy: &SearchPolicy,
) -> Result<SearchResult<S>, SearchError> {
    let cutoff = Cutoff::start(policy);
    let half = policy.halved();
    let mut stats = SearchStats::new(policy.heuristic_param);
    let mut arena = NodeArena::new();
    let mut forward = Side::new(&half)?;
    let mut backward = Side::new(&half)?;

    let forward_root = arena.push(SearchNode::root(start.clone(), 0, 0, 0));
    forward.admit(&arena, forward_root)?;
    let backward_root = arena.push(SearchNode::root(finish.clone(), 0, 0, 0));
    backward.admit(&arena, backward_root)?;
    stats.generated_nodes += 2;

    loop {
        let direction = match (forward.min_depth(), backward.min_depth()) {
            (None, None) => break,
            (Some(f), Some(b)) if f <= b => Direction::Forward,
            (Some(_), None) => Direction::Forward,
            _ => Direction::Backward,
        };
        stats.observe(
            forward.frontier.len() + backward.frontier.len(),
            forward.closed.len() + backward.closed.len(),
        );
        let (side, other) = match direction {
            Direction::Forward => (&mut forward, &backward),
            Direction::Backward => (&mut backward, &forward),
        };
        let Some(entry) = side.frontier.extract_min() else {
            break;
        };
        let current = entry.node;
        stats.searched_nodes += 1;

        if let Some(meet) = opposite(&other.closed, &arena, current) {
            let (here, there) = shallowest_meeting(side, other, &arena, (current, meet));
            let (f, b) = match direction {
                Direction::Forward => (here, there),
                Direction::Backward => (there, here),
            };
            debug!(
                "bidirectional: sides met at forward depth {} backward depth {}",
                arena.get(f).depth,
                arena.get(b).depth
            );
            let path = splice(&arena, f, b)?;
            stats.elapsed = cutoff.elapsed();
            return Ok(SearchResult {
                path: Some(path),
                stats,
                termination: TerminationReason::GoalReached,
            });
        }

        if let Some(termination) = cutoff.check(arena.get(current).depth) {
            let best_forward = match direction {
                Direction::Forward => current,
                Direction::Backward => other
                    .frontier
                    .peek_min()
                    .map_or(forward_root, |entry| entry.node),
            };
            stats.elapsed = cutoff.elapsed();
            return Ok(SearchResult {
                path: Some(reconstruct_path(&arena, best_forward)),
                stats,
                termination,
            });
        }

        side.closed.insert(&arena, current)?;

        let parent = arena.get(current).clone();
        for op in parent.state.operations().into_iter().rev() {
            let Some(state) = parent.state.generate(&op) else {
                continue;
            };
            stats.generated_nodes += 1;
            if side.closed.contains(&arena, &state, state.stable_hash()) {
                continue;
            }
            let depth = parent.depth + 1;
            let child = arena.push(SearchNode::child(
                state,
                current,
                op,
                depth,
                i64::from(depth),
                0,
                i64::from(depth),
            ));
            side.admit(&arena, child)?;
            stats.generated_unique_nodes += 1;
        }
        trace!(
            "{direction:?} expanded depth {}, frontier {}",
            parent.depth,
            side.frontier.len()
        );
    }

    stats.elapsed = cutoff.elapsed();
    Ok(SearchResult::exhausted(stats))
}

/// The opposite side's node for `id`'s state, if that side has seen it.
fn opposite<S: SearchState>(closed: &ClosedSet, arena: &NodeArena<S>, id: NodeId) -> Option<NodeId> {
    let node = arena.get(id);
    closed.find(arena, &node.state, node.hash)
}

/// Among the popped node and the rest of its frontier layer, the meeting
/// pair with the shallowest opposite node.
fn shallowest_meeting<S: SearchState>(
    side: &Side,
    other: &Side,
    arena: &NodeArena<S>,
    found: (NodeId, NodeId),
) -> (NodeId, NodeId) {
    let layer = arena.get(found.0).rank;
    side.frontier
        .iter()
        .filter(|entry| entry.key == layer)
        .filter_map(|entry| opposite(&other.closed, arena, entry.node).map(|meet| (entry.node, meet)))
        .fold(found, |best, candidate| {
            if arena.get(candidate.1).depth < arena.get(best.1).depth {
                candidate
            } else {
                best
            }
        })
}

/// Join the forward chain ending at `forward` to the backward chain ending
/// at `backward`; both nodes must wrap the same state.
///
/// For each backward link the connecting move is found by trying the
/// current state's operations (last declared first) and keeping the first
/// whose successor equals the next state toward the finish.
///
/// # Errors
///
/// [`SearchError::IrreconcilablePath`] with the depth of the backward node
/// whose link no operation can reproduce.
pub(crate) fn splice<S: SearchState>(
    arena: &NodeArena<S>,
    forward: NodeId,
    backward: NodeId,
) -> Result<GeneratedPath<S>, SearchError> {
    let mut path = reconstruct_path(arena, forward);
    let mut current = arena.get(forward).state.clone();
    let mut link = arena.get(backward);
    while let Some(parent) = link.parent {
        let toward_finish = &arena.get(parent).state;
        let (op, next) = current
            .operations()
            .into_iter()
            .rev()
            .find_map(|op| {
                current
                    .generate(&op)
                    .filter(|next| next.is_equal(toward_finish))
                    .map(|next| (op, next))
            })
            .ok_or(SearchError::IrreconcilablePath { depth: link.depth })?;
        path.push(op, next.clone());
        current = next;
        link = arena.get(parent);
    }
    Ok(path)
}
