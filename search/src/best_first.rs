//! Heap-ordered expansion loop shared by A*, Greedy and BFS.
//!
//! The algorithms differ only in how a node is costed and ranked, and in
//! whether a closed state may be reopened at a better rank. Both are
//! supplied through [`Ranking`].
//!
//! There is no decrease-key. A reopened state gets a second frontier entry;
//! when the older entry surfaces, the closed set's better node is expanded
//! in its place.

use log::trace;

use lodestar_kernel::capability::SearchState;
use lodestar_kernel::collections::MinHeap;

use crate::closed::ClosedSet;
use crate::cutoff::Cutoff;
use crate::error::{SearchError, Structure};
use crate::node::{FrontierEntry, NodeArena, NodeId, SearchNode};
use crate::outcome::{reconstruct_path, SearchResult, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;

/// Costing and ordering rule of a best-first algorithm.
pub(crate) trait Ranking<S: SearchState> {
    /// `(g, h)` of the start node.
    fn root_costs(&self, start: &S, finish: &S, param: i32) -> (i64, i64);

    /// `(g, h)` of `child`, generated from `parent`.
    fn child_costs(&self, parent: &SearchNode<S>, child: &S, finish: &S, param: i32) -> (i64, i64);

    /// Frontier key. Lower pops first.
    fn rank(&self, g: i64, h: i64, depth: u32) -> i64;

    /// Reopen a closed state when a strictly lower rank reaches it.
    fn reopens(&self) -> bool {
        false
    }
}

/// Run one best-first search from `start` to `finish`.
pub(crate) fn run<S, R>(
    rule: &R,
    start: &S,
    finish: &S,
    policy: &SearchPolicy,
) -> Result<SearchResult<S>, SearchError>
where
    S: SearchState,
    R: Ranking<S>,
{
    let cutoff = Cutoff::start(policy);
    let param = policy.heuristic_param;
    let mut stats = SearchStats::new(param);
    let mut arena = NodeArena::new();
    let mut closed = ClosedSet::new(policy)?;
    let mut frontier = MinHeap::new(policy.frontier_capacity);

    let (g, h) = rule.root_costs(start, finish, param);
    let root = arena.push(SearchNode::root(start.clone(), g, h, rule.rank(g, h, 0)));
    push(&mut frontier, &arena, root)?;
    closed.insert(&arena, root)?;
    stats.generated_nodes += 1;

    while !frontier.is_empty() {
        stats.observe(frontier.len(), closed.len());
        let Some(entry) = frontier.extract_min() else {
            break;
        };
        let mut current = entry.node;
        if rule.reopens() {
            current = reconcile(&closed, &arena, current);
        }
        stats.searched_nodes += 1;

        let node = arena.get(current);
        let termination = if node.state.is_equal(finish) {
            Some(TerminationReason::GoalReached)
        } else {
            cutoff.check(node.depth)
        };
        if let Some(termination) = termination {
            stats.elapsed = cutoff.elapsed();
            return Ok(SearchResult {
                path: Some(reconstruct_path(&arena, current)),
                stats,
                termination,
            });
        }

        closed.insert(&arena, current)?;

        let parent = arena.get(current).clone();
        let mut admitted = 0_u32;
        for op in parent.state.operations().into_iter().rev() {
            let Some(state) = parent.state.generate(&op) else {
                continue;
            };
            stats.generated_nodes += 1;
            let (g, h) = rule.child_costs(&parent, &state, finish, param);
            let depth = parent.depth + 1;
            let rank = rule.rank(g, h, depth);
            let hash = state.stable_hash();

            let existing = closed.find(&arena, &state, hash);
            if let Some(existing) = existing {
                if !rule.reopens() || rank >= arena.get(existing).rank {
                    continue;
                }
            }

            let child = arena.push(SearchNode::child(state, current, op, depth, g, h, rank));
            push(&mut frontier, &arena, child)?;
            if existing.is_some() {
                closed.replace(&arena, child)?;
            } else {
                closed.insert(&arena, child)?;
            }
            stats.generated_unique_nodes += 1;
            admitted += 1;
        }
        trace!(
            "expanded depth {} rank {}: {admitted} admitted, frontier {}",
            parent.depth,
            parent.rank,
            frontier.len()
        );
    }

    stats.elapsed = cutoff.elapsed();
    Ok(SearchResult::exhausted(stats))
}

/// The node to expand for a popped entry: the closed set's node for the
/// same state if it carries a strictly better rank.
fn reconcile<S: SearchState>(closed: &ClosedSet, arena: &NodeArena<S>, popped: NodeId) -> NodeId {
    let node = arena.get(popped);
    match closed.find(arena, &node.state, node.hash) {
        Some(best) if arena.get(best).rank < node.rank => best,
        _ => popped,
    }
}

fn push<S: SearchState>(
    frontier: &mut MinHeap<FrontierEntry>,
    arena: &NodeArena<S>,
    id: NodeId,
) -> Result<(), SearchError> {
    frontier
        .insert(FrontierEntry::new(arena.get(id).rank, id))
        .map_err(|err| SearchError::from_collection(Structure::Frontier, err))
}
