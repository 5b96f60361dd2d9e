//! Depth-first search over a bounded stack.
//!
//! A state is closed when it is popped, not when it is generated, so the
//! stack may hold several entries for one state; entries whose state is
//! already closed are skipped at pop. The children of one expansion are
//! ordered through a max-heap on `depth + h` before being pushed, which
//! puts the most promising child on top.
//!
//! With [`Dfs::set_use_better_path`] a closed state reached again at a
//! strictly lower `depth + h` is removed from the closed set and pushed
//! again, so it is re-expanded from the better parent.

use log::trace;

use lodestar_kernel::capability::InformedState;
use lodestar_kernel::collections::{BoundedStack, MaxHeap};

use crate::closed::ClosedSet;
use crate::cutoff::Cutoff;
use crate::error::{SearchError, Structure};
use crate::node::{FrontierEntry, NodeArena, NodeId, SearchNode};
use crate::outcome::{reconstruct_path, SearchResult, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;
use crate::session::{PathSearch, Session};

#[derive(Debug)]
pub struct Dfs<S> {
    session: Session<S>,
    use_better_path: bool,
}

impl<S: InformedState> Dfs<S> {
    /// A DFS without reopening. The stack holds at most
    /// `policy.frontier_capacity` entries.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            session: Session::new(policy)?,
            use_better_path: false,
        })
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn set_use_better_path(&mut self, use_better_path: bool) -> Result<(), SearchError> {
        self.session.ensure_idle("better-path reopening")?;
        self.use_better_path = use_better_path;
        Ok(())
    }

    #[must_use]
    pub fn uses_better_path(&self) -> bool {
        self.use_better_path
    }

    fn run(&self, start: &S, finish: &S, policy: &SearchPolicy) -> Result<SearchResult<S>, SearchError> {
        let cutoff = Cutoff::start(policy);
        let param = policy.heuristic_param;
        let mut stats = SearchStats::new(param);
        let mut arena = NodeArena::new();
        let mut closed = ClosedSet::new(policy)?;
        let mut stack = BoundedStack::new(policy.frontier_capacity);

        let h = i64::from(start.heuristic_distance(finish, param));
        let root = arena.push(SearchNode::root(start.clone(), 0, h, h));
        push(&mut stack, root)?;
        stats.generated_nodes += 1;

        while !stack.is_empty() {
            stats.observe(stack.len(), closed.len());
            let Some(current) = stack.pop() else {
                break;
            };
            stats.searched_nodes += 1;

            let node = arena.get(current);
            if closed.contains(&arena, &node.state, node.hash) {
                continue;
            }
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
            let operations = parent.state.operations();
            let mut siblings = MaxHeap::new(operations.len());
            for op in operations.into_iter().rev() {
                let Some(state) = parent.state.generate(&op) else {
                    continue;
                };
                stats.generated_nodes += 1;
                let depth = parent.depth + 1;
                let h = i64::from(state.heuristic_distance(finish, param));
                let rank = i64::from(depth).saturating_add(h);

                if let Some(existing) = closed.find(&arena, &state, state.stable_hash()) {
                    if !self.use_better_path || rank >= arena.get(existing).rank {
                        continue;
                    }
                    closed.remove(&arena, existing);
                }

                let child = arena.push(SearchNode::child(
                    state,
                    current,
                    op,
                    depth,
                    i64::from(depth),
                    h,
                    rank,
                ));
                siblings
                    .insert(FrontierEntry::new(rank, child))
                    .map_err(|err| SearchError::from_collection(Structure::Frontier, err))?;
                stats.generated_unique_nodes += 1;
            }
            trace!(
                "expanded depth {}: {} children, stack {}",
                parent.depth,
                siblings.len(),
                stack.len()
            );
            while let Some(entry) = siblings.extract_max() {
                push(&mut stack, entry.node)?;
            }
        }

        stats.elapsed = cutoff.elapsed();
        Ok(SearchResult::exhausted(stats))
    }
}

fn push(stack: &mut BoundedStack<NodeId>, id: NodeId) -> Result<(), SearchError> {
    stack
        .push(id)
        .map_err(|err| SearchError::from_collection(Structure::Stack, err))
}

impl<S: InformedState> PathSearch<S> for Dfs<S> {
    fn name(&self) -> &'static str {
        if self.use_better_path {
            "dfs_better_path"
        } else {
            "dfs"
        }
    }

    fn session(&self) -> &Session<S> {
        &self.session
    }

    fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    fn search(
        &mut self,
        start: &S,
        finish: &S,
        policy: &SearchPolicy,
    ) -> Result<SearchResult<S>, SearchError> {
        self.run(start, finish, policy)
    }
}
