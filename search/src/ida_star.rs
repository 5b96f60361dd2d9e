//! Iterative-deepening A*.
//!
//! Each iteration is a depth-first pass over a bounded stack that only
//! admits successors with `g + h <= bound`. The first bound is `h(start)`;
//! each following bound is the smallest `g + h` that exceeded the previous
//! one. When an iteration exceeds nothing, the space within reach is
//! exhausted.
//!
//! Within one iteration a closed set keyed by state keeps the lowest `g`
//! seen; a state reached again at a strictly lower `g` replaces its entry
//! and is pushed again. Stack entries superseded that way are skipped at
//! pop. Costs are accumulated exactly as in [`crate::astar`].

use log::{debug, trace};

use lodestar_kernel::capability::InformedState;
use lodestar_kernel::collections::BoundedStack;

use crate::closed::ClosedSet;
use crate::cutoff::Cutoff;
use crate::error::{SearchError, Structure};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::outcome::{reconstruct_path, SearchResult, SearchStats, TerminationReason};
use crate::policy::SearchPolicy;
use crate::session::{PathSearch, Session};

#[derive(Debug)]
pub struct IdaStar<S> {
    session: Session<S>,
}

impl<S: InformedState> IdaStar<S> {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            session: Session::new(policy)?,
        })
    }
}

enum Iteration<S: InformedState> {
    Done(SearchResult<S>),
    Raise(i64),
    Exhausted,
}

fn run<S: InformedState>(start: &S, finish: &S, policy: &SearchPolicy) -> Result<SearchResult<S>, SearchError> {
    let cutoff = Cutoff::start(policy);
    let mut stats = SearchStats::new(policy.heuristic_param);
    let mut bound = i64::from(start.heuristic_distance(finish, policy.heuristic_param));

    loop {
        match iterate(start, finish, policy, bound, &cutoff, &mut stats)? {
            Iteration::Done(result) => return Ok(result),
            Iteration::Raise(next) => {
                debug!("ida*: bound {bound} -> {next}");
                bound = next;
            }
            Iteration::Exhausted => {
                stats.elapsed = cutoff.elapsed();
                return Ok(SearchResult::exhausted(stats));
            }
        }
    }
}

fn iterate<S: InformedState>(
    start: &S,
    finish: &S,
    policy: &SearchPolicy,
    bound: i64,
    cutoff: &Cutoff,
    stats: &mut SearchStats,
) -> Result<Iteration<S>, SearchError> {
    let param = policy.heuristic_param;
    let mut arena = NodeArena::new();
    let mut closed = ClosedSet::new(policy)?;
    let mut stack = BoundedStack::new(policy.frontier_capacity);
    let mut exceeded: Option<i64> = None;

    let h = i64::from(start.heuristic_distance(finish, param));
    let root = arena.push(SearchNode::root(start.clone(), 0, h, h));
    push(&mut stack, root)?;
    closed.insert(&arena, root)?;
    stats.generated_nodes += 1;

    while !stack.is_empty() {
        stats.observe(stack.len(), closed.len());
        let Some(current) = stack.pop() else {
            break;
        };
        stats.searched_nodes += 1;

        let node = arena.get(current);
        if closed
            .find(&arena, &node.state, node.hash)
            .is_some_and(|best| best != current)
        {
            continue;
        }
        let termination = if node.state.is_equal(finish) {
            Some(TerminationReason::GoalReached)
        } else {
            cutoff.check(node.depth)
        };
        if let Some(termination) = termination {
            stats.elapsed = cutoff.elapsed();
            return Ok(Iteration::Done(SearchResult {
                path: Some(reconstruct_path(&arena, current)),
                stats: stats.clone(),
                termination,
            }));
        }

        let parent = arena.get(current).clone();
        for op in parent.state.operations().into_iter().rev() {
            let Some(state) = parent.state.generate(&op) else {
                continue;
            };
            stats.generated_nodes += 1;
            let step = i64::from(state.heuristic_distance(&parent.state, param));
            let g = parent.g.saturating_add(step);
            let h = i64::from(state.heuristic_distance(finish, param));
            let f = g.saturating_add(h);
            if f > bound {
                exceeded = Some(exceeded.map_or(f, |min| min.min(f)));
                continue;
            }
            if let Some(existing) = closed.find(&arena, &state, state.stable_hash()) {
                if g >= arena.get(existing).g {
                    continue;
                }
            }
            let child = arena.push(SearchNode::child(state, current, op, parent.depth + 1, g, h, f));
            closed.replace(&arena, child)?;
            push(&mut stack, child)?;
            stats.generated_unique_nodes += 1;
        }
        trace!("ida*: expanded depth {} under bound {bound}", parent.depth);
    }

    Ok(match exceeded {
        Some(next) => Iteration::Raise(next),
        None => Iteration::Exhausted,
    })
}

fn push(stack: &mut BoundedStack<NodeId>, id: NodeId) -> Result<(), SearchError> {
    stack
        .push(id)
        .map_err(|err| SearchError::from_collection(Structure::Stack, err))
}

impl<S: InformedState> PathSearch<S> for IdaStar<S> {
    fn name(&self) -> &'static str {
        "ida_star"
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
        run(start, finish, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::AStar;
    use crate::node::test_states::{Line, Vertex};

    const EDGES: &[&[usize]] = &[&[2, 1], &[3], &[4], &[], &[3]];
    const H: &[u32] = &[2, 1, 2, 0, 1];

    fn ida<S: InformedState>(start: S, finish: S, policy: SearchPolicy) -> IdaStar<S> {
        let mut search = IdaStar::new(policy).unwrap();
        search.set_start(start).unwrap();
        search.set_finish(finish).unwrap();
        search
    }

    #[test_log::test]
    fn finds_shortest_path() {
        let mut search = ida(
            Vertex::new(0, EDGES, H),
            Vertex::new(3, EDGES, H),
            SearchPolicy::default(),
        );
        let result = search.find_path().unwrap();
        assert!(result.is_goal_reached());
        let ids: Vec<usize> = result.path.unwrap().states.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn matches_astar_length_on_a_line() {
        for (from, to) in [(0, 7), (7, 0), (3, 3)] {
            let mut a = AStar::new(SearchPolicy::default()).unwrap();
            a.set_start(Line { pos: from, len: 8 }).unwrap();
            a.set_finish(Line { pos: to, len: 8 }).unwrap();
            let mut i = ida(Line { pos: from, len: 8 }, Line { pos: to, len: 8 }, SearchPolicy::default());

            let expected = a.find_path().unwrap().path.unwrap().moves();
            let path = i.find_path().unwrap().path.unwrap();
            assert_eq!(path.moves(), expected);
            assert!(path.is_consistent());
        }
    }

    #[test]
    fn bound_grows_when_heuristic_underestimates() {
        // h(start) = 1 against a true distance of 2: bounds 1 then 2.
        const LOW: &[u32] = &[1, 1, 1, 0, 1];
        let mut search = ida(
            Vertex::new(0, EDGES, LOW),
            Vertex::new(3, EDGES, LOW),
            SearchPolicy::default(),
        );
        let result = search.find_path().unwrap();
        assert!(result.is_goal_reached());
        assert_eq!(result.path.unwrap().moves(), 2);
        // First pass pops only the root; second pops 0, 2, 1, 3.
        assert_eq!(result.stats.searched_nodes, 5);
    }

    #[test]
    fn unreachable_goal_exhausts() {
        let mut search = ida(
            Vertex::new(3, EDGES, H),
            Vertex::new(0, EDGES, H),
            SearchPolicy::default(),
        );
        let result = search.find_path().unwrap();
        assert_eq!(result.termination, TerminationReason::Exhausted);
        assert!(result.path.is_none());
    }

    #[test]
    fn depth_cutoff_stops_deepening() {
        let mut search = ida(
            Line { pos: 0, len: 30 },
            Line { pos: 29, len: 30 },
            SearchPolicy {
                max_depth: Some(2),
                ..SearchPolicy::default()
            },
        );
        let result = search.find_path().unwrap();
        assert_eq!(result.termination, TerminationReason::DepthCutoff);
        assert!(result.path.unwrap().is_consistent());
    }
}
