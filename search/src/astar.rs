//! A* search.
//!
//! `g` accumulates the heuristic distance between each successor and its
//! parent, so states whose heuristic is exact between neighbours get true
//! edge costs. Frontier key is `g + h`. A closed state is reopened when a
//! strictly lower `g + h` reaches it.

use lodestar_kernel::capability::InformedState;

use crate::best_first::{self, Ranking};
use crate::error::SearchError;
use crate::node::SearchNode;
use crate::outcome::SearchResult;
use crate::policy::SearchPolicy;
use crate::session::{PathSearch, Session};

struct AStarRanking;

impl<S: InformedState> Ranking<S> for AStarRanking {
    fn root_costs(&self, start: &S, finish: &S, param: i32) -> (i64, i64) {
        (0, i64::from(start.heuristic_distance(finish, param)))
    }

    fn child_costs(&self, parent: &SearchNode<S>, child: &S, finish: &S, param: i32) -> (i64, i64) {
        let step = i64::from(child.heuristic_distance(&parent.state, param));
        (
            parent.g.saturating_add(step),
            i64::from(child.heuristic_distance(finish, param)),
        )
    }

    fn rank(&self, g: i64, h: i64, _depth: u32) -> i64 {
        g.saturating_add(h)
    }

    fn reopens(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct AStar<S> {
    session: Session<S>,
}

impl<S: InformedState> AStar<S> {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            session: Session::new(policy)?,
        })
    }
}

impl<S: InformedState> PathSearch<S> for AStar<S> {
    fn name(&self) -> &'static str {
        "astar"
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
        best_first::run(&AStarRanking, start, finish, policy)
    }
}
