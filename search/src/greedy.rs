//! Greedy best-first search: frontier ordered by heuristic alone.
//!
//! Closed states are never reopened, so the returned path is valid but not
//! necessarily shortest.

use lodestar_kernel::capability::InformedState;

use crate::best_first::{self, Ranking};
use crate::error::SearchError;
use crate::node::SearchNode;
use crate::outcome::SearchResult;
use crate::policy::SearchPolicy;
use crate::session::{PathSearch, Session};

struct GreedyRanking;

impl<S: InformedState> Ranking<S> for GreedyRanking {
    fn root_costs(&self, start: &S, finish: &S, param: i32) -> (i64, i64) {
        (0, i64::from(start.heuristic_distance(finish, param)))
    }

    fn child_costs(&self, parent: &SearchNode<S>, child: &S, finish: &S, param: i32) -> (i64, i64) {
        (
            i64::from(parent.depth) + 1,
            i64::from(child.heuristic_distance(finish, param)),
        )
    }

    fn rank(&self, _g: i64, h: i64, _depth: u32) -> i64 {
        h
    }
}

#[derive(Debug)]
pub struct Greedy<S> {
    session: Session<S>,
}

impl<S: InformedState> Greedy<S> {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            session: Session::new(policy)?,
        })
    }
}

impl<S: InformedState> PathSearch<S> for Greedy<S> {
    fn name(&self) -> &'static str {
        "greedy"
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
        best_first::run(&GreedyRanking, start, finish, policy)
    }
}
