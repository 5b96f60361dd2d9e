//! Breadth-first search, unidirectional or bidirectional.

use lodestar_kernel::capability::SearchState;

use crate::best_first::{self, Ranking};
use crate::bidirectional;
use crate::error::SearchError;
use crate::node::SearchNode;
use crate::outcome::SearchResult;
use crate::policy::SearchPolicy;
use crate::session::{PathSearch, Session};

/// Depth-ordered ranking: the frontier is a FIFO by layer.
struct LayerRanking;

impl<S: SearchState> Ranking<S> for LayerRanking {
    fn root_costs(&self, _start: &S, _finish: &S, _param: i32) -> (i64, i64) {
        (0, 0)
    }

    fn child_costs(&self, parent: &SearchNode<S>, _child: &S, _finish: &S, _param: i32) -> (i64, i64) {
        (i64::from(parent.depth) + 1, 0)
    }

    fn rank(&self, _g: i64, _h: i64, depth: u32) -> i64 {
        i64::from(depth)
    }
}

#[derive(Debug)]
pub struct Bfs<S> {
    session: Session<S>,
    bidirectional: bool,
}

impl<S: SearchState> Bfs<S> {
    /// A unidirectional BFS.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        Ok(Self {
            session: Session::new(policy)?,
            bidirectional: false,
        })
    }

    /// Search from both ends at once. Requires every move to be reversible
    /// by some operation of the reached state.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn set_bidirectional(&mut self, bidirectional: bool) -> Result<(), SearchError> {
        self.session.ensure_idle("search direction")?;
        self.bidirectional = bidirectional;
        Ok(())
    }

    #[must_use]
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }
}

impl<S: SearchState> PathSearch<S> for Bfs<S> {
    fn name(&self) -> &'static str {
        if self.bidirectional {
            "bidirectional_bfs"
        } else {
            "bfs"
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
        if self.bidirectional {
            bidirectional::run(start, finish, policy)
        } else {
            best_first::run(&LayerRanking, start, finish, policy)
        }
    }
}
