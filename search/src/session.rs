//! Session phase guard shared by every search algorithm.
//!
//! A session is `Idle` until [`PathSearch::find_path`] runs. Success,
//! cutoff and exhaustion return it to `Idle`. A capacity failure leaves it
//! `Running`: configuration is locked and another `find_path` is refused
//! until [`PathSearch::reset_processing`] is called.

use log::debug;

use lodestar_kernel::capability::SearchState;

use crate::error::SearchError;
use crate::outcome::SearchResult;
use crate::policy::SearchPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Start/finish states and policy, locked while a search runs.
#[derive(Debug, Clone)]
pub struct Session<S> {
    start: Option<S>,
    finish: Option<S>,
    policy: SearchPolicy,
    phase: Phase,
}

impl<S: Clone> Session<S> {
    /// An idle session with no start or finish state.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self {
            start: None,
            finish: None,
            policy,
            phase: Phase::Idle,
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn start(&self) -> Option<&S> {
        self.start.as_ref()
    }

    #[must_use]
    pub fn finish(&self) -> Option<&S> {
        self.finish.as_ref()
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn set_start(&mut self, start: S) -> Result<(), SearchError> {
        self.ensure_idle("start state")?;
        self.start = Some(start);
        Ok(())
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn set_finish(&mut self, finish: S) -> Result<(), SearchError> {
        self.ensure_idle("finish state")?;
        self.finish = Some(finish);
        Ok(())
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running, or
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn set_policy(&mut self, policy: SearchPolicy) -> Result<(), SearchError> {
        self.ensure_idle("policy")?;
        policy.validate()?;
        self.policy = policy;
        Ok(())
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn set_heuristic_param(&mut self, param: i32) -> Result<(), SearchError> {
        self.ensure_idle("heuristic parameter")?;
        self.policy.heuristic_param = param;
        Ok(())
    }

    /// Lock the session and hand out the run inputs.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidState`] if already running or if the start or
    /// finish state is missing.
    pub fn begin(&mut self) -> Result<(S, S, SearchPolicy), SearchError> {
        self.ensure_idle("search")?;
        let start = self
            .start
            .clone()
            .ok_or_else(|| SearchError::invalid_state("no start state set"))?;
        let finish = self
            .finish
            .clone()
            .ok_or_else(|| SearchError::invalid_state("no finish state set"))?;
        self.phase = Phase::Running;
        Ok((start, finish, self.policy.clone()))
    }

    /// Unlock the session.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Phase guard for an algorithm-specific switch.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    pub fn ensure_idle(&self, what: &str) -> Result<(), SearchError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Running => Err(SearchError::invalid_state(format!(
                "cannot change {what} while a search is running"
            ))),
        }
    }
}

/// Common driver for every path-finding algorithm.
///
/// Implementors provide the session accessors and [`PathSearch::search`];
/// the provided methods handle configuration and the phase transitions.
pub trait PathSearch<S: SearchState> {
    /// Short algorithm name used in logs and reports.
    fn name(&self) -> &'static str;

    fn session(&self) -> &Session<S>;

    fn session_mut(&mut self) -> &mut Session<S>;

    /// Run the algorithm once. Called with the session locked.
    ///
    /// # Errors
    ///
    /// Any [`SearchError`]; see the implementing algorithm.
    fn search(
        &mut self,
        start: &S,
        finish: &S,
        policy: &SearchPolicy,
    ) -> Result<SearchResult<S>, SearchError>;

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    fn set_start(&mut self, start: S) -> Result<(), SearchError> {
        self.session_mut().set_start(start)
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    fn set_finish(&mut self, finish: S) -> Result<(), SearchError> {
        self.session_mut().set_finish(finish)
    }

    /// # Errors
    ///
    /// See [`Session::set_policy`].
    fn set_policy(&mut self, policy: SearchPolicy) -> Result<(), SearchError> {
        self.session_mut().set_policy(policy)
    }

    /// # Errors
    ///
    /// [`SearchError::InvalidState`] while running.
    fn set_heuristic_param(&mut self, param: i32) -> Result<(), SearchError> {
        self.session_mut().set_heuristic_param(param)
    }

    /// Return to `Idle`, releasing the session lock.
    fn reset_processing(&mut self) {
        self.session_mut().reset();
    }

    /// Search from the configured start to the configured finish.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidState`] if the session is running or
    /// incomplete; [`SearchError::CapacityExceeded`] if a container fills up
    /// (the session then stays running until reset);
    /// [`SearchError::IrreconcilablePath`] from bidirectional
    /// reconstruction.
    fn find_path(&mut self) -> Result<SearchResult<S>, SearchError> {
        let (start, finish, policy) = self.session_mut().begin()?;
        debug!(
            "{}: search started (frontier {}, closed {}, heuristic {})",
            self.name(),
            policy.frontier_capacity,
            policy.closed_capacity,
            policy.heuristic_param
        );
        let outcome = self.search(&start, &finish, &policy);
        match &outcome {
            Ok(result) => {
                debug!(
                    "{}: {} after {} pops, {} generated, {} unique",
                    self.name(),
                    result.termination,
                    result.stats.searched_nodes,
                    result.stats.generated_nodes,
                    result.stats.generated_unique_nodes
                );
                self.reset_processing();
            }
            Err(err @ SearchError::CapacityExceeded { .. }) => {
                debug!("{}: {err}; session stays locked until reset", self.name());
            }
            Err(err) => {
                debug!("{}: {err}", self.name());
                self.reset_processing();
            }
        }
        outcome
    }
}
