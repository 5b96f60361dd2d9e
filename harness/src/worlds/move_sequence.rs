//! `MoveSequenceEvaluator`: scores operation-index genes for any world.
//!
//! Genes are replayed from the start through
//! [`PathFitness::replay`], the same replay the evolutionary path search
//! uses, but the score only measures progress: how much closer (by
//! heuristic) the replay ends than the start was, plus a bonus for every
//! gene left unused once the finish is reached. Suitable for driving
//! [`lodestar_search::evolution::Population`] directly.

use lodestar_kernel::capability::{Equatable, Evaluator, InformedState};
use lodestar_search::evolution::{OperationGene, PathFitness};

pub struct MoveSequenceEvaluator<S: InformedState> {
    start: S,
    finish: S,
    heuristic_param: i32,
}

impl<S: InformedState> MoveSequenceEvaluator<S> {
    #[must_use]
    pub fn new(start: S, finish: S, heuristic_param: i32) -> Self {
        Self {
            start,
            finish,
            heuristic_param,
        }
    }

    /// State reached by replaying `genes`, and how many genes were left
    /// when the finish was reached (0 if it never was).
    #[must_use]
    pub fn reached(&self, genes: &[OperationGene]) -> (S, usize) {
        let replay = PathFitness::new(&self.start, &self.finish, self.heuristic_param);
        let (path, consumed) = replay.replay(genes);
        let reached = path.last().unwrap_or(&self.start).clone();
        let spare = if reached.is_equal(&self.finish) {
            genes.len() - consumed
        } else {
            0
        };
        (reached, spare)
    }
}

impl<S: InformedState> Evaluator<OperationGene> for MoveSequenceEvaluator<S> {
    fn fitness(&self, chromosome: &[OperationGene]) -> u32 {
        let (reached, spare) = self.reached(chromosome);
        let before = self.start.heuristic_distance(&self.finish, self.heuristic_param);
        let after = reached.heuristic_distance(&self.finish, self.heuristic_param);
        let spare = u32::try_from(spare).unwrap_or(u32::MAX);
        before.saturating_sub(after).saturating_add(spare)
    }
}
