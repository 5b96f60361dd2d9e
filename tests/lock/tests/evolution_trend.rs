//! The genetic engine makes progress on open worlds: elites keep the best
//! score from regressing, and the population as a whole improves.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use lodestar_harness::contract::SearchFixture;
use lodestar_harness::worlds::grid::GridFixture;
use lodestar_harness::worlds::move_sequence::MoveSequenceEvaluator;
use lodestar_harness::worlds::n_puzzle::{NPuzzle, PuzzleMove};
use lodestar_kernel::capability::{Equatable, Generative};
use lodestar_search::evolution::{EvolutionConfig, EvolutionError, OperationGene, Population};
use lodestar_search::{EvolutionPathSearch, SearchError, TerminationReason};

const FIELD: &str = "
    S.......
    ........
    ........
    ........
    ........
    ........
    ........
    .......G
";

fn config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 80,
        chromosome_length: 30,
        generations: 30,
        ..EvolutionConfig::default()
    }
}

#[test]
fn best_fitness_never_regresses() {
    let fixture = GridFixture::parse("field", FIELD).unwrap();
    let evaluator = MoveSequenceEvaluator::new(fixture.start(), fixture.finish(), 0);
    let mut rng = SmallRng::seed_from_u64(17);
    let mut population: Population<OperationGene> = Population::new(config()).unwrap();
    population.initialize_random_population(&mut rng);
    population.evaluate_population_fitness(&evaluator).unwrap();

    let mut best = population.best().unwrap().fitness();
    for _ in 0..config().generations {
        population.generate_new_generation(&mut rng).unwrap();
        population.evaluate_population_fitness(&evaluator).unwrap();
        let now = population.best().unwrap().fitness();
        assert!(now >= best, "best fell from {best} to {now}");
        best = now;
        assert_eq!(population.chromosomes().len(), config().population_size);
    }
    assert_eq!(population.generation(), config().generations);
}

#[test]
fn population_total_trends_upward() {
    let fixture = GridFixture::parse("field", FIELD).unwrap();
    let evaluator = MoveSequenceEvaluator::new(fixture.start(), fixture.finish(), 0);
    let mut improved = 0;
    for seed in 0..6 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut population = Population::new(config()).unwrap();
        let outcome = population.evolve(&evaluator, &mut rng).unwrap();
        let history = &outcome.fitness_history;
        assert_eq!(history.len(), 1 + config().generations as usize);
        assert_eq!(outcome.evaluations, 80 * 31);
        let tail = &history[history.len() - 5..];
        let mean = tail.iter().sum::<u64>() / 5;
        if mean > history[0] {
            improved += 1;
        }
    }
    assert!(improved >= 5, "only {improved} of 6 seeds improved");
}

#[test]
fn evolved_puzzle_path_replays_and_solves_a_short_scramble() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let start = goal
        .generate(&PuzzleMove::Left)
        .and_then(|b| b.generate(&PuzzleMove::Up))
        .unwrap();

    let mut search = EvolutionPathSearch::new(EvolutionConfig {
        population_size: 100,
        chromosome_length: 12,
        generations: 40,
        ..EvolutionConfig::default()
    })
    .unwrap();
    search.set_start(start.clone()).unwrap();
    search.set_finish(goal.clone()).unwrap();
    search.set_heuristic_param(3).unwrap();
    let result = search.find_path(&mut SmallRng::seed_from_u64(5)).unwrap();

    assert_eq!(result.termination, TerminationReason::GoalReached);
    let path = result.path.unwrap();
    assert!(path.states[0].is_equal(&start));
    assert!(path.last().is_some_and(|last| last.is_equal(&goal)));
    for (pair, op) in path.states.windows(2).zip(&path.operations[1..]) {
        let next = pair[0].generate(op.as_ref().unwrap()).unwrap();
        assert!(next.is_equal(&pair[1]));
    }
    assert_eq!(result.stats.searched_nodes, 100 * 41);
}

#[test]
fn evolution_search_rejects_missing_finish() {
    let mut search: EvolutionPathSearch<NPuzzle> =
        EvolutionPathSearch::new(EvolutionConfig::default()).unwrap();
    search.set_start(NPuzzle::goal(3, 3).unwrap()).unwrap();
    let err = search.find_path(&mut SmallRng::seed_from_u64(1)).unwrap_err();
    assert!(
        matches!(err, EvolutionError::Search(SearchError::InvalidState { .. })),
        "{err}"
    );
}
