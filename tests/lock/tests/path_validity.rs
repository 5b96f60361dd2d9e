//! Every returned path starts at the start state, replays operation by
//! operation, and (on goal) ends at the finish.

use lodestar_harness::contract::SearchFixture;
use lodestar_harness::runner::{search, AlgorithmKind, RunnerError};
use lodestar_harness::worlds::grid::GridFixture;
use lodestar_harness::worlds::n_puzzle::{NPuzzle, PuzzleFixture, PuzzleMove, HEURISTIC_LINEAR_CONFLICT};
use lodestar_harness::worlds::weighted_graph::{GraphFixture, WeightedGraph};
use lodestar_kernel::capability::{Equatable, Generative, InformedState};
use lodestar_search::{SearchError, SearchPolicy, SearchResult, TerminationReason};

fn roomy_policy() -> SearchPolicy {
    SearchPolicy {
        frontier_capacity: 600_000,
        closed_capacity: 200_000,
        bucket_count: 4096,
        grow_closed_set: true,
        ..SearchPolicy::default()
    }
}

fn assert_valid<S: InformedState + std::fmt::Debug>(
    label: &str,
    result: &SearchResult<S>,
    start: &S,
    finish: &S,
) {
    assert_eq!(result.termination, TerminationReason::GoalReached, "{label}");
    let path = result.path.as_ref().unwrap_or_else(|| panic!("{label}: no path"));
    assert!(path.states[0].is_equal(start), "{label}: path does not begin at start");
    assert_eq!(path.operations[0], None, "{label}");
    for i in 1..path.len() {
        let op = path.operations[i]
            .as_ref()
            .unwrap_or_else(|| panic!("{label}: missing op {i}"));
        let replayed = path.states[i - 1]
            .generate(op)
            .unwrap_or_else(|| panic!("{label}: op {i} not applicable"));
        assert!(replayed.is_equal(&path.states[i]), "{label}: op {i} diverges");
    }
    assert!(path.last().is_some_and(|last| last.is_equal(finish)), "{label}");
}

fn check_fixture<F>(fixture: &F, algorithms: &[AlgorithmKind])
where
    F: SearchFixture,
    F::State: std::fmt::Debug + 'static,
{
    let policy = SearchPolicy {
        heuristic_param: fixture.heuristic_param(),
        ..roomy_policy()
    };
    for &algorithm in algorithms {
        let start = fixture.start();
        let finish = fixture.finish();
        let result = search(algorithm, start.clone(), finish.clone(), policy.clone()).unwrap();
        let label = format!("{} {algorithm}", fixture.fixture_id());
        assert_valid(&label, &result, &start, &finish);
    }
}

#[test]
fn puzzle_paths_replay_for_every_algorithm() {
    for seed in [1, 2, 3] {
        let fixture = PuzzleFixture::scrambled(3, 3, 10, seed).unwrap();
        check_fixture(&fixture, &AlgorithmKind::ALL);
    }
}

#[test]
fn grid_paths_replay_for_every_algorithm() {
    let fixture = GridFixture::parse(
        "spiral",
        "
        S.........
        #########.
        ..........
        .#########
        .........G
        ",
    )
    .unwrap();
    check_fixture(&fixture, &AlgorithmKind::ALL);
}

#[test]
fn weighted_graph_paths_replay() {
    let mut graph = WeightedGraph::new(6, 5, vec![3, 2, 2, 1, 1, 0]).unwrap();
    graph.add_undirected(0, 1, 1).unwrap();
    graph.add_undirected(0, 2, 2).unwrap();
    graph.add_undirected(1, 3, 2).unwrap();
    graph.add_undirected(2, 4, 1).unwrap();
    graph.add_undirected(3, 5, 1).unwrap();
    graph.add_undirected(4, 5, 3).unwrap();
    let fixture = GraphFixture::new("six", graph, 0).unwrap();
    check_fixture(&fixture, &AlgorithmKind::ALL);
}

#[test]
fn two_move_puzzle_scramble_solves_in_two_moves() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let start = goal
        .generate(&PuzzleMove::Up)
        .and_then(|b| b.generate(&PuzzleMove::Left))
        .unwrap();
    let policy = SearchPolicy {
        heuristic_param: HEURISTIC_LINEAR_CONFLICT,
        ..SearchPolicy::default()
    };
    let result = search(AlgorithmKind::AStar, start.clone(), goal.clone(), policy).unwrap();
    assert_valid("two-move", &result, &start, &goal);
    let path = result.path.unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(
        path.operations,
        vec![None, Some(PuzzleMove::Right), Some(PuzzleMove::Down)]
    );
}

#[test]
fn start_equal_to_finish_is_a_single_state_path() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    for algorithm in AlgorithmKind::ALL {
        let result = search(algorithm, goal.clone(), goal.clone(), SearchPolicy::default()).unwrap();
        assert!(result.is_goal_reached(), "{algorithm}");
        let path = result.path.unwrap();
        assert_eq!(path.len(), 1, "{algorithm}");
        assert_eq!(path.operations, vec![None], "{algorithm}");
    }
}

#[test]
fn one_way_edge_defeats_only_the_bidirectional_search() {
    // 1 -> 0 exists, 0 -> 1 does not.
    let mut graph = WeightedGraph::new(2, 1, vec![0, 0]).unwrap();
    graph.add_edge(1, 0, 1).unwrap();
    let fixture = GraphFixture::new("one_way", graph, 0).unwrap();

    let err = search(
        AlgorithmKind::BidirectionalBfs,
        fixture.start(),
        fixture.finish(),
        SearchPolicy::default(),
    )
    .unwrap_err();
    assert!(
        matches!(
            err,
            RunnerError::Search(SearchError::IrreconcilablePath { depth: 1 })
        ),
        "{err}"
    );

    let result = search(
        AlgorithmKind::Bfs,
        fixture.start(),
        fixture.finish(),
        SearchPolicy::default(),
    )
    .unwrap();
    assert_eq!(result.termination, TerminationReason::Exhausted);
    assert!(result.path.is_none());
}
