//! Session phases across algorithms: capacity failure locks the session
//! until reset, configuration is refused while locked, and a reset session
//! is fully reusable.

use lodestar_harness::contract::SearchFixture;
use lodestar_harness::runner::{build, AlgorithmKind};
use lodestar_harness::worlds::n_puzzle::{NPuzzle, PuzzleFixture};
use lodestar_search::{Phase, SearchError, SearchPolicy, Structure};

fn tight_policy() -> SearchPolicy {
    SearchPolicy {
        frontier_capacity: 3,
        closed_capacity: 3,
        bucket_count: 1,
        ..SearchPolicy::default()
    }
}

#[test_log::test]
fn capacity_failure_locks_until_reset() {
    let fixture = PuzzleFixture::scrambled(3, 3, 20, 99).unwrap();
    for algorithm in AlgorithmKind::ALL {
        let mut search = build::<NPuzzle>(algorithm, tight_policy()).unwrap();
        search.set_start(fixture.start()).unwrap();
        search.set_finish(fixture.finish()).unwrap();
        search.set_heuristic_param(fixture.heuristic_param()).unwrap();

        let err = search.find_path().unwrap_err();
        assert!(
            matches!(err, SearchError::CapacityExceeded { .. }),
            "{algorithm}: {err}"
        );
        assert_eq!(search.session().phase(), Phase::Running, "{algorithm}");

        let refused = search.set_policy(SearchPolicy::default()).unwrap_err();
        assert!(matches!(refused, SearchError::InvalidState { .. }), "{algorithm}");
        let again = search.find_path().unwrap_err();
        assert!(matches!(again, SearchError::InvalidState { .. }), "{algorithm}");

        search.reset_processing();
        assert_eq!(search.session().phase(), Phase::Idle);
        search
            .set_policy(SearchPolicy {
                frontier_capacity: 600_000,
                closed_capacity: 200_000,
                grow_closed_set: true,
                bucket_count: 4096,
                heuristic_param: fixture.heuristic_param(),
                ..SearchPolicy::default()
            })
            .unwrap();
        let result = search.find_path().unwrap();
        assert!(result.is_goal_reached(), "{algorithm}");
        assert_eq!(search.session().phase(), Phase::Idle, "{algorithm}");
    }
}

#[test]
fn overflowing_structure_is_named() {
    let fixture = PuzzleFixture::scrambled(3, 3, 20, 99).unwrap();
    let structure = |algorithm, policy: SearchPolicy| {
        let mut search = build::<NPuzzle>(algorithm, policy).unwrap();
        search.set_start(fixture.start()).unwrap();
        search.set_finish(fixture.finish()).unwrap();
        match search.find_path() {
            Err(SearchError::CapacityExceeded { structure, .. }) => structure,
            other => panic!("{algorithm}: expected overflow, got {other:?}"),
        }
    };

    let small_frontier = SearchPolicy {
        frontier_capacity: 2,
        ..SearchPolicy::default()
    };
    assert_eq!(structure(AlgorithmKind::AStar, small_frontier.clone()), Structure::Frontier);
    assert_eq!(structure(AlgorithmKind::Dfs, small_frontier), Structure::Stack);

    let small_closed = SearchPolicy {
        closed_capacity: 4,
        bucket_count: 2,
        ..SearchPolicy::default()
    };
    assert_eq!(structure(AlgorithmKind::Bfs, small_closed), Structure::ClosedSet);
}

#[test]
fn missing_finish_is_invalid_state_and_leaves_session_idle() {
    let mut search = build::<NPuzzle>(AlgorithmKind::AStar, SearchPolicy::default()).unwrap();
    search.set_start(NPuzzle::goal(3, 3).unwrap()).unwrap();
    let err = search.find_path().unwrap_err();
    assert!(matches!(err, SearchError::InvalidState { .. }), "{err}");
    assert_eq!(search.session().phase(), Phase::Idle);
}
