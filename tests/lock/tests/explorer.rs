//! Reachable-state enumeration on the 8-puzzle, whose layer sizes from the
//! goal are well known: 1, 2, 4, 8, 16, 20, 39.

use lodestar_harness::worlds::n_puzzle::NPuzzle;
use lodestar_kernel::capability::{Equatable, Generative};
use lodestar_search::{SearchError, SearchPolicy, StateExplorer};

const LAYERS: [usize; 7] = [1, 2, 4, 8, 16, 20, 39];

#[test]
fn layer_sizes_match_known_counts() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let explorer = StateExplorer::new(SearchPolicy::default()).unwrap();
    for (depth, &expected) in LAYERS.iter().enumerate() {
        let depth = u32::try_from(depth).unwrap();
        let layer = explorer.explore_at_depth(&goal, depth).unwrap();
        assert_eq!(layer.len(), expected, "depth {depth}");
        assert!(layer.iter().all(|s| s.depth == depth));
    }
}

#[test]
fn bounded_explore_is_ordered_and_distinct() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let explorer = StateExplorer::new(SearchPolicy {
        max_depth: Some(4),
        ..SearchPolicy::default()
    })
    .unwrap();
    let states = explorer.explore(&goal).unwrap();
    assert_eq!(states.len(), LAYERS[..5].iter().sum::<usize>());
    assert!(states[0].state.is_equal(&goal));
    assert_eq!(states[0].op, None);
    assert!(states.windows(2).all(|w| w[0].depth <= w[1].depth));
    for (i, a) in states.iter().enumerate() {
        assert!(states[i + 1..].iter().all(|b| !a.state.is_equal(&b.state)));
    }
}

#[test]
fn layered_and_full_enumeration_agree() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let explorer = StateExplorer::new(SearchPolicy {
        max_depth: Some(6),
        ..SearchPolicy::default()
    })
    .unwrap();
    let all = explorer.explore(&goal).unwrap();
    let layer = explorer.explore_at_depth(&goal, 6).unwrap();
    let deepest: Vec<_> = all.iter().filter(|s| s.depth == 6).collect();
    assert_eq!(deepest.len(), layer.len());
    for s in &layer {
        assert!(deepest.iter().any(|d| d.state.is_equal(&s.state)));
        // The recorded operation undoes into a state one layer up.
        let op = s.op.as_ref().unwrap();
        let back = s.state.generate(&op.inverse()).unwrap();
        assert!(all.iter().any(|d| d.depth == 5 && d.state.is_equal(&back)));
    }
}

#[test]
fn explore_respects_frontier_limit() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let explorer = StateExplorer::new(SearchPolicy {
        frontier_capacity: 10,
        ..SearchPolicy::default()
    })
    .unwrap();
    assert_eq!(explorer.explore(&goal).unwrap().len(), 10);
}

#[test]
fn oversized_layer_is_refused() {
    let goal = NPuzzle::goal(3, 3).unwrap();
    let explorer = StateExplorer::new(SearchPolicy {
        frontier_capacity: 10,
        ..SearchPolicy::default()
    })
    .unwrap();
    let err = explorer.explore_at_depth(&goal, 5).unwrap_err();
    assert!(matches!(err, SearchError::CapacityExceeded { .. }), "{err}");
}
