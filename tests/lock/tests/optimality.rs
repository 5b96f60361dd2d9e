//! Shortest-path guarantees checked against independent oracles.
//!
//! - A* and IDA* on grids (Manhattan, consistent) match the flood-fill
//!   distance.
//! - A* and IDA* on random undirected weighted graphs match Dijkstra.
//! - BFS depth equals the flood-fill distance; bidirectional BFS returns a
//!   path of the same length as unidirectional BFS.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lodestar_harness::contract::SearchFixture;
use lodestar_harness::runner::{search, AlgorithmKind};
use lodestar_harness::worlds::grid::GridFixture;
use lodestar_harness::worlds::n_puzzle::{PuzzleFixture, HEURISTIC_MANHATTAN};
use lodestar_harness::worlds::weighted_graph::{GraphFixture, GraphVertex, WeightedGraph};
use lodestar_search::{GeneratedPath, SearchPolicy};

const MAZES: &[&str] = &[
    "
    S.#.....
    ..#.##..
    .##..#.#
    ....#..G
    ",
    "
    S.......
    .######.
    .#....#.
    .#.##.#.
    ...#G.#.
    ######..
    ",
    "
    S..#....#...
    .#.#.##.#.#.
    .#...#....#.
    .#####.####.
    .......#...G
    ",
];

fn moves(algorithm: AlgorithmKind, fixture: &GridFixture) -> usize {
    let result = search(
        algorithm,
        fixture.start(),
        fixture.finish(),
        SearchPolicy::default(),
    )
    .unwrap();
    assert!(result.is_goal_reached(), "{algorithm} {}", fixture.fixture_id());
    result.path.unwrap().moves()
}

#[test]
fn grid_optimal_algorithms_match_flood_fill() {
    for (i, maze) in MAZES.iter().enumerate() {
        let fixture = GridFixture::parse(&format!("maze_{i}"), maze).unwrap();
        let expected = fixture.shortest_distance().unwrap() as usize;
        for algorithm in [
            AlgorithmKind::AStar,
            AlgorithmKind::IdaStar,
            AlgorithmKind::Bfs,
            AlgorithmKind::BidirectionalBfs,
        ] {
            assert_eq!(moves(algorithm, &fixture), expected, "{algorithm} maze_{i}");
        }
    }
}

#[test]
fn greedy_and_dfs_never_beat_the_optimum() {
    for (i, maze) in MAZES.iter().enumerate() {
        let fixture = GridFixture::parse(&format!("maze_{i}"), maze).unwrap();
        let expected = fixture.shortest_distance().unwrap() as usize;
        for algorithm in [
            AlgorithmKind::Greedy,
            AlgorithmKind::Dfs,
            AlgorithmKind::DfsBetterPath,
        ] {
            assert!(moves(algorithm, &fixture) >= expected, "{algorithm} maze_{i}");
        }
    }
}

fn random_graph(rng: &mut SmallRng, vertices: usize, extra_edges: usize) -> WeightedGraph {
    let mut graph = WeightedGraph::new(vertices, 0, vec![0; vertices]).unwrap();
    let mut joined = vec![vec![false; vertices]; vertices];
    let mut join = |graph: &mut WeightedGraph, a: usize, b: usize, weight: u32| {
        if a != b && !joined[a][b] {
            joined[a][b] = true;
            joined[b][a] = true;
            graph.add_undirected(a, b, weight).unwrap();
        }
    };
    // A spanning chain keeps every vertex reachable.
    for v in 1..vertices {
        let w = rng.random_range(1..=9);
        join(&mut graph, v - 1, v, w);
    }
    for _ in 0..extra_edges {
        let a = rng.random_range(0..vertices);
        let b = rng.random_range(0..vertices);
        let w = rng.random_range(1..=9);
        join(&mut graph, a, b, w);
    }
    graph
}

fn path_cost(graph: &WeightedGraph, path: &GeneratedPath<GraphVertex>) -> u64 {
    path.states
        .windows(2)
        .zip(&path.operations[1..])
        .map(|(pair, op)| {
            let edge = graph.edges(pair[0].id)[op.unwrap()];
            assert_eq!(edge.0, pair[1].id);
            u64::from(edge.1)
        })
        .sum()
}

#[test]
fn weighted_astar_and_ida_star_match_dijkstra() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for round in 0..5 {
        let graph = random_graph(&mut rng, 24, 30);
        let start = rng.random_range(1..24);
        let expected = graph.shortest_distance(start).unwrap();
        let fixture = GraphFixture::new(&format!("random_{round}"), graph, start).unwrap();
        for algorithm in [AlgorithmKind::AStar, AlgorithmKind::IdaStar] {
            let result = search(
                algorithm,
                fixture.start(),
                fixture.finish(),
                SearchPolicy::default(),
            )
            .unwrap();
            assert!(result.is_goal_reached(), "{algorithm} round {round}");
            let path = result.path.unwrap();
            assert_eq!(
                path_cost(fixture.graph(), &path),
                expected,
                "{algorithm} round {round}"
            );
        }
    }
}

#[test]
fn puzzle_bidirectional_matches_bfs_and_astar() {
    for seed in 10..14 {
        let fixture = PuzzleFixture::scrambled(3, 3, 16, seed)
            .unwrap()
            .with_heuristic(HEURISTIC_MANHATTAN);
        let policy = SearchPolicy {
            heuristic_param: HEURISTIC_MANHATTAN,
            frontier_capacity: 200_000,
            closed_capacity: 200_000,
            ..SearchPolicy::default()
        };
        let length = |algorithm| {
            search(algorithm, fixture.start(), fixture.finish(), policy.clone())
                .unwrap()
                .path
                .unwrap()
                .moves()
        };
        let bfs = length(AlgorithmKind::Bfs);
        assert_eq!(length(AlgorithmKind::BidirectionalBfs), bfs, "seed {seed}");
        assert_eq!(length(AlgorithmKind::AStar), bfs, "seed {seed}");
        assert_eq!(length(AlgorithmKind::IdaStar), bfs, "seed {seed}");
    }
}
