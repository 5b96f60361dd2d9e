//! Reports written to disk hold exactly the canonical bytes, and those
//! bytes do not depend on timing.

use std::time::Duration;

use lodestar_harness::runner::{run_fixture, AlgorithmKind};
use lodestar_harness::worlds::n_puzzle::PuzzleFixture;
use lodestar_search::report::ReportError;
use lodestar_search::{SearchPolicy, SearchReport};

fn report(algorithm: AlgorithmKind) -> SearchReport {
    let fixture = PuzzleFixture::scrambled(3, 3, 8, 31).unwrap();
    run_fixture(algorithm, &fixture, SearchPolicy::default()).unwrap()
}

#[test]
fn written_file_round_trips_to_the_json_value() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("astar.json");
    let report = report(AlgorithmKind::AStar);
    report.write_json(&file).unwrap();

    let bytes = std::fs::read(&file).unwrap();
    assert_eq!(bytes, report.to_canonical_json_bytes().unwrap());
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed, report.to_json_value());
    assert_eq!(parsed["algorithm"], "astar");
    assert_eq!(parsed["goal_reached"], true);
}

#[test]
fn canonical_bytes_are_plain_serde_json_output() {
    for algorithm in [
        AlgorithmKind::AStar,
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Greedy,
    ] {
        let report = report(algorithm);
        let expected = serde_json::to_vec(&report.to_json_value()).unwrap();
        assert_eq!(report.to_canonical_json_bytes().unwrap(), expected, "{algorithm}");
    }
}

#[test]
fn digest_ignores_elapsed_time() {
    let mut a = report(AlgorithmKind::Bfs);
    let mut b = report(AlgorithmKind::Bfs);
    a.stats.elapsed = Duration::from_secs(0);
    b.stats.elapsed = Duration::from_secs(3600);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    assert!(!String::from_utf8(a.to_canonical_json_bytes().unwrap())
        .unwrap()
        .contains("elapsed"));
}

#[test]
fn algorithms_produce_distinct_digests() {
    let astar = report(AlgorithmKind::AStar).digest().unwrap();
    let bfs = report(AlgorithmKind::Bfs).digest().unwrap();
    assert_ne!(astar, bfs);
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("missing").join("report.json");
    let err = report(AlgorithmKind::Greedy).write_json(&file).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }), "{err}");
}
