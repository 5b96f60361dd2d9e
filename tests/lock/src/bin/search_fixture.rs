//! Binary that runs fixed fixtures through every algorithm and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `key=value` lines on stdout, one block per fixture. Logging
//! (`RUST_LOG`) goes to stderr and never affects stdout.

use std::error::Error;

use lodestar_harness::contract::SearchFixture;
use lodestar_harness::runner::{run_evolution, run_fixture, AlgorithmKind};
use lodestar_harness::worlds::grid::GridFixture;
use lodestar_harness::worlds::n_puzzle::PuzzleFixture;
use lodestar_search::evolution::EvolutionConfig;
use lodestar_search::{SearchPolicy, SearchReport};

const MAZE: &str = "
    S..#......
    .#.#.####.
    .#...#....
    .####.#.#.
    ......#.#G
";

fn print_report(prefix: &str, report: &SearchReport) -> Result<(), Box<dyn Error>> {
    println!("{prefix}.termination_reason={}", report.termination);
    println!(
        "{prefix}.moves={}",
        report.moves().map_or_else(|| "none".to_owned(), |m| m.to_string())
    );
    println!("{prefix}.searched_nodes={}", report.stats.searched_nodes);
    println!("{prefix}.report_digest={}", report.digest()?);
    Ok(())
}

fn run_all<F>(fixture: &F, policy: &SearchPolicy) -> Result<(), Box<dyn Error>>
where
    F: SearchFixture,
    F::State: 'static,
{
    let id = fixture.fixture_id();
    let described = serde_json::to_string(&fixture.describe())?;
    println!("fixture={id}");
    println!("{id}.describe={described}");
    for algorithm in AlgorithmKind::ALL {
        let report = run_fixture(algorithm, fixture, policy.clone())?;
        print_report(&format!("{id}.{algorithm}"), &report)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let policy = SearchPolicy {
        frontier_capacity: 600_000,
        closed_capacity: 200_000,
        bucket_count: 4096,
        grow_closed_set: true,
        ..SearchPolicy::default()
    };

    let puzzle = PuzzleFixture::scrambled(3, 3, 12, 2024)?;
    run_all(&puzzle, &policy)?;

    let maze = GridFixture::parse("maze_10x5", MAZE)?;
    run_all(&maze, &policy)?;

    let config = EvolutionConfig {
        population_size: 60,
        chromosome_length: 24,
        generations: 40,
        ..EvolutionConfig::default()
    };
    let evolved = run_evolution(&maze, config, 7)?;
    print_report("maze_10x5.evolution", &evolved)?;
    Ok(())
}
