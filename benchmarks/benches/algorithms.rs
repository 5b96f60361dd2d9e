use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lodestar_benchmarks::{puzzle_regimes, roomy_policy};
use lodestar_harness::contract::SearchFixture;
use lodestar_harness::runner::{run_fixture, AlgorithmKind};
use lodestar_harness::worlds::n_puzzle::{HEURISTIC_LINEAR_CONFLICT, HEURISTIC_MANHATTAN};

fn bench_informed(c: &mut Criterion) {
    let mut group = c.benchmark_group("puzzle_informed");
    group.sample_size(20);
    for fixture in puzzle_regimes() {
        for param in [HEURISTIC_MANHATTAN, HEURISTIC_LINEAR_CONFLICT] {
            let fixture = fixture.clone().with_heuristic(param);
            for algorithm in [AlgorithmKind::AStar, AlgorithmKind::IdaStar, AlgorithmKind::Greedy] {
                let id = BenchmarkId::new(format!("{algorithm}_h{param}"), fixture.fixture_id());
                group.bench_with_input(id, &fixture, |b, fixture| {
                    b.iter(|| run_fixture(algorithm, fixture, roomy_policy(param)).expect("search"));
                });
            }
        }
    }
    group.finish();
}

fn bench_uninformed(c: &mut Criterion) {
    let mut group = c.benchmark_group("puzzle_uninformed");
    group.sample_size(10);
    for fixture in puzzle_regimes().into_iter().take(2) {
        for algorithm in [AlgorithmKind::Bfs, AlgorithmKind::BidirectionalBfs] {
            let id = BenchmarkId::new(algorithm.as_str(), fixture.fixture_id());
            group.bench_with_input(id, &fixture, |b, fixture| {
                b.iter(|| run_fixture(algorithm, fixture, roomy_policy(0)).expect("search"));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_informed, bench_uninformed);
criterion_main!(benches);
