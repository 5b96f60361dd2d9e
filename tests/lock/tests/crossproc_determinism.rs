//! Cross-process determinism of search reports.
//!
//! Spawns the `search_fixture` binary under four environment variants and
//! asserts all produce identical stdout.

use std::path::Path;
use std::process::Command;

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_search_fixture")
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    assert!(
        baseline.contains("fixture=npuzzle_3x3_m12_s2024"),
        "baseline output missing puzzle fixture"
    );
    assert!(
        baseline.contains("fixture=maze_10x5"),
        "baseline output missing maze fixture"
    );
    assert!(
        baseline.contains("maze_10x5.astar.termination_reason=goal_reached"),
        "baseline output missing maze A* goal"
    );
    assert!(
        baseline.contains("npuzzle_3x3_m12_s2024.ida_star.termination_reason=goal_reached"),
        "baseline output missing puzzle IDA* goal"
    );
    assert_eq!(
        baseline.matches(".report_digest=").count(),
        2 * 7 + 1,
        "one digest per algorithm per fixture plus evolution"
    );

    // Variant 2: different cwd.
    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    let variant_cwd = run_variant(alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "output differs when cwd changes from {root} to {alt_cwd}"
    );

    // Variant 3: different locale env.
    let variant_locale = run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(
        baseline, variant_locale,
        "output differs when LC_ALL=C LANG=C"
    );

    // Variant 4: spurious env vars, verbose logging on stderr.
    let variant_noise = run_variant(
        &root,
        &[
            ("LODESTAR_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
            ("RUST_LOG", "debug"),
        ],
    );
    assert_eq!(
        baseline, variant_noise,
        "output differs with spurious env vars"
    );
}

#[test]
fn optimal_algorithms_agree_on_move_counts() {
    let out = run_variant(&workspace_root(), &[]);
    let moves = |key: &str| -> String {
        out.lines()
            .find_map(|line| line.strip_prefix(&format!("{key}.moves=")).map(str::to_owned))
            .unwrap_or_else(|| panic!("missing {key}.moves"))
    };
    for fixture in ["npuzzle_3x3_m12_s2024", "maze_10x5"] {
        let astar = moves(&format!("{fixture}.astar"));
        for other in ["ida_star", "bfs", "bidirectional_bfs"] {
            assert_eq!(moves(&format!("{fixture}.{other}")), astar, "{fixture} {other}");
        }
    }
}
