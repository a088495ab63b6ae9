//! Cross-process determinism of suite runs.
//!
//! Spawns the `suite_fixture` binary under several working directories and
//! environment variants and asserts identical output, and that the output
//! matches an in-process run of the same suite.

use std::path::PathBuf;
use std::process::Command;

use athena_harness::results::results_digest;
use athena_harness::runner::{parse_suite, run_suite};
use lock_tests::{suite_fixture_path, workspace_root};

/// `cargo test` puts the fixture binary one level above the test binary.
fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push(format!("suite_fixture{}", std::env::consts::EXE_SUFFIX));
    path
}

fn run_variant(work_dir: &std::path::Path, env_overrides: &[(&str, &str)]) -> String {
    let mut command = Command::new(binary_path());
    command
        .arg(suite_fixture_path())
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG");
    for &(key, value) in env_overrides {
        command.env(key, value);
    }
    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn suite_fixture: {e}"));
    assert!(
        output.status.success(),
        "suite_fixture failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

#[test]
fn suite_output_is_identical_across_processes() {
    let temp = tempfile::tempdir().unwrap();
    let root = workspace_root();
    let variants = [
        run_variant(&root, &[]),
        run_variant(temp.path(), &[]),
        run_variant(temp.path(), &[("LC_ALL", "C"), ("LANG", "C")]),
        run_variant(&root, &[("LC_ALL", "en_US.UTF-8"), ("RUST_BACKTRACE", "1")]),
    ];
    for variant in &variants[1..] {
        assert_eq!(variant, &variants[0]);
    }

    let text = std::fs::read_to_string(suite_fixture_path()).unwrap();
    let results = run_suite(&parse_suite(&text).unwrap()).unwrap();
    let expected = format!("results_digest={}", results_digest(&results).unwrap().as_str());
    assert_eq!(variants[0].lines().next(), Some(expected.as_str()));
    assert_eq!(variants[0].lines().count(), 1 + results.len());
}
