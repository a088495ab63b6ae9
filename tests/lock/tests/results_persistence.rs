//! Results persistence lock tests.
//!
//! - A suite's results survive a write/read cycle unchanged.
//! - Reads fail closed on tampering, a missing file, or a malformed digest.
//! - Rewriting the same results produces identical bytes.

use athena_harness::results::{
    read_results, write_results, ResultsReadError, DIGEST_FILENAME, RESULTS_FILENAME,
};
use athena_harness::runner::{parse_suite, run_suite};
use lock_tests::suite_fixture_path;

fn fixture_results() -> athena_harness::results::ResultsMap {
    let text = std::fs::read_to_string(suite_fixture_path()).unwrap();
    run_suite(&parse_suite(&text).unwrap()).unwrap()
}

#[test]
fn fixture_suite_answers() {
    let results = fixture_results();
    assert_eq!(results.len(), 7);

    assert_eq!(results["diamond_astar"]["report"]["solution_cost"], 3.0);
    assert_eq!(results["diamond_bfs"]["report"]["solution_cost"], 5.0);
    assert_eq!(results["detour_ucs"]["report"]["solution_cost"], 5.0);
    assert_eq!(
        results["detour_budget"]["report"]["termination"]["type"],
        "expansion_budget_exceeded"
    );
    assert_eq!(results["send_more_money"]["formatted"], "9567 + 1085 = 10652");
    assert_eq!(results["tree_alphabeta"]["value"], 3.0);
    assert_eq!(results["tree_alphabeta"]["action"], "left");
    assert_eq!(results["tree_expectimax"]["value"], 7.5);
    assert_eq!(results["tree_expectimax"]["action"], "left");

    for (name, record) in &results {
        assert!(
            record["record_id"].as_str().is_some_and(|id| id.starts_with("sha256:")),
            "{name} has no record_id"
        );
    }
}

#[test]
fn write_read_cycle_preserves_results() {
    let results = fixture_results();
    let dir = tempfile::tempdir().unwrap();
    let digest = write_results(&results, dir.path()).unwrap();

    assert_eq!(read_results(dir.path()).unwrap(), results);
    let stored = std::fs::read_to_string(dir.path().join(DIGEST_FILENAME)).unwrap();
    assert_eq!(stored, digest.as_str());

    let first = std::fs::read(dir.path().join(RESULTS_FILENAME)).unwrap();
    write_results(&results, dir.path()).unwrap();
    assert_eq!(std::fs::read(dir.path().join(RESULTS_FILENAME)).unwrap(), first);
}

#[test]
fn tampered_results_fail_closed() {
    let results = fixture_results();
    let dir = tempfile::tempdir().unwrap();
    write_results(&results, dir.path()).unwrap();

    let path = dir.path().join(RESULTS_FILENAME);
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace("9567 + 1085", "9568 + 1084")).unwrap();
    assert!(matches!(
        read_results(dir.path()),
        Err(ResultsReadError::DigestMismatch { .. })
    ));
}

#[test]
fn missing_digest_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    write_results(&fixture_results(), dir.path()).unwrap();
    std::fs::remove_file(dir.path().join(DIGEST_FILENAME)).unwrap();
    assert_eq!(
        read_results(dir.path()),
        Err(ResultsReadError::MissingFile {
            filename: DIGEST_FILENAME.into()
        })
    );
}
