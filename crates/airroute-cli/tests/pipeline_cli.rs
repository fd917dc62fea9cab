use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_flights() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/flights.txt")
        .canonicalize()
        .expect("fixture flights present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("airroute-cli");
    cmd.env("RUST_LOG", "error").env_remove("AIRROUTE_OUTPUT_DIR");
    cmd
}

#[test]
fn routes_frequencies_and_skeleton_chain_together() {
    let temp = tempdir().expect("create temp dir");
    let out = temp.path();

    cli()
        .arg("--output-dir")
        .arg(out)
        .arg("routes")
        .arg(fixture_flights())
        .arg("2")
        .assert()
        .success();

    cli()
        .arg("--output-dir")
        .arg(out)
        .arg("frequencies")
        .arg(out.join("routes.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote frequencies for 10 airports"));

    let matrix = fs::read_to_string(out.join("frequencies.txt")).expect("frequencies written");
    let mut lines = matrix.lines();
    assert_eq!(
        lines.next(),
        Some("    BOS JFK ORD ATL DEN DFW SFO LAX SEA MIA ")
    );
    assert_eq!(lines.count(), 10);

    cli()
        .arg("--output-dir")
        .arg(out)
        .arg("skeleton")
        .arg(out.join("frequencies.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept 9 of"));

    let skeleton = fs::read_to_string(out.join("skeleton.txt")).expect("skeleton written");
    assert_eq!(skeleton.lines().count(), 11);
    let kept: usize = skeleton
        .lines()
        .skip(1)
        .flat_map(|line| line.split_whitespace().skip(1))
        .filter(|weight| *weight == "1")
        .count();
    assert_eq!(kept, 18);

    let totals = fs::read_to_string(out.join("airportFrequencies.txt")).expect("totals written");
    let counts: Vec<u64> = totals
        .lines()
        .map(|line| {
            let (_, count) = line.split_once(" - ").expect("NAME - COUNT");
            count.parse().expect("numeric count")
        })
        .collect();
    assert_eq!(counts.len(), 10);
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn frequencies_rejects_unknown_airport() {
    let temp = tempdir().expect("create temp dir");
    let routes = temp.path().join("routes.txt");
    fs::write(&routes, "JFK\nJFK->LAX").expect("write routes");

    cli()
        .arg("--output-dir")
        .arg(temp.path())
        .arg("frequencies")
        .arg(&routes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node name: LAX"));
}

#[test]
fn skeleton_rejects_short_matrix_rows() {
    let temp = tempdir().expect("create temp dir");
    let matrix = temp.path().join("frequencies.txt");
    fs::write(&matrix, "    AAA BBB \nAAA 0   3   \nBBB 3").expect("write matrix");

    cli()
        .arg("--output-dir")
        .arg(temp.path())
        .arg("skeleton")
        .arg(&matrix)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load frequency matrix"))
        .stderr(predicate::str::contains("malformed input on line 3"));
}

#[test]
fn missing_input_fails_with_context() {
    let temp = tempdir().expect("create temp dir");
    cli()
        .arg("--output-dir")
        .arg(temp.path())
        .arg("skeleton")
        .arg(temp.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load frequency matrix"));
}
