//! Common test utilities and fixture helpers.
//!
//! Shared by the integration tests: fixture paths, small hand-built graphs,
//! and a breadth-first reference for segment counts.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use airroute_lib::{load_flights, WeightedGraph};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the ten-airport flight list fixture.
pub fn fixture_flights_path() -> PathBuf {
    fixtures_dir().join("flights.txt")
}

/// Load the fixture network.
#[allow(dead_code)]
pub fn fixture_network() -> WeightedGraph {
    load_flights(&fixture_flights_path()).expect("fixture flights load")
}

/// Build a directed graph from names and `(from, to, miles)` triples given by name.
#[allow(dead_code)]
pub fn graph_with(names: &[&str], edges: &[(&str, &str, u32)]) -> WeightedGraph {
    let mut graph = WeightedGraph::from_names(names.iter().copied()).expect("unique names");
    for &(from, to, miles) in edges {
        let from = graph.resolve(from).expect("known source");
        let to = graph.resolve(to).expect("known target");
        graph.add_edge(from, to, miles).expect("edge in range");
    }
    graph
}

/// Minimum segment count from `source` to every node, by breadth-first search.
#[allow(dead_code)]
pub fn bfs_segments(graph: &WeightedGraph, source: usize) -> Vec<Option<usize>> {
    let mut segments = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();
    segments[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next_segments = segments[current].map(|count| count + 1);
        for next in graph.neighbors(current) {
            if segments[next].is_none() {
                segments[next] = next_segments;
                queue.push_back(next);
            }
        }
    }
    segments
}

/// Temporary directory holding input files written by a test.
#[allow(dead_code)]
pub struct TestEnv {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Write `contents` to `name` inside the temp dir and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write test input");
        path
    }
}
