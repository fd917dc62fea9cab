//! Skeleton network extraction.
//!
//! Given segment frequencies, keep a spanning forest made of the busiest
//! segments: walk segments from most to least frequent and keep each one that
//! joins two airports not yet connected. Equal frequencies keep their
//! row-major input order, so the result is reproducible.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{NodeIndex, WeightedGraph};

/// Union-find over `0..len` with union by size and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    /// Representative of the set containing `node`.
    pub fn find(&mut self, node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = node;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were
    /// already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        // The larger tree absorbs the smaller; ties keep `a`'s root on top.
        let (root, child) = if self.size[root_b] > self.size[root_a] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// A directed segment and its frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    from: NodeIndex,
    to: NodeIndex,
    frequency: u32,
}

/// Output of [`build_skeleton`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    /// Connectivity of the kept segments, weight 1 in both directions.
    pub connectivity: WeightedGraph,
    /// Input frequencies restricted to the kept segments.
    pub frequencies: WeightedGraph,
}

impl Skeleton {
    /// Per-airport traffic on the kept segments, busiest first.
    pub fn airport_frequencies(&self) -> Vec<AirportFrequency> {
        airport_frequencies(&self.frequencies)
    }
}

/// Total traffic through one airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportFrequency {
    pub airport: String,
    pub flights: u64,
}

/// Keep the busiest spanning forest of `frequencies`.
pub fn build_skeleton(frequencies: &WeightedGraph) -> Result<Skeleton> {
    let n = frequencies.node_count();
    let mut segments: Vec<Segment> = (0..n)
        .flat_map(|from| {
            frequencies
                .edges_from(from)
                .map(move |(to, frequency)| Segment {
                    from,
                    to,
                    frequency,
                })
        })
        .collect();
    // `sort_by` is stable, which keeps equal frequencies in row-major order.
    segments.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let mut connectivity = WeightedGraph::from_names(frequencies.names().iter().cloned())?;
    let mut components = DisjointSet::new(n);
    for segment in &segments {
        if components.union(segment.from, segment.to) {
            connectivity.add_edge(segment.from, segment.to, 1)?;
            connectivity.add_edge(segment.to, segment.from, 1)?;
        }
    }

    let mut pruned = frequencies.clone();
    for from in 0..n {
        for to in 0..n {
            if !connectivity.has_edge(from, to) {
                pruned.remove_edge(from, to)?;
            }
        }
    }

    info!(
        airports = n,
        segments = segments.len(),
        kept = connectivity.edge_count() / 2,
        "built skeleton network"
    );

    Ok(Skeleton {
        connectivity,
        frequencies: pruned,
    })
}

/// Sum of incoming and outgoing weights per airport, busiest first; equal
/// totals keep index order.
pub fn airport_frequencies(graph: &WeightedGraph) -> Vec<AirportFrequency> {
    let n = graph.node_count();
    let mut totals: Vec<AirportFrequency> = (0..n)
        .map(|airport| AirportFrequency {
            airport: graph.name(airport).to_string(),
            flights: (0..n)
                .map(|other| {
                    u64::from(graph.weight(airport, other)) + u64::from(graph.weight(other, airport))
                })
                .sum(),
        })
        .collect();
    totals.sort_by(|a, b| b.flights.cmp(&a.flights));
    totals
}

/// Render frequencies as `NAME - COUNT` lines without a trailing newline.
pub fn render_airport_frequencies(frequencies: &[AirportFrequency]) -> String {
    frequencies
        .iter()
        .map(|entry| format!("{} - {}", entry.airport, entry.flights))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Load a frequency matrix in the layout produced by
/// [`WeightedGraph::render_matrix`].
pub fn load_frequency_matrix(path: &Path) -> Result<WeightedGraph> {
    let input = fs::read_to_string(path)?;
    parse_frequency_matrix(&input)
}

/// Parse a frequency matrix: a header line of airport names, then one row per
/// airport holding its name followed by one count per column. Parsing stops
/// at the first blank line.
pub fn parse_frequency_matrix(input: &str) -> Result<WeightedGraph> {
    let mut lines = input.lines().enumerate();
    let Some((_, header)) = lines.next() else {
        return Ok(WeightedGraph::default());
    };
    let mut graph = WeightedGraph::from_names(header.split_whitespace())?;
    let n = graph.node_count();

    let mut row = 0;
    for (offset, line) in lines {
        let line_number = offset + 1;
        let mut fields = line.split_whitespace();
        let Some(_row_name) = fields.next() else {
            break;
        };
        if row >= n {
            return Err(Error::MalformedInput {
                line: line_number,
                message: format!("matrix has more than {n} rows"),
            });
        }

        let counts = fields
            .map(|field| {
                field.parse::<u32>().map_err(|err| Error::MalformedInput {
                    line: line_number,
                    message: format!("invalid frequency '{field}': {err}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if counts.len() != n {
            return Err(Error::MalformedInput {
                line: line_number,
                message: format!("expected {n} frequencies, found {}", counts.len()),
            });
        }

        for (column, count) in counts.into_iter().enumerate() {
            graph.add_edge(row, column, count)?;
        }
        row += 1;
    }
    Ok(graph)
}
