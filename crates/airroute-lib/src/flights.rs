//! Flight list loading.
//!
//! A flight list holds one flight per line as whitespace-separated
//! `FROM TO MILES`, for example `JFK LAX 2475`. Airport codes are exactly three
//! characters long; the first line that does not start with two codes ends
//! the list, so trailing notes or a blank line after the flights are ignored.
//! Each flight is served in both directions at the same mileage.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::{NodeIndex, WeightedGraph};

const AIRPORT_CODE_LEN: usize = 3;

/// Load a flight list from a file path.
pub fn load_flights(path: &Path) -> Result<WeightedGraph> {
    let file = fs::File::open(path)?;
    let graph = read_flights(file)?;
    info!(
        path = %path.display(),
        airports = graph.node_count(),
        edges = graph.edge_count(),
        "loaded flight network"
    );
    Ok(graph)
}

/// Load a flight list from a reader (e.g., file or in-memory buffer).
pub fn read_flights<R: Read>(mut reader: R) -> Result<WeightedGraph> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_flights(&input)
}

/// Parse a flight list. Airports are indexed in order of first appearance.
pub fn parse_flights(input: &str) -> Result<WeightedGraph> {
    let mut airports = AirportIndex::default();
    let mut flights: Vec<(NodeIndex, NodeIndex, u32)> = Vec::new();

    for (offset, line) in input.lines().enumerate() {
        let line_number = offset + 1;
        let mut fields = line.split_whitespace();
        let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
            break;
        };
        if !is_airport_code(from) || !is_airport_code(to) {
            break;
        }

        let miles = fields.next().ok_or_else(|| Error::MalformedInput {
            line: line_number,
            message: format!("flight {from}-{to} is missing its mileage"),
        })?;
        let miles: u32 = miles.parse().map_err(|err| Error::MalformedInput {
            line: line_number,
            message: format!("invalid mileage '{miles}' for flight {from}-{to}: {err}"),
        })?;
        if miles == 0 {
            return Err(Error::MalformedInput {
                line: line_number,
                message: format!("flight {from}-{to} must cover at least one mile"),
            });
        }

        let from = airports.intern(from);
        let to = airports.intern(to);
        flights.push((from, to, miles));
    }

    let mut graph = WeightedGraph::from_names(airports.names)?;
    for (from, to, miles) in flights {
        graph.add_edge(from, to, miles)?;
        graph.add_edge(to, from, miles)?;
    }
    Ok(graph)
}

fn is_airport_code(field: &str) -> bool {
    field.chars().count() == AIRPORT_CODE_LEN
}

#[derive(Default)]
struct AirportIndex {
    names: Vec<String>,
    lookup: HashMap<String, NodeIndex>,
}

impl AirportIndex {
    fn intern(&mut self, code: &str) -> NodeIndex {
        if let Some(&node) = self.lookup.get(code) {
            return node;
        }
        let node = self.names.len();
        self.names.push(code.to_string());
        self.lookup.insert(code.to_string(), node);
        node
    }
}
