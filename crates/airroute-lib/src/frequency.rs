//! Segment frequency tallies from a rendered route file.
//!
//! Every route line contributes one flight to each segment it uses, so a
//! segment served by many routes ends up with a high count. The tally is a
//! [`WeightedGraph`] whose weights are those counts.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::WeightedGraph;
use crate::output::ROUTE_SEPARATOR;

/// Load a route file and tally its segment frequencies.
pub fn load_route_frequencies(path: &Path) -> Result<WeightedGraph> {
    let input = fs::read_to_string(path)?;
    let tally = tally_route_file(&input)?;
    info!(
        path = %path.display(),
        airports = tally.node_count(),
        segments = tally.edge_count(),
        "tallied route frequencies"
    );
    Ok(tally)
}

/// Tally segment frequencies from route-file text.
///
/// Airports are indexed by block: the k-th blank-line-separated block lists
/// the routes leaving the k-th airport, so its lines all start with that
/// airport's name.
pub fn tally_route_file(input: &str) -> Result<WeightedGraph> {
    let mut names = Vec::new();
    let mut in_block = false;
    for (offset, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            in_block = false;
            continue;
        }
        if !in_block {
            in_block = true;
            let source = route_stops(line).next().unwrap_or_default();
            if source.is_empty() {
                return Err(Error::MalformedInput {
                    line: offset + 1,
                    message: "route line does not start with an airport".to_string(),
                });
            }
            names.push(source.to_string());
        }
    }

    let mut tally = WeightedGraph::from_names(names)?;
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let stops = route_stops(line)
            .map(|name| tally.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        for pair in stops.windows(2) {
            tally.increment_edge(pair[0], pair[1])?;
        }
    }
    Ok(tally)
}

fn route_stops(line: &str) -> impl Iterator<Item = &str> {
    line.split(ROUTE_SEPARATOR).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = "JFK\nJFK->ORD\nJFK->ORD->LAX\n\n\
                          ORD->JFK\nORD\nORD->LAX\n\n\
                          LAX->ORD->JFK\nLAX->ORD\nLAX";

    #[test]
    fn counts_each_segment_once_per_route() {
        let tally = tally_route_file(ROUTES).unwrap();
        assert_eq!(tally.names(), ["JFK", "ORD", "LAX"]);
        assert_eq!(tally.weight(0, 1), 2);
        assert_eq!(tally.weight(1, 2), 2);
        assert_eq!(tally.weight(2, 1), 2);
        assert_eq!(tally.weight(1, 0), 2);
        assert_eq!(tally.weight(0, 2), 0);
        assert_eq!(tally.edge_count(), 4);
    }

    #[test]
    fn isolated_airports_keep_their_index() {
        let routes = "JFK\nJFK->LAX\nJFK\n\nLAX->JFK\nLAX\nLAX\n\nZZZ\nZZZ\nZZZ";
        let tally = tally_route_file(routes).unwrap();
        assert_eq!(tally.names(), ["JFK", "LAX", "ZZZ"]);
        assert_eq!(tally.edge_count(), 2);
    }

    #[test]
    fn unknown_airport_is_reported() {
        let err = tally_route_file("JFK\nJFK->LAX").expect_err("LAX has no block");
        assert!(matches!(err, Error::UnknownNode { name, .. } if name == "LAX"));
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let tally = tally_route_file("AAA\r\nAAA->BBB\r\n\r\nBBB->AAA\r\nBBB").unwrap();
        assert_eq!(tally.weight(0, 1), 1);
        assert_eq!(tally.weight(1, 0), 1);
    }
}
