//! Segment-constrained airline route planning.
//!
//! This crate loads a flight network into a dense [`WeightedGraph`], computes
//! mileage-optimal routes between every pair of airports, and swaps in
//! segment-minimal routes wherever the mileage-optimal one needs more
//! segments than allowed. It also carries the companion tools that consume
//! planned routes: segment frequency tallies and the skeleton network
//! extractor. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod flights;
pub mod frequency;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod skeleton;

pub use error::{Error, Result};
pub use flights::{load_flights, parse_flights, read_flights};
pub use frequency::{load_route_frequencies, tally_route_file};
pub use graph::{NodeIndex, WeightedGraph};
pub use output::{render_route_file, RouteSummary, RouteSummaryEntry};
pub use path::{
    hop_minimal_paths, min_vertex, path_mileage, shortest_paths, HopPathTree, PathTable,
    ShortestPathTree,
};
pub use routing::{plan_routes, Route, RouteMetric, RoutePlan, RoutePlanner, Threshold};
pub use skeleton::{
    airport_frequencies, build_skeleton, load_frequency_matrix, parse_frequency_matrix,
    render_airport_frequencies, AirportFrequency, DisjointSet, Skeleton,
};
