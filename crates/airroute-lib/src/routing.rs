use std::fmt;

use once_cell::unsync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{NodeIndex, WeightedGraph};
use crate::path::{hop_minimal_paths, shortest_paths, ShortestPathTree};

/// Engine that produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMetric {
    /// Mileage-optimal path within the segment threshold.
    Mileage,
    /// Segment-minimal fallback, ties broken by mileage.
    Segments,
}

impl fmt::Display for RouteMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteMetric::Mileage => "mileage",
            RouteMetric::Segments => "segments",
        };
        f.write_str(value)
    }
}

/// Maximum number of segments a mileage-optimal route may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Threshold(usize);

impl Threshold {
    /// Interpret a raw threshold for a graph of `node_count` nodes.
    ///
    /// Zero, negative, and larger-than-graph values all mean "no limit" and
    /// become `node_count`, which no simple path can exceed.
    pub fn normalize(raw: i64, node_count: usize) -> Self {
        match usize::try_from(raw) {
            Ok(segments) if segments > 0 && segments <= node_count => Self(segments),
            _ => Self::unlimited(node_count),
        }
    }

    /// Threshold that never triggers the segment fallback.
    pub fn unlimited(node_count: usize) -> Self {
        Self(node_count)
    }

    pub fn segments(self) -> usize {
        self.0
    }

    /// Whether a path with `hops` segments stays on the mileage policy.
    pub fn allows(self, hops: usize) -> bool {
        hops <= self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Route chosen for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub destination: NodeIndex,
    /// Node sequence, source first. A lone source means "unreachable" unless
    /// the destination is the source itself.
    pub steps: Vec<NodeIndex>,
    /// Total mileage along `steps`; `None` when the destination is unreachable.
    pub mileage: Option<u64>,
    pub metric: RouteMetric,
}

impl Route {
    /// Number of segments in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_reachable(&self) -> bool {
        self.mileage.is_some()
    }
}

/// One route per destination from a single source, in node index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub source: NodeIndex,
    pub threshold: Threshold,
    pub routes: Vec<Route>,
}

impl RoutePlan {
    /// Route to `destination`.
    ///
    /// # Panics
    ///
    /// Panics if `destination` is out of range.
    pub fn route(&self, destination: NodeIndex) -> &Route {
        &self.routes[destination]
    }

    /// Number of destinations that fell back to the segment-minimal engine.
    pub fn fallback_count(&self) -> usize {
        self.routes
            .iter()
            .filter(|route| route.metric == RouteMetric::Segments)
            .count()
    }
}

/// Applies the segment threshold policy over a read-only graph.
///
/// The unit-weight view needed by the fallback engine is derived on first use
/// and shared by every later source.
#[derive(Debug)]
pub struct RoutePlanner<'g> {
    graph: &'g WeightedGraph,
    unit_graph: OnceCell<WeightedGraph>,
}

impl<'g> RoutePlanner<'g> {
    pub fn new(graph: &'g WeightedGraph) -> Self {
        Self {
            graph,
            unit_graph: OnceCell::new(),
        }
    }

    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    fn unit_graph(&self) -> &WeightedGraph {
        self.unit_graph.get_or_init(|| {
            debug!(
                nodes = self.graph.node_count(),
                "deriving unit-weight view for segment fallback"
            );
            self.graph.unit_weight_view()
        })
    }

    /// Plan routes from `source` to every node.
    ///
    /// Mileage-optimal paths are kept unless they use more than `threshold`
    /// segments; those destinations take the segment-minimal path instead.
    pub fn plan(&self, source: NodeIndex, threshold: Threshold) -> Result<RoutePlan> {
        let ShortestPathTree { distances, paths } = shortest_paths(self.graph, source)?;

        let violating: Vec<NodeIndex> = (0..paths.len())
            .filter(|&destination| !threshold.allows(paths.hop_count(destination)))
            .collect();

        let mut routes: Vec<Route> = paths
            .into_paths()
            .into_iter()
            .zip(distances)
            .enumerate()
            .map(|(destination, (steps, mileage))| Route {
                destination,
                steps,
                mileage,
                metric: RouteMetric::Mileage,
            })
            .collect();

        if !violating.is_empty() {
            debug!(
                source = self.graph.name(source),
                threshold = threshold.segments(),
                violating = violating.len(),
                "mileage routes exceed segment threshold; substituting segment-minimal routes"
            );
            let fallback = hop_minimal_paths(self.unit_graph(), self.graph, source)?;
            for destination in violating {
                let route = &mut routes[destination];
                route.steps = fallback.path(destination).to_vec();
                route.mileage = fallback.mileage(destination);
                route.metric = RouteMetric::Segments;
            }
        }

        Ok(RoutePlan {
            source,
            threshold,
            routes,
        })
    }

    /// Plan routes for every source in index order.
    pub fn plan_all(&self, threshold: Threshold) -> Result<Vec<RoutePlan>> {
        (0..self.graph.node_count())
            .map(|source| self.plan(source, threshold))
            .collect()
    }
}

/// One-shot convenience wrapper around [`RoutePlanner::plan`].
pub fn plan_routes(
    graph: &WeightedGraph,
    source: NodeIndex,
    threshold: Threshold,
) -> Result<RoutePlan> {
    RoutePlanner::new(graph).plan(source, threshold)
}
