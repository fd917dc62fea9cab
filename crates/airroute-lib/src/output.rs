use std::fmt::Write;

use serde::Serialize;

use crate::graph::WeightedGraph;
use crate::routing::{Route, RouteMetric, RoutePlan, Threshold};

/// Separator between airport names in rendered routes.
pub const ROUTE_SEPARATOR: &str = "->";

/// Render plans in route-file form: one `A->B->C` line per destination,
/// a blank line between sources, and no trailing newline.
pub fn render_route_file(plans: &[RoutePlan], graph: &WeightedGraph) -> String {
    plans
        .iter()
        .map(|plan| {
            plan.routes
                .iter()
                .map(|route| join_route(route, graph))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn join_route(route: &Route, graph: &WeightedGraph) -> String {
    route
        .steps
        .iter()
        .map(|&node| graph.name(node))
        .collect::<Vec<_>>()
        .join(ROUTE_SEPARATOR)
}

/// Destination entry within a [`RouteSummary`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummaryEntry {
    pub destination: String,
    pub reachable: bool,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    pub metric: RouteMetric,
    pub steps: Vec<String>,
}

/// Structured representation of one source's plan with resolved names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub source: String,
    pub threshold: Threshold,
    pub fallbacks: usize,
    pub routes: Vec<RouteSummaryEntry>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with airport names.
    pub fn from_plan(graph: &WeightedGraph, plan: &RoutePlan) -> Self {
        let routes = plan
            .routes
            .iter()
            .map(|route| RouteSummaryEntry {
                destination: graph.name(route.destination).to_string(),
                reachable: route.is_reachable(),
                hops: route.hop_count(),
                mileage: route.mileage,
                metric: route.metric,
                steps: route
                    .steps
                    .iter()
                    .map(|&node| graph.name(node).to_string())
                    .collect(),
            })
            .collect();

        Self {
            source: graph.name(plan.source).to_string(),
            threshold: plan.threshold,
            fallbacks: plan.fallback_count(),
            routes,
        }
    }

    /// Human-readable listing, one destination per line.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Routes from {} (threshold: {} segments, {} fallbacks):",
            self.source, self.threshold, self.fallbacks
        );

        for entry in &self.routes {
            if !entry.reachable {
                let _ = writeln!(buffer, "  {}: unreachable", entry.destination);
                continue;
            }
            let _ = writeln!(
                buffer,
                "  {}: {} ({} segments, {} miles, by {})",
                entry.destination,
                entry.steps.join(ROUTE_SEPARATOR),
                entry.hops,
                entry.mileage.unwrap_or_default(),
                entry.metric
            );
        }

        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoutePlanner;

    fn network() -> WeightedGraph {
        let mut graph = WeightedGraph::from_names(["AAA", "BBB", "CCC"]).unwrap();
        graph.add_edge(0, 1, 5).unwrap();
        graph.add_edge(1, 0, 5).unwrap();
        graph
    }

    #[test]
    fn route_file_separates_sources_with_blank_lines() {
        let graph = network();
        let plans = RoutePlanner::new(&graph)
            .plan_all(Threshold::unlimited(3))
            .unwrap();

        let rendered = render_route_file(&plans, &graph);
        assert_eq!(
            rendered,
            "AAA\nAAA->BBB\nAAA\n\nBBB->AAA\nBBB\nBBB\n\nCCC\nCCC\nCCC"
        );
    }

    #[test]
    fn summary_marks_unreachable_destinations() {
        let graph = network();
        let plan = RoutePlanner::new(&graph)
            .plan(0, Threshold::unlimited(3))
            .unwrap();

        let summary = RouteSummary::from_plan(&graph, &plan);
        assert_eq!(summary.source, "AAA");
        assert_eq!(summary.routes[1].steps, vec!["AAA", "BBB"]);
        assert_eq!(summary.routes[1].mileage, Some(5));
        assert!(!summary.routes[2].reachable);

        let text = summary.render_plain();
        assert!(text.contains("BBB: AAA->BBB (1 segments, 5 miles, by mileage)"));
        assert!(text.contains("CCC: unreachable"));
    }
}
