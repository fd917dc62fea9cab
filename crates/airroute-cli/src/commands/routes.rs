//! Routes command handler: plan threshold-limited routes for every airport.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use airroute_cli::output::{render_summary, write_output_file, OutputFormat};
use airroute_lib::{load_flights, render_route_file, RoutePlanner, RouteSummary, Threshold};

/// File the full route table is written to.
pub const ROUTES_FILE: &str = "routes.txt";

/// Arguments for the routes command.
#[derive(Debug, Clone)]
pub struct RoutesCommandArgs {
    /// Flight list to load.
    pub flights: PathBuf,
    /// Raw segment threshold; zero or negative means unlimited.
    pub threshold: i64,
    /// Print a single source's plan instead of writing the route file.
    pub source: Option<String>,
    /// Format used when printing a single source.
    pub format: OutputFormat,
}

/// Handle the routes subcommand.
pub fn handle_routes(args: &RoutesCommandArgs, output_dir: &Path) -> Result<()> {
    let graph = load_flights(&args.flights)
        .with_context(|| format!("failed to load flights from {}", args.flights.display()))?;
    let threshold = Threshold::normalize(args.threshold, graph.node_count());
    let planner = RoutePlanner::new(&graph);

    if let Some(code) = args.source.as_deref() {
        let source = graph
            .resolve(code)
            .with_context(|| format!("cannot plan routes from '{code}'"))?;
        let plan = planner.plan(source, threshold)?;
        let summary = RouteSummary::from_plan(&graph, &plan);
        print!("{}", render_summary(&summary, args.format)?);
        return Ok(());
    }

    let plans = planner.plan_all(threshold)?;
    let fallbacks: usize = plans.iter().map(|plan| plan.fallback_count()).sum();
    let path = write_output_file(output_dir, ROUTES_FILE, &render_route_file(&plans, &graph))?;
    info!(
        airports = graph.node_count(),
        %threshold,
        fallbacks,
        "planned routes"
    );
    println!(
        "Wrote routes for {} airports (threshold: {} segments) to {}",
        graph.node_count(),
        threshold,
        path.display()
    );
    Ok(())
}
