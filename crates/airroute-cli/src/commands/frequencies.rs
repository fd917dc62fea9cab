//! Frequencies command handler: tally segment use across a route file.

use std::path::Path;

use anyhow::{Context, Result};

use airroute_cli::output::write_output_file;
use airroute_lib::load_route_frequencies;

/// File the frequency matrix is written to.
pub const FREQUENCIES_FILE: &str = "frequencies.txt";

/// Handle the frequencies subcommand.
pub fn handle_frequencies(routes: &Path, output_dir: &Path) -> Result<()> {
    let tally = load_route_frequencies(routes)
        .with_context(|| format!("failed to tally routes from {}", routes.display()))?;
    let path = write_output_file(output_dir, FREQUENCIES_FILE, &tally.render_matrix())?;
    println!(
        "Wrote frequencies for {} airports ({} segments) to {}",
        tally.node_count(),
        tally.edge_count(),
        path.display()
    );
    Ok(())
}
