//! Skeleton command handler: keep the busiest spanning set of segments.

use std::path::Path;

use anyhow::{Context, Result};

use airroute_cli::output::write_output_file;
use airroute_lib::{build_skeleton, load_frequency_matrix, render_airport_frequencies};

pub const SKELETON_FILE: &str = "skeleton.txt";
pub const AIRPORT_FREQUENCIES_FILE: &str = "airportFrequencies.txt";

/// Handle the skeleton subcommand.
pub fn handle_skeleton(frequencies: &Path, output_dir: &Path) -> Result<()> {
    let matrix = load_frequency_matrix(frequencies).with_context(|| {
        format!(
            "failed to load frequency matrix from {}",
            frequencies.display()
        )
    })?;
    let skeleton = build_skeleton(&matrix)?;

    let skeleton_path = write_output_file(
        output_dir,
        SKELETON_FILE,
        &skeleton.connectivity.render_matrix(),
    )?;
    let totals = skeleton.airport_frequencies();
    let totals_path = write_output_file(
        output_dir,
        AIRPORT_FREQUENCIES_FILE,
        &render_airport_frequencies(&totals),
    )?;

    println!(
        "Kept {} of {} segments; wrote {} and {}",
        skeleton.connectivity.edge_count() / 2,
        matrix.edge_count(),
        skeleton_path.display(),
        totals_path.display()
    );
    Ok(())
}
