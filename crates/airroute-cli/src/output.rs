//! Output formatting and file placement for CLI subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use airroute_lib::RouteSummary;

/// Environment variable overriding the directory generated files land in.
pub const OUTPUT_DIR_ENV: &str = "AIRROUTE_OUTPUT_DIR";

/// How a single-source route plan is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per destination.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Pick the output directory: the explicit flag, then `AIRROUTE_OUTPUT_DIR`,
/// then the current directory.
pub fn resolve_output_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var(OUTPUT_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// Write `contents` to `dir/name`, creating `dir` when missing.
pub fn write_output_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Render a route summary in the requested format.
pub fn render_summary(summary: &RouteSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render_plain()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(summary)
                .context("failed to serialize route summary")?;
            json.push('\n');
            Ok(json)
        }
    }
}
