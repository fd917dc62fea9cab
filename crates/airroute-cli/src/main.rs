mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airroute_cli::output::{resolve_output_dir, OutputFormat};

use crate::commands::frequencies::handle_frequencies;
use crate::commands::routes::{handle_routes, RoutesCommandArgs};
use crate::commands::skeleton::handle_skeleton;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airline route planning utilities")]
struct Cli {
    /// Directory generated files are written to (defaults to
    /// `AIRROUTE_OUTPUT_DIR`, then the current directory).
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan routes between every pair of airports and write routes.txt.
    Routes {
        /// Flight list: one `FROM TO MILES` flight per line.
        flights: PathBuf,
        /// Maximum segments per mileage-optimal route; 0 or less is unlimited.
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        threshold: i64,
        /// Print the plan for one airport instead of writing routes.txt.
        #[arg(long)]
        source: Option<String>,
        /// Output format for `--source`.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text, requires = "source")]
        format: OutputFormat,
    },
    /// Tally segment frequencies from a route file and write frequencies.txt.
    Frequencies {
        /// Route file produced by `routes`.
        routes: PathBuf,
    },
    /// Extract the skeleton network from a frequency matrix.
    Skeleton {
        /// Frequency matrix produced by `frequencies`.
        frequencies: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let output_dir = resolve_output_dir(cli.output_dir.as_deref());

    match cli.command {
        Command::Routes {
            flights,
            threshold,
            source,
            format,
        } => {
            let args = RoutesCommandArgs {
                flights,
                threshold,
                source,
                format,
            };
            handle_routes(&args, &output_dir)
        }
        Command::Frequencies { routes } => handle_frequencies(&routes, &output_dir),
        Command::Skeleton { frequencies } => handle_skeleton(&frequencies, &output_dir),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
