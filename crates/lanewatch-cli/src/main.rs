//! CLI driver for lanewatch — runs the weekly corridor pipeline against a
//! local SQLite database.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lanewatch")]
#[command(about = "lanewatch — trade corridor health monitoring")]
#[command(version)]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, default_value = "lanewatch.db")]
    db: PathBuf,

    /// Optional pipeline config TOML; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or migrate) the database.
    Init,

    /// Register the demo UK-India Textiles lane.
    Seed,

    /// Import observations for a lane from a JSON file.
    Import {
        /// Lane name, e.g. "UK-India".
        #[arg(long)]
        lane: String,

        /// JSON file: an array of classified observations, or (with --raw)
        /// a source context plus raw signals for the keyword classifier.
        #[arg(long)]
        file: PathBuf,

        /// Treat the file as raw signals and classify them with the
        /// keyword fallback classifier.
        #[arg(long)]
        raw: bool,
    },

    /// Run the pipeline for one week.
    Run {
        /// Lane name.
        #[arg(long, default_value = "UK-India")]
        lane: String,

        /// Week start date (YYYY-MM-DD, a Monday). Defaults to the
        /// current week.
        #[arg(long)]
        week: Option<chrono::NaiveDate>,
    },

    /// Clear the CUSUM accumulators for a lane after an alarm has been
    /// acted on.
    ResetCusum {
        /// Lane name.
        #[arg(long, default_value = "UK-India")]
        lane: String,
    },

    /// Show the latest health records and index snapshots for a lane.
    Status {
        /// Lane name.
        #[arg(long, default_value = "UK-India")]
        lane: String,

        /// How many periods to show.
        #[arg(long, default_value = "8")]
        periods: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init => commands::init(&cli.db),
        Commands::Seed => commands::seed(&cli.db),
        Commands::Import { lane, file, raw } => {
            commands::ingest::import(&cli.db, &lane, &file, raw)
        }
        Commands::Run { lane, week } => {
            commands::run::run(&cli.db, cli.config.as_deref(), &lane, week)
        }
        Commands::ResetCusum { lane } => {
            commands::run::reset_cusum(&cli.db, cli.config.as_deref(), &lane)
        }
        Commands::Status { lane, periods } => {
            commands::status::status(&cli.db, &lane, periods)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
