//! Command-line driver.
//!
//! The store lives in a JSON snapshot file between invocations, so the
//! phases can be run separately:
//!
//! ```text
//! ramanujan --config search.json generate
//! ramanujan --config search.json search
//! ramanujan report --out results/
//! ```

use clap::{Parser, Subcommand};
use ramanujan::store::MemoryBackend;
use ramanujan::{logging, Error, Pipeline, SearchConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ramanujan", version)]
#[command(about = "Search for identities between closed forms and infinite expansions")]
struct Cli {
    /// Search configuration (JSON); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store snapshot, loaded before and saved after each command
    #[arg(short, long, global = true, default_value = "ramanujan-store.json")]
    snapshot: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate both sides into the store
    Generate,
    /// Find, refine and record matches
    Search,
    /// Generate, search and write a report
    Run {
        /// Directory for the report file
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Write the stored matches to a report file
    Report {
        /// Directory for the report file
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Remove every result and match from the store
    Clear,
    /// Print the effective configuration
    ShowConfig,
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    };
    if let Command::ShowConfig = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let backend = Arc::new(MemoryBackend::open(&cli.snapshot)?);
    let pipeline = Pipeline::open(config, Arc::clone(&backend))?;

    match cli.command {
        Command::Generate => {
            let summary = pipeline.generate()?;
            info!(
                lhs_stored = summary.lhs.report.stored,
                rhs_stored = summary.rhs.report.stored,
                failed = summary.lhs.failed + summary.rhs.failed,
                "generation complete"
            );
        }
        Command::Search => {
            let summary = pipeline.search()?;
            info!(confirmed = summary.confirmed(), "search complete");
        }
        Command::Run { out } => {
            let summary = pipeline.run(&out)?;
            info!(
                confirmed = summary.search.confirmed(),
                report = %summary.report.display(),
                "run complete"
            );
        }
        Command::Report { out } => {
            let path = pipeline.report(&out)?;
            println!("{}", path.display());
        }
        Command::Clear => pipeline.clear()?,
        Command::ShowConfig => {}
    }

    backend.save(&cli.snapshot)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&cli.log) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
