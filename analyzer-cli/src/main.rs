use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use analyzer_core::Transaction;
use analyzer_finance::{aggregate, demo_transactions};
use analyzer_ingest::{ingest_path, ingest_path_report, ParseReport};

mod app;
mod config;
mod report;
mod state;
mod tui;

use app::{Action, AppState};
use report::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "analyzer",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ANALYZER_BUILD_SHA"), ")"),
    about = "Credit-card statement analyzer: spend, rewards, and insights from a CSV"
)]
struct Cli {
    /// Log level when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a CSV statement (Date, Description, Amount) and print the dashboard
    Analyze {
        /// Path to the CSV statement
        #[arg(long)]
        csv: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Also report rows that were dropped while parsing
        #[arg(long)]
        verbose: bool,
    },

    /// Print the dashboard for the built-in demo statement
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Open the interactive terminal dashboard
    Dashboard {
        /// Load this CSV on start instead of showing the upload view
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Start with the demo statement loaded
        #[arg(long, conflicts_with = "csv")]
        demo: bool,
    },

    /// Manage ~/.analyzer/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output format (default from config, else text)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only list transactions whose merchant contains this text
    #[arg(long, default_value = "")]
    search: String,

    /// Maximum transaction rows in text output
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("warning: {e:#}; using default config");
            config::Config::default()
        }
    };

    let level = cli.log_level.clone().unwrap_or_else(|| cfg.logging.level.clone());
    init_logger(&level);
    debug!(?cli, "starting");

    match run(cli, cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cfg: config::Config) -> Result<()> {
    match cli.command {
        Command::Analyze {
            csv,
            output,
            verbose,
        } => {
            let report = ingest_path_report(&csv)
                .await
                .with_context(|| format!("importing {}", csv.display()))?;

            if verbose {
                print_dropped_rows(&report);
            }
            print_report(&report.transactions, &output, &cfg)?;
        }

        Command::Demo { output } => {
            print_report(&demo_transactions(), &output, &cfg)?;
        }

        Command::Dashboard { csv, demo } => {
            let mut state = AppState::default();
            if demo {
                state = state.reduce(Action::LoadDemo);
            } else if let Some(path) = csv {
                state = state.reduce(Action::UploadStarted);
                state = match ingest_path(&path).await {
                    Ok(txns) => state.reduce(Action::UploadSucceeded(txns)),
                    Err(e) => state.reduce(Action::UploadFailed(e.to_string())),
                };
            }
            tui::run_dashboard(state).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config()?;
            }
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn print_report(txns: &[Transaction], output: &OutputArgs, cfg: &config::Config) -> Result<()> {
    // ingest never yields an empty batch, and the demo set is fixed
    let analysis = aggregate(txns).context("no transactions to analyze")?;
    let format = output.format.unwrap_or(cfg.output.format);
    let limit = output.limit.or(cfg.output.table_limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &analysis, format, &output.search, limit)
}

fn print_dropped_rows(report: &ParseReport) {
    eprintln!(
        "Parsed {} rows, dropped {}",
        report.transactions.len(),
        report.dropped.len()
    );
    for (line, reason) in &report.dropped {
        eprintln!("  line {}: {}", line, reason);
    }
}

/// Initializes the tracing subscriber, writing to stderr.
fn init_logger(level: &str) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "analyzer={level},analyzer_core={level},analyzer_ingest={level},analyzer_finance={level}"
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
