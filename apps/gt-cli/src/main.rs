//! # gt-cli
//!
//! Command-line front end for the goal tracker.
//!
//! - `gt list` — show every goal with per-year progress
//! - `gt check` — report load problems and skipped entries
//! - `gt update <goal> <year> <achieved>` — record progress and save
//! - `gt add-example <title> --years N` — append a generated example goal

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gt_goal::TrackerConfig;
use tracing_subscriber::EnvFilter;

/// Track multi-year goals and their yearly phases.
#[derive(Parser)]
#[command(name = "gt", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Goals file to use instead of the configured one.
    #[arg(long)]
    goals_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all goals and their progress.
    List,
    /// Report load conditions and every skipped or adjusted entry.
    Check,
    /// Set the achieved value for one year of a goal, then save.
    Update {
        /// Goal number as shown by `gt list`.
        goal: usize,
        /// Phase year.
        year: i64,
        /// New achieved value (clamped to 0..=target).
        #[arg(allow_negative_numbers = true)]
        achieved: i64,
        /// Save even if entries were skipped on load (they are dropped from the file).
        #[arg(long)]
        force: bool,
    },
    /// Append a generated example goal, then save.
    AddExample {
        /// Title of the new goal.
        title: String,
        /// Number of yearly phases to generate.
        #[arg(long, default_value_t = 12)]
        years: u32,
        /// Save even if the goals file could not be parsed (its content is replaced).
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gt_goal=info".parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let mut config = TrackerConfig::load_or_default(&project_root)?;
    if let Some(goals_file) = cli.goals_file {
        config.goals_file = goals_file;
    }
    tracing::debug!("goals file: {}", config.goals_file.display());

    match &cli.command {
        Commands::List => commands::goal::list(&config),
        Commands::Check => commands::goal::check(&config),
        Commands::Update {
            goal,
            year,
            achieved,
            force,
        } => commands::goal::update(&config, *goal, *year, *achieved, *force),
        Commands::AddExample {
            title,
            years,
            force,
        } => commands::goal::add_example(&config, title, *years, *force),
    }
}
