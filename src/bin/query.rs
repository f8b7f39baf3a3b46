//! biodiversity-query - run the demonstration lookups against the database

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use biodiversity::query::run_demo_on_file;
use biodiversity::ui;
use biodiversity::config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "biodiversity-query")]
#[command(version)]
#[command(about = "Run read-only lookups against the biodiversity database")]
struct Cli {
    /// Path to the database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database, cfg.as_ref());
    if !database.exists() {
        ui::warn(&format!("{} does not exist yet; run biodiversity-seed first", database.display()));
    }

    let results = run_demo_on_file(&database)?;

    match cli.format {
        Format::Text => print!("{}", results),
        Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}
