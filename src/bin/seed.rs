//! biodiversity-seed - populate the database and print every record

use clap::Parser;
use std::path::PathBuf;
use biodiversity::ui::{self, Icons};
use biodiversity::{BiodiversityStore, Dataset, config, report, seed};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "biodiversity-seed")]
#[command(version)]
#[command(about = "Seed the biodiversity database and print every record and relationship")]
#[command(long_about = r#"
Inserts species, locations, DNA sequences and species-location links,
skipping any record whose natural key is already present, then prints
a report of the whole store. Safe to run repeatedly.

Example usage:
  biodiversity-seed
  biodiversity-seed --database data/bio.db --dataset survey.json --summary
"#)]
struct Cli {
    /// Path to the database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON dataset to seed instead of the built-in sample
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Print created/existing/unresolved counts after the report
    #[arg(long)]
    summary: bool,

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
    config::ensure_db_dir(&database)?;

    let dataset_path = cli
        .dataset
        .or_else(|| cfg.as_ref().and_then(|c| c.dataset.as_ref()).map(PathBuf::from));
    let dataset = match dataset_path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path.display());
            Dataset::from_json_file(&path)?
        }
        None => Dataset::sample(),
    };

    ui::info("Database", &database.display().to_string());
    let store = BiodiversityStore::open(&database)?;
    let summary = seed::seed(&store, &dataset)?;

    print!("{}", report::render(&store)?);

    if cli.summary {
        ui::section(Icons::STATS, "Seed summary");
        eprintln!("{}", ui::seed_summary_table(&summary));
        ui::section(Icons::DATABASE, "Stored rows");
        eprintln!("{}", ui::stats_table(&store.stats()?));
    }

    let unresolved = summary.sequences.unresolved + summary.links.unresolved;
    if unresolved > 0 {
        ui::warn(&format!("{} candidates skipped: referenced species or location not found", unresolved));
    }
    ui::success(&format!(
        "Seed complete {}",
        ui::dim(&format!("({} new rows)", summary.total_created()))
    ));

    Ok(())
}
