mod database;
mod error;
mod ingest;
mod utils;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::database::repo::CatalogStore;
use crate::ingest::importer::Importer;
use crate::utils::audit::AuditLog;
use crate::utils::config;

/// Insert artworks from a CSV file into the catalog database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the CSV file.
    csv_file: PathBuf,

    /// The path to the SQLite database file.
    db_file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let started_at = Local::now();

    let settings = config::load_settings().context("Failed to load settings")?;

    info!("Source: {:?}", args.csv_file);
    info!("DB: {:?}", args.db_file);

    let mut store = CatalogStore::open(&args.db_file)
        .with_context(|| format!("Failed to open database {:?}", args.db_file))?;
    let mut audit = AuditLog::create(&settings.audit_log_dir, started_at)
        .context("Failed to create audit log")?;
    info!("Audit log: {:?}", audit.path());

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {pos} records {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(120));

    let report = Importer::new(&mut store, &mut audit)
        .with_progress(progress)
        .import_file(&args.csv_file)
        .with_context(|| format!("Import of {:?} aborted", args.csv_file))?;

    info!(
        "Records: {} inserted, {} already present, {} skipped",
        report.inserted, report.existing, report.skipped
    );
    info!(
        "Medium links: {} added, {} already linked",
        report.links_added, report.links_existing
    );

    let counts = store.counts().context("Failed to count catalog rows")?;
    info!(
        "Catalog totals: {} artists, {} departments, {} series, {} mediums, {} artworks, {} medium links",
        counts.artists,
        counts.departments,
        counts.series,
        counts.mediums,
        counts.artworks,
        counts.artwork_mediums
    );

    println!("Artwork processing complete.");
    Ok(())
}
