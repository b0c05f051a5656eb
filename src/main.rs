use carrental::application::service::RentalService;
use carrental::config::{EngineConfig, ReloadPolicy};
use carrental::domain::ports::ReservationStoreRef;
use carrental::infrastructure::in_memory::{InMemoryCompanyStore, InMemoryReservationStore};
#[cfg(feature = "storage-rocksdb")]
use carrental::infrastructure::rocksdb::RocksDBReservationStore;
use carrental::interfaces::csv::report_writer::ReportWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fleet file to load (repeatable, one company per file)
    #[arg(long = "fleet", required = true)]
    fleets: Vec<PathBuf>,

    /// Path to persistent reservation database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Seed for picking among free cars, for reproducible bookings
    #[arg(long)]
    seed: Option<u64>,

    /// Refuse to load a company whose name is already registered
    #[arg(long)]
    reject_reload: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn reservation_store(db_path: Option<PathBuf>) -> Result<ReservationStoreRef> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(path) = db_path {
        let store = RocksDBReservationStore::open(path).into_diagnostic()?;
        return Ok(Arc::new(store));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        tracing::warn!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }

    Ok(Arc::new(InMemoryReservationStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = EngineConfig {
        reload_policy: if cli.reject_reload {
            ReloadPolicy::Reject
        } else {
            ReloadPolicy::Overwrite
        },
        seed: cli.seed,
    };
    let service = RentalService::new(
        Arc::new(InMemoryCompanyStore::new()),
        reservation_store(cli.db_path)?,
        config,
    );
    let manager = service.manager();

    // A bad fleet file only costs that company; the error is already logged.
    let mut loaded = 0;
    for fleet in &cli.fleets {
        if manager.load_company_from_file(fleet).await.is_ok() {
            loaded += 1;
        }
    }
    info!(loaded, requested = cli.fleets.len(), "Fleet loading finished");

    manager.restore_reservations().await.into_diagnostic()?;

    let summary = manager.fleet_summary().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_summaries(summary).into_diagnostic()?;

    Ok(())
}
