//! regsheet - flatten camp registration orders into a roster.
//!
//! Fetches recent Square orders for the configured location, resolves each
//! line item's modifiers against the catalog, and writes one row per
//! registration to CSV (stdout or a file) or to a Google Sheet.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use regsheet_core::api::{sheets_access_token, SheetsClient, SquareClient};
use regsheet_core::catalog::ListStrategy;
use regsheet_core::report::{write_csv, write_to_sheet};
use regsheet_core::{run_report, Config, ReportSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Sheets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListLookupArg {
    /// Fetch each modifier list when a modifier first needs it
    Lazy,
    /// Fetch all modifier lists up front, one batch per catalog version
    Prefetch,
}

impl From<ListLookupArg> for ListStrategy {
    fn from(arg: ListLookupArg) -> Self {
        match arg {
            ListLookupArg::Lazy => ListStrategy::Lazy,
            ListLookupArg::Prefetch => ListStrategy::Prefetch,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "regsheet", version, about = "Flatten Square registration orders into a roster")]
struct Cli {
    /// Where to send the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// CSV output file (defaults to stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Maximum number of orders to fetch (overrides SQUARE_FETCH_LIMIT)
    #[arg(long)]
    limit: Option<u32>,

    /// How modifier-list definitions are fetched
    #[arg(long, value_enum, default_value_t = ListLookupArg::Lazy)]
    list_lookup: ListLookupArg,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stderr keeps stdout clean for CSV
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    // All configuration is checked before the first network call
    let config = Config::load().context("Failed to load configuration")?;
    let square = config.validate_square()?;
    let sheets = match cli.format {
        OutputFormat::Sheets => Some(config.validate_sheets()?),
        OutputFormat::Csv => None,
    };

    let client = SquareClient::new(square.environment, square.access_token.clone())
        .context("Failed to build Square client")?;

    let settings = ReportSettings {
        location_ids: vec![square.location_id.clone()],
        limit: cli.limit.unwrap_or(square.fetch_limit),
        list_strategy: cli.list_lookup.into(),
    };

    info!(location = %square.location_id, limit = settings.limit, "Fetching recent orders");
    let rows = run_report(&client, &client, &settings).await;

    match sheets {
        // Sheet failures are logged, not fatal
        Some(sheets) => match sheets_access_token(&sheets.credentials).await {
            Ok(token) => {
                let sheets_client = SheetsClient::new(token).context("Failed to build Google Sheets client")?;
                let _ = write_to_sheet(&sheets_client, &sheets.target, &rows).await;
            }
            Err(e) => error!(error = %e, "Could not authorize Google Sheets access"),
        },
        None => match cli.output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_csv(file, &rows).context("Failed to write CSV")?;
                info!(path = %path.display(), rows = rows.len(), "Wrote CSV");
            }
            None => write_csv(io::stdout().lock(), &rows).context("Failed to write CSV")?,
        },
    }

    Ok(())
}
