//! BrentLab CLI — the dashboard's datasets and indicators without the terminal UI.
//!
//! Commands:
//! - `summary` — key indicators (average price, volatility, data points) for a range
//! - `series` — filtered price series with aligned change-point prices as CSV
//! - `change-points` — detected change points with their matched events
//! - `events` — the event timeline

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use brentlab_core::config::CsvConfig;
use brentlab_core::dates::format_label;
use brentlab_core::export::write_series_csv;
use brentlab_core::{fetch_snapshot, DashboardConfig, DateRange, DerivedView, Snapshot};

#[derive(Parser)]
#[command(
    name = "brentlab",
    about = "BrentLab CLI — Brent crude prices, change points and events"
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the data comes from and which dates to keep.
#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Path to a TOML config file. Defaults to the platform config file when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the price/change-point/event API.
    #[arg(long, global = true, conflicts_with = "csv_dir")]
    base_url: Option<String>,

    /// Read the three CSV files from this directory instead of the API.
    #[arg(long, global = true)]
    csv_dir: Option<PathBuf>,

    /// Start of the date range (YYYY-MM-DD, inclusive).
    #[arg(long, global = true)]
    start: Option<String>,

    /// End of the date range (YYYY-MM-DD, inclusive).
    #[arg(long, global = true)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the key indicators for the date range.
    Summary,
    /// Print the filtered series as CSV (date,price,change_point_price).
    Series {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List change points with their matched events.
    ChangePoints,
    /// List the event timeline.
    Events,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = resolve_config(&cli.source)?;
    let range = parse_range(&cli.source)?;

    let source = config.build_source()?;
    info!(source = source.name(), "fetching datasets");
    let snapshot = fetch_snapshot(source.as_ref())
        .with_context(|| format!("fetching data from {} source", source.name()))?;

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Summary => print_summary(&mut out, &snapshot, range)?,
        Commands::Series { output } => {
            let view = DerivedView::compute(&snapshot, range);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    write_series_csv(&view, BufWriter::new(file))?;
                    eprintln!("Wrote {} rows to {}", view.len(), path.display());
                }
                None => write_series_csv(&view, &mut out)?,
            }
        }
        Commands::ChangePoints => print_change_points(&mut out, &snapshot)?,
        Commands::Events => print_events(&mut out, &snapshot)?,
    }
    out.flush()?;
    Ok(())
}

/// Logs go to stderr so stdout stays clean for CSV. `RUST_LOG` overrides `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Config file (explicit or default) with command-line overrides applied.
fn resolve_config(args: &SourceArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    debug!(?config, "resolved configuration");
    Ok(config)
}

fn apply_overrides(config: &mut DashboardConfig, args: &SourceArgs) {
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
        config.csv = None;
    }
    if let Some(dir) = &args.csv_dir {
        config.csv = Some(CsvConfig::in_dir(dir));
    }
}

fn parse_range(args: &SourceArgs) -> Result<DateRange> {
    let start = parse_bound(args.start.as_deref(), "--start")?;
    let end = parse_bound(args.end.as_deref(), "--end")?;
    Ok(DateRange::new(start, end))
}

fn parse_bound(raw: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    raw.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .with_context(|| format!("{flag} must be YYYY-MM-DD"))
}

fn print_summary<W: Write>(out: &mut W, snapshot: &Snapshot, range: DateRange) -> Result<()> {
    let view = DerivedView::compute(snapshot, range);
    let stats = view.stats;
    writeln!(out, "Range:         {}", view.range)?;
    writeln!(out, "Average Price: ${:.2}", stats.average)?;
    writeln!(out, "Volatility:    {:.2}", stats.volatility)?;
    writeln!(out, "Data Points:   {}", stats.count)?;
    writeln!(out, "Change Points: {}", view.highlight_count())?;
    Ok(())
}

fn print_change_points<W: Write>(out: &mut W, snapshot: &Snapshot) -> Result<()> {
    for cp in &snapshot.change_points {
        let event_date = cp
            .event_date
            .map(format_label)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{}  {:<10}  {}",
            format_label(cp.change_point),
            event_date,
            cp.event_description
        )?;
    }
    Ok(())
}

fn print_events<W: Write>(out: &mut W, snapshot: &Snapshot) -> Result<()> {
    for event in &snapshot.events {
        writeln!(out, "{}: {}", format_label(event.date), event.description)?;
    }
    Ok(())
}
