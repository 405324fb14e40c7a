// crates/morsel-cli/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use morsel_core::aggregate::daily_totals;
use morsel_core::ingestion::{discover_files, load_sales_data};
use morsel_core::outputs::write_output;
use morsel_core::transform::pink_morsel_sales;
use morsel_core::RunSummary;

/// One-shot ETL for Pink Morsel daily sales exports: clean, filter, write
/// the tidy output file, and render the daily sales chart.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the daily_sales_data_*.csv exports
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Destination for the tidy sales file
    #[arg(long, default_value = "output.csv")]
    output: PathBuf,

    /// Destination for the daily sales chart image
    #[arg(long, default_value = "sales_chart.png")]
    chart: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let files = discover_files(&cli.data_dir)?;
    info!(files = files.len(), dir = %cli.data_dir.display(), "discovered sales exports");

    let raw = load_sales_data(&files)
        .with_context(|| format!("failed to load sales data from {}", cli.data_dir.display()))?;
    let tidy = pink_morsel_sales(&raw)?;

    let rows_written = write_output(&tidy, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!("Wrote {rows_written} rows to {}", cli.output.display());

    let daily = daily_totals(&tidy)?;
    morsel_chart::render_sales_chart(&daily, &cli.chart)
        .with_context(|| format!("failed to render {}", cli.chart.display()))?;
    println!("Saved chart to {}", cli.chart.display());

    let summary = RunSummary {
        files_read: files.len(),
        rows_combined: raw.height(),
        rows_written,
        days_plotted: daily.len(),
    };
    info!(summary = %serde_json::to_string(&summary)?, "run complete");

    Ok(())
}
