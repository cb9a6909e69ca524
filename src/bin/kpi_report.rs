//! Command-line KPI report: load a sales export, aggregate, print tables.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use saleskpi::{FileSource, KpiEngine, KpiSnapshot, Refresher, SnapshotStore};

/// Compute dashboard KPIs from a sales export.
#[derive(Parser, Debug)]
#[command(name = "kpi-report", version, about)]
struct Args {
    /// Sales export to aggregate (.csv or .json)
    #[arg(env = "SALESKPI_INPUT")]
    input: PathBuf,

    /// Rows to show in the ranked category table
    #[arg(long, default_value_t = 5, env = "SALESKPI_TOP")]
    top: usize,

    /// Write the full snapshot as pretty-printed JSON to this path
    #[arg(long, value_name = "PATH")]
    json_out: Option<PathBuf>,

    /// Re-read the export and reprint every N seconds
    #[arg(long, value_name = "SECONDS")]
    watch: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.watch {
        Some(seconds) => watch(&args, Duration::from_secs(seconds)).await,
        None => report_once(&args),
    }
}

/// One-shot mode: load, compute, print, optionally export JSON.
fn report_once(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let records = saleskpi::ingest::read_records(&args.input)?;
    let snapshot = KpiEngine::new().compute(&records);

    print_snapshot(&snapshot, args.top);

    if let Some(path) = &args.json_out {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &snapshot)?;
        println!("snapshot written to {}", path.display());
    }

    Ok(())
}

/// Watch mode: refresh on an interval, last snapshot wins, errors keep the
/// previous output on screen.
async fn watch(args: &Args, interval: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(SnapshotStore::new());
    let refresher = Refresher::new(
        FileSource::new(&args.input),
        Arc::clone(&store),
        interval,
    );

    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        match refresher.refresh_once() {
            Ok(true) => {
                if let Some(snapshot) = store.latest() {
                    print_snapshot(&snapshot, args.top);
                }
            }
            Ok(false) => {}
            Err(error) => warn!(%error, "refresh failed; keeping previous snapshot"),
        }
    }
}

fn print_snapshot(snapshot: &KpiSnapshot, top: usize) {
    let mut overview = Table::new();
    overview
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["KPI", "Value"]);
    overview
        .add_row(vec!["Records".to_string(), snapshot.record_count.to_string()])
        .add_row(vec!["Total sales".to_string(), money(snapshot.total_sales)])
        .add_row(vec!["Total profit".to_string(), money(snapshot.total_profit)])
        .add_row(vec![
            "Profit margin".to_string(),
            percent(snapshot.profit_margin),
        ])
        .add_row(vec![
            "Customer acquisition cost".to_string(),
            money(snapshot.customer_acquisition_cost),
        ])
        .add_row(vec![
            "Customer lifetime value".to_string(),
            money(snapshot.customer_lifetime_value),
        ])
        .add_row(vec![
            "Avg fulfillment time".to_string(),
            match snapshot.average_fulfillment_time {
                Some(days) => format!("{days:.2} days"),
                None => "n/a".to_string(),
            },
        ])
        .add_row(vec![
            "Return on investment".to_string(),
            percent(snapshot.return_on_investment),
        ]);
    println!("{overview}");

    if !snapshot.top_categories.is_empty() {
        let mut categories = Table::new();
        categories
            .load_preset(UTF8_FULL)
            .set_header(vec!["Category", "Sales"]);
        for (category, sales) in snapshot.top_categories.iter().take(top) {
            categories.add_row(vec![category.clone(), money(*sales)]);
        }
        println!("{categories}");
    }

    if !snapshot.sales_trend.is_empty() {
        let mut trend = Table::new();
        trend
            .load_preset(UTF8_FULL)
            .set_header(vec!["Half-year", "Sales"]);
        for point in &snapshot.sales_trend {
            trend.add_row(vec![point.period_start.to_string(), money(point.sales)]);
        }
        println!("{trend}");
    }

    if !snapshot.sales_by_region.is_empty() {
        let mut regions = Table::new();
        regions
            .load_preset(UTF8_FULL)
            .set_header(vec!["Region", "Sales"]);
        // HashMap order is arbitrary; sort for a stable report.
        let mut rows: Vec<_> = snapshot.sales_by_region.iter().collect();
        rows.sort_by(|a, b| b.1.total_cmp(a.1));
        for (region, sales) in rows {
            regions.add_row(vec![region.clone(), money(*sales)]);
        }
        println!("{regions}");
    }
}

fn money(value: f64) -> String {
    format!("${value:.2}")
}

fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}%")
    } else {
        // returnOnInvestment with zero sales is non-finite.
        "n/a".to_string()
    }
}
