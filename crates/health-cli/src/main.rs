//! # health-cli
//!
//! Command-line interface for health metric analysis.

mod loader;

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use health_facade::{
    analyze, chart_points, AnalysisConfig, AnalysisConfigBuilder, AnalysisResult, ChartPoint,
    Polarity, SummaryView,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use loader::{load_config, load_csv_table};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "health-cli")]
#[command(about = "Rolling averages, trends and anomalies for daily health metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: summary, trends, anomalies and timeseries
    Report(AnalysisArgs),

    /// Rolling averages keyed `<metric>_avg_<window>d`, rounded for display
    Summary(AnalysisArgs),

    /// Per-metric timeseries with a trailing-mean overlay
    Timeseries(AnalysisArgs),

    /// Flagged anomalies, chronological
    Anomalies(AnalysisArgs),
}

#[derive(Args, Debug, Default)]
struct AnalysisArgs {
    /// Input CSV file with a header row
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window in days for the rolling mean, trend and anomaly stages.
    /// Lowers the anomaly warm-up to fit unless --min-window is given
    #[arg(short, long)]
    window: Option<usize>,

    /// Long rolling window in days
    #[arg(long, conflicts_with = "no_long_window")]
    long_window: Option<usize>,

    /// Report only the short rolling window
    #[arg(long)]
    no_long_window: bool,

    /// Anomaly threshold in standard deviations
    #[arg(short, long)]
    sigma: Option<f64>,

    /// Observations required before a point can be flagged
    #[arg(long)]
    min_window: Option<usize>,

    /// Relative change below which a trend is stable
    #[arg(long)]
    stability: Option<f64>,

    /// Metric polarity as `name=higher` or `name=lower` (repeatable)
    #[arg(long = "polarity", value_parser = parse_polarity_arg)]
    polarities: Vec<(String, Polarity)>,

    /// Polarity for metrics without an explicit entry (higher, lower)
    #[arg(long)]
    fallback_polarity: Option<Polarity>,

    /// Name of the date column (detected when omitted)
    #[arg(long)]
    date_column: Option<String>,

    /// Name of the user identifier column
    #[arg(long)]
    user_column: Option<String>,

    /// Decimal places for displayed values
    #[arg(long)]
    precision: Option<u32>,

    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn parse_polarity_arg(raw: &str) -> CliResult<(String, Polarity)> {
    let (name, polarity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=higher|lower, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing metric name in '{}'", raw));
    }
    Ok((name.to_string(), polarity.parse()?))
}

/// Build the analysis configuration: file first, then flag overrides.
fn build_config(args: &AnalysisArgs) -> CliResult<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    let base_min_window = base.anomaly.min_window;
    let mut builder = AnalysisConfigBuilder::from_config(base);

    if let Some(window) = args.window {
        builder = builder
            .window(window)
            .trend_window(window)
            .anomaly_window(window);
        if args.min_window.is_none() && base_min_window > window {
            builder = builder.min_window(window);
        }
    }
    if args.no_long_window {
        builder = builder.long_window(None);
    } else if let Some(long_window) = args.long_window {
        builder = builder.long_window(Some(long_window));
    }
    if let Some(sigma) = args.sigma {
        builder = builder.sigma(sigma);
    }
    if let Some(min_window) = args.min_window {
        builder = builder.min_window(min_window);
    }
    if let Some(stability) = args.stability {
        builder = builder.stability_threshold(stability);
    }
    for (name, polarity) in &args.polarities {
        builder = builder.polarity(name, *polarity);
    }
    if let Some(polarity) = args.fallback_polarity {
        builder = builder.fallback_polarity(polarity);
    }
    if let Some(name) = &args.date_column {
        builder = builder.date_column(name);
    }
    if let Some(name) = &args.user_column {
        builder = builder.user_column(Some(name));
    }
    if let Some(precision) = args.precision {
        builder = builder.display_precision(precision);
    }

    builder.build().map_err(|e| e.to_string())
}

/// Load, validate and analyze the input file.
fn run_analysis(args: &AnalysisArgs) -> CliResult<(AnalysisConfig, AnalysisResult)> {
    let config = build_config(args)?;
    let table = load_csv_table(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "Loaded input"
    );

    let result = analyze(&table, &config).map_err(|e| e.to_string())?;
    tracing::info!(
        metrics = result.timeseries.len(),
        anomalies = result.anomalies.len(),
        dropped_rows = result.ingestion.dropped_rows,
        "Analysis complete"
    );
    if !result.ingestion.ignored_columns.is_empty() {
        tracing::debug!(columns = ?result.ingestion.ignored_columns, "Ignored non-numeric columns");
    }

    Ok((config, result))
}

/// Write JSON to the output file or stdout.
fn write_json<T: Serialize>(value: &T, output: Option<&Path>, compact: bool) -> CliResult<()> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
            let written = if compact {
                serde_json::to_writer(file, value)
            } else {
                serde_json::to_writer_pretty(file, value)
            };
            written.map_err(|e| format!("Failed to write JSON: {}", e))?;
            tracing::info!(path = %path.display(), "Results written");
        }
        None => {
            let json = if compact {
                serde_json::to_string(value)
            } else {
                serde_json::to_string_pretty(value)
            }
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    user_id: Option<&'a str>,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

fn run_report(args: AnalysisArgs) -> CliResult<()> {
    let (_, result) = run_analysis(&args)?;
    let report = Report {
        user_id: result.ingestion.user_id.as_deref(),
        result: &result,
    };
    write_json(&report, args.output.as_deref(), args.compact)
}

fn run_summary(args: AnalysisArgs) -> CliResult<()> {
    let (config, result) = run_analysis(&args)?;
    let view = SummaryView::from_result(&result, config.display_precision);
    write_json(&view, args.output.as_deref(), args.compact)
}

fn run_timeseries(args: AnalysisArgs) -> CliResult<()> {
    let (config, result) = run_analysis(&args)?;
    let charts: BTreeMap<&str, Vec<ChartPoint>> = result
        .timeseries
        .iter()
        .map(|(name, series)| {
            let points = chart_points(series, config.rolling.window, config.display_precision);
            (name.as_str(), points)
        })
        .collect();
    write_json(&charts, args.output.as_deref(), args.compact)
}

fn run_anomalies(args: AnalysisArgs) -> CliResult<()> {
    let (_, result) = run_analysis(&args)?;
    write_json(&result.anomalies, args.output.as_deref(), args.compact)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "health_cli=info".into()),
        )
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report(args) => run_report(args),
        Commands::Summary(args) => run_summary(args),
        Commands::Timeseries(args) => run_timeseries(args),
        Commands::Anomalies(args) => run_anomalies(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
