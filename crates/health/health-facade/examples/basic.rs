//! Basic example demonstrating health metric analysis
//!
//! Run with: cargo run --example basic -p health-facade

use health_facade::{analyze, AnalysisConfig, Polarity, SummaryView, Table};

fn main() {
    println!("=== Health Analysis Example ===\n");

    let rows = vec![
        vec!["2024-03-01", "7200", "61", "7.5"],
        vec!["2024-03-02", "6900", "60", "7.0"],
        vec!["2024-03-03", "7400", "62", ""],
        vec!["2024-03-04", "7100", "61", "6.5"],
        vec!["2024-03-05", "7000", "60", "7.2"],
        vec!["2024-03-06", "7300", "61", "7.8"],
        vec!["2024-03-07", "6800", "62", "7.1"],
        vec!["2024-03-08", "8100", "60", "7.4"],
        vec!["2024-03-09", "8400", "61", "7.0"],
        vec!["2024-03-10", "8200", "79", "5.1"],
        vec!["2024-03-11", "8600", "62", "7.3"],
        vec!["2024-03-12", "8300", "61", "7.6"],
        vec!["2024-03-13", "8700", "60", "7.2"],
        vec!["2024-03-14", "8500", "61", "7.4"],
    ];
    let table = Table::from_string_rows(["date", "steps", "resting_heart_rate", "sleep"], rows)
        .expect("well-formed table");

    let config = AnalysisConfig::builder()
        .polarity("sleep", Polarity::HigherIsBetter)
        .build()
        .expect("valid configuration");

    let result = analyze(&table, &config).expect("analysis succeeds");

    println!("--- Rolling Averages ---");
    for (key, value) in SummaryView::from_result(&result, config.display_precision).0 {
        println!("  {:<28} {:>10.2}", key, value);
    }

    println!("\n--- Trends ---");
    for (metric, trend) in &result.trends {
        match trend.delta {
            Some(delta) => println!("  {:<20} {:<18} delta {:+.2}", metric, trend.direction, delta),
            None => println!("  {:<20} {}", metric, trend.direction),
        }
    }

    println!("\n--- Anomalies ---");
    if result.anomalies.is_empty() {
        println!("  none");
    }
    for anomaly in &result.anomalies {
        println!(
            "  {} {:<20} value={:.1} mean={:.1} score={:+.2} ({:?})",
            anomaly.date, anomaly.metric, anomaly.value, anomaly.mean, anomaly.score, anomaly.severity
        );
    }

    println!("\n=== Example Complete ===");
}
