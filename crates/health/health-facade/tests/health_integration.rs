//! Integration tests for health-facade

use health_facade::{
    analyze, AnalysisConfig, AnalysisError, Cell, InputError, Polarity, SummaryView, Table,
    TrendDirection,
};

fn daily_table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let headers = std::iter::once("date").chain(columns.iter().copied());
    let rows: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            std::iter::once(format!("2024-04-{:02}", i + 1))
                .chain(row.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();
    Table::from_string_rows(headers, rows).unwrap()
}

fn steps(values: &[f64]) -> Table {
    let rows: Vec<Vec<String>> = values.iter().map(|v| vec![v.to_string()]).collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
    daily_table(&["steps"], &rows)
}

#[test]
fn test_scenario_a_spike_after_flat_week() {
    let table = steps(&[1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 9000.0]);
    let result = analyze(&table, &AnalysisConfig::default()).unwrap();

    let summary = &result.summary["steps"];
    assert!((summary.value() - 15000.0 / 7.0).abs() < 1e-9);
    assert_eq!(summary.short.observations, 7);
    assert!(!summary.is_partial());

    let view = SummaryView::from_result(&result, 1);
    assert_eq!(view.get("steps_avg_7d"), Some(2142.9));

    assert_eq!(result.anomalies.len(), 1);
    let spike = &result.anomalies[0];
    assert_eq!(spike.value, 9000.0);
    assert_eq!(spike.date.to_string(), "2024-04-08");
    assert_eq!(spike.mean, 1000.0);

    let trend = &result.trends["steps"];
    assert!(trend.recent_mean.unwrap() > 1000.0);
    assert_eq!(trend.direction, TrendDirection::InsufficientData);
}

#[test]
fn test_scenario_b_two_rows() {
    let table = daily_table(&["steps"], &[&["4000"], &["12000"]]);
    let config = AnalysisConfig::builder().min_window(3).build().unwrap();
    let result = analyze(&table, &config).unwrap();

    assert!(result.anomalies.is_empty());
    assert_eq!(result.trends["steps"].direction, TrendDirection::InsufficientData);
    assert!(result.summary["steps"].is_partial());
}

#[test]
fn test_scenario_c_empty_table() {
    let table = Table::new(vec!["date".to_string(), "steps".to_string()], vec![]).unwrap();
    let error = analyze(&table, &AnalysisConfig::default()).unwrap_err();
    assert!(error.is_input_error());
}

#[test]
fn test_scenario_d_metric_all_missing() {
    let table = daily_table(&["steps"], &[&[""], &["NA"], &["unknown"]]);
    let error = analyze(&table, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(error, AnalysisError::InvalidInput(InputError::NoMetricColumns));
}

#[test]
fn test_no_date_column() {
    let table = Table::new(
        vec!["steps".to_string()],
        vec![vec![Cell::Number(1000.0)]],
    )
    .unwrap();
    let error = analyze(&table, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(error, AnalysisError::InvalidInput(InputError::NoDateColumn));
}

#[test]
fn test_short_metric_does_not_abort_others() {
    let table = daily_table(
        &["steps", "water_ml"],
        &[
            &["5000", ""],
            &["5200", ""],
            &["5100", ""],
            &["5300", "1800"],
            &["5000", ""],
            &["5200", ""],
            &["9000", ""],
            &["9100", ""],
            &["9050", ""],
            &["9200", ""],
        ],
    );
    let config = AnalysisConfig::builder().trend_window(3).build().unwrap();
    let result = analyze(&table, &config).unwrap();

    assert_eq!(result.timeseries["water_ml"].len(), 1);
    assert_eq!(result.trends["water_ml"].direction, TrendDirection::InsufficientData);
    assert_eq!(result.trends["steps"].direction, TrendDirection::Improving);
}

#[test]
fn test_result_key_sets_match() {
    let table = daily_table(
        &["steps", "heart_rate", "sleep_hours", "notes"],
        &[
            &["8000", "62", "7.5", "ok"],
            &["8500", "", "7.0", "tired"],
            &["7900", "64", "", ""],
            &["", "61", "8.0", "great"],
        ],
    );
    let result = analyze(&table, &AnalysisConfig::default()).unwrap();

    let series: Vec<&String> = result.timeseries.keys().collect();
    let summary: Vec<&String> = result.summary.keys().collect();
    let trends: Vec<&String> = result.trends.keys().collect();
    assert_eq!(series, summary);
    assert_eq!(series, trends);
    assert_eq!(series.len(), 3);
    assert_eq!(result.ingestion.ignored_columns, vec!["notes".to_string()]);
}

#[test]
fn test_polarity_flip_swaps_direction() {
    let table = daily_table(
        &["resting_heart_rate"],
        &[&["60"], &["60"], &["61"], &["70"], &["71"], &["72"]],
    );
    let base = AnalysisConfig::builder().trend_window(3).build().unwrap();
    let flipped = AnalysisConfig::builder()
        .trend_window(3)
        .polarity("resting_heart_rate", Polarity::LowerIsBetter.flipped())
        .build()
        .unwrap();

    let a = analyze(&table, &base).unwrap();
    let b = analyze(&table, &flipped).unwrap();
    assert_eq!(a.trends["resting_heart_rate"].direction, TrendDirection::Declining);
    assert_eq!(b.trends["resting_heart_rate"].direction, TrendDirection::Improving);
    assert_eq!(a.trends["resting_heart_rate"].delta, b.trends["resting_heart_rate"].delta);
}

#[test]
fn test_user_id_reported() {
    let table = Table::from_string_rows(
        ["user_id", "date", "steps"],
        vec![
            vec!["alice", "2024-04-01", "6000"],
            vec!["alice", "2024-04-02", "6100"],
        ],
    )
    .unwrap();
    let result = analyze(&table, &AnalysisConfig::default()).unwrap();
    assert_eq!(result.ingestion.user_id.as_deref(), Some("alice"));
    assert!(!result.timeseries.contains_key("user_id"));
}

#[test]
fn test_huge_values_keep_finite_statistics() {
    let result = analyze(&steps(&[1e308, 1e308]), &AnalysisConfig::default()).unwrap();
    assert_eq!(result.summary["steps"].value(), 1e308);

    let result = analyze(&steps(&[1e308; 14]), &AnalysisConfig::default()).unwrap();
    let summary = &result.summary["steps"];
    for mean in [summary.short.mean, summary.long.unwrap().mean] {
        assert!(mean.is_finite());
        assert!((mean - 1e308).abs() <= 1e308 * 1e-12);
    }

    let trend = &result.trends["steps"];
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert!(trend.delta.unwrap().is_finite());
    assert!(result.anomalies.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["summary"]["steps"]["short"]["mean"].is_number());
    assert!(json["trends"]["steps"]["relative_change"].is_number());
}
