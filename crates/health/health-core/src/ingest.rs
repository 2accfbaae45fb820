//! Table ingestion and normalization.
//!
//! Turns a raw [`Table`] into one [`MetricSeries`] per numeric column. Rows
//! without a parseable date are dropped and counted; missing or non-numeric
//! cells are excluded from their metric rather than imputed.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use health_api::IngestionConfig;
use health_spi::{
    Cell, DateGap, IngestionReport, InputError, MetricCoverage, MetricSeries, Observation, Result,
    Table,
};

/// Header names recognised as the date column, in priority order.
pub const DATE_COLUMN_CANDIDATES: &[&str] = &["date", "day", "timestamp", "datetime", "time"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Ingestion output: one series per metric plus the ingestion report.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    /// Metric series ordered by name.
    pub series: Vec<MetricSeries>,
    pub report: IngestionReport,
}

/// Validate and normalize a table.
pub fn ingest(table: &Table, config: &IngestionConfig) -> Result<NormalizedTable> {
    if table.is_empty() {
        return Err(InputError::EmptyTable.into());
    }

    let date_index = locate_date_column(table, config)?;
    let user_index = config
        .user_column
        .as_deref()
        .and_then(|name| table.column_index(name))
        .filter(|&index| index != date_index);

    let total_rows = table.row_count();
    let mut dated: Vec<(NaiveDate, &[Cell])> = table
        .rows()
        .iter()
        .filter_map(|row| parse_date(&row[date_index]).map(|date| (date, row.as_slice())))
        .collect();
    let dropped_rows = total_rows - dated.len();

    if dated.is_empty() {
        return Err(InputError::NoUsableRows {
            total: total_rows,
            dropped: dropped_rows,
        }
        .into());
    }

    // Stable: rows sharing a date keep their input order, so later rows win.
    dated.sort_by_key(|(date, _)| *date);
    let duplicate_dates = dated.windows(2).filter(|pair| pair[0].0 == pair[1].0).count();

    let user_id = user_index.and_then(|index| {
        table
            .rows()
            .iter()
            .find_map(|row| row[index].to_text())
    });

    let mut series = BTreeMap::new();
    let mut coverage = BTreeMap::new();
    let mut ignored_columns = Vec::new();

    for (index, column) in table.columns().iter().enumerate() {
        if index == date_index || Some(index) == user_index {
            continue;
        }
        let name = column.trim().to_string();

        let numeric = dated.iter().filter(|(_, row)| row[index].as_f64().is_some()).count();
        let text = dated
            .iter()
            .filter(|(_, row)| matches!(row[index], Cell::Text(_)))
            .count();

        if !is_metric_column(numeric, text, config.min_numeric_fraction) {
            ignored_columns.push(name);
            continue;
        }

        let observations = dated
            .iter()
            .filter_map(|(date, row)| row[index].as_f64().map(|value| Observation::new(*date, value)))
            .collect();
        let metric = MetricSeries::new(name.clone(), observations);

        coverage.insert(
            name.clone(),
            MetricCoverage {
                observations: metric.len(),
                missing: dated.len() - numeric,
                first: metric.first().map(|obs| obs.date),
                last: metric.last().map(|obs| obs.date),
                gaps: find_gaps(&metric),
            },
        );
        series.insert(name, metric);
    }

    if series.is_empty() {
        return Err(InputError::NoMetricColumns.into());
    }

    let report = IngestionReport {
        date_column: table.columns()[date_index].trim().to_string(),
        user_id,
        total_rows,
        dropped_rows,
        duplicate_dates,
        ignored_columns,
        coverage,
    };

    Ok(NormalizedTable {
        series: series.into_values().collect(),
        report,
    })
}

fn locate_date_column(table: &Table, config: &IngestionConfig) -> Result<usize> {
    if let Some(name) = config.date_column.as_deref() {
        return table
            .column_index(name)
            .ok_or_else(|| InputError::DateColumnNotFound(name.to_string()).into());
    }
    DATE_COLUMN_CANDIDATES
        .iter()
        .find_map(|candidate| table.column_index(candidate))
        .ok_or_else(|| InputError::NoDateColumn.into())
}

fn is_metric_column(numeric: usize, text: usize, min_fraction: f64) -> bool {
    numeric > 0 && numeric as f64 / (numeric + text) as f64 >= min_fraction
}

/// Parse a date cell. Datetimes are truncated to their calendar day.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Text(text) => parse_date_str(text),
        // Compact YYYYMMDD dates arrive as numbers.
        Cell::Number(value) if value.fract() == 0.0 && (1e7..1e8).contains(value) => {
            NaiveDate::parse_from_str(&format!("{}", *value as i64), "%Y%m%d").ok()
        }
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
}

fn find_gaps(series: &MetricSeries) -> Vec<DateGap> {
    series
        .observations
        .windows(2)
        .filter_map(|pair| {
            let days = (pair[1].date - pair[0].date).num_days();
            (days > 1).then(|| DateGap {
                after: pair[0].date,
                before: pair[1].date,
                missing_days: days - 1,
            })
        })
        .collect()
}
