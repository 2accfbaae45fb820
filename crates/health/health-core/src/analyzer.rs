//! End-to-end analysis: ingestion, per-metric stages, assembly.

use health_api::AnalysisConfig;
use health_spi::{
    AnalysisError, AnalysisResult, AnomalyDetector, MetricSeries, Polarity, Result, Table,
    TrendClassifier,
};

use crate::assembly::{assemble, MetricAnalysis};
use crate::detectors::TrailingZScoreDetector;
use crate::ingest::ingest;
use crate::rolling::rolling_summary;
use crate::trend::WindowTrendClassifier;

/// Runs the analysis pipeline with a fixed configuration.
///
/// Holds no mutable state, so one analyzer can serve concurrent callers.
pub struct HealthAnalyzer {
    config: AnalysisConfig,
    detector: Box<dyn AnomalyDetector>,
    classifier: Box<dyn TrendClassifier>,
}

impl HealthAnalyzer {
    /// Create an analyzer, validating the configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let detector = Box::new(TrailingZScoreDetector::from_config(&config.anomaly));
        let classifier = Box::new(WindowTrendClassifier::from_config(&config.trend));
        Ok(Self {
            config,
            detector,
            classifier,
        })
    }

    /// Replace the anomaly detector.
    pub fn with_detector(mut self, detector: impl AnomalyDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Replace the trend classifier.
    pub fn with_classifier(mut self, classifier: impl TrendClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a table.
    pub fn analyze(&self, table: &Table) -> Result<AnalysisResult> {
        let normalized = ingest(table, &self.config.ingestion)?;

        let mut unconfigured = Vec::new();
        let mut jobs = Vec::with_capacity(normalized.series.len());
        for series in normalized.series {
            match self.config.polarity.get(&series.name) {
                Some(polarity) => jobs.push((series, polarity)),
                None => unconfigured.push(series.name),
            }
        }
        if !unconfigured.is_empty() {
            return Err(AnalysisError::invalid_parameter(
                "polarity",
                format!("no polarity configured for {}", unconfigured.join(", ")),
            ));
        }

        let metrics = self.run_stages(jobs)?;
        assemble(metrics, normalized.report)
    }

    /// Run the rolling, trend and anomaly stages on one series.
    ///
    /// Fails if the detector flags a point inside its own warm-up.
    pub fn analyze_series(&self, series: MetricSeries, polarity: Polarity) -> Result<MetricAnalysis> {
        let summary = rolling_summary(&series, &self.config.rolling).ok_or_else(|| {
            AnalysisError::Assembly(format!("metric '{}' has an empty series", series.name))
        })?;
        let trend = self.classifier.classify(&series, polarity);
        let anomalies = self.detector.detect(&series);

        let warmup = self.detector.warmup();
        let first_eligible = series.observations.get(warmup).map(|obs| obs.date);
        if let Some(early) = anomalies
            .iter()
            .find(|a| first_eligible.map_or(true, |date| a.date < date))
        {
            return Err(AnalysisError::Assembly(format!(
                "anomaly for '{}' on {} falls inside the {}-observation warm-up",
                series.name, early.date, warmup
            )));
        }

        Ok(MetricAnalysis {
            series,
            summary,
            trend,
            anomalies,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn run_stages(&self, jobs: Vec<(MetricSeries, Polarity)>) -> Result<Vec<MetricAnalysis>> {
        jobs.into_iter()
            .map(|(series, polarity)| self.analyze_series(series, polarity))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_stages(&self, jobs: Vec<(MetricSeries, Polarity)>) -> Result<Vec<MetricAnalysis>> {
        use rayon::prelude::*;

        jobs.into_par_iter()
            .map(|(series, polarity)| self.analyze_series(series, polarity))
            .collect()
    }
}

impl std::fmt::Debug for HealthAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthAnalyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Analyze a table with the given configuration.
pub fn analyze(table: &Table, config: &AnalysisConfig) -> Result<AnalysisResult> {
    HealthAnalyzer::new(config.clone())?.analyze(table)
}

/// Run the per-metric stages on one series with the default stage implementations.
pub fn analyze_metric(
    series: &MetricSeries,
    polarity: Polarity,
    config: &AnalysisConfig,
) -> Result<MetricAnalysis> {
    HealthAnalyzer::new(config.clone())?.analyze_series(series.clone(), polarity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use health_spi::{Anomaly, InputError, TrendDirection, TrendResult};

    fn steps_table(values: &[&str]) -> Table {
        let rows: Vec<Vec<String>> = values
            .iter()
            .enumerate()
            .map(|(i, v)| vec![format!("2024-01-{:02}", i + 1), v.to_string()])
            .collect();
        Table::from_string_rows(["date", "steps"], rows).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = AnalysisConfig::default();
        config.anomaly.min_window = 0;
        assert!(matches!(
            HealthAnalyzer::new(config),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_unconfigured_polarity_is_rejected() {
        let table = Table::from_string_rows(
            ["date", "weight", "body_fat"],
            vec![vec!["2024-01-01", "80", "20"]],
        )
        .unwrap();
        let error = analyze(&table, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid parameter: polarity - no polarity configured for body_fat, weight"
        );
    }

    #[test]
    fn test_fallback_polarity_covers_unlisted_metrics() {
        let table = Table::from_string_rows(["date", "weight"], vec![vec!["2024-01-01", "80"]]).unwrap();
        let config = AnalysisConfig::builder()
            .fallback_polarity(Polarity::LowerIsBetter)
            .build()
            .unwrap();
        let result = analyze(&table, &config).unwrap();
        assert_eq!(result.trends["weight"].polarity, Polarity::LowerIsBetter);
    }

    #[test]
    fn test_input_errors_propagate() {
        let table = Table::from_string_rows(["date", "steps"], Vec::<Vec<&str>>::new()).unwrap();
        assert_eq!(
            analyze(&table, &AnalysisConfig::default()).unwrap_err(),
            AnalysisError::InvalidInput(InputError::EmptyTable)
        );
    }

    #[test]
    fn test_analyze_metric_on_single_series() {
        let table = steps_table(&["100", "200", "300"]);
        let result = analyze(&table, &AnalysisConfig::default()).unwrap();
        let series = &result.timeseries["steps"];

        let metric = analyze_metric(series, Polarity::HigherIsBetter, &AnalysisConfig::default()).unwrap();
        assert_eq!(metric.summary, result.summary["steps"]);
        assert_eq!(metric.trend, result.trends["steps"]);
        assert!(metric.anomalies.is_empty());
    }

    struct EveryPointDetector;

    impl AnomalyDetector for EveryPointDetector {
        fn detect(&self, series: &MetricSeries) -> Vec<Anomaly> {
            series
                .observations
                .iter()
                .map(|obs| Anomaly {
                    metric: series.name.clone(),
                    date: obs.date,
                    value: obs.value,
                    mean: 0.0,
                    std_dev: 1.0,
                    threshold: 0.0,
                    score: obs.value,
                    severity: health_spi::AnomalySeverity::Warning,
                })
                .collect()
        }

        fn warmup(&self) -> usize {
            0
        }
    }

    struct NoisyDetector;

    impl AnomalyDetector for NoisyDetector {
        fn detect(&self, series: &MetricSeries) -> Vec<Anomaly> {
            EveryPointDetector.detect(series)
        }

        fn warmup(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_warmup_violation_is_rejected() {
        let analyzer = HealthAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .with_detector(NoisyDetector);
        let error = analyzer.analyze(&steps_table(&["1", "2", "3"])).unwrap_err();
        assert_eq!(
            error,
            AnalysisError::Assembly(
                "anomaly for 'steps' on 2024-01-01 falls inside the 2-observation warm-up"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_stage_fan_out_matches_per_series_runs() {
        // Same answer with and without the `parallel` feature.
        let rows: Vec<Vec<String>> = (1..=20)
            .map(|d| {
                vec![
                    format!("2024-01-{:02}", d),
                    format!("{}", 6000 + (d * 37) % 900 + if d == 15 { 9000 } else { 0 }),
                    format!("{}", 6.5 + (d % 4) as f64 * 0.5),
                    format!("{}", 58 + d % 5),
                ]
            })
            .collect();
        let table =
            Table::from_string_rows(["date", "steps", "sleep_hours", "resting_heart_rate"], rows)
                .unwrap();
        let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
        let result = analyzer.analyze(&table).unwrap();

        let normalized = ingest(&table, &analyzer.config().ingestion).unwrap();
        let metrics = normalized
            .series
            .into_iter()
            .map(|series| {
                let polarity = analyzer.config().polarity.get(&series.name).unwrap();
                analyzer.analyze_series(series, polarity).unwrap()
            })
            .collect();
        let expected = assemble(metrics, normalized.report).unwrap();

        assert_eq!(result, expected);
        assert_eq!(result.timeseries.len(), 3);
        assert!(!result.anomalies.is_empty());
    }

    struct AlwaysStable;

    impl TrendClassifier for AlwaysStable {
        fn classify(&self, series: &MetricSeries, polarity: Polarity) -> TrendResult {
            let mut trend = WindowTrendClassifier::default().classify(series, polarity);
            trend.direction = TrendDirection::Stable;
            trend
        }
    }

    #[test]
    fn test_custom_stages_are_used() {
        let analyzer = HealthAnalyzer::new(AnalysisConfig::default())
            .unwrap()
            .with_detector(EveryPointDetector)
            .with_classifier(AlwaysStable);
        let result = analyzer.analyze(&steps_table(&["1", "2", "3"])).unwrap();

        assert_eq!(result.anomalies.len(), 3);
        assert_eq!(
            result.anomalies[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(result.trends["steps"].direction, TrendDirection::Stable);
    }
}
