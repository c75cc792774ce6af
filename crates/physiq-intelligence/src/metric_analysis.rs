// ABOUTME: Full-series descriptive statistics, regression, and volatility for one metric
// ABOUTME: The unwindowed companion of the trend calculator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Full-series metric analysis.

use physiq_core::models::MetricKind;
use serde::{Deserialize, Serialize};

use crate::constants::trend;
use crate::statistics;
use crate::timeseries::TimeSeries;
use crate::MetricOutcome;

/// Descriptive statistics and fit quality of one metric over a full series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAnalysis {
    /// Latest non-null value
    pub current: f64,
    /// First non-null value
    pub start: f64,
    /// Minimum over the series
    pub min: f64,
    /// Maximum over the series
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    /// Absolute change from start to current
    pub total_change: f64,
    /// Percent change from start (0 for a zero baseline)
    pub total_change_percent: f64,
    /// Index-based regression slope over the whole series
    pub trend_slope: f64,
    /// Coefficient of determination of that fit
    pub r_squared: f64,
    /// Sample std of consecutive differences
    pub volatility: f64,
    /// Largest absolute single-step change
    pub largest_daily_change: f64,
}

/// Full-series analyzer for one metric.
pub struct MetricAnalyzer;

impl MetricAnalyzer {
    /// Analyze `metric` over the whole requested range (no windowing).
    ///
    /// Requires at least 2 non-null values. Like the trend fit, the
    /// regression runs against positional index rather than elapsed time.
    #[must_use]
    pub fn analyze(series: &TimeSeries, metric: MetricKind) -> MetricOutcome<MetricAnalysis> {
        let values = series.values(metric);
        let Some(fit) = statistics::linear_regression(&values) else {
            return MetricOutcome::insufficient(trend::MIN_POINTS, values.len());
        };

        let start = values[0];
        let current = values[values.len() - 1];
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let diffs: Vec<f64> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
        let largest_daily_change = diffs.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));

        MetricOutcome::ok(MetricAnalysis {
            current,
            start,
            min,
            max,
            mean: statistics::mean(&values),
            std: statistics::sample_std(&values),
            total_change: current - start,
            total_change_percent: statistics::percent_change(start, current),
            trend_slope: fit.slope,
            r_squared: fit.r_squared,
            volatility: statistics::sample_std(&diffs),
            largest_daily_change,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use physiq_core::models::Measurement;

    use super::*;

    fn series_of(weights: &[f64]) -> TimeSeries {
        let measurements = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Measurement {
                recorded_at: Utc.with_ymd_and_hms(2025, 2, 1, 7, 30, 0).single().unwrap()
                    + Duration::days(i as i64),
                weight_kg: weight,
                bmi: 24.0,
                body_fat_percent: 18.0,
                fat_free_weight_kg: weight * 0.8,
                body_water_percent: 58.0,
                skeletal_muscle_percent: 44.0,
                muscle_mass_kg: weight * 0.75,
                bone_mass_kg: 3.3,
                basal_metabolic_rate: 1700,
                subcutaneous_fat_percent: None,
                protein_percent: None,
                visceral_fat: None,
                metabolic_age: None,
                notes: None,
            })
            .collect();
        TimeSeries::from_unordered(measurements)
    }

    #[test]
    fn full_series_statistics() {
        let series = series_of(&[80.0, 78.5, 79.5, 77.0]);
        let analysis = MetricAnalyzer::analyze(&series, MetricKind::WeightKg)
            .into_ok()
            .unwrap();

        assert!((analysis.current - 77.0).abs() < 1e-9);
        assert!((analysis.start - 80.0).abs() < 1e-9);
        assert!((analysis.min - 77.0).abs() < 1e-9);
        assert!((analysis.max - 80.0).abs() < 1e-9);
        assert!((analysis.total_change - (-3.0)).abs() < 1e-9);
        assert!((analysis.total_change_percent - (-3.75)).abs() < 1e-9);
        // Largest single step is the 79.5 -> 77.0 drop.
        assert!((analysis.largest_daily_change - 2.5).abs() < 1e-9);
    }

    #[test]
    fn one_point_is_insufficient() {
        let series = series_of(&[80.0]);
        let outcome = MetricAnalyzer::analyze(&series, MetricKind::WeightKg);
        assert!(outcome.is_insufficient());
    }

    #[test]
    fn absent_optional_metric_is_insufficient() {
        let series = series_of(&[80.0, 79.0, 78.0]);
        let outcome = MetricAnalyzer::analyze(&series, MetricKind::VisceralFat);
        assert_eq!(outcome, MetricOutcome::insufficient(2, 0));
    }
}
