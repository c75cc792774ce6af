// ABOUTME: Short-horizon linear extrapolation for body-composition metrics
// ABOUTME: Per-metric absence is a legitimate outcome, never a batch failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Linear prediction.
//!
//! Ordinary least squares over the most recent points only; confidence is
//! the R² of the fit on its own window. A metric without enough history
//! simply produces no prediction, and callers must treat that absence as
//! "not computable" rather than an error.

use physiq_core::models::MetricKind;
use serde::{Deserialize, Serialize};

use crate::constants::prediction;
use crate::statistics;
use crate::timeseries::TimeSeries;
use crate::{MetricOutcome, TrendDirection};

/// Advisory wording attached to every prediction batch.
const CONFIDENCE_NOTE: &str =
    "Predictions are estimates based on recent trends and may vary with lifestyle changes";

/// Extrapolated value of one metric at a future horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Latest observed value
    pub current_value: f64,
    /// Fitted value at the horizon
    pub predicted_value: f64,
    /// Predicted minus current
    pub change: f64,
    /// R² of the fit on the fitting window, in [0, 1]
    pub confidence: f64,
    /// Direction implied by the sign of the change
    pub trend: TrendDirection,
}

/// A prediction tagged with the metric it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPrediction {
    /// The predicted metric
    pub metric: MetricKind,
    /// The prediction itself
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Batch of predictions over several metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBatch {
    /// Extrapolation horizon in days
    pub prediction_period: usize,
    /// Measurements in the snapshot the batch was computed from
    pub base_data_points: usize,
    /// Per-metric predictions, in caller metric order; metrics without
    /// enough history are omitted
    pub predictions: Vec<MetricPrediction>,
    /// Advisory wording for consumers
    pub confidence_note: String,
}

/// Short-horizon linear predictor.
pub struct Predictor;

impl Predictor {
    /// Predict `metric` `days_ahead` steps past the last fitted index.
    ///
    /// The fit uses the last 30 (or fewer) non-null values, indexed
    /// positionally; the horizon extends the index axis, mirroring the
    /// index-based time model of the trend analyses. Returns `None` below
    /// 5 non-null values overall.
    #[must_use]
    pub fn predict(
        series: &TimeSeries,
        metric: MetricKind,
        days_ahead: usize,
    ) -> Option<Prediction> {
        let values = series.values(metric);
        if values.len() < prediction::MIN_POINTS {
            return None;
        }

        let window_start = values.len().saturating_sub(prediction::FITTING_WINDOW);
        let window = &values[window_start..];
        let fit = statistics::linear_regression(window)?;

        let horizon_index = (window.len() + days_ahead).saturating_sub(1) as f64;
        let predicted_value = fit.value_at(horizon_index);
        let current_value = values[values.len() - 1];
        let change = predicted_value - current_value;

        Some(Prediction {
            current_value,
            predicted_value,
            change,
            confidence: fit.r_squared,
            trend: TrendDirection::from_delta(change),
        })
    }

    /// Predict several metrics from one snapshot.
    ///
    /// Requires at least 10 measurements in the snapshot; within the batch,
    /// a metric that cannot be predicted is omitted while its siblings
    /// proceed.
    #[must_use]
    pub fn predict_batch(
        series: &TimeSeries,
        metrics: &[MetricKind],
        days_ahead: usize,
    ) -> MetricOutcome<PredictionBatch> {
        if series.len() < prediction::MIN_BATCH_MEASUREMENTS {
            return MetricOutcome::insufficient(
                prediction::MIN_BATCH_MEASUREMENTS,
                series.len(),
            );
        }

        let predictions = metrics
            .iter()
            .filter_map(|&metric| {
                Self::predict(series, metric, days_ahead)
                    .map(|prediction| MetricPrediction { metric, prediction })
            })
            .collect();

        MetricOutcome::ok(PredictionBatch {
            prediction_period: days_ahead,
            base_data_points: series.len(),
            predictions,
            confidence_note: CONFIDENCE_NOTE.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use physiq_core::models::Measurement;

    use super::*;

    fn daily_series(weights: &[f64]) -> TimeSeries {
        let measurements = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Measurement {
                recorded_at: Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).single().unwrap()
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
    fn linear_loss_extrapolates_linearly() {
        let weights: Vec<f64> = (0..10).map(|i| 80.0 - 0.5 * f64::from(i)).collect();
        let series = daily_series(&weights);
        let prediction =
            Predictor::predict(&series, MetricKind::WeightKg, 30).unwrap();

        // Slope -0.5 per step, 30 steps ahead of the last point.
        assert!((prediction.current_value - 75.5).abs() < 1e-9);
        assert!((prediction.predicted_value - 60.5).abs() < 1e-6);
        assert!((prediction.confidence - 1.0).abs() < 1e-9);
        assert_eq!(prediction.trend, TrendDirection::Decreasing);
    }

    #[test]
    fn four_points_produce_no_prediction() {
        let series = daily_series(&[80.0, 79.5, 79.0, 78.5]);
        assert!(Predictor::predict(&series, MetricKind::WeightKg, 30).is_none());
    }

    #[test]
    fn small_snapshot_fails_the_batch_gate() {
        let series = daily_series(&[80.0, 79.5, 79.0, 78.5, 78.0]);
        let outcome = Predictor::predict_batch(&series, &MetricKind::KEY_METRICS, 30);
        assert_eq!(outcome, MetricOutcome::insufficient(10, 5));
    }

    #[test]
    fn batch_omits_sparse_metrics_without_failing() {
        let weights: Vec<f64> = (0..20).map(|i| 80.0 - 0.2 * f64::from(i)).collect();
        let mut measurements: Vec<Measurement> =
            daily_series(&weights).measurements().to_vec();
        // Metabolic age reported on only the last 3 measurements.
        for m in measurements.iter_mut().rev().take(3) {
            m.metabolic_age = Some(32);
        }
        let series = TimeSeries::from_unordered(measurements);

        let batch = Predictor::predict_batch(
            &series,
            &[MetricKind::MetabolicAge, MetricKind::WeightKg],
            30,
        )
        .into_ok()
        .unwrap();

        assert_eq!(batch.predictions.len(), 1);
        assert_eq!(batch.predictions[0].metric, MetricKind::WeightKg);
        assert_eq!(batch.base_data_points, 20);
    }
}
