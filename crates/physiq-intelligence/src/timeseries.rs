// ABOUTME: Ordered in-memory measurement series the analyzers compute over
// ABOUTME: Sorts on ingestion and exposes non-null extraction, pairing, and windowing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! In-memory measurement series.
//!
//! A [`TimeSeries`] is an ephemeral value derived per request from one data
//! access snapshot. Construction sorts ascending by timestamp regardless of
//! caller order; every analyzer relies on that invariant and none of them
//! mutate the series.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use physiq_core::models::{Measurement, MetricKind};
use serde::{Deserialize, Serialize};

use crate::constants::frequency;
use crate::statistics;

/// Seconds per day, for fractional elapsed-day arithmetic.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// A time-ordered sequence of measurements.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    measurements: Vec<Measurement>,
}

impl TimeSeries {
    /// Build a series from a snapshot in any order.
    ///
    /// The snapshot is re-sorted ascending by timestamp; caller ordering is
    /// never trusted.
    #[must_use]
    pub fn from_unordered(mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by_key(|m| m.recorded_at);
        Self { measurements }
    }

    /// Number of measurements in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the series holds no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// The ordered measurements.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Earliest measurement, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Measurement> {
        self.measurements.first()
    }

    /// Latest measurement, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Measurement> {
        self.measurements.last()
    }

    /// Whole days between the first and last measurement; 0 below 2 points.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (last.recorded_at - first.recorded_at).num_days(),
            _ => 0,
        }
    }

    /// Non-null values of one metric in time order.
    #[must_use]
    pub fn values(&self, metric: MetricKind) -> Vec<f64> {
        self.measurements
            .iter()
            .filter_map(|m| metric.value_of(m))
            .collect()
    }

    /// Non-null values of one metric with their timestamps, in time order.
    #[must_use]
    pub fn dated_values(&self, metric: MetricKind) -> Vec<(DateTime<Utc>, f64)> {
        self.measurements
            .iter()
            .filter_map(|m| metric.value_of(m).map(|value| (m.recorded_at, value)))
            .collect()
    }

    /// Pairwise-complete observations of two metrics.
    ///
    /// Rows where either value is null are dropped for this pair only; other
    /// pairs over the same series keep their own complete rows.
    #[must_use]
    pub fn paired_values(&self, a: MetricKind, b: MetricKind) -> Vec<(f64, f64)> {
        self.measurements
            .iter()
            .filter_map(|m| Some((a.value_of(m)?, b.value_of(m)?)))
            .collect()
    }

    /// Sub-series of measurements within `window_days` of the latest one.
    ///
    /// An empty series windows to an empty series.
    #[must_use]
    pub fn window(&self, window_days: i64) -> Self {
        let Some(last) = self.last() else {
            return Self::default();
        };
        let cutoff = last.recorded_at - Duration::days(window_days);
        Self {
            measurements: self
                .measurements
                .iter()
                .filter(|m| m.recorded_at >= cutoff)
                .cloned()
                .collect(),
        }
    }

    /// How often measurements are taken; `None` below 2 measurements.
    #[must_use]
    pub fn frequency(&self) -> Option<MeasurementFrequency> {
        if self.measurements.len() < 2 {
            return None;
        }

        let intervals: Vec<f64> = self
            .measurements
            .windows(2)
            .map(|pair| (pair[1].recorded_at - pair[0].recorded_at).num_seconds() as f64
                / SECONDS_PER_DAY)
            .collect();
        let avg = statistics::mean(&intervals);

        let cadence = if avg <= frequency::DAILY_MAX_DAYS {
            SamplingCadence::Daily
        } else if avg <= frequency::FREQUENT_MAX_DAYS {
            SamplingCadence::Frequent
        } else if avg <= frequency::WEEKLY_MAX_DAYS {
            SamplingCadence::Weekly
        } else if avg <= frequency::MONTHLY_MAX_DAYS {
            SamplingCadence::Monthly
        } else {
            SamplingCadence::Infrequent
        };

        // Mode of the whole-day intervals; ties resolve to the smallest.
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for pair in self.measurements.windows(2) {
            *counts
                .entry((pair[1].recorded_at - pair[0].recorded_at).num_days())
                .or_insert(0) += 1;
        }
        let most_common = counts
            .into_iter()
            .max_by(|(days_a, count_a), (days_b, count_b)| {
                count_a.cmp(count_b).then(days_b.cmp(days_a))
            })
            .map_or(avg, |(days, _)| days as f64);

        Some(MeasurementFrequency {
            frequency: cadence,
            avg_days_between: avg,
            most_common_interval_days: most_common,
        })
    }
}

/// Measurement cadence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingCadence {
    /// Averaging one measurement a day or better
    Daily,
    /// Every couple of days
    Frequent,
    /// Roughly weekly
    Weekly,
    /// Roughly monthly
    Monthly,
    /// Sparser than monthly
    Infrequent,
}

/// Summary of how frequently measurements are taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementFrequency {
    /// Cadence band for the average interval
    pub frequency: SamplingCadence,
    /// Average days between consecutive measurements
    pub avg_days_between: f64,
    /// Most common whole-day interval between measurements
    pub most_common_interval_days: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn measurement(day: u32, weight: f64) -> Measurement {
        Measurement {
            recorded_at: Utc.with_ymd_and_hms(2025, 3, day, 8, 0, 0).single().unwrap(),
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
        }
    }

    #[test]
    fn ingestion_sorts_ascending() {
        let series =
            TimeSeries::from_unordered(vec![measurement(9, 79.0), measurement(3, 81.0)]);
        assert_eq!(series.values(MetricKind::WeightKg), vec![81.0, 79.0]);
        assert_eq!(series.span_days(), 6);
    }

    #[test]
    fn null_metric_values_are_dropped() {
        let mut sparse = measurement(4, 80.0);
        sparse.visceral_fat = Some(8);
        let series = TimeSeries::from_unordered(vec![measurement(3, 81.0), sparse]);

        assert_eq!(series.values(MetricKind::VisceralFat), vec![8.0]);
        assert_eq!(series.paired_values(MetricKind::WeightKg, MetricKind::VisceralFat).len(), 1);
    }

    #[test]
    fn window_keeps_the_recent_suffix() {
        let series = TimeSeries::from_unordered(vec![
            measurement(1, 82.0),
            measurement(10, 81.0),
            measurement(12, 80.0),
        ]);
        let recent = series.window(3);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.values(MetricKind::WeightKg), vec![81.0, 80.0]);
    }

    #[test]
    fn daily_cadence_detected() {
        let series = TimeSeries::from_unordered(vec![
            measurement(1, 82.0),
            measurement(2, 81.5),
            measurement(3, 81.2),
        ]);
        let freq = series.frequency().unwrap();
        assert_eq!(freq.frequency, SamplingCadence::Daily);
        assert!((freq.avg_days_between - 1.0).abs() < 1e-9);
        assert!((freq.most_common_interval_days - 1.0).abs() < 1e-9);
    }

    #[test]
    fn frequency_needs_two_measurements() {
        let series = TimeSeries::from_unordered(vec![measurement(1, 82.0)]);
        assert!(series.frequency().is_none());
    }
}
