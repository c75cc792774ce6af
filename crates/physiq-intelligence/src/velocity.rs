// ABOUTME: Day-normalized rate-of-change and acceleration for a single metric
// ABOUTME: The one analysis that divides by actual elapsed time, not positional index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Change velocity analysis.

use physiq_core::models::MetricKind;
use serde::{Deserialize, Serialize};

use crate::constants::velocity;
use crate::statistics;
use crate::timeseries::TimeSeries;
use crate::MetricOutcome;

/// Seconds per day, for fractional elapsed-day arithmetic.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Day-normalized rate of change of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityResult {
    /// Mean of the per-day rates
    pub avg_daily_change: f64,
    /// Largest per-day rate
    pub max_daily_change: f64,
    /// Smallest per-day rate
    pub min_daily_change: f64,
    /// Mean first difference of the rate sequence (change in rate of change)
    pub acceleration: f64,
}

/// Rate-of-change analyzer normalized by elapsed days.
pub struct ChangeVelocityAnalyzer;

impl ChangeVelocityAnalyzer {
    /// Velocity of `metric`: each consecutive pair of non-null points yields
    /// one rate, (value − previous) / elapsed days, so irregular sampling
    /// intervals weigh correctly.
    ///
    /// Requires at least 3 non-null points and 2 usable rates. Pairs closer
    /// together than the clock can resolve (non-positive elapsed time)
    /// contribute no rate; the insufficiency marker then counts rates, not
    /// points.
    #[must_use]
    pub fn velocity(series: &TimeSeries, metric: MetricKind) -> MetricOutcome<VelocityResult> {
        let dated = series.dated_values(metric);
        if dated.len() < velocity::MIN_POINTS {
            return MetricOutcome::insufficient(velocity::MIN_POINTS, dated.len());
        }

        let rates: Vec<f64> = dated
            .windows(2)
            .filter_map(|pair| {
                let elapsed_days =
                    (pair[1].0 - pair[0].0).num_seconds() as f64 / SECONDS_PER_DAY;
                (elapsed_days > 0.0).then(|| (pair[1].1 - pair[0].1) / elapsed_days)
            })
            .collect();

        if rates.len() < velocity::MIN_RATES {
            return MetricOutcome::insufficient(velocity::MIN_RATES, rates.len());
        }

        let rate_diffs: Vec<f64> = rates.windows(2).map(|pair| pair[1] - pair[0]).collect();

        MetricOutcome::ok(VelocityResult {
            avg_daily_change: statistics::mean(&rates),
            max_daily_change: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_daily_change: rates.iter().copied().fold(f64::INFINITY, f64::min),
            acceleration: statistics::mean(&rate_diffs),
        })
    }
}
