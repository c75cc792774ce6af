// ABOUTME: Windowed linear-trend direction and magnitude for a single metric
// ABOUTME: Index-based OLS slope with a std-relative stability band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Windowed trend calculation.

use physiq_core::models::MetricKind;
use serde::{Deserialize, Serialize};

use crate::constants::trend;
use crate::statistics;
use crate::timeseries::TimeSeries;
use crate::{MetricOutcome, TrendDirection};

/// Trend of one metric over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Direction of the fitted line
    pub trend: TrendDirection,
    /// Regression slope per measurement step
    pub slope: f64,
    /// Absolute change from the first to the last in-window value
    pub change: f64,
    /// Percent change from the first in-window value (0 for a zero baseline)
    pub percent_change: f64,
    /// Non-null values the fit used
    pub data_points: usize,
    /// Requested window length in days
    pub period_days: i64,
}

/// Windowed linear-trend calculator.
pub struct TrendCalculator;

impl TrendCalculator {
    /// Trend of `metric` over the `window_days` trailing the latest
    /// measurement.
    ///
    /// The window selects measurements with timestamp at or after
    /// (latest − `window_days`). The regression is fitted against the
    /// positional index of the in-window points, not elapsed calendar time;
    /// the slope's unit is value-per-measurement-step. The trend is "stable"
    /// while |slope| stays under 0.1 × the sample std of the in-window
    /// values.
    #[must_use]
    pub fn trend(
        series: &TimeSeries,
        metric: MetricKind,
        window_days: i64,
    ) -> MetricOutcome<TrendResult> {
        let window = series.window(window_days);
        let values = window.values(metric);
        let Some(fit) = statistics::linear_regression(&values) else {
            return MetricOutcome::insufficient(trend::MIN_POINTS, values.len());
        };

        let threshold = statistics::sample_std(&values) * trend::STABLE_SLOPE_STD_FRACTION;
        let direction = if fit.slope.abs() < threshold {
            TrendDirection::Stable
        } else if fit.slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        // Slice is non-empty: the regression required 2+ values.
        let start = values[0];
        let end = values[values.len() - 1];

        MetricOutcome::ok(TrendResult {
            trend: direction,
            slope: fit.slope,
            change: end - start,
            percent_change: statistics::percent_change(start, end),
            data_points: values.len(),
            period_days: window_days,
        })
    }
}
