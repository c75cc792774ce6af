// ABOUTME: Shared statistical primitives for the body-composition analyzers
// ABOUTME: Index-based OLS regression, Pearson correlation, sample mean and std
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Statistical primitives.
//!
//! Trend, metric analysis, and prediction all regress against the positional
//! index of their points (0, 1, 2, …), not elapsed calendar time. Velocity is
//! the one analysis normalized by real elapsed days; it does not fit a line
//! and lives in [`crate::velocity`]. The two time models are numerically
//! different operations with different units and are kept separate on
//! purpose.

use serde::{Deserialize, Serialize};

/// Closed-form ordinary-least-squares fit of values against their index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Rate of change per index step
    pub slope: f64,
    /// Fitted value at index 0
    pub intercept: f64,
    /// Coefficient of determination in [0, 1]
    pub r_squared: f64,
}

impl RegressionFit {
    /// Fitted value at an arbitrary (possibly future) index.
    #[must_use]
    pub fn value_at(&self, index: f64) -> f64 {
        self.slope.mul_add(index, self.intercept)
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator); 0.0 below 2 values.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Fit a least-squares line against the positional index of `values`.
///
/// Returns `None` below 2 points. A constant series fits with slope 0 and
/// `r_squared` 0 (no variance to explain).
#[must_use]
pub fn linear_regression(values: &[f64]) -> Option<RegressionFit> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xx: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_yy: f64 = values.iter().map(|y| y.powi(2)).sum();

    // Indices are distinct, so the x-variance term is always positive.
    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    let slope = n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator;
    let intercept = slope.mul_add(-sum_x, sum_y) / n;

    let corr_denominator =
        (denominator * n.mul_add(sum_yy, -(sum_y * sum_y))).sqrt();
    let r_squared = if corr_denominator == 0.0 {
        0.0
    } else {
        let correlation = n.mul_add(sum_xy, -(sum_x * sum_y)) / corr_denominator;
        correlation * correlation
    };

    Some(RegressionFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Percent change from `start` to `end`.
///
/// A zero baseline is defined as 0.0 rather than a division error; callers
/// never see an infinity from this path.
#[must_use]
pub fn percent_change(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        0.0
    } else {
        (end - start) / start * 100.0
    }
}

/// Pearson correlation coefficient over paired observations.
///
/// Returns `None` below 2 pairs or when either side has zero variance,
/// matching the "not computable" cells of a pairwise-complete correlation
/// matrix.
#[must_use]
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let sum_x: f64 = pairs.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = pairs.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = pairs.iter().map(|(x, _)| x.powi(2)).sum();
    let sum_yy: f64 = pairs.iter().map(|(_, y)| y.powi(2)).sum();
    let sum_xy: f64 = pairs.iter().map(|(x, y)| x * y).sum();

    let denominator =
        (n.mul_add(sum_xx, -(sum_x * sum_x)) * n.mul_add(sum_yy, -(sum_y * sum_y))).sqrt();
    if denominator == 0.0 {
        return None;
    }

    Some(n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator)
}
