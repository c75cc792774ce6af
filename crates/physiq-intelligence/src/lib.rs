// ABOUTME: Body-composition analytics engine for the Physiq platform
// ABOUTME: Trend, correlation, velocity, prediction, achievement, and goal-feasibility analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

#![deny(unsafe_code)]

//! # Physiq Intelligence
//!
//! Analytics computation engine over chronological body-composition
//! measurements. Every analysis is a bounded, single-pass computation over an
//! in-memory [`TimeSeries`] built from one snapshot supplied by the data
//! access collaborator; no analyzer retains state between calls and no
//! analytic result is persisted.
//!
//! The [`report::ReportComposer`] is the entry point: it fans out to the
//! per-metric analyzers and merges their results into composite reports.

/// First-vs-last milestone detection over a measurement period
pub mod achievements;
/// Fixed numeric thresholds used across the analyzers
pub mod constants;
/// Pairwise Pearson correlation across metrics
pub mod correlation;
/// Goal feasibility assessment against a target weight and date
pub mod goals;
/// Health insight banding and trend-driven recommendations
pub mod insights;
/// Full-series descriptive statistics and regression for one metric
pub mod metric_analysis;
/// Short-horizon linear extrapolation for one metric
pub mod prediction;
/// Collaborator traits for measurement and photo access
pub mod providers;
/// Composite report assembly over series, analyzers, and photos
pub mod report;
/// Shared statistical primitives (OLS regression, Pearson, sample std)
pub mod statistics;
/// Ordered in-memory measurement series
pub mod timeseries;
/// Windowed linear-trend direction and magnitude for one metric
pub mod trend;
/// Day-normalized rate-of-change and acceleration for one metric
pub mod velocity;

use serde::{Deserialize, Serialize};

pub use achievements::{Achievement, AchievementCategory, AchievementDetector, AchievementType};
pub use correlation::{
    CorrelationAnalyzer, CorrelationDirection, CorrelationResult, CorrelationStrength,
    StrongCorrelation,
};
pub use goals::{Feasibility, GoalAssessment, GoalFeasibilityEvaluator};
pub use insights::InsightGenerator;
pub use metric_analysis::{MetricAnalysis, MetricAnalyzer};
pub use prediction::{MetricPrediction, Prediction, PredictionBatch, Predictor};
pub use providers::{MeasurementProvider, PhotoProvider, PhotoQuery, SeriesQuery};
pub use report::{
    DateRange, MetricStats, MetricsSummary, OrderedMetricMap, PeriodChange, PeriodInfo,
    ProgressReport, ReportComposer, ReportInfo, ReportSummary, SeriesOverview, SnapshotStats,
    TrendAnalysisResponse, TrendWindows,
};
pub use statistics::RegressionFit;
pub use timeseries::{MeasurementFrequency, SamplingCadence, TimeSeries};
pub use trend::{TrendCalculator, TrendResult};
pub use velocity::{ChangeVelocityAnalyzer, VelocityResult};

/// Direction of a fitted linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Values are rising over the window
    Increasing,
    /// Values are falling over the window
    Decreasing,
    /// Slope is within the noise band of the window
    Stable,
}

impl TrendDirection {
    /// Classify the sign of a predicted-minus-current delta.
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Increasing
        } else if delta < 0.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Outcome of a per-metric analysis that needs a minimum number of points.
///
/// "Not enough data" is a legitimate, branchable result rather than an
/// error: composite reports mark the affected metric and continue with its
/// siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    /// The analysis produced a result
    Ok {
        /// The computed analysis, flattened into the envelope
        #[serde(flatten)]
        result: T,
    },
    /// Fewer valid points than the analysis-specific minimum
    InsufficientData {
        /// Minimum number of valid points this analysis needs
        required: usize,
        /// Valid points actually available
        available: usize,
    },
}

impl<T> MetricOutcome<T> {
    /// Wrap a computed result.
    pub const fn ok(result: T) -> Self {
        Self::Ok { result }
    }

    /// Build the insufficient-data marker for an analysis minimum.
    #[must_use]
    pub const fn insufficient(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }

    /// Borrow the computed result, if any.
    pub const fn as_ok(&self) -> Option<&T> {
        match self {
            Self::Ok { result } => Some(result),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Consume the outcome, yielding the computed result if any.
    pub fn into_ok(self) -> Option<T> {
        match self {
            Self::Ok { result } => Some(result),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Whether this outcome is the insufficient-data marker.
    pub const fn is_insufficient(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_outcome_flattens_result_into_tagged_envelope() {
        let outcome = MetricOutcome::ok(TrendResult {
            trend: TrendDirection::Decreasing,
            slope: -0.2,
            change: -1.4,
            percent_change: -1.7,
            data_points: 8,
            period_days: 7,
        });

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["trend"], "decreasing");
        assert_eq!(json["data_points"], 8);
    }

    #[test]
    fn insufficient_outcome_reports_both_counts() {
        let outcome: MetricOutcome<TrendResult> = MetricOutcome::insufficient(2, 1);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["required"], 2);
        assert_eq!(json["available"], 1);
        assert!(json.get("trend").is_none());
    }

    #[test]
    fn accessors_distinguish_outcomes() {
        let present = MetricOutcome::ok(3_usize);
        assert_eq!(present.into_ok(), Some(3));

        let missing: MetricOutcome<usize> = MetricOutcome::insufficient(5, 0);
        assert!(missing.is_insufficient());
        assert!(missing.as_ok().is_none());
    }
}
