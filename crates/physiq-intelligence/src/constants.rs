// ABOUTME: Fixed numeric thresholds used across the body-composition analyzers
// ABOUTME: Grouped by analysis domain; values are part of the produced report semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Analysis thresholds.
//!
//! These values define the produced report semantics (direction bands,
//! feasibility ladders, achievement milestones) and are deliberately fixed
//! rather than configurable.

/// Trend direction thresholds
pub mod trend {
    /// A slope is "stable" while its magnitude stays below this fraction of
    /// the window's standard deviation
    pub const STABLE_SLOPE_STD_FRACTION: f64 = 0.1;

    /// Minimum non-null points for a trend fit
    pub const MIN_POINTS: usize = 2;

    /// Trend windows reported in the metrics summary (days)
    pub const SUMMARY_WINDOWS_DAYS: [(&str, i64); 4] =
        [("week", 7), ("month", 30), ("quarter", 90), ("year", 365)];

    /// Window used for goal assessment and recommendations (days)
    pub const RECENT_WINDOW_DAYS: i64 = 30;
}

/// Correlation extraction thresholds
pub mod correlation {
    /// |r| above this is reported as a notable correlation
    pub const NOTABLE_THRESHOLD: f64 = 0.7;

    /// |r| above this upgrades a notable correlation from "moderate" to "strong"
    pub const STRONG_THRESHOLD: f64 = 0.8;

    /// Minimum number of metrics for a correlation matrix
    pub const MIN_METRICS: usize = 2;
}

/// Change velocity thresholds
pub mod velocity {
    /// Minimum non-null points for rate-of-change analysis
    pub const MIN_POINTS: usize = 3;
    /// Minimum usable rates after dropping non-positive intervals
    pub const MIN_RATES: usize = 2;
}

/// Prediction thresholds
pub mod prediction {
    /// Number of most recent points the regression is fitted on
    pub const FITTING_WINDOW: usize = 30;

    /// Minimum non-null points for a single-metric prediction
    pub const MIN_POINTS: usize = 5;

    /// Minimum measurements in the snapshot for a multi-metric batch
    pub const MIN_BATCH_MEASUREMENTS: usize = 10;

    /// Default extrapolation horizon (days)
    pub const DEFAULT_HORIZON_DAYS: usize = 30;

    /// Snapshot size the batch prediction is computed from
    pub const BATCH_SNAPSHOT_LIMIT: usize = 90;
}

/// Goal feasibility ladder (kg per week, strict comparisons)
pub mod goals {
    /// |weekly rate| strictly above this is "aggressive"
    pub const AGGRESSIVE_WEEKLY_KG: f64 = 1.0;

    /// |weekly rate| strictly above this is "challenging"
    pub const CHALLENGING_WEEKLY_KG: f64 = 0.5;

    /// |weekly rate| strictly below this is "conservative"
    pub const CONSERVATIVE_WEEKLY_KG: f64 = 0.2;

    /// Days per week for rate conversion
    pub const DAYS_PER_WEEK: f64 = 7.0;

    /// Snapshot size for the attached current trend
    pub const TREND_SNAPSHOT_LIMIT: usize = 30;
}

/// Achievement milestones (strict comparisons; exact thresholds do not trigger)
pub mod achievements {
    /// Weight change strictly below this counts as weight loss (kg)
    pub const WEIGHT_LOSS_KG: f64 = -5.0;

    /// Weight loss strictly below this is "major" rather than "significant" (kg)
    pub const MAJOR_WEIGHT_LOSS_KG: f64 = -10.0;

    /// Weight change strictly above this counts as muscle-building gain (kg)
    pub const WEIGHT_GAIN_KG: f64 = 2.0;

    /// Body-fat change strictly below this counts as fat loss (percentage points)
    pub const FAT_LOSS_PERCENT: f64 = -2.0;

    /// Fat loss strictly below this is "major" (percentage points)
    pub const MAJOR_FAT_LOSS_PERCENT: f64 = -5.0;

    /// Muscle mass change strictly above this counts as muscle gain (kg)
    pub const MUSCLE_GAIN_KG: f64 = 1.0;
}

/// Health insight bands over the latest measurement
pub mod insight_bands {
    /// BMI below this is underweight
    pub const BMI_UNDERWEIGHT: f64 = 18.5;
    /// BMI below this (and at least underweight) is the healthy range
    pub const BMI_NORMAL: f64 = 25.0;
    /// BMI below this (and at least normal) is overweight; above is obese
    pub const BMI_OVERWEIGHT: f64 = 30.0;

    /// Body fat below this is flagged as very low
    pub const BODY_FAT_VERY_LOW: f64 = 10.0;
    /// Upper bound of the athletic body-fat band
    pub const BODY_FAT_ATHLETIC: f64 = 15.0;
    /// Lower bound of the fitness body-fat band
    pub const BODY_FAT_FITNESS_LOW: f64 = 16.0;
    /// Upper bound of the fitness body-fat band
    pub const BODY_FAT_FITNESS_HIGH: f64 = 20.0;
    /// Body fat above this triggers a fat-loss suggestion
    pub const BODY_FAT_HIGH: f64 = 25.0;

    /// Body water below this is flagged as low
    pub const BODY_WATER_LOW: f64 = 50.0;
    /// Body water above this is flagged as high
    pub const BODY_WATER_HIGH: f64 = 65.0;

    /// Upward weight drift (percent over the recent window) that triggers a
    /// caloric-intake recommendation
    pub const WEIGHT_DRIFT_PERCENT: f64 = 2.0;

    /// Stable body fat above this still triggers a deficit recommendation
    pub const STAGNANT_BODY_FAT_PERCENT: f64 = 20.0;
}

/// Measurement cadence bands (average days between measurements)
pub mod frequency {
    /// At most this average interval is "daily"
    pub const DAILY_MAX_DAYS: f64 = 1.0;
    /// At most this average interval is "frequent"
    pub const FREQUENT_MAX_DAYS: f64 = 3.0;
    /// At most this average interval is "weekly"
    pub const WEEKLY_MAX_DAYS: f64 = 7.0;
    /// At most this average interval is "monthly"; above is "infrequent"
    pub const MONTHLY_MAX_DAYS: f64 = 30.0;
}
