// ABOUTME: Weight goal feasibility assessment against the required weekly rate
// ABOUTME: Classifies goals on a strict kg-per-week ladder and attaches the recent trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Goal feasibility evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use physiq_core::errors::{AnalyticsError, AnalyticsResult};
use physiq_core::models::{Measurement, MetricKind};

use crate::constants::goals::{
    AGGRESSIVE_WEEKLY_KG, CHALLENGING_WEEKLY_KG, CONSERVATIVE_WEEKLY_KG, DAYS_PER_WEEK,
};
use crate::constants::trend::RECENT_WINDOW_DAYS;
use crate::timeseries::TimeSeries;
use crate::trend::{TrendCalculator, TrendResult};
use crate::MetricOutcome;

/// Feasibility class of a weight goal, judged from the weekly rate of change
/// it demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    /// More than 1 kg per week in either direction
    Aggressive,
    /// More than 0.5 kg per week
    Challenging,
    /// Less than 0.2 kg per week
    Conservative,
    /// Everything between the conservative and challenging bounds
    Realistic,
}

impl Feasibility {
    /// Classify an absolute weekly rate on the strict ladder. Rates that land
    /// exactly on a bound fall into the milder class.
    #[must_use]
    pub fn from_weekly_rate(weekly_rate_kg: f64) -> Self {
        let magnitude = weekly_rate_kg.abs();
        if magnitude > AGGRESSIVE_WEEKLY_KG {
            Self::Aggressive
        } else if magnitude > CHALLENGING_WEEKLY_KG {
            Self::Challenging
        } else if magnitude < CONSERVATIVE_WEEKLY_KG {
            Self::Conservative
        } else {
            Self::Realistic
        }
    }

    fn recommendation(self) -> &'static str {
        match self {
            Self::Aggressive => {
                "This goal requires aggressive changes. Consider extending timeline or consulting a professional."
            }
            Self::Challenging => {
                "This goal is challenging but achievable with consistent effort and proper planning."
            }
            Self::Conservative => {
                "This goal is very achievable. Stay consistent with your current approach."
            }
            Self::Realistic => "This goal appears realistic. Monitor progress and adjust as needed.",
        }
    }
}

/// Full assessment of a weight goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAssessment {
    /// Weight at the latest measurement (kg)
    pub current_weight: f64,
    /// Goal weight (kg)
    pub target_weight: f64,
    /// Weight still to shed; negative when the goal is a gain (kg)
    pub weight_to_change: f64,
    /// Whole days between the latest measurement and the target date
    pub days_remaining: i64,
    /// Days remaining expressed in weeks, rounded to one decimal
    pub weeks_remaining: f64,
    /// Weekly rate the goal demands, rounded to two decimals (kg/week)
    pub required_weekly_rate: f64,
    /// Weight trend over the recent window, for context
    pub current_trend: MetricOutcome<TrendResult>,
    /// Feasibility class of the required rate
    pub feasibility: Feasibility,
    /// Advisory string matching the feasibility class
    pub recommendation: String,
}

/// Evaluates whether a weight goal is achievable by its target date.
pub struct GoalFeasibilityEvaluator;

impl GoalFeasibilityEvaluator {
    /// Assess a weight goal from the latest measurement and the recent series.
    ///
    /// The clock starts at the latest measurement, not the wall clock, so the
    /// assessment is reproducible for a fixed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidGoal`] when the target date is not
    /// strictly after the latest measurement date.
    pub fn assess(
        latest: &Measurement,
        recent_series: &TimeSeries,
        target_weight: f64,
        target_date: NaiveDate,
    ) -> AnalyticsResult<GoalAssessment> {
        let latest_date = latest.recorded_at.date_naive();
        let days_remaining = (target_date - latest_date).num_days();
        if days_remaining <= 0 {
            return Err(AnalyticsError::invalid_goal(target_date, latest_date));
        }

        let current_weight = latest.weight_kg;
        let weight_to_change = current_weight - target_weight;
        let weeks_remaining = days_remaining as f64 / DAYS_PER_WEEK;
        let required_weekly_rate = weight_to_change / weeks_remaining;

        let current_trend =
            TrendCalculator::trend(recent_series, MetricKind::WeightKg, RECENT_WINDOW_DAYS);
        let feasibility = Feasibility::from_weekly_rate(required_weekly_rate);
        debug!(
            target_weight,
            required_weekly_rate,
            ?feasibility,
            "assessed weight goal"
        );

        Ok(GoalAssessment {
            current_weight,
            target_weight,
            weight_to_change: round2(weight_to_change),
            days_remaining,
            weeks_remaining: round1(weeks_remaining),
            required_weekly_rate: round2(required_weekly_rate),
            current_trend,
            feasibility,
            recommendation: feasibility.recommendation().to_owned(),
        })
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn measurement(weight_kg: f64) -> Measurement {
        Measurement {
            recorded_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).single().unwrap(),
            weight_kg,
            bmi: 24.0,
            body_fat_percent: 18.0,
            fat_free_weight_kg: weight_kg * 0.82,
            body_water_percent: 55.0,
            skeletal_muscle_percent: 44.0,
            muscle_mass_kg: weight_kg * 0.75,
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
    fn half_kilo_per_week_is_realistic_not_challenging() {
        // Exactly 0.5 kg/week does not clear the strict challenging bound.
        assert_eq!(Feasibility::from_weekly_rate(0.5), Feasibility::Realistic);
        assert_eq!(Feasibility::from_weekly_rate(-0.5), Feasibility::Realistic);
        assert_eq!(Feasibility::from_weekly_rate(0.51), Feasibility::Challenging);
    }

    #[test]
    fn rate_ladder_classifies_both_directions() {
        assert_eq!(Feasibility::from_weekly_rate(1.2), Feasibility::Aggressive);
        assert_eq!(Feasibility::from_weekly_rate(-1.2), Feasibility::Aggressive);
        assert_eq!(Feasibility::from_weekly_rate(0.1), Feasibility::Conservative);
        assert_eq!(Feasibility::from_weekly_rate(0.3), Feasibility::Realistic);
    }

    #[test]
    fn past_target_date_is_rejected() {
        let latest = measurement(80.0);
        let series = TimeSeries::from_unordered(vec![latest.clone()]);
        let past = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let err = GoalFeasibilityEvaluator::assess(&latest, &series, 75.0, past).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidGoal { .. }));
    }

    #[test]
    fn assessment_reports_rate_and_recommendation() {
        let latest = measurement(80.0);
        let series = TimeSeries::from_unordered(vec![latest.clone()]);
        // 28 days = 4 weeks; 4 kg to lose -> 1.0 kg/week, not strictly above
        // the aggressive bound.
        let target = NaiveDate::from_ymd_opt(2025, 7, 29).unwrap();
        let assessment =
            GoalFeasibilityEvaluator::assess(&latest, &series, 76.0, target).unwrap();
        assert_eq!(assessment.days_remaining, 28);
        assert!((assessment.weeks_remaining - 4.0).abs() < f64::EPSILON);
        assert!((assessment.required_weekly_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(assessment.feasibility, Feasibility::Challenging);
        assert!(assessment.recommendation.contains("challenging"));
    }
}
