// ABOUTME: Health insight banding over the latest measurement and trend-driven recommendations
// ABOUTME: Fixed advisory strings keyed by BMI, body-fat, and body-water bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Insight and recommendation generation.

use physiq_core::models::{Measurement, MetricKind};

use crate::constants::insight_bands as bands;
use crate::constants::trend::RECENT_WINDOW_DAYS;
use crate::timeseries::TimeSeries;
use crate::trend::TrendCalculator;
use crate::TrendDirection;

/// Rule-based generator of advisory strings.
pub struct InsightGenerator;

impl InsightGenerator {
    /// Health insights for the single latest measurement.
    ///
    /// Pure function of one record; no history required. The body-fat bands
    /// leave deliberate gaps (15–16 and 20–25 percent draw no comment).
    #[must_use]
    pub fn health_insights(latest: &Measurement) -> Vec<String> {
        let mut insights = Vec::new();

        let bmi = latest.bmi;
        if bmi < bands::BMI_UNDERWEIGHT {
            insights.push(
                "Your BMI indicates you're underweight. Consider consulting a nutritionist."
                    .to_owned(),
            );
        } else if bmi < bands::BMI_NORMAL {
            insights.push(
                "Your BMI is in the healthy range. Great job maintaining a healthy weight!"
                    .to_owned(),
            );
        } else if bmi < bands::BMI_OVERWEIGHT {
            insights.push(
                "Your BMI indicates you're overweight. Focus on creating a caloric deficit."
                    .to_owned(),
            );
        } else {
            insights.push(
                "Your BMI indicates obesity. Consider consulting a healthcare professional."
                    .to_owned(),
            );
        }

        let body_fat = latest.body_fat_percent;
        if body_fat < bands::BODY_FAT_VERY_LOW {
            insights.push(
                "Your body fat is very low. Ensure you're maintaining adequate nutrition."
                    .to_owned(),
            );
        } else if body_fat <= bands::BODY_FAT_ATHLETIC {
            insights.push("Excellent body fat percentage! You're in athletic range.".to_owned());
        } else if (bands::BODY_FAT_FITNESS_LOW..=bands::BODY_FAT_FITNESS_HIGH)
            .contains(&body_fat)
        {
            insights.push("Good body fat percentage. You're in the fitness range.".to_owned());
        } else if body_fat > bands::BODY_FAT_HIGH {
            insights
                .push("Consider focusing on fat loss through diet and cardio exercise.".to_owned());
        }

        let body_water = latest.body_water_percent;
        if body_water < bands::BODY_WATER_LOW {
            insights
                .push("Your body water percentage seems low. Ensure adequate hydration.".to_owned());
        } else if body_water > bands::BODY_WATER_HIGH {
            insights.push(
                "Your body water percentage is high, which is generally positive.".to_owned(),
            );
        }

        insights
    }

    /// Actionable recommendations driven by the recent weight and body-fat
    /// trends.
    #[must_use]
    pub fn recommendations(series: &TimeSeries) -> Vec<String> {
        if series.len() < 2 {
            return vec!["Collect more data for personalized recommendations".to_owned()];
        }

        let mut recommendations = Vec::new();

        if let Some(weight_trend) =
            TrendCalculator::trend(series, MetricKind::WeightKg, RECENT_WINDOW_DAYS).into_ok()
        {
            if weight_trend.trend == TrendDirection::Increasing
                && weight_trend.percent_change > bands::WEIGHT_DRIFT_PERCENT
            {
                recommendations.push(
                    "Weight is trending upward. Consider reviewing caloric intake and exercise routine."
                        .to_owned(),
                );
            } else if weight_trend.trend == TrendDirection::Stable {
                recommendations.push("Weight is stable. Great for maintenance phase!".to_owned());
            }
        }

        if let Some(fat_trend) =
            TrendCalculator::trend(series, MetricKind::BodyFatPercent, RECENT_WINDOW_DAYS)
                .into_ok()
        {
            let latest_fat = series.last().map_or(0.0, |m| m.body_fat_percent);
            if fat_trend.trend == TrendDirection::Decreasing {
                recommendations.push(
                    "Body fat is decreasing - excellent progress! Keep up the current routine."
                        .to_owned(),
                );
            } else if fat_trend.trend == TrendDirection::Stable
                && latest_fat > bands::STAGNANT_BODY_FAT_PERCENT
            {
                recommendations.push(
                    "Consider adding more cardio or creating a larger caloric deficit to reduce body fat."
                        .to_owned(),
                );
            }
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn latest(bmi: f64, body_fat: f64, body_water: f64) -> Measurement {
        Measurement {
            recorded_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).single().unwrap(),
            weight_kg: 80.0,
            bmi,
            body_fat_percent: body_fat,
            fat_free_weight_kg: 64.0,
            body_water_percent: body_water,
            skeletal_muscle_percent: 44.0,
            muscle_mass_kg: 60.0,
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
    fn healthy_bands_produce_positive_insights() {
        let insights = InsightGenerator::health_insights(&latest(22.0, 14.0, 58.0));
        assert_eq!(insights.len(), 2);
        assert!(insights[0].contains("healthy range"));
        assert!(insights[1].contains("athletic range"));
    }

    #[test]
    fn obese_band_advises_professional_help() {
        let insights = InsightGenerator::health_insights(&latest(31.0, 28.0, 48.0));
        assert!(insights[0].contains("obesity"));
        assert!(insights.iter().any(|i| i.contains("fat loss")));
        assert!(insights.iter().any(|i| i.contains("hydration")));
    }

    #[test]
    fn gap_band_draws_no_body_fat_comment() {
        // 22% sits between the fitness and high bands.
        let insights = InsightGenerator::health_insights(&latest(22.0, 22.0, 58.0));
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn sparse_series_asks_for_more_data() {
        let series = TimeSeries::from_unordered(vec![latest(22.0, 18.0, 58.0)]);
        let recommendations = InsightGenerator::recommendations(&series);
        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].contains("Collect more data"));
    }
}
