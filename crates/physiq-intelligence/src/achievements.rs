// ABOUTME: Rule-based milestone detection over the first and last record of a period
// ABOUTME: Thresholds are strict inequalities; landing exactly on one does not trigger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Achievement detection.

use serde::{Deserialize, Serialize};

use crate::constants::achievements as thresholds;
use crate::timeseries::TimeSeries;

/// What kind of milestone was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    /// Weight dropped past the loss threshold
    WeightLoss,
    /// Weight rose past the muscle-building threshold
    WeightGain,
    /// Body fat percentage dropped past the threshold
    FatLoss,
    /// Muscle mass rose past the threshold
    MuscleGain,
}

/// How notable the milestone is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Past the major threshold
    Major,
    /// Past the base threshold but not the major one
    Significant,
    /// Gains attributed to muscle building
    MuscleBuilding,
}

/// A detected milestone. Purely derived; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// Milestone kind
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    /// Human-readable description
    pub description: String,
    /// Magnitude of the change (always positive)
    pub value: f64,
    /// Notability band
    pub category: AchievementCategory,
}

/// First-vs-last milestone detector.
pub struct AchievementDetector;

impl AchievementDetector {
    /// Compare the first and last measurement of the period against the
    /// fixed milestone thresholds.
    ///
    /// All comparisons are strict: a weight change of exactly −5.0 kg does
    /// not count as weight loss. Fewer than 2 measurements yield no
    /// achievements.
    #[must_use]
    pub fn detect(series: &TimeSeries) -> Vec<Achievement> {
        let mut achievements = Vec::new();
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return achievements;
        };
        if series.len() < 2 {
            return achievements;
        }

        let weight_change = last.weight_kg - first.weight_kg;
        if weight_change < thresholds::WEIGHT_LOSS_KG {
            achievements.push(Achievement {
                achievement_type: AchievementType::WeightLoss,
                description: format!("Lost {:.1} kg", weight_change.abs()),
                value: weight_change.abs(),
                category: if weight_change < thresholds::MAJOR_WEIGHT_LOSS_KG {
                    AchievementCategory::Major
                } else {
                    AchievementCategory::Significant
                },
            });
        } else if weight_change > thresholds::WEIGHT_GAIN_KG {
            achievements.push(Achievement {
                achievement_type: AchievementType::WeightGain,
                description: format!("Gained {weight_change:.1} kg"),
                value: weight_change,
                category: AchievementCategory::MuscleBuilding,
            });
        }

        let fat_change = last.body_fat_percent - first.body_fat_percent;
        if fat_change < thresholds::FAT_LOSS_PERCENT {
            achievements.push(Achievement {
                achievement_type: AchievementType::FatLoss,
                description: format!("Reduced body fat by {:.1}%", fat_change.abs()),
                value: fat_change.abs(),
                category: if fat_change < thresholds::MAJOR_FAT_LOSS_PERCENT {
                    AchievementCategory::Major
                } else {
                    AchievementCategory::Significant
                },
            });
        }

        let muscle_change = last.muscle_mass_kg - first.muscle_mass_kg;
        if muscle_change > thresholds::MUSCLE_GAIN_KG {
            achievements.push(Achievement {
                achievement_type: AchievementType::MuscleGain,
                description: format!("Gained {muscle_change:.1} kg muscle mass"),
                value: muscle_change,
                category: AchievementCategory::MuscleBuilding,
            });
        }

        achievements
    }
}
