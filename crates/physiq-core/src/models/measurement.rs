// ABOUTME: Body-composition measurement record and the fixed analyzable metric registry
// ABOUTME: Measurement is an immutable value object; MetricKind is the only metric-access path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AnalyticsError;

/// A single body-composition measurement produced by a smart scale.
///
/// Measurements are immutable once produced by the data access collaborator;
/// the analytics engine never mutates them. Fields that a scale may not
/// report are optional.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use physiq_core::models::Measurement;
///
/// let measurement = Measurement {
///     recorded_at: Utc::now(),
///     weight_kg: 80.5,
///     bmi: 24.9,
///     body_fat_percent: 18.2,
///     fat_free_weight_kg: 65.8,
///     body_water_percent: 58.1,
///     skeletal_muscle_percent: 44.3,
///     muscle_mass_kg: 62.4,
///     bone_mass_kg: 3.4,
///     basal_metabolic_rate: 1720,
///     subcutaneous_fat_percent: Some(15.9),
///     protein_percent: Some(17.8),
///     visceral_fat: Some(7),
///     metabolic_age: Some(31),
///     notes: None,
/// };
/// assert!(measurement.weight_kg > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Body Mass Index
    pub bmi: f64,
    /// Body fat percentage
    pub body_fat_percent: f64,
    /// Fat-free body weight in kilograms
    pub fat_free_weight_kg: f64,
    /// Body water percentage
    pub body_water_percent: f64,
    /// Skeletal muscle percentage
    pub skeletal_muscle_percent: f64,
    /// Muscle mass in kilograms
    pub muscle_mass_kg: f64,
    /// Bone mass in kilograms
    pub bone_mass_kg: f64,
    /// Basal metabolic rate in kcal
    pub basal_metabolic_rate: u32,
    /// Subcutaneous fat percentage (not reported by every scale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcutaneous_fat_percent: Option<f64>,
    /// Protein percentage (not reported by every scale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_percent: Option<f64>,
    /// Visceral fat level (not reported by every scale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visceral_fat: Option<u32>,
    /// Metabolic age in years (not reported by every scale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metabolic_age: Option<u32>,
    /// Free-form notes attached at capture time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The fixed set of numeric metrics the analytics engine understands.
///
/// A closed registry instead of an open key/value map: a metric that is not
/// listed here cannot be requested, so typos fail at the parsing seam rather
/// than silently producing empty analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Weight in kilograms
    WeightKg,
    /// Body Mass Index
    Bmi,
    /// Body fat percentage
    BodyFatPercent,
    /// Muscle mass in kilograms
    MuscleMassKg,
    /// Skeletal muscle percentage
    SkeletalMusclePercent,
    /// Body water percentage
    BodyWaterPercent,
    /// Basal metabolic rate in kcal
    BasalMetabolicRate,
    /// Visceral fat level
    VisceralFat,
    /// Metabolic age in years
    MetabolicAge,
}

impl MetricKind {
    /// Every metric in the registry, in canonical order.
    pub const ALL: [Self; 9] = [
        Self::WeightKg,
        Self::Bmi,
        Self::BodyFatPercent,
        Self::MuscleMassKg,
        Self::SkeletalMusclePercent,
        Self::BodyWaterPercent,
        Self::BasalMetabolicRate,
        Self::VisceralFat,
        Self::MetabolicAge,
    ];

    /// The four metrics progress reporting and prediction focus on.
    pub const KEY_METRICS: [Self; 4] = [
        Self::WeightKg,
        Self::BodyFatPercent,
        Self::MuscleMassKg,
        Self::Bmi,
    ];

    /// Extract this metric's value from a measurement.
    ///
    /// Returns `None` when the underlying field was not reported.
    #[must_use]
    pub fn value_of(self, measurement: &Measurement) -> Option<f64> {
        match self {
            Self::WeightKg => Some(measurement.weight_kg),
            Self::Bmi => Some(measurement.bmi),
            Self::BodyFatPercent => Some(measurement.body_fat_percent),
            Self::MuscleMassKg => Some(measurement.muscle_mass_kg),
            Self::SkeletalMusclePercent => Some(measurement.skeletal_muscle_percent),
            Self::BodyWaterPercent => Some(measurement.body_water_percent),
            Self::BasalMetabolicRate => Some(f64::from(measurement.basal_metabolic_rate)),
            Self::VisceralFat => measurement.visceral_fat.map(f64::from),
            Self::MetabolicAge => measurement.metabolic_age.map(f64::from),
        }
    }

    /// Wire name of this metric (matches the serialized snake_case form).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightKg => "weight_kg",
            Self::Bmi => "bmi",
            Self::BodyFatPercent => "body_fat_percent",
            Self::MuscleMassKg => "muscle_mass_kg",
            Self::SkeletalMusclePercent => "skeletal_muscle_percent",
            Self::BodyWaterPercent => "body_water_percent",
            Self::BasalMetabolicRate => "basal_metabolic_rate",
            Self::VisceralFat => "visceral_fat",
            Self::MetabolicAge => "metabolic_age",
        }
    }

    /// Human-readable name used in generated sentences ("Body Fat Percent").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::WeightKg => "Weight Kg",
            Self::Bmi => "Bmi",
            Self::BodyFatPercent => "Body Fat Percent",
            Self::MuscleMassKg => "Muscle Mass Kg",
            Self::SkeletalMusclePercent => "Skeletal Muscle Percent",
            Self::BodyWaterPercent => "Body Water Percent",
            Self::BasalMetabolicRate => "Basal Metabolic Rate",
            Self::VisceralFat => "Visceral Fat",
            Self::MetabolicAge => "Metabolic Age",
        }
    }

    /// Parse a list of metric names, silently skipping unknown entries.
    ///
    /// Multi-metric operations treat an unrecognized name as "not present in
    /// the series" rather than a fatal error.
    #[must_use]
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        names
            .iter()
            .filter_map(|name| name.as_ref().parse().ok())
            .collect()
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| AnalyticsError::unknown_metric(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_round_trips_through_name() {
        for metric in MetricKind::ALL {
            let parsed: MetricKind = metric.as_str().parse().unwrap();
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn unknown_metric_fails_parse() {
        let result = "resting_heart_rate".parse::<MetricKind>();
        assert!(matches!(
            result,
            Err(AnalyticsError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn parse_list_skips_unknown_names() {
        let metrics = MetricKind::parse_list(&["weight_kg", "nope", "bmi"]);
        assert_eq!(metrics, vec![MetricKind::WeightKg, MetricKind::Bmi]);
    }

    #[test]
    fn metric_serializes_as_wire_name() {
        for metric in MetricKind::ALL {
            let json = serde_json::to_value(metric).unwrap();
            assert_eq!(json, serde_json::Value::String(metric.as_str().to_owned()));
        }
    }

    #[test]
    fn unreported_fields_are_omitted_from_json() {
        let measurement = Measurement {
            recorded_at: chrono::Utc::now(),
            weight_kg: 80.5,
            bmi: 24.9,
            body_fat_percent: 18.2,
            fat_free_weight_kg: 65.8,
            body_water_percent: 58.1,
            skeletal_muscle_percent: 44.3,
            muscle_mass_kg: 62.4,
            bone_mass_kg: 3.4,
            basal_metabolic_rate: 1720,
            subcutaneous_fat_percent: None,
            protein_percent: None,
            visceral_fat: Some(7),
            metabolic_age: None,
            notes: None,
        };

        let json = serde_json::to_value(&measurement).unwrap();
        assert!(json.get("subcutaneous_fat_percent").is_none());
        assert!(json.get("notes").is_none());
        assert_eq!(json["visceral_fat"], 7);

        let back: Measurement = serde_json::from_value(json).unwrap();
        assert_eq!(back, measurement);
    }
}
