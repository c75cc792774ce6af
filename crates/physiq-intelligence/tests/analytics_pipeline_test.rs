// ABOUTME: Cross-analyzer tests over realistic measurement series
// ABOUTME: Validates trend, correlation, velocity, prediction, and achievement behavior together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

use chrono::{Duration, TimeZone, Utc};

use physiq_core::models::{Measurement, MetricKind};
use physiq_intelligence::{
    AchievementCategory, AchievementDetector, AchievementType, ChangeVelocityAnalyzer,
    CorrelationAnalyzer, CorrelationDirection, Predictor, TimeSeries, TrendCalculator,
    TrendDirection,
};

fn measurement(day: i64, weight_kg: f64, body_fat_percent: f64, muscle_mass_kg: f64) -> Measurement {
    let recorded_at =
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).single().unwrap() + Duration::days(day);
    Measurement {
        recorded_at,
        weight_kg,
        bmi: weight_kg / (1.8 * 1.8),
        body_fat_percent,
        fat_free_weight_kg: weight_kg * (1.0 - body_fat_percent / 100.0),
        body_water_percent: 55.0,
        skeletal_muscle_percent: 44.0,
        muscle_mass_kg,
        bone_mass_kg: 3.3,
        basal_metabolic_rate: 1700,
        subcutaneous_fat_percent: None,
        protein_percent: None,
        visceral_fat: None,
        metabolic_age: None,
        notes: None,
    }
}

/// Steady cut: weight and fat falling a little each day, muscle creeping up.
fn cutting_series(days: i64) -> TimeSeries {
    let measurements = (0..days)
        .map(|day| {
            measurement(
                day,
                0.2f64.mul_add(-(day as f64), 85.0),
                0.1f64.mul_add(-(day as f64), 24.0),
                0.05f64.mul_add(day as f64, 58.0),
            )
        })
        .collect();
    TimeSeries::from_unordered(measurements)
}

#[test]
fn test_weight_trend_decreasing_over_cut() {
    let series = cutting_series(30);
    let result = TrendCalculator::trend(&series, MetricKind::WeightKg, 30)
        .into_ok()
        .unwrap();

    assert_eq!(result.trend, TrendDirection::Decreasing);
    assert!((result.slope - (-0.2)).abs() < 0.001);
    assert!(result.change < 0.0);
    assert_eq!(result.data_points, 30);
}

#[test]
fn test_trend_direction_agrees_with_slope_sign() {
    let series = cutting_series(30);
    for metric in [
        MetricKind::WeightKg,
        MetricKind::BodyFatPercent,
        MetricKind::MuscleMassKg,
    ] {
        let result = TrendCalculator::trend(&series, metric, 30).into_ok().unwrap();
        match result.trend {
            TrendDirection::Increasing => assert!(result.slope > 0.0),
            TrendDirection::Decreasing => assert!(result.slope < 0.0),
            TrendDirection::Stable => {}
        }
    }
}

#[test]
fn test_correlation_matrix_symmetric_with_unit_diagonal() {
    let series = cutting_series(30);
    let metrics = [
        MetricKind::WeightKg,
        MetricKind::Bmi,
        MetricKind::BodyFatPercent,
    ];
    let result = CorrelationAnalyzer::correlations(&series, &metrics)
        .into_ok()
        .unwrap();

    for i in 0..metrics.len() {
        assert_eq!(result.matrix[i][i], Some(1.0));
        for j in 0..metrics.len() {
            assert_eq!(result.matrix[i][j], result.matrix[j][i]);
        }
    }
}

#[test]
fn test_weight_and_bmi_strongly_positively_correlated() {
    let series = cutting_series(30);
    let result = CorrelationAnalyzer::correlations(
        &series,
        &[MetricKind::WeightKg, MetricKind::Bmi],
    )
    .into_ok()
    .unwrap();

    let pair = result
        .strong_correlations
        .iter()
        .find(|c| c.metric1 == MetricKind::WeightKg && c.metric2 == MetricKind::Bmi)
        .unwrap();
    assert_eq!(pair.direction, CorrelationDirection::Positive);
    assert!(pair.correlation > 0.99);
    assert!(!result.insights.is_empty());
}

#[test]
fn test_weight_and_muscle_negatively_correlated_on_cut() {
    let series = cutting_series(30);
    let result = CorrelationAnalyzer::correlations(
        &series,
        &[MetricKind::WeightKg, MetricKind::MuscleMassKg],
    )
    .into_ok()
    .unwrap();

    let pair = &result.strong_correlations[0];
    assert_eq!(pair.direction, CorrelationDirection::Negative);
    assert!(result.insights[0].contains("tends to decrease"));
}

#[test]
fn test_velocity_matches_daily_rate() {
    let series = cutting_series(10);
    let result = ChangeVelocityAnalyzer::velocity(&series, MetricKind::WeightKg)
        .into_ok()
        .unwrap();

    assert!((result.avg_daily_change - (-0.2)).abs() < 0.001);
    assert!(result.acceleration.abs() < 0.001);
}

#[test]
fn test_prediction_extends_linear_series() {
    let series = cutting_series(20);
    let prediction = Predictor::predict(&series, MetricKind::WeightKg, 10).unwrap();

    // 0.2 kg/day down continues for 10 more days.
    assert!((prediction.change - (-2.0)).abs() < 0.01);
    assert_eq!(prediction.trend, TrendDirection::Decreasing);
    assert!(prediction.confidence > 0.99);
}

#[test]
fn test_prediction_batch_respects_snapshot_minimum() {
    let sparse = cutting_series(3);
    let batch = Predictor::predict_batch(&sparse, &MetricKind::KEY_METRICS, 30);
    assert!(batch.is_insufficient());

    let dense = cutting_series(20);
    let batch = Predictor::predict_batch(&dense, &MetricKind::KEY_METRICS, 30)
        .into_ok()
        .unwrap();
    assert_eq!(batch.base_data_points, 20);
    assert_eq!(batch.predictions.len(), MetricKind::KEY_METRICS.len());
}

#[test]
fn test_prediction_batch_isolates_sparse_metric() {
    // Visceral fat is reported on only 3 of 20 days; its prediction is
    // omitted while the dense metrics proceed.
    let mut measurements: Vec<Measurement> = (0..20)
        .map(|day| measurement(day, 0.2f64.mul_add(-(day as f64), 85.0), 24.0, 58.0))
        .collect();
    for m in measurements.iter_mut().take(3) {
        m.visceral_fat = Some(8);
    }
    let series = TimeSeries::from_unordered(measurements);

    let batch = Predictor::predict_batch(
        &series,
        &[MetricKind::WeightKg, MetricKind::VisceralFat],
        30,
    )
    .into_ok()
    .unwrap();

    assert_eq!(batch.predictions.len(), 1);
    assert_eq!(batch.predictions[0].metric, MetricKind::WeightKg);
}

#[test]
fn test_cut_yields_weight_and_fat_achievements() {
    // 30 days at -0.2 kg/day: 5.8 kg lost, 2.9 fat points dropped.
    let series = cutting_series(30);
    let achievements = AchievementDetector::detect(&series);

    let weight = achievements
        .iter()
        .find(|a| a.achievement_type == AchievementType::WeightLoss)
        .unwrap();
    assert_eq!(weight.category, AchievementCategory::Significant);

    assert!(achievements
        .iter()
        .any(|a| a.achievement_type == AchievementType::FatLoss));
    assert!(achievements
        .iter()
        .any(|a| a.achievement_type == AchievementType::MuscleGain));
}

#[test]
fn test_single_measurement_yields_no_analyses() {
    let series = cutting_series(1);

    assert!(TrendCalculator::trend(&series, MetricKind::WeightKg, 30).is_insufficient());
    assert!(ChangeVelocityAnalyzer::velocity(&series, MetricKind::WeightKg).is_insufficient());
    assert!(Predictor::predict(&series, MetricKind::WeightKg, 30).is_none());
    assert!(AchievementDetector::detect(&series).is_empty());
}
