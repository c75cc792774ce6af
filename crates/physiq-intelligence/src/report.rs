// ABOUTME: Composite report assembly over providers, per-metric analyzers, and photos
// ABOUTME: Async entry point; fans analyzer work out across metrics with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Report composition.
//!
//! The [`ReportComposer`] owns the data access seams and turns one snapshot
//! fetch into a composite report: it builds a [`TimeSeries`], runs the
//! per-metric analyzers across the requested metrics in parallel, and merges
//! the outcomes. Per-metric shortfalls surface as
//! [`MetricOutcome::InsufficientData`] entries; only an empty snapshot or a
//! failed fetch aborts the whole report.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use physiq_core::errors::{AnalyticsError, AnalyticsResult};
use physiq_core::models::{Measurement, MetricKind, ProgressPhoto};

use crate::achievements::{Achievement, AchievementDetector};
use crate::constants::{goals, prediction, trend};
use crate::correlation::{CorrelationAnalyzer, CorrelationResult};
use crate::goals::{GoalAssessment, GoalFeasibilityEvaluator};
use crate::insights::InsightGenerator;
use crate::metric_analysis::{MetricAnalysis, MetricAnalyzer};
use crate::prediction::{Prediction, PredictionBatch, Predictor};
use crate::providers::{MeasurementProvider, PhotoProvider, PhotoQuery, SeriesQuery};
use crate::statistics;
use crate::timeseries::{MeasurementFrequency, TimeSeries};
use crate::trend::{TrendCalculator, TrendResult};
use crate::velocity::{ChangeVelocityAnalyzer, VelocityResult};
use crate::MetricOutcome;

/// Date coverage of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    /// Date of the oldest measurement
    pub start: NaiveDate,
    /// Date of the newest measurement
    pub end: NaiveDate,
    /// Whole days between the oldest and newest measurement
    pub duration_days: i64,
}

/// Snapshot-level facts reported alongside the per-metric sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesOverview {
    /// Number of measurements in the snapshot
    pub total_measurements: usize,
    /// Date coverage of the snapshot
    pub date_range: DateRange,
    /// Timestamp of the newest measurement
    pub latest_measurement: DateTime<Utc>,
    /// Measurement cadence; `None` below 2 measurements
    pub measurement_frequency: Option<MeasurementFrequency>,
}

/// Descriptive statistics for one metric over the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricStats {
    /// Most recent non-null value
    pub current: f64,
    /// Minimum over the snapshot
    pub min: f64,
    /// Maximum over the snapshot
    pub max: f64,
    /// Mean over the snapshot
    pub avg: f64,
    /// Sample standard deviation over the snapshot
    pub std: f64,
}

/// Trend of one metric over the four standard reporting windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendWindows {
    /// Trailing 7 days
    pub week: MetricOutcome<TrendResult>,
    /// Trailing 30 days
    pub month: MetricOutcome<TrendResult>,
    /// Trailing 90 days
    pub quarter: MetricOutcome<TrendResult>,
    /// Trailing 365 days
    pub year: MetricOutcome<TrendResult>,
}

/// Comprehensive summary across every tracked metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Snapshot-level facts
    pub overview: SeriesOverview,
    /// Descriptive statistics per metric with at least one non-null value
    pub current_stats: BTreeMap<MetricKind, MetricStats>,
    /// Windowed trends per metric
    pub trends: BTreeMap<MetricKind, TrendWindows>,
    /// Milestones crossed between the first and last measurement
    pub achievements: Vec<Achievement>,
    /// Band-based insights for the latest measurement
    pub health_insights: Vec<String>,
}

/// Bounds and size of the analyzed period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Inclusive period start
    pub start: DateTime<Utc>,
    /// Inclusive period end
    pub end: DateTime<Utc>,
    /// Whole days between the period bounds
    pub duration_days: i64,
    /// Measurements found inside the period
    pub data_points: usize,
}

/// Per-metric map that keeps the caller's metric order through
/// serialization, unlike an ordered-by-key map.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMetricMap<T> {
    entries: Vec<(MetricKind, T)>,
}

impl<T> OrderedMetricMap<T> {
    fn from_entries(entries: Vec<(MetricKind, T)>) -> Self {
        Self { entries }
    }

    /// Value for `metric`, if it was requested.
    #[must_use]
    pub fn get(&self, metric: MetricKind) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == metric)
            .map(|(_, value)| value)
    }

    /// Number of metrics in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in request order.
    pub fn entries(&self) -> impl Iterator<Item = (MetricKind, &T)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl<T: Serialize> Serialize for OrderedMetricMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (metric, value) in &self.entries {
            map.serialize_entry(metric, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMetricMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntryVisitor<T> {
            type Value = OrderedMetricMap<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map keyed by metric name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(OrderedMetricMap { entries })
            }
        }

        deserializer.deserialize_map(EntryVisitor(PhantomData))
    }
}

/// Deep trend analysis for a chosen period and metric set.
///
/// The per-metric sections follow the caller's metric order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysisResponse {
    /// Bounds and size of the analyzed period
    pub period: PeriodInfo,
    /// Full-series regression statistics per requested metric
    pub metrics_analysis: OrderedMetricMap<MetricOutcome<MetricAnalysis>>,
    /// Correlation matrix over the requested metrics
    pub correlations: MetricOutcome<CorrelationResult>,
    /// Day-normalized rate of change per requested metric
    pub change_velocity: OrderedMetricMap<MetricOutcome<VelocityResult>>,
    /// 30-day extrapolation per requested metric; `None` where unpredictable
    pub predictions: OrderedMetricMap<Option<Prediction>>,
}

/// Weight, body fat, muscle mass, and BMI at one measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotStats {
    /// Weight (kg)
    pub weight: f64,
    /// Body fat (percent)
    pub body_fat: f64,
    /// Muscle mass (kg)
    pub muscle_mass: f64,
    /// Body mass index
    pub bmi: f64,
}

impl From<&Measurement> for SnapshotStats {
    fn from(measurement: &Measurement) -> Self {
        Self {
            weight: measurement.weight_kg,
            body_fat: measurement.body_fat_percent,
            muscle_mass: measurement.muscle_mass_kg,
            bmi: measurement.bmi,
        }
    }
}

/// First-to-last change of one metric over the report period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodChange {
    /// End value minus start value
    pub absolute: f64,
    /// Change relative to the start value; 0 on a zero baseline
    pub percent: f64,
}

/// Report provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    /// Inclusive period start
    pub period_start: DateTime<Utc>,
    /// Inclusive period end
    pub period_end: DateTime<Utc>,
    /// Wall-clock time the report was composed
    pub generated_at: DateTime<Utc>,
    /// Whole days between the period bounds
    pub duration_days: i64,
}

/// Counts and endpoint snapshots for the report period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Measurements inside the period
    pub measurements_count: usize,
    /// Photos inside the period; 0 when photos were not requested
    pub photos_count: usize,
    /// Key stats at the first measurement
    pub start_stats: Option<SnapshotStats>,
    /// Key stats at the last measurement
    pub end_stats: Option<SnapshotStats>,
}

/// Full progress report for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Report provenance
    pub report_info: ReportInfo,
    /// Counts and endpoint snapshots
    pub summary: ReportSummary,
    /// First-to-last changes of the key metrics; empty below 2 measurements
    pub key_changes: BTreeMap<MetricKind, PeriodChange>,
    /// Milestones crossed over the period
    pub achievements: Vec<Achievement>,
    /// Whole-period trends of the key metrics
    pub trends: BTreeMap<MetricKind, MetricOutcome<TrendResult>>,
    /// Band-based insights for the latest measurement
    pub health_insights: Vec<String>,
    /// Photos taken inside the period, oldest first
    pub photos_timeline: Vec<ProgressPhoto>,
    /// Trend-driven recommendations
    pub recommendations: Vec<String>,
}

/// Entry point of the analytics engine.
///
/// Holds the data access collaborators; every report method fetches one
/// snapshot, analyzes it, and returns without retaining state.
pub struct ReportComposer {
    measurements: Arc<dyn MeasurementProvider>,
    photos: Arc<dyn PhotoProvider>,
}

impl ReportComposer {
    /// Build a composer over the given providers.
    #[must_use]
    pub fn new(measurements: Arc<dyn MeasurementProvider>, photos: Arc<dyn PhotoProvider>) -> Self {
        Self {
            measurements,
            photos,
        }
    }

    /// Comprehensive summary across every tracked metric.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoData`] when no measurements exist, or
    /// [`AnalyticsError::DataAccess`] when the fetch fails.
    pub async fn metrics_summary(&self) -> AnalyticsResult<MetricsSummary> {
        let series = self.fetch_series(&SeriesQuery::default()).await?;
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(AnalyticsError::NoData),
        };

        let overview = SeriesOverview {
            total_measurements: series.len(),
            date_range: DateRange {
                start: first.recorded_at.date_naive(),
                end: last.recorded_at.date_naive(),
                duration_days: series.span_days(),
            },
            latest_measurement: last.recorded_at,
            measurement_frequency: series.frequency(),
        };

        let per_metric: Vec<(MetricKind, Option<MetricStats>, TrendWindows)> = MetricKind::ALL
            .par_iter()
            .map(|&metric| {
                (
                    metric,
                    Self::metric_stats(&series, metric),
                    Self::trend_windows(&series, metric),
                )
            })
            .collect();

        let mut current_stats = BTreeMap::new();
        let mut trends = BTreeMap::new();
        for (metric, stats, windows) in per_metric {
            if let Some(stats) = stats {
                current_stats.insert(metric, stats);
            }
            trends.insert(metric, windows);
        }

        Ok(MetricsSummary {
            overview,
            current_stats,
            trends,
            achievements: AchievementDetector::detect(&series),
            health_insights: InsightGenerator::health_insights(&last),
        })
    }

    /// Deep trend analysis for a period and metric set.
    ///
    /// Each requested metric gets a full-series analysis, a change velocity,
    /// and a 30-day prediction; a correlation matrix spans the set. Below 2
    /// measurements the whole analysis is the insufficient-data marker.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DataAccess`] when the fetch fails.
    pub async fn trend_analysis(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        metrics: &[MetricKind],
    ) -> AnalyticsResult<MetricOutcome<TrendAnalysisResponse>> {
        let series = self.fetch_series(&SeriesQuery::between(start, end)).await?;
        if series.len() < trend::MIN_POINTS {
            warn!(available = series.len(), "too few measurements for trend analysis");
            return Ok(MetricOutcome::insufficient(trend::MIN_POINTS, series.len()));
        }

        let period = PeriodInfo {
            start,
            end,
            duration_days: (end - start).num_days(),
            data_points: series.len(),
        };

        type MetricRow = (
            MetricKind,
            MetricOutcome<MetricAnalysis>,
            MetricOutcome<VelocityResult>,
            Option<Prediction>,
        );
        let rows: Vec<MetricRow> = metrics
            .par_iter()
            .map(|&metric| {
                (
                    metric,
                    MetricAnalyzer::analyze(&series, metric),
                    ChangeVelocityAnalyzer::velocity(&series, metric),
                    Predictor::predict(&series, metric, prediction::DEFAULT_HORIZON_DAYS),
                )
            })
            .collect();

        let mut metrics_analysis = Vec::with_capacity(rows.len());
        let mut change_velocity = Vec::with_capacity(rows.len());
        let mut predictions = Vec::with_capacity(rows.len());
        for (metric, analysis, velocity, forecast) in rows {
            metrics_analysis.push((metric, analysis));
            change_velocity.push((metric, velocity));
            predictions.push((metric, forecast));
        }

        Ok(MetricOutcome::ok(TrendAnalysisResponse {
            period,
            metrics_analysis: OrderedMetricMap::from_entries(metrics_analysis),
            correlations: CorrelationAnalyzer::correlations(&series, metrics),
            change_velocity: OrderedMetricMap::from_entries(change_velocity),
            predictions: OrderedMetricMap::from_entries(predictions),
        }))
    }

    /// Pairwise correlations across every tracked metric.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoData`] when no measurements exist, or
    /// [`AnalyticsError::DataAccess`] when the fetch fails.
    pub async fn metric_correlations(&self) -> AnalyticsResult<MetricOutcome<CorrelationResult>> {
        let series = self.fetch_series(&SeriesQuery::default()).await?;
        if series.is_empty() {
            return Err(AnalyticsError::NoData);
        }
        Ok(CorrelationAnalyzer::correlations(&series, &MetricKind::ALL))
    }

    /// Extrapolate the key metrics `days_ahead` days from the trailing
    /// 90-measurement snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::DataAccess`] when the fetch fails.
    pub async fn progress_predictions(
        &self,
        days_ahead: usize,
    ) -> AnalyticsResult<MetricOutcome<PredictionBatch>> {
        let series = self
            .fetch_series(&SeriesQuery::latest(prediction::BATCH_SNAPSHOT_LIMIT))
            .await?;
        Ok(Predictor::predict_batch(
            &series,
            &MetricKind::KEY_METRICS,
            days_ahead,
        ))
    }

    /// Assess a weight goal against the latest measurement and recent trend.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoData`] when no measurements exist,
    /// [`AnalyticsError::InvalidGoal`] when the target date is not in the
    /// future, or [`AnalyticsError::DataAccess`] when a fetch fails.
    pub async fn goal_progress(
        &self,
        target_weight: f64,
        target_date: NaiveDate,
    ) -> AnalyticsResult<GoalAssessment> {
        let latest = self
            .measurements
            .get_latest()
            .await?
            .ok_or(AnalyticsError::NoData)?;
        let recent = self
            .fetch_series(&SeriesQuery::latest(goals::TREND_SNAPSHOT_LIMIT))
            .await?;
        GoalFeasibilityEvaluator::assess(&latest, &recent, target_weight, target_date)
    }

    /// Full progress report for a period, optionally with the photo timeline.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoData`] when the period holds no
    /// measurements, or [`AnalyticsError::DataAccess`] when a fetch fails.
    pub async fn progress_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        include_photos: bool,
    ) -> AnalyticsResult<ProgressReport> {
        let series = self.fetch_series(&SeriesQuery::between(start, end)).await?;
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(AnalyticsError::NoData),
        };

        let photos = if include_photos {
            self.photos
                .get_photos(&PhotoQuery {
                    start: Some(start),
                    end: Some(end),
                    tags: Vec::new(),
                })
                .await?
        } else {
            Vec::new()
        };
        debug!(
            measurements = series.len(),
            photos = photos.len(),
            "composing progress report"
        );

        // span_days truncates to whole days; one extra day keeps the
        // earliest measurement inside the cutoff whatever its time of day.
        let span = series.span_days() + 1;
        let trends = [
            MetricKind::WeightKg,
            MetricKind::BodyFatPercent,
            MetricKind::MuscleMassKg,
        ]
        .into_iter()
        .map(|metric| (metric, TrendCalculator::trend(&series, metric, span)))
        .collect();

        Ok(ProgressReport {
            report_info: ReportInfo {
                period_start: start,
                period_end: end,
                generated_at: Utc::now(),
                duration_days: (end - start).num_days(),
            },
            summary: ReportSummary {
                measurements_count: series.len(),
                photos_count: photos.len(),
                start_stats: Some(SnapshotStats::from(&first)),
                end_stats: Some(SnapshotStats::from(&last)),
            },
            key_changes: Self::period_changes(&first, &last, series.len()),
            achievements: AchievementDetector::detect(&series),
            trends,
            health_insights: InsightGenerator::health_insights(&last),
            photos_timeline: photos,
            recommendations: InsightGenerator::recommendations(&series),
        })
    }

    async fn fetch_series(&self, query: &SeriesQuery) -> AnalyticsResult<TimeSeries> {
        let measurements = self.measurements.get_series(query).await?;
        debug!(count = measurements.len(), "fetched measurement snapshot");
        Ok(TimeSeries::from_unordered(measurements))
    }

    fn metric_stats(series: &TimeSeries, metric: MetricKind) -> Option<MetricStats> {
        let values = series.values(metric);
        let current = *values.last()?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(MetricStats {
            current: round2(current),
            min: round2(min),
            max: round2(max),
            avg: round2(statistics::mean(&values)),
            std: round2(statistics::sample_std(&values)),
        })
    }

    fn trend_windows(series: &TimeSeries, metric: MetricKind) -> TrendWindows {
        let [week, month, quarter, year] =
            trend::SUMMARY_WINDOWS_DAYS.map(|(_, days)| TrendCalculator::trend(series, metric, days));
        TrendWindows {
            week,
            month,
            quarter,
            year,
        }
    }

    fn period_changes(
        first: &Measurement,
        last: &Measurement,
        count: usize,
    ) -> BTreeMap<MetricKind, PeriodChange> {
        let mut changes = BTreeMap::new();
        if count < 2 {
            return changes;
        }
        for metric in MetricKind::KEY_METRICS {
            let (Some(start), Some(end)) = (metric.value_of(first), metric.value_of(last)) else {
                continue;
            };
            changes.insert(
                metric,
                PeriodChange {
                    absolute: round2(end - start),
                    percent: round2(statistics::percent_change(start, end)),
                },
            );
        }
        changes
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
