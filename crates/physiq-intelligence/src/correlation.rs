// ABOUTME: Pairwise Pearson correlation matrix and strong-correlation extraction
// ABOUTME: Uses pairwise-complete observations; each pair drops its own null rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Correlation structure between metrics.

use physiq_core::models::MetricKind;
use serde::{Deserialize, Serialize};

use crate::constants::correlation;
use crate::statistics;
use crate::timeseries::TimeSeries;
use crate::MetricOutcome;

/// Strength band of a notable correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    /// |r| > 0.8
    Strong,
    /// 0.7 < |r| <= 0.8
    Moderate,
}

/// Sign of a notable correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    /// The metrics move together
    Positive,
    /// One rises as the other falls
    Negative,
}

/// One metric pair whose |r| cleared the notable threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    /// First metric of the pair (caller order)
    pub metric1: MetricKind,
    /// Second metric of the pair
    pub metric2: MetricKind,
    /// Pearson correlation coefficient
    pub correlation: f64,
    /// Strength band
    pub strength: CorrelationStrength,
    /// Sign of the relationship
    pub direction: CorrelationDirection,
}

/// Symmetric correlation matrix over a requested metric subset.
///
/// `matrix[i][j]` is the Pearson coefficient between `metrics[i]` and
/// `metrics[j]`; `None` marks a pair with fewer than 2 pairwise-complete
/// rows or zero variance. The diagonal is always 1.0. Row and column order
/// follow the caller-supplied metric list for deterministic keying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Metrics in the order rows and columns are keyed
    pub metrics: Vec<MetricKind>,
    /// Symmetric coefficient matrix
    pub matrix: Vec<Vec<Option<f64>>>,
    /// Pairs with |r| above the notable threshold
    pub strong_correlations: Vec<StrongCorrelation>,
    /// One interpretation sentence per notable pair
    pub insights: Vec<String>,
}

/// Pairwise correlation analyzer.
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Correlation matrix and notable-pair extraction over `metrics`.
    ///
    /// Requires at least 2 metrics. Each pair independently drops rows where
    /// either value is null, so a sparse optional metric does not shrink the
    /// observations available to complete pairs.
    #[must_use]
    pub fn correlations(
        series: &TimeSeries,
        metrics: &[MetricKind],
    ) -> MetricOutcome<CorrelationResult> {
        if metrics.len() < correlation::MIN_METRICS {
            return MetricOutcome::insufficient(correlation::MIN_METRICS, metrics.len());
        }

        let mut matrix = vec![vec![None; metrics.len()]; metrics.len()];
        let mut strong_correlations = Vec::new();

        for (i, &metric_a) in metrics.iter().enumerate() {
            matrix[i][i] = Some(1.0);
            for (j, &metric_b) in metrics.iter().enumerate().skip(i + 1) {
                let pairs = series.paired_values(metric_a, metric_b);
                let coefficient = statistics::pearson(&pairs);
                matrix[i][j] = coefficient;
                matrix[j][i] = coefficient;

                let Some(r) = coefficient else { continue };
                if r.abs() > correlation::NOTABLE_THRESHOLD {
                    strong_correlations.push(StrongCorrelation {
                        metric1: metric_a,
                        metric2: metric_b,
                        correlation: r,
                        strength: if r.abs() > correlation::STRONG_THRESHOLD {
                            CorrelationStrength::Strong
                        } else {
                            CorrelationStrength::Moderate
                        },
                        direction: if r > 0.0 {
                            CorrelationDirection::Positive
                        } else {
                            CorrelationDirection::Negative
                        },
                    });
                }
            }
        }

        let insights = strong_correlations.iter().map(Self::interpret).collect();

        MetricOutcome::ok(CorrelationResult {
            metrics: metrics.to_vec(),
            matrix,
            strong_correlations,
            insights,
        })
    }

    /// Human-readable sentence for one notable pair.
    fn interpret(pair: &StrongCorrelation) -> String {
        let name1 = pair.metric1.display_name();
        let name2 = pair.metric2.display_name();
        let r = pair.correlation;
        match pair.direction {
            CorrelationDirection::Positive => {
                format!("{name1} and {name2} tend to increase/decrease together (r={r:.3})")
            }
            CorrelationDirection::Negative => {
                format!("As {name1} increases, {name2} tends to decrease (r={r:.3})")
            }
        }
    }
}
