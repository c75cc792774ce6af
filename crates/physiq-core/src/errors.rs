// ABOUTME: Error types for analytics operations over body-composition data
// ABOUTME: Distinguishes genuine faults from non-fatal conditions callers branch on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! # Analytics Error Types
//!
//! Faults that abort an enclosing analytics operation. Non-fatal conditions
//! ("not enough data for this metric") are deliberately *not* represented
//! here: analyzers return them as structured result values so callers can
//! branch without stack unwinding.

use std::error::Error;

use chrono::NaiveDate;

/// Errors that abort an analytics operation.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The data access collaborator returned an empty snapshot where a
    /// report requires at least one measurement
    #[error("No measurement data available")]
    NoData,

    /// A goal target date is not strictly after the latest measurement
    #[error("Target date {target} must be after the latest measurement on {latest}")]
    InvalidGoal {
        /// Requested target date
        target: NaiveDate,
        /// Date of the latest available measurement
        latest: NaiveDate,
    },

    /// A metric name does not match any entry in the metric registry
    #[error("Unknown metric: '{name}'")]
    UnknownMetric {
        /// The unrecognized metric name
        name: String,
    },

    /// The data access or photo collaborator failed
    #[error("Data access failed while {context}")]
    DataAccess {
        /// What the engine was doing when the collaborator failed
        context: &'static str,
        /// Underlying collaborator error
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl AnalyticsError {
    /// Create an invalid-goal error
    #[must_use]
    pub const fn invalid_goal(target: NaiveDate, latest: NaiveDate) -> Self {
        Self::InvalidGoal { target, latest }
    }

    /// Create an unknown-metric error
    #[must_use]
    pub fn unknown_metric(name: impl Into<String>) -> Self {
        Self::UnknownMetric { name: name.into() }
    }

    /// Wrap a collaborator failure with the operation that triggered it
    #[must_use]
    pub fn data_access(
        context: &'static str,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataAccess {
            context,
            source: Box::new(source),
        }
    }
}

/// Result type alias for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_goal_message_names_both_dates() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let latest = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let error = AnalyticsError::invalid_goal(target, latest);

        let message = error.to_string();
        assert!(message.contains("2025-01-01"));
        assert!(message.contains("2025-06-01"));
    }

    #[test]
    fn data_access_preserves_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "snapshot missing");
        let error = AnalyticsError::data_access("loading measurement snapshot", source);

        assert!(error.source().is_some());
        assert!(error.to_string().contains("loading measurement snapshot"));
    }
}
