// ABOUTME: Data access seams the report composer pulls measurements and photos through
// ABOUTME: Async traits so storage backends stay swappable in composition and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Provider traits for measurement and photo storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use physiq_core::errors::AnalyticsResult;
use physiq_core::models::{Measurement, ProgressPhoto};

/// Filter for a measurement series fetch.
#[derive(Debug, Clone, Default)]
pub struct SeriesQuery {
    /// Inclusive lower bound on `recorded_at`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `recorded_at`
    pub end: Option<DateTime<Utc>>,
    /// Return at most this many of the most recent measurements
    pub limit: Option<usize>,
}

impl SeriesQuery {
    /// Query for the `limit` most recent measurements, unbounded by date.
    #[must_use]
    pub fn latest(limit: usize) -> Self {
        Self {
            start: None,
            end: None,
            limit: Some(limit),
        }
    }

    /// Query for everything recorded within `[start, end]`.
    #[must_use]
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            limit: None,
        }
    }
}

/// Filter for a progress photo fetch.
#[derive(Debug, Clone, Default)]
pub struct PhotoQuery {
    /// Inclusive lower bound on `taken_at`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `taken_at`
    pub end: Option<DateTime<Utc>>,
    /// Keep only photos carrying all of these tags
    pub tags: Vec<String>,
}

/// Source of body composition measurements.
#[async_trait]
pub trait MeasurementProvider: Send + Sync {
    /// Fetch measurements matching the query, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`physiq_core::errors::AnalyticsError::DataAccess`] when the
    /// backing store fails.
    async fn get_series(&self, query: &SeriesQuery) -> AnalyticsResult<Vec<Measurement>>;

    /// Fetch the most recent measurement, if any exist.
    ///
    /// # Errors
    ///
    /// Returns [`physiq_core::errors::AnalyticsError::DataAccess`] when the
    /// backing store fails.
    async fn get_latest(&self) -> AnalyticsResult<Option<Measurement>>;
}

/// Source of progress photos.
#[async_trait]
pub trait PhotoProvider: Send + Sync {
    /// Fetch photos matching the query, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`physiq_core::errors::AnalyticsError::DataAccess`] when the
    /// backing store fails.
    async fn get_photos(&self, query: &PhotoQuery) -> AnalyticsResult<Vec<ProgressPhoto>>;
}
