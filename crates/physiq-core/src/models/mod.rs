// ABOUTME: Core data models for body-composition measurements and progress photos
// ABOUTME: Measurement records, the fixed metric registry, and photo timeline metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

//! Core data models shared across the platform.

/// Body-composition measurement record and the metric registry
pub mod measurement;
/// Progress photo metadata for report timelines
pub mod photo;

pub use measurement::{Measurement, MetricKind};
pub use photo::ProgressPhoto;
