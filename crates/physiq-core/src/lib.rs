// ABOUTME: Core types for the Physiq body-composition analytics platform
// ABOUTME: Foundation crate with measurement models, metric registry, and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

#![deny(unsafe_code)]

//! # Physiq Core
//!
//! Foundation crate providing shared types for the Physiq body-composition
//! analytics platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with [`AnalyticsError`]
//! - **models**: Measurement records, the metric registry, and photo metadata

/// Unified error handling for analytics operations
pub mod errors;

/// Core data models (`Measurement`, `MetricKind`, `ProgressPhoto`)
pub mod models;

pub use errors::{AnalyticsError, AnalyticsResult};
pub use models::{Measurement, MetricKind, ProgressPhoto};
