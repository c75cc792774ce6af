// ABOUTME: Progress photo metadata used in report timelines
// ABOUTME: Supplied by the photo collaborator; never feeds analytic computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Physiq Body Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A progress photo as stored by the photo collaborator.
///
/// Photos appear in the progress report timeline only; no analyzer reads
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressPhoto {
    /// Unique photo identifier
    pub id: Uuid,
    /// Stored filename
    pub filename: String,
    /// Filename at upload time
    pub original_filename: String,
    /// When the photo was taken
    pub taken_at: DateTime<Utc>,
    /// User-assigned tags (e.g. "front", "side")
    pub tags: Vec<String>,
    /// File size in bytes
    pub file_size: u64,
    /// Image width in pixels, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Image height in pixels, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
