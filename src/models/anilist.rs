// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Records as returned by the AniList GraphQL API.
//!
//! These only live for the duration of a run: each page is deserialized into
//! these types and then mapped into the archive schema. Almost every field is
//! nullable on the AniList side, so most are `Option`s and the mapper decides
//! the default.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A possibly-partial calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl FuzzyDate {
    pub fn new(year: u32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }
}

/// Media descriptor nested in list entries and activities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    /// `ANIME`, `MANGA`, ...
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

/// One media list entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListEntry {
    pub id: u64,
    pub media_id: u64,
    pub user_id: u64,
    /// `CURRENT`, `PLANNING`, `COMPLETED`, ...
    pub status: Option<String>,
    pub score: Option<f64>,
    pub progress: Option<u32>,
    pub progress_volumes: Option<u32>,
    pub repeat: Option<u32>,
    pub private: Option<bool>,
    pub notes: Option<String>,
    /// Custom list name -> whether this entry is on it
    pub custom_lists: Option<IndexMap<String, bool>>,
    /// Advanced scoring category -> score
    pub advanced_scores: Option<IndexMap<String, f64>>,
    pub started_at: Option<FuzzyDate>,
    pub completed_at: Option<FuzzyDate>,
    /// Unix seconds
    pub created_at: Option<i64>,
    /// Unix seconds
    pub updated_at: Option<i64>,
    pub media: Option<MediaRef>,
}

/// One list activity ("watched episode 3 of ...").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityEntry {
    pub id: u64,
    pub user_id: u64,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Free-text action phrase
    pub status: Option<String>,
    /// Free-text progress, e.g. "3" or "1 - 4"
    pub progress: Option<String>,
    pub like_count: Option<u32>,
    pub reply_count: Option<u32>,
    pub is_locked: Option<bool>,
    /// Unix seconds
    pub created_at: Option<i64>,
    pub media: Option<MediaRef>,
}
