// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Archive schema written to `data-export.json`.
//!
//! Field order matches the GDPR export layout, so serialization order is part
//! of the format.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Normalized media list record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveListEntry {
    pub id: u64,
    /// 0 = anime, 1 = manga
    pub series_type: u8,
    pub user_id: u64,
    /// AniList media id
    pub series_id: u64,
    /// 0..=5, see `mapping::list_status_to_int`
    pub status: u8,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub progress: u32,
    pub progress_volume: u32,
    /// Always 0, not tracked by AniList
    pub priority: u8,
    pub repeat: u32,
    /// 0 or 1
    pub private: u8,
    pub notes: Option<String>,
    /// Names of the custom lists this entry is on
    pub custom_lists: Vec<String>,
    /// Aligned with `user.advanced_scores.names`
    #[serde(serialize_with = "serialize_scores")]
    pub advanced_scores: Vec<f64>,
    /// Always 0
    pub hidden_default: u8,
    /// `YYYYMMDD` or 0
    pub started_on: u32,
    /// `YYYYMMDD` or 0
    pub finished_on: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// A score as JSON: whole numbers without a fractional part (`8`, not `8.0`).
struct Score(f64);

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        // Beyond 2^53 an f64 no longer holds every integer exactly
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Score(*score).serialize(serializer)
}

fn serialize_scores<S: Serializer>(scores: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(scores.iter().map(|score| Score(*score)))
}

/// Normalized activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveActivityEntry {
    pub id: u64,
    pub user_id: u64,
    /// Always null for list activities
    pub messenger_id: Option<u64>,
    pub action_type: u8,
    /// Media id, or 0 when the activity is not bound to a media
    pub object_id: u64,
    /// 1 = anime, 2 = manga
    pub object_type: u8,
    pub object_value: String,
    pub reply_count: u32,
    pub created_at: String,
    pub updated_at: String,
    /// 0 or 1
    pub locked: u8,
    pub like_count: u32,
    /// Always 0
    pub private: u8,
}

/// Custom list names used across the user's entries, by series type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomListCatalog {
    pub anime: Vec<String>,
    pub manga: Vec<String>,
}

/// Advanced scoring categories, in canonical column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedScoreCatalog {
    pub active: bool,
    pub names: Vec<String>,
}

/// User metadata block of the archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveUser {
    pub display_name: String,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub custom_lists: CustomListCatalog,
    pub advanced_scores: AdvancedScoreCatalog,
}

/// Archive root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOutput {
    pub user: ArchiveUser,
    pub lists: Vec<ArchiveListEntry>,
    pub activity: Vec<ArchiveActivityEntry>,
}

/// A previously written archive, read leniently for resume mode.
///
/// `user` stays an untyped object so hand-edited or partial metadata can be
/// overlaid field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorArchive {
    #[serde(default)]
    pub user: Option<Map<String, Value>>,
    #[serde(default)]
    pub lists: Vec<ArchiveListEntry>,
    #[serde(default)]
    pub activity: Vec<ArchiveActivityEntry>,
}

impl PriorArchive {
    /// Advanced score names recorded in the prior archive, if any.
    pub fn advanced_score_names(&self) -> Vec<String> {
        self.user
            .as_ref()
            .and_then(|user| user.get("advanced_scores"))
            .and_then(|scores| scores.get("names"))
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| name.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
