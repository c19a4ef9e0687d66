// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-value conversions from the AniList schema to the archive schema.

use crate::models::FuzzyDate;
use crate::time_utils::format_unix_seconds;
use indexmap::IndexMap;

/// Series type for anime (also the fallback for unknown media types).
pub const SERIES_TYPE_ANIME: u8 = 0;
/// Series type for manga.
pub const SERIES_TYPE_MANGA: u8 = 1;

/// List status -> archive status code.
const LIST_STATUS_CODES: &[(&str, u8)] = &[
    ("CURRENT", 0),
    ("PLANNING", 1),
    ("COMPLETED", 2),
    ("DROPPED", 3),
    ("PAUSED", 4),
    ("REPEATING", 5),
];

/// Activity keyword -> action type. First substring match wins, so
/// "rewatched"/"reread" must precede "watched"/"read".
const ACTION_KEYWORDS: &[(&str, u8)] = &[
    ("completed", 1),
    ("plans", 2),
    ("dropped", 5),
    ("paused", 4),
    ("rewatched", 6),
    ("reread", 6),
    ("watched", 3),
    ("read", 3),
];

/// Format unix seconds as the archive's UTC timestamp string.
pub fn timestamp_to_archive_string(seconds: i64) -> String {
    format_unix_seconds(seconds)
}

/// Collapse a fuzzy date to `YYYYMMDD`, or 0 unless all parts are set.
///
/// Values too large to pack into a `u32` also collapse to 0.
pub fn fuzzy_date_to_int(date: Option<&FuzzyDate>) -> u32 {
    let Some(date) = date else {
        return 0;
    };
    match (date.year, date.month, date.day) {
        (Some(year), Some(month), Some(day)) if year != 0 && month != 0 && day != 0 => year
            .checked_mul(10_000)
            .and_then(|v| v.checked_add(month.checked_mul(100)?))
            .and_then(|v| v.checked_add(day))
            .unwrap_or(0),
        _ => 0,
    }
}

pub fn media_type_to_series_type(media_type: Option<&str>) -> u8 {
    match media_type {
        Some("MANGA") => SERIES_TYPE_MANGA,
        _ => SERIES_TYPE_ANIME,
    }
}

pub fn list_status_to_int(status: &str) -> u8 {
    LIST_STATUS_CODES
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, code)| *code)
        .unwrap_or(0)
}

/// Derive the action type from a free-text activity status.
pub fn activity_status_to_action_type(status: &str) -> u8 {
    if status.is_empty() {
        return 0;
    }
    let normalized = status.to_lowercase();
    ACTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, action)| *action)
        .unwrap_or(0)
}

/// Names whose flag is set, in source order.
pub fn extract_active_names(map: Option<&IndexMap<String, bool>>) -> Vec<String> {
    map.map(|names| {
        names
            .iter()
            .filter(|(_, active)| **active)
            .map(|(name, _)| name.clone())
            .collect()
    })
    .unwrap_or_default()
}

pub fn bool_flag(value: Option<bool>) -> u8 {
    u8::from(value.unwrap_or(false))
}
