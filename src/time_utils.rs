// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Utc};

/// Timestamp layout used by the archive format.
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format unix seconds as a UTC `YYYY-MM-DD HH:MM:SS` string.
///
/// Seconds outside chrono's representable range fall back to the epoch.
pub fn format_unix_seconds(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .unwrap_or_default()
        .format(ARCHIVE_TIMESTAMP_FORMAT)
        .to_string()
}
