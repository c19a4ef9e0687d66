// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record transformation from AniList records to archive records.
//!
//! Handles:
//! - Field-by-field mapping of list entries and activities
//! - Canonical advanced-score column order (first-seen across the run)
//! - Custom list name catalogs, split by series type
//!
//! Aggregates are built by folding over the collection in fetch order; nothing
//! here holds state between calls.

use crate::error::{AppError, Result};
use crate::models::{
    ArchiveActivityEntry, ArchiveListEntry, CustomListCatalog, RawActivityEntry, RawListEntry,
};
use crate::services::mapping::{
    activity_status_to_action_type, bool_flag, extract_active_names, fuzzy_date_to_int,
    list_status_to_int, media_type_to_series_type, timestamp_to_archive_string,
    SERIES_TYPE_MANGA,
};
use icu_collator::{Collator, CollatorOptions};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::warn;

/// Output of transforming a whole media list collection.
#[derive(Debug, Clone, Default)]
pub struct ListTransform {
    pub lists: Vec<ArchiveListEntry>,
    pub custom_lists: CustomListCatalog,
    /// Canonical advanced-score column order every `advanced_scores` follows.
    pub score_names: Vec<String>,
}

/// Running custom-list name sets.
#[derive(Debug, Default)]
struct CustomListNames {
    anime: BTreeSet<String>,
    manga: BTreeSet<String>,
}

impl CustomListNames {
    fn record(mut self, series_type: u8, names: &[String]) -> Self {
        let target = if series_type == SERIES_TYPE_MANGA {
            &mut self.manga
        } else {
            &mut self.anime
        };
        target.extend(names.iter().cloned());
        self
    }

    fn into_catalog(self) -> CustomListCatalog {
        CustomListCatalog {
            anime: collate_names(self.anime),
            manga: collate_names(self.manga),
        }
    }
}

/// Sort unique names in root-locale collation order: case and accents are
/// secondary to the base letters, so "apple" < "Banana" < "Éclair" < "zeta".
pub fn collate_names(names: BTreeSet<String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().collect();
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => names.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b))),
        Err(err) => {
            warn!(error = %err, "Collator unavailable, sorting custom lists by lowercase");
            names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        }
    }
    names
}

/// Canonical advanced-score names: each name in the order it is first seen.
pub fn canonical_score_names(entries: &[RawListEntry]) -> Vec<String> {
    extend_score_names(Vec::new(), entries)
}

/// Append names not already in `seed`, keeping `seed`'s order as the prefix.
pub fn extend_score_names(seed: Vec<String>, entries: &[RawListEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.advanced_scores.as_ref())
        .flat_map(|scores| scores.keys())
        .fold(seed, |mut names, name| {
            if !names.contains(name) {
                names.push(name.clone());
            }
            names
        })
}

/// Dense score row aligned with `names`; missing categories score 0.
pub fn align_advanced_scores(scores: Option<&IndexMap<String, f64>>, names: &[String]) -> Vec<f64> {
    names
        .iter()
        .map(|name| {
            scores
                .and_then(|scores| scores.get(name))
                .copied()
                .unwrap_or(0.0)
        })
        .collect()
}

/// Map one list entry into the archive schema.
pub fn transform_list_entry(raw: &RawListEntry, score_names: &[String]) -> ArchiveListEntry {
    let series_type =
        media_type_to_series_type(raw.media.as_ref().and_then(|m| m.media_type.as_deref()));

    ArchiveListEntry {
        id: raw.id,
        series_type,
        user_id: raw.user_id,
        series_id: raw.media_id,
        status: list_status_to_int(raw.status.as_deref().unwrap_or_default()),
        score: raw.score.unwrap_or(0.0),
        progress: raw.progress.unwrap_or(0),
        progress_volume: raw.progress_volumes.unwrap_or(0),
        priority: 0,
        repeat: raw.repeat.unwrap_or(0),
        private: bool_flag(raw.private),
        notes: raw.notes.clone(),
        custom_lists: extract_active_names(raw.custom_lists.as_ref()),
        advanced_scores: align_advanced_scores(raw.advanced_scores.as_ref(), score_names),
        hidden_default: 0,
        started_on: fuzzy_date_to_int(raw.started_at.as_ref()),
        finished_on: fuzzy_date_to_int(raw.completed_at.as_ref()),
        created_at: timestamp_to_archive_string(raw.created_at.unwrap_or(0)),
        updated_at: timestamp_to_archive_string(raw.updated_at.unwrap_or(0)),
    }
}

/// Transform a full media list collection, in fetch order.
///
/// `seed_score_names` fixes the leading score columns (from a prior archive);
/// names first seen in `entries` are appended after them.
pub fn transform_list_entries(
    entries: &[RawListEntry],
    seed_score_names: Vec<String>,
) -> ListTransform {
    let score_names = extend_score_names(seed_score_names, entries);

    let (lists, custom_lists) = entries.iter().fold(
        (Vec::with_capacity(entries.len()), CustomListNames::default()),
        |(mut lists, names), raw| {
            let entry = transform_list_entry(raw, &score_names);
            let names = names.record(entry.series_type, &entry.custom_lists);
            lists.push(entry);
            (lists, names)
        },
    );

    ListTransform {
        lists,
        custom_lists: custom_lists.into_catalog(),
        score_names,
    }
}

/// Map one list activity into the archive schema.
pub fn transform_activity_entry(raw: &RawActivityEntry) -> ArchiveActivityEntry {
    let object_type =
        media_type_to_series_type(raw.media.as_ref().and_then(|m| m.media_type.as_deref())) + 1;
    let created_at = timestamp_to_archive_string(raw.created_at.unwrap_or(0));

    ArchiveActivityEntry {
        id: raw.id,
        user_id: raw.user_id,
        messenger_id: None,
        action_type: activity_status_to_action_type(raw.status.as_deref().unwrap_or_default()),
        object_id: raw.media.as_ref().map(|m| m.id).unwrap_or(0),
        object_type,
        object_value: raw.progress.clone().unwrap_or_default(),
        reply_count: raw.reply_count.unwrap_or(0),
        updated_at: created_at.clone(),
        created_at,
        locked: bool_flag(raw.is_locked),
        like_count: raw.like_count.unwrap_or(0),
        private: 0,
    }
}

/// Transform a full activity collection.
///
/// Fails if the output count differs from the input count.
pub fn transform_activity_entries(
    entries: &[RawActivityEntry],
) -> Result<Vec<ArchiveActivityEntry>> {
    let activity: Vec<_> = entries.iter().map(transform_activity_entry).collect();
    ensure_same_len(entries.len(), activity.len())?;
    Ok(activity)
}

/// Post-condition check for the activity transform.
pub fn ensure_same_len(fetched: usize, transformed: usize) -> Result<()> {
    if fetched != transformed {
        return Err(AppError::Invariant(format!(
            "activity list length mismatch after transformation: fetched {}, transformed {}",
            fetched, transformed
        )));
    }
    Ok(())
}
