// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merging fresh results with a prior archive, and persisting the archive.

use crate::error::{AppError, Result};
use crate::models::{ArchiveActivityEntry, ArchiveListEntry, ArchiveUser, ExportOutput, PriorArchive};
use serde_json::{Map, Value};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Records identified by an integer id.
pub trait HasId {
    fn id(&self) -> u64;
}

impl HasId for ArchiveListEntry {
    fn id(&self) -> u64 {
        self.id
    }
}

impl HasId for ArchiveActivityEntry {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Keep one record per id; a later record replaces an earlier one in place.
pub fn dedupe_by_id<T: HasId>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut deduped: Vec<T> = Vec::new();

    for record in records {
        match positions.entry(record.id()) {
            Entry::Occupied(slot) => deduped[*slot.get()] = record,
            Entry::Vacant(slot) => {
                slot.insert(deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}

/// Overlay a prior archive's user fields on top of the freshly computed user.
///
/// Prior values win; null or missing prior fields keep the fresh value. If the
/// overlay does not form a valid user block the fresh user is kept.
pub fn merge_user(fresh: ArchiveUser, prior: Option<&Map<String, Value>>) -> ArchiveUser {
    let Some(prior) = prior else {
        return fresh;
    };

    let mut merged = match serde_json::to_value(&fresh) {
        Ok(Value::Object(map)) => map,
        _ => return fresh,
    };
    for (key, value) in prior.iter().filter(|(_, v)| !v.is_null()) {
        merged.insert(key.clone(), value.clone());
    }

    match serde_json::from_value(Value::Object(merged)) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Prior user metadata is malformed, using fresh values");
            fresh
        }
    }
}

/// First page to request when resuming a collection with `prior_len` entries.
///
/// Assumes every earlier page was full. Entries removed or reordered remotely
/// since the prior run can shift page boundaries and be skipped.
pub fn resume_start_page(prior_len: usize, page_size: u32) -> u32 {
    let full_pages = prior_len / page_size.max(1) as usize;
    u32::try_from(full_pages).unwrap_or(u32::MAX).max(1)
}

/// Zero-pad score rows shorter than `columns`.
pub fn pad_advanced_scores(lists: &mut [ArchiveListEntry], columns: usize) {
    for entry in lists
        .iter_mut()
        .filter(|entry| entry.advanced_scores.len() < columns)
    {
        entry.advanced_scores.resize(columns, 0.0);
    }
}

/// Combine fresh results with an optional prior archive.
///
/// Prior records come first so fresh records with the same id replace them.
pub fn assemble_archive(
    fresh_user: ArchiveUser,
    fresh_lists: Vec<ArchiveListEntry>,
    fresh_activity: Vec<ArchiveActivityEntry>,
    prior: Option<PriorArchive>,
) -> ExportOutput {
    let prior = prior.unwrap_or_default();
    let score_columns = fresh_user.advanced_scores.names.len();

    let user = merge_user(fresh_user, prior.user.as_ref());
    if user.advanced_scores.names.len() != score_columns {
        tracing::warn!(
            recorded = user.advanced_scores.names.len(),
            current = score_columns,
            "Prior archive's advanced score names differ from current columns"
        );
    }

    let mut lists = dedupe_by_id(prior.lists.into_iter().chain(fresh_lists));
    pad_advanced_scores(&mut lists, score_columns);
    let activity = dedupe_by_id(prior.activity.into_iter().chain(fresh_activity));

    ExportOutput {
        user,
        lists,
        activity,
    }
}

/// Read a previously written archive.
pub async fn load_prior_archive(path: &Path) -> Result<PriorArchive> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Archive(format!("cannot read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| AppError::Archive(format!("cannot parse {}: {}", path.display(), e)))
}

/// Load the prior archive for resume mode; problems fall back to a full run.
pub async fn load_prior_for_resume(path: &Path) -> Option<PriorArchive> {
    match load_prior_archive(path).await {
        Ok(prior) => {
            tracing::info!(
                path = %path.display(),
                lists = prior.lists.len(),
                activity = prior.activity.len(),
                "Loaded prior archive"
            );
            Some(prior)
        }
        Err(e) => {
            tracing::warn!(error = %e, "No usable prior archive, fetching everything");
            None
        }
    }
}

/// Write the archive as 2-space pretty JSON.
///
/// Writes to a sibling temp file first and renames it into place, so an
/// existing archive is never left half-written.
pub async fn write_archive(path: &Path, output: &ExportOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    let tmp = temp_path(path);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    tracing::debug!(path = %path.display(), "Archive written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data-export.json"));
    name.push(".tmp");
    path.with_file_name(name)
}
