// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use anilist_export::error::{AppError, Result};
use anilist_export::models::{FuzzyDate, MediaRef, RawActivityEntry, RawListEntry};
use anilist_export::services::GraphQlTransport;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Mutex;

/// A request seen by the mock transport.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub document: String,
    pub variables: Value,
    pub token: Option<String>,
}

#[allow(dead_code)]
impl RecordedCall {
    pub fn page(&self) -> Option<u64> {
        self.variables.get("page").and_then(Value::as_u64)
    }

    pub fn is_media_list(&self) -> bool {
        self.document.contains("mediaList")
    }

    pub fn is_activity(&self) -> bool {
        self.document.contains("activities")
    }
}

/// Transport that replays scripted responses in order and records requests.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(responses: Vec<Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Page numbers requested for the given collection, in order.
    pub fn pages_requested(&self, pred: fn(&RecordedCall) -> bool) -> Vec<u64> {
        self.calls()
            .iter()
            .filter(|call| pred(call))
            .filter_map(RecordedCall::page)
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn request(
        &self,
        document: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            document: document.to_string(),
            variables,
            token: token.map(str::to_string),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::AniListApi("unexpected extra request".to_string())))
    }
}

#[allow(dead_code)]
pub fn user_response(id: u64) -> Result<Value> {
    Ok(json!({ "User": { "id": id } }))
}

#[allow(dead_code)]
pub fn list_page(entries: Vec<RawListEntry>) -> Result<Value> {
    Ok(json!({ "Page": { "mediaList": entries } }))
}

#[allow(dead_code)]
pub fn activity_page(entries: Vec<RawActivityEntry>) -> Result<Value> {
    Ok(json!({ "Page": { "activities": entries } }))
}

#[allow(dead_code)]
pub fn rate_limited(retry_after_secs: u64) -> Result<Value> {
    Err(AppError::RateLimited { retry_after_secs })
}

/// A plain anime list entry.
#[allow(dead_code)]
pub fn list_entry(id: u64) -> RawListEntry {
    RawListEntry {
        id,
        media_id: id + 1000,
        user_id: 7,
        status: Some("CURRENT".to_string()),
        score: Some(0.0),
        progress: Some(1),
        created_at: Some(1_600_000_000),
        updated_at: Some(1_600_000_100),
        media: Some(MediaRef {
            id: id + 1000,
            media_type: Some("ANIME".to_string()),
        }),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn list_entries(ids: Range<u64>) -> Vec<RawListEntry> {
    ids.map(list_entry).collect()
}

#[allow(dead_code)]
pub fn activity_entry(id: u64) -> RawActivityEntry {
    RawActivityEntry {
        id,
        user_id: 7,
        activity_type: Some("ANIME_LIST".to_string()),
        status: Some("watched episode".to_string()),
        progress: Some("3".to_string()),
        like_count: Some(0),
        reply_count: Some(0),
        is_locked: Some(false),
        created_at: Some(1_600_000_000),
        media: Some(MediaRef {
            id: id + 1000,
            media_type: Some("ANIME".to_string()),
        }),
    }
}

#[allow(dead_code)]
pub fn activity_entries(ids: Range<u64>) -> Vec<RawActivityEntry> {
    ids.map(activity_entry).collect()
}

#[allow(dead_code)]
pub fn date(year: u32, month: u32, day: u32) -> FuzzyDate {
    FuzzyDate::new(year, month, day)
}
