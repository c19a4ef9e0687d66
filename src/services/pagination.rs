// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page-by-page retrieval of one AniList collection.
//!
//! Each collection is driven through a small state machine:
//!
//! ```text
//! Fetching(n) --full page--> [delay] Fetching(n + 1)
//! Fetching(n) --short page--> Done
//! Fetching(n) --429--> RateLimited(n, wait) --[wait]--> Fetching(n)
//! ```
//!
//! A short (or empty) page ends the collection, so a collection whose size is
//! an exact multiple of the page size costs one extra, empty request. Any error
//! other than a rate limit aborts the fetch.

use crate::config::MAX_PAGE_SIZE;
use crate::error::{AppError, Result};
use crate::services::anilist::GraphQlTransport;
use crate::services::queries::{ACTIVITY_QUERY, MEDIA_LIST_QUERY};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

/// Paginated collections exported from AniList.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    MediaList,
    Activities,
}

impl Collection {
    pub fn query(self) -> &'static str {
        match self {
            Collection::MediaList => MEDIA_LIST_QUERY,
            Collection::Activities => ACTIVITY_QUERY,
        }
    }

    /// Location of the entry array inside the response `data`.
    fn entries_pointer(self) -> &'static str {
        match self {
            Collection::MediaList => "/Page/mediaList",
            Collection::Activities => "/Page/activities",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Collection::MediaList => "media list",
            Collection::Activities => "activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Fetching { page: u32 },
    RateLimited { page: u32, wait: Duration },
    Done,
}

/// Drives paginated requests over a transport.
pub struct PageFetcher<'a, T: ?Sized> {
    transport: &'a T,
    per_page: u32,
    delay: Duration,
}

impl<'a, T> PageFetcher<'a, T>
where
    T: GraphQlTransport + ?Sized,
{
    /// `delay` is the pause between successive full pages.
    ///
    /// `per_page` is clamped to `1..=MAX_PAGE_SIZE`; asking for more than the
    /// server returns would end every collection after its first page.
    pub fn new(transport: &'a T, per_page: u32, delay: Duration) -> Self {
        if per_page > MAX_PAGE_SIZE {
            tracing::warn!(
                per_page,
                max = MAX_PAGE_SIZE,
                "Page size above AniList maximum, clamping"
            );
        }
        Self {
            transport,
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
            delay,
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Fetch a single page of a collection.
    pub async fn fetch_page<E: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: u64,
        page: u32,
        token: Option<&str>,
    ) -> Result<Vec<E>> {
        let variables = json!({
            "page": page,
            "perPage": self.per_page,
            "userId": user_id,
        });

        let mut data = self
            .transport
            .request(collection.query(), variables, token)
            .await?;

        let entries = data
            .pointer_mut(collection.entries_pointer())
            .map(Value::take)
            .ok_or_else(|| {
                AppError::Decode(format!(
                    "{} page {} has no {}",
                    collection.name(),
                    page,
                    collection.entries_pointer()
                ))
            })?;

        // A null list is an empty page
        if entries.is_null() {
            return Ok(Vec::new());
        }

        serde_json::from_value(entries).map_err(|e| {
            AppError::Decode(format!("{} page {}: {}", collection.name(), page, e))
        })
    }

    /// Fetch every page of a collection starting at `start_page` (1-based).
    pub async fn fetch_all<E: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: u64,
        token: Option<&str>,
        start_page: u32,
    ) -> Result<Vec<E>> {
        let mut entries = Vec::new();
        let mut state = FetchState::Fetching {
            page: start_page.max(1),
        };

        loop {
            state = match state {
                FetchState::Fetching { page } => {
                    match self.fetch_page::<E>(collection, user_id, page, token).await {
                        Ok(batch) => {
                            let count = batch.len();
                            entries.extend(batch);
                            tracing::info!(
                                collection = collection.name(),
                                page,
                                count,
                                total = entries.len(),
                                "Fetched page"
                            );

                            if count < self.per_page as usize {
                                FetchState::Done
                            } else {
                                tokio::time::sleep(self.delay).await;
                                FetchState::Fetching { page: page + 1 }
                            }
                        }
                        Err(AppError::RateLimited { retry_after_secs }) => {
                            FetchState::RateLimited {
                                page,
                                wait: Duration::from_secs(retry_after_secs),
                            }
                        }
                        Err(e) => return Err(e),
                    }
                }
                FetchState::RateLimited { page, wait } => {
                    tracing::warn!(
                        collection = collection.name(),
                        page,
                        wait_secs = wait.as_secs(),
                        "Rate limited, backing off before retrying page"
                    );
                    tokio::time::sleep(wait).await;
                    FetchState::Fetching { page }
                }
                FetchState::Done => return Ok(entries),
            };
        }
    }
}
