// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated fetch engine tests.
//!
//! Time is paused in the async tests, so sleeps advance a virtual clock and
//! the assertions on elapsed time are exact.

use anilist_export::error::AppError;
use anilist_export::models::{RawActivityEntry, RawListEntry};
use anilist_export::services::{Collection, PageFetcher};
use common::{activity_page, list_entries, list_page, rate_limited, MockTransport, RecordedCall};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

mod common;

const PER_PAGE: u32 = 50;

fn ids(entries: &[RawListEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.id).collect()
}

#[tokio::test(start_paused = true)]
async fn test_stops_after_short_page() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        list_page(list_entries(51..101)),
        list_page(list_entries(101..104)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("fetch should succeed");

    assert_eq!(entries.len(), 103);
    assert_eq!(ids(&entries), (1..104u64).collect::<Vec<_>>());
    assert_eq!(
        transport.pages_requested(RecordedCall::is_media_list),
        vec![1, 2, 3]
    );
}

#[tokio::test(start_paused = true)]
async fn test_exact_multiple_fetches_confirming_empty_page() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        list_page(Vec::new()),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("fetch should succeed");

    assert_eq!(entries.len(), 50);
    assert_eq!(
        transport.pages_requested(RecordedCall::is_media_list),
        vec![1, 2]
    );
    assert_eq!(transport.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_retries_same_page() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        rate_limited(2),
        list_page(list_entries(51..54)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let start = Instant::now();
    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("rate limit should be retried");
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_secs(2), "waited {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(3), "waited {:?}", elapsed);
    assert_eq!(
        transport.pages_requested(RecordedCall::is_media_list),
        vec![1, 2, 2]
    );
    assert_eq!(entries.len(), 53);
    assert_eq!(entries.iter().filter(|e| e.id == 51).count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_rate_limits_keep_retrying() {
    let transport = MockTransport::new(vec![
        rate_limited(1),
        rate_limited(1),
        list_page(list_entries(1..4)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let start = Instant::now();
    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("rate limits should be retried");

    assert!(start.elapsed() >= Duration::from_secs(2));
    assert_eq!(entries.len(), 3);
    assert_eq!(
        transport.pages_requested(RecordedCall::is_media_list),
        vec![1, 1, 1]
    );
}

#[tokio::test(start_paused = true)]
async fn test_paces_requests_between_full_pages() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        list_page(list_entries(51..101)),
        list_page(list_entries(101..104)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::from_millis(2000));

    let start = Instant::now();
    let _: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("fetch should succeed");
    let elapsed = start.elapsed();

    // Two full pages -> two pauses; no pause after the final short page
    assert!(elapsed >= Duration::from_secs(4), "waited {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "waited {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_other_errors_are_fatal() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        Err(AppError::AniListApi("HTTP 500 Internal Server Error".to_string())),
        list_page(list_entries(51..52)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let err = fetcher
        .fetch_all::<RawListEntry>(Collection::MediaList, 7, None, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AniListApi(_)));
    assert_eq!(transport.remaining(), 1, "should not continue after failure");
}

#[tokio::test(start_paused = true)]
async fn test_resume_starts_at_given_page() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(51..101)),
        list_page(list_entries(101..110)),
    ]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 2)
        .await
        .expect("fetch should succeed");

    assert_eq!(entries.len(), 59);
    assert_eq!(
        transport.pages_requested(RecordedCall::is_media_list),
        vec![2, 3]
    );
}

#[tokio::test(start_paused = true)]
async fn test_oversized_page_size_is_clamped() {
    let transport = MockTransport::new(vec![
        list_page(list_entries(1..51)),
        list_page(list_entries(51..101)),
        list_page(list_entries(101..104)),
    ]);
    let fetcher = PageFetcher::new(&transport, 100, Duration::ZERO);
    assert_eq!(fetcher.per_page(), 50);

    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("fetch should succeed");

    assert_eq!(entries.len(), 103);
    assert_eq!(transport.remaining(), 0);
    assert!(transport
        .calls()
        .iter()
        .all(|c| c.variables["perPage"] == 50));
}

#[tokio::test]
async fn test_page_request_variables_and_token() {
    let transport = MockTransport::new(vec![activity_page(common::activity_entries(1..3))]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let entries: Vec<RawActivityEntry> = fetcher
        .fetch_all(Collection::Activities, 99, Some("secret"), 1)
        .await
        .expect("fetch should succeed");

    assert_eq!(entries.len(), 2);
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_activity());
    assert_eq!(
        calls[0].variables,
        json!({ "page": 1, "perPage": 50, "userId": 99 })
    );
    assert_eq!(calls[0].token.as_deref(), Some("secret"));
}

#[tokio::test]
async fn test_null_page_is_empty() {
    let transport = MockTransport::new(vec![Ok(json!({ "Page": { "mediaList": null } }))]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let entries: Vec<RawListEntry> = fetcher
        .fetch_all(Collection::MediaList, 7, None, 1)
        .await
        .expect("fetch should succeed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_missing_page_is_a_decode_error() {
    let transport = MockTransport::new(vec![Ok(json!({ "Viewer": {} }))]);
    let fetcher = PageFetcher::new(&transport, PER_PAGE, Duration::ZERO);

    let err = fetcher
        .fetch_all::<RawListEntry>(Collection::MediaList, 7, None, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Decode(_)));
}
