// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export run orchestration.
//!
//! Handles the core workflow:
//! 1. Load the prior archive (resume mode only) and derive start pages
//! 2. Resolve the username to a user id
//! 3. Fetch media list entries, then list activities
//! 4. Transform both collections into the archive schema
//! 5. Merge with the prior archive and write the result

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AdvancedScoreCatalog, ArchiveUser, PriorArchive, RawActivityEntry, RawListEntry,
};
use crate::services::anilist::{fetch_user_id, GraphQlTransport};
use crate::services::archive::{
    assemble_archive, load_prior_for_resume, resume_start_page, write_archive,
};
use crate::services::pagination::{Collection, PageFetcher};
use crate::services::transform::{
    transform_activity_entries, transform_list_entries, ListTransform,
};
use std::path::PathBuf;
use std::time::Duration;

/// Options for a single export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub username: String,
    pub token: Option<String>,
    /// Resume from (and merge into) the archive at `output`
    pub update_data: bool,
    pub output: PathBuf,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub fetched_lists: usize,
    pub fetched_activity: usize,
    pub lists: usize,
    pub activity: usize,
    pub output: PathBuf,
}

/// Runs an export against a GraphQL transport.
pub struct Exporter<T> {
    transport: T,
    page_size: u32,
    request_delay: Duration,
}

impl<T: GraphQlTransport> Exporter<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            page_size: config.page_size,
            request_delay: config.request_delay,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch, transform, merge and write. Nothing is written unless every
    /// step succeeds.
    pub async fn run(&self, options: &ExportOptions) -> Result<ExportSummary> {
        let prior = if options.update_data {
            load_prior_for_resume(&options.output).await
        } else {
            None
        };

        let fetcher = PageFetcher::new(&self.transport, self.page_size, self.request_delay);
        let (list_start, activity_start) = prior
            .as_ref()
            .map(|p| {
                (
                    resume_start_page(p.lists.len(), fetcher.per_page()),
                    resume_start_page(p.activity.len(), fetcher.per_page()),
                )
            })
            .unwrap_or((1, 1));
        if prior.is_some() {
            tracing::info!(list_start, activity_start, "Resuming from prior archive");
        }

        let token = options.token.as_deref();
        let user_id = fetch_user_id(&self.transport, &options.username, token).await?;

        let raw_lists: Vec<RawListEntry> = fetcher
            .fetch_all(Collection::MediaList, user_id, token, list_start)
            .await?;
        let raw_activity: Vec<RawActivityEntry> = fetcher
            .fetch_all(Collection::Activities, user_id, token, activity_start)
            .await?;

        tracing::info!(
            lists = raw_lists.len(),
            activity = raw_activity.len(),
            "Fetched media list entries and activity entries"
        );

        let seed_score_names = prior
            .as_ref()
            .map(PriorArchive::advanced_score_names)
            .unwrap_or_default();
        let ListTransform {
            lists,
            custom_lists,
            score_names,
        } = transform_list_entries(&raw_lists, seed_score_names);
        let activity = transform_activity_entries(&raw_activity)?;

        let fresh_user = ArchiveUser {
            display_name: options.username.clone(),
            about: None,
            avatar_url: None,
            banner_url: None,
            custom_lists,
            advanced_scores: AdvancedScoreCatalog {
                active: !score_names.is_empty(),
                names: score_names,
            },
        };

        let output = assemble_archive(fresh_user, lists, activity, prior);
        write_archive(&options.output, &output).await?;

        Ok(ExportSummary {
            fetched_lists: raw_lists.len(),
            fetched_activity: raw_activity.len(),
            lists: output.lists.len(),
            activity: output.activity.len(),
            output: options.output.clone(),
        })
    }
}
