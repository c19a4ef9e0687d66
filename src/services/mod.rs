// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - fetching, transformation and persistence.

pub mod anilist;
pub mod archive;
pub mod export;
pub mod mapping;
pub mod pagination;
pub mod queries;
pub mod transform;

pub use anilist::{AniListClient, GraphQlTransport};
pub use export::{ExportOptions, ExportSummary, Exporter};
pub use pagination::{Collection, PageFetcher};
