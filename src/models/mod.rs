// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models: raw AniList records and the archive schema they map to.

pub mod anilist;
pub mod archive;

pub use anilist::{FuzzyDate, MediaRef, RawActivityEntry, RawListEntry};
pub use archive::{
    AdvancedScoreCatalog, ArchiveActivityEntry, ArchiveListEntry, ArchiveUser,
    CustomListCatalog, ExportOutput, PriorArchive,
};
