// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AniList export: archive a user's media list and list activity
//!
//! This crate pages through a user's AniList media list and list activity,
//! maps every record into a GDPR-style archive schema, merges the result with
//! any previous archive and writes it as JSON.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
