// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Transport failures are classified once, at the HTTP boundary: a 429 becomes
//! [`AppError::RateLimited`], everything else is one of the fatal variants.
//! The pagination engine only ever switches on that distinction.

/// Application error type for the export run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("AniList rate limit hit, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("AniList API error: {0}")]
    AniListApi(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Fallback wait when a 429 carries no usable `Retry-After` header.
    pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

    /// Check if this error is a retryable rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::RateLimited { .. })
    }

    /// Seconds to wait before retrying, if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            AppError::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
