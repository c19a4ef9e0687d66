//! Runtime configuration loaded from environment variables.
//!
//! Everything here has a sensible default; the CLI flags layer on top.

use std::env;
use std::time::Duration;

/// Default AniList GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://graphql.anilist.co";

/// AniList allows roughly 30 requests per minute.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 60_000 / 30;

/// Entries requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page AniList serves. A larger request still gets 50 entries back,
/// which would read as a short final page.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint URL
    pub api_url: String,
    /// Bearer token used when `--token` is not given
    pub token: Option<String>,
    /// Pause between successive page requests
    pub request_delay: Duration,
    /// Entries requested per page
    pub page_size: u32,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_url: env::var("ANILIST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token: env::var("ANILIST_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            request_delay: Duration::from_millis(parse_var(
                "EXPORT_REQUEST_DELAY_MS",
                DEFAULT_REQUEST_DELAY_MS,
            )?),
            page_size: parse_page_size()?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Config for tests: no pacing delay, default page size, no endpoint.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://127.0.0.1:0".to_string(),
            token: None,
            request_delay: Duration::ZERO,
            page_size: DEFAULT_PAGE_SIZE,
            log_json: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_page_size() -> Result<u32, ConfigError> {
    let page_size = parse_var("EXPORT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ConfigError::Invalid(
            "EXPORT_PAGE_SIZE",
            format!("{} (must be 1..={})", page_size, MAX_PAGE_SIZE),
        ));
    }
    Ok(page_size)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
