// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AniList GraphQL client.
//!
//! Handles:
//! - Posting GraphQL documents with optional bearer auth
//! - Rate limit detection (429 + `Retry-After`) as a structured error
//! - Surfacing GraphQL `errors` arrays as fatal errors
//! - Resolving a username to a user id

use crate::error::{AppError, Result};
use crate::services::queries::USER_QUERY;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

/// Request transport for GraphQL documents.
///
/// Implementations return the response's `data` object. A rate-limit response
/// must be reported as [`AppError::RateLimited`]; anything else that fails is
/// treated as fatal by callers.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn request(&self, document: &str, variables: Value, token: Option<&str>)
        -> Result<Value>;
}

/// AniList API client.
#[derive(Clone)]
pub struct AniListClient {
    http: reqwest::Client,
    base_url: String,
}

impl AniListClient {
    /// Create a client for the given GraphQL endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Check response status and extract the GraphQL `data` object.
    async fn check_response_json(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        // Rate limit - caller backs off and retries
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = parse_retry_after(
                response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );
            tracing::warn!(retry_after_secs, "AniList rate limit hit (429)");
            return Err(AppError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = graphql_error_messages(&body).unwrap_or(body);
            return Err(AppError::AniListApi(format!("HTTP {}: {}", status, detail)));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| AppError::AniListApi(format!("JSON parse error: {}", e)))?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            return Err(AppError::GraphQl(join_messages(&errors)));
        }

        body.data
            .ok_or_else(|| AppError::GraphQl("response contained no data".to_string()))
    }
}

#[async_trait]
impl GraphQlTransport for AniListClient {
    async fn request(
        &self,
        document: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value> {
        let mut request = self
            .http
            .post(&self.base_url)
            .header(ACCEPT, "application/json")
            .json(&json!({ "query": document, "variables": variables }));

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::AniListApi(e.to_string()))?;

        self.check_response_json(response).await
    }
}

/// Seconds to wait from a `Retry-After` header value.
///
/// Missing or unparsable values fall back to one second.
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(AppError::DEFAULT_RETRY_AFTER_SECS)
}

/// Look up the numeric user id for a username.
pub async fn fetch_user_id<T>(transport: &T, username: &str, token: Option<&str>) -> Result<u64>
where
    T: GraphQlTransport + ?Sized,
{
    let data = transport
        .request(USER_QUERY, json!({ "name": username }), token)
        .await?;

    let user_id = data
        .pointer("/User/id")
        .and_then(Value::as_u64)
        .ok_or_else(|| AppError::Decode(format!("no user id returned for {}", username)))?;

    tracing::info!(username, user_id, "Resolved AniList user");
    Ok(user_id)
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pull GraphQL error messages out of an error response body, if it has any.
fn graphql_error_messages(body: &str) -> Option<String> {
    let parsed: GraphQlResponse = serde_json::from_str(body).ok()?;
    parsed
        .errors
        .filter(|errors| !errors.is_empty())
        .map(|errors| join_messages(&errors))
}
