//! Supabase REST client
//!
//! Thin wrapper over `reqwest` that knows the PostgREST base path, the auth
//! headers, and how a PostgREST error body looks. Query building lives in
//! [`super::SupabaseRepo`].

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::db::RepoError;

/// Default table holding medication rows
pub const DEFAULT_TABLE: &str = "medications";

/// Connection settings for a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    /// API key sent as both `apikey` and bearer token
    pub key: String,
    pub table: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

/// Invalid client configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid Supabase URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// HTTP client for one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    rest_url: String,
    key: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self, ConfigError> {
        let base = config.url.trim_end_matches('/');
        reqwest::Url::parse(base).map_err(|e| ConfigError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: Client::builder().build()?,
            rest_url: format!("{}/rest/v1", base),
            key: config.key.clone(),
        })
    }

    /// Start a request against `table` with auth headers attached.
    pub fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Send a request, turning non-2xx responses into [`RepoError::Remote`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, RepoError> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(remote_error(response).await)
        }
    }
}

async fn remote_error(response: Response) -> RepoError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<PostgrestError>(&text) {
        Ok(err) => {
            tracing::debug!(
                status = status.as_u16(),
                code = err.code.as_deref().unwrap_or(""),
                details = err.details.as_deref().unwrap_or(""),
                "PostgREST error"
            );
            err.message
        }
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text,
    };

    RepoError::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Total row count from a `Content-Range` header (`0-9/42`, `*/0`).
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_range_total() {
        assert_eq!(parse_content_range("0-9/42"), Some(42));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-9/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }

    #[test]
    fn rejects_invalid_url() {
        let config = SupabaseConfig::new("not a url", "key");
        assert!(matches!(
            SupabaseClient::new(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn trims_trailing_slash() {
        let config = SupabaseConfig::new("https://example.supabase.co/", "key");
        let client = SupabaseClient::new(&config).unwrap();
        assert_eq!(client.rest_url, "https://example.supabase.co/rest/v1");
    }
}
