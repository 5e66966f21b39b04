//! Course data fetcher for the MOOC platform.
//!
//! The platform authenticates with the browser session cookie and a CSRF key
//! passed as a query parameter. Responses carry an application-level `code`
//! that must be 0.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::config::MoocConfig;
use crate::domain::MoocResponse;
use crate::error::{FetchError, NotifyError, Result};

/// Characters of the raw body to include in debug logs
const BODY_PREVIEW_CHARS: usize = 500;

/// Fetches course term data by term id
#[async_trait]
pub trait CourseFetcher: Send + Sync {
    async fn fetch_course(&self, term_id: &str) -> std::result::Result<MoocResponse, FetchError>;
}

/// Configuration for the MOOC client
#[derive(Debug, Clone)]
pub struct MoocClientConfig {
    pub api_base_url: String,
    pub cookie: String,
    pub csrf_key: String,
    pub timeout: Duration,
}

impl From<&MoocConfig> for MoocClientConfig {
    fn from(config: &MoocConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            cookie: config.cookie.clone(),
            csrf_key: config.csrf_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// HTTP client for the MOOC term API
pub struct MoocClient {
    client: Client,
    config: MoocClientConfig,
}

impl MoocClient {
    pub fn new(config: MoocClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn term_request(&self, term_id: &str) -> RequestBuilder {
        self.client
            .post(&self.config.api_base_url)
            .query(&[("csrfKey", &self.config.csrf_key)])
            .header("Cookie", &self.config.cookie)
            .form(&[("termId", term_id)])
    }
}

/// Parse a raw response body, rejecting empty bodies and non-zero codes
pub fn parse_body(body: &str) -> std::result::Result<MoocResponse, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let response: MoocResponse = serde_json::from_str(body)?;
    if response.code != 0 {
        return Err(FetchError::Api { code: response.code });
    }
    Ok(response)
}

#[async_trait]
impl CourseFetcher for MoocClient {
    async fn fetch_course(&self, term_id: &str) -> std::result::Result<MoocResponse, FetchError> {
        log::debug!("Requesting MOOC API: term_id={}", term_id);

        let response = self.term_request(term_id).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        log::debug!(
            "MOOC API response for term {}: {}",
            term_id,
            body.chars().take(BODY_PREVIEW_CHARS).collect::<String>()
        );

        let parsed = parse_body(&body)?;
        log::info!(
            "Fetched course info: term_id={}, course={}",
            term_id,
            parsed.term().and_then(|t| t.course_name.as_deref()).unwrap_or("<unknown>")
        );
        Ok(parsed)
    }
}

impl std::fmt::Debug for MoocClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoocClient")
            .field("api_base_url", &self.config.api_base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

/// Fetch every term, skipping (and logging) the ones that fail
pub async fn fetch_all<F: CourseFetcher + ?Sized>(fetcher: &F, term_ids: &[String]) -> Vec<(String, MoocResponse)> {
    let mut fetched = Vec::with_capacity(term_ids.len());
    for term_id in term_ids {
        match fetcher.fetch_course(term_id).await {
            Ok(response) => fetched.push((term_id.clone(), response)),
            Err(e) => log::error!("Failed to fetch course info: term_id={}: {}", term_id, e),
        }
    }
    fetched
}
