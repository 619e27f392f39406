mod groq;
mod prompt;
mod retry;
mod youtube;

use groq::GroqGenerator;
use retry::retry_with_backoff;
use youtube::YouTubeSearch;

use crate::config::{Config, RetryConfig};
use crate::error::{NaviError, ProviderError};
use crate::planner::{PlanRequest, Video};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Longest slice of an error body kept in `ProviderError::HttpStatus`
const ERROR_BODY_LIMIT: usize = 512;

/// Produces raw roadmap text for a request
#[async_trait]
pub trait Generator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &PlanRequest) -> Result<String, ProviderError>;
}

/// Looks up learning videos for a query
#[async_trait]
pub trait VideoSearch: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Video>, ProviderError>;
}

/// Retries transient generation failures with backoff
pub struct RetryingGenerator {
    inner: Arc<dyn Generator>,
    retry: RetryConfig,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn Generator>, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }
}

#[async_trait]
impl Generator for RetryingGenerator {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn generate(&self, request: &PlanRequest) -> Result<String, ProviderError> {
        retry_with_backoff(&self.retry, ProviderError::is_retriable, || {
            self.inner.generate(request)
        })
        .await
    }
}

/// Stand-in used when no search credential is configured
#[derive(Default)]
pub struct DisabledSearch {
    warned: AtomicBool,
}

#[async_trait]
impl VideoSearch for DisabledSearch {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<Video>, ProviderError> {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("Video search is not configured, tasks will get empty video lists");
        }
        Ok(Vec::new())
    }
}

/// Create the roadmap generator, failing when no API key is available
pub fn create_generator(config: &Config) -> Result<Arc<dyn Generator>, NaviError> {
    let api_key = config.generation.api_key()?;
    let groq = GroqGenerator::new(&config.generation, api_key)?;
    Ok(Arc::new(RetryingGenerator::new(
        Arc::new(groq),
        config.retry.clone(),
    )))
}

/// Create the video search client, or a disabled stand-in without a key
pub fn create_search(config: &Config) -> Result<Arc<dyn VideoSearch>, NaviError> {
    match config.search.api_key() {
        Some(api_key) => Ok(Arc::new(YouTubeSearch::new(&config.search, api_key)?)),
        None => Ok(Arc::new(DisabledSearch::default())),
    }
}

pub(crate) fn http_client(
    service: &'static str,
    timeout: Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Request {
            service,
            reason: e.to_string(),
        })
}

/// Read the body of a response, mapping non-2xx statuses to `HttpStatus`
pub(crate) async fn check_http_response(
    service: &'static str,
    timeout: Duration,
    response: reqwest::Response,
) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(service, timeout, e))?;

    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            service,
            status: status.as_u16(),
            body: truncate(&body, ERROR_BODY_LIMIT),
        });
    }

    Ok(body)
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
