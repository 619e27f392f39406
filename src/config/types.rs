use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Where plans are snapshotted between runs
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Maximum video searches in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default)]
    pub enrich_policy: EnrichPolicy,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// What to do with tasks that already carry videos when enriching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrichPolicy {
    /// Leave tasks with a non-empty video list alone
    #[default]
    SkipIfPresent,
    /// Search again for every task
    AlwaysRefetch,
}

impl std::fmt::Display for EnrichPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichPolicy::SkipIfPresent => write!(f, "skip_if_present"),
            EnrichPolicy::AlwaysRefetch => write!(f, "always_refetch"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct LayoutConfig {
    #[serde(default = "default_weeks_per_month")]
    pub weeks_per_month: usize,

    #[serde(default = "default_months_per_year")]
    pub months_per_year: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: default_weeks_per_month(),
            months_per_year: default_months_per_year(),
        }
    }
}

/// OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_generation_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_generation_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            api_key_env: default_generation_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_sec: default_generation_timeout_sec(),
        }
    }
}

/// YouTube Data API v3
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SearchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    #[serde(default = "default_search_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_search_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_search_base_url(),
            api_key_env: default_search_key_env(),
            max_results: default_max_results(),
            timeout_sec: default_search_timeout_sec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}
