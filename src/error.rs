use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NaviError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("{service} is not configured: environment variable {var} is not set")]
    MissingCredential { service: &'static str, var: String },
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{service} request timed out after {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },

    #[error("Could not connect to {service}: {reason}")]
    Connection {
        service: &'static str,
        reason: String,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    HttpStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} request failed: {reason}")]
    Request {
        service: &'static str,
        reason: String,
    },

    #[error("Unexpected {service} response: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

impl ProviderError {
    pub fn from_reqwest(service: &'static str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { service, timeout }
        } else if err.is_connect() {
            ProviderError::Connection {
                service,
                reason: err.to_string(),
            }
        } else if err.is_decode() {
            ProviderError::InvalidResponse {
                service,
                reason: err.to_string(),
            }
        } else {
            ProviderError::Request {
                service,
                reason: err.to_string(),
            }
        }
    }

    /// Transport-level failures a caller may retry later
    pub fn is_retriable(&self) -> bool {
        match self {
            ProviderError::Timeout { .. }
            | ProviderError::Connection { .. }
            | ProviderError::Request { .. } => true,
            ProviderError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            ProviderError::InvalidResponse { .. } => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Roadmap must be a list or an object, got {0}")]
    InvalidRoadmap(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("No pending task")]
    NoPendingTask,

    #[error("No task at month {month}, week {week}, position {task}")]
    TaskNotFound { month: u32, week: u32, task: u32 },

    #[error("Task '{0}' is already done")]
    AlreadyDone(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Plan '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Failed to read plan snapshot '{path}': {source}")]
    ReadSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse plan snapshot '{path}': {source}")]
    ParseSnapshot {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write plan snapshot '{path}': {source}")]
    WriteSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),
}
