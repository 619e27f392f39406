mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            store_path: default_store_path(),
            concurrency: default_concurrency(),
            enrich_policy: EnrichPolicy::default(),
            layout: LayoutConfig::default(),
            generation: GenerationConfig::default(),
            search: SearchConfig::default(),
            retry: RetryConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write this config as YAML
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, yaml).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.layout.weeks_per_month == 0 {
            return Err(ConfigError::Invalid(
                "layout.weeks_per_month must be at least 1".to_string(),
            ));
        }
        if self.layout.months_per_year == 0 {
            return Err(ConfigError::Invalid(
                "layout.months_per_year must be at least 1".to_string(),
            ));
        }
        if !(1..=50).contains(&self.search.max_results) {
            return Err(ConfigError::Invalid(format!(
                "search.max_results must be between 1 and 50, got {}",
                self.search.max_results
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl GenerationConfig {
    /// Resolve the API key from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        read_env(&self.api_key_env).ok_or_else(|| ConfigError::MissingCredential {
            service: "generation",
            var: self.api_key_env.clone(),
        })
    }
}

impl SearchConfig {
    /// `None` when search is disabled or no key is set
    pub fn api_key(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        read_env(&self.api_key_env)
    }
}

fn read_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
