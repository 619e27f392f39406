use super::prompt::{build_user_prompt, SYSTEM_PROMPT};
use super::{check_http_response, http_client, Generator};
use crate::config::GenerationConfig;
use crate::error::ProviderError;
use crate::planner::PlanRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

const SERVICE: &str = "generation";

/// Chat-completions client for Groq and other OpenAI-compatible endpoints
pub struct GroqGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    config: GenerationConfig,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqGenerator {
    pub fn new(config: &GenerationConfig, api_key: String) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.timeout_sec);
        Ok(Self {
            client: http_client(SERVICE, timeout)?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            config: config.clone(),
            timeout,
        })
    }
}

pub fn build_request(config: &GenerationConfig, request: &PlanRequest) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: build_user_prompt(request),
            },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}

/// Pull the first choice's message content out of a completion body
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse {
            service: SERVICE,
            reason: e.to_string(),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::InvalidResponse {
            service: SERVICE,
            reason: "response has no message content".to_string(),
        })
}

#[async_trait]
impl Generator for GroqGenerator {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn generate(&self, request: &PlanRequest) -> Result<String, ProviderError> {
        let body = build_request(&self.config, request);
        let start = Instant::now();

        debug!("Requesting roadmap from {} ({})", self.endpoint, body.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(SERVICE, self.timeout, e))?;

        let text = check_http_response(SERVICE, self.timeout, response).await?;
        debug!(
            "Generation finished in {:?} ({} bytes)",
            start.elapsed(),
            text.len()
        );

        parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_uses_config() {
        let config = GenerationConfig::default();
        let request = PlanRequest::new("Data analyst", "Career change", "3 months");

        let chat = build_request(&config, &request);
        assert_eq!(chat.model, "llama-3.1-8b-instant");
        assert_eq!(chat.max_tokens, 4000);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert!(chat.messages[1].content.contains("Data analyst"));

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_parse_response_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"roadmap\":[]}"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), r#"{"roadmap":[]}"#);
    }

    #[test]
    fn test_parse_response_without_choices() {
        let err = parse_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse { .. }));
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_parse_response_rejects_non_json() {
        assert!(parse_response("<html>").is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = GenerationConfig::default();
        config.base_url = "http://localhost:9000/v1/".to_string();
        let generator = GroqGenerator::new(&config, "key".to_string()).unwrap();
        assert_eq!(generator.endpoint, "http://localhost:9000/v1/chat/completions");
    }
}
