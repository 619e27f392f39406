use super::{check_http_response, http_client, VideoSearch};
use crate::config::SearchConfig;
use crate::error::ProviderError;
use crate::planner::Video;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "search";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// YouTube Data API v3: a search call followed by a details lookup
pub struct YouTubeSearch {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    content_details: ContentDetails,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default)]
    view_count: Option<String>,
}

impl YouTubeSearch {
    pub fn new(config: &SearchConfig, api_key: String) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.timeout_sec);
        Ok(Self {
            client: http_client(SERVICE, timeout)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(SERVICE, self.timeout, e))?;

        check_http_response(SERVICE, self.timeout, response).await
    }
}

/// Video ids from a search response, skipping channel and playlist hits
pub fn parse_search_ids(body: &str) -> Result<Vec<String>, ProviderError> {
    let response: SearchResponse = serde_json::from_str(body).map_err(invalid)?;
    Ok(response
        .items
        .into_iter()
        .filter_map(|item| item.id.video_id)
        .collect())
}

pub fn parse_video_details(body: &str) -> Result<Vec<Video>, ProviderError> {
    let response: VideosResponse = serde_json::from_str(body).map_err(invalid)?;
    Ok(response
        .items
        .into_iter()
        .map(|item| Video {
            title: item.snippet.title,
            url: format!("{}{}", WATCH_URL, item.id),
            duration: item.content_details.duration,
            views: item
                .statistics
                .view_count
                .unwrap_or_else(|| "0".to_string()),
            channel: item.snippet.channel_title,
        })
        .collect())
}

fn invalid(e: serde_json::Error) -> ProviderError {
    ProviderError::InvalidResponse {
        service: SERVICE,
        reason: e.to_string(),
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Video>, ProviderError> {
        let max = max_results.to_string();
        let body = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", max.as_str()),
                    ("q", query),
                ],
            )
            .await?;

        let ids = parse_search_ids(&body)?;
        debug!("Search '{}' matched {} videos", query, ids.len());
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let body = self
            .get(
                "videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", joined.as_str()),
                ],
            )
            .await?;

        parse_video_details(&body)
    }
}
