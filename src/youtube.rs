use log::{debug, warn};
use serde::Deserialize;

use crate::format::format_duration;
use crate::{Error, Result, VideoSummary};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const SERVICE: &str = "YouTube";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Snippet,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

/// Client for the YouTube Data API `videos` endpoint
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Look up a single video and map it into a display-ready summary
    pub async fn fetch_video_summary(&self, video_id: &str, api_key: &str) -> Result<VideoSummary> {
        let url = format!("{}/videos", self.base_url);
        debug!("Fetching video info for {video_id}");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails,statistics"),
                ("id", video_id),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| Error::provider(SERVICE, e))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            return Err(Error::provider(SERVICE, reason));
        }

        let body: VideoListResponse = resp
            .json()
            .await
            .map_err(|e| Error::provider(SERVICE, format!("unexpected response format: {e}")))?;

        summarize_response(video_id, body)
    }
}

fn summarize_response(video_id: &str, body: VideoListResponse) -> Result<VideoSummary> {
    let Some(video) = body.items.into_iter().next() else {
        return Err(Error::NotFound(video_id.to_string()));
    };

    let thumbnails = video.snippet.thumbnails;
    let thumbnail_url = thumbnails
        .high
        .or(thumbnails.default)
        .map(|t| t.url)
        .unwrap_or_else(|| {
            warn!("No thumbnail available for {video_id}");
            String::new()
        });

    let duration_text = video
        .content_details
        .map(|cd| format_duration(&cd.duration))
        .unwrap_or_else(|| format_duration(""));

    let stats = video.statistics.unwrap_or_default();

    Ok(VideoSummary {
        title: video.snippet.title,
        thumbnail_url,
        duration_text,
        channel_title: video.snippet.channel_title,
        view_count: Some(stats.view_count.unwrap_or_else(|| "0".to_string())),
        like_count: Some(stats.like_count.unwrap_or_else(|| "0".to_string())),
    })
}
