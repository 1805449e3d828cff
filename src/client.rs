use log::debug;

use crate::server::{ErrorBody, GenerateTitlesRequest, GenerateTitlesResponse};
use crate::{Error, Result, VideoSummary};

const SERVICE: &str = "tubetitles";

/// Terminal-side client for a running tubetitles server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_video_info(&self, video_id: &str) -> Result<VideoSummary> {
        debug!("GET {}/api/video-info?videoId={video_id}", self.base_url);
        let resp = self
            .client
            .get(format!("{}/api/video-info", self.base_url))
            .query(&[("videoId", video_id)])
            .send()
            .await
            .map_err(|e| Error::provider(SERVICE, e))?;

        read_json(resp, "Failed to fetch video info").await
    }

    pub async fn generate_titles(&self, title: &str) -> Result<Vec<String>> {
        debug!("POST {}/api/generate-titles", self.base_url);
        let resp = self
            .client
            .post(format!("{}/api/generate-titles", self.base_url))
            .json(&GenerateTitlesRequest {
                title: Some(title.to_string()),
            })
            .send()
            .await
            .map_err(|e| Error::provider(SERVICE, e))?;

        let body: GenerateTitlesResponse = read_json(resp, "Failed to generate titles").await?;
        Ok(body.variations)
    }
}

/// Decode a success body, or turn the server's `{ error }` body into an error
async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response, fallback: &str) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return resp
            .json()
            .await
            .map_err(|e| Error::provider(SERVICE, format!("unexpected response format: {e}")));
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or_else(|_| fallback.to_string());

    if status.is_client_error() {
        Err(Error::Validation(message))
    } else {
        Err(Error::Server(message))
    }
}
