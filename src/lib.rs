pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod llm;
pub mod output;
pub mod server;
pub mod session;
pub mod titles;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Display-ready metadata for a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub title: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "duration")]
    pub duration_text: String,
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<String>,
}

/// Ordered URL shapes; the first one that matches wins.
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // youtube.com/watch?v=ID
        r"youtube\.com/watch\?(?:[^#\n]*&)?v=([^&\n?#]+)",
        // youtu.be/ID
        r"youtu\.be/([^&\n?#]+)",
        // youtube.com/embed/ID
        r"youtube\.com/embed/([^&\n?#]+)",
        // youtube.com/shorts/ID
        r"youtube\.com/shorts/([^&\n?#]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract video ID from the supported YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| caps[1].to_string())
}
