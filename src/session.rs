use crate::{Error, Result, VideoSummary, extract_video_id};

/// The one piece of state a user session carries: the loaded video
#[derive(Debug, Default)]
pub struct Session {
    current: Option<VideoSummary>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&VideoSummary> {
        self.current.as_ref()
    }

    /// Replace the current video; the latest load always wins
    pub fn load(&mut self, summary: VideoSummary) -> &VideoSummary {
        self.current.insert(summary)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Title to seed generation with, if a video is loaded
    pub fn seed_title(&self) -> Result<&str> {
        self.current
            .as_ref()
            .map(|s| s.title.as_str())
            .ok_or_else(|| Error::validation("Load a video before generating titles"))
    }
}

/// Validate pasted input and pull the video id out of it
pub fn parse_input(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::validation("Please enter a YouTube URL"));
    }
    extract_video_id(input).ok_or_else(|| Error::validation("Invalid YouTube URL. Please check and try again."))
}
