use serde_json::json;

use crate::VideoSummary;
use crate::format::format_count;

/// Render a video card as plain text
pub fn render_video(summary: &VideoSummary) -> String {
    let views = format_count(summary.view_count.as_deref().unwrap_or("0"));
    let likes = format_count(summary.like_count.as_deref().unwrap_or("0"));

    format!(
        "{}\n{}\n{} | {views} views | {likes} likes\n{}",
        summary.title, summary.channel_title, summary.duration_text, summary.thumbnail_url
    )
}

/// Render title variations as a numbered list
pub fn render_variations(variations: &[String]) -> String {
    if variations.is_empty() {
        return "(no title variations returned)".to_string();
    }
    variations
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a video and any variations as a single JSON document
pub fn render_json(summary: Option<&VideoSummary>, variations: Option<&[String]>) -> String {
    let mut doc = json!({});
    if let Some(summary) = summary {
        doc["video"] = json!(summary);
    }
    if let Some(variations) = variations {
        doc["variations"] = json!(variations);
    }
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}
