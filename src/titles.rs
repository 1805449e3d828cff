use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::Result;
use crate::llm::Completer;

/// Upper bound on the number of variations handed back to callers
pub const MAX_VARIATIONS: usize = 5;

// stacked markers ("1. 2. Foo") go in one pass
static ENUMERATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:\d+\.\s*)+").unwrap());

/// Build the fixed generation prompt around a seed title
pub fn build_prompt(seed_title: &str) -> String {
    format!(
        "Given this YouTube video title: \"{seed_title}\"

Generate 5 alternative title variations that are engaging, clickable, and would perform well on YouTube. Each title should:
- Be attention-grabbing but not clickbait
- Maintain the core topic/message
- Be under 100 characters
- Use different approaches (question, statement, how-to, etc.)

Return ONLY the 5 titles, one per line, numbered 1-5. No explanations or additional text."
    )
}

/// Turn free-form model output into at most five clean titles.
///
/// Each line loses every leading `N.` marker and surrounding whitespace; blank
/// lines are dropped. No line of the output starts with a marker, so applying
/// this to its own output is a no-op.
pub fn normalize_variations(text: &str) -> Vec<String> {
    // indented numbering counts as leading
    text.split('\n')
        .map(|line| ENUMERATION_RE.replace(line.trim_start(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_VARIATIONS)
        .collect()
}

/// Ask the completion backend for alternative titles
pub async fn generate_variations(
    completer: &dyn Completer,
    seed_title: &str,
    max_tokens: u32,
) -> Result<Vec<String>> {
    let prompt = build_prompt(seed_title);
    let text = completer.complete_text(&prompt, max_tokens).await?;
    debug!("Raw completion: {text:?}");

    let variations = normalize_variations(&text);
    info!(
        "Generated {} title variations via {}",
        variations.len(),
        completer.provider()
    );
    Ok(variations)
}
