use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap());

/// Format an ISO-8601 duration code (`PT1H2M3S`) as `H:MM:SS` or `M:SS`.
///
/// Codes that do not contain the `PT` grammar at all format as `0:00`.
pub fn format_duration(code: &str) -> String {
    let Some(caps) = DURATION_RE.captures(code) else {
        return "0:00".to_string();
    };

    let part = |i: usize| -> u64 { caps.get(i).and_then(|m| m.as_str().parse().ok()).unwrap_or(0) };
    let (hours, minutes, seconds) = (part(1), part(2), part(3));

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Abbreviate a raw count string: `1234567` -> `1.2M`, `4321` -> `4.3K`
///
/// The unit is picked after rounding, so `999999` is `1.0M`, not `1000.0K`.
pub fn format_count(raw: &str) -> String {
    let n: u64 = raw.trim().parse().unwrap_or(0);
    let thousands = round_tenths(n as f64 / 1_000.0);
    if thousands >= 1_000.0 {
        format!("{:.1}M", round_tenths(n as f64 / 1_000_000.0))
    } else if n >= 1_000 {
        format!("{thousands:.1}K")
    } else {
        n.to_string()
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
