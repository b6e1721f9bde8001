const FENCE: &str = "```";

/// Strips a markdown code fence wrapped around a payload.
///
/// The opening fence may carry a language tag (```` ```json ````). Text without
/// fences is returned trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            // Single-line payload like ```{"a":1}```: only a tag-free body survives.
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}
