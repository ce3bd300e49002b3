//! Byte-accurate truncation of document bodies

use crate::constants::ELLIPSIS_MARKER;

/// Largest char boundary in `text` that is `<= index`
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut boundary = index;
    while !text.is_char_boundary(boundary) {
        boundary -= 1;
    }
    boundary
}

/// Cut `text` so its UTF-8 length is at most `max_bytes`.
///
/// Text that already fits is returned unchanged. Otherwise the cut happens at
/// the last whitespace before the limit, trailing whitespace is dropped and
/// the ellipsis marker is appended.
pub fn truncate_to_bytes(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    let budget = max_bytes.saturating_sub(ELLIPSIS_MARKER.len());
    let prefix = &text[..floor_char_boundary(text, budget)];

    let cut = match prefix.rfind(char::is_whitespace) {
        Some(position) => prefix[..position].trim_end(),
        None => prefix,
    };

    let mut truncated = String::with_capacity(cut.len() + ELLIPSIS_MARKER.len());
    truncated.push_str(cut);
    truncated.push_str(ELLIPSIS_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_to_bytes("hello world", 100), "hello world");
        assert_eq!(truncate_to_bytes("exact", 5), "exact");
    }

    #[test]
    fn test_two_megabytes_of_multibyte_text() {
        // Mix of 1, 2, 3 and 4 byte characters
        let unit = "größe 数据 🚀 plain ";
        let mut text = String::new();
        while text.len() < 2_000_000 {
            text.push_str(unit);
        }

        let truncated = truncate_to_bytes(&text, 800_000);

        assert!(truncated.len() <= 800_000);
        assert!(truncated.ends_with(ELLIPSIS_MARKER));
        let body = truncated.trim_end_matches(ELLIPSIS_MARKER);
        assert!(text.starts_with(body));
        // The cut lands right before whitespace in the source text
        let next = text[body.len()..].chars().next().unwrap();
        assert!(next.is_whitespace());
        assert!(!body.ends_with(char::is_whitespace));
    }

    #[test]
    fn test_cuts_at_word_boundary() {
        let truncated = truncate_to_bytes("alpha beta gamma delta", 15);
        assert_eq!(truncated, "alpha beta...");
        assert!(truncated.len() <= 15);
    }

    #[test]
    fn test_no_whitespace_cuts_at_char_boundary() {
        let text = "ééééééééé";
        let truncated = truncate_to_bytes(text, 8);
        assert_eq!(truncated, "éé...");
        assert!(truncated.len() <= 8);
    }
}
