//! Width-aware text helpers.
//!
//! Country names, flags and translated labels mix narrow, wide (CJK) and
//! emoji characters, so all layout math goes through display width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to `max_width` columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Right-pads `text` with spaces to exactly `width` columns, truncating first.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_with_ellipsis(text, width);
    let current = out.width();
    if current < width {
        out.push_str(&" ".repeat(width - current));
    }
    out
}

/// Display width in terminal columns, saturated to `u16`.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("Peru", 10), "Peru");
        assert_eq!(truncate_with_ellipsis("Peru", 4), "Peru");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("United Kingdom", 8), "United …");
        assert_eq!(truncate_with_ellipsis("Oman", 1), "…");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns.
        assert_eq!(truncate_with_ellipsis("中文字幕", 5), "中文…");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("中", 3), "中 ");
        assert_eq!(pad_to_width("abcdef", 4), "abc…");
    }
}
