//! Width-aware text fitting shared by both widgets.

use ratatui::layout::Alignment;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '\u{2026}';

/// Display width of a string in terminal cells.
pub(crate) fn display_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Cut a string down to at most `max` cells.
///
/// With `ellipsis`, an overflowing string ends in `…` instead of being
/// clipped hard.
pub(crate) fn truncate(s: &str, max: u16, ellipsis: bool) -> String {
    let max = max as usize;
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = if ellipsis { max - 1 } else { max };
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if ellipsis {
        out.push(ELLIPSIS);
    }
    out
}

/// Truncate and pad a string to exactly `width` cells.
pub(crate) fn fit(s: &str, width: u16, align: Alignment, ellipsis: bool) -> String {
    let text = truncate(s, width, ellipsis);
    let gap = (width as usize).saturating_sub(text.width());
    let (left, right) = match align {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10, true), "hello");
        assert_eq!(truncate("hello world", 8, false), "hello wo");
        assert_eq!(truncate("hello world", 8, true), "hello w\u{2026}");
        assert_eq!(truncate("hi", 0, true), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char takes two cells
        assert_eq!(truncate("\u{65e5}\u{672c}\u{8a9e}", 5, false), "\u{65e5}\u{672c}");
        assert_eq!(display_width("\u{65e5}\u{672c}"), 4);
    }

    #[test]
    fn test_fit_alignment() {
        assert_eq!(fit("ab", 6, Alignment::Left, false), "ab    ");
        assert_eq!(fit("ab", 6, Alignment::Right, false), "    ab");
        assert_eq!(fit("ab", 5, Alignment::Center, false), " ab  ");
        assert_eq!(fit("abcdef", 4, Alignment::Right, true), "abc\u{2026}");
    }
}
