//! # Text Layout
//!
//! Greedy line breaking for the field values. Break opportunities come
//! from UAX#14, widths from the standard font metrics.

use crate::font::StandardFont;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Millimetres per PDF point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

pub struct TextLayout {
    font: StandardFont,
    font_size: f64,
}

impl TextLayout {
    pub fn new(font: StandardFont, font_size: f64) -> Self {
        Self { font, font_size }
    }

    /// Width of `text` in millimetres.
    pub fn measure_mm(&self, text: &str) -> f64 {
        self.font.measure_string(text, self.font_size) * MM_PER_PT
    }

    /// Break `text` into lines no wider than `max_width` millimetres.
    ///
    /// Newlines always end a line. A word wider than the whole line is
    /// split between characters. Trailing spaces hang past the edge.
    /// Empty text yields exactly one empty line so rows keep their height.
    pub fn split_to_size(&self, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut start = 0;

        for (end, opp) in linebreaks(text) {
            let raw = &text[start..end];
            let segment = raw.trim_end_matches(is_newline);
            let hard_break = segment.len() < raw.len();
            start = end;

            self.place_segment(segment, max_width, &mut current, &mut lines);

            // The final opportunity is always a mandatory break at the end of
            // the text; it only flushes when a newline character caused it.
            if opp == BreakOpportunity::Mandatory && (end < text.len() || hard_break) {
                lines.push(current.trim_end().to_string());
                current.clear();
            }
        }

        // A trailing newline opens one more, empty, line.
        if !current.is_empty() || lines.is_empty() || text.ends_with(is_newline) {
            lines.push(current.trim_end().to_string());
        }
        lines
    }

    fn place_segment(
        &self,
        segment: &str,
        max_width: f64,
        current: &mut String,
        lines: &mut Vec<String>,
    ) {
        let visible = segment.trim_end();
        let candidate = format!("{}{}", current, visible);
        if self.measure_mm(&candidate) <= max_width {
            current.push_str(segment);
            return;
        }

        if !current.is_empty() {
            lines.push(current.trim_end().to_string());
            current.clear();
            if self.measure_mm(visible) <= max_width {
                current.push_str(segment);
                return;
            }
        }

        // Overlong word: fill lines character by character.
        for ch in segment.chars() {
            if !current.is_empty()
                && !ch.is_whitespace()
                && self.measure_mm(&format!("{}{}", current, ch)) > max_width
            {
                lines.push(current.trim_end().to_string());
                current.clear();
            }
            current.push(ch);
        }
    }
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TextLayout {
        TextLayout::new(StandardFont::Helvetica, 10.0)
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(layout().split_to_size("", 50.0), vec![String::new()]);
    }

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(layout().split_to_size("Paris", 50.0), vec!["Paris".to_string()]);
    }

    #[test]
    fn test_wraps_at_spaces() {
        let text = "one two three four five six seven eight nine ten";
        let lines = layout().split_to_size(text, 30.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(layout().measure_mm(line) <= 30.0, "line too wide: {:?}", line);
            assert!(!line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_newline_forces_break() {
        let lines = layout().split_to_size("first\nsecond", 100.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        assert_eq!(
            layout().split_to_size("abc\n", 100.0),
            vec!["abc".to_string(), String::new()]
        );
        assert_eq!(
            layout().split_to_size("\n", 100.0),
            vec![String::new(), String::new()]
        );
    }

    #[test]
    fn test_blank_line_between_paragraphs() {
        assert_eq!(
            layout().split_to_size("a\n\nb", 100.0),
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "a".repeat(200);
        let lines = layout().split_to_size(&word, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(layout().measure_mm(line) <= 20.0);
        }
    }

    #[test]
    fn test_measure_mm_converts_points() {
        // "a" at 10pt Helvetica is 5.56pt wide
        let w = layout().measure_mm("a");
        assert!((w - 5.56 * MM_PER_PT).abs() < 1e-9);
    }
}
