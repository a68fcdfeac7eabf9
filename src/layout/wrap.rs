//! Greedy word wrapping against a width-measurement capability.

use serde::{Deserialize, Serialize};

use crate::model::FontSpec;

/// Anything that can report the rendered width of a string.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font`.
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure_width(text, font)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &mut T {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure_width(text, font)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure_width(text, font)
    }
}

/// One output line of the wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedLine {
    /// Line content, words joined by single spaces
    pub text: String,
    /// `true` when the next word did not fit and forced a break
    pub forced: bool,
}

impl WrappedLine {
    fn new(text: impl Into<String>, forced: bool) -> Self {
        Self {
            text: text.into(),
            forced,
        }
    }
}

/// Greedy line wrapper.
///
/// Each `\n`-separated paragraph is packed word by word while the measured
/// width stays within the limit. Lines broken because the next word did not
/// fit are `forced`; the last line of each paragraph is not. An empty
/// paragraph yields one empty line.
pub struct LineWrapper<'a, M: ?Sized> {
    measure: &'a M,
}

impl<'a, M: TextMeasure + ?Sized> LineWrapper<'a, M> {
    /// Create a wrapper over a measurement capability.
    pub fn new(measure: &'a M) -> Self {
        Self { measure }
    }

    /// Wrap `text` in `font` to `max_width` points.
    pub fn wrap(&self, text: &str, font: &FontSpec, max_width: f32) -> Vec<WrappedLine> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, font, max_width, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(
        &self,
        paragraph: &str,
        font: &FontSpec,
        max_width: f32,
        out: &mut Vec<WrappedLine>,
    ) {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                if self.measure.measure_width(word, font) > max_width {
                    log::warn!("word '{}' is wider than the text column", word);
                }
                current.push_str(word);
                continue;
            }

            let candidate_width = self.measure.measure_width(&format!("{} {}", current, word), font);
            if candidate_width <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                out.push(WrappedLine::new(std::mem::take(&mut current), true));
                if self.measure.measure_width(word, font) > max_width {
                    log::warn!("word '{}' is wider than the text column", word);
                }
                current.push_str(word);
            }
        }

        // Covers both the trailing line and the empty paragraph.
        out.push(WrappedLine::new(current, false));
    }
}

/// Wrap `text` with a one-off [`LineWrapper`].
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<WrappedLine> {
    LineWrapper::new(measure).wrap(text, font, max_width)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every character is `size` points wide.
    pub(crate) struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
            text.chars().count() as f32 * font.size
        }
    }

    fn font() -> FontSpec {
        FontSpec::regular(1.0)
    }

    fn texts(lines: &[WrappedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_greedy_packing() {
        let lines = wrap_text(&FixedWidth, "aaa bbb ccc ddd", &font(), 7.0);
        assert_eq!(texts(&lines), vec!["aaa bbb", "ccc ddd"]);
        assert!(lines[0].forced);
        assert!(!lines[1].forced);
    }

    #[test]
    fn test_exact_fit_is_not_a_break() {
        let lines = wrap_text(&FixedWidth, "abc def", &font(), 7.0);
        assert_eq!(lines, vec![WrappedLine::new("abc def", false)]);
    }

    #[test]
    fn test_empty_paragraph_preserved() {
        let lines = wrap_text(&FixedWidth, "one\n\ntwo", &font(), 20.0);
        assert_eq!(texts(&lines), vec!["one", "", "two"]);
        assert!(lines.iter().all(|l| !l.forced));
    }

    #[test]
    fn test_whitespace_only_is_empty_line() {
        let lines = wrap_text(&FixedWidth, "   \t ", &font(), 20.0);
        assert_eq!(lines, vec![WrappedLine::new("", false)]);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = wrap_text(&FixedWidth, "abcdefghijkl xy", &font(), 5.0);
        assert_eq!(texts(&lines), vec!["abcdefghijkl", "xy"]);
        assert!(lines[0].forced);

        let lines = wrap_text(&FixedWidth, "xy abcdefghijkl", &font(), 5.0);
        assert_eq!(texts(&lines), vec!["xy", "abcdefghijkl"]);
        assert!(lines.iter().all(|l| !l.text.is_empty()));
    }

    #[test]
    fn test_words_preserved() {
        let text = "The  quick brown fox\njumps over\n\nthe lazy   dog, repeatedly and at length.";
        let lines = wrap_text(&FixedWidth, text, &font(), 9.0);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
        assert!(lines.iter().all(|l| l.text.chars().count() <= 9 || !l.text.contains(' ')));
    }
}
