//! Static width tables for the standard PDF fonts.
//!
//! Widths are the AFM advance widths in 1/1000 em for printable ASCII
//! (0x20..=0x7E). Other characters use the table's average width, so
//! measurement of non-Latin text is approximate.

use crate::layout::TextMeasure;
use crate::model::{FontName, FontSpec};

struct WidthTable {
    widths: [u16; 95],
    average: u16,
}

impl WidthTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average
        }
    }

    fn measure(&self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }
}

#[rustfmt::skip]
static HELVETICA: WidthTable = WidthTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n-z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD: WidthTable = WidthTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A-M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a-m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n-z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average: 611,
};

fn table_for(font: FontName) -> &'static WidthTable {
    match font {
        FontName::Helvetica | FontName::HelveticaOblique => &HELVETICA,
        FontName::HelveticaBold => &HELVETICA_BOLD,
    }
}

/// Text measurement from built-in width tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl TextMeasure for ApproximateMetrics {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        table_for(font.name).measure(text) as f32 * font.size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        let m = ApproximateMetrics;
        // "Hello" in Helvetica: 722 + 556 + 222 + 222 + 556 = 2278
        assert!((m.measure_width("Hello", &FontSpec::regular(10.0)) - 22.78).abs() < 1e-3);
        assert!(
            m.measure_width("Hello", &FontSpec::bold(10.0))
                > m.measure_width("Hello", &FontSpec::regular(10.0))
        );
    }

    #[test]
    fn test_scales_with_size() {
        let m = ApproximateMetrics;
        let small = m.measure_width("COMPLAINT", &FontSpec::regular(9.0));
        let large = m.measure_width("COMPLAINT", &FontSpec::regular(18.0));
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let m = ApproximateMetrics;
        assert!((m.measure_width("§", &FontSpec::regular(10.0)) - 5.56).abs() < 1e-3);
        assert_eq!(m.measure_width("", &FontSpec::regular(10.0)), 0.0);
    }
}
