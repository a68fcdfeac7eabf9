//! Turns a parsed filing into the flat segment sequence the paginator walks.

use serde::{Deserialize, Serialize};

use crate::model::{
    sections_of, Alignment, FontSpec, HeaderBlock, HeadingStyle, Section, Sections, Segment,
    TextSegment, TitleBlockSegment,
};
use crate::parser::{LineItem, TitleBlocks, DEFAULT_MARKER_LEN};

use super::align::{AlignmentPolicy, CapsCentered, LineClass, LineContext};
use super::wrap::{LineWrapper, TextMeasure};

/// Fonts for header text, headings and section bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStyles {
    /// Lines before the first heading
    pub header_body: FontSpec,
    /// Top-level heading
    pub section_heading: FontSpec,
    /// Body under a top-level heading
    pub section_body: FontSpec,
    /// Nested heading
    pub subsection_heading: FontSpec,
    /// Body under a nested heading
    pub subsection_body: FontSpec,
}

impl SegmentStyles {
    /// Heading font for a style.
    pub fn heading_font(&self, style: HeadingStyle) -> FontSpec {
        match style {
            HeadingStyle::Section => self.section_heading,
            HeadingStyle::Subsection => self.subsection_heading,
        }
    }

    /// Body font for a style.
    pub fn body_font(&self, style: HeadingStyle) -> FontSpec {
        match style {
            HeadingStyle::Section => self.section_body,
            HeadingStyle::Subsection => self.subsection_body,
        }
    }
}

impl Default for SegmentStyles {
    fn default() -> Self {
        Self {
            header_body: FontSpec::regular(10.0),
            section_heading: FontSpec::bold(10.0),
            section_body: FontSpec::regular(10.0),
            subsection_heading: FontSpec::regular(9.0),
            subsection_body: FontSpec::regular(9.0),
        }
    }
}

/// Builds [`Segment`]s from a header block and sections.
///
/// Body text goes through the title block detector first; every ordinary
/// line is then classified, wrapped to the column width and aligned by the
/// configured [`AlignmentPolicy`]. Each section is introduced by a blank
/// separator line and its centred heading.
pub struct SegmentBuilder<'a, M: ?Sized> {
    wrapper: LineWrapper<'a, M>,
    styles: &'a SegmentStyles,
    max_width: f32,
    marker_len: usize,
    policy: Box<dyn AlignmentPolicy + 'a>,
    prev_forced: Option<bool>,
}

impl<'a, M: TextMeasure + ?Sized> SegmentBuilder<'a, M> {
    /// Create a builder wrapping to `max_width` points.
    pub fn new(measure: &'a M, styles: &'a SegmentStyles, max_width: f32) -> Self {
        Self {
            wrapper: LineWrapper::new(measure),
            styles,
            max_width,
            marker_len: DEFAULT_MARKER_LEN,
            policy: Box::new(CapsCentered),
            prev_forced: None,
        }
    }

    /// Use a different alignment policy.
    pub fn with_alignment(mut self, policy: impl AlignmentPolicy + 'a) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Use a different title block marker length.
    pub fn with_marker_len(mut self, len: usize) -> Self {
        self.marker_len = len.max(1);
        self
    }

    /// Build the segment sequence.
    pub fn build(&mut self, header: &HeaderBlock, sections: &[Section<'_>]) -> Vec<Segment> {
        self.prev_forced = None;
        let mut out = Vec::new();

        self.push_body(&header.content, self.styles.header_body, &mut out);

        for section in sections {
            let style = section.style();
            let body_font = self.styles.body_font(style);

            out.push(TextSegment::blank(body_font).into());
            self.prev_forced = Some(false);

            self.push_heading(&section.key.to_string(), style, &mut out);
            self.push_body(section.body, body_font, &mut out);
        }

        log::debug!(
            "built {} segments from {} sections ({} alignment)",
            out.len(),
            sections.len(),
            self.policy.name()
        );
        out
    }

    /// Build from an ordered section map.
    pub fn build_sections(&mut self, header: &HeaderBlock, sections: &Sections) -> Vec<Segment> {
        let views: Vec<Section<'_>> = sections_of(sections).collect();
        self.build(header, &views)
    }

    fn push_heading(&self, text: &str, style: HeadingStyle, out: &mut Vec<Segment>) {
        let font = self.styles.heading_font(style);
        for line in self.wrapper.wrap(text, &font, self.max_width) {
            out.push(
                TextSegment {
                    text: line.text,
                    font,
                    alignment: Alignment::Center,
                    is_heading: style == HeadingStyle::Section,
                    is_subheading: style == HeadingStyle::Subsection,
                }
                .into(),
            );
        }
    }

    fn push_body(&mut self, text: &str, font: FontSpec, out: &mut Vec<Segment>) {
        let lines: Vec<&str> = text.lines().collect();
        for item in TitleBlocks::with_marker_len(&lines, self.marker_len) {
            match item {
                LineItem::Block(block) => out.push(TitleBlockSegment::new(&block).into()),
                LineItem::Line(line) => self.push_line(line, font, out),
            }
        }
    }

    fn push_line(&mut self, line: &str, font: FontSpec, out: &mut Vec<Segment>) {
        let class = LineClass::of(line);
        if class == LineClass::Blank {
            out.push(TextSegment::blank(font).into());
            self.prev_forced = Some(false);
            return;
        }

        for wrapped in self.wrapper.wrap(line.trim(), &font, self.max_width) {
            let alignment = self.policy.align(&LineContext {
                text: &wrapped.text,
                class,
                forced: wrapped.forced,
                prev_forced: self.prev_forced,
                is_first: self.prev_forced.is_none(),
            });
            self.prev_forced = Some(wrapped.forced);
            out.push(TextSegment::body(wrapped.text, font, alignment).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::align::{LeftOnly, ShortRunCentered};
    use crate::layout::wrap::tests::FixedWidth;
    use crate::parser::{parse_str, ParseOptions};

    fn build(text: &str, width: f32) -> Vec<Segment> {
        let parsed = parse_str(text, &ParseOptions::default());
        let styles = SegmentStyles::default();
        let segments = SegmentBuilder::new(&FixedWidth, &styles, width).build_sections(&parsed.header, &parsed.sections);
        segments
    }

    fn text_of(seg: &Segment) -> &str {
        seg.as_text().map(|t| t.text.as_str()).unwrap_or("<block>")
    }

    #[test]
    fn test_example_filing() {
        let segs = build(
            "I. INTRODUCTION\nSome body text.\n=====\nEXHIBIT LIST\n=====\nII. PARTIES\nMore body.",
            1000.0,
        );
        let texts: Vec<&str> = segs.iter().map(text_of).collect();
        assert_eq!(
            texts,
            vec!["", "I INTRODUCTION", "Some body text.", "<block>", "", "II PARTIES", "More body."]
        );
        assert_eq!(
            segs[3].as_title_block().unwrap().lines,
            vec!["EXHIBIT LIST".to_string()]
        );
        let heading = segs[1].as_text().unwrap();
        assert!(heading.is_heading && !heading.is_subheading);
        assert_eq!(heading.alignment, Alignment::Center);
        assert_eq!(heading.font, FontSpec::bold(10.0));
    }

    #[test]
    fn test_subsection_fonts() {
        let segs = build("1. FACTS\nbody\n1.1 TIMELINE\nnested body", 1000.0);
        let sub = segs[4].as_text().unwrap();
        assert_eq!(sub.text, "1.1 TIMELINE");
        assert!(sub.is_subheading && !sub.is_heading);
        assert_eq!(sub.font, FontSpec::regular(9.0));
        assert_eq!(segs[5].as_text().unwrap().font.size, 9.0);
        assert_eq!(segs[3].as_text().unwrap().font.size, 9.0);
    }

    #[test]
    fn test_header_classification() {
        let segs = build("SUPERIOR COURT\n\nJohn Doe, plaintiff", 1000.0);
        let aligns: Vec<_> = segs.iter().map(|s| s.as_text().unwrap().alignment).collect();
        assert_eq!(aligns, vec![Alignment::Center, Alignment::Left, Alignment::Left]);
        assert!(segs[1].as_text().unwrap().text.is_empty());
    }

    #[test]
    fn test_wrapped_heading_keeps_flags() {
        let segs = build("I. A VERY LONG HEADING TITLE\nbody", 12.0);
        let heading_lines: Vec<_> = segs
            .iter()
            .filter_map(Segment::as_text)
            .filter(|t| t.is_heading)
            .collect();
        assert!(heading_lines.len() > 1);
        assert!(heading_lines.iter().all(|t| t.alignment == Alignment::Center));
    }

    #[test]
    fn test_policy_is_pluggable() {
        let parsed = parse_str("COMPLAINT\nshort\nshort", &ParseOptions::default());
        let styles = SegmentStyles::default();

        let segs = SegmentBuilder::new(&FixedWidth, &styles, 100.0)
            .with_alignment(LeftOnly)
            .build_sections(&parsed.header, &parsed.sections);
        assert!(segs.iter().all(|s| s.as_text().unwrap().alignment == Alignment::Left));

        let segs = SegmentBuilder::new(&FixedWidth, &styles, 100.0)
            .with_alignment(ShortRunCentered)
            .build_sections(&parsed.header, &parsed.sections);
        let aligns: Vec<_> = segs.iter().map(|s| s.as_text().unwrap().alignment).collect();
        assert_eq!(aligns, vec![Alignment::Left, Alignment::Center, Alignment::Center]);
    }

    #[test]
    fn test_title_block_in_header() {
        let segs = build("=====\nCOMPLAINT FOR DAMAGES\n=====\nintro", 1000.0);
        assert!(segs[0].forces_new_page());
        assert_eq!(text_of(&segs[1]), "intro");
    }
}
