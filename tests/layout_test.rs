//! Integration tests for parsing, segment building and pagination.

use pleading::layout::{
    CitationPattern, Indexer, PageInfo, PageKind, PageSink, Paginator, PlacedLine, SegmentBuilder,
};
use pleading::render::ApproximateMetrics;
use pleading::{
    parse_str, HeadingKey, HeadingStyle, LayoutOptions, Segment, SegmentStyles, TitleBlockSegment,
};

const EXAMPLE: &str =
    "I. INTRODUCTION\nSome body text.\n=====\nEXHIBIT LIST\n=====\nII. PARTIES\nMore body.";

/// Records every page with the line numbers placed on it.
#[derive(Default)]
struct PageLog {
    pages: Vec<(u32, PageKind, Vec<u32>)>,
    totals: Vec<u32>,
}

impl PageSink for PageLog {
    fn begin_page(&mut self, page: &PageInfo) -> pleading::Result<()> {
        self.pages.push((page.number, page.kind, Vec::new()));
        self.totals.push(page.total);
        Ok(())
    }

    fn text_line(&mut self, _page: &PageInfo, line: &PlacedLine<'_>) -> pleading::Result<()> {
        if let Some(page) = self.pages.last_mut() {
            page.2.push(line.number);
        }
        Ok(())
    }

    fn title_block(&mut self, _page: &PageInfo, number: u32, _block: &TitleBlockSegment) -> pleading::Result<()> {
        if let Some(page) = self.pages.last_mut() {
            page.2.push(number);
        }
        Ok(())
    }
}

fn segments(text: &str) -> Vec<Segment> {
    let parsed = parse_str(text);
    let options = LayoutOptions::default();
    SegmentBuilder::new(&ApproximateMetrics, &SegmentStyles::default(), options.text_width())
        .build_sections(&parsed.header, &parsed.sections)
}

/// A long filing: many sections, wrapped paragraphs, several title blocks.
fn long_filing() -> String {
    let mut text = String::from("SUPERIOR COURT OF WASHINGTON\n\n");
    for i in 1..=40 {
        text.push_str(&format!("{}. CLAIM {}\n", i, i));
        text.push_str(&"The defendant failed to deliver the goods as promised. ".repeat(i % 7 + 1));
        text.push('\n');
        if i % 9 == 0 {
            text.push_str("=====\nDECLARATION OF SERVICE\nUnder penalty of perjury\n=====\n");
        }
    }
    text
}

#[test]
fn test_example_structure() {
    let parsed = parse_str(EXAMPLE);
    let keys: Vec<String> = parsed.sections.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["I INTRODUCTION", "II PARTIES"]);
    assert_eq!(
        parsed.sections.get(&HeadingKey::new("I", "INTRODUCTION")).map(String::as_str),
        Some("Some body text.\n=====\nEXHIBIT LIST\n=====")
    );
    assert_eq!(
        parsed.sections.get(&HeadingKey::new("II", "PARTIES")).map(String::as_str),
        Some("More body.")
    );
    assert_eq!(parsed.documents, vec!["EXHIBIT LIST"]);
}

#[test]
fn test_example_block_owns_page_and_stays_out_of_toc() {
    let segs = segments(EXAMPLE);
    let paginator = Paginator::new(&segs, 36, 1).unwrap();
    let mut log = PageLog::default();
    let mut indexer = Indexer::default();
    paginator.render(&mut log, &mut indexer, paginator.count_pages()).unwrap();

    assert_eq!(log.pages.len(), 3);
    assert_eq!(log.pages[1], (2, PageKind::TitleBlock, vec![4]));

    let headings: Vec<(String, String)> = indexer
        .headings()
        .iter()
        .map(|h| (h.text.clone(), h.label()))
        .collect();
    assert_eq!(
        headings,
        vec![
            ("I INTRODUCTION".to_string(), "1:2".to_string()),
            ("II PARTIES".to_string(), "3:6".to_string()),
        ]
    );
    assert!(indexer.headings().iter().all(|h| h.text != "EXHIBIT LIST"));
}

#[test]
fn test_heading_classification() {
    assert_eq!(HeadingKey::parse("1. INTRODUCTION").map(|k| k.style()), Some(HeadingStyle::Section));
    let sub = HeadingKey::parse("1.1 BACKGROUND").unwrap();
    assert_eq!(sub.depth(), 2);
    assert_eq!(sub.style(), HeadingStyle::Subsection);
    assert!(HeadingKey::parse("1. Introduction").is_none());

    let parsed = parse_str("1. Introduction\nbody");
    assert_eq!(parsed.section_count(), 0);
    assert_eq!(parsed.header.content, "1. Introduction\nbody");
}

#[test]
fn test_line_numbers_monotonic_across_pages() {
    let segs = segments(&long_filing());
    for budget in [1, 3, 10, 36] {
        let paginator = Paginator::new(&segs, budget, 1).unwrap();
        let mut log = PageLog::default();
        paginator
            .render(&mut log, &mut Indexer::default(), paginator.count_pages())
            .unwrap();

        let numbers: Vec<u32> = log.pages.iter().flat_map(|p| p.2.iter().copied()).collect();
        let expected: Vec<u32> = (1..=segs.len() as u32).collect();
        assert_eq!(numbers, expected, "budget {}", budget);
    }
}

#[test]
fn test_page_count_agreement() {
    let segs = segments(&long_filing());
    for (budget, first) in [(1, 1), (7, 2), (36, 1), (1000, 5)] {
        let paginator = Paginator::new(&segs, budget, first).unwrap();
        let counted = paginator.count_pages();
        let mut log = PageLog::default();
        let summary = paginator.render(&mut log, &mut Indexer::default(), counted).unwrap();

        assert_eq!(summary.pages, counted);
        assert_eq!(log.pages.len() as u32, counted);
        assert!(log.totals.iter().all(|&t| t == counted));
        assert_eq!(log.pages[0].0, first);
    }
}

#[test]
fn test_block_atomicity() {
    let segs = segments(&long_filing());
    let paginator = Paginator::new(&segs, 36, 1).unwrap();
    for span in paginator.pages() {
        let has_block = segs[span.start..span.end].iter().any(Segment::forces_new_page);
        if has_block {
            assert_eq!(span.len(), 1);
            assert_eq!(span.kind, PageKind::TitleBlock);
        }
        assert!(span.len() <= 36);
    }
}

#[test]
fn test_toc_order_matches_render_order() {
    let segs = segments(&long_filing());
    let paginator = Paginator::new(&segs, 36, 1).unwrap();
    let mut indexer = Indexer::new(vec![CitationPattern::new(r"CLAIM (\d+)", 1).unwrap()]);
    paginator
        .render(&mut PageLog::default(), &mut indexer, paginator.count_pages())
        .unwrap();

    let heading_lines: Vec<u32> = indexer.headings().iter().map(|h| h.line).collect();
    assert_eq!(heading_lines.len(), 40);
    assert!(heading_lines.windows(2).all(|w| w[0] < w[1]));

    let cited: Vec<&str> = indexer.citations().iter().map(|c| c.text.as_str()).collect();
    let expected: Vec<String> = (1..=40).map(|i| i.to_string()).collect();
    assert_eq!(cited, expected);
}
