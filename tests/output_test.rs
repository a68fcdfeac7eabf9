//! Integration tests for PDF, text, table of contents and snapshot output.

use std::fs;
use std::path::Path;

use pleading::render::{ApproximateMetrics, PageChrome};
use pleading::{
    build_index_pdf, build_pdf, compose, Exhibit, Filing, FilingInfo, JsonFormat, LayoutOptions,
    Pleading, TableOfContents, TextCanvas, TocStyle,
};

const COMPLAINT: &str = "SUPERIOR COURT OF WASHINGTON\nFOR KING COUNTY\n\n\
I. INTRODUCTION\nPlaintiff brings this action under RCW 19.86.020.\n\
=====\nEXHIBIT LIST\nExhibit A: Receipt\n=====\n\
II. PARTIES\nPlaintiff Jane Doe resides in Seattle.\n\
II.1 DEFENDANT\nAcme Corp. does business under RCW 23B.15.010.";

/// Write a solid image; the format follows the extension.
fn write_image(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([120, 120, 120]))
        .save(path)
        .unwrap();
}

fn filing() -> Filing {
    pleading::parse_str(COMPLAINT).into_filing("Doe v. Acme Corp.", "Doe Legal")
}

fn rcw_options() -> LayoutOptions {
    let patterns =
        pleading::layout::citation_patterns_from_json(r#"[{"pattern": "(RCW\\s+[0-9A-Z]+\\.[0-9]+\\.[0-9]+)", "group": 1}]"#)
            .unwrap();
    LayoutOptions::default().with_citations(patterns)
}

#[test]
fn test_pdf_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("receipt.jpg");
    write_image(&image, 800, 600);

    let mut filing = filing();
    filing.add_exhibit(Exhibit::new("Exhibit A: Receipt", &image));
    filing.add_exhibit(Exhibit::new("Exhibit B: Missing", dir.path().join("missing.jpg")));
    let info = FilingInfo::from_filing(&filing).with_cover_lines(["CIVIL COVER SHEET"]);

    let (pdf, result) = build_pdf(&filing, &info, &rcw_options()).unwrap();
    let output = dir.path().join("filing.pdf");
    fs::write(&output, &pdf).unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    // cover + text + title block + text + two exhibits
    assert_eq!(doc.get_pages().len(), 6);
    assert_eq!(result.total_pages(), 6);
    assert_eq!(result.stats.exhibit_pages, 2);
    assert_eq!(result.stats.placeholders, 1);
}

#[test]
fn test_png_exhibit_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("scan.png");
    write_image(&image, 1, 1);

    let mut filing = filing();
    filing.add_exhibit(Exhibit::new("Exhibit A: Scan", &image));
    let (pdf, result) = build_pdf(&filing, &FilingInfo::from_filing(&filing), &LayoutOptions::default()).unwrap();
    assert_eq!(result.stats.placeholders, 0);

    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    let images: Vec<_> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|s| s.dict.get(b"Subtype").and_then(lopdf::Object::as_name).ok() == Some(b"Image".as_slice()))
        .collect();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].dict.get(b"Width").and_then(lopdf::Object::as_i64).unwrap(), 1);
}

#[test]
fn test_exhibit_pages_after_cover() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("scan.png");
    let jpg = dir.path().join("receipt.jpg");
    write_image(&png, 400, 300);
    write_image(&jpg, 800, 600);

    let mut filing = filing();
    filing.add_exhibit(Exhibit::new("Exhibit A: Scan", &png));
    filing.add_exhibit(Exhibit::new("Exhibit B: Receipt. ".repeat(40), &jpg));
    filing.add_exhibit(Exhibit::new("Exhibit C: Missing", dir.path().join("missing.gif")));
    let info = FilingInfo::from_filing(&filing).with_cover_lines(["CIVIL COVER SHEET"]);

    let mut canvas = TextCanvas::new();
    let result = compose(&filing, &info, &LayoutOptions::default(), &mut canvas).unwrap();
    // cover + three body pages + three exhibits
    assert_eq!(result.total_pages(), 7);
    assert_eq!(result.stats.exhibit_pages, 3);
    assert_eq!(result.stats.placeholders, 1);

    let pages = canvas.pages();
    for (i, page) in pages.iter().enumerate().skip(4) {
        assert!(page.contains(&format!("Page {} of 7", i + 1)));
    }
    assert_eq!(pages[4].images.len(), 1);

    let lowest_caption = pages[5]
        .texts
        .iter()
        .filter(|t| t.text.contains("Receipt"))
        .map(|t| t.y)
        .fold(f32::MAX, f32::min);
    let (_, y, w, h) = pages[5].images[0].rect;
    assert!(w > 0.0 && h > 0.0);
    assert!(y + h <= lowest_caption);

    assert!(pages[6].images.is_empty());
    assert!(pages[6].contains("Unable to load image:"));
    assert!(pages[6].contains("missing.gif"));
}

#[test]
fn test_headings_and_citations_indexed() {
    let filing = filing();
    let mut canvas = TextCanvas::new();
    let result = compose(&filing, &FilingInfo::from_filing(&filing), &rcw_options(), &mut canvas).unwrap();

    let headings: Vec<&str> = result.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(headings, vec!["I INTRODUCTION", "II PARTIES", "II.1 DEFENDANT"]);
    assert!(result.headings[2].is_subheading);

    let citations: Vec<&str> = result.citations.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(citations, vec!["RCW 19.86.020", "RCW 23B.15.010"]);
    assert!(result.citations[0].page < result.citations[1].page);
}

#[test]
fn test_text_output() {
    let text = Pleading::new("Doe Legal", "Doe v. Acme Corp.")
        .parse_str(COMPLAINT)
        .to_text()
        .unwrap();
    let pages: Vec<&str> = text.split('\x0C').collect();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("Page 1 of 3"));
    assert!(pages[1].contains("EXHIBIT LIST"));
    assert!(pages[1].contains("Exhibit A: Receipt"));
    assert!(pages[2].contains("II.1 DEFENDANT"));
}

#[test]
fn test_index_outputs() {
    let filing = filing();
    let options = rcw_options();
    let info = FilingInfo::from_filing(&filing);
    let mut canvas = TextCanvas::new();
    let result = compose(&filing, &info, &options, &mut canvas).unwrap();

    let toc = TableOfContents::from_positions(
        &result.headings,
        &result.citations,
        &ApproximateMetrics,
        &TocStyle::from_layout(&options),
    );
    assert_eq!(toc.entries().len(), 5);

    let pdf = build_index_pdf(&toc, &info, &options).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let mut index_canvas = TextCanvas::new();
    toc.render(&mut index_canvas, &PageChrome::new(&info.firm_name, &info.case_name, &options))
        .unwrap();
    assert!(index_canvas.pages()[0].contains("Index Page 1 of 1"));

    let json: serde_json::Value = serde_json::from_str(&toc.to_json(JsonFormat::Pretty).unwrap()).unwrap();
    assert_eq!(json["entries"][0]["text"], "I INTRODUCTION");
    assert_eq!(json["entries"][3]["kind"], "citation");
}

#[test]
fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filing.json");

    let mut filing = filing();
    filing.add_exhibit(Exhibit::new("Receipt", "receipt.jpg"));
    filing.save_snapshot(&path, JsonFormat::Pretty).unwrap();

    let loaded = Filing::load_snapshot(&path).unwrap();
    assert_eq!(loaded, filing);
    assert_eq!(loaded.documents.get(&"1".to_string()).map(String::as_str), Some("EXHIBIT LIST\nExhibit A: Receipt"));

    let dump = loaded.to_string();
    assert!(dump.contains("LAW FIRM INFORMATION:\n  Doe Legal"));
    assert!(dump.contains("II.1 DEFENDANT"));
}

#[test]
fn test_empty_toc_still_has_a_page() {
    let options = LayoutOptions::default();
    let toc = TableOfContents::from_positions(&[], &[], &ApproximateMetrics, &TocStyle::from_layout(&options));
    let pdf = build_index_pdf(&toc, &FilingInfo::new("Firm", "Case"), &options).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}
