//! PDF output through lopdf.
//!
//! Text uses the standard Type1 fonts with WinAnsi encoding, so no font
//! files are embedded. JPEG images are embedded as-is with the DCTDecode
//! filter; other formats are decoded and stored with FlateDecode.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::layout::TextMeasure;
use crate::model::{FontName, FontSpec};

use super::canvas::{aligned_x, Canvas, TextAlign};
use super::image::ExhibitImage;
use super::metrics::ApproximateMetrics;

/// Encode text for a WinAnsi-encoded standard font.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn font_resource(font: FontName) -> &'static [u8] {
    match font {
        FontName::Helvetica => b"F1",
        FontName::HelveticaBold => b"F2",
        FontName::HelveticaOblique => b"F3",
    }
}

struct LoadedImage {
    path: PathBuf,
    name: Vec<u8>,
    width: u32,
    height: u32,
    object: Option<ObjectId>,
    pending: Option<ExhibitImage>,
}

/// A [`Canvas`] that builds a PDF document.
pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<Vec<Operation>>,
    images: Vec<LoadedImage>,
    width: f32,
    height: f32,
    info: Dictionary,
}

impl PdfCanvas {
    /// Create an empty document with pages of `width` x `height` points.
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            current: None,
            images: Vec::new(),
            width,
            height,
            info: Dictionary::new(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.set_info("Title", title);
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: &str) -> Self {
        self.set_info("Author", author);
        self
    }

    /// Set the document subject.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.set_info("Subject", subject);
        self
    }

    fn set_info(&mut self, key: &str, value: &str) {
        self.info.set(
            key,
            Object::String(value.as_bytes().to_vec(), StringFormat::Literal),
        );
    }

    fn ops(&mut self) -> Result<&mut Vec<Operation>> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::Render("drawing before the first page was started".into()))
    }

    fn flush_page(&mut self) -> Result<()> {
        let Some(operations) = self.current.take() else {
            return Ok(());
        };
        let content = Content { operations }.encode()?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    fn load_image(&mut self, path: &Path) -> Result<usize> {
        if let Some(index) = self.images.iter().position(|img| img.path == path) {
            return Ok(index);
        }
        let image = ExhibitImage::load(path)?;
        let index = self.images.len();
        self.images.push(LoadedImage {
            path: path.to_path_buf(),
            name: format!("Im{}", index + 1).into_bytes(),
            width: image.width,
            height: image.height,
            object: None,
            pending: Some(image),
        });
        Ok(index)
    }

    /// Embed the image's data on first use and return its resource name.
    fn image_resource(&mut self, index: usize) -> Result<Vec<u8>> {
        if let Some(image) = self.images[index].pending.take() {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => Object::Name(image.color_space().to_vec()),
                "BitsPerComponent" => 8,
            };
            let stream = if image.passthrough {
                dict.set("Filter", "DCTDecode");
                Stream::new(dict, image.data).with_compression(false)
            } else {
                let mut stream = Stream::new(dict, image.data);
                stream.compress()?;
                stream
            };
            self.images[index].object = Some(self.doc.add_object(stream));
        }
        Ok(self.images[index].name.clone())
    }

    fn resources(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in FontName::all() {
            fonts.set(
                font_resource(font),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => Object::Name(font.postscript_name().as_bytes().to_vec()),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }

        let mut xobjects = Dictionary::new();
        for image in &self.images {
            if let Some(id) = image.object {
                xobjects.set(image.name.clone(), id);
            }
        }

        let mut resources = Dictionary::new();
        resources.set("Font", fonts);
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        resources
    }

    /// Close the last page and serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_page()?;

        let resources = self.resources();
        self.doc
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = std::mem::take(&mut self.info);
            info.set(
                "Producer",
                Object::String(b"pleading".to_vec(), StringFormat::Literal),
            );
            let info_id = self.doc.add_object(info);
            self.doc.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        log::debug!("PDF assembled: {} pages, {} bytes", self.page_ids.len(), buffer.len());
        Ok(buffer)
    }

    /// Close the last page and write the document to `path`.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let bytes = self.finish()?;
        fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

impl TextMeasure for PdfCanvas {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        ApproximateMetrics.measure_width(text, font)
    }
}

impl Canvas for PdfCanvas {
    fn start_new_page(&mut self) -> Result<()> {
        self.flush_page()?;
        self.current = Some(Vec::new());
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &FontSpec, align: TextAlign) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let x = aligned_x(&*self, x, text, font, align);
        let ops = self.ops()?;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font_resource(font.name).to_vec()),
                font.size.into(),
            ],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn image_size(&mut self, path: &Path) -> Result<(f32, f32)> {
        let index = self.load_image(path)?;
        let image = &self.images[index];
        Ok((image.width as f32, image.height as f32))
    }

    fn draw_image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let index = self.load_image(path)?;
        let name = self.image_resource(index)?;
        let ops = self.ops()?;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name)]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn page_count(&self) -> u32 {
        (self.page_ids.len() + usize::from(self.current.is_some())) as u32
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) -> Result<()> {
        let ops = self.ops()?;
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        ops.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32) -> Result<()> {
        let ops = self.ops()?;
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
        ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
        ops.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn draw_text_vertical(&mut self, x: f32, y: f32, text: &str, font: &FontSpec) -> Result<()> {
        let ops = self.ops()?;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![0.into(), 1.into(), (-1).into(), 0.into(), x.into(), y.into()],
        ));
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font_resource(font.name).to_vec()),
                font.size.into(),
            ],
        ));
        ops.push(Operation::new("Td", vec![0.into(), 0.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::image::tests::write_image;

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("A§•?"), vec![b'A', 0xA7, 0x95, b'?']);
        assert_eq!(win_ansi("漢"), vec![b'?']);
    }

    #[test]
    fn test_draw_before_page_fails() {
        let mut canvas = PdfCanvas::new(612.0, 792.0);
        let result = canvas.draw_text(0.0, 0.0, "x", &FontSpec::regular(10.0), TextAlign::Left);
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_pages_round_trip() {
        let mut canvas = PdfCanvas::new(612.0, 792.0).with_title("Complaint");
        for i in 0..3 {
            canvas.start_new_page().unwrap();
            canvas
                .draw_text(306.0, 400.0, &format!("page {}", i), &FontSpec::regular(10.0), TextAlign::Center)
                .unwrap();
            canvas.draw_rect(36.0, 36.0, 540.0, 662.4, 2.0).unwrap();
        }
        assert_eq!(canvas.page_count(), 3);
        let bytes = canvas.finish().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);

        let fonts = doc
            .objects
            .values()
            .find_map(|obj| obj.as_dict().ok()?.get(b"Font").ok()?.as_dict().ok())
            .unwrap();
        assert_eq!(fonts.len(), FontName::all().len());
        assert!(fonts.has(b"F3") && !fonts.has(b"F4"));
    }

    /// `Filter` of every image XObject in a saved document.
    fn image_filters(bytes: &[u8]) -> Vec<Vec<u8>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.objects
            .values()
            .filter_map(|obj| match obj {
                Object::Stream(s) if s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice()) => {
                    Some(s.dict.get(b"Filter").and_then(Object::as_name).unwrap().to_vec())
                }
                _ => None,
            })
            .collect()
    }

    fn embed(path: &Path, width: u32, height: u32) -> Vec<u8> {
        write_image(path, width, height);
        let mut canvas = PdfCanvas::new(612.0, 792.0);
        canvas.start_new_page().unwrap();
        assert_eq!(canvas.image_size(path).unwrap(), (width as f32, height as f32));
        canvas.draw_image(path, 36.0, 36.0, 200.0, 100.0).unwrap();
        // The same image drawn twice is stored once.
        canvas.draw_image(path, 36.0, 300.0, 200.0, 100.0).unwrap();
        canvas.finish().unwrap()
    }

    #[test]
    fn test_embeds_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = embed(&dir.path().join("scan.jpg"), 200, 100);
        assert_eq!(image_filters(&bytes), vec![b"DCTDecode".to_vec()]);
    }

    #[test]
    fn test_embeds_png() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = embed(&dir.path().join("scan.png"), 300, 200);
        assert_eq!(image_filters(&bytes), vec![b"FlateDecode".to_vec()]);
    }

    #[test]
    fn test_missing_image_is_recoverable() {
        let mut canvas = PdfCanvas::new(612.0, 792.0);
        let err = canvas.image_size(Path::new("/nonexistent/scan.jpg")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
