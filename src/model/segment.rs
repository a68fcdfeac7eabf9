//! Renderable segments: one line of text, or a whole-page title block.

use serde::{Deserialize, Serialize};

/// Standard PDF fonts used by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontName {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
}

impl FontName {
    /// PostScript name of the font.
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontName::Helvetica => "Helvetica",
            FontName::HelveticaBold => "Helvetica-Bold",
            FontName::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// All fonts, in resource order.
    pub fn all() -> [FontName; 3] {
        [
            FontName::Helvetica,
            FontName::HelveticaBold,
            FontName::HelveticaOblique,
        ]
    }
}

/// A font face at a size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font face
    pub name: FontName,
    /// Size in points
    pub size: f32,
}

impl FontSpec {
    /// Create a font spec.
    pub const fn new(name: FontName, size: f32) -> Self {
        Self { name, size }
    }

    /// Helvetica at `size`.
    pub const fn regular(size: f32) -> Self {
        Self::new(FontName::Helvetica, size)
    }

    /// Helvetica-Bold at `size`.
    pub const fn bold(size: f32) -> Self {
        Self::new(FontName::HelveticaBold, size)
    }

    /// Helvetica-Oblique at `size`.
    pub const fn oblique(size: f32) -> Self {
        Self::new(FontName::HelveticaOblique, size)
    }
}

/// Horizontal placement of a body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Flush with the left margin
    #[default]
    Left,
    /// Centred in the text column
    Center,
}

/// One rendered line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    /// Line content
    pub text: String,
    /// Font and size
    pub font: FontSpec,
    /// Placement
    pub alignment: Alignment,
    /// Part of a section heading
    pub is_heading: bool,
    /// Part of a subsection heading
    pub is_subheading: bool,
}

impl TextSegment {
    /// A plain body line.
    pub fn body(text: impl Into<String>, font: FontSpec, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            font,
            alignment,
            is_heading: false,
            is_subheading: false,
        }
    }

    /// An empty spacer line.
    pub fn blank(font: FontSpec) -> Self {
        Self::body(String::new(), font, Alignment::Left)
    }

    /// Check whether this line belongs to any heading.
    pub fn is_any_heading(&self) -> bool {
        self.is_heading || self.is_subheading
    }
}

/// A bracketed block of lines that owns a page by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlockSegment {
    /// Trimmed block lines, in order
    pub lines: Vec<String>,
}

impl TitleBlockSegment {
    /// Create a title block from raw lines (each is trimmed).
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref().trim().to_string()).collect(),
        }
    }

    /// Title blocks always start a fresh page.
    pub fn forces_new_page(&self) -> bool {
        true
    }
}

/// The atomic unit consumed by the paginator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A single line
    Text(TextSegment),
    /// A whole-page block
    TitleBlock(TitleBlockSegment),
}

impl Segment {
    /// Check if this segment must sit alone on its page.
    pub fn forces_new_page(&self) -> bool {
        match self {
            Segment::Text(_) => false,
            Segment::TitleBlock(block) => block.forces_new_page(),
        }
    }

    /// The text line, if this is one.
    pub fn as_text(&self) -> Option<&TextSegment> {
        match self {
            Segment::Text(t) => Some(t),
            Segment::TitleBlock(_) => None,
        }
    }

    /// The title block, if this is one.
    pub fn as_title_block(&self) -> Option<&TitleBlockSegment> {
        match self {
            Segment::Text(_) => None,
            Segment::TitleBlock(b) => Some(b),
        }
    }
}

impl From<TextSegment> for Segment {
    fn from(seg: TextSegment) -> Self {
        Segment::Text(seg)
    }
}

impl From<TitleBlockSegment> for Segment {
    fn from(block: TitleBlockSegment) -> Self {
        Segment::TitleBlock(block)
    }
}
