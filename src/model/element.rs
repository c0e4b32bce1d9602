//! Normalized page elements produced by the collector.

use super::BBox;

/// Kind of layout primitive an element was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A text line
    Text,
    /// A raster image block
    Image,
    /// A vector primitive (line, rectangle, curve outline)
    Vector,
}

/// A single normalized page element.
///
/// Immutable once collected. Text elements carry the aggregated font
/// metadata of their constituent characters plus one glyph box per
/// character, which footnote detection needs to emit tight bracket spans.
#[derive(Debug, Clone)]
pub struct Element {
    /// Line text, `None` for image/vector primitives
    pub text: Option<String>,
    /// Bounding box (native units at collection time, pixel space after
    /// the transform stage)
    pub bbox: BBox,
    /// Average character font size, 0.0 for non-text elements
    pub font_size: f32,
    /// Any constituent character used a bold font
    pub is_bold: bool,
    /// Any constituent character used an italic font
    pub is_italic: bool,
    /// Primitive kind
    pub kind: ElementKind,
    /// Per-character boxes, parallel to `text` chars (text elements only)
    pub glyphs: Vec<BBox>,
}

impl Element {
    /// Create a non-text element (image or vector primitive).
    pub fn graphic(kind: ElementKind, bbox: BBox) -> Self {
        Self {
            text: None,
            bbox,
            font_size: 0.0,
            is_bold: false,
            is_italic: false,
            kind,
            glyphs: Vec::new(),
        }
    }

    /// Line text, or the empty string for non-text elements.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether this element is a text line.
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}
