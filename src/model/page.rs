//! Per-page working state for the annotation pipeline.

use super::{BBox, Element};

/// A page mid-pipeline: normalized elements plus detected table regions.
///
/// Created once per page, populated progressively by each pipeline stage,
/// and discarded after its annotation record is emitted. After the
/// transform stage every coordinate in here is raster pixel space.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Page width in pixels
    pub width: f32,
    /// Page height in pixels
    pub height: f32,
    /// Whether the source page was wider than tall
    pub landscape: bool,
    /// Normalized elements in the layout engine's emission order
    pub elements: Vec<Element>,
    /// Detected table regions
    pub tables: Vec<BBox>,
}

impl PageLayout {
    /// Create an empty page of the given pixel dimensions.
    pub fn new(width: f32, height: f32, landscape: bool) -> Self {
        Self {
            width,
            height,
            landscape,
            elements: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Text elements only, in order.
    pub fn text_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_text())
    }

    /// Whether any text survived collection.
    pub fn has_text(&self) -> bool {
        self.elements.iter().any(|e| e.is_text())
    }
}
