//! Raw layout tree as handed over by the extraction collaborator.
//!
//! This is the input contract: a JSON dump of one document's pages, each a
//! tree of text boxes (with nested lines and characters), figure containers
//! (which nest arbitrarily), raster image blocks, and vector primitives.
//! All coordinates are native page units with a bottom-left origin.

use serde::{Deserialize, Serialize};

/// A whole document's layout dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Pages in document order
    pub pages: Vec<RawPage>,
}

/// One page of the layout dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Page width in native units
    pub width: f32,
    /// Page height in native units
    pub height: f32,
    /// Top-level layout nodes in the layout engine's emission order
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

/// A node of the layout tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawNode {
    /// A text box containing one or more lines
    TextBox {
        /// Lines in top-to-bottom emission order
        lines: Vec<RawLine>,
    },
    /// A figure container; children may nest further figures
    Figure {
        /// Contained nodes
        children: Vec<RawNode>,
    },
    /// A raster image block
    Image {
        /// Bounding box in native units
        bbox: [f32; 4],
    },
    /// A straight vector line segment
    Line {
        /// Bounding box in native units
        bbox: [f32; 4],
    },
    /// A vector rectangle
    Rect {
        /// Bounding box in native units
        bbox: [f32; 4],
    },
    /// Any other vector path
    Curve {
        /// Bounding box in native units
        bbox: [f32; 4],
    },
}

/// A text line with its characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLine {
    /// Line bounding box in native units
    pub bbox: [f32; 4],
    /// Positioned characters; layout-only separators carry no geometry
    /// and are omitted from the dump
    #[serde(default)]
    pub chars: Vec<RawChar>,
}

/// A single positioned character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChar {
    /// Character text (usually one char, ligatures may carry more)
    pub text: String,
    /// Glyph bounding box in native units
    pub bbox: [f32; 4],
    /// Font size in native units
    pub size: f32,
    /// Font name as reported by the layout engine (e.g. "Times-Bold")
    #[serde(default)]
    pub font: String,
}

impl RawPage {
    /// Whether the page reports usable dimensions.
    pub fn has_geometry(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whether the page is wider than it is tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}
