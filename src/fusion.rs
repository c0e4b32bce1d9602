//! Graphic fusion.
//!
//! Raster image blocks are opaque bitmaps: a photograph, a rendered
//! formula, and a chart all look the same to the layout engine. The
//! document generator therefore precedes each one with a reserved,
//! near-invisible marker glyph naming its category. This module scans the
//! element stream for those markers and pairs the Nth marker with the Nth
//! trailing image block; image blocks left without a marker default to
//! `picture`. Pairing by ordinal position is a known limitation of the
//! side channel: when counts diverge we pair best-effort in order and log
//! a warning rather than fail.

use crate::model::{BBox, Element, ElementKind};

/// Marker glyph for a rendered formula.
const FORMULA_MARKER: char = '~';
/// Marker glyph for a photograph.
const PICTURE_MARKER: char = '&';
/// Marker glyph for a chart.
const GRAPH_MARKER: char = '$';

/// Category assigned to a raster block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicKind {
    /// Photograph (the default for unmarked blocks)
    Picture,
    /// Rendered formula
    Formula,
    /// Chart
    Graph,
}

/// Classified raster boxes for one page.
#[derive(Debug, Default, Clone)]
pub struct FusionOutput {
    /// Photograph boxes
    pub picture: Vec<BBox>,
    /// Rendered formula boxes
    pub formula: Vec<BBox>,
    /// Chart boxes
    pub graph: Vec<BBox>,
}

/// Whether a line is purely a marker glyph (plus whitespace).
///
/// Such lines are the generator's side channel and are dropped before
/// classification; they must never become paragraphs or formula lines.
pub fn is_marker_only(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, FORMULA_MARKER | PICTURE_MARKER | GRAPH_MARKER) || c.is_whitespace())
}

/// Marker category carried by a text line, if any.
fn marker_kind(text: &str) -> Option<GraphicKind> {
    if text.contains(FORMULA_MARKER) {
        Some(GraphicKind::Formula)
    } else if text.contains(PICTURE_MARKER) {
        Some(GraphicKind::Picture)
    } else if text.contains(GRAPH_MARKER) {
        Some(GraphicKind::Graph)
    } else {
        None
    }
}

/// Pair marker glyphs with trailing image blocks and bucket the results.
///
/// `tables` lets us drop image blocks that are really table interiors;
/// those were already annotated by the table stage.
pub fn fuse_graphics(elements: &[Element], tables: &[BBox]) -> FusionOutput {
    let markers: Vec<GraphicKind> = elements
        .iter()
        .filter(|e| e.is_text() && is_marker_only(e.text()))
        .filter_map(|e| marker_kind(e.text()))
        .collect();

    let images: Vec<BBox> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Image)
        .map(|e| e.bbox)
        .filter(|b| !tables.iter().any(|t| b.overlaps(t)))
        .collect();

    if markers.len() != images.len() {
        log::warn!(
            "marker/image count mismatch: {} markers, {} image blocks; pairing in order",
            markers.len(),
            images.len()
        );
    }

    // The markers tag the *last* N images: an unmarked leading image (a
    // scan artifact, a logo) stays a picture.
    let offset = images.len().saturating_sub(markers.len());

    let mut out = FusionOutput::default();
    for (i, bbox) in images.into_iter().enumerate() {
        let kind = if i >= offset {
            markers.get(i - offset).copied().unwrap_or(GraphicKind::Picture)
        } else {
            GraphicKind::Picture
        };
        match kind {
            GraphicKind::Picture => out.picture.push(bbox),
            GraphicKind::Formula => out.formula.push(bbox),
            GraphicKind::Graph => out.graph.push(bbox),
        }
    }
    out
}
