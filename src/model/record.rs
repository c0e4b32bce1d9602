//! The per-page annotation record emitted to downstream converters.

use serde::{Deserialize, Serialize};

use super::BBox;

/// One page's annotation record.
///
/// Maps each region category to the pixel-space boxes detected for it.
/// Built once per page, serialized, never mutated afterward. Field order
/// matches the serialized key order downstream tooling expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Rendered image height in pixels
    pub image_height: u32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Relative path of the rendered page image
    pub image_path: String,
    /// Heading regions
    pub title: Vec<BBox>,
    /// Body text regions
    pub paragraph: Vec<BBox>,
    /// Table regions
    pub table: Vec<BBox>,
    /// Photographic image regions
    pub picture: Vec<BBox>,
    /// Table caption regions
    pub table_signature: Vec<BBox>,
    /// Figure caption regions
    pub picture_signature: Vec<BBox>,
    /// Numbered list regions
    pub numbered_list: Vec<BBox>,
    /// Bulleted list regions
    pub marked_list: Vec<BBox>,
    /// Page header region
    pub header: Vec<BBox>,
    /// Page footer region
    pub footer: Vec<BBox>,
    /// Footnote reference marks
    pub footnote: Vec<BBox>,
    /// Rendered formula regions
    pub formula: Vec<BBox>,
    /// Chart regions
    pub graph: Vec<BBox>,
}

impl AnnotationRecord {
    /// Create a record with every category empty.
    pub fn empty(image_width: u32, image_height: u32, image_path: String) -> Self {
        Self {
            image_height,
            image_width,
            image_path,
            title: Vec::new(),
            paragraph: Vec::new(),
            table: Vec::new(),
            picture: Vec::new(),
            table_signature: Vec::new(),
            picture_signature: Vec::new(),
            numbered_list: Vec::new(),
            marked_list: Vec::new(),
            header: Vec::new(),
            footer: Vec::new(),
            footnote: Vec::new(),
            formula: Vec::new(),
            graph: Vec::new(),
        }
    }

    /// All boxes across every category, for validation.
    pub fn all_boxes(&self) -> impl Iterator<Item = &BBox> {
        self.title
            .iter()
            .chain(&self.paragraph)
            .chain(&self.table)
            .chain(&self.picture)
            .chain(&self.table_signature)
            .chain(&self.picture_signature)
            .chain(&self.numbered_list)
            .chain(&self.marked_list)
            .chain(&self.header)
            .chain(&self.footer)
            .chain(&self.footnote)
            .chain(&self.formula)
            .chain(&self.graph)
    }

    /// Total number of annotated regions.
    pub fn region_count(&self) -> usize {
        self.all_boxes().count()
    }
}
