//! Classifier state threaded through the rule ladder.
//!
//! All mutable classification state lives in [`ClassifierState`]; the rule
//! functions take it explicitly and emit finished boxes into
//! [`RegionOutput`]. Nothing survives a page: the pipeline constructs a
//! fresh state per page, so no classification can leak across pages.

use crate::model::{BBox, Element};

/// Which kind of list a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Items opened by "1." / "2)" markers
    Numbered,
    /// Items opened by a bullet glyph
    Marked,
}

/// An in-progress list accumulator.
#[derive(Debug, Clone)]
pub struct ListRun {
    /// List kind
    pub kind: ListKind,
    /// Running union of every merged line
    pub bbox: BBox,
    /// Left edge of the opening marker line
    pub marker_x: f32,
    /// Bottom edge of the last merged line
    pub last_bottom: f32,
    /// Height of the last merged line
    pub line_height: f32,
    /// Rounded font size the run was established with
    pub font_size_key: i32,
    /// Wrapped-line indent, established by the first continuation line
    pub indent: Option<f32>,
}

impl ListRun {
    /// Open a run from a marker line.
    pub fn open(kind: ListKind, element: &Element) -> Self {
        Self {
            kind,
            bbox: element.bbox,
            marker_x: element.bbox.x0,
            last_bottom: element.bbox.y1,
            line_height: element.bbox.height(),
            font_size_key: element.font_size.round() as i32,
            indent: None,
        }
    }

    /// Merge one more line into the run.
    pub fn absorb(&mut self, element: &Element) {
        self.bbox.expand(&element.bbox);
        self.last_bottom = element.bbox.y1;
        self.line_height = element.bbox.height();
    }
}

/// An in-progress paragraph accumulator.
#[derive(Debug, Clone)]
pub struct ParagraphRun {
    /// Running union of merged lines
    pub bbox: BBox,
    /// Top edge of the most recent line, for column clustering
    pub last_top: f32,
}

impl ParagraphRun {
    /// Start a paragraph from one line.
    pub fn open(element: &Element) -> Self {
        Self {
            bbox: element.bbox,
            last_top: element.bbox.y0,
        }
    }

    /// Merge one more line.
    pub fn absorb(&mut self, element: &Element) {
        self.bbox.expand(&element.bbox);
        self.last_top = element.bbox.y0;
    }
}

/// Transient, page-scoped classifier state.
#[derive(Debug, Default)]
pub struct ClassifierState {
    /// Paragraph being grown, if any
    pub paragraph: Option<ParagraphRun>,
    /// List being grown, if any
    pub list: Option<ListRun>,
}

impl ClassifierState {
    /// Emit and clear the open list, if any.
    pub fn flush_list(&mut self, out: &mut RegionOutput) {
        if let Some(run) = self.list.take() {
            match run.kind {
                ListKind::Numbered => out.numbered_list.push(run.bbox),
                ListKind::Marked => out.marked_list.push(run.bbox),
            }
        }
    }

    /// Emit and clear the open paragraph, if any.
    pub fn flush_paragraph(&mut self, out: &mut RegionOutput) {
        if let Some(run) = self.paragraph.take() {
            out.paragraph.push(run.bbox);
        }
    }

    /// Emit and clear every open accumulator.
    pub fn flush_all(&mut self, out: &mut RegionOutput) {
        self.flush_list(out);
        self.flush_paragraph(out);
    }
}

/// Boxes emitted by the classifier, per category.
///
/// Header and footer keep their individual line boxes here; the assembler
/// unions them into one box per page.
#[derive(Debug, Default, Clone)]
pub struct RegionOutput {
    /// Heading boxes
    pub title: Vec<BBox>,
    /// Paragraph boxes
    pub paragraph: Vec<BBox>,
    /// Numbered list boxes
    pub numbered_list: Vec<BBox>,
    /// Marked list boxes
    pub marked_list: Vec<BBox>,
    /// Table caption boxes
    pub table_signature: Vec<BBox>,
    /// Figure caption boxes
    pub picture_signature: Vec<BBox>,
    /// Tight footnote reference boxes
    pub footnote: Vec<BBox>,
    /// Formula line boxes
    pub formula: Vec<BBox>,
    /// Individual header line boxes
    pub header_lines: Vec<BBox>,
    /// Individual footer line boxes
    pub footer_lines: Vec<BBox>,
}
