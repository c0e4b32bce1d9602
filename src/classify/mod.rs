//! Region classification.
//!
//! The classifier walks a page's text elements strictly in emission order,
//! threading a [`ClassifierState`] value through a fixed rule ladder. Per
//! element the topmost matching rule wins:
//!
//! 1. header/footer bands
//! 2. bracketed footnote references (tight glyph spans, non-consuming)
//! 3. list item markers (open or continue a run)
//! 4. wrapped list continuation lines
//! 5. figure/table caption openers (forward absorption)
//! 6. formula lines
//! 7. titles (oversized + bold/italic)
//! 8. paragraph fallback with column clustering
//!
//! Elements removed by the table stage never reach this module, and
//! marker-glyph lines from the generator side channel are filtered out
//! before the ladder runs.

mod caption;
mod state;

pub use state::{ClassifierState, ListKind, ListRun, ParagraphRun, RegionOutput};

use crate::fusion::is_marker_only;
use crate::model::{BBox, Element, PageLayout};
use crate::options::{AnnotateOptions, Patterns};

/// Wrapped continuation lines may sit this far below the previous line,
/// as a fraction of line height.
const WRAP_GAP_RATIO: f32 = 0.18;

/// New marker items may sit this far below the previous item,
/// as a fraction of line height.
const ITEM_GAP_RATIO: f32 = 2.0;

/// Lines may overlap the previous line's descender by this much,
/// as a fraction of line height.
const OVERLAP_RATIO: f32 = 0.25;

/// Rule-ordered region classifier for one page.
pub struct RegionClassifier<'a> {
    options: &'a AnnotateOptions,
    patterns: &'a Patterns,
    page_width: f32,
    page_height: f32,
    landscape: bool,
    /// Body text size in native units (per-page mode)
    body_size: f32,
    scale: f32,
}

impl<'a> RegionClassifier<'a> {
    /// Create a classifier for the given page.
    ///
    /// `body_size` is the page's most frequent font size in native units;
    /// callers short-circuit pages where no size was collected instead of
    /// classifying against a degenerate pivot.
    pub fn new(
        options: &'a AnnotateOptions,
        patterns: &'a Patterns,
        page: &PageLayout,
        body_size: f32,
    ) -> Self {
        Self {
            options,
            patterns,
            page_width: page.width,
            page_height: page.height,
            landscape: page.landscape,
            body_size,
            scale: options.scale(),
        }
    }

    /// Classify the page's elements into region boxes.
    pub fn classify(&self, elements: &[Element]) -> RegionOutput {
        let text: Vec<&Element> = elements
            .iter()
            .filter(|e| e.is_text() && !e.text().trim().is_empty())
            .filter(|e| !is_marker_only(e.text()))
            .collect();

        let mut out = RegionOutput::default();
        let mut state = ClassifierState::default();
        let mut idx = 0;

        while idx < text.len() {
            let element = text[idx];

            if self.in_header_band(&element.bbox) {
                state.flush_all(&mut out);
                out.header_lines.push(element.bbox);
                idx += 1;
                continue;
            }
            if self.in_footer_band(&element.bbox) {
                state.flush_all(&mut out);
                out.footer_lines.push(element.bbox);
                idx += 1;
                continue;
            }

            self.emit_footnote_marks(element, &mut out);

            if self.list_step(&mut state, element, &mut out) {
                idx += 1;
                continue;
            }
            if let Some(next) = self.caption_step(&text, idx, &mut state, &mut out) {
                idx = next;
                continue;
            }
            if self.is_formula_line(element) {
                state.flush_paragraph(&mut out);
                out.formula.push(element.bbox);
                idx += 1;
                continue;
            }
            if self.is_title(element) {
                state.flush_paragraph(&mut out);
                out.title.push(element.bbox);
                idx += 1;
                continue;
            }

            self.paragraph_step(&mut state, element, &mut out);
            idx += 1;
        }

        state.flush_all(&mut out);
        out
    }

    fn header_fraction(&self) -> f32 {
        // Landscape pages crop differently, so the band is wider.
        if self.landscape {
            0.10
        } else {
            0.05
        }
    }

    fn in_header_band(&self, bbox: &BBox) -> bool {
        bbox.y0 <= self.page_height * self.header_fraction()
    }

    fn in_footer_band(&self, bbox: &BBox) -> bool {
        bbox.y1 >= self.page_height * (1.0 - self.header_fraction())
    }

    /// Rule 2: emit a tight box per bracketed footnote reference.
    ///
    /// The box spans from the `[` glyph to the `]` glyph, not the whole
    /// line. Non-consuming: the line continues down the ladder.
    fn emit_footnote_marks(&self, element: &Element, out: &mut RegionOutput) {
        let text = element.text();
        if element.glyphs.len() != text.chars().count() {
            return;
        }
        for m in self.patterns.footnote.find_iter(text) {
            let start = text[..m.start()].chars().count();
            let len = m.as_str().chars().count();
            let end = start + len;
            if end > element.glyphs.len() {
                continue;
            }
            out.footnote
                .push(element.glyphs[start].union(&element.glyphs[end - 1]));
        }
    }

    /// Rules 3-4: marker lines and wrapped continuation lines.
    ///
    /// Returns true when the element was consumed by a list run. On
    /// continuation failure the run is flushed and the element falls
    /// through to the remaining rules.
    fn list_step(
        &self,
        state: &mut ClassifierState,
        element: &Element,
        out: &mut RegionOutput,
    ) -> bool {
        if let Some(kind) = self.marker_kind(element.text()) {
            state.flush_paragraph(out);
            if let Some(run) = state.list.as_mut() {
                if run.kind == kind && self.marker_continues(run, element) {
                    run.absorb(element);
                    return true;
                }
            }
            // Opening a new run, or a new list of the other kind, closes
            // whatever was accumulating.
            state.flush_list(out);
            state.list = Some(ListRun::open(kind, element));
            return true;
        }

        let absorbed = match state.list.as_mut() {
            Some(run) if self.wrap_continues(run, element) => {
                if run.indent.is_none() {
                    run.indent = Some(element.bbox.x0 - run.marker_x);
                }
                run.absorb(element);
                true
            }
            Some(_) => false,
            None => return false,
        };
        if absorbed {
            return true;
        }
        state.flush_list(out);
        false
    }

    fn marker_kind(&self, text: &str) -> Option<ListKind> {
        if self.patterns.numbered.is_match(text) {
            Some(ListKind::Numbered)
        } else if self.patterns.bullet.is_match(text) {
            Some(ListKind::Marked)
        } else {
            None
        }
    }

    /// A further marker line continues the run when it keeps the marker
    /// column, stays close vertically, and keeps the item font size.
    fn marker_continues(&self, run: &ListRun, element: &Element) -> bool {
        let font_px = element.font_size * self.scale;
        let gap = element.bbox.y0 - run.last_bottom;
        (element.bbox.x0 - run.marker_x).abs() <= 0.5 * font_px
            && gap >= -OVERLAP_RATIO * run.line_height
            && gap <= ITEM_GAP_RATIO * run.line_height
            && element.font_size.round() as i32 == run.font_size_key
    }

    /// A wrapped line (no marker) continues the current item when its
    /// left edge sits in the indent band, the vertical gap is small, and
    /// the font size matches.
    fn wrap_continues(&self, run: &ListRun, element: &Element) -> bool {
        if element.font_size.round() as i32 != run.font_size_key {
            return false;
        }
        let gap = element.bbox.y0 - run.last_bottom;
        if gap < -OVERLAP_RATIO * run.line_height || gap > WRAP_GAP_RATIO * run.line_height {
            return false;
        }
        let font_px = element.font_size * self.scale;
        let offset = element.bbox.x0 - run.marker_x;
        match run.indent {
            // First wrapped line establishes the indent: text start sits
            // just past the marker glyph.
            None => offset >= 0.0 && offset <= 3.0 * font_px,
            Some(indent) => (offset - indent).abs() <= 0.6 * font_px,
        }
    }

    /// Rule 5: caption openers start a forward absorption run.
    fn caption_step(
        &self,
        text: &[&Element],
        idx: usize,
        state: &mut ClassifierState,
        out: &mut RegionOutput,
    ) -> Option<usize> {
        let line = text[idx].text();
        let is_figure = self.patterns.figure_caption.is_match(line);
        let is_table = !is_figure && self.patterns.table_caption.is_match(line);
        if !is_figure && !is_table {
            return None;
        }
        state.flush_all(out);
        let max_gap = 2.0 * self.body_size * self.scale;
        let (bbox, next) = caption::merge_caption(text, idx, max_gap);
        if is_figure {
            out.picture_signature.push(bbox);
        } else {
            out.table_signature.push(bbox);
        }
        Some(next)
    }

    /// Rule 6: a formula keyword line, or a symbol-only line centered on
    /// the page. The associated raster block is classified by fusion.
    fn is_formula_line(&self, element: &Element) -> bool {
        let text = element.text();
        if text
            .trim_start()
            .to_lowercase()
            .starts_with(&self.patterns.formula_keyword)
        {
            return true;
        }
        let symbol_only = !text.chars().any(|c| c.is_alphanumeric());
        let centered = (element.bbox.center_x() - self.page_width / 2.0).abs()
            <= self.options.center_tolerance;
        symbol_only && centered
    }

    /// Rule 7: oversized and emphasized.
    fn is_title(&self, element: &Element) -> bool {
        element.font_size >= self.body_size + self.options.title_size_delta
            && (element.is_bold || element.is_italic)
    }

    /// Rule 8: paragraph fallback with column clustering. A vertical jump
    /// larger than the column gap starts a new cluster so unrelated
    /// columns never merge into one giant box.
    fn paragraph_step(
        &self,
        state: &mut ClassifierState,
        element: &Element,
        out: &mut RegionOutput,
    ) {
        let gap_limit = self.options.column_gap * self.scale;
        match state.paragraph.as_mut() {
            Some(run) if (element.bbox.y0 - run.last_top).abs() <= gap_limit => {
                run.absorb(element);
            }
            Some(_) => {
                state.flush_paragraph(out);
                state.paragraph = Some(ParagraphRun::open(element));
            }
            None => state.paragraph = Some(ParagraphRun::open(element)),
        }
    }
}
