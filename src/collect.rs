//! Page element collection.
//!
//! Walks a page's raw layout tree into normalized [`Element`] records in
//! the layout engine's emission order, aggregating per-line font metadata
//! and feeding the page's font-size statistics as a side effect. Nested
//! figure containers are traversed with an explicit worklist, so traversal
//! order is deterministic and recursion depth is never a concern.

use std::collections::HashMap;

use crate::fusion::is_marker_only;
use crate::model::{BBox, Element, ElementKind, RawChar, RawLine, RawNode, RawPage};

/// Font size statistics for one page.
///
/// Body text size is taken as the mode of observed sizes, not the mean: a
/// page with a few large headings would drag a mean upward, while the most
/// frequent size stays pinned to the running text.
#[derive(Debug, Clone, Default)]
pub struct FontStats {
    /// Observed sizes, rounded to 0.1, with frequency
    histogram: HashMap<i32, usize>,
}

impl FontStats {
    /// Record one line's font size.
    pub fn add_size(&mut self, size: f32) {
        let key = (size * 10.0).round() as i32;
        *self.histogram.entry(key).or_insert(0) += 1;
    }

    /// Number of recorded sizes.
    pub fn sample_count(&self) -> usize {
        self.histogram.values().sum()
    }

    /// The most frequent font size, or `None` when nothing was recorded.
    ///
    /// Ties break toward the larger size so repeated headings on a sparse
    /// page do not flip the pivot nondeterministically.
    pub fn body_size(&self) -> Option<f32> {
        self.histogram
            .iter()
            .max_by_key(|(key, count)| (**count, **key))
            .map(|(key, _)| *key as f32 / 10.0)
    }
}

/// Walk the raw layout tree of one page into normalized elements.
///
/// Text lines with no extractable characters are dropped silently. The
/// returned statistics cover every surviving text line except generator
/// marker lines, whose tiny glyph sizes would skew the body-size mode on
/// sparse pages.
pub fn collect_page(raw: &RawPage) -> (Vec<Element>, FontStats) {
    let mut elements = Vec::new();
    let mut stats = FontStats::default();

    // Stack-based preorder traversal; children pushed in reverse so the
    // emission order of the source tree is preserved.
    let mut worklist: Vec<&RawNode> = raw.nodes.iter().rev().collect();
    while let Some(node) = worklist.pop() {
        match node {
            RawNode::TextBox { lines } => {
                for line in lines {
                    if let Some(element) = collect_line(line) {
                        if !is_marker_only(element.text()) {
                            stats.add_size(element.font_size);
                        }
                        elements.push(element);
                    }
                }
            }
            RawNode::Figure { children } => {
                for child in children.iter().rev() {
                    worklist.push(child);
                }
            }
            RawNode::Image { bbox } => {
                elements.push(Element::graphic(ElementKind::Image, BBox::from(*bbox)));
            }
            RawNode::Line { bbox } | RawNode::Rect { bbox } | RawNode::Curve { bbox } => {
                elements.push(Element::graphic(ElementKind::Vector, BBox::from(*bbox)));
            }
        }
    }

    (elements, stats)
}

/// Aggregate one raw line into an element, or `None` if nothing is there.
fn collect_line(line: &RawLine) -> Option<Element> {
    if line.chars.is_empty() {
        return None;
    }

    let mut text = String::new();
    let mut glyphs = Vec::new();
    let mut size_sum = 0.0;
    let mut is_bold = false;
    let mut is_italic = false;

    for ch in &line.chars {
        let (bold, italic) = font_style_hints(&ch.font);
        is_bold |= bold;
        is_italic |= italic;
        size_sum += ch.size;
        push_glyphs(ch, &mut text, &mut glyphs);
    }

    if text.trim().is_empty() {
        return None;
    }

    Some(Element {
        text: Some(text),
        bbox: BBox::from(line.bbox),
        font_size: size_sum / line.chars.len() as f32,
        is_bold,
        is_italic,
        kind: ElementKind::Text,
        glyphs,
    })
}

/// Append a raw char's text, keeping one glyph box per `char`.
///
/// Ligature characters report several chars under one box; repeating the
/// box keeps `glyphs` parallel to `text.chars()`.
fn push_glyphs(ch: &RawChar, text: &mut String, glyphs: &mut Vec<BBox>) {
    let bbox = BBox::from(ch.bbox);
    for c in ch.text.chars() {
        text.push(c);
        glyphs.push(bbox);
    }
}

/// Bold/italic hints from a font name.
fn font_style_hints(font_name: &str) -> (bool, bool) {
    let name = font_name.to_lowercase();
    let bold = name.contains("bold") || name.contains("black") || name.contains("heavy");
    let italic = name.contains("italic") || name.contains("oblique");
    (bold, italic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_char(text: &str, x0: f32, size: f32, font: &str) -> RawChar {
        RawChar {
            text: text.to_string(),
            bbox: [x0, 100.0, x0 + 6.0, 100.0 + size],
            size,
            font: font.to_string(),
        }
    }

    fn text_box(lines: Vec<RawLine>) -> RawNode {
        RawNode::TextBox { lines }
    }

    #[test]
    fn test_line_aggregation() {
        let line = RawLine {
            bbox: [10.0, 100.0, 40.0, 112.0],
            chars: vec![
                raw_char("A", 10.0, 12.0, "Times-Bold"),
                raw_char("b", 16.0, 12.0, "Times-Roman"),
                raw_char("c", 22.0, 13.0, "Times-Italic"),
            ],
        };
        let element = collect_line(&line).unwrap();
        assert_eq!(element.text(), "Abc");
        assert!(element.is_bold);
        assert!(element.is_italic);
        assert!((element.font_size - 37.0 / 3.0).abs() < 1e-4);
        assert_eq!(element.glyphs.len(), 3);
    }

    #[test]
    fn test_empty_lines_dropped() {
        let page = RawPage {
            width: 100.0,
            height: 100.0,
            nodes: vec![text_box(vec![
                RawLine { bbox: [0.0, 0.0, 1.0, 1.0], chars: vec![] },
                RawLine {
                    bbox: [0.0, 0.0, 1.0, 1.0],
                    chars: vec![raw_char(" ", 0.0, 10.0, "F")],
                },
            ])],
        };
        let (elements, stats) = collect_page(&page);
        assert!(elements.is_empty());
        assert_eq!(stats.sample_count(), 0);
    }

    #[test]
    fn test_nested_figures_traverse_in_order() {
        let page = RawPage {
            width: 100.0,
            height: 100.0,
            nodes: vec![
                RawNode::Figure {
                    children: vec![
                        RawNode::Image { bbox: [0.0, 0.0, 10.0, 10.0] },
                        RawNode::Figure {
                            children: vec![RawNode::Image { bbox: [20.0, 0.0, 30.0, 10.0] }],
                        },
                    ],
                },
                RawNode::Rect { bbox: [40.0, 0.0, 50.0, 10.0] },
            ],
        };
        let (elements, _) = collect_page(&page);
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].kind, ElementKind::Image);
        assert_eq!(elements[0].bbox.x0, 0.0);
        assert_eq!(elements[1].bbox.x0, 20.0);
        assert_eq!(elements[2].kind, ElementKind::Vector);
    }

    #[test]
    fn test_font_stats_mode() {
        let mut stats = FontStats::default();
        for _ in 0..50 {
            stats.add_size(12.0);
        }
        for _ in 0..5 {
            stats.add_size(18.0);
        }
        assert_eq!(stats.body_size(), Some(12.0));
        assert_eq!(FontStats::default().body_size(), None);
    }

    #[test]
    fn test_marker_lines_kept_but_excluded_from_stats() {
        let page = RawPage {
            width: 595.0,
            height: 842.0,
            nodes: vec![text_box(vec![
                RawLine {
                    bbox: [500.0, 700.0, 502.0, 701.0],
                    chars: vec![raw_char("~", 500.0, 1.0, "F")],
                },
                RawLine {
                    bbox: [500.0, 600.0, 502.0, 601.0],
                    chars: vec![raw_char("$", 500.0, 1.0, "F")],
                },
                RawLine {
                    bbox: [72.0, 400.0, 300.0, 412.0],
                    chars: vec![raw_char("A", 72.0, 12.0, "Times-Bold")],
                },
            ])],
        };
        let (elements, stats) = collect_page(&page);
        // Markers survive for graphic pairing but never feed the mode.
        assert_eq!(elements.len(), 3);
        assert_eq!(stats.sample_count(), 1);
        assert_eq!(stats.body_size(), Some(12.0));
    }

    #[test]
    fn test_font_stats_tie_breaks_larger() {
        let mut stats = FontStats::default();
        stats.add_size(10.0);
        stats.add_size(14.0);
        assert_eq!(stats.body_size(), Some(14.0));
    }

    #[test]
    fn test_ligature_glyphs_stay_parallel_to_chars() {
        let line = RawLine {
            bbox: [0.0, 0.0, 20.0, 12.0],
            chars: vec![raw_char("ffi", 0.0, 12.0, "Times-Roman")],
        };
        let element = collect_line(&line).unwrap();
        assert_eq!(element.text().chars().count(), element.glyphs.len());
    }
}
