//! Caption merging.
//!
//! A caption-opening line ("Рисунок 3 — ...", "Таблица 1 ...") often wraps
//! onto following lines. This forward-scanning absorption loop merges them
//! into one box, bounded by font-size tolerance and a vertical-gap
//! threshold. It never looks backward and never crosses elements removed
//! earlier in the pipeline.

use crate::model::{BBox, Element};

/// Font sizes within this of the opener's still belong to the caption.
const SIZE_TOLERANCE: f32 = 0.5;

/// Absorb caption continuation lines starting at `start`.
///
/// `max_gap` is the largest allowed vertical gap between the running
/// caption bottom and the next line's top, in pixels. Returns the merged
/// box and the index of the first element not absorbed.
pub fn merge_caption(elements: &[&Element], start: usize, max_gap: f32) -> (BBox, usize) {
    let opener = elements[start];
    let opener_size = opener.font_size;
    let mut merged = opener.bbox;
    let mut next = start + 1;

    while next < elements.len() {
        let candidate = elements[next];
        if (candidate.font_size - opener_size).abs() >= SIZE_TOLERANCE {
            break;
        }
        let gap = candidate.bbox.y0 - merged.y1;
        if !(0.0..=max_gap).contains(&gap) {
            break;
        }
        merged.expand(&candidate.bbox);
        next += 1;
    }

    (merged, next)
}
