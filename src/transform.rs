//! Coordinate conversion between native page space and raster pixel space.
//!
//! Native page coordinates have their origin at the bottom-left corner in
//! document units; the rendered training image has its origin at the
//! top-left corner in pixels. Every geometry value passes through here
//! exactly once, before it reaches any other pipeline stage.

use crate::model::BBox;

/// Convert a native bottom-left-origin box into pixel space.
///
/// `page_height_px` is the rendered image height and `scale` the ratio of
/// target DPI to native DPI. Output ordering is normalized even when the
/// native box was inverted, and coordinates are clamped to the image.
pub fn to_pixel_space(native: BBox, page_height_px: f32, page_width_px: f32, scale: f32) -> BBox {
    let x0 = native.x0 * scale;
    let x1 = native.x1 * scale;
    // The vertical axis flips: the native top edge becomes the pixel y0.
    let y0 = page_height_px - native.y1 * scale;
    let y1 = page_height_px - native.y0 * scale;
    BBox::new(x0, y0, x1, y1).clamp(page_width_px, page_height_px)
}

/// Convert a raw `[x0, y0, x1, y1]` native box into pixel space.
pub fn raw_to_pixel_space(
    raw: [f32; 4],
    page_height_px: f32,
    page_width_px: f32,
    scale: f32,
) -> BBox {
    to_pixel_space(BBox::new(raw[0], raw[1], raw[2], raw[3]), page_height_px, page_width_px, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_and_scale() {
        // A 100x200 native page at scale 2 => 200x400 px image.
        let native = BBox::new(10.0, 150.0, 60.0, 190.0);
        let px = to_pixel_space(native, 400.0, 200.0, 2.0);
        assert_eq!(px, BBox::new(20.0, 20.0, 120.0, 100.0));
    }

    #[test]
    fn test_top_of_native_page_maps_to_pixel_origin() {
        let native = BBox::new(0.0, 190.0, 100.0, 200.0);
        let px = to_pixel_space(native, 400.0, 200.0, 2.0);
        assert_eq!(px.y0, 0.0);
        assert_eq!(px.y1, 20.0);
    }

    #[test]
    fn test_inverted_native_box_is_normalized() {
        // y0 > y1 in native units still yields y0 < y1 in pixels.
        let native = BBox { x0: 10.0, y0: 190.0, x1: 60.0, y1: 150.0 };
        let px = to_pixel_space(BBox::new(native.x0, native.y0, native.x1, native.y1), 400.0, 200.0, 2.0);
        assert!(px.y0 < px.y1);
    }

    #[test]
    fn test_out_of_page_coordinates_are_clamped() {
        let native = BBox::new(-5.0, -10.0, 150.0, 250.0);
        let px = to_pixel_space(native, 400.0, 200.0, 2.0);
        assert_eq!(px, BBox::new(0.0, 0.0, 200.0, 400.0));
    }
}
