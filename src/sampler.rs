// Mask sampler: "what colour is the mask under this tap?"
// Visual expectation: tapping inside the red blob of a mask returns red; tapping
// on the (transparent) background or outside the image returns transparent.

use crate::types::Color;
use image::RgbaImage;

/// Colour of the single pixel under (x, y) in the buffer's own coordinates.
/// Sub-pixel coordinates pick the pixel that contains them (nearest, no blending),
/// so region edges stay discrete. Anything outside [0,w) x [0,h) is transparent.
pub fn color_at(buffer: &RgbaImage, x: f32, y: f32) -> Color {
    // NaN fails both comparisons and lands here too.
    if !(x >= 0.0 && y >= 0.0) {
        return Color::TRANSPARENT;
    }
    let (px, py) = (x.floor(), y.floor());
    if px >= buffer.width() as f32 || py >= buffer.height() as f32 {
        return Color::TRANSPARENT;
    }

    buffer
        .get_pixel_checked(px as u32, py as u32)
        .map_or(Color::TRANSPARENT, |p| Color::from(*p))
}

/// Translate a position inside a view of `view_size` into the coordinate space of a
/// buffer of `buffer_size` (plain proportional scaling, origin top-left).
/// With identical sizes this is a passthrough, which is the normal case because the
/// original and mask share one frame.
pub fn map_to_buffer(
    pos: (f32, f32),
    view_size: (usize, usize),
    buffer_size: (u32, u32),
) -> (f32, f32) {
    let (vw, vh) = view_size;
    let (bw, bh) = buffer_size;
    if vw == 0 || vh == 0 {
        // Nothing on screen: push the tap out of bounds.
        return (-1.0, -1.0);
    }
    if vw == bw as usize && vh == bh as usize {
        return pos;
    }
    (
        pos.0 * bw as f32 / vw as f32,
        pos.1 * bh as f32 / vh as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // 4x2 mask: left half red, right half transparent, bottom-right pixel green.
    fn mask() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 0]));
        for y in 0..2 {
            for x in 0..2 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        img.put_pixel(3, 1, Rgba([0, 255, 0, 255]));
        img
    }

    #[test]
    fn samples_the_pixel_under_the_point() {
        let m = mask();
        assert_eq!(color_at(&m, 0.0, 0.0), Color::RED);
        assert_eq!(color_at(&m, 3.0, 1.0), Color::GREEN);
        assert_eq!(color_at(&m, 2.0, 0.0), Color::TRANSPARENT);
    }

    #[test]
    fn sub_pixel_coordinates_use_the_containing_pixel() {
        let m = mask();
        // 1.99 is still inside the red column x=1, 2.01 is in the transparent one.
        assert_eq!(color_at(&m, 1.99, 0.5), Color::RED);
        assert_eq!(color_at(&m, 2.01, 0.5), Color::TRANSPARENT);
        assert_eq!(color_at(&m, 3.7, 1.9), Color::GREEN);
    }

    #[test]
    fn out_of_bounds_is_transparent() {
        let m = mask();
        for (x, y) in [
            (-0.5, 0.0),
            (0.0, -0.01),
            (4.0, 0.0),
            (0.0, 2.0),
            (100.0, 100.0),
            (f32::NAN, 1.0),
            (1.0, f32::INFINITY),
        ] {
            assert_eq!(color_at(&m, x, y).a, 0, "({x}, {y}) should miss");
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let m = mask();
        assert_eq!(color_at(&m, 1.5, 1.5), color_at(&m, 1.5, 1.5));
    }

    #[test]
    fn same_size_mapping_is_passthrough() {
        assert_eq!(map_to_buffer((12.5, 7.0), (100, 50), (100, 50)), (12.5, 7.0));
    }

    #[test]
    fn scaled_view_maps_proportionally() {
        assert_eq!(map_to_buffer((50.0, 25.0), (200, 100), (100, 50)), (25.0, 12.5));
        assert_eq!(map_to_buffer((1.0, 1.0), (0, 10), (100, 50)), (-1.0, -1.0));
    }
}
