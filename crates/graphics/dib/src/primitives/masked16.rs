use math::{Point, Rectangle};

use super::{
    generic, pixel_to_rgb_masks, rgb555::{dither_5bit, expand_5bit}, rgb_to_pixel_masks, Overlap,
    Primitives,
};
use crate::{dither::bayer_4x4, ColorRef, DibInfo, Rop2};

/// 16 bpp with arbitrary channel masks, most commonly 565
#[derive(Debug)]
pub struct Masked16;

impl Primitives for Masked16 {
    fn name(&self) -> &'static str {
        "16"
    }

    fn colorref_to_pixel(&self, dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        rgb_to_pixel_masks(dib, color.red(), color.green(), color.blue())
    }

    fn pixel_to_colorref(&self, dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        pixel_to_rgb_masks(dib, pixel)
    }

    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        generic::solid_rects_aligned::<2>(dib, rects, and, xor);
    }

    fn copy_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: Option<&DibInfo<'_>>,
        origin: Point,
        rop2: Rop2,
        overlap: Overlap,
    ) {
        generic::copy_rect_aligned::<2>(dst, rect, src, origin, rop2, overlap);
    }

    /// Gradients are dithered to 5 bits per channel regardless of the actual masks
    fn gradient_pixel(&self, dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
        let threshold = bayer_4x4(x, y);
        let [red, green, blue, _] =
            color.map(|channel| expand_5bit(dither_5bit(channel, threshold)));
        rgb_to_pixel_masks(dib, red, green, blue)
    }
}
