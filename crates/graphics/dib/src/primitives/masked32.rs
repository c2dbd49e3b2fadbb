use math::{Point, Rectangle};

use super::{generic, pixel_to_rgb_masks, rgb_to_pixel_masks, Overlap, Primitives};
use crate::{ColorRef, DibInfo, Rop2};

/// 32 bpp with arbitrary channel masks
#[derive(Debug)]
pub struct Masked32;

impl Primitives for Masked32 {
    fn name(&self) -> &'static str {
        "32"
    }

    fn colorref_to_pixel(&self, dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        rgb_to_pixel_masks(dib, color.red(), color.green(), color.blue())
    }

    fn pixel_to_colorref(&self, dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        pixel_to_rgb_masks(dib, pixel)
    }

    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        generic::solid_rects_aligned::<4>(dib, rects, and, xor);
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
        generic::copy_rect_aligned::<4>(dst, rect, src, origin, rop2, overlap);
    }
}
