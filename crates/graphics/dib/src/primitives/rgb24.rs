use math::{Point, Rectangle};

use super::{generic, Overlap, Primitives};
use crate::{ColorRef, DibInfo, Rop2};

/// Three bytes per pixel in blue, green, red order
#[derive(Debug)]
pub struct Rgb24;

impl Primitives for Rgb24 {
    fn name(&self) -> &'static str {
        "24"
    }

    fn colorref_to_pixel(&self, _dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        u32::from(color.red()) << 16 | u32::from(color.green()) << 8 | u32::from(color.blue())
    }

    fn pixel_to_colorref(&self, _dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        ColorRef::rgb((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
    }

    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        generic::solid_rects_aligned::<3>(dib, rects, and, xor);
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
        generic::copy_rect_aligned::<3>(dst, rect, src, origin, rop2, overlap);
    }
}
