use math::{Point, Rectangle};

use super::{blend, generic, BlendFunction, Overlap, Primitives};
use crate::{ColorRef, DibInfo, Rop2};

/// 32 bpp with an alpha channel in the top byte
#[derive(Debug)]
pub struct Argb8888;

impl Primitives for Argb8888 {
    fn name(&self) -> &'static str {
        "8888"
    }

    fn colorref_to_pixel(&self, _dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        u32::from(color.red()) << 16 | u32::from(color.green()) << 8 | u32::from(color.blue())
    }

    fn pixel_to_colorref(&self, _dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        ColorRef::rgb((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
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

    fn blend_rect(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        src: &DibInfo<'_>,
        origin: Point,
        blend: BlendFunction,
    ) {
        blend::blend_rect_8888(dst, rect, src, origin, blend);
    }

    fn gradient_pixel(&self, _dib: &DibInfo<'_>, _x: i32, _y: i32, color: [u32; 4]) -> u32 {
        let [red, green, blue, alpha] = color.map(|channel| channel >> 8);
        alpha << 24 | red << 16 | green << 8 | blue
    }
}
