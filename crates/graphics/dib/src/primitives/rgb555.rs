use math::{Point, Rectangle};

use super::{generic, Overlap, Primitives};
use crate::{dither::bayer_4x4, ColorRef, DibInfo, Rop2};

/// 16 bpp with five bits per channel
#[derive(Debug)]
pub struct Rgb555;

/// Quantize a 16 bit gradient channel to 5 bits with 4x4 ordered dithering
#[inline]
pub(super) fn dither_5bit(channel: u32, threshold: u32) -> u32 {
    ((channel / 128 + threshold) / 16).min(31)
}

/// Widen a 5 bit channel to 8 bits
#[inline]
pub(super) fn expand_5bit(value: u32) -> u8 {
    (value << 3 | value >> 2) as u8
}

impl Primitives for Rgb555 {
    fn name(&self) -> &'static str {
        "555"
    }

    fn colorref_to_pixel(&self, _dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        (u32::from(color.red()) << 7 & 0x7c00)
            | (u32::from(color.green()) << 2 & 0x03e0)
            | u32::from(color.blue()) >> 3
    }

    fn pixel_to_colorref(&self, _dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        ColorRef::rgb(
            expand_5bit(pixel >> 10 & 0x1f),
            expand_5bit(pixel >> 5 & 0x1f),
            expand_5bit(pixel & 0x1f),
        )
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

    fn gradient_pixel(&self, _dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
        let threshold = bayer_4x4(x, y);
        let [red, green, blue, _] = color.map(|channel| dither_5bit(channel, threshold));
        red << 10 | green << 5 | blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_bit_channels() {
        assert_eq!(expand_5bit(0x1f), 0xff);
        assert_eq!(expand_5bit(0x10), 0x84);
        assert_eq!(dither_5bit(0xffff, 15), 31);
        assert_eq!(dither_5bit(0, 15), 0);
    }
}
