use math::{Point, Rectangle};

use super::{
    generic, glyph, indexed, packed::PackedFormat, AaRanges, GammaRamp, Primitives, RopMasks,
};
use crate::{dither::bayer_16x16, ColorRef, DibInfo, Rop2};

/// Eight pixels per byte, the leftmost one in the most significant bit
#[derive(Debug)]
pub struct Mono;

/// Pick the bit for a pixel of another format
///
/// Dithering compares the luma against the 16x16 matrix. Without dithering, a palette
/// with a single entry marks the pixels equal to that entry, any other palette picks the
/// nearest entry.
fn mono_bit(
    dst: &DibInfo<'_>,
    dither: bool,
    position: (i32, i32),
    src_pixel: u32,
    background: Option<u32>,
    color: ColorRef,
) -> u32 {
    if dither {
        let luma = (30 * u32::from(color.red())
            + 59 * u32::from(color.green())
            + 11 * u32::from(color.blue()))
            / 100;
        return u32::from(luma + bayer_16x16(position.0, position.1) > 255);
    }

    match background {
        Some(background) => u32::from(src_pixel == background),
        None => indexed::colorref_to_index(dst, color),
    }
}

impl Primitives for Mono {
    fn name(&self) -> &'static str {
        "1"
    }

    fn colorref_to_pixel(&self, dib: &DibInfo<'_>, color: ColorRef) -> u32 {
        indexed::colorref_to_index(dib, color)
    }

    fn pixel_to_colorref(&self, dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
        indexed::index_to_colorref(dib, pixel)
    }

    fn solid_rects(&self, dib: &mut DibInfo<'_>, rects: &[Rectangle], and: u32, xor: u32) {
        for rect in rects {
            let (start, end) = (dib.column(rect.left), dib.column(rect.right));
            for y in rect.top..rect.bottom {
                PackedFormat::MONO.rop_run(dib.row_mut(y), start, end, and, xor);
            }
        }
    }

    fn gradient_pixel(&self, dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
        indexed::gradient_index(dib, x, y, color)
    }

    fn draw_glyph(
        &self,
        dst: &mut DibInfo<'_>,
        rect: &Rectangle,
        glyph: &DibInfo<'_>,
        origin: Point,
        text_pixel: u32,
        _ranges: &AaRanges,
    ) {
        glyph::draw_glyph_bilevel(dst, rect, glyph, origin, text_pixel);
    }

    fn draw_subpixel_glyph(
        &self,
        _dst: &mut DibInfo<'_>,
        _rect: &Rectangle,
        _glyph: &DibInfo<'_>,
        _origin: Point,
        _text_pixel: u32,
        _gamma: Option<&GammaRamp>,
    ) {
    }

    fn convert_to(
        &self,
        dst: &mut DibInfo<'_>,
        src: &DibInfo<'_>,
        src_rect: &Rectangle,
        dither: bool,
    ) {
        if dst.same_format(src) {
            generic::convert_to(dst, src, src_rect, dither);
            return;
        }

        let src_funcs = src.funcs();
        let background = match dst.color_table() {
            [entry] => Some(src_funcs.colorref_to_pixel(src, entry.to_colorref())),
            _ => None,
        };

        for y in 0..src_rect.height() {
            for x in 0..src_rect.width() {
                let (src_x, src_y) = (src_rect.left + x, src_rect.top + y);
                let pixel = src.read_pixel(src_x, src_y);
                let color = src_funcs.pixel_to_colorref(src, pixel);
                let bit = mono_bit(dst, dither, (x, y), pixel, background, color);
                dst.write_pixel(x, y, bit);
            }
        }
    }

    fn create_dither_masks(&self, dib: &DibInfo<'_>, rop2: Rop2, color: ColorRef) -> RopMasks {
        indexed::dither_masks(dib, rop2, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapInfo;

    #[test]
    fn dithering_follows_the_destination() {
        let mut src = DibInfo::allocate(&BitmapInfo::new(24, 8, 32)).unwrap();
        for y in 0..8 {
            for x in 0..24 {
                src.write_pixel(x, y, 0x0080_8080);
            }
        }

        let mut dst = DibInfo::allocate(&BitmapInfo::new(16, 4, 1)).unwrap();
        Mono.convert_to(&mut dst, &src, &Rectangle::new(5, 3, 21, 7), true);

        for y in 0..4 {
            for x in 0..16 {
                let expected = u32::from(128 + bayer_16x16(x, y) > 255);
                assert_eq!(dst.read_pixel(x, y), expected, "pixel at {x},{y}");
            }
        }
    }
}
