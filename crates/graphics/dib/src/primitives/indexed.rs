//! Kernels shared by the palette formats

use super::RopMasks;
use crate::{
    dither::{bayer_16x16, bayer_8x8},
    ColorRef, DibInfo, Rop2, Rgbquad,
};

pub(super) fn colorref_to_index(dib: &DibInfo<'_>, color: ColorRef) -> u32 {
    dib.nearest_color_index(color.red(), color.green(), color.blue())
}

pub(super) fn index_to_colorref(dib: &DibInfo<'_>, pixel: u32) -> ColorRef {
    dib.color_table()
        .get(pixel as usize)
        .map_or(ColorRef::BLACK, |entry| entry.to_colorref())
}

/// Gradients on palette formats are dithered to three levels per channel
pub(super) fn gradient_index(dib: &DibInfo<'_>, x: i32, y: i32, color: [u32; 4]) -> u32 {
    let threshold = bayer_16x16(x, y);
    let [red, green, blue, _] = color.map(|channel| (((channel >> 7) + threshold) / 256 * 127) as u8);
    colorref_to_index(dib, ColorRef::rgb(red, green, blue))
}

/// One of three levels for a channel at a position of the 8x8 dither matrix
fn dither_level(value: u8, threshold: u32) -> u8 {
    const LEVELS: [u8; 3] = [0, 0x80, 0xff];

    let scaled = u32::from(value) * 2 * 64;
    let base = scaled / (255 * 64);
    let remainder = scaled % (255 * 64);
    let level = base + u32::from(remainder * 2 > (2 * threshold + 1) * 255);
    LEVELS[level.min(2) as usize]
}

fn is_exact(table: &[Rgbquad], color: ColorRef) -> bool {
    table.iter().any(|entry| entry.to_colorref() == color)
}

/// Build an 8x8 ordered dither of `color` from the palette, if the palette lacks it
pub(super) fn dither_masks(dib: &DibInfo<'_>, rop2: Rop2, color: ColorRef) -> RopMasks {
    let funcs = dib.funcs();
    if !settings::get().dither_brushes || is_exact(dib.color_table(), color) {
        return RopMasks::solid(rop2, funcs.colorref_to_pixel(dib, color));
    }

    let codes = rop2.codes();
    let mut and = Vec::with_capacity(64);
    let mut xor = Vec::with_capacity(64);

    for y in 0..8 {
        for x in 0..8 {
            let threshold = bayer_8x8(x, y);
            let dithered = if dib.bit_count() == 1 {
                let luma = (30 * u32::from(color.red())
                    + 59 * u32::from(color.green())
                    + 11 * u32::from(color.blue()))
                    / 100;
                if luma > threshold * 4 + 2 {
                    ColorRef::WHITE
                } else {
                    ColorRef::BLACK
                }
            } else {
                ColorRef::rgb(
                    dither_level(color.red(), threshold),
                    dither_level(color.green(), threshold),
                    dither_level(color.blue(), threshold),
                )
            };

            let (pixel_and, pixel_xor) = codes.and_xor(funcs.colorref_to_pixel(dib, dithered));
            and.push(pixel_and);
            xor.push(pixel_xor);
        }
    }

    RopMasks {
        width: 8,
        height: 8,
        and: rop2.uses_dst().then_some(and),
        xor,
    }
}
