//! Compositing of antialiased and subpixel glyphs
//!
//! Antialiased glyphs use 17 coverage levels. A level does not blend linearly between
//! the destination and the text color, instead it narrows the range of intensities the
//! destination may keep, which follows how hinted outlines darken against light
//! backgrounds and lighten against dark ones.

use math::{Point, Rectangle};

use super::blend::blend_color;
use crate::{ColorRef, DibInfo};

const RAMP: [u8; 17] = [
    0, 0x4d, 0x68, 0x7c, 0x8c, 0x9a, 0xa7, 0xb2, 0xbd, 0xc7, 0xd0, 0xd9, 0xe1, 0xe9, 0xf0, 0xf8,
    0xff,
];

/// The intensities a channel may take at one coverage level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntensityRange {
    pub min: u8,
    pub max: u8,
}

impl IntensityRange {
    fn new(level: usize, text: u8) -> Self {
        let text = u32::from(text);
        let low = u32::from(RAMP[level]);
        let high = u32::from(RAMP[16 - level]);

        Self {
            min: (low * text / 0xff) as u8,
            max: (high + (0xff - high) * text / 0xff) as u8,
        }
    }
}

/// Per level intensity ranges of the red, green and blue channel for one text color
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AaRanges {
    levels: [[IntensityRange; 3]; 17],
}

impl AaRanges {
    #[must_use]
    pub fn new(text: ColorRef) -> Self {
        let mut levels = [[IntensityRange::default(); 3]; 17];
        for (level, ranges) in levels.iter_mut().enumerate() {
            *ranges = [text.red(), text.green(), text.blue()]
                .map(|channel| IntensityRange::new(level, channel));
        }
        Self { levels }
    }

    #[must_use]
    pub fn level(&self, level: u8) -> &[IntensityRange; 3] {
        &self.levels[usize::from(level.min(16))]
    }
}

#[must_use]
pub(crate) fn aa_color(dst: u8, text: u8, range: IntensityRange) -> u8 {
    let (dst, text) = (u32::from(dst), u32::from(text));

    let value = match dst.cmp(&text) {
        std::cmp::Ordering::Equal => dst,
        std::cmp::Ordering::Greater => {
            let range = u32::from(range.max).saturating_sub(text);
            text + (dst - text) * range / (0xff - text)
        },
        std::cmp::Ordering::Less => {
            let range = text.saturating_sub(u32::from(range.min));
            text - (text - dst) * range / text
        },
    };
    value as u8
}

fn aa_rgb(dst: ColorRef, text: ColorRef, ranges: &[IntensityRange; 3]) -> ColorRef {
    ColorRef::rgb(
        aa_color(dst.red(), text.red(), ranges[0]),
        aa_color(dst.green(), text.green(), ranges[1]),
        aa_color(dst.blue(), text.blue(), ranges[2]),
    )
}

/// Lookup tables between linear and gamma encoded intensities
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GammaRamp {
    /// In thousandths, `1000` is linear
    gamma: u32,
    encode: [u8; 256],
    decode: [u8; 256],
}

impl GammaRamp {
    #[must_use]
    pub fn new(gamma: u32) -> Self {
        let mut encode = [0; 256];
        let mut decode = [0; 256];

        if gamma != 0 {
            let exponent = f64::from(gamma) / 1000.;
            for i in 0..256 {
                let value = i as f64 / 255.;
                encode[i] = (value.powf(1. / exponent) * 255. + 0.5) as u8;
                decode[i] = (value.powf(exponent) * 255. + 0.5) as u8;
            }
        }

        Self {
            gamma,
            encode,
            decode,
        }
    }

    #[must_use]
    pub fn gamma(&self) -> u32 {
        self.gamma
    }

    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.gamma == 1000 || self.gamma == 0
    }

    fn blend(&self, dst: u8, text: u8, alpha: u8) -> u8 {
        match alpha {
            0 => dst,
            0xff => text,
            _ if dst == text => dst,
            _ => {
                let decoded = blend_color(
                    self.decode[usize::from(dst)].into(),
                    self.decode[usize::from(text)].into(),
                    alpha.into(),
                );
                self.encode[decoded as usize]
            },
        }
    }
}

fn blend_subpixel(dst: ColorRef, text: ColorRef, coverage: u32, gamma: Option<&GammaRamp>) -> ColorRef {
    let alpha = [16, 8, 0].map(|shift| (coverage >> shift) as u8);
    let dst = [dst.red(), dst.green(), dst.blue()];
    let text = [text.red(), text.green(), text.blue()];

    let [red, green, blue] = [0, 1, 2].map(|index| match gamma {
        Some(ramp) if !ramp.is_linear() => ramp.blend(dst[index], text[index], alpha[index]),
        _ => blend_color(dst[index].into(), text[index].into(), alpha[index].into()) as u8,
    });
    ColorRef::rgb(red, green, blue)
}

/// Antialiased glyphs on formats with at least 16 bpp
pub(crate) fn draw_glyph_rgb(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    glyph: &DibInfo<'_>,
    origin: Point,
    text_pixel: u32,
    ranges: &AaRanges,
) {
    let funcs = dst.funcs();
    let text = funcs.pixel_to_colorref(dst, text_pixel);

    for y in 0..rect.height() {
        for x in 0..rect.width() {
            let level = glyph.read_pixel(origin.x + x, origin.y + y) as u8;
            let (dst_x, dst_y) = (rect.left + x, rect.top + y);

            match level {
                0 | 1 => {},
                16.. => dst.write_pixel(dst_x, dst_y, text_pixel),
                _ => {
                    let current = funcs.pixel_to_colorref(dst, dst.read_pixel(dst_x, dst_y));
                    let color = aa_rgb(current, text, ranges.level(level));
                    let pixel = funcs.colorref_to_pixel(dst, color);
                    dst.write_pixel(dst_x, dst_y, pixel);
                },
            }
        }
    }
}

/// Glyphs on indexed formats, which only distinguish covered and uncovered pixels
pub(crate) fn draw_glyph_bilevel(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    glyph: &DibInfo<'_>,
    origin: Point,
    text_pixel: u32,
) {
    for y in 0..rect.height() {
        for x in 0..rect.width() {
            if glyph.read_pixel(origin.x + x, origin.y + y) >= 16 {
                dst.write_pixel(rect.left + x, rect.top + y, text_pixel);
            }
        }
    }
}

pub(crate) fn draw_subpixel_glyph_rgb(
    dst: &mut DibInfo<'_>,
    rect: &Rectangle,
    glyph: &DibInfo<'_>,
    origin: Point,
    text_pixel: u32,
    gamma: Option<&GammaRamp>,
) {
    let funcs = dst.funcs();
    let text = funcs.pixel_to_colorref(dst, text_pixel);

    for y in 0..rect.height() {
        for x in 0..rect.width() {
            let coverage = glyph.read_pixel(origin.x + x, origin.y + y) & 0x00ff_ffff;
            if coverage == 0 {
                continue;
            }

            let (dst_x, dst_y) = (rect.left + x, rect.top + y);
            let current = funcs.pixel_to_colorref(dst, dst.read_pixel(dst_x, dst_y));
            let color = blend_subpixel(current, text, coverage, gamma);
            let pixel = funcs.colorref_to_pixel(dst, color);
            dst.write_pixel(dst_x, dst_y, pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_text_ranges() {
        let ranges = AaRanges::new(ColorRef::BLACK);

        // With black text, the minimum is always black and the maximum follows the ramp
        assert_eq!(ranges.level(0)[0], IntensityRange { min: 0, max: 0xff });
        assert_eq!(ranges.level(8)[1], IntensityRange { min: 0, max: 0xbd });
        assert_eq!(ranges.level(16)[2], IntensityRange { min: 0, max: 0 });
    }

    #[test]
    fn white_text_ranges() {
        let ranges = AaRanges::new(ColorRef::WHITE);
        assert_eq!(ranges.level(4)[0], IntensityRange { min: 0x8c, max: 0xff });
    }

    #[test]
    fn intermediate_levels_pull_towards_text() {
        let ranges = AaRanges::new(ColorRef::BLACK);

        // Black text on white at level 8 keeps the maximum of that level
        assert_eq!(aa_color(0xff, 0, ranges.level(8)[0]), 0xbd);

        // Pixels that already match the text stay unchanged
        assert_eq!(aa_color(0, 0, ranges.level(8)[0]), 0);

        let ranges = AaRanges::new(ColorRef::WHITE);
        let value = aa_color(0, 0xff, ranges.level(8)[0]);
        assert_eq!(value, (0xff - 0xff_u32 * (0xff - 0xbd) / 0xff) as u8);
    }

    #[test]
    fn gamma_ramp() {
        let ramp = GammaRamp::new(1000);
        assert!(ramp.is_linear());
        assert_eq!(ramp.encode[0x80], 0x80);

        let ramp = GammaRamp::new(1400);
        assert!(!ramp.is_linear());
        assert_eq!(ramp.encode[0], 0);
        assert_eq!(ramp.decode[0xff], 0xff);
        assert!(ramp.decode[0x80] < 0x80);
        assert!(ramp.encode[0x80] > 0x80);

        assert_eq!(ramp.blend(0x10, 0x20, 0), 0x10);
        assert_eq!(ramp.blend(0x10, 0x20, 0xff), 0x20);
    }

    #[test]
    fn subpixel_channels_are_independent() {
        let color = blend_subpixel(ColorRef::WHITE, ColorRef::BLACK, 0x00ff0000, None);
        assert_eq!(color, ColorRef::rgb(0, 0xff, 0xff));
    }
}
