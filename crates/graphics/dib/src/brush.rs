//! Brushes and the masks they are drawn with
//!
//! A brush is realized for one destination format and one binary raster operation
//! at a time: its pixels are turned into AND/XOR masks that the kernels tile over
//! the filled area. Masks are kept until the brush, its colors or the requested
//! operation change.

use math::{Point, Rectangle};

use crate::{
    clip::{get_clipped_rects, Region},
    primitives::RopMasks,
    rop::PatternSource,
    BlitError, ColorRef, DibInfo, Rgbquad, Rop2,
};

/// The standard hatch patterns, one byte per row with the leftmost pixel in the top bit
const HATCHES: [[u8; 8]; 6] = [
    [0x00, 0x00, 0x00, 0x00, 0xff, 0x00, 0x00, 0x00],
    [0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08],
    [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01],
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80],
    [0x08, 0x08, 0x08, 0x08, 0xff, 0x08, 0x08, 0x08],
    [0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HatchStyle {
    Horizontal,
    Vertical,

    /// Lines from the top left to the bottom right
    ForwardDiagonal,

    /// Lines from the bottom left to the top right
    BackwardDiagonal,

    Cross,
    DiagonalCross,
}

impl HatchStyle {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Horizontal),
            1 => Some(Self::Vertical),
            2 => Some(Self::ForwardDiagonal),
            3 => Some(Self::BackwardDiagonal),
            4 => Some(Self::Cross),
            5 => Some(Self::DiagonalCross),
            _ => None,
        }
    }

    fn is_set(self, x: i32, y: i32) -> bool {
        (HATCHES[self as usize][y as usize] >> (7 - x)) & 1 != 0
    }
}

/// Whether gaps in hatches, dashes and text backgrounds are filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackgroundMode {
    #[default]
    Opaque,
    Transparent,
}

#[derive(Debug, Default)]
pub enum BrushStyle {
    /// Nothing is drawn
    #[default]
    Null,

    /// A single color, dithered on palette formats that lack it
    Solid(ColorRef),

    /// A hatch pattern in the brush color over the background color
    Hatched(HatchStyle, ColorRef),

    /// A bitmap tiled over the area
    ///
    /// Monochrome patterns draw their clear bits in the text color and their
    /// set bits in the background color.
    Pattern(DibInfo<'static>),
}

/// Identifies the pixel layout a brush was realized for
#[derive(Clone, Debug, PartialEq, Eq)]
struct FormatKey {
    name: &'static str,
    masks: [u32; 3],
    palette: Vec<Rgbquad>,
}

impl FormatKey {
    fn of(dib: &DibInfo<'_>) -> Self {
        Self {
            name: dib.funcs().name(),
            masks: dib.masks(),
            palette: if dib.bit_count() <= 8 {
                dib.color_table().to_vec()
            } else {
                vec![]
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BrushColors {
    text: ColorRef,
    background: ColorRef,
    mode: BackgroundMode,
}

/// The selected brush of a drawing device, together with its realized masks
#[derive(Debug)]
pub struct BrushState {
    style: BrushStyle,
    colors: BrushColors,

    /// A pattern brush converted into the destination format
    realized: Option<(FormatKey, DibInfo<'static>)>,

    masks: Option<(Rop2, FormatKey, RopMasks)>,
}

impl Default for BrushState {
    fn default() -> Self {
        Self::new(BrushStyle::Solid(ColorRef::WHITE))
    }
}

impl BrushState {
    #[must_use]
    pub fn new(style: BrushStyle) -> Self {
        Self {
            style,
            colors: BrushColors {
                text: ColorRef::BLACK,
                background: ColorRef::WHITE,
                mode: BackgroundMode::Opaque,
            },
            realized: None,
            masks: None,
        }
    }

    #[must_use]
    pub fn style(&self) -> &BrushStyle {
        &self.style
    }

    /// Replace the brush, dropping everything realized for the previous one
    pub fn select(&mut self, style: BrushStyle) {
        self.style = style;
        self.realized = None;
        self.masks = None;
    }

    /// Update the device colors that hatch and monochrome pattern brushes depend on
    pub fn set_colors(&mut self, text: ColorRef, background: ColorRef, mode: BackgroundMode) {
        let colors = BrushColors {
            text,
            background,
            mode,
        };

        if colors != self.colors {
            self.colors = colors;
            self.realized = None;
            self.masks = None;
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.style, BrushStyle::Null)
    }

    /// Convert a pattern brush into the format of `dib`, if it is not yet
    fn realize(&mut self, dib: &DibInfo<'_>, key: &FormatKey) -> Result<(), BlitError> {
        let BrushStyle::Pattern(pattern) = &self.style else {
            return Ok(());
        };
        if self.realized.as_ref().is_some_and(|(realized, _)| realized == key) {
            return Ok(());
        }

        let bounds = pattern.bounds();
        let mut converted = dib.allocate_like(bounds.width(), bounds.height())?;
        let funcs = dib.funcs();

        if pattern.bit_count() == 1 {
            let text = funcs.colorref_to_pixel(&converted, self.colors.text);
            let background = funcs.colorref_to_pixel(&converted, self.colors.background);
            for y in 0..bounds.height() {
                for x in 0..bounds.width() {
                    let pixel = if pattern.read_pixel(x, y) == 0 {
                        text
                    } else {
                        background
                    };
                    converted.write_pixel(x, y, pixel);
                }
            }
        } else {
            funcs.convert_to(&mut converted, pattern, &bounds, false);
        }

        log::debug!(
            "Realized a {}x{} pattern brush for {} bpp",
            bounds.width(),
            bounds.height(),
            dib.bit_count()
        );
        self.realized = Some((key.clone(), converted));
        Ok(())
    }

    fn hatch_masks(
        &self,
        dib: &DibInfo<'_>,
        style: HatchStyle,
        color: ColorRef,
        rop2: Rop2,
    ) -> RopMasks {
        let funcs = dib.funcs();
        let codes = rop2.codes();
        let foreground = codes.and_xor(funcs.colorref_to_pixel(dib, color));
        let background = match self.colors.mode {
            BackgroundMode::Opaque => {
                codes.and_xor(funcs.colorref_to_pixel(dib, self.colors.background))
            },
            BackgroundMode::Transparent => (!0, 0),
        };

        let (and, xor): (Vec<u32>, Vec<u32>) = (0..64)
            .map(|index| {
                if style.is_set(index % 8, index / 8) {
                    foreground
                } else {
                    background
                }
            })
            .unzip();

        let needs_and = rop2.uses_dst() || self.colors.mode == BackgroundMode::Transparent;
        RopMasks {
            width: 8,
            height: 8,
            and: needs_and.then_some(and),
            xor,
        }
    }

    /// The masks for drawing into `dib` with `rop2`, `None` for the null brush
    fn masks(&mut self, dib: &DibInfo<'_>, rop2: Rop2) -> Result<Option<&RopMasks>, BlitError> {
        let key = FormatKey::of(dib);
        let is_cached = self.masks.as_ref().is_some_and(|(cached_rop2, cached_key, _)| {
            *cached_rop2 == rop2 && *cached_key == key
        });

        if !is_cached {
            let funcs = dib.funcs();
            let masks = match self.style {
                BrushStyle::Null => return Ok(None),
                BrushStyle::Solid(color) => funcs.create_dither_masks(dib, rop2, color),
                BrushStyle::Hatched(style, color) => self.hatch_masks(dib, style, color, rop2),
                BrushStyle::Pattern(_) => {
                    self.realize(dib, &key)?;
                    let Some((_, realized)) = &self.realized else {
                        return Ok(None);
                    };
                    funcs.create_rop_masks(realized, rop2)
                },
            };
            self.masks = Some((rop2, key, masks));
        }

        Ok(self.masks.as_ref().map(|(_, _, masks)| masks))
    }

    /// Fill `rects`, restricted to `clip`, with the brush anchored at `origin`
    pub fn fill_rects(
        &mut self,
        dib: &mut DibInfo<'_>,
        rects: &[Rectangle],
        clip: Option<&Region>,
        rop2: Rop2,
        origin: Point,
    ) -> Result<(), BlitError> {
        if rects.is_empty() || rop2 == Rop2::Nop {
            return Ok(());
        }

        let Some(masks) = self.masks(dib, rop2)? else {
            return Ok(());
        };

        let clipped: Vec<Rectangle> = match clip {
            Some(_) => rects
                .iter()
                .flat_map(|rect| get_clipped_rects(dib, Some(rect), clip))
                .collect(),
            None => rects
                .iter()
                .filter_map(|rect| rect.intersection(&dib.bounds()))
                .collect(),
        };

        let funcs = dib.funcs();
        if masks.width == 1 && masks.height == 1 {
            let and = masks.and.as_ref().map_or(0, |and| and[0]);
            funcs.solid_rects(dib, &clipped, and, masks.xor[0]);
        } else {
            funcs.pattern_rects(dib, &clipped, origin, masks);
        }
        Ok(())
    }
}

impl PatternSource for BrushState {
    fn prepare(&mut self, dib: &DibInfo<'_>) -> Result<(), BlitError> {
        let key = FormatKey::of(dib);
        self.realize(dib, &key)
    }

    fn fill(&mut self, dib: &mut DibInfo<'_>, rects: &[Rectangle], origin: Point, rop2: Rop2) {
        if let Err(error) = self.fill_rects(dib, rects, None, rop2, origin) {
            log::error!("Failed to draw a prepared brush: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitmapInfo;

    fn dib(bit_count: u16) -> DibInfo<'static> {
        DibInfo::allocate(&BitmapInfo::new(16, 16, bit_count)).unwrap()
    }

    fn fill(brush: &mut BrushState, target: &mut DibInfo<'_>, rect: Rectangle, rop2: Rop2) {
        brush
            .fill_rects(target, &[rect], None, rop2, Point::ORIGIN)
            .unwrap();
    }

    #[test]
    fn solid_brush() {
        let mut target = dib(32);
        let mut brush = BrushState::new(BrushStyle::Solid(ColorRef::rgb(1, 2, 3)));
        fill(&mut brush, &mut target, Rectangle::new(2, 2, 4, 4), Rop2::CopyPen);

        assert_eq!(target.read_pixel(3, 3), 0x010203);
        assert_eq!(target.read_pixel(4, 4), 0);
    }

    #[test]
    fn null_brush_draws_nothing() {
        let mut target = dib(8);
        let mut brush = BrushState::new(BrushStyle::Null);
        fill(&mut brush, &mut target, Rectangle::new(0, 0, 16, 16), Rop2::White);
        assert!(target.bits().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn hatch_over_background() {
        let red = ColorRef::rgb(0xff, 0, 0);
        let blue = ColorRef::rgb(0, 0, 0xff);
        let everything = Rectangle::new(0, 0, 16, 16);

        let mut target = dib(32);
        let mut brush = BrushState::new(BrushStyle::Hatched(HatchStyle::Vertical, red));
        brush.set_colors(ColorRef::BLACK, blue, BackgroundMode::Opaque);
        fill(&mut brush, &mut target, everything, Rop2::CopyPen);

        assert_eq!(target.read_pixel(4, 0), 0xff0000);
        assert_eq!(target.read_pixel(12, 9), 0xff0000);
        assert_eq!(target.read_pixel(3, 0), 0x0000ff);

        // Transparent backgrounds keep whatever was there
        let mut target = dib(32);
        target.write_pixel(3, 0, 0x123456);
        brush.set_colors(ColorRef::BLACK, ColorRef::WHITE, BackgroundMode::Transparent);
        fill(&mut brush, &mut target, everything, Rop2::CopyPen);

        assert_eq!(target.read_pixel(3, 0), 0x123456);
        assert_eq!(target.read_pixel(4, 0), 0xff0000);
    }

    #[test]
    fn brush_origin_shifts_the_pattern() {
        let mut target = dib(32);
        let style = BrushStyle::Hatched(HatchStyle::Vertical, ColorRef::WHITE);
        let mut brush = BrushState::new(style);
        brush.set_colors(ColorRef::BLACK, ColorRef::BLACK, BackgroundMode::Opaque);
        brush
            .fill_rects(
                &mut target,
                &[Rectangle::new(0, 0, 16, 16)],
                None,
                Rop2::CopyPen,
                Point::new(2, 0),
            )
            .unwrap();

        assert_eq!(target.read_pixel(6, 0), 0xffffff);
        assert_eq!(target.read_pixel(4, 0), 0);
    }

    #[test]
    fn monochrome_patterns_use_device_colors() {
        let mut pattern = DibInfo::allocate(&BitmapInfo::new(2, 1, 1)).unwrap();
        pattern.write_pixel(1, 0, 1);

        let mut brush = BrushState::new(BrushStyle::Pattern(pattern));
        let (red, green) = (ColorRef::rgb(0xff, 0, 0), ColorRef::rgb(0, 0xff, 0));
        brush.set_colors(red, green, BackgroundMode::Opaque);

        let mut target = dib(24);
        fill(&mut brush, &mut target, Rectangle::new(0, 0, 4, 1), Rop2::CopyPen);
        assert_eq!(
            [0, 1, 2, 3].map(|x| target.read_pixel(x, 0)),
            [0xff0000, 0x00ff00, 0xff0000, 0x00ff00]
        );
    }

    #[test]
    fn masks_follow_the_raster_operation() {
        let mut target = dib(8);
        let mut brush = BrushState::new(BrushStyle::Solid(ColorRef::WHITE));
        let rect = Rectangle::new(0, 0, 1, 1);

        fill(&mut brush, &mut target, rect, Rop2::CopyPen);
        assert_ne!(target.read_pixel(0, 0), 0);

        fill(&mut brush, &mut target, rect, Rop2::XorPen);
        assert_eq!(target.read_pixel(0, 0), 0);
    }

    #[test]
    fn clipped_fill() {
        let mut target = dib(8);
        let mut brush = BrushState::new(BrushStyle::Solid(ColorRef::WHITE));
        let region = Region::from_rect(Rectangle::new(0, 0, 2, 2));
        brush
            .fill_rects(
                &mut target,
                &[Rectangle::new(0, 0, 16, 16)],
                Some(&region),
                Rop2::White,
                Point::ORIGIN,
            )
            .unwrap();

        assert_eq!(target.read_pixel(1, 1), 0xff);
        assert_eq!(target.read_pixel(2, 2), 0);
    }
}
