//! Ternary raster operations
//!
//! Each of the 256 operations combining source, destination and pattern is
//! decomposed into a short program of binary operations between those operands
//! (plus a scratch buffer), which is then run with the ordinary copy and brush kernels.

mod table;

use math::{Point, Rectangle};

use crate::{primitives::Overlap, BlitError, DibInfo, Rop2};

/// The operands a step of a raster operation can read from or write to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Dst,
    Src,
    Tmp,
    Pat,
}

/// Combine `src` into `dst` with a binary operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RopStep {
    pub src: Operand,
    pub dst: Operand,
    pub rop2: Rop2,
}

pub(crate) const fn step(src: Operand, dst: Operand, rop2: Rop2) -> RopStep {
    RopStep { src, dst, rop2 }
}

/// A ternary raster operation code, as passed to `BitBlt`
///
/// Bits 16 to 23 hold the truth table: bit `4 * P + 2 * S + D` is the result for pattern
/// bit `P`, source bit `S` and destination bit `D`. The low word is only used by hardware
/// and ignored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rop3(pub u32);

impl Rop3 {
    pub const BLACKNESS: Self = Self(0x0000_0042);
    pub const NOTSRCERASE: Self = Self(0x0011_00a6);
    pub const NOTSRCCOPY: Self = Self(0x0033_0008);
    pub const SRCERASE: Self = Self(0x0044_0328);
    pub const DSTINVERT: Self = Self(0x0055_0009);
    pub const PATINVERT: Self = Self(0x005a_0049);
    pub const SRCINVERT: Self = Self(0x0066_0046);
    pub const SRCAND: Self = Self(0x0088_00c6);
    pub const MERGEPAINT: Self = Self(0x00bb_0226);
    pub const MERGECOPY: Self = Self(0x00c0_00ca);
    pub const SRCCOPY: Self = Self(0x00cc_0020);
    pub const SRCPAINT: Self = Self(0x00ee_0086);
    pub const PATCOPY: Self = Self(0x00f0_0021);
    pub const PATPAINT: Self = Self(0x00fb_0a09);
    pub const WHITENESS: Self = Self(0x00ff_0062);

    /// An operation with the given truth table
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        Self((index as u32) << 16)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn uses_pat(self) -> bool {
        (self.0 >> 4) & 0x0f_0000 != self.0 & 0x0f_0000
    }

    #[must_use]
    pub const fn uses_src(self) -> bool {
        (self.0 & 0xcc_0000) >> 2 != self.0 & 0x33_0000
    }

    #[must_use]
    pub const fn uses_dst(self) -> bool {
        (self.0 & 0xaa_0000) >> 1 != self.0 & 0x55_0000
    }

    /// The equivalent binary operation with the source as the pen
    ///
    /// Only meaningful if [uses_pat](Self::uses_pat) is `false`.
    #[must_use]
    pub fn src_rop2(self) -> Rop2 {
        Self::rop2_from_nibble((self.0 >> 16) & 0x0f)
    }

    /// The equivalent binary operation with the pattern as the pen
    ///
    /// Only meaningful if [uses_src](Self::uses_src) is `false`.
    #[must_use]
    pub fn pat_rop2(self) -> Rop2 {
        Self::rop2_from_nibble(((self.0 >> 18) & 0x0c) | ((self.0 >> 16) & 0x03))
    }

    fn rop2_from_nibble(nibble: u32) -> Rop2 {
        // Every nibble maps to one of the sixteen operations
        Rop2::ALL[nibble as usize & 0x0f]
    }

    /// Evaluate the operation on single bits
    #[must_use]
    pub const fn evaluate(self, src: bool, dst: bool, pat: bool) -> bool {
        let bit = 4 * pat as u32 + 2 * src as u32 + dst as u32;
        (self.index() >> bit) & 1 != 0
    }

    pub(crate) fn steps(self) -> &'static [RopStep] {
        table::ROP_TABLE[usize::from(self.index())]
    }
}

/// The pattern operand of a raster operation, usually a brush
pub trait PatternSource {
    /// Do any work that could fail before drawing into `dib` starts
    fn prepare(&mut self, dib: &DibInfo<'_>) -> Result<(), BlitError>;

    /// Tile the pattern over `rects`, the pattern is anchored at `origin`
    fn fill(&mut self, dib: &mut DibInfo<'_>, rects: &[Rectangle], origin: Point, rop2: Rop2);
}

/// The source operand, either the caller's bitmap or a private copy of its relevant part
enum SrcOperand<'s, 'a> {
    Borrowed(&'s DibInfo<'a>),
    Owned(DibInfo<'static>),
}

impl SrcOperand<'_, '_> {
    fn get(&self) -> &DibInfo<'_> {
        match self {
            Self::Borrowed(dib) => dib,
            Self::Owned(dib) => dib,
        }
    }
}

/// Copy `source` into `target_rect`, restricted to `clip` if given
fn copy_operand(
    target: &mut DibInfo<'_>,
    target_rect: &Rectangle,
    clip: Option<&[Rectangle]>,
    source: &DibInfo<'_>,
    source_origin: Point,
    rop2: Rop2,
) {
    let funcs = target.funcs();
    let mut copy = |rect: Rectangle| {
        let origin = source_origin + (rect.top_left() - target_rect.top_left());
        funcs.copy_rect(target, &rect, Some(source), origin, rop2, Overlap::empty());
    };

    match clip {
        Some(clip) => clip
            .iter()
            .filter_map(|rect| rect.intersection(target_rect))
            .for_each(&mut copy),
        None => copy(*target_rect),
    }
}

/// Run a ternary raster operation
///
/// `dst_rect` (in `dst`) and `src_rect` (in `src`) must have the same size and lie within
/// the bounds of their bitmaps. Writes to `dst` are limited to `clip`. `src` must have
/// the same format as `dst` and may only be `None` if the operation does not use it.
///
/// All allocations happen before the first pixel is written, so on error `dst` is untouched.
pub fn execute_rop(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    clip: &[Rectangle],
    src: Option<(&DibInfo<'_>, Rectangle)>,
    pattern: &mut dyn PatternSource,
    brush_origin: Point,
    rop: Rop3,
) -> Result<(), BlitError> {
    run_program(dst, dst_rect, clip, src, pattern, brush_origin, rop, rop.steps())
}

/// Run `steps` as the program of `rop`, see [execute_rop]
fn run_program(
    dst: &mut DibInfo<'_>,
    dst_rect: &Rectangle,
    clip: &[Rectangle],
    src: Option<(&DibInfo<'_>, Rectangle)>,
    pattern: &mut dyn PatternSource,
    brush_origin: Point,
    rop: Rop3,
    steps: &[RopStep],
) -> Result<(), BlitError> {
    let width = dst_rect.width();
    let height = dst_rect.height();
    let writes = |operand| steps.iter().any(|step| step.dst == operand);
    let touches = |operand| steps.iter().any(|step| step.dst == operand || step.src == operand);

    let (mut src_operand, mut src_rect) = match src {
        Some((dib, rect)) => (Some(SrcOperand::Borrowed(dib)), rect),
        None if touches(Operand::Src) => {
            log::warn!("Raster operation {:#x} needs a source", rop.index());
            return Err(BlitError::InvalidParameter);
        },
        None => (None, *dst_rect),
    };

    // The source may be caller memory, so it is never written to directly
    if writes(Operand::Src) {
        if let Some(SrcOperand::Borrowed(dib)) = src_operand {
            let mut copy = dib.allocate_like(width, height)?;
            copy.funcs().copy_rect(
                &mut copy,
                &Rectangle::new(0, 0, width, height),
                Some(dib),
                src_rect.top_left(),
                Rop2::CopyPen,
                Overlap::empty(),
            );
            src_operand = Some(SrcOperand::Owned(copy));
            src_rect = Rectangle::new(0, 0, width, height);
        }
    }

    let mut tmp = if touches(Operand::Tmp) {
        Some(dst.allocate_like(width, height)?)
    } else {
        None
    };
    let tmp_rect = Rectangle::new(0, 0, width, height);

    if touches(Operand::Pat) {
        pattern.prepare(dst)?;
    }

    // Pattern pixels line up with the destination, whichever operand they are drawn into
    let pattern_origin =
        |target_rect: &Rectangle| brush_origin + (target_rect.top_left() - dst_rect.top_left());
    let dst_rects: Vec<_> = clip
        .iter()
        .filter_map(|rect| rect.intersection(dst_rect))
        .collect();

    let mut result_in_dst = false;
    for step in steps {
        match (step.src, step.dst) {
            (Operand::Pat, Operand::Dst) => {
                pattern.fill(dst, &dst_rects, brush_origin, step.rop2);
            },
            (Operand::Pat, Operand::Src) => {
                if let Some(SrcOperand::Owned(copy)) = &mut src_operand {
                    pattern.fill(copy, &[src_rect], pattern_origin(&src_rect), step.rop2);
                }
            },
            (Operand::Pat, Operand::Tmp) => {
                if let Some(tmp) = &mut tmp {
                    pattern.fill(tmp, &[tmp_rect], pattern_origin(&tmp_rect), step.rop2);
                }
            },
            (Operand::Src, Operand::Dst) => {
                if let Some(src) = &src_operand {
                    let origin = src_rect.top_left();
                    copy_operand(dst, dst_rect, Some(clip), src.get(), origin, step.rop2);
                }
            },
            (Operand::Tmp, Operand::Dst) => {
                if let Some(tmp) = &tmp {
                    copy_operand(dst, dst_rect, Some(clip), tmp, tmp_rect.top_left(), step.rop2);
                }
            },
            (Operand::Dst, Operand::Src) => {
                if let Some(SrcOperand::Owned(copy)) = &mut src_operand {
                    copy_operand(copy, &src_rect, None, dst, dst_rect.top_left(), step.rop2);
                }
            },
            (Operand::Tmp, Operand::Src) => {
                if let (Some(SrcOperand::Owned(copy)), Some(tmp)) = (&mut src_operand, &tmp) {
                    copy_operand(copy, &src_rect, None, tmp, tmp_rect.top_left(), step.rop2);
                }
            },
            (Operand::Dst, Operand::Tmp) => {
                if let Some(tmp) = &mut tmp {
                    copy_operand(tmp, &tmp_rect, None, dst, dst_rect.top_left(), step.rop2);
                }
            },
            (Operand::Src, Operand::Tmp) => {
                if let (Some(src), Some(tmp)) = (&src_operand, &mut tmp) {
                    let origin = src_rect.top_left();
                    copy_operand(tmp, &tmp_rect, None, src.get(), origin, step.rop2);
                }
            },
            (source, target) => {
                log::error!("Invalid raster operation step from {source:?} to {target:?}");
            },
        }

        result_in_dst |= step.dst == Operand::Dst;
    }

    if !result_in_dst {
        if let Some(src) = &src_operand {
            let origin = src_rect.top_left();
            copy_operand(dst, dst_rect, Some(clip), src.get(), origin, Rop2::CopyPen);
        }
    }

    Ok(())
}
