//! Color values and binary raster operations

use std::fmt;

/// A color in the `0x00bbggrr` layout used by drawing calls
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorRef(pub u32);

impl ColorRef {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(red as u32 | (green as u32) << 8 | (blue as u32) << 16)
    }

    #[must_use]
    pub const fn red(self) -> u8 {
        self.0 as u8
    }

    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn blue(self) -> u8 {
        (self.0 >> 16) as u8
    }
}

impl fmt::Debug for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorRef({:#08x})", self.0)
    }
}

/// A palette entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgbquad {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl Rgbquad {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    #[must_use]
    pub const fn to_colorref(self) -> ColorRef {
        ColorRef::rgb(self.red, self.green, self.blue)
    }
}

impl From<ColorRef> for Rgbquad {
    fn from(value: ColorRef) -> Self {
        Self::new(value.red(), value.green(), value.blue())
    }
}

/// A binary raster operation, combining a pen (or source) with the destination
///
/// The numeric value minus one is the truth table of the operation: bit `2 * P + D`
/// holds the result for pen bit `P` and destination bit `D`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rop2 {
    Black = 1,
    NotMergePen,
    MaskNotPen,
    NotCopyPen,
    MaskPenNot,
    Not,
    XorPen,
    NotMaskPen,
    MaskPen,
    NotXorPen,
    Nop,
    MergeNotPen,
    CopyPen,
    MergePenNot,
    MergePen,
    White,
}

impl Rop2 {
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::NotMergePen,
        Self::MaskNotPen,
        Self::NotCopyPen,
        Self::MaskPenNot,
        Self::Not,
        Self::XorPen,
        Self::NotMaskPen,
        Self::MaskPen,
        Self::NotXorPen,
        Self::Nop,
        Self::MergeNotPen,
        Self::CopyPen,
        Self::MergePenNot,
        Self::MergePen,
        Self::White,
    ];

    /// Returns `None` for values outside of `1..=16`
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Evaluate the operation on single bits
    #[must_use]
    pub const fn evaluate(self, pen: bool, dst: bool) -> bool {
        ((self as u8 - 1) >> (2 * pen as u8 + dst as u8)) & 1 != 0
    }

    /// The AND/XOR masks that implement this operation
    #[must_use]
    pub const fn codes(self) -> RopCodes {
        // With the pen fixed, every operation is D' = (D & A) ^ X
        // where A and X only depend on the pen bit
        let and_0 = self.evaluate(false, false) != self.evaluate(false, true);
        let and_1 = self.evaluate(true, false) != self.evaluate(true, true);
        let xor_0 = self.evaluate(false, false);
        let xor_1 = self.evaluate(true, false);

        const fn mask(bit: bool) -> u32 {
            if bit {
                !0
            } else {
                0
            }
        }

        RopCodes {
            a1: mask(and_0 != and_1),
            a2: mask(and_0),
            x1: mask(xor_0 != xor_1),
            x2: mask(xor_0),
        }
    }

    /// Whether the result depends on the destination at all
    #[must_use]
    pub const fn uses_dst(self) -> bool {
        let codes = self.codes();
        codes.a1 != 0 || codes.a2 != 0
    }
}

/// Precomputed AND/XOR masks of a [Rop2]
///
/// For a pen value `P`, the operation becomes `D' = (D & ((P & a1) ^ a2)) ^ ((P & x1) ^ x2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RopCodes {
    pub a1: u32,
    pub a2: u32,
    pub x1: u32,
    pub x2: u32,
}

impl RopCodes {
    #[inline]
    #[must_use]
    pub const fn and_xor(&self, pen: u32) -> (u32, u32) {
        ((pen & self.a1) ^ self.a2, (pen & self.x1) ^ self.x2)
    }

    /// Apply the operation with `src` as the pen
    #[inline]
    #[must_use]
    pub const fn apply(&self, dst: u32, src: u32) -> u32 {
        let (and, xor) = self.and_xor(src);
        do_rop(dst, and, xor)
    }
}

#[inline]
#[must_use]
pub const fn do_rop(dst: u32, and: u32, xor: u32) -> u32 {
    (dst & and) ^ xor
}

/// AND/XOR masks for drawing `color` with the given operation
#[must_use]
pub const fn calc_and_xor_masks(rop2: Rop2, color: u32) -> (u32, u32) {
    rop2.codes().and_xor(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorref_layout() {
        let color = ColorRef::rgb(0x12, 0x34, 0x56);
        assert_eq!(color.0, 0x563412);
        assert_eq!((color.red(), color.green(), color.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn and_xor_masks_match_truth_tables() {
        for rop in Rop2::ALL {
            for pen in [0_u32, !0] {
                for dst in [0_u32, !0] {
                    let expected = if rop.evaluate(pen != 0, dst != 0) {
                        !0
                    } else {
                        0
                    };
                    assert_eq!(rop.codes().apply(dst, pen), expected, "{rop:?}");
                }
            }
        }
    }

    #[test]
    fn well_known_masks() {
        assert_eq!(calc_and_xor_masks(Rop2::CopyPen, 0x1234), (0, 0x1234));
        assert_eq!(calc_and_xor_masks(Rop2::XorPen, 0x1234), (!0, 0x1234));
        assert_eq!(calc_and_xor_masks(Rop2::Not, 0x1234), (!0, !0));
        assert_eq!(calc_and_xor_masks(Rop2::Nop, 0x1234), (!0, 0));
        assert!(!Rop2::CopyPen.uses_dst());
        assert!(Rop2::MergePen.uses_dst());
        assert_eq!(Rop2::from_u8(6), Some(Rop2::Not));
        assert_eq!(Rop2::from_u8(17), None);
    }
}
