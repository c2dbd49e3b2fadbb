//! Access to rows of 1 and 4 bpp pixels
//!
//! The leftmost pixel of a byte lives in its most significant bits. Runs of pixels
//! are processed a byte at a time, with masks for the partially covered bytes at
//! either end so that neighbouring pixels are never touched.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PackedFormat {
    bits_per_pixel: u32,
}

impl PackedFormat {
    pub(crate) const MONO: Self = Self { bits_per_pixel: 1 };
    pub(crate) const NIBBLE: Self = Self { bits_per_pixel: 4 };

    #[inline]
    const fn pixels_per_byte(self) -> usize {
        8 / self.bits_per_pixel as usize
    }

    #[inline]
    const fn pixel_mask(self) -> u8 {
        ((1_u16 << self.bits_per_pixel) - 1) as u8
    }

    #[inline]
    fn shift(self, x: usize) -> u32 {
        8 - self.bits_per_pixel * (x % self.pixels_per_byte() + 1) as u32
    }

    /// A pixel value repeated across a whole byte
    #[inline]
    pub(crate) fn replicate(self, value: u32) -> u8 {
        let value = value as u8 & self.pixel_mask();
        match self.bits_per_pixel {
            1 => 0_u8.wrapping_sub(value),
            _ => value * 0x11,
        }
    }

    #[inline]
    pub(crate) fn get(self, row: &[u8], x: usize) -> u32 {
        u32::from((row[x / self.pixels_per_byte()] >> self.shift(x)) & self.pixel_mask())
    }

    #[inline]
    pub(crate) fn rop(self, row: &mut [u8], x: usize, and: u32, xor: u32) {
        let shift = self.shift(x);
        let mask = self.pixel_mask() << shift;
        let and = ((and as u8) << shift) | !mask;
        let xor = ((xor as u8) << shift) & mask;

        let byte = &mut row[x / self.pixels_per_byte()];
        *byte = (*byte & and) ^ xor;
    }

    /// Mask of the pixels in a byte from pixel `x` onwards
    #[inline]
    fn start_mask(self, x: usize) -> u8 {
        0xff >> (self.bits_per_pixel as usize * (x % self.pixels_per_byte()))
    }

    /// Mask of the pixels in a byte before pixel `x`, `0xff` if `x` starts a new byte
    #[inline]
    fn end_mask(self, x: usize) -> u8 {
        match x % self.pixels_per_byte() {
            0 => 0xff,
            partial => !(0xff >> (self.bits_per_pixel as usize * partial)),
        }
    }

    /// Apply `pixel = (pixel & and) ^ xor` to the pixels `start..end`
    pub(crate) fn rop_run(self, row: &mut [u8], start: usize, end: usize, and: u32, xor: u32) {
        if start >= end {
            return;
        }

        let and = self.replicate(and);
        let xor = self.replicate(xor);
        let apply = |byte: &mut u8, mask: u8| *byte = (*byte & (and | !mask)) ^ (xor & mask);

        let first_byte = start / self.pixels_per_byte();
        let last_byte = (end - 1) / self.pixels_per_byte();

        if first_byte == last_byte {
            apply(
                &mut row[first_byte],
                self.start_mask(start) & self.end_mask(end),
            );
            return;
        }

        apply(&mut row[first_byte], self.start_mask(start));

        let middle = &mut row[first_byte + 1..last_byte];
        if and == 0 {
            middle.fill(xor);
        } else {
            for byte in middle {
                *byte = (*byte & and) ^ xor;
            }
        }

        apply(&mut row[last_byte], self.end_mask(end));
    }
}
