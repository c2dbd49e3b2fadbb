//! Self-describing bitmap headers

use crate::Rgbquad;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed, with the default channel layout for the bit depth
    #[default]
    Rgb,
    Rle8,
    Rle4,

    /// Uncompressed, with explicit channel masks
    Bitfields,
}

impl Compression {
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Rgb),
            1 => Some(Self::Rle8),
            2 => Some(Self::Rle4),
            3 => Some(Self::Bitfields),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
        }
    }
}

pub const MASKS_555: [u32; 3] = [0x7c00, 0x03e0, 0x001f];
pub const MASKS_565: [u32; 3] = [0xf800, 0x07e0, 0x001f];
pub const MASKS_888: [u32; 3] = [0xff0000, 0x00ff00, 0x0000ff];

/// Describes the layout of a pixel buffer
///
/// A negative height means that the first row in memory is the top row of the image,
/// otherwise the rows are stored bottom-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitmapInfo {
    pub width: i32,
    pub height: i32,
    pub bit_count: u16,
    pub compression: Compression,

    /// Red, green and blue masks, only used with [Compression::Bitfields]
    pub masks: [u32; 3],

    pub color_table: Vec<Rgbquad>,
}

impl BitmapInfo {
    #[must_use]
    pub fn new(width: i32, height: i32, bit_count: u16) -> Self {
        Self {
            width,
            height,
            bit_count,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_masks(mut self, masks: [u32; 3]) -> Self {
        self.compression = Compression::Bitfields;
        self.masks = masks;
        self
    }

    #[must_use]
    pub fn with_color_table(mut self, color_table: Vec<Rgbquad>) -> Self {
        self.color_table = color_table;
        self
    }

    #[must_use]
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    #[must_use]
    pub fn abs_height(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    /// Rows are padded to a multiple of four bytes
    #[must_use]
    pub fn stride(&self) -> usize {
        get_dib_stride(self.width, self.bit_count.into())
    }

    #[must_use]
    pub fn image_size(&self) -> usize {
        self.stride() * self.abs_height()
    }

    /// The masks that are in effect, taking the defaults of [Compression::Rgb] into account
    #[must_use]
    pub fn effective_masks(&self) -> [u32; 3] {
        match (self.compression, self.bit_count) {
            (Compression::Bitfields, _) => self.masks,
            (_, 16) => MASKS_555,
            (_, 24 | 32) => MASKS_888,
            _ => [0; 3],
        }
    }
}

#[must_use]
pub fn get_dib_stride(width: i32, bit_count: u32) -> usize {
    let bits = width.unsigned_abs() as usize * bit_count as usize;
    bits.div_ceil(32) * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_dword_aligned() {
        assert_eq!(get_dib_stride(1, 1), 4);
        assert_eq!(get_dib_stride(33, 1), 8);
        assert_eq!(get_dib_stride(3, 24), 12);
        assert_eq!(get_dib_stride(5, 8), 8);
        assert_eq!(BitmapInfo::new(7, -3, 4).image_size(), 12);
    }

    #[test]
    fn default_masks() {
        assert_eq!(BitmapInfo::new(1, 1, 16).effective_masks(), MASKS_555);
        assert_eq!(
            BitmapInfo::new(1, 1, 16)
                .with_masks(MASKS_565)
                .effective_masks(),
            MASKS_565
        );
    }
}
