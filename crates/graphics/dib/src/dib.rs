//! The pixel buffer descriptor

use std::{
    cell::{Cell, OnceCell},
    fmt,
};

use math::Rectangle;

use crate::{
    error::try_alloc_zeroed,
    format::{MASKS_555, MASKS_888},
    palette::{cell_center, default_color_table, lookup_key, nearest_index, LOOKUP_SIZE},
    primitives::{self, packed::PackedFormat, Primitives},
    BitmapInfo, BlitError, Compression, Rgbquad,
};

/// The memory behind a [DibInfo]
pub enum Bits<'a> {
    /// Memory allocated by the rasterizer itself
    Owned(Vec<u8>),

    /// Caller memory that may be drawn into
    Borrowed(&'a mut [u8]),

    /// Caller memory that must not be modified
    ///
    /// Writing to a read-only buffer first copies it.
    ReadOnly(&'a [u8]),
}

impl Bits<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Owned(bytes) => bytes,
            Self::Borrowed(bytes) => bytes,
            Self::ReadOnly(bytes) => bytes,
        }
    }
}

/// A single color channel of a masked format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMask {
    pub mask: u32,
    pub shift: u32,
    pub len: u32,
}

impl ChannelMask {
    #[must_use]
    pub fn new(mask: u32) -> Self {
        if mask == 0 {
            return Self::default();
        }

        let shift = mask.trailing_zeros();
        Self {
            mask,
            shift,
            len: (mask >> shift).trailing_ones(),
        }
    }
}

/// A rectangular pixel surface in one of the supported layouts
///
/// All pixel coordinates are relative to the top left corner of the visible
/// rectangle, not to the start of the buffer.
pub struct DibInfo<'a> {
    bit_count: u32,
    width: i32,
    height: i32,

    /// Negative strides describe bottom-up buffers
    stride: isize,

    /// The visible part of the buffer, in buffer coordinates
    rect: Rectangle,

    bits: Bits<'a>,
    pub(crate) red: ChannelMask,
    pub(crate) green: ChannelMask,
    pub(crate) blue: ChannelMask,
    compression: Compression,
    color_table: Option<Vec<Rgbquad>>,
    funcs: &'static dyn Primitives,
    release: Option<Box<dyn FnOnce() + Send + 'a>>,

    /// Nearest palette entries for 5 bit per channel colors, filled lazily
    color_lookup: OnceCell<Box<[Cell<u16>]>>,
}

impl<'a> DibInfo<'a> {
    /// Describe a buffer whose stride follows from `info`
    pub fn new(info: &BitmapInfo, bits: Bits<'a>) -> Result<Self, BlitError> {
        let stride = info.stride() as isize;
        let stride = if info.is_top_down() { stride } else { -stride };
        Self::with_stride(info, bits, stride)
    }

    /// Describe a buffer with an explicit stride
    ///
    /// The sign of `stride` decides the row order, the sign of `info.height` is ignored.
    pub fn with_stride(info: &BitmapInfo, bits: Bits<'a>, stride: isize) -> Result<Self, BlitError> {
        if info.width <= 0 || info.height == 0 {
            log::warn!("Invalid bitmap size {}x{}", info.width, info.height);
            return Err(BlitError::InvalidParameter);
        }

        if matches!(info.compression, Compression::Rle4 | Compression::Rle8) {
            log::warn!("Compressed bitmaps cannot be drawn to");
            return Err(BlitError::InvalidParameter);
        }

        let bit_count = u32::from(info.bit_count);
        let height = info.height.abs();
        let min_stride = (info.width as usize * bit_count as usize).div_ceil(8);
        if stride.unsigned_abs() < min_stride {
            log::warn!("Stride {stride} is too small for {} pixels", info.width);
            return Err(BlitError::InvalidParameter);
        }

        if bits.as_slice().len() < stride.unsigned_abs() * height as usize {
            log::warn!(
                "Buffer of {} bytes cannot hold {height} rows of {} bytes",
                bits.as_slice().len(),
                stride.unsigned_abs()
            );
            return Err(BlitError::InvalidParameter);
        }

        let [red, green, blue] = info.effective_masks();
        let color_table = (bit_count <= 8 && !info.color_table.is_empty())
            .then(|| info.color_table.clone());

        Ok(Self {
            bit_count,
            width: info.width,
            height,
            stride,
            rect: Rectangle::new(0, 0, info.width, height),
            bits,
            red: ChannelMask::new(red),
            green: ChannelMask::new(green),
            blue: ChannelMask::new(blue),
            compression: info.compression,
            color_table,
            funcs: primitives::select(bit_count, info.effective_masks()),
            release: None,
            color_lookup: OnceCell::new(),
        })
    }

    /// Run `release` once the descriptor is dropped
    #[must_use]
    pub fn with_release(mut self, release: impl FnOnce() + Send + 'a) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Allocate a zeroed, top-down buffer
    pub fn allocate(info: &BitmapInfo) -> Result<DibInfo<'static>, BlitError> {
        let mut info = info.clone();
        info.height = -info.height.abs();

        let bits = try_alloc_zeroed(info.image_size())?;
        DibInfo::new(&info, Bits::Owned(bits))
    }

    /// Allocate a zeroed buffer with the same layout and palette as `self`
    pub fn allocate_like(&self, width: i32, height: i32) -> Result<DibInfo<'static>, BlitError> {
        let mut info = self.bitmap_info();
        info.width = width;
        info.height = -height.abs();
        DibInfo::allocate(&info)
    }

    /// A header that describes this buffer
    #[must_use]
    pub fn bitmap_info(&self) -> BitmapInfo {
        let masks = [self.red.mask, self.green.mask, self.blue.mask];
        let compression = match (self.bit_count, masks) {
            (16, MASKS_555) | (24, _) | (32, MASKS_888) => Compression::Rgb,
            (16 | 32, _) => Compression::Bitfields,
            _ => self.compression,
        };

        BitmapInfo {
            width: self.width,
            height: if self.stride > 0 {
                -self.height
            } else {
                self.height
            },
            bit_count: self.bit_count as u16,
            compression,
            masks: if compression == Compression::Bitfields {
                masks
            } else {
                [0; 3]
            },
            color_table: self.color_table.clone().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Width of the whole buffer
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the whole buffer
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn stride(&self) -> isize {
        self.stride
    }

    /// The visible rectangle, in buffer coordinates
    #[must_use]
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// The visible rectangle in pixel coordinates, which always starts at the origin
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.rect.width(), self.rect.height())
    }

    /// Restrict drawing to a part of the buffer
    ///
    /// The rectangle is clipped to the buffer.
    pub fn set_visible_rect(&mut self, rect: Rectangle) {
        let buffer = Rectangle::new(0, 0, self.width, self.height);
        self.rect = rect.intersection(&buffer).unwrap_or_default();
    }

    #[must_use]
    pub fn funcs(&self) -> &'static dyn Primitives {
        self.funcs
    }

    #[must_use]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    #[must_use]
    pub fn masks(&self) -> [u32; 3] {
        [self.red.mask, self.green.mask, self.blue.mask]
    }

    /// The palette of an indexed bitmap
    ///
    /// Bitmaps without their own palette use the default system palette for their depth.
    #[must_use]
    pub fn color_table(&self) -> &[Rgbquad] {
        match &self.color_table {
            Some(table) => table,
            None => default_color_table(self.bit_count),
        }
    }

    #[must_use]
    pub fn has_color_table(&self) -> bool {
        self.color_table.is_some()
    }

    pub fn set_color_table(&mut self, color_table: Vec<Rgbquad>) {
        self.color_table = Some(color_table);
        self.color_lookup = OnceCell::new();
    }

    #[must_use]
    pub fn is_owned_copy(&self) -> bool {
        matches!(self.bits, Bits::Owned(_))
    }

    #[must_use]
    pub fn bits(&self) -> &[u8] {
        self.bits.as_slice()
    }

    /// Mutable access to the buffer, copying read-only memory first
    pub fn bits_mut(&mut self) -> &mut [u8] {
        if let Bits::ReadOnly(bytes) = &self.bits {
            log::debug!("Copying a read-only buffer of {} bytes", bytes.len());
            self.bits = Bits::Owned(bytes.to_vec());
        }

        match &mut self.bits {
            Bits::Owned(bytes) => bytes,
            Bits::Borrowed(bytes) => bytes,
            Bits::ReadOnly(_) => &mut [],
        }
    }

    /// Copy borrowed memory into a buffer owned by `self`
    ///
    /// Afterwards, writes through `self` no longer affect the original memory.
    pub fn make_owned(&mut self) -> Result<(), BlitError> {
        if self.is_owned_copy() {
            return Ok(());
        }

        let source = self.bits.as_slice();
        let mut copy = Vec::new();
        copy.try_reserve_exact(source.len())?;
        copy.extend_from_slice(source);
        self.bits = Bits::Owned(copy);
        Ok(())
    }

    /// Whether `self` and `other` describe the same pixel layout
    #[must_use]
    pub fn same_format(&self, other: &DibInfo<'_>) -> bool {
        self.bit_count == other.bit_count
            && self.masks() == other.masks()
            && (self.bit_count > 8 || self.color_table() == other.color_table())
    }

    /// Whether a buffer described by `info` could be copied into `self` without conversion
    #[must_use]
    pub fn matches_bitmap_info(&self, info: &BitmapInfo) -> bool {
        if u32::from(info.bit_count) != self.bit_count {
            return false;
        }

        match self.bit_count {
            16 | 32 => info.effective_masks() == self.masks(),
            24 => true,
            _ => {
                info.color_table.is_empty()
                    || info.color_table.as_slice() == self.color_table()
            },
        }
    }

    /// Byte offset of the start of a row, `y` is relative to the visible rectangle
    #[inline]
    fn row_start(&self, y: i32) -> usize {
        let y = (self.rect.top + y) as usize;
        let stride = self.stride.unsigned_abs();

        if self.stride > 0 {
            y * stride
        } else {
            (self.height as usize - 1 - y) * stride
        }
    }

    /// A complete row of the buffer, starting at buffer column zero
    #[inline]
    pub(crate) fn row(&self, y: i32) -> &[u8] {
        let start = self.row_start(y);
        &self.bits()[start..start + self.stride.unsigned_abs()]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, y: i32) -> &mut [u8] {
        let start = self.row_start(y);
        let len = self.stride.unsigned_abs();
        &mut self.bits_mut()[start..start + len]
    }

    /// Offset of a pixel into [bits](Self::bits), for formats of at least 8 bpp
    #[inline]
    pub(crate) fn byte_offset(&self, x: i32, y: i32) -> usize {
        self.row_start(y) + self.column(x) * (self.bit_count as usize / 8)
    }

    /// Buffer column of a pixel coordinate
    #[inline]
    pub(crate) fn column(&self, x: i32) -> usize {
        (self.rect.left + x) as usize
    }

    /// Read the raw value of a single pixel
    #[must_use]
    pub fn read_pixel(&self, x: i32, y: i32) -> u32 {
        let x = self.column(x);
        let row = self.row(y);

        match self.bit_count {
            32 => read_u32(row, 4 * x),
            24 => {
                u32::from(row[3 * x])
                    | u32::from(row[3 * x + 1]) << 8
                    | u32::from(row[3 * x + 2]) << 16
            },
            16 => u32::from(u16::from_le_bytes([row[2 * x], row[2 * x + 1]])),
            8 => u32::from(row[x]),
            4 => PackedFormat::NIBBLE.get(row, x),
            1 => PackedFormat::MONO.get(row, x),
            _ => 0,
        }
    }

    /// Apply `pixel = (pixel & and) ^ xor` to a single pixel
    pub fn rop_pixel(&mut self, x: i32, y: i32, and: u32, xor: u32) {
        let x = self.column(x);
        let bit_count = self.bit_count;
        let row = self.row_mut(y);

        match bit_count {
            32 => {
                let value = (read_u32(row, 4 * x) & and) ^ xor;
                row[4 * x..4 * x + 4].copy_from_slice(&value.to_le_bytes());
            },
            24 => {
                for (i, byte) in row[3 * x..3 * x + 3].iter_mut().enumerate() {
                    *byte = (*byte & (and >> (8 * i)) as u8) ^ (xor >> (8 * i)) as u8;
                }
            },
            16 => {
                let old = u16::from_le_bytes([row[2 * x], row[2 * x + 1]]);
                let value = (old & and as u16) ^ xor as u16;
                row[2 * x..2 * x + 2].copy_from_slice(&value.to_le_bytes());
            },
            8 => row[x] = (row[x] & and as u8) ^ xor as u8,
            4 => PackedFormat::NIBBLE.rop(row, x, and, xor),
            1 => PackedFormat::MONO.rop(row, x, and, xor),
            _ => {},
        }
    }

    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, pixel: u32) {
        self.rop_pixel(x, y, 0, pixel);
    }

    /// The palette index closest to a color
    ///
    /// Colors are reduced to 5 bits per channel first, 8 bpp bitmaps cache the result.
    pub(crate) fn nearest_color_index(&self, red: u8, green: u8, blue: u8) -> u32 {
        let (cr, cg, cb) = (cell_center(red), cell_center(green), cell_center(blue));

        if self.bit_count != 8 {
            return nearest_index(self.color_table(), cr, cg, cb) as u32;
        }

        let lookup = self
            .color_lookup
            .get_or_init(|| vec![Cell::new(u16::MAX); LOOKUP_SIZE].into_boxed_slice());
        let entry = &lookup[lookup_key(red, green, blue)];

        if entry.get() == u16::MAX {
            entry.set(nearest_index(self.color_table(), cr, cg, cb) as u16);
        }
        u32::from(entry.get())
    }
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl Drop for DibInfo<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for DibInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DibInfo")
            .field("bit_count", &self.bit_count)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("rect", &self.rect)
            .field("owned", &self.is_owned_copy())
            .field("funcs", &self.funcs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use super::*;

    #[test]
    fn bottom_up_rows() {
        let info = BitmapInfo::new(2, 2, 8);
        let mut bits = vec![0; 8];
        let mut dib = DibInfo::new(&info, Bits::Borrowed(&mut bits)).unwrap();
        assert!(dib.stride() < 0);

        dib.write_pixel(1, 0, 0xaa);
        drop(dib);

        // Row 0 is the last row in memory
        assert_eq!(bits, [0, 0, 0, 0, 0, 0xaa, 0, 0]);
    }

    #[test]
    fn sub_byte_pixels() {
        let mut dib = DibInfo::allocate(&BitmapInfo::new(9, 1, 1)).unwrap();
        dib.write_pixel(0, 0, 1);
        dib.write_pixel(8, 0, 1);
        assert_eq!(&dib.bits()[..2], &[0x80, 0x80]);
        dib.rop_pixel(0, 0, !0, !0);
        assert_eq!(dib.read_pixel(0, 0), 0);

        let mut dib = DibInfo::allocate(&BitmapInfo::new(3, 1, 4)).unwrap();
        dib.write_pixel(1, 0, 0xc);
        dib.write_pixel(2, 0, 0x5);
        assert_eq!(&dib.bits()[..2], &[0x0c, 0x50]);
        assert_eq!(dib.read_pixel(2, 0), 5);
    }

    #[test]
    fn visible_rect_offsets_coordinates() {
        let mut dib = DibInfo::allocate(&BitmapInfo::new(4, 4, 32)).unwrap();
        dib.set_visible_rect(Rectangle::new(1, 2, 10, 10));
        assert_eq!(dib.bounds(), Rectangle::new(0, 0, 3, 2));

        dib.write_pixel(0, 0, 0x123456);
        dib.set_visible_rect(Rectangle::new(0, 0, 4, 4));
        assert_eq!(dib.read_pixel(1, 2), 0x123456);
    }

    #[test]
    fn release_callback_runs_once() {
        let released = Arc::new(AtomicBool::new(false));
        let flag = released.clone();

        let bits = [0_u8; 4];
        let dib = DibInfo::new(&BitmapInfo::new(1, 1, 32), Bits::ReadOnly(&bits))
            .unwrap()
            .with_release(move || flag.store(true, Ordering::SeqCst));

        assert!(!released.load(Ordering::SeqCst));
        drop(dib);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn read_only_buffers_are_copied_on_write() {
        let bits = [0_u8; 4];
        let mut dib = DibInfo::new(&BitmapInfo::new(1, -1, 32), Bits::ReadOnly(&bits)).unwrap();
        assert!(!dib.is_owned_copy());

        dib.write_pixel(0, 0, 0xffffffff);
        assert!(dib.is_owned_copy());
        assert_eq!(bits, [0; 4]);
    }

    #[test]
    fn rejects_short_buffers() {
        let bits = [0_u8; 7];
        assert_eq!(
            DibInfo::new(&BitmapInfo::new(2, 2, 8), Bits::ReadOnly(&bits)).unwrap_err(),
            BlitError::InvalidParameter
        );
    }

    #[test]
    fn channel_masks() {
        let mask = ChannelMask::new(0x07e0);
        assert_eq!((mask.shift, mask.len), (5, 6));
        assert_eq!(ChannelMask::new(0), ChannelMask::default());
    }
}
