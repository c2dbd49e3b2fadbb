//! The `.bmp` file format
//!
//! Information about the format can be found at
//! * <http://www.martinreddy.net/gfx/2d/BMP.txt>
//! * <https://learn.microsoft.com/en-us/windows/win32/gdi/bitmap-storage>
//!
//! Only uncompressed files are supported, in every depth that a [DibInfo] can describe.

use error_derive::Error;
use math::{Point, Rectangle};
use sl_std::{bytestream::ByteStream, writer::ByteWriter};

use crate::{
    format::get_dib_stride, primitives::Overlap, BitmapInfo, BlitError, Bits, Compression,
    DibInfo, Rgbquad, Rop2,
};

pub(crate) const BMP_MAGIC: [u8; 2] = [0x42, 0x4d];

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;

/// 72 dpi
const PIXELS_PER_METER: i32 = 2835;

const MAX_ACCEPTABLE_SIZE: u32 = 8096;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[msg = "not a bmp file"]
    NotABmp,

    #[msg = "unexpected end of file"]
    UnexpectedEndOfFile,

    #[msg = "unknown color format"]
    UnknownColorFormat,

    #[msg = "unknown compression"]
    UnknownCompression,

    #[msg = "palette too small"]
    PaletteTooSmall,

    /// This image contains extreme values and cannot be parsed
    ///
    /// For example, the image might be too large to fit in memory.
    #[msg = "refusing to parse image"]
    RefuseToParse,
}

pub fn decode(bytes: &[u8]) -> Result<DibInfo<'static>, Error> {
    let mut byte_stream = ByteStream::new(bytes);

    // Start of header
    if byte_stream.next_chunk() != Some(BMP_MAGIC) {
        return Err(Error::NotABmp);
    }

    let file_size = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    if file_size as usize != bytes.len() {
        log::warn!(
            "bmp header states that the file size is 0x{file_size:x} bytes, but its 0x{:x}",
            bytes.len()
        );
    }

    let reserved = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    if reserved != 0 {
        log::warn!("Reserved field in bmp header is not zero (it is 0x{reserved:x})");
    }

    let image_data_offset = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    // Start of the Info Header
    let info_header_size = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    if info_header_size < INFO_HEADER_SIZE {
        log::error!("Unsupported bmp info header size {info_header_size}");
        return Err(Error::NotABmp);
    }

    let width = byte_stream
        .next_le_i32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    let height = byte_stream
        .next_le_i32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    let planes = byte_stream
        .next_le_u16()
        .ok_or(Error::UnexpectedEndOfFile)?;

    if planes != 1 {
        log::warn!("Unexpected number of planes, expected 1, got {planes:?}");
    }

    let bit_count = byte_stream
        .next_le_u16()
        .ok_or(Error::UnexpectedEndOfFile)?;

    if !matches!(bit_count, 1 | 4 | 8 | 16 | 24 | 32) {
        log::error!("No format known for the given number of bits per pixel: {bit_count:?}");
        return Err(Error::UnknownColorFormat);
    }

    let compression = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    let compression = match Compression::from_u32(compression) {
        Some(compression @ (Compression::Rgb | Compression::Bitfields)) => compression,
        _ => {
            log::error!("Unsupported compression format: {compression:?}");
            return Err(Error::UnknownCompression);
        },
    };

    if compression == Compression::Bitfields && !matches!(bit_count, 16 | 32) {
        log::error!("Channel masks are not allowed for {bit_count} bpp images");
        return Err(Error::UnknownColorFormat);
    }

    if width <= 0
        || height == 0
        || width.unsigned_abs() > MAX_ACCEPTABLE_SIZE
        || height.unsigned_abs() > MAX_ACCEPTABLE_SIZE
    {
        log::error!("Refusing to allocate image of size {width}x{height}");
        return Err(Error::RefuseToParse);
    }

    let image_size = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    // Resolution, irrelevant for drawing
    byte_stream.advance(8);

    let colors_used = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    let _important_colors = byte_stream
        .next_le_u32()
        .ok_or(Error::UnexpectedEndOfFile)?;

    // Newer headers contain the masks, the original one is followed by them
    let mut masks = [0; 3];
    if compression == Compression::Bitfields {
        for mask in &mut masks {
            *mask = byte_stream
                .next_le_u32()
                .ok_or(Error::UnexpectedEndOfFile)?;
        }
    }

    let palette_start = if info_header_size == INFO_HEADER_SIZE {
        byte_stream.cursor()
    } else {
        (FILE_HEADER_SIZE + info_header_size) as usize
    };
    byte_stream.set_cursor(palette_start);

    let mut info = BitmapInfo::new(width, height, bit_count);
    if compression == Compression::Bitfields {
        info = info.with_masks(masks);
    }

    if bit_count <= 8 {
        let max_colors = 1_u32 << bit_count;
        let palette_size = match colors_used {
            0 => max_colors,
            n if n > max_colors => {
                log::warn!("Palette with {n} entries for a {bit_count} bpp image, ignoring the rest");
                max_colors
            },
            n => n,
        };

        if image_data_offset as usize > palette_start
            && (image_data_offset as usize - palette_start) < palette_size as usize * 4
        {
            log::error!("Image data starts inside the palette of {palette_size} colors");
            return Err(Error::PaletteTooSmall);
        }

        let mut palette = Vec::with_capacity(palette_size as usize);
        for _ in 0..palette_size {
            let [blue, green, red, reserved] =
                byte_stream.next_chunk().ok_or(Error::PaletteTooSmall)?;

            if reserved != 0 {
                log::warn!("Reserved field in palette is not zero (is {reserved:?})");
            }

            palette.push(Rgbquad::new(red, green, blue));
        }
        info = info.with_color_table(palette);
    }

    if byte_stream.cursor() != image_data_offset as usize {
        log::warn!(
            "Expected image data to be at 0x{:x}, but its at 0x{image_data_offset:x} instead",
            byte_stream.cursor()
        );
        byte_stream.set_cursor(image_data_offset as usize);
    }

    let image_data = byte_stream
        .next_slice(info.image_size())
        .ok_or(Error::UnexpectedEndOfFile)?;

    if image_size != 0 && image_size as usize != image_data.len() {
        log::warn!(
            "Expected 0x{image_size:x} bytes of image data, found 0x{:x}",
            image_data.len()
        );
    }

    let mut bits = Vec::new();
    bits.try_reserve_exact(image_data.len())
        .map_err(|_| Error::RefuseToParse)?;
    bits.extend_from_slice(image_data);

    DibInfo::new(&info, Bits::Owned(bits)).map_err(|error| {
        log::error!("Cannot describe the decoded image: {error}");
        Error::RefuseToParse
    })
}

/// Write the visible part of `dib` as a bottom-up `.bmp` file
pub fn encode(dib: &DibInfo<'_>) -> Result<Vec<u8>, BlitError> {
    let bounds = dib.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    let bit_count = dib.bit_count();

    // Rows of the copy start at the visible rectangle, which matters for packed formats
    let mut visible = dib.allocate_like(width, height)?;
    dib.funcs().copy_rect(
        &mut visible,
        &Rectangle::new(0, 0, width, height),
        Some(dib),
        Point::ORIGIN,
        Rop2::CopyPen,
        Overlap::empty(),
    );

    let info = dib.bitmap_info();
    let masks = (info.compression == Compression::Bitfields).then_some(info.masks);
    let palette: &[Rgbquad] = if bit_count <= 8 {
        dib.color_table()
    } else {
        &[]
    };

    let stride = get_dib_stride(width, bit_count);
    let image_size = (stride * height as usize) as u32;
    let image_data_offset = FILE_HEADER_SIZE
        + INFO_HEADER_SIZE
        + if masks.is_some() { 12 } else { 0 }
        + 4 * palette.len() as u32;
    let file_size = image_data_offset + image_size;

    let mut writer = ByteWriter::with_capacity(file_size as usize);
    writer
        .write_bytes(&BMP_MAGIC)
        .write_le_u32(file_size)
        .write_le_u32(0)
        .write_le_u32(image_data_offset);

    writer
        .write_le_u32(INFO_HEADER_SIZE)
        .write_le_i32(width)
        .write_le_i32(height)
        .write_le_u16(1)
        .write_le_u16(bit_count as u16)
        .write_le_u32(info.compression.as_u32())
        .write_le_u32(image_size)
        .write_le_i32(PIXELS_PER_METER)
        .write_le_i32(PIXELS_PER_METER)
        .write_le_u32(palette.len() as u32)
        .write_le_u32(0);

    for mask in masks.iter().flatten() {
        writer.write_le_u32(*mask);
    }

    for entry in palette {
        writer.write_bytes(&[entry.blue, entry.green, entry.red, 0]);
    }

    for y in (0..height).rev() {
        writer.write_bytes(&visible.row(y)[..stride]);
    }

    Ok(writer.finish())
}
