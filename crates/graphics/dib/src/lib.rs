//! A software rasterizer for device independent bitmaps
//!
//! Pixel buffers of 1, 4, 8, 16, 24 and 32 bits per pixel are described by a
//! [DibInfo], which picks a set of [Primitives](primitives::Primitives) for its
//! layout. Everything above the kernels (raster operations, clipping, brushes, pens,
//! text and the [DibDevice](device::DibDevice) that ties them together) only ever
//! talks to pixels through that set.

pub mod bitblt;
pub mod bmp;
pub mod brush;
pub mod clip;
mod color;
pub mod device;
mod dib;
mod dither;
mod error;
pub mod format;
pub mod palette;
pub mod pen;
pub mod primitives;
pub mod rop;
pub mod surface;
pub mod text;

pub use color::{calc_and_xor_masks, do_rop, ColorRef, Rgbquad, Rop2, RopCodes};
pub use dib::{Bits, ChannelMask, DibInfo};
pub use error::BlitError;
pub use format::{BitmapInfo, Compression};
