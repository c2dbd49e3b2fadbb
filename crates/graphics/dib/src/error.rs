use std::collections::TryReserveError;

use error_derive::Error;

/// Failures of the blit orchestration layer
///
/// Pixel kernels themselves never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BlitError {
    #[msg = "out of memory"]
    OutOfMemory,

    /// The source layout differs from the destination, the caller should convert first
    #[msg = "source needs format conversion"]
    FormatMismatch,

    /// The operation would have to scale, but the requested path cannot
    #[msg = "source and destination sizes differ"]
    TransformNotSupported,

    #[msg = "invalid parameter"]
    InvalidParameter,
}

impl From<TryReserveError> for BlitError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// Allocate a zeroed buffer, reporting failure instead of aborting
pub(crate) fn try_alloc_zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, BlitError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|error| {
        log::warn!("Failed to allocate {len} elements: {error}");
        BlitError::OutOfMemory
    })?;
    buffer.resize(len, T::default());
    Ok(buffer)
}
