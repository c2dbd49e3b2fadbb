//! Translation between the public DXGI enumerations and the renderer's own
//! pixel formats, resource flags and capability levels
//!
//! Values coming from callers are never trusted: anything unrecognized is logged
//! and mapped to an "unknown" value instead of failing.

mod error;
pub mod feature_level;
pub mod flags;
pub mod format;
pub mod private_data;
pub mod sample;
pub mod swapchain;

pub use error::DxgiError;
pub use feature_level::FeatureLevel;
pub use format::{DxgiFormat, PixelFormat};
pub use private_data::{Guid, PrivateStore};
