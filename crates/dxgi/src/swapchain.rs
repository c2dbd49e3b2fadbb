//! Swapchain and display mode descriptions

use bitflags::bitflags;

use crate::{
    flags::{bind_flags_from_usage, BindFlags, Usage},
    format::{DxgiFormat, PixelFormat},
    sample::{multisample_from_dxgi, MultisampleType, SampleDesc},
    DxgiError,
};

bitflags! {
    /// `DXGI_SWAP_CHAIN_FLAG`
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SwapChainFlags: u32 {
        const NONPREROTATED = 0x1;
        const ALLOW_MODE_SWITCH = 0x2;
        const GDI_COMPATIBLE = 0x4;
        const RESTRICTED_CONTENT = 0x8;
        const RESTRICT_SHARED_RESOURCE_DRIVER = 0x10;
        const DISPLAY_ONLY = 0x20;
        const FRAME_LATENCY_WAITABLE_OBJECT = 0x40;
        const FOREGROUND_LAYER = 0x80;
        const FULLSCREEN_VIDEO = 0x100;
        const YUV_VIDEO = 0x200;
        const HW_PROTECTED = 0x400;
        const ALLOW_TEARING = 0x800;
    }
}

bitflags! {
    /// Swapchain behaviour understood by the renderer
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SwapchainFlags: u32 {
        const LOCKABLE_BACKBUFFER = 0x1;
        const GDI_COMPATIBLE = 0x2;
        const ALLOW_MODE_SWITCH = 0x4;
        const RESTORE_WINDOW_RECT = 0x8;
        const LATENCY_WAITABLE = 0x10;
        const ALLOW_TEARING = 0x20;
    }
}

const SWAPCHAIN_FLAG_TABLE: [(SwapChainFlags, SwapchainFlags); 4] = [
    (
        SwapChainFlags::ALLOW_MODE_SWITCH,
        SwapchainFlags::ALLOW_MODE_SWITCH,
    ),
    (SwapChainFlags::GDI_COMPATIBLE, SwapchainFlags::GDI_COMPATIBLE),
    (
        SwapChainFlags::FRAME_LATENCY_WAITABLE_OBJECT,
        SwapchainFlags::LATENCY_WAITABLE,
    ),
    (SwapChainFlags::ALLOW_TEARING, SwapchainFlags::ALLOW_TEARING),
];

/// Unrecognized flags are reported and dropped
#[must_use]
pub fn swapchain_flags_from_dxgi(flags: SwapChainFlags) -> SwapchainFlags {
    let mut remaining = flags;
    let mut translated = SwapchainFlags::empty();
    for (dxgi, internal) in SWAPCHAIN_FLAG_TABLE {
        if remaining.contains(dxgi) {
            translated |= internal;
            remaining -= dxgi;
        }
    }

    if !remaining.is_empty() {
        log::warn!("Unhandled swapchain flags {:#x}", remaining.bits());
    }
    translated
}

/// Flags without a public counterpart are silently dropped
#[must_use]
pub fn dxgi_swapchain_flags(flags: SwapchainFlags) -> SwapChainFlags {
    SWAPCHAIN_FLAG_TABLE
        .iter()
        .filter(|(_, internal)| flags.contains(*internal))
        .fold(SwapChainFlags::empty(), |translated, (dxgi, _)| translated | *dxgi)
}

/// `DXGI_MODE_SCANLINE_ORDER`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanlineOrder {
    #[default]
    Unspecified,
    Progressive,
    UpperFieldFirst,
    LowerFieldFirst,
}

impl ScanlineOrder {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Unspecified,
            1 => Self::Progressive,
            2 => Self::UpperFieldFirst,
            3 => Self::LowerFieldFirst,
            _ => {
                log::warn!("Unknown scanline order {value:#x}");
                Self::Unspecified
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanlineOrdering {
    #[default]
    Unknown,
    Progressive,
    Interlaced,
}

impl From<ScanlineOrder> for ScanlineOrdering {
    fn from(value: ScanlineOrder) -> Self {
        match value {
            ScanlineOrder::Unspecified => Self::Unknown,
            ScanlineOrder::Progressive => Self::Progressive,
            ScanlineOrder::UpperFieldFirst | ScanlineOrder::LowerFieldFirst => Self::Interlaced,
        }
    }
}

impl From<ScanlineOrdering> for ScanlineOrder {
    fn from(value: ScanlineOrdering) -> Self {
        match value {
            ScanlineOrdering::Unknown => Self::Unspecified,
            ScanlineOrdering::Progressive => Self::Progressive,
            ScanlineOrdering::Interlaced => Self::UpperFieldFirst,
        }
    }
}

/// `DXGI_MODE_SCALING`, how a display mode fills the monitor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeScaling {
    #[default]
    Unspecified,
    Centered,
    Stretched,
}

impl ModeScaling {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Unspecified,
            1 => Self::Centered,
            2 => Self::Stretched,
            _ => {
                log::warn!("Unknown mode scaling {value:#x}");
                Self::Unspecified
            },
        }
    }
}

/// `DXGI_SCALING`, how back buffers are presented into a differently sized window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scaling {
    #[default]
    Stretch,
    None,
    AspectRatioStretch,
}

impl Scaling {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Stretch,
            1 => Self::None,
            2 => Self::AspectRatioStretch,
            _ => {
                log::warn!("Unknown scaling {value:#x}");
                Self::Stretch
            },
        }
    }
}

/// The renderer's presentation scaling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingMode {
    #[default]
    Unspecified,
    Centered,
    Stretched,
    AspectRatioStretched,
}

impl From<ModeScaling> for ScalingMode {
    fn from(value: ModeScaling) -> Self {
        match value {
            ModeScaling::Unspecified => Self::Unspecified,
            ModeScaling::Centered => Self::Centered,
            ModeScaling::Stretched => Self::Stretched,
        }
    }
}

impl From<Scaling> for ScalingMode {
    fn from(value: Scaling) -> Self {
        match value {
            Scaling::Stretch => Self::Stretched,
            Scaling::None => Self::Centered,
            Scaling::AspectRatioStretch => Self::AspectRatioStretched,
        }
    }
}

impl From<ScalingMode> for ModeScaling {
    fn from(value: ScalingMode) -> Self {
        match value {
            ScalingMode::Unspecified => Self::Unspecified,
            ScalingMode::Centered => Self::Centered,
            ScalingMode::Stretched | ScalingMode::AspectRatioStretched => Self::Stretched,
        }
    }
}

/// `DXGI_SWAP_EFFECT`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DxgiSwapEffect {
    #[default]
    Discard,
    Sequential,
    FlipSequential,
    FlipDiscard,
}

impl DxgiSwapEffect {
    #[must_use]
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => Self::Discard,
            1 => Self::Sequential,
            3 => Self::FlipSequential,
            4 => Self::FlipDiscard,
            _ => {
                log::warn!("Unknown swap effect {value:#x}");
                Self::Discard
            },
        }
    }

    #[must_use]
    pub fn is_flip_model(self) -> bool {
        matches!(self, Self::FlipSequential | Self::FlipDiscard)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwapEffect {
    #[default]
    Discard,
    Sequential,
    FlipSequential,
    FlipDiscard,
    Copy,
    Overlay,
}

impl From<DxgiSwapEffect> for SwapEffect {
    fn from(value: DxgiSwapEffect) -> Self {
        match value {
            DxgiSwapEffect::Discard => Self::Discard,
            DxgiSwapEffect::Sequential => Self::Sequential,
            DxgiSwapEffect::FlipSequential => Self::FlipSequential,
            DxgiSwapEffect::FlipDiscard => Self::FlipDiscard,
        }
    }
}

impl From<SwapEffect> for DxgiSwapEffect {
    fn from(value: SwapEffect) -> Self {
        match value {
            SwapEffect::Discard => Self::Discard,
            SwapEffect::Sequential => Self::Sequential,
            SwapEffect::FlipSequential => Self::FlipSequential,
            SwapEffect::FlipDiscard => Self::FlipDiscard,
            other => {
                log::warn!("Swap effect {other:?} has no DXGI counterpart");
                Self::Discard
            },
        }
    }
}

/// `DXGI_RATIONAL`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// A zero denominator is treated as one
    #[must_use]
    pub fn to_u32(self) -> u32 {
        if self.denominator == 0 {
            self.numerator
        } else {
            self.numerator / self.denominator
        }
    }
}

/// `DXGI_MODE_DESC`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeDesc {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: Rational,
    pub format: DxgiFormat,
    pub scanline_ordering: ScanlineOrder,
    pub scaling: ModeScaling,
}

/// A display mode as the renderer sees it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: u32,
    pub format: PixelFormat,
    pub scanline_ordering: ScanlineOrdering,
}

impl From<&ModeDesc> for DisplayMode {
    fn from(desc: &ModeDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            refresh_rate: desc.refresh_rate.to_u32(),
            format: desc.format.to_pixel_format(),
            scanline_ordering: desc.scanline_ordering.into(),
        }
    }
}

impl From<&DisplayMode> for ModeDesc {
    fn from(mode: &DisplayMode) -> Self {
        Self {
            width: mode.width,
            height: mode.height,
            refresh_rate: Rational {
                numerator: mode.refresh_rate,
                denominator: 1,
            },
            format: mode.format.to_dxgi(),
            scanline_ordering: mode.scanline_ordering.into(),
            scaling: ModeScaling::Unspecified,
        }
    }
}

/// `DXGI_SWAP_CHAIN_DESC1`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: DxgiFormat,
    pub stereo: bool,
    pub sample_desc: SampleDesc,
    pub buffer_usage: Usage,
    pub buffer_count: u32,
    pub scaling: Scaling,
    pub swap_effect: DxgiSwapEffect,
    pub flags: SwapChainFlags,
}

/// The renderer's swapchain description
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapchainDesc {
    pub backbuffer_width: u32,
    pub backbuffer_height: u32,
    pub backbuffer_format: PixelFormat,
    pub backbuffer_count: u32,
    pub backbuffer_bind_flags: BindFlags,
    pub multisample: MultisampleType,
    pub multisample_quality: u32,
    pub swap_effect: SwapEffect,
    pub scaling: ScalingMode,
    pub windowed: bool,
    pub flags: SwapchainFlags,
}

pub const MAX_BUFFER_COUNT: u32 = 16;

/// Formats a flip model swapchain can present
const FLIP_MODEL_FORMATS: [DxgiFormat; 4] = [
    DxgiFormat::R16G16B16A16Float,
    DxgiFormat::B8G8R8A8Unorm,
    DxgiFormat::R8G8B8A8Unorm,
    DxgiFormat::R10G10B10A2Unorm,
];

impl SwapchainDesc {
    /// Validate a public swapchain description and translate it
    ///
    /// Flip model swapchains need at least two buffers, cannot be multisampled and
    /// only present a handful of formats.
    pub fn from_dxgi(desc: &SwapChainDesc, windowed: bool) -> Result<Self, DxgiError> {
        if desc.stereo {
            log::warn!("Stereo swapchains are not supported");
            return Err(DxgiError::InvalidCall);
        }

        if desc.buffer_count == 0 || desc.buffer_count > MAX_BUFFER_COUNT {
            log::warn!("Invalid buffer count {}", desc.buffer_count);
            return Err(DxgiError::InvalidCall);
        }

        if desc.swap_effect.is_flip_model() {
            if desc.buffer_count < 2 {
                log::warn!("Flip model swapchains need at least two buffers");
                return Err(DxgiError::InvalidCall);
            }
            if desc.sample_desc.count != 1 {
                log::warn!("Flip model swapchains cannot be multisampled");
                return Err(DxgiError::InvalidCall);
            }
            if !FLIP_MODEL_FORMATS.contains(&desc.format) {
                log::warn!("Format {:?} cannot be used with a flip model", desc.format);
                return Err(DxgiError::InvalidCall);
            }
        }

        let (multisample, multisample_quality) = multisample_from_dxgi(desc.sample_desc);

        Ok(Self {
            backbuffer_width: desc.width,
            backbuffer_height: desc.height,
            backbuffer_format: desc.format.to_pixel_format(),
            backbuffer_count: desc.buffer_count,
            backbuffer_bind_flags: bind_flags_from_usage(desc.buffer_usage),
            multisample,
            multisample_quality,
            swap_effect: desc.swap_effect.into(),
            scaling: desc.scaling.into(),
            windowed,
            flags: swapchain_flags_from_dxgi(desc.flags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip_desc() -> SwapChainDesc {
        SwapChainDesc {
            width: 640,
            height: 480,
            format: DxgiFormat::B8G8R8A8Unorm,
            buffer_usage: Usage::RENDER_TARGET_OUTPUT,
            buffer_count: 2,
            swap_effect: DxgiSwapEffect::FlipDiscard,
            flags: SwapChainFlags::ALLOW_MODE_SWITCH,
            ..SwapChainDesc::default()
        }
    }

    #[test]
    fn swapchain_flags() {
        let flags = SwapChainFlags::ALLOW_MODE_SWITCH
            | SwapChainFlags::GDI_COMPATIBLE
            | SwapChainFlags::NONPREROTATED;
        let translated = swapchain_flags_from_dxgi(flags);
        assert_eq!(
            translated,
            SwapchainFlags::ALLOW_MODE_SWITCH | SwapchainFlags::GDI_COMPATIBLE
        );
        assert_eq!(
            dxgi_swapchain_flags(translated | SwapchainFlags::RESTORE_WINDOW_RECT),
            SwapChainFlags::ALLOW_MODE_SWITCH | SwapChainFlags::GDI_COMPATIBLE
        );
    }

    #[test]
    fn scanline_ordering() {
        assert_eq!(
            ScanlineOrdering::from(ScanlineOrder::LowerFieldFirst),
            ScanlineOrdering::Interlaced
        );
        assert_eq!(ScanlineOrder::from_u32(7), ScanlineOrder::Unspecified);
        assert_eq!(
            ScanlineOrder::from(ScanlineOrdering::Progressive),
            ScanlineOrder::Progressive
        );
    }

    #[test]
    fn display_modes() {
        let desc = ModeDesc {
            width: 1920,
            height: 1080,
            refresh_rate: Rational {
                numerator: 60000,
                denominator: 1001,
            },
            format: DxgiFormat::R8G8B8A8Unorm,
            scanline_ordering: ScanlineOrder::Progressive,
            scaling: ModeScaling::Stretched,
        };

        let mode = DisplayMode::from(&desc);
        assert_eq!(mode.refresh_rate, 59);
        assert_eq!(mode.format, PixelFormat::R8G8B8A8Unorm);

        let back = ModeDesc::from(&mode);
        assert_eq!(back.refresh_rate.to_u32(), 59);
        assert_eq!(back.scaling, ModeScaling::Unspecified);
        assert_eq!(back.format, desc.format);
    }

    #[test]
    fn swap_effects() {
        assert_eq!(DxgiSwapEffect::from_u32(2), DxgiSwapEffect::Discard);
        assert_eq!(
            SwapEffect::from(DxgiSwapEffect::FlipSequential),
            SwapEffect::FlipSequential
        );
        assert_eq!(DxgiSwapEffect::from(SwapEffect::Copy), DxgiSwapEffect::Discard);
    }

    #[test]
    fn flip_model_description() {
        let desc = SwapchainDesc::from_dxgi(&flip_desc(), true).unwrap();
        assert_eq!(desc.backbuffer_format, PixelFormat::B8G8R8A8Unorm);
        assert_eq!(desc.backbuffer_bind_flags, BindFlags::RENDER_TARGET);
        assert_eq!(desc.swap_effect, SwapEffect::FlipDiscard);
        assert_eq!(desc.multisample, MultisampleType::None);
        assert_eq!(desc.scaling, ScalingMode::Stretched);
        assert_eq!(desc.flags, SwapchainFlags::ALLOW_MODE_SWITCH);
    }

    #[test]
    fn invalid_flip_model_descriptions() {
        let single_buffer = SwapChainDesc {
            buffer_count: 1,
            ..flip_desc()
        };
        let multisampled = SwapChainDesc {
            sample_desc: SampleDesc {
                count: 4,
                quality: 0,
            },
            ..flip_desc()
        };
        let srgb = SwapChainDesc {
            format: DxgiFormat::B8G8R8A8UnormSrgb,
            ..flip_desc()
        };

        for desc in [single_buffer, multisampled, srgb] {
            assert_eq!(
                SwapchainDesc::from_dxgi(&desc, true),
                Err(DxgiError::InvalidCall)
            );
        }

        // The same settings are fine for a blit model swapchain
        let blit = SwapChainDesc {
            swap_effect: DxgiSwapEffect::Discard,
            ..multisampled
        };
        let desc = SwapchainDesc::from_dxgi(&blit, false).unwrap();
        assert_eq!(desc.multisample, MultisampleType::Samples(4));
    }
}
