//! Pixel format tables
//!
//! [DxgiFormat] mirrors the numeric values of the public `DXGI_FORMAT` enumeration,
//! [PixelFormat] is the renderer's own list. Most formats exist on both sides, some
//! only on one of them; those translate to the respective `Unknown` value.

macro_rules! format_tables {
    (
        shared {
            $($shared:ident = $value:literal => $internal:ident,)*
        }
        dxgi_only {
            $($dxgi_only:ident = $dxgi_only_value:literal,)*
        }
        internal_only {
            $($internal_only:ident,)*
        }
    ) => {
        /// A `DXGI_FORMAT` value
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum DxgiFormat {
            #[default]
            Unknown = 0,
            $($shared = $value,)*
            $($dxgi_only = $dxgi_only_value,)*
        }

        /// A pixel format understood by the renderer
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum PixelFormat {
            #[default]
            Unknown,
            $($internal,)*
            $($internal_only,)*
        }

        impl DxgiFormat {
            /// Every named format, in declaration order
            pub const ALL: &'static [Self] = &[
                Self::Unknown,
                $(Self::$shared,)*
                $(Self::$dxgi_only,)*
            ];

            #[must_use]
            pub fn from_u32(value: u32) -> Self {
                match value {
                    0 => Self::Unknown,
                    $($value => Self::$shared,)*
                    $($dxgi_only_value => Self::$dxgi_only,)*
                    _ => {
                        log::warn!("Unknown DXGI format {value:#x}");
                        Self::Unknown
                    },
                }
            }

            #[inline]
            #[must_use]
            pub const fn value(self) -> u32 {
                self as u32
            }

            #[must_use]
            pub fn to_pixel_format(self) -> PixelFormat {
                match self {
                    Self::Unknown => PixelFormat::Unknown,
                    $(Self::$shared => PixelFormat::$internal,)*
                    $(Self::$dxgi_only)|* => {
                        log::warn!("No pixel format for DXGI format {self:?}");
                        PixelFormat::Unknown
                    },
                }
            }
        }

        impl PixelFormat {
            pub const ALL: &'static [Self] = &[
                Self::Unknown,
                $(Self::$internal,)*
                $(Self::$internal_only,)*
            ];

            #[must_use]
            pub fn to_dxgi(self) -> DxgiFormat {
                match self {
                    Self::Unknown => DxgiFormat::Unknown,
                    $(Self::$internal => DxgiFormat::$shared,)*
                    $(Self::$internal_only)|* => {
                        log::warn!("No DXGI format for pixel format {self:?}");
                        DxgiFormat::Unknown
                    },
                }
            }
        }
    };
}

format_tables! {
    shared {
        R32G32B32A32Typeless = 1 => R32G32B32A32Typeless,
        R32G32B32A32Float = 2 => R32G32B32A32Float,
        R32G32B32A32Uint = 3 => R32G32B32A32Uint,
        R32G32B32A32Sint = 4 => R32G32B32A32Sint,
        R32G32B32Typeless = 5 => R32G32B32Typeless,
        R32G32B32Float = 6 => R32G32B32Float,
        R32G32B32Uint = 7 => R32G32B32Uint,
        R32G32B32Sint = 8 => R32G32B32Sint,
        R16G16B16A16Typeless = 9 => R16G16B16A16Typeless,
        R16G16B16A16Float = 10 => R16G16B16A16Float,
        R16G16B16A16Unorm = 11 => R16G16B16A16Unorm,
        R16G16B16A16Uint = 12 => R16G16B16A16Uint,
        R16G16B16A16Snorm = 13 => R16G16B16A16Snorm,
        R16G16B16A16Sint = 14 => R16G16B16A16Sint,
        R32G32Typeless = 15 => R32G32Typeless,
        R32G32Float = 16 => R32G32Float,
        R32G32Uint = 17 => R32G32Uint,
        R32G32Sint = 18 => R32G32Sint,
        R32G8X24Typeless = 19 => R32G8X24Typeless,
        D32FloatS8X24Uint = 20 => D32FloatS8X24Uint,
        R32FloatX8X24Typeless = 21 => R32FloatX8X24Typeless,
        X32TypelessG8X24Uint = 22 => X32TypelessG8X24Uint,
        R10G10B10A2Typeless = 23 => R10G10B10A2Typeless,
        R10G10B10A2Unorm = 24 => R10G10B10A2Unorm,
        R10G10B10A2Uint = 25 => R10G10B10A2Uint,
        R11G11B10Float = 26 => R11G11B10Float,
        R8G8B8A8Typeless = 27 => R8G8B8A8Typeless,
        R8G8B8A8Unorm = 28 => R8G8B8A8Unorm,
        R8G8B8A8UnormSrgb = 29 => R8G8B8A8UnormSrgb,
        R8G8B8A8Uint = 30 => R8G8B8A8Uint,
        R8G8B8A8Snorm = 31 => R8G8B8A8Snorm,
        R8G8B8A8Sint = 32 => R8G8B8A8Sint,
        R16G16Typeless = 33 => R16G16Typeless,
        R16G16Float = 34 => R16G16Float,
        R16G16Unorm = 35 => R16G16Unorm,
        R16G16Uint = 36 => R16G16Uint,
        R16G16Snorm = 37 => R16G16Snorm,
        R16G16Sint = 38 => R16G16Sint,
        R32Typeless = 39 => R32Typeless,
        D32Float = 40 => D32Float,
        R32Float = 41 => R32Float,
        R32Uint = 42 => R32Uint,
        R32Sint = 43 => R32Sint,
        R24G8Typeless = 44 => R24G8Typeless,
        D24UnormS8Uint = 45 => D24UnormS8Uint,
        R24UnormX8Typeless = 46 => R24UnormX8Typeless,
        X24TypelessG8Uint = 47 => X24TypelessG8Uint,
        R8G8Typeless = 48 => R8G8Typeless,
        R8G8Unorm = 49 => R8G8Unorm,
        R8G8Uint = 50 => R8G8Uint,
        R8G8Snorm = 51 => R8G8Snorm,
        R8G8Sint = 52 => R8G8Sint,
        R16Typeless = 53 => R16Typeless,
        R16Float = 54 => R16Float,
        D16Unorm = 55 => D16Unorm,
        R16Unorm = 56 => R16Unorm,
        R16Uint = 57 => R16Uint,
        R16Snorm = 58 => R16Snorm,
        R16Sint = 59 => R16Sint,
        R8Typeless = 60 => R8Typeless,
        R8Unorm = 61 => R8Unorm,
        R8Uint = 62 => R8Uint,
        R8Snorm = 63 => R8Snorm,
        R8Sint = 64 => R8Sint,
        A8Unorm = 65 => A8Unorm,
        R1Unorm = 66 => R1Unorm,
        R9G9B9E5SharedExp = 67 => R9G9B9E5SharedExp,
        R8G8B8G8Unorm = 68 => R8G8B8G8Unorm,
        G8R8G8B8Unorm = 69 => G8R8G8B8Unorm,
        Bc1Typeless = 70 => Bc1Typeless,
        Bc1Unorm = 71 => Bc1Unorm,
        Bc1UnormSrgb = 72 => Bc1UnormSrgb,
        Bc2Typeless = 73 => Bc2Typeless,
        Bc2Unorm = 74 => Bc2Unorm,
        Bc2UnormSrgb = 75 => Bc2UnormSrgb,
        Bc3Typeless = 76 => Bc3Typeless,
        Bc3Unorm = 77 => Bc3Unorm,
        Bc3UnormSrgb = 78 => Bc3UnormSrgb,
        Bc4Typeless = 79 => Bc4Typeless,
        Bc4Unorm = 80 => Bc4Unorm,
        Bc4Snorm = 81 => Bc4Snorm,
        Bc5Typeless = 82 => Bc5Typeless,
        Bc5Unorm = 83 => Bc5Unorm,
        Bc5Snorm = 84 => Bc5Snorm,
        B5G6R5Unorm = 85 => B5G6R5Unorm,
        B5G5R5A1Unorm = 86 => B5G5R5A1Unorm,
        B8G8R8A8Unorm = 87 => B8G8R8A8Unorm,
        B8G8R8X8Unorm = 88 => B8G8R8X8Unorm,
        R10G10B10XrBiasA2Unorm = 89 => R10G10B10XrBiasA2Unorm,
        B8G8R8A8Typeless = 90 => B8G8R8A8Typeless,
        B8G8R8A8UnormSrgb = 91 => B8G8R8A8UnormSrgb,
        B8G8R8X8Typeless = 92 => B8G8R8X8Typeless,
        B8G8R8X8UnormSrgb = 93 => B8G8R8X8UnormSrgb,
        Bc6hTypeless = 94 => Bc6hTypeless,
        Bc6hUf16 = 95 => Bc6hUf16,
        Bc6hSf16 = 96 => Bc6hSf16,
        Bc7Typeless = 97 => Bc7Typeless,
        Bc7Unorm = 98 => Bc7Unorm,
        Bc7UnormSrgb = 99 => Bc7UnormSrgb,
        Ayuv = 100 => Ayuv,
        Nv12 = 103 => Nv12,
        Yuy2 = 107 => Yuy2,
        P8 = 113 => P8Uint,
        A8P8 = 114 => P8UintA8Unorm,
        B4G4R4A4Unorm = 115 => B4G4R4A4Unorm,
    }
    dxgi_only {
        Y410 = 101,
        Y416 = 102,
        P010 = 104,
        P016 = 105,
        Opaque420 = 106,
        Y210 = 108,
        Y216 = 109,
        Nv11 = 110,
        Ai44 = 111,
        Ia44 = 112,
        P208 = 130,
        V208 = 131,
        V408 = 132,
    }
    internal_only {
        B8G8R8Unorm,
        B5G5R5X1Unorm,
        B4G4R4X4Unorm,
        B2G3R3Unorm,
        B2G3R3A8Unorm,
        B10G10R10A2Unorm,
        R8G8B8X8Unorm,
        R10G10B10X2Typeless,
        R10G10B10X2Snorm,
        R10G11B11Snorm,
        L8Unorm,
        L8A8Unorm,
        L4A4Unorm,
        L16Unorm,
        R5G5SnormL6Unorm,
        R8G8SnormL8X8Unorm,
        D16Lockable,
        D32Unorm,
        S1UintD15Unorm,
        X8D24Unorm,
        S4X4UintD24Unorm,
        S8UintD24Float,
        Uyvy,
        Yv12,
        Dxt1,
        Dxt2,
        Dxt3,
        Dxt4,
        Dxt5,
        Ati1n,
        Ati2n,
        Null,
    }
}

impl DxgiFormat {
    #[must_use]
    pub fn is_srgb(self) -> bool {
        matches!(
            self,
            Self::R8G8B8A8UnormSrgb
                | Self::Bc1UnormSrgb
                | Self::Bc2UnormSrgb
                | Self::Bc3UnormSrgb
                | Self::B8G8R8A8UnormSrgb
                | Self::B8G8R8X8UnormSrgb
                | Self::Bc7UnormSrgb
        )
    }

    /// Whether the format is a depth or depth/stencil format
    #[must_use]
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            Self::D32FloatS8X24Uint | Self::D32Float | Self::D24UnormS8Uint | Self::D16Unorm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        assert_eq!(DxgiFormat::from_u32(28), DxgiFormat::R8G8B8A8Unorm);
        assert_eq!(DxgiFormat::from_u32(87), DxgiFormat::B8G8R8A8Unorm);
        assert_eq!(DxgiFormat::from_u32(132), DxgiFormat::V408);
        assert_eq!(DxgiFormat::B4G4R4A4Unorm.value(), 115);
    }

    #[test]
    fn unknown_values_degrade() {
        assert_eq!(DxgiFormat::from_u32(116), DxgiFormat::Unknown);
        assert_eq!(DxgiFormat::from_u32(u32::MAX), DxgiFormat::Unknown);
        assert_eq!(DxgiFormat::Y410.to_pixel_format(), PixelFormat::Unknown);
        assert_eq!(PixelFormat::B8G8R8Unorm.to_dxgi(), DxgiFormat::Unknown);
    }

    #[test]
    fn palettized_formats_are_renamed() {
        assert_eq!(DxgiFormat::P8.to_pixel_format(), PixelFormat::P8Uint);
        assert_eq!(PixelFormat::P8UintA8Unorm.to_dxgi(), DxgiFormat::A8P8);
    }

    #[test]
    fn shared_formats_survive_both_directions() {
        for &format in DxgiFormat::ALL {
            let internal = format.to_pixel_format();
            if internal != PixelFormat::Unknown {
                assert_eq!(internal.to_dxgi(), format);
                assert_eq!(DxgiFormat::from_u32(format.value()), format);
            }
        }

        let mapped = PixelFormat::ALL
            .iter()
            .filter(|format| format.to_dxgi() != DxgiFormat::Unknown)
            .count();
        assert_eq!(mapped, 105);
    }

    #[test]
    fn classification() {
        assert!(DxgiFormat::B8G8R8X8UnormSrgb.is_srgb());
        assert!(!DxgiFormat::B8G8R8X8Unorm.is_srgb());
        assert!(DxgiFormat::D24UnormS8Uint.is_depth());
        assert!(!DxgiFormat::R24UnormX8Typeless.is_depth());
    }
}
