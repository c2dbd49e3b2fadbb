//! Feature level negotiation

use std::fmt;

/// `D3D_FEATURE_LEVEL`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum FeatureLevel {
    Level9_1 = 0x9100,
    Level9_2 = 0x9200,
    Level9_3 = 0x9300,
    Level10_0 = 0xa000,
    Level10_1 = 0xa100,
    Level11_0 = 0xb000,
    Level11_1 = 0xb100,
    Level12_0 = 0xc000,
    Level12_1 = 0xc100,
}

impl FeatureLevel {
    /// Unknown values are reported and yield `None`
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        let level = match value {
            0x9100 => Self::Level9_1,
            0x9200 => Self::Level9_2,
            0x9300 => Self::Level9_3,
            0xa000 => Self::Level10_0,
            0xa100 => Self::Level10_1,
            0xb000 => Self::Level11_0,
            0xb100 => Self::Level11_1,
            0xc000 => Self::Level12_0,
            0xc100 => Self::Level12_1,
            _ => {
                log::warn!("Unknown feature level {value:#x}");
                return None;
            },
        };
        Some(level)
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value();
        write!(f, "{}_{}", value >> 12, (value >> 8) & 0xf)
    }
}

/// Shader versions supported by each programmable stage, as major version numbers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShaderCaps {
    pub vertex: u32,
    pub pixel: u32,
    pub geometry: u32,
    pub hull: u32,
    pub domain: u32,
}

impl ShaderCaps {
    /// The shader model all stages agree on
    ///
    /// Stages that only exist from a given model on don't hold back the models
    /// before it.
    #[must_use]
    pub fn shader_model(&self) -> u32 {
        self.vertex
            .min(self.pixel)
            .min(self.geometry.max(3))
            .min(self.hull.max(4))
            .min(self.domain.max(4))
    }
}

/// Minimum shader model for each level, highest level first
const LEVELS_BY_SHADER_MODEL: [(u32, FeatureLevel); 4] = [
    (5, FeatureLevel::Level11_1),
    (4, FeatureLevel::Level10_1),
    (3, FeatureLevel::Level9_3),
    (2, FeatureLevel::Level9_2),
];

/// The highest feature level a shader model can support
#[must_use]
pub fn max_feature_level(shader_model: u32) -> Option<FeatureLevel> {
    LEVELS_BY_SHADER_MODEL
        .iter()
        .find(|(required, _)| shader_model >= *required)
        .map(|(_, level)| *level)
}

/// Pick the first requested level the device can provide
///
/// Returns `None` if there is no such level, including when nothing was requested.
#[must_use]
pub fn select_feature_level(requested: &[FeatureLevel], shader_model: u32) -> Option<FeatureLevel> {
    let Some(supported) = max_feature_level(shader_model) else {
        log::warn!("Shader model {shader_model} supports no feature level");
        return None;
    };

    let selected = requested.iter().copied().find(|level| *level <= supported);
    if selected.is_none() {
        log::warn!("None of the requested feature levels is supported, the maximum is {supported}");
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_by_shader_model() {
        assert_eq!(max_feature_level(6), Some(FeatureLevel::Level11_1));
        assert_eq!(max_feature_level(4), Some(FeatureLevel::Level10_1));
        assert_eq!(max_feature_level(2), Some(FeatureLevel::Level9_2));
        assert_eq!(max_feature_level(1), None);
    }

    #[test]
    fn first_supported_request_wins() {
        let requested = [
            FeatureLevel::Level12_0,
            FeatureLevel::Level10_0,
            FeatureLevel::Level10_1,
        ];
        assert_eq!(
            select_feature_level(&requested, 4),
            Some(FeatureLevel::Level10_0)
        );
        assert_eq!(select_feature_level(&requested, 3), None);
        assert_eq!(select_feature_level(&[], 5), None);
    }

    #[test]
    fn shader_model_from_caps() {
        let caps = ShaderCaps {
            vertex: 4,
            pixel: 4,
            geometry: 4,
            hull: 0,
            domain: 0,
        };
        assert_eq!(caps.shader_model(), 4);

        let caps = ShaderCaps {
            vertex: 3,
            pixel: 3,
            ..ShaderCaps::default()
        };
        assert_eq!(caps.shader_model(), 3);

        let caps = ShaderCaps {
            vertex: 5,
            pixel: 5,
            geometry: 5,
            hull: 5,
            domain: 4,
        };
        assert_eq!(caps.shader_model(), 4);
    }

    #[test]
    fn numeric_values() {
        assert_eq!(FeatureLevel::from_u32(0xb000), Some(FeatureLevel::Level11_0));
        assert_eq!(FeatureLevel::from_u32(0xb200), None);
        assert_eq!(FeatureLevel::Level9_3.to_string(), "9_3");
        assert_eq!(FeatureLevel::Level12_1.to_string(), "12_1");
    }
}
