//! Multisampling descriptions

/// `DXGI_SAMPLE_DESC`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self {
            count: 1,
            quality: 0,
        }
    }
}

/// The renderer's multisample type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MultisampleType {
    #[default]
    None,
    NonMaskable,

    /// Between 2 and [MultisampleType::MAX_SAMPLES] samples
    Samples(u8),
}

impl MultisampleType {
    pub const MAX_SAMPLES: u32 = 16;

    #[must_use]
    pub fn sample_count(self) -> u32 {
        match self {
            Self::None | Self::NonMaskable => 1,
            Self::Samples(count) => count.into(),
        }
    }
}

/// Translate a sample description into a multisample type and quality level
///
/// A single sample means no multisampling. Counts the renderer cannot represent
/// degrade to no multisampling as well.
#[must_use]
pub fn multisample_from_dxgi(desc: SampleDesc) -> (MultisampleType, u32) {
    match desc.count {
        1 => (MultisampleType::None, 0),
        count @ 2..=MultisampleType::MAX_SAMPLES => {
            (MultisampleType::Samples(count as u8), desc.quality)
        },
        count => {
            log::warn!("Unsupported sample count {count}, disabling multisampling");
            (MultisampleType::None, 0)
        },
    }
}

#[must_use]
pub fn sample_desc_from_multisample(multisample: MultisampleType, quality: u32) -> SampleDesc {
    SampleDesc {
        count: multisample.sample_count(),
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_is_no_multisampling() {
        let desc = SampleDesc {
            count: 1,
            quality: 3,
        };
        assert_eq!(multisample_from_dxgi(desc), (MultisampleType::None, 0));
    }

    #[test]
    fn sample_counts_are_kept() {
        let desc = SampleDesc {
            count: 4,
            quality: 2,
        };
        let (multisample, quality) = multisample_from_dxgi(desc);
        assert_eq!(multisample, MultisampleType::Samples(4));
        assert_eq!(sample_desc_from_multisample(multisample, quality), desc);
    }

    #[test]
    fn unknown_counts_fall_back_to_none() {
        for count in [0, 17, 64] {
            let desc = SampleDesc { count, quality: 1 };
            assert_eq!(multisample_from_dxgi(desc), (MultisampleType::None, 0));
        }
        assert_eq!(
            sample_desc_from_multisample(MultisampleType::NonMaskable, 5),
            SampleDesc {
                count: 1,
                quality: 5
            }
        );
    }
}
