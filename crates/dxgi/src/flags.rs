//! Resource usage flags

use bitflags::bitflags;

bitflags! {
    /// `DXGI_USAGE`
    ///
    /// The low four bits are not flags but a [CpuAccess] value.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Usage: u32 {
        const CPU_ACCESS_FIELD = 0xf;
        const SHADER_INPUT = 0x10;
        const RENDER_TARGET_OUTPUT = 0x20;
        const BACK_BUFFER = 0x40;
        const SHARED = 0x80;
        const READ_ONLY = 0x100;
        const DISCARD_ON_PRESENT = 0x200;
        const UNORDERED_ACCESS = 0x400;
    }
}

bitflags! {
    /// How the renderer may bind a resource to the pipeline
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const STREAM_OUTPUT = 0x10;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
        const DECODER = 0x200;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpuAccess {
    #[default]
    None,
    Dynamic,
    ReadWrite,
    Scratch,
}

impl Usage {
    #[must_use]
    pub fn cpu_access(self) -> CpuAccess {
        match (self & Self::CPU_ACCESS_FIELD).bits() {
            0 => CpuAccess::None,
            1 => CpuAccess::Dynamic,
            2 => CpuAccess::ReadWrite,
            3 => CpuAccess::Scratch,
            other => {
                log::warn!("Unknown CPU access {other:#x}");
                CpuAccess::None
            },
        }
    }

    #[must_use]
    pub fn with_cpu_access(self, access: CpuAccess) -> Self {
        let field = match access {
            CpuAccess::None => 0,
            CpuAccess::Dynamic => 1,
            CpuAccess::ReadWrite => 2,
            CpuAccess::Scratch => 3,
        };
        (self - Self::CPU_ACCESS_FIELD) | Self::from_bits_retain(field)
    }
}

const USAGE_TO_BIND: [(Usage, BindFlags); 3] = [
    (Usage::SHADER_INPUT, BindFlags::SHADER_RESOURCE),
    (Usage::RENDER_TARGET_OUTPUT, BindFlags::RENDER_TARGET),
    (Usage::UNORDERED_ACCESS, BindFlags::UNORDERED_ACCESS),
];

/// Translate the binding related part of a usage
///
/// Usage bits without a binding counterpart are reported and dropped, the CPU access
/// field is ignored.
#[must_use]
pub fn bind_flags_from_usage(usage: Usage) -> BindFlags {
    let mut remaining = usage - Usage::CPU_ACCESS_FIELD;
    let mut bind_flags = BindFlags::empty();

    for (usage_flag, bind_flag) in USAGE_TO_BIND {
        if remaining.contains(usage_flag) {
            bind_flags |= bind_flag;
            remaining -= usage_flag;
        }
    }

    if !remaining.is_empty() {
        log::warn!("Unhandled usage flags {:#x}", remaining.bits());
    }
    bind_flags
}

#[must_use]
pub fn usage_from_bind_flags(bind_flags: BindFlags) -> Usage {
    let mut remaining = bind_flags;
    let mut usage = Usage::empty();

    for (usage_flag, bind_flag) in USAGE_TO_BIND {
        if remaining.contains(bind_flag) {
            usage |= usage_flag;
            remaining -= bind_flag;
        }
    }

    if !remaining.is_empty() {
        log::warn!("Unhandled bind flags {:#x}", remaining.bits());
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_to_bind_flags() {
        let usage = Usage::SHADER_INPUT | Usage::RENDER_TARGET_OUTPUT;
        assert_eq!(
            bind_flags_from_usage(usage),
            BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET
        );
        assert_eq!(
            usage_from_bind_flags(BindFlags::UNORDERED_ACCESS),
            Usage::UNORDERED_ACCESS
        );
    }

    #[test]
    fn unmapped_bits_are_dropped() {
        let usage = Usage::BACK_BUFFER | Usage::SHADER_INPUT | Usage::from_bits_retain(0x8000);
        assert_eq!(bind_flags_from_usage(usage), BindFlags::SHADER_RESOURCE);
        assert_eq!(
            usage_from_bind_flags(BindFlags::DEPTH_STENCIL | BindFlags::VERTEX_BUFFER),
            Usage::empty()
        );
    }

    #[test]
    fn cpu_access_field() {
        let usage = Usage::SHADER_INPUT.with_cpu_access(CpuAccess::Scratch);
        assert_eq!(usage.bits(), 0x13);
        assert_eq!(usage.cpu_access(), CpuAccess::Scratch);
        assert_eq!(bind_flags_from_usage(usage), BindFlags::SHADER_RESOURCE);

        let usage = usage.with_cpu_access(CpuAccess::Dynamic);
        assert_eq!(usage.cpu_access(), CpuAccess::Dynamic);
        assert_eq!(Usage::from_bits_retain(0xf).cpu_access(), CpuAccess::None);
    }
}
