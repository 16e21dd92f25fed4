// renderer/formats.rs
// Provider-agnostic attachment formats and their wgpu translations.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttachmentFormat {
    #[default]
    None,
    /// Byte color, filtered linearly when sampled.
    Rgba8,
    /// One signed integer per texel; used for entity ids.
    RedInteger,
    Depth24Stencil8,
    Depth32,
}

impl AttachmentFormat {
    pub fn is_depth(self) -> bool {
        matches!(self, Self::Depth24Stencil8 | Self::Depth32)
    }

    pub fn is_color(self) -> bool {
        matches!(self, Self::Rgba8 | Self::RedInteger)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::RedInteger)
    }

    /// Bytes per texel when copied out of the GPU.
    pub fn texel_size(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rgba8 | Self::RedInteger | Self::Depth24Stencil8 | Self::Depth32 => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureWrap {
    #[default]
    None,
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

pub fn texture_format(format: AttachmentFormat) -> Option<wgpu::TextureFormat> {
    match format {
        AttachmentFormat::Rgba8 => Some(wgpu::TextureFormat::Rgba8Unorm),
        AttachmentFormat::RedInteger => Some(wgpu::TextureFormat::R32Sint),
        AttachmentFormat::Depth24Stencil8 => Some(wgpu::TextureFormat::Depth24PlusStencil8),
        AttachmentFormat::Depth32 => Some(wgpu::TextureFormat::Depth32Float),
        AttachmentFormat::None => {
            log::error!("Unrecognized render target attachment format");
            None
        }
    }
}

pub fn sample_type(format: AttachmentFormat) -> Option<wgpu::TextureSampleType> {
    match format {
        AttachmentFormat::Rgba8 => Some(wgpu::TextureSampleType::Float { filterable: true }),
        AttachmentFormat::RedInteger => Some(wgpu::TextureSampleType::Sint),
        AttachmentFormat::Depth24Stencil8 | AttachmentFormat::Depth32 => {
            Some(wgpu::TextureSampleType::Depth)
        }
        AttachmentFormat::None => {
            log::error!("Unrecognized render target attachment format");
            None
        }
    }
}

pub fn filter_mode(format: AttachmentFormat) -> wgpu::FilterMode {
    if format.is_integer() {
        wgpu::FilterMode::Nearest
    } else {
        wgpu::FilterMode::Linear
    }
}

/// `supports_border` reflects `ADDRESS_MODE_CLAMP_TO_BORDER` on the device.
pub fn address_mode(wrap: TextureWrap, supports_border: bool) -> Option<wgpu::AddressMode> {
    match wrap {
        TextureWrap::Repeat => Some(wgpu::AddressMode::Repeat),
        TextureWrap::MirroredRepeat => Some(wgpu::AddressMode::MirrorRepeat),
        TextureWrap::ClampToEdge => Some(wgpu::AddressMode::ClampToEdge),
        TextureWrap::ClampToBorder if supports_border => Some(wgpu::AddressMode::ClampToBorder),
        TextureWrap::ClampToBorder => {
            log::debug!("Border clamp unavailable, clamping to edge");
            Some(wgpu::AddressMode::ClampToEdge)
        }
        TextureWrap::None => {
            log::error!("Unrecognized texture wrap mode");
            None
        }
    }
}
