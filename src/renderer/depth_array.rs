use crate::camera::SHADOW_CASCADE_COUNT;

pub const SHADOW_MAP_RESOLUTION: u32 = 1280;
pub const SHADOW_CASCADE_LAYERS: u32 = SHADOW_CASCADE_COUNT as u32;
pub const SHADOW_MAP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Layered depth texture written one cascade at a time and sampled as a whole.
///
/// Clones share the same GPU texture.
#[derive(Clone, Debug)]
pub struct DepthTextureArray {
    texture: wgpu::Texture,
    array_view: wgpu::TextureView,
    layer_views: Vec<wgpu::TextureView>,
    sampler: wgpu::Sampler,
    size: u32,
}

impl DepthTextureArray {
    pub fn new(device: &wgpu::Device, label: &str, layers: u32, size: u32) -> Self {
        let layers = layers.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: layers,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_MAP_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let array_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&format!("{label}ArrayView")),
            format: Some(SHADOW_MAP_FORMAT),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            aspect: wgpu::TextureAspect::DepthOnly,
            base_mip_level: 0,
            mip_level_count: None,
            base_array_layer: 0,
            array_layer_count: Some(layers),
            ..Default::default()
        });

        let layer_views = (0..layers)
            .map(|layer| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some(&format!("{label}Layer{layer}")),
                    format: Some(SHADOW_MAP_FORMAT),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    aspect: wgpu::TextureAspect::All,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: layer,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();

        let border = device
            .features()
            .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
        let address_mode = if border {
            wgpu::AddressMode::ClampToBorder
        } else {
            wgpu::AddressMode::ClampToEdge
        };

        // Outside the map reads as fully lit.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{label}Sampler")),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            border_color: border.then_some(wgpu::SamplerBorderColor::OpaqueWhite),
            ..Default::default()
        });

        log::debug!(
            "Created depth texture array '{}' ({}x{}, {} layers)",
            label,
            size,
            size,
            layers
        );

        Self {
            texture,
            array_view,
            layer_views,
            sampler,
            size,
        }
    }

    /// The cascade shadow map: [`SHADOW_CASCADE_LAYERS`] layers at [`SHADOW_MAP_RESOLUTION`].
    pub fn cascades(device: &wgpu::Device) -> Self {
        Self::new(
            device,
            "CascadeShadowMap",
            SHADOW_CASCADE_LAYERS,
            SHADOW_MAP_RESOLUTION,
        )
    }

    pub fn layer_view(&self, layer: u32) -> &wgpu::TextureView {
        assert!(
            (layer as usize) < self.layer_views.len(),
            "Depth layer {} out of range ({} layers)",
            layer,
            self.layer_views.len()
        );
        &self.layer_views[layer as usize]
    }

    pub fn array_view(&self) -> &wgpu::TextureView {
        &self.array_view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn layer_count(&self) -> u32 {
        self.layer_views.len() as u32
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}
