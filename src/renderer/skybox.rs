use super::shader::{Shader, TextureBinding};

/// Cube-map environment drawn behind the scene.
#[derive(Clone, Debug)]
pub struct Skybox {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl Skybox {
    /// `view` must be a cube view of a six-layer texture.
    pub fn new(view: wgpu::TextureView, sampler: wgpu::Sampler) -> Self {
        Self { view, sampler }
    }

    /// Six-face cube from RGBA8 face images ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn from_faces(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        faces: &[image::RgbaImage; 6],
    ) -> Self {
        let (width, height) = faces[0].dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Skybox"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, face) in faces.iter().enumerate() {
            if face.dimensions() != (width, height) {
                log::warn!(
                    "Skybox face {} is {:?}, expected {}x{}; skipping",
                    layer,
                    face.dimensions(),
                    width,
                    height
                );
                continue;
            }

            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                face.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Skybox View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Skybox Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { view, sampler }
    }

    pub fn bind(&self, slot: u32, shader: &dyn Shader) {
        shader.bind_texture(
            slot,
            TextureBinding {
                view: self.view.clone(),
                sampler: Some(self.sampler.clone()),
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                dimension: wgpu::TextureViewDimension::Cube,
                multisampled: false,
            },
        );
    }
}
