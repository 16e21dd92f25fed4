use std::sync::Arc;

use glam::{Mat4, Vec3};

/// A sampled texture handed to a shader slot.
///
/// The shader owns its bind group layouts; the binding carries everything
/// needed to build a matching entry.
#[derive(Clone, Debug)]
pub struct TextureBinding {
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
    pub sample_type: wgpu::TextureSampleType,
    pub dimension: wgpu::TextureViewDimension,
    pub multisampled: bool,
}

/// A compiled program addressed by uniform name.
///
/// Array elements are addressed as `"name[i]"`, see [`uniform_array_element`].
/// Uniform setters take `&self` so one shader can be shared between passes
/// and components. Implementations stage values and apply them at the next
/// `bind`, so every draw sees the values set before it was recorded.
pub trait Shader: Send + Sync {
    fn path(&self) -> &str;

    /// Makes this program current on `pass`, flushing staged uniforms and textures.
    fn bind(&self, pass: &mut wgpu::RenderPass<'_>);

    fn set_int(&self, name: &str, value: i32);
    fn set_float(&self, name: &str, value: f32);
    fn set_vec3(&self, name: &str, value: Vec3);
    fn set_mat4(&self, name: &str, value: Mat4);

    fn bind_texture(&self, slot: u32, binding: TextureBinding);
}

/// Resolves shader asset paths to programs.
pub trait ShaderLoader {
    fn load(&mut self, path: &str) -> Arc<dyn Shader>;
}

pub fn uniform_array_element(name: &str, index: usize) -> String {
    format!("{name}[{index}]")
}
