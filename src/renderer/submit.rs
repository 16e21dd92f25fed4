use glam::Mat4;

use super::geometry::Geometry;
use super::lights::{DirectionalLightData, PointLightData, SpotLightData};
use super::shader::Shader;
use crate::camera::EditorCamera;

/// Records draws between `begin_scene` and `end_scene`.
///
/// Implementations own pipelines and per-frame uniforms such as the
/// view-projection matrix and the light block; the scene renderer only decides
/// what is drawn, with which shader and into which pass. Draws recorded outside
/// a scene bracket reuse the camera of the last `begin_scene`.
pub trait DrawSubmitter {
    fn begin_scene(&mut self, camera: &EditorCamera, view: Mat4);

    fn submit_directional_lights(&mut self, lights: &[DirectionalLightData]);
    fn submit_point_lights(&mut self, lights: &[PointLightData]);
    fn submit_spot_lights(&mut self, lights: &[SpotLightData]);

    /// Draws the environment cube with translation stripped from the view.
    fn submit_skybox(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        shader: &dyn Shader,
        geometry: &Geometry,
    );

    /// Binds `shader` on `pass` and draws `geometry` once.
    ///
    /// `entity_id` is written to the target's integer attachment when present.
    fn submit(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        shader: &dyn Shader,
        geometry: &Geometry,
        transform: Mat4,
        entity_id: Option<u32>,
    );

    fn end_scene(&mut self);
}
