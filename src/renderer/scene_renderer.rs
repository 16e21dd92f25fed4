// renderer/scene_renderer.rs
// Shadow, forward and outline passes over a hecs scene.

use std::sync::Arc;

use glam::Mat4;
use hecs::Entity;

use super::context::GpuContext;
use super::depth_array::DepthTextureArray;
use super::formats::{AttachmentFormat, TextureWrap};
use super::geometry::Geometry;
use super::render_target::{
    AttachmentSpec, ClearFlags, ClearValue, RenderTarget, RenderTargetSpec,
};
use super::shader::{uniform_array_element, Shader, ShaderLoader};
use super::submit::DrawSubmitter;
use crate::camera::EditorCamera;
use crate::scene::{
    collect_lights, shadow_light_direction, MeshComponent, MeshRendererComponent, Scene,
    TransformComponent, NO_ENTITY_ID,
};
use crate::settings::RenderSettings;

pub const DEPTH_SHADER_PATH: &str = "assets/shaders/depth.wgsl";
pub const DEBUG_SHADER_PATH: &str = "assets/shaders/debug.wgsl";
pub const SKYBOX_SHADER_PATH: &str = "assets/shaders/skybox.wgsl";
pub const OUTLINE_SHADER_PATH: &str = "assets/shaders/outline.wgsl";
pub const OUTLINE_TEMP_SHADER_PATH: &str = "assets/shaders/outline-temp.wgsl";

/// Texture slot the cascade shadow map is bound to in forward shaders.
pub const SHADOW_MAP_SLOT: u32 = 0;
const SKYBOX_SLOT: u32 = 0;
const ID_TEXTURE_SLOT: u32 = 0;

/// Programs used by the renderer's own passes.
#[derive(Clone)]
pub struct SceneShaders {
    pub depth: Arc<dyn Shader>,
    pub debug: Arc<dyn Shader>,
    pub skybox: Arc<dyn Shader>,
    pub outline: Arc<dyn Shader>,
    pub outline_temp: Arc<dyn Shader>,
}

impl SceneShaders {
    pub fn load(loader: &mut dyn ShaderLoader) -> Self {
        Self {
            depth: loader.load(DEPTH_SHADER_PATH),
            debug: loader.load(DEBUG_SHADER_PATH),
            skybox: loader.load(SKYBOX_SHADER_PATH),
            outline: loader.load(OUTLINE_SHADER_PATH),
            outline_temp: loader.load(OUTLINE_TEMP_SHADER_PATH),
        }
    }
}

/// Renders a [`Scene`] into a caller-supplied target.
///
/// Per frame: [`render_editor`](Self::render_editor) runs the shadow pass and
/// the forward pass; [`render_outline`](Self::render_outline) optionally follows
/// for the selected entity. Everything is recorded into the caller's encoder.
pub struct SceneRenderer {
    settings: RenderSettings,
    shaders: SceneShaders,
    shadow_target: RenderTarget,
    shadow_map: DepthTextureArray,
    outline_target: RenderTarget,
    target: Option<RenderTarget>,
    skybox_geometry: Geometry,
    screen_quad: Geometry,
}

impl SceneRenderer {
    /// Cascade matrices are fitted with `settings.cascade_z_multiplier`; the
    /// camera's own multiplier only affects direct calls on the camera.
    pub fn new(context: &GpuContext, shaders: SceneShaders, settings: RenderSettings) -> Self {
        let outline_spec = RenderTargetSpec::new(
            settings.outline_resolution.width,
            settings.outline_resolution.height,
            [
                AttachmentSpec::new(AttachmentFormat::RedInteger)
                    .with_wrap(TextureWrap::ClampToBorder),
                AttachmentSpec::new(AttachmentFormat::Depth24Stencil8),
            ],
        );
        let outline_target = RenderTarget::new(context, outline_spec);

        let shadow_size = settings.shadow_map_size;
        let shadow_spec =
            RenderTargetSpec::new(shadow_size, shadow_size, [AttachmentFormat::Depth32]);
        let mut shadow_target = RenderTarget::new(context, shadow_spec);
        let shadow_map = shadow_target.attach_depth_texture_with_size(shadow_size);

        shaders.skybox.set_int("u_cubemap", SKYBOX_SLOT as i32);

        log::info!(
            "Scene renderer ready: {} shadow cascades at {}px, outline {}x{}",
            shadow_map.layer_count(),
            shadow_size,
            outline_target.width(),
            outline_target.height()
        );

        Self {
            settings,
            shaders,
            shadow_target,
            shadow_map,
            outline_target,
            target: None,
            skybox_geometry: Geometry::skybox_cube(&context.device),
            screen_quad: Geometry::screen_quad(&context.device),
        }
    }

    /// Sets the target the forward and outline passes draw into.
    pub fn set_target_framebuffer(&mut self, target: RenderTarget) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut RenderTarget> {
        self.target.as_mut()
    }

    pub fn on_viewport_resize(&mut self, width: u32, height: u32) {
        self.outline_target.resize(width, height);
        if let Some(target) = &mut self.target {
            target.resize(width, height);
        }
    }

    /// Renders every cascade of the shadow map for the scene's shadow-casting light.
    ///
    /// Without a directional light the map is only cleared, so every lookup
    /// reads as lit.
    pub fn render_shadows(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &Scene,
        camera: &EditorCamera,
        submitter: &mut dyn DrawSubmitter,
    ) {
        let depth = self.shaders.depth.as_ref();

        self.shadow_target.clear_depth_attachment(encoder);

        let Some(light_dir) = shadow_light_direction(&scene.world) else {
            log::trace!("No directional light, skipping shadow casters");
            return;
        };

        let matrices = camera
            .light_space_matrices_with_multiplier(light_dir, self.settings.cascade_z_multiplier);
        upload_light_space_matrices(depth, &matrices);

        for layer in 0..self.shadow_map.layer_count() {
            depth.set_int("cascadeIndex", layer as i32);
            let mut pass = self.shadow_target.bind_layer(encoder, layer);

            for (entity, (_renderer, mesh, transform)) in scene
                .world
                .query::<(&MeshRendererComponent, &MeshComponent, &TransformComponent)>()
                .iter()
            {
                depth.set_mat4("model", transform.model());
                submitter.submit(
                    &mut pass,
                    depth,
                    mesh.geometry(),
                    transform.transform(),
                    Some(Scene::entity_id(entity)),
                );
            }
        }
    }

    /// Shadow pass followed by the lit forward pass into the target.
    pub fn render_editor(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &Scene,
        camera: &EditorCamera,
        submitter: &mut dyn DrawSubmitter,
    ) {
        self.render_shadows(encoder, scene, camera, submitter);

        let target = self.main_target();
        target.clear(
            encoder,
            ClearFlags::COLOR | ClearFlags::DEPTH,
            self.settings.clear_color(),
        );
        if let Some(index) = target.integer_attachment_index() {
            target.clear_attachment(encoder, index, ClearValue::Int(NO_ENTITY_ID as i32));
        }

        let view = camera.view_matrix();
        let z_multiplier = self.settings.cascade_z_multiplier;
        let light_space_matrices = shadow_light_direction(&scene.world)
            .map(|dir| camera.light_space_matrices_with_multiplier(dir, z_multiplier));

        submitter.begin_scene(camera, view);

        let lights = collect_lights(&scene.world);
        submitter.submit_directional_lights(lights.directional_lights());
        submitter.submit_point_lights(lights.point_lights());
        submitter.submit_spot_lights(lights.spot_lights());

        {
            let mut pass = target.bind(encoder);

            if let Some(skybox) = scene.skybox() {
                let shader = self.shaders.skybox.as_ref();
                skybox.bind(SKYBOX_SLOT, shader);
                submitter.submit_skybox(&mut pass, shader, &self.skybox_geometry);
            }

            for (entity, (renderer, mesh, transform)) in scene
                .world
                .query::<(&MeshRendererComponent, &MeshComponent, &TransformComponent)>()
                .iter()
            {
                let shader = renderer.shader.as_ref();
                shader.set_int("depthMap", SHADOW_MAP_SLOT as i32);
                target.bind_depth_texture_array(&self.shadow_map, SHADOW_MAP_SLOT, shader);
                upload_cascade_planes(shader, camera);
                if let Some(matrices) = &light_space_matrices {
                    upload_light_space_matrices(shader, matrices);
                }
                shader.set_mat4("view", view);

                submitter.submit(
                    &mut pass,
                    shader,
                    mesh.geometry(),
                    transform.transform(),
                    Some(Scene::entity_id(entity)),
                );
            }
        }

        submitter.end_scene();
    }

    /// Draws an outline around `selected` on top of the target.
    ///
    /// The selection is rendered as an id mask into the outline target, which
    /// the outline shader then edge-detects over a screen quad.
    pub fn render_outline(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene: &Scene,
        selected: Option<Entity>,
        submitter: &mut dyn DrawSubmitter,
    ) {
        self.outline_target
            .clear_attachment(encoder, 0, ClearValue::Int(NO_ENTITY_ID as i32));
        self.outline_target.clear_depth_attachment(encoder);

        if let Some(entity) = selected {
            if let Ok(mut query) = scene
                .world
                .query_one::<(&TransformComponent, &MeshComponent)>(entity)
            {
                if let Some((transform, mesh)) = query.get() {
                    let mut pass = self.outline_target.bind(encoder);
                    submitter.submit(
                        &mut pass,
                        self.shaders.outline_temp.as_ref(),
                        mesh.geometry(),
                        transform.transform(),
                        None,
                    );
                }
            }
        }

        let outline = self.shaders.outline.as_ref();
        self.outline_target
            .bind_color_attachment(0, ID_TEXTURE_SLOT, outline);
        outline.set_int("IDTexture", ID_TEXTURE_SLOT as i32);

        let mut pass = self.main_target().bind(encoder);
        submitter.submit(&mut pass, outline, &self.screen_quad, Mat4::IDENTITY, None);
    }

    /// Shows one cascade layer of the shadow map over the whole target.
    pub fn render_shadow_debug(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        layer: u32,
        submitter: &mut dyn DrawSubmitter,
    ) {
        assert!(
            layer < self.shadow_map.layer_count(),
            "Shadow layer {} out of range ({} layers)",
            layer,
            self.shadow_map.layer_count()
        );

        let debug = self.shaders.debug.as_ref();
        let target = self.main_target();
        target.bind_depth_texture_array(&self.shadow_map, SHADOW_MAP_SLOT, debug);
        debug.set_int("depthMap", SHADOW_MAP_SLOT as i32);
        debug.set_int("layer", layer as i32);

        let mut pass = target.bind(encoder);
        submitter.submit(&mut pass, debug, &self.screen_quad, Mat4::IDENTITY, None);
    }

    /// Entity under `(x, y)` in the target's id attachment; top-left origin.
    ///
    /// Blocks until the GPU is idle, so call it only for explicit picks and
    /// after the frame has been submitted.
    pub fn pick(&self, scene: &Scene, x: u32, y: u32) -> Option<Entity> {
        let target = self.main_target();
        let Some(index) = target.integer_attachment_index() else {
            log::warn!("Target has no integer attachment to pick from");
            return None;
        };

        let id = target.read_pixel_int(index, x, y);
        if id <= NO_ENTITY_ID as i32 {
            return None;
        }
        scene.entity_from_id(id as u32)
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn shaders(&self) -> &SceneShaders {
        &self.shaders
    }

    pub fn shadow_map(&self) -> &DepthTextureArray {
        &self.shadow_map
    }

    pub fn shadow_target(&self) -> &RenderTarget {
        &self.shadow_target
    }

    pub fn outline_target(&self) -> &RenderTarget {
        &self.outline_target
    }

    fn main_target(&self) -> &RenderTarget {
        match &self.target {
            Some(target) => target,
            None => panic!("No target render target set, call set_target_framebuffer first"),
        }
    }
}

fn upload_light_space_matrices(shader: &dyn Shader, matrices: &[Mat4]) {
    for (i, matrix) in matrices.iter().enumerate() {
        shader.set_mat4(&uniform_array_element("lightSpaceMatrices", i), *matrix);
    }
}

fn upload_cascade_planes(shader: &dyn Shader, camera: &EditorCamera) {
    let splits = camera.cascade_splits();
    for (i, split) in splits.iter().enumerate() {
        shader.set_float(&uniform_array_element("cascadePlaneDistances", i), *split);
    }
    shader.set_float("farPlane", camera.far());
    shader.set_int("cascadeCount", splits.len() as i32);
}
