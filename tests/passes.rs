//! Shadow cascade and selection outline passes on a headless device.
mod common;

use std::sync::Arc;

use glam::Vec3;
use hecs::Entity;
use scene_render_core::camera::EditorCamera;
use scene_render_core::renderer::{
    uniform_array_element, GpuContext, RenderTarget, SceneRenderer, SHADOW_CASCADE_LAYERS,
};
use scene_render_core::scene::{
    shadow_light_direction, LightComponent, MeshComponent, MeshRendererComponent, Scene,
    NO_ENTITY_ID,
};
use scene_render_core::settings::Resolution;
use scene_render_core::RenderSettings;

const SIZE: u32 = 64;
const Z_MULTIPLIER: f32 = 3.0;

fn settings() -> RenderSettings {
    RenderSettings {
        shadow_map_size: 256,
        outline_resolution: Resolution {
            width: SIZE,
            height: SIZE,
        },
        clear_color: [0.0, 0.0, 0.0, 1.0],
        cascade_z_multiplier: Z_MULTIPLIER,
    }
}

fn camera() -> EditorCamera {
    let mut camera = EditorCamera::default();
    camera.set_viewport_size(SIZE, SIZE);
    camera
}

fn setup(
    context: &GpuContext,
) -> (
    SceneRenderer,
    common::IdShader,
    common::PassShaders,
    common::IdSubmitter,
) {
    let (mesh_shader, submitter) = common::id_pipeline(context);
    let (shaders, passes) = common::pass_shaders(&submitter);
    let mut renderer = SceneRenderer::new(context, shaders, settings());
    renderer.set_target_framebuffer(RenderTarget::new(
        context,
        common::main_target_spec(SIZE, SIZE),
    ));
    (renderer, mesh_shader, passes, submitter)
}

fn spawn_wall(context: &GpuContext, scene: &mut Scene, shader: &common::IdShader) -> Entity {
    let entity = scene.create_entity("Wall");
    scene
        .world
        .insert(
            entity,
            (
                MeshComponent::new(Arc::new(common::wall(&context.device))),
                MeshRendererComponent::new(Arc::new(shader.clone())),
            ),
        )
        .unwrap();
    entity
}

fn spawn_sun(scene: &mut Scene) -> Entity {
    let sun = scene.create_entity("Sun");
    scene
        .world
        .insert_one(sun, LightComponent::directional(Vec3::ONE))
        .unwrap();
    sun
}

#[test]
fn shadow_pass_draws_every_caster_once_per_cascade() {
    let Some(context) = common::gpu() else { return };
    let (renderer, mesh_shader, passes, mut submitter) = setup(&context);

    let mut scene = Scene::new();
    let wall = spawn_wall(&context, &mut scene, &mesh_shader);
    spawn_sun(&mut scene);

    let camera = camera();
    let mut encoder = common::encoder(&context);
    renderer.render_shadows(&mut encoder, &scene, &camera, &mut submitter);
    common::submit(&context, encoder);

    let id = Scene::entity_id(wall);
    assert_eq!(
        submitter.draws,
        vec![Some(id); SHADOW_CASCADE_LAYERS as usize]
    );
    assert_eq!(
        passes.depth.int("cascadeIndex"),
        Some(SHADOW_CASCADE_LAYERS as i32 - 1)
    );
    assert!(passes.depth.mat4("model").is_some());

    let light_dir = shadow_light_direction(&scene.world).expect("sun casts shadows");
    let expected = camera.light_space_matrices_with_multiplier(light_dir, Z_MULTIPLIER);
    let camera_default = camera.light_space_matrices(light_dir);
    assert_eq!(expected.len(), SHADOW_CASCADE_LAYERS as usize);
    for (i, matrix) in expected.iter().enumerate() {
        let uploaded = passes
            .depth
            .mat4(&uniform_array_element("lightSpaceMatrices", i))
            .expect("matrix uploaded for every cascade");
        assert_eq!(uploaded, *matrix, "cascade {i}");
        // Fitted with the settings multiplier, not the camera's.
        assert_ne!(uploaded, camera_default[i], "cascade {i}");
    }
}

#[test]
fn shadow_pass_without_directional_light_only_clears() {
    let Some(context) = common::gpu() else { return };
    let (renderer, mesh_shader, passes, mut submitter) = setup(&context);

    let mut scene = Scene::new();
    spawn_wall(&context, &mut scene, &mesh_shader);
    let lamp = scene.create_entity("Lamp");
    scene
        .world
        .insert_one(lamp, LightComponent::point(Vec3::ONE, 5.0))
        .unwrap();

    let mut encoder = common::encoder(&context);
    renderer.render_shadows(&mut encoder, &scene, &camera(), &mut submitter);
    common::submit(&context, encoder);

    assert!(submitter.draws.is_empty());
    assert_eq!(passes.depth.int("cascadeIndex"), None);
    assert_eq!(
        passes.depth.mat4(&uniform_array_element("lightSpaceMatrices", 0)),
        None
    );
}

#[test]
fn outline_masks_selection_and_composites_over_target() {
    let Some(context) = common::gpu() else { return };
    let (renderer, mesh_shader, passes, mut submitter) = setup(&context);

    let mut scene = Scene::new();
    let wall = spawn_wall(&context, &mut scene, &mesh_shader);
    let id = Scene::entity_id(wall);
    let center = SIZE / 2;

    let mut encoder = common::encoder(&context);
    renderer.render_editor(&mut encoder, &scene, &camera(), &mut submitter);
    renderer.render_outline(&mut encoder, &scene, Some(wall), &mut submitter);
    common::submit(&context, encoder);

    // Forward draw, then the mask draw and the composite quad.
    assert_eq!(submitter.draws, vec![Some(id), None, None]);

    let mask = renderer.outline_target();
    assert_eq!(mask.read_pixel_int(0, center, center), common::OUTLINE_MASK);

    let target = renderer.target().expect("target set");
    assert_eq!(target.read_pixel_color(0, center, center), [0, 255, 0, 255]);
    assert_eq!(target.read_pixel_color(0, 0, 0), [0, 255, 0, 255]);
    // The quad leaves the id attachment alone, so picking still works.
    assert_eq!(target.read_pixel_int(1, center, center), id as i32);
    assert_eq!(renderer.pick(&scene, center, center), Some(wall));

    assert_eq!(passes.outline.int("IDTexture"), Some(0));
    assert_eq!(passes.outline.bound_slots(), vec![0]);
}

#[test]
fn outline_without_selection_clears_mask() {
    let Some(context) = common::gpu() else { return };
    let (renderer, mesh_shader, _passes, mut submitter) = setup(&context);

    let mut scene = Scene::new();
    let wall = spawn_wall(&context, &mut scene, &mesh_shader);
    let center = SIZE / 2;

    let mut encoder = common::encoder(&context);
    renderer.render_editor(&mut encoder, &scene, &camera(), &mut submitter);
    renderer.render_outline(&mut encoder, &scene, Some(wall), &mut submitter);
    common::submit(&context, encoder);
    assert_eq!(
        renderer.outline_target().read_pixel_int(0, center, center),
        common::OUTLINE_MASK
    );

    let drawn = submitter.draws.len();
    let mut encoder = common::encoder(&context);
    renderer.render_outline(&mut encoder, &scene, None, &mut submitter);
    common::submit(&context, encoder);

    assert_eq!(submitter.draws.len(), drawn + 1);
    assert_eq!(
        renderer.outline_target().read_pixel_int(0, center, center),
        NO_ENTITY_ID as i32
    );
}

#[test]
fn outline_of_entity_without_mesh_draws_only_the_quad() {
    let Some(context) = common::gpu() else { return };
    let (renderer, _mesh_shader, _passes, mut submitter) = setup(&context);

    let mut scene = Scene::new();
    let sun = spawn_sun(&mut scene);

    let mut encoder = common::encoder(&context);
    renderer.render_outline(&mut encoder, &scene, Some(sun), &mut submitter);
    common::submit(&context, encoder);

    assert_eq!(submitter.draws, vec![None]);
    assert_eq!(
        renderer.outline_target().read_pixel_int(0, SIZE / 2, SIZE / 2),
        NO_ENTITY_ID as i32
    );
}
