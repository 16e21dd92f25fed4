//! Headless GPU helpers shared by the integration tests.
//!
//! Tests that need a device call [`gpu`] and return early when no adapter is
//! available, so the suite still passes on machines without graphics support.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use scene_render_core::camera::EditorCamera;
use scene_render_core::renderer::depth_array::SHADOW_MAP_FORMAT;
use scene_render_core::renderer::geometry::{position2_layout, position3_layout};
use scene_render_core::renderer::{
    AttachmentFormat, DirectionalLightData, DrawSubmitter, Geometry, GpuContext, PointLightData,
    RenderTargetSpec, SceneShaders, Shader, ShaderLoader, SpotLightData, TextureBinding,
};
use wgpu::util::DeviceExt;

pub fn gpu() -> Option<GpuContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    match pollster::block_on(GpuContext::headless()) {
        Ok(context) => Some(context),
        Err(err) => {
            eprintln!("skipping GPU test: {err}");
            None
        }
    }
}

/// Color + entity id + depth, the layout the forward pass expects.
pub fn main_target_spec(width: u32, height: u32) -> RenderTargetSpec {
    RenderTargetSpec::new(
        width,
        height,
        [
            AttachmentFormat::Rgba8,
            AttachmentFormat::RedInteger,
            AttachmentFormat::Depth24Stencil8,
        ],
    )
}

pub fn encoder(context: &GpuContext) -> wgpu::CommandEncoder {
    context
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Test Encoder"),
        })
}

pub fn submit(context: &GpuContext, encoder: wgpu::CommandEncoder) {
    context.queue.submit(std::iter::once(encoder.finish()));
}

/// Large square in the XY plane, facing the default editor camera.
pub fn wall(device: &wgpu::Device) -> Geometry {
    let vertices: [[f32; 3]; 4] = [
        [-400.0, -400.0, 0.0],
        [400.0, -400.0, 0.0],
        [400.0, 400.0, 0.0],
        [-400.0, 400.0, 0.0],
    ];
    Geometry::new(device, "Wall", &vertices, &[0, 1, 2, 2, 3, 0])
}

const ID_SHADER: &str = r#"
struct DrawUniforms {
    transform: mat4x4<f32>,
    entity_id: i32,
};

@group(0) @binding(0) var<uniform> draw: DrawUniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return draw.transform * vec4<f32>(position, 1.0);
}

struct FragmentOutput {
    @location(0) color: vec4<f32>,
    @location(1) id: i32,
};

@fragment
fn fs_main() -> FragmentOutput {
    var out: FragmentOutput;
    out.color = vec4<f32>(1.0, 1.0, 1.0, 1.0);
    out.id = draw.entity_id;
    return out;
}

@fragment
fn fs_mask() -> @location(0) i32 {
    return 7;
}

@vertex
fn vs_quad(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}

@fragment
fn fs_quad() -> FragmentOutput {
    var out: FragmentOutput;
    out.color = vec4<f32>(0.0, 1.0, 0.0, 1.0);
    out.id = 0;
    return out;
}
"#;

/// Value `fs_mask` writes into the outline mask attachment.
pub const OUTLINE_MASK: i32 = 7;

/// Pipeline variants over the shared test module, one per pass layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    /// Color + id + Depth24Stencil8, the main target layout.
    Mesh,
    /// Depth only into a cascade layer.
    Depth,
    /// Constant mask into a single integer attachment with depth.
    Mask,
    /// Full-screen quad: green color, id attachment untouched, no depth test.
    Quad,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct DrawUniforms {
    transform: [[f32; 4]; 4],
    entity_id: i32,
    _padding: [i32; 3],
}

/// Flat white shader that writes the draw's entity id to attachment 1.
#[derive(Clone)]
pub struct IdShader {
    path: String,
    pipeline: wgpu::RenderPipeline,
    ints: Arc<Mutex<HashMap<String, i32>>>,
    mats: Arc<Mutex<HashMap<String, Mat4>>>,
    textures: Arc<Mutex<Vec<u32>>>,
}

impl IdShader {
    pub fn int(&self, name: &str) -> Option<i32> {
        self.ints.lock().unwrap().get(name).copied()
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        self.mats.lock().unwrap().get(name).copied()
    }

    pub fn bound_slots(&self) -> Vec<u32> {
        self.textures.lock().unwrap().clone()
    }

    fn with_path(&self, path: &str) -> Self {
        Self {
            path: path.to_owned(),
            ..self.clone()
        }
    }
}

impl Shader for IdShader {
    fn path(&self) -> &str {
        &self.path
    }

    fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }

    fn set_int(&self, name: &str, value: i32) {
        self.ints.lock().unwrap().insert(name.to_owned(), value);
    }

    fn set_float(&self, _name: &str, _value: f32) {}

    fn set_vec3(&self, _name: &str, _value: Vec3) {}

    fn set_mat4(&self, name: &str, value: Mat4) {
        self.mats.lock().unwrap().insert(name.to_owned(), value);
    }

    fn bind_texture(&self, slot: u32, _binding: TextureBinding) {
        self.textures.lock().unwrap().push(slot);
    }
}

/// Every fixed path resolves to the same id pipeline.
pub struct IdShaderLoader(pub IdShader);

impl ShaderLoader for IdShaderLoader {
    fn load(&mut self, path: &str) -> Arc<dyn Shader> {
        Arc::new(self.0.with_path(path))
    }
}

pub fn scene_shaders(shader: &IdShader) -> SceneShaders {
    SceneShaders::load(&mut IdShaderLoader(shader.clone()))
}

/// Draws with per-draw uniform buffers so every submission keeps its own id.
pub struct IdSubmitter {
    device: wgpu::Device,
    module: wgpu::ShaderModule,
    layout: wgpu::BindGroupLayout,
    view_projection: Mat4,
    pub scenes_begun: usize,
    pub scenes_ended: usize,
    pub draws: Vec<Option<u32>>,
    pub point_lights: usize,
    pub spot_lights: usize,
    pub directional_lights: usize,
}

impl DrawSubmitter for IdSubmitter {
    fn begin_scene(&mut self, camera: &EditorCamera, view: Mat4) {
        self.view_projection = camera.projection() * view;
        self.scenes_begun += 1;
    }

    fn submit_directional_lights(&mut self, lights: &[DirectionalLightData]) {
        self.directional_lights = lights.len();
    }

    fn submit_point_lights(&mut self, lights: &[PointLightData]) {
        self.point_lights = lights.len();
    }

    fn submit_spot_lights(&mut self, lights: &[SpotLightData]) {
        self.spot_lights = lights.len();
    }

    fn submit_skybox(
        &mut self,
        _pass: &mut wgpu::RenderPass<'_>,
        _shader: &dyn Shader,
        _geometry: &Geometry,
    ) {
    }

    fn submit(
        &mut self,
        pass: &mut wgpu::RenderPass<'_>,
        shader: &dyn Shader,
        geometry: &Geometry,
        transform: Mat4,
        entity_id: Option<u32>,
    ) {
        let uniforms = DrawUniforms {
            transform: (self.view_projection * transform).to_cols_array_2d(),
            entity_id: entity_id.map_or(0, |id| id as i32),
            _padding: [0; 3],
        };
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Draw Uniforms"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout: &self.layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        shader.bind(pass);
        pass.set_bind_group(0, &bind_group, &[]);
        geometry.draw(pass);
        self.draws.push(entity_id);
    }

    fn end_scene(&mut self) {
        self.scenes_ended += 1;
    }
}

impl IdSubmitter {
    /// Builds a pipeline of the given kind that draws with this submitter's uniforms.
    pub fn shader(&self, path: &str, kind: ShaderKind) -> IdShader {
        let device = &self.device;

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Id Pipeline Layout"),
            bind_group_layouts: &[&self.layout],
            push_constant_ranges: &[],
        });

        let color = |format| {
            Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })
        };
        let (vertex_entry, buffers, fragment_entry, targets) = match kind {
            ShaderKind::Mesh => (
                "vs_main",
                position3_layout(),
                Some("fs_main"),
                vec![
                    color(wgpu::TextureFormat::Rgba8Unorm),
                    color(wgpu::TextureFormat::R32Sint),
                ],
            ),
            ShaderKind::Depth => ("vs_main", position3_layout(), None, Vec::new()),
            ShaderKind::Mask => (
                "vs_main",
                position3_layout(),
                Some("fs_mask"),
                vec![color(wgpu::TextureFormat::R32Sint)],
            ),
            ShaderKind::Quad => (
                "vs_quad",
                position2_layout(),
                Some("fs_quad"),
                vec![
                    color(wgpu::TextureFormat::Rgba8Unorm),
                    Some(wgpu::ColorTargetState {
                        format: wgpu::TextureFormat::R32Sint,
                        blend: None,
                        write_mask: wgpu::ColorWrites::empty(),
                    }),
                ],
            ),
        };

        let depth_stencil = match kind {
            ShaderKind::Depth => wgpu::DepthStencilState {
                format: SHADOW_MAP_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            },
            ShaderKind::Quad => wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth24PlusStencil8,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            },
            ShaderKind::Mesh | ShaderKind::Mask => wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth24PlusStencil8,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(path),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.module,
                entry_point: Some(vertex_entry),
                buffers: &[buffers],
                compilation_options: Default::default(),
            },
            fragment: fragment_entry.map(|entry| wgpu::FragmentState {
                module: &self.module,
                entry_point: Some(entry),
                targets: &targets,
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        IdShader {
            path: path.to_owned(),
            pipeline,
            ints: Arc::default(),
            mats: Arc::default(),
            textures: Arc::default(),
        }
    }
}

/// Builds the id pipeline for the main target layout plus a matching submitter.
pub fn id_pipeline(context: &GpuContext) -> (IdShader, IdSubmitter) {
    let device = &context.device;

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Id Shader"),
        source: wgpu::ShaderSource::Wgsl(ID_SHADER.into()),
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Draw Uniforms Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let submitter = IdSubmitter {
        device: device.clone(),
        module,
        layout,
        view_projection: Mat4::IDENTITY,
        scenes_begun: 0,
        scenes_ended: 0,
        draws: Vec::new(),
        point_lights: 0,
        spot_lights: 0,
        directional_lights: 0,
    };
    let shader = submitter.shader("tests/id.wgsl", ShaderKind::Mesh);

    (shader, submitter)
}

/// One pipeline per fixed scene shader, each with its own recorded uniforms.
pub fn pass_shaders(submitter: &IdSubmitter) -> (SceneShaders, PassShaders) {
    let passes = PassShaders {
        depth: submitter.shader("tests/depth.wgsl", ShaderKind::Depth),
        outline_temp: submitter.shader("tests/outline_mask.wgsl", ShaderKind::Mask),
        outline: submitter.shader("tests/outline.wgsl", ShaderKind::Quad),
    };
    let debug = submitter.shader("tests/debug.wgsl", ShaderKind::Quad);
    let shaders = SceneShaders {
        depth: Arc::new(passes.depth.clone()),
        debug: Arc::new(debug.clone()),
        skybox: Arc::new(debug),
        outline: Arc::new(passes.outline.clone()),
        outline_temp: Arc::new(passes.outline_temp.clone()),
    };
    (shaders, passes)
}

/// Handles onto the pass shaders handed to the renderer; clones share recorded uniforms.
pub struct PassShaders {
    pub depth: IdShader,
    pub outline_temp: IdShader,
    pub outline: IdShader,
}
