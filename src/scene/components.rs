// scene/components.rs
// Plain hecs components; entities carry any combination of them.

use std::sync::Arc;

use glam::Vec3;

use crate::renderer::{Geometry, Shader};

pub use super::transform::TransformComponent;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagComponent(pub String);

impl TagComponent {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Geometry shared between every entity drawing the same mesh.
#[derive(Clone, Debug)]
pub struct MeshComponent(pub Arc<Geometry>);

impl MeshComponent {
    pub fn new(geometry: Arc<Geometry>) -> Self {
        Self(geometry)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.0
    }
}

/// Shader used for the forward pass of an entity.
#[derive(Clone)]
pub struct MeshRendererComponent {
    pub shader: Arc<dyn Shader>,
}

impl MeshRendererComponent {
    pub fn new(shader: Arc<dyn Shader>) -> Self {
        Self { shader }
    }
}

impl std::fmt::Debug for MeshRendererComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshRendererComponent")
            .field("shader", &self.shader.path())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightType {
    #[default]
    Directional,
    Point,
    Spot,
}

/// Cone angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightComponent {
    pub light_type: LightType,
    pub color: Vec3,
    pub inner: f32,
    pub outer: f32,
    pub range: f32,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            light_type: LightType::Directional,
            color: Vec3::ONE,
            inner: 12.5,
            outer: 17.5,
            range: 10.0,
        }
    }
}

impl LightComponent {
    pub fn directional(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn point(color: Vec3, range: f32) -> Self {
        Self {
            light_type: LightType::Point,
            color,
            range,
            ..Self::default()
        }
    }

    pub fn spot(color: Vec3, inner: f32, outer: f32, range: f32) -> Self {
        Self {
            light_type: LightType::Spot,
            color,
            inner,
            outer,
            range,
        }
    }
}
