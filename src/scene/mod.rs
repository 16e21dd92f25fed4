// scene/mod.rs

pub mod components;
pub mod lights;
pub mod scene;
pub mod transform;

pub use components::{
    LightComponent, LightType, MeshComponent, MeshRendererComponent, TagComponent,
    TransformComponent,
};
pub use lights::{collect_lights, shadow_light_direction};
pub use scene::{Scene, NO_ENTITY_ID};
