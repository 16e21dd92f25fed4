use glam::Vec3;
use hecs::World;

use super::components::{LightComponent, LightType, TransformComponent};
use crate::renderer::{DirectionalLightData, PointLightData, SceneLights, SpotLightData};

/// Gathers every (Light, Transform) entity into typed lists in one query.
pub fn collect_lights(world: &World) -> SceneLights {
    let mut lights = SceneLights::new();

    for (_entity, (light, transform)) in world
        .query::<(&LightComponent, &TransformComponent)>()
        .iter()
    {
        match light.light_type {
            LightType::Directional => lights.add_directional(DirectionalLightData {
                position: transform.position,
                direction: transform.forward(),
                color: light.color,
                light_space: transform.space_matrix(),
            }),
            LightType::Point => lights.add_point(PointLightData {
                position: transform.position,
                color: light.color,
                range: light.range,
            }),
            LightType::Spot => lights.add_spot(SpotLightData {
                position: transform.position,
                color: light.color,
                direction: transform.forward(),
                cos_inner: light.inner.to_radians().cos(),
                cos_outer: light.outer.to_radians().cos(),
                range: light.range,
            }),
        }
    }

    lights
}

/// Direction of the light whose cascades are rendered this frame.
///
/// Only one directional light casts shadows; with several, the last one in
/// query order wins.
pub fn shadow_light_direction(world: &World) -> Option<Vec3> {
    world
        .query::<(&LightComponent, &TransformComponent)>()
        .iter()
        .filter(|(_, (light, _))| light.light_type == LightType::Directional)
        .map(|(_, (_, transform))| transform.forward())
        .last()
}
