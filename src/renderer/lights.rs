use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
pub const MAX_POINT_LIGHTS: usize = 16;
pub const MAX_SPOT_LIGHTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLightData {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    /// Fixed-box light space of the light's transform.
    pub light_space: Mat4,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLightData {
    pub position: Vec3,
    pub color: Vec3,
    pub range: f32,
}

/// Cone limits are stored as cosines so shaders compare against a dot product.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLightData {
    pub position: Vec3,
    pub color: Vec3,
    pub direction: Vec3,
    pub cos_inner: f32,
    pub cos_outer: f32,
    pub range: f32,
}

/// Lights gathered from a scene in one pass, split by type.
#[derive(Clone, Debug, Default)]
pub struct SceneLights {
    directional: Vec<DirectionalLightData>,
    point: Vec<PointLightData>,
    spot: Vec<SpotLightData>,
}

impl SceneLights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.directional.clear();
        self.point.clear();
        self.spot.clear();
    }

    pub fn add_directional(&mut self, light: DirectionalLightData) {
        self.directional.push(light);
    }

    pub fn add_point(&mut self, light: PointLightData) {
        self.point.push(light);
    }

    pub fn add_spot(&mut self, light: SpotLightData) {
        self.spot.push(light);
    }

    pub fn directional_lights(&self) -> &[DirectionalLightData] {
        &self.directional
    }

    pub fn point_lights(&self) -> &[PointLightData] {
        &self.point
    }

    pub fn spot_lights(&self) -> &[SpotLightData] {
        &self.spot
    }

    pub fn is_empty(&self) -> bool {
        self.directional.is_empty() && self.point.is_empty() && self.spot.is_empty()
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct DirectionalLightRaw {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub color: [f32; 4],
    pub light_space: [[f32; 4]; 4],
}

impl DirectionalLightRaw {
    pub fn from_data(data: &DirectionalLightData) -> Self {
        Self {
            position: data.position.extend(1.0).to_array(),
            direction: data.direction.extend(0.0).to_array(),
            color: data.color.extend(1.0).to_array(),
            light_space: data.light_space.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct PointLightRaw {
    pub position_range: [f32; 4],
    pub color: [f32; 4],
}

impl PointLightRaw {
    pub fn from_data(data: &PointLightData) -> Self {
        Self {
            position_range: data.position.extend(data.range).to_array(),
            color: data.color.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SpotLightRaw {
    pub position_range: [f32; 4],
    pub direction: [f32; 4],
    pub color: [f32; 4],
    pub cone_params: [f32; 4],
}

impl SpotLightRaw {
    pub fn from_data(data: &SpotLightData) -> Self {
        Self {
            position_range: data.position.extend(data.range).to_array(),
            direction: data.direction.extend(0.0).to_array(),
            color: data.color.extend(1.0).to_array(),
            cone_params: [data.cos_inner, data.cos_outer, 0.0, 0.0],
        }
    }
}

/// Std140-compatible light block for draw submitters that upload lights in one buffer.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct LightsUniform {
    pub counts: [u32; 4],
    pub directionals: [DirectionalLightRaw; MAX_DIRECTIONAL_LIGHTS],
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spots: [SpotLightRaw; MAX_SPOT_LIGHTS],
}

impl LightsUniform {
    /// Lights beyond the fixed capacities are dropped.
    pub fn from_lights(lights: &SceneLights) -> Self {
        let mut uniform = Self::zeroed();

        uniform.counts[0] = fill(
            &mut uniform.directionals,
            lights.directional_lights(),
            DirectionalLightRaw::from_data,
        );
        uniform.counts[1] = fill(
            &mut uniform.points,
            lights.point_lights(),
            PointLightRaw::from_data,
        );
        uniform.counts[2] = fill(
            &mut uniform.spots,
            lights.spot_lights(),
            SpotLightRaw::from_data,
        );

        uniform
    }
}

fn fill<S, D>(dst: &mut [D], src: &[S], convert: impl Fn(&S) -> D) -> u32 {
    let count = src.len().min(dst.len());
    for (slot, light) in dst.iter_mut().zip(src.iter()) {
        *slot = convert(light);
    }
    count as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> PointLightData {
        PointLightData {
            position: Vec3::new(x, 0.0, 0.0),
            color: Vec3::ONE,
            range: 10.0,
        }
    }

    #[test]
    fn uniform_counts_match_collected_lights() {
        let mut lights = SceneLights::new();
        lights.add_point(point(1.0));
        lights.add_point(point(2.0));
        lights.add_spot(SpotLightData {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            direction: Vec3::NEG_Z,
            cos_inner: 0.9,
            cos_outer: 0.8,
            range: 5.0,
        });

        let uniform = LightsUniform::from_lights(&lights);
        assert_eq!(uniform.counts, [0, 2, 1, 0]);
        assert_eq!(uniform.points[1].position_range, [2.0, 0.0, 0.0, 10.0]);
        assert_eq!(uniform.spots[0].cone_params[..2], [0.9, 0.8]);
    }

    #[test]
    fn lights_beyond_capacity_are_dropped() {
        let mut lights = SceneLights::new();
        for i in 0..MAX_POINT_LIGHTS + 3 {
            lights.add_point(point(i as f32));
        }

        let uniform = LightsUniform::from_lights(&lights);
        assert_eq!(uniform.counts[1] as usize, MAX_POINT_LIGHTS);
        assert_eq!(
            uniform.points[MAX_POINT_LIGHTS - 1].position_range[0],
            (MAX_POINT_LIGHTS - 1) as f32
        );
    }

    #[test]
    fn clear_empties_every_list() {
        let mut lights = SceneLights::new();
        lights.add_point(point(0.0));
        assert!(!lights.is_empty());
        lights.clear();
        assert!(lights.is_empty());
    }
}
