//! Cascaded shadow map fitting.
//!
//! Conventions:
//! - Frustum corners are taken from the GL clip cube (x, y, z in [-1, 1]), so the
//!   sub-frustum projections used here are built with `perspective_rh_gl`.
//! - Light projections use `orthographic_rh`, which maps light-view depth to the
//!   wgpu [0, 1] range sampled by the main pass.

use glam::{Mat4, Vec3, Vec4};

/// Split distances are `far / divisor`, nearest first.
pub const CASCADE_SPLIT_DIVISORS: [f32; 6] = [100.0, 70.0, 55.0, 25.0, 10.0, 2.0];

/// One light-space matrix per segment between consecutive splits, plus the far segment.
pub const SHADOW_CASCADE_COUNT: usize = CASCADE_SPLIT_DIVISORS.len() + 1;

/// Scales the light-space depth extents of each cascade box. Scene dependent.
pub const CASCADE_Z_MULTIPLIER: f32 = 10.0;

pub fn cascade_splits(far: f32) -> Vec<f32> {
    CASCADE_SPLIT_DIVISORS
        .iter()
        .map(|divisor| far / divisor)
        .collect()
}

/// Returns the `(near, far)` depth range of every cascade, nearest first.
pub fn cascade_ranges(near: f32, far: f32, splits: &[f32]) -> Vec<(f32, f32)> {
    let mut ranges = Vec::with_capacity(splits.len() + 1);
    let mut segment_near = near;
    for &split in splits {
        ranges.push((segment_near, split));
        segment_near = split;
    }
    ranges.push((segment_near, far));
    ranges
}

pub fn frustum_corners_from_view_proj(view_proj: Mat4) -> [Vec4; 8] {
    let inverse = view_proj.inverse();
    let mut corners = [Vec4::ZERO; 8];
    let mut index = 0;
    for x in 0..2 {
        for y in 0..2 {
            for z in 0..2 {
                let clip = Vec4::new(
                    2.0 * x as f32 - 1.0,
                    2.0 * y as f32 - 1.0,
                    2.0 * z as f32 - 1.0,
                    1.0,
                );
                let point = inverse * clip;
                corners[index] = point / point.w;
                index += 1;
            }
        }
    }
    corners
}

pub fn frustum_corners_world_space(proj: Mat4, view: Mat4) -> [Vec4; 8] {
    frustum_corners_from_view_proj(proj * view)
}

pub fn centroid(corners: &[Vec4; 8]) -> Vec3 {
    let sum = corners
        .iter()
        .fold(Vec3::ZERO, |acc, corner| acc + corner.truncate());
    sum / corners.len() as f32
}

/// Fits an orthographic light projection around `corners`, looking along `-light_dir`.
pub fn fit_light_space_matrix(corners: &[Vec4; 8], light_dir: Vec3, z_multiplier: f32) -> Mat4 {
    let center = centroid(corners);
    let light_view = Mat4::look_at_rh(center + light_dir, center, light_up(light_dir));

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for corner in corners {
        let in_light = (light_view * *corner).truncate();
        min = min.min(in_light);
        max = max.max(in_light);
    }

    let (min_z, max_z) = extend_depth_range(min.z, max.z, z_multiplier);
    let light_projection = Mat4::orthographic_rh(min.x, max.x, min.y, max.y, min_z, max_z);

    light_projection * light_view
}

/// Pushes both depth bounds away from the light-view origin so casters outside the
/// camera frustum still land inside the cascade box.
pub fn extend_depth_range(min_z: f32, max_z: f32, z_multiplier: f32) -> (f32, f32) {
    let min_z = if min_z < 0.0 {
        min_z * z_multiplier
    } else {
        min_z / z_multiplier
    };
    let max_z = if max_z < 0.0 {
        max_z / z_multiplier
    } else {
        max_z * z_multiplier
    };
    (min_z, max_z)
}

fn light_up(light_dir: Vec3) -> Vec3 {
    if light_dir.normalize_or_zero().dot(Vec3::Y).abs() > 0.999 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}
