use glam::{EulerRot, Mat4, Quat, Vec3};

/// Half-extent of the fixed orthographic box used by [`TransformComponent::projection_matrix`].
pub const LIGHT_BOX_HALF_EXTENT: f32 = 10.0;
pub const LIGHT_BOX_NEAR: f32 = 1.0;
pub const LIGHT_BOX_FAR: f32 = 7.5;

/// Position, euler rotation in radians and scale of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformComponent {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::splat(0.5),
        }
    }
}

impl TransformComponent {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Pitch about X, yaw about Y, roll about Z.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.rotation.z, self.rotation.y, self.rotation.x)
    }

    /// Translation, rotation, then the absolute scale.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_quat(self.orientation())
            * Mat4::from_scale(self.scale.abs())
    }

    /// Translation and signed scale without rotation; used by depth-only draws.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(self.scale)
    }

    /// Local +Z pushed through [`transform`](Self::transform), normalized.
    pub fn forward(&self) -> Vec3 {
        self.transform()
            .transform_vector3(Vec3::Z)
            .try_normalize()
            .unwrap_or(Vec3::Z)
    }

    /// Looks from `forward()` toward the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.forward(), Vec3::ZERO, light_up(self.forward()))
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -LIGHT_BOX_HALF_EXTENT,
            LIGHT_BOX_HALF_EXTENT,
            -LIGHT_BOX_HALF_EXTENT,
            LIGHT_BOX_HALF_EXTENT,
            LIGHT_BOX_NEAR,
            LIGHT_BOX_FAR,
        )
    }

    pub fn space_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

fn light_up(direction: Vec3) -> Vec3 {
    if direction.normalize_or_zero().dot(Vec3::Y).abs() > 0.99 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}
