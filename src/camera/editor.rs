use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use winit::event::MouseScrollDelta;

use super::cascades::{self, CASCADE_Z_MULTIPLIER};
use super::input::CameraInput;

pub const MIN_ORBIT_DISTANCE: f32 = 1.0;

/// Viewport size (in thousands of pixels) past which pan speed stops changing.
pub const PAN_SATURATION: f32 = 2.4;
const MAX_ZOOM_SPEED: f32 = 100.0;
const ROTATION_SPEED: f32 = 0.8;
const CURSOR_DELTA_SCALE: f32 = 0.003;
const SCROLL_ZOOM_SCALE: f32 = 0.1;
const PIXELS_PER_SCROLL_LINE: f32 = 40.0;

/// Orbit camera used by the editor viewport. Also owns the cascade split scheme
/// the shadow pass is fitted to.
#[derive(Clone, Debug)]
pub struct EditorCamera {
    fov_y_degrees: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    focal_point: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,

    position: Vec3,
    view: Mat4,
    projection: Mat4,

    viewport_width: u32,
    viewport_height: u32,
    initial_cursor: Vec2,

    cascade_splits: Vec<f32>,
    z_multiplier: f32,
}

impl EditorCamera {
    pub fn new(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect_ratio,
            near,
            far,
            focal_point: Vec3::ZERO,
            distance: 10.0,
            yaw: 0.0,
            pitch: 0.0,
            position: Vec3::ZERO,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            viewport_width: 1280,
            viewport_height: 720,
            initial_cursor: Vec2::ZERO,
            cascade_splits: cascades::cascade_splits(far),
            z_multiplier: CASCADE_Z_MULTIPLIER,
        };
        camera.update_view();
        camera.update_projection();
        camera
    }

    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring camera viewport size {}x{}", width, height);
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.aspect_ratio = width as f32 / height as f32;
        self.update_projection();
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Rebuilds the view matrix from focal point, distance, yaw and pitch.
    pub fn update_view(&mut self) {
        self.position = self.calculate_position();
        let camera_to_world = Mat4::from_rotation_translation(self.orientation(), self.position);
        self.view = camera_to_world.inverse();
    }

    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        );
    }

    /// Adopts an externally supplied view matrix, keeping the current orbit distance.
    pub fn look_from_view(&mut self, view: Mat4) {
        let camera_to_world = view.inverse();
        self.position = camera_to_world.w_axis.truncate();

        let direction = -camera_to_world.z_axis.truncate().normalize_or_zero();
        self.yaw = direction.x.atan2(-direction.z);
        self.pitch = -direction.y.clamp(-1.0, 1.0).asin();
        self.view = view;

        self.focal_point = self.position + self.distance * self.forward_direction();
    }

    pub fn pan_speed(&self) -> (f32, f32) {
        (
            pan_factor(self.viewport_width),
            pan_factor(self.viewport_height),
        )
    }

    pub fn rotation_speed(&self) -> f32 {
        ROTATION_SPEED
    }

    pub fn zoom_speed(&self) -> f32 {
        let distance = (self.distance * 0.2).max(0.0);
        (distance * distance).min(MAX_ZOOM_SPEED)
    }

    /// Alt + middle pans, Alt + left rotates, Alt + right zooms.
    pub fn on_update(&mut self, input: &CameraInput) {
        let delta = (input.cursor - self.initial_cursor) * CURSOR_DELTA_SCALE;
        self.initial_cursor = input.cursor;

        if input.alt_held {
            if input.middle {
                self.mouse_pan(delta);
            } else if input.left {
                self.mouse_rotate(delta);
            } else if input.right {
                self.mouse_zoom(delta.y);
            }
            self.update_view();
        }
    }

    pub fn on_mouse_scrolled(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_SCROLL_LINE,
        };
        self.mouse_zoom(lines * SCROLL_ZOOM_SCALE);
        self.update_view();
    }

    pub fn mouse_pan(&mut self, delta: Vec2) {
        let (x_speed, y_speed) = self.pan_speed();
        self.focal_point += -self.right_direction() * delta.x * x_speed * self.distance;
        self.focal_point += self.up_direction() * delta.y * y_speed * self.distance;
    }

    pub fn mouse_rotate(&mut self, delta: Vec2) {
        let yaw_sign = if self.up_direction().y < 0.0 { -1.0 } else { 1.0 };
        self.yaw += yaw_sign * delta.x * self.rotation_speed();
        self.pitch += delta.y * self.rotation_speed();
    }

    pub fn mouse_zoom(&mut self, delta: f32) {
        self.distance -= delta * self.zoom_speed();
        if self.distance < MIN_ORBIT_DISTANCE {
            self.focal_point += self.forward_direction();
            self.distance = MIN_ORBIT_DISTANCE;
        }
    }

    pub fn up_direction(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    pub fn right_direction(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    pub fn forward_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, -self.yaw, -self.pitch, 0.0)
    }

    fn calculate_position(&self) -> Vec3 {
        self.focal_point - self.forward_direction() * self.distance
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(MIN_ORBIT_DISTANCE);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn cascade_splits(&self) -> &[f32] {
        &self.cascade_splits
    }

    pub fn cascade_ranges(&self) -> Vec<(f32, f32)> {
        cascades::cascade_ranges(self.near, self.far, &self.cascade_splits)
    }

    pub fn z_multiplier(&self) -> f32 {
        self.z_multiplier
    }

    pub fn set_z_multiplier(&mut self, z_multiplier: f32) {
        self.z_multiplier = z_multiplier;
    }

    pub fn frustum_corners_world_space(proj: Mat4, view: Mat4) -> [Vec4; 8] {
        cascades::frustum_corners_world_space(proj, view)
    }

    /// Light-space matrix for the slice of the view frustum between `near_plane` and `far_plane`.
    pub fn light_space_matrix(&self, near_plane: f32, far_plane: f32, light_dir: Vec3) -> Mat4 {
        self.fit_slice(near_plane, far_plane, light_dir, self.z_multiplier)
    }

    /// One light-space matrix per cascade, nearest first.
    pub fn light_space_matrices(&self, light_dir: Vec3) -> Vec<Mat4> {
        self.light_space_matrices_with_multiplier(light_dir, self.z_multiplier)
    }

    /// Same as [`light_space_matrices`](Self::light_space_matrices) with the
    /// light-space depth range stretched by `z_multiplier` instead of the camera's own.
    pub fn light_space_matrices_with_multiplier(
        &self,
        light_dir: Vec3,
        z_multiplier: f32,
    ) -> Vec<Mat4> {
        self.cascade_ranges()
            .into_iter()
            .map(|(near, far)| self.fit_slice(near, far, light_dir, z_multiplier))
            .collect()
    }

    fn fit_slice(
        &self,
        near_plane: f32,
        far_plane: f32,
        light_dir: Vec3,
        z_multiplier: f32,
    ) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            near_plane,
            far_plane,
        );
        let corners = Self::frustum_corners_world_space(proj, self.view);
        cascades::fit_light_space_matrix(&corners, light_dir, z_multiplier)
    }
}

impl Default for EditorCamera {
    fn default() -> Self {
        Self::new(45.0, 1280.0 / 720.0, 0.1, 1000.0)
    }
}

/// Quadratic falloff over viewport size, saturating at [`PAN_SATURATION`].
fn pan_factor(viewport_extent: u32) -> f32 {
    let x = (viewport_extent as f32 / 1000.0).min(PAN_SATURATION);
    0.0366 * (x * x) - 0.1778 * x + 0.3021
}
