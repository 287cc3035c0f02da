//! Orbit camera with damped rotation and wheel zoom.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::params::{OrbitCameraParams, RenderConfig};

/// Keeps the camera off the poles so `look_at` stays well defined
const POLAR_EPSILON: f32 = 1e-4;

/// Zoom factor per wheel notch at unit zoom speed
const ZOOM_STEP: f32 = 0.95;

/// Spherical coordinates around the target (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around Y, measured from +Z toward +X
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit camera state
pub struct OrbitCamera {
    params: OrbitCameraParams,
    spherical: Spherical,
    /// Rotation still to be applied (damped over several frames)
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitCamera {
    pub fn new(params: OrbitCameraParams) -> Self {
        let mut spherical = Spherical::from_offset(params.position - params.target);
        spherical.phi = spherical.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius = spherical
            .radius
            .clamp(params.min_distance, params.max_distance);
        Self {
            params,
            spherical,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.params.target + self.spherical.to_offset()
    }

    pub fn target(&self) -> Vec3 {
        self.params.target
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Queue a rotation from a mouse drag of `(dx, dy)` pixels in a viewport `height` pixels tall
    pub fn drag(&mut self, dx: f32, dy: f32, height: f32) {
        let height = height.max(1.0);
        self.pending_theta -= TAU * dx / height * self.params.rotate_speed;
        self.pending_phi -= TAU * dy / height * self.params.rotate_speed;
    }

    /// Queue a zoom; positive `notches` moves the camera closer
    pub fn zoom(&mut self, notches: f32) {
        self.pending_scale *= ZOOM_STEP.powf(notches * self.params.zoom_speed);
    }

    /// Advance one frame: apply the damped share of pending input
    pub fn update(&mut self) {
        let damping = self.params.damping_factor;

        if damping > 0.0 && damping < 1.0 {
            self.spherical.theta += self.pending_theta * damping;
            self.spherical.phi += self.pending_phi * damping;
            self.pending_theta *= 1.0 - damping;
            self.pending_phi *= 1.0 - damping;
        } else {
            self.spherical.theta += self.pending_theta;
            self.spherical.phi += self.pending_phi;
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }

        self.spherical.phi = self.spherical.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.spherical.radius = (self.spherical.radius * self.pending_scale)
            .clamp(self.params.min_distance, self.params.max_distance);
        self.pending_scale = 1.0;
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.position();
        let view = Mat4::look_at_rh(eye, self.params.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_configured_position() {
        let camera = OrbitCamera::new(OrbitCameraParams::default());
        assert!((camera.position() - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_idle_update_keeps_position() {
        let mut camera = OrbitCamera::new(OrbitCameraParams::default());
        let before = camera.position();
        for _ in 0..100 {
            camera.update();
        }
        assert!((camera.position() - before).length() < 1e-5);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = OrbitCamera::new(OrbitCameraParams::default());
        let start_distance = camera.distance();
        camera.drag(100.0, 0.0, 720.0);

        let expected_theta = camera.spherical.theta - TAU * 100.0 / 720.0;

        // First frame only applies the damped share
        camera.update();
        assert!((camera.spherical.theta - expected_theta).abs() > 0.1);

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.spherical.theta - expected_theta).abs() < 1e-3);
        assert!((camera.distance() - start_distance).abs() < 1e-5);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let params = OrbitCameraParams {
            damping_factor: 0.0,
            ..Default::default()
        };
        let mut camera = OrbitCamera::new(params);
        camera.drag(0.0, 10_000.0, 100.0);
        camera.update();
        assert!(camera.spherical.phi >= POLAR_EPSILON);
        assert!(camera.position().is_finite());
    }

    #[test]
    fn test_zoom_clamped_to_range() {
        let params = OrbitCameraParams::default();
        let (min, max) = (params.min_distance, params.max_distance);
        let mut camera = OrbitCamera::new(params);

        camera.zoom(1000.0);
        camera.update();
        assert_eq!(camera.distance(), min);

        camera.zoom(-1000.0);
        camera.update();
        assert_eq!(camera.distance(), max);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = OrbitCamera::new(OrbitCameraParams::default());
        let render_config = RenderConfig::default();

        let (view_proj, eye_pos) = camera.create_view_proj_matrix(&render_config);

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);

        // Target projects to the center of the screen
        let center = view_proj.project_point3(camera.target());
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);
        assert!(eye_pos.is_finite());
    }
}
