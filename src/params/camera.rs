//! Orbit camera configuration.

use glam::Vec3;

/// Orbit camera around a fixed target, with inertia
#[derive(Debug, Clone)]
pub struct OrbitCameraParams {
    /// Initial eye position (world units)
    pub position: Vec3,

    /// Orbit center
    pub target: Vec3,

    /// Fraction of the pending rotation applied per frame (0 disables damping)
    pub damping_factor: f32,

    /// Rotation gain for mouse drags
    pub rotate_speed: f32,

    /// Zoom gain per wheel notch
    pub zoom_speed: f32,

    /// Distance clamp (world units)
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 1.0, 1.0),
            target: Vec3::ZERO,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.2,
            max_distance: 20.0,
        }
    }
}
