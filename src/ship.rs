//! Floating ship: bobbing transform and hull proxy mesh.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::params::{LightParams, Rgb, ShipParams};

/// Hull vertex (position + face normal, model space)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShipVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Hull proxy mesh
pub struct ShipMesh {
    pub vertices: Vec<ShipVertex>,
    pub indices: Vec<u32>,
}

impl ShipMesh {
    /// Axis-aligned box centered on the origin with flat-shaded faces
    pub fn hull(extents: Vec3) -> Self {
        let h = extents * 0.5;
        // (normal, tangent u, tangent v) per face; u x v == normal keeps CCW winding
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = (normal + u * su + v * sv) * h;
                vertices.push(ShipVertex {
                    position: corner.to_array(),
                    normal: normal.to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }
}

/// Uniform buffer for the ship shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShipUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// xyz = unit direction toward the directional light
    pub light_direction: [f32; 4],
    /// rgb = sRGB color, a = intensity
    pub light_color: [f32; 4],
    pub ambient_color: [f32; 4],
    pub base_color: [f32; 4],
}

impl ShipUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, lights: &LightParams, hull_color: Rgb) -> Self {
        let toward_light = lights.directional_position.try_normalize().unwrap_or(Vec3::Y);
        let with_alpha = |c: Rgb, a: f32| [c.r, c.g, c.b, a];
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_direction: toward_light.extend(0.0).to_array(),
            light_color: with_alpha(lights.directional_color, lights.directional_intensity),
            ambient_color: with_alpha(lights.ambient_color, lights.ambient_intensity),
            base_color: with_alpha(hull_color, 1.0),
        }
    }
}

/// Ship placement for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub height: f32,
    pub roll_rad: f32,
}

/// Ship motion: rides at swell height and rolls slowly
pub struct ShipSystem {
    pub mesh: ShipMesh,
}

impl ShipSystem {
    pub fn new(params: &ShipParams) -> Self {
        Self {
            mesh: ShipMesh::hull(params.hull_extents),
        }
    }

    /// Pose at `time_s`, following the live big-wave elevation
    pub fn pose(time_s: f32, big_wave_elevation: f32, params: &ShipParams) -> ShipPose {
        ShipPose {
            height: big_wave_elevation - params.down_offset,
            roll_rad: (time_s + params.roll_phase_rad).cos() * params.roll_amplitude_rad,
        }
    }

    /// Model matrix: scale, then roll about z, then lift
    pub fn model_matrix(pose: &ShipPose, params: &ShipParams) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(params.scale),
            Quat::from_rotation_z(pose.roll_rad),
            Vec3::new(0.0, pose.height, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_tracks_big_wave_elevation() {
        let params = ShipParams::default();
        let pose = ShipSystem::pose(0.0, 0.16, &params);
        assert!((pose.height - (0.16 - 0.072)).abs() < 1e-6);

        let pose = ShipSystem::pose(0.0, 0.5, &params);
        assert!((pose.height - (0.5 - 0.072)).abs() < 1e-6);
    }

    #[test]
    fn test_roll_follows_cosine() {
        let params = ShipParams::default();
        for i in 0..10 {
            let t = i as f32 * 0.7;
            let pose = ShipSystem::pose(t, 0.16, &params);
            assert!((pose.roll_rad - (t + 1.0).cos() * 0.3).abs() < 1e-6);
            assert!(pose.roll_rad.abs() <= 0.3 + 1e-6);
        }
    }

    #[test]
    fn test_model_matrix_places_origin_at_height() {
        let params = ShipParams::default();
        let pose = ShipPose {
            height: 0.25,
            roll_rad: 0.2,
        };
        let origin = ShipSystem::model_matrix(&pose, &params).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.25, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_uniforms_light_direction_normalized() {
        let lights = LightParams::default();
        let u = ShipUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, &lights, Rgb::default());
        let dir = Vec3::new(u.light_direction[0], u.light_direction[1], u.light_direction[2]);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.z < 0.0);
        assert_eq!(u.light_color[3], 5.5);
        assert_eq!(std::mem::size_of::<ShipUniforms>(), 192);
    }

    #[test]
    fn test_hull_faces_point_outward() {
        let mesh = ShipMesh::hull(Vec3::new(4.0, 2.0, 6.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);

        for tri in mesh.indices.chunks(3) {
            let a = Vec3::from_array(mesh.vertices[tri[0] as usize].position);
            let b = Vec3::from_array(mesh.vertices[tri[1] as usize].position);
            let c = Vec3::from_array(mesh.vertices[tri[2] as usize].position);
            let n = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
            assert!(a.dot(n) > 0.0);
        }
    }
}
