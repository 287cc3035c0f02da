//! Daylight sky: Rayleigh + Mie scattering with a sun disk.
//!
//! Everything that depends only on [`SkyParams`] is precomputed here once
//! per frame; `sky.wgsl` evaluates the per-pixel optical depth, phase
//! functions and in-scattering along each view ray.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::SkyParams;

/// Total Rayleigh scattering coefficients for the RGB primaries (1/m)
const TOTAL_RAYLEIGH: Vec3 = Vec3::new(5.804_543e-6, 1.356_291_1e-5, 3.026_590_3e-5);

/// Mie extinction scale per primary, `(2pi / lambda)^2 * K` folded together
const MIE_CONST: Vec3 = Vec3::new(1.839_991_9e14, 2.779_802_4e14, 4.079_048e14);

/// Sun angle past the horizon at which its light cuts off (radians)
const CUTOFF_ANGLE: f32 = 1.611_073_2;
const STEEPNESS: f32 = 1.5;

/// Sun irradiance at zenith
const SUN_IRRADIANCE: f32 = 1000.0;

/// Uniform buffer for the sky shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SkyUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    /// xyz = camera position
    pub camera_pos: [f32; 4],
    /// xyz = normalized sun direction, w = sun intensity
    pub sun: [f32; 4],
    /// xyz = Rayleigh coefficients, w = sun fade
    pub beta_r: [f32; 4],
    /// xyz = Mie coefficients, w = Mie directional g
    pub beta_m: [f32; 4],
}

/// Scattering constants derived from the sky parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyScattering {
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
    pub sun_fade: f32,
    pub beta_r: Vec3,
    pub beta_m: Vec3,
}

impl SkyScattering {
    pub fn new(params: &SkyParams) -> Self {
        let sun_direction = params.sun_position.try_normalize().unwrap_or(Vec3::Y);
        let sun_intensity = sun_intensity(sun_direction.dot(Vec3::Y));

        // Fades Rayleigh scattering as the sun sinks
        let sun_fade = 1.0 - (1.0 - (params.sun_position.y / 450_000.0).exp()).clamp(0.0, 1.0);
        let rayleigh_coefficient = params.rayleigh - (1.0 - sun_fade);

        Self {
            sun_direction,
            sun_intensity,
            sun_fade,
            beta_r: TOTAL_RAYLEIGH * rayleigh_coefficient,
            beta_m: total_mie(params.turbidity) * params.mie_coefficient,
        }
    }

    /// Pack into shader uniforms for the given camera
    pub fn uniforms(&self, view_proj: Mat4, camera_pos: Vec3, params: &SkyParams) -> SkyUniforms {
        SkyUniforms {
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            sun: self.sun_direction.extend(self.sun_intensity).to_array(),
            beta_r: self.beta_r.extend(self.sun_fade).to_array(),
            beta_m: self.beta_m.extend(params.mie_directional_g).to_array(),
        }
    }
}

/// Sun irradiance for a zenith angle cosine; falls to zero past the cutoff
fn sun_intensity(zenith_angle_cos: f32) -> f32 {
    let zenith_angle = zenith_angle_cos.clamp(-1.0, 1.0).acos();
    SUN_IRRADIANCE * (1.0 - (-((CUTOFF_ANGLE - zenith_angle) / STEEPNESS)).exp()).max(0.0)
}

fn total_mie(turbidity: f32) -> Vec3 {
    let concentration = (0.2 * turbidity) * 10e-18;
    MIE_CONST * (0.434 * concentration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sun_direction_normalized() {
        let s = SkyScattering::new(&SkyParams::default());
        assert!((s.sun_direction.length() - 1.0).abs() < 1e-5);
        assert!(s.sun_direction.y < 0.0);
    }

    #[test]
    fn test_sun_intensity_monotonic_in_elevation() {
        let high = sun_intensity(1.0);
        let low = sun_intensity(0.1);
        let below = sun_intensity(-0.5);
        assert!(high > low);
        assert!(low > below);
        assert_eq!(below, 0.0);
        assert!(high <= SUN_IRRADIANCE);
    }

    #[test]
    fn test_coefficients_positive_and_finite() {
        let s = SkyScattering::new(&SkyParams::default());
        for c in s.beta_r.to_array().into_iter().chain(s.beta_m.to_array()) {
            assert!(c.is_finite() && c > 0.0);
        }
        // Blue scatters more than red
        assert!(s.beta_r.z > s.beta_r.x);
    }

    #[test]
    fn test_zero_sun_position_falls_back_to_zenith() {
        let params = SkyParams {
            sun_position: Vec3::ZERO,
            ..Default::default()
        };
        let s = SkyScattering::new(&params);
        assert_eq!(s.sun_direction, Vec3::Y);
    }

    #[test]
    fn test_uniform_packing() {
        let params = SkyParams::default();
        let s = SkyScattering::new(&params);
        let u = s.uniforms(Mat4::IDENTITY, Vec3::new(1.0, 2.0, 3.0), &params);
        assert_eq!(u.camera_pos, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.beta_m[3], params.mie_directional_g);
        assert_eq!(std::mem::size_of::<SkyUniforms>(), 128);
    }
}
