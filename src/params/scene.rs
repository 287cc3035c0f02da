//! Ship, sky and light parameters, plus the live-tweakable scene bundle.

use glam::Vec3;

use super::colors::{ColorParams, Rgb};
use super::waves::WaveParams;

/// Ship placement and bobbing
#[derive(Debug, Clone)]
pub struct ShipParams {
    /// Sinks the hull below the swell crest height (world units)
    /// Range: [-2, 2]
    pub down_offset: f32,

    /// Uniform model scale
    pub scale: f32,

    /// Roll amplitude (radians)
    pub roll_amplitude_rad: f32,

    /// Roll phase offset (radians)
    pub roll_phase_rad: f32,

    /// Hull proxy extents in model units (beam, height, length)
    pub hull_extents: Vec3,

    pub hull_color: Rgb,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            down_offset: 0.072,
            scale: 0.05,
            roll_amplitude_rad: 0.3,
            roll_phase_rad: 1.0,
            hull_extents: Vec3::new(4.0, 2.4, 7.0),
            hull_color: Rgb::from_u32(0x6b4a2f),
        }
    }
}

/// Daylight sky scattering parameters
#[derive(Debug, Clone)]
pub struct SkyParams {
    /// Haziness of the atmosphere (more = more Mie scattering)
    pub turbidity: f32,

    /// Rayleigh scattering strength
    pub rayleigh: f32,

    pub mie_coefficient: f32,

    /// Mie phase asymmetry (closer to 1 = tighter sun halo)
    pub mie_directional_g: f32,

    /// Sun position; only its direction matters, except `y` for the sun fade
    pub sun_position: Vec3,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.1,
            mie_directional_g: 0.95,
            sun_position: Vec3::new(0.3, -0.038, -0.95), // Just below the horizon
        }
    }
}

/// Scene lights (they shade the ship; the water uses its own ramp)
#[derive(Debug, Clone)]
pub struct LightParams {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub directional_color: Rgb,
    pub directional_intensity: f32,

    /// Directional light position; it shines toward the origin
    pub directional_position: Vec3,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::from_u32(0xffffff),
            ambient_intensity: 1.0,
            directional_color: Rgb::from_u32(0x86cdff),
            directional_intensity: 5.5,
            directional_position: Vec3::new(3.0, 2.0, -8.0),
        }
    }
}

/// Everything the debug panel may change while the scene runs
#[derive(Debug, Clone, Default)]
pub struct SceneParams {
    pub waves: WaveParams,
    pub colors: ColorParams,
    pub ship: ShipParams,
}
