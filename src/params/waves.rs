//! Wave field parameters: big swell plus fractal small waves.

use glam::Vec2;

/// Upper bound on small-wave octaves (matches the debug panel range)
pub const MAX_SMALL_WAVE_ITERATIONS: u32 = 10;

/// How each small-wave octave contributes to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmallWaveShape {
    /// Signed octave sum, smooth everywhere
    #[default]
    Rolling,

    /// Each octave subtracts `|noise|`, carving sharp crests
    Ridged,
}

/// Wave field parameters read by the evaluator every frame
#[derive(Debug, Clone)]
pub struct WaveParams {
    // === Big waves (two crossed sines) ===
    /// Swell height in world units
    /// Range: [0, 1]
    pub big_elevation: f32,

    /// Spatial frequency along x (component `x`) and z (component `y`)
    /// Range: [0, 10] per component
    pub big_frequency: Vec2,

    /// Phase speed of the swell (radians per second)
    /// Range: [0, 10]
    pub big_speed: f32,

    // === Small waves (noise octaves) ===
    /// Scale applied to the octave sum
    /// Range: [0, 10]
    pub small_elevation: f32,

    /// Frequency of the first octave, doubled per octave
    /// Range: [0, 10]
    pub small_frequency: f32,

    /// Time scroll speed through the noise volume
    /// Range: [0, 10]
    pub small_speed: f32,

    /// Number of octaves
    /// Range: [0, 10]
    pub small_iterations: u32,

    pub small_shape: SmallWaveShape,

    /// Perlin noise seed
    pub noise_seed: u32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            big_elevation: 0.16,
            big_frequency: Vec2::new(4.0, 1.5),
            big_speed: 0.75,

            small_elevation: 0.15,
            small_frequency: 3.0,
            small_speed: 0.25,
            small_iterations: 3,
            small_shape: SmallWaveShape::Rolling,

            noise_seed: 0,
        }
    }
}

impl WaveParams {
    /// Octave count actually evaluated
    pub fn effective_iterations(&self) -> u32 {
        self.small_iterations.min(MAX_SMALL_WAVE_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_scene() {
        let p = WaveParams::default();
        assert_eq!(p.big_elevation, 0.16);
        assert_eq!(p.big_frequency, Vec2::new(4.0, 1.5));
        assert_eq!(p.small_iterations, 3);
        assert_eq!(p.small_shape, SmallWaveShape::Rolling);
    }

    #[test]
    fn test_iterations_clamped() {
        let p = WaveParams {
            small_iterations: 500,
            ..Default::default()
        };
        assert_eq!(p.effective_iterations(), MAX_SMALL_WAVE_ITERATIONS);
    }
}
