//! Wave field evaluation: surface displacement and the depth color ramp.
//!
//! The surface height at `(x, z)` and time `t` is the sum of two layers:
//!
//! - **Big waves**: two crossed sines,
//!   `elevation * sin(x * freq.x + t * speed) * sin(z * freq.y + t * speed)`.
//! - **Small waves**: `iterations` octaves of Perlin noise sampled at
//!   `(x * f, z * f, t * speed)`. Each octave doubles `f` and halves its
//!   weight; the sum is scaled by the small-wave elevation.
//!
//! Evaluation is a pure function of its inputs. Degenerate parameters
//! (non-finite values, negative frequencies) are sanitized so the result
//! is always finite.

use crate::noise::NoiseGenerator;
use crate::params::{ColorParams, Rgb, SmallWaveShape, WaveParams};

/// One evaluated surface point: displaced position and its ramp color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Original x, displaced y, original z
    pub position: [f32; 3],
    pub color: Rgb,
}

/// Wave field evaluator (owns the seeded noise source)
#[derive(Clone)]
pub struct WaveField {
    noise: NoiseGenerator,
    seed: u32,
}

impl WaveField {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: NoiseGenerator::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Vertical displacement of the surface point `(x, z)` at time `t` (seconds)
    pub fn displacement(&self, x: f32, z: f32, t: f32, params: &WaveParams) -> f32 {
        let total = big_waves(x, z, t, params) + self.small_waves(x, z, t, params);
        finite_or_zero(total)
    }

    /// Fractal small-wave layer on its own
    ///
    /// Zero when there are no octaves or the base frequency is not positive.
    /// Sample coordinates are formed in `f64` so huge inputs stay finite.
    pub fn small_waves(&self, x: f32, z: f32, t: f32, params: &WaveParams) -> f32 {
        let iterations = params.effective_iterations();
        let elevation = finite_or_zero(params.small_elevation);
        let base_frequency = params.small_frequency;

        let usable_frequency = base_frequency > 0.0 && base_frequency.is_finite();
        if iterations == 0 || elevation == 0.0 || !usable_frequency {
            return 0.0;
        }

        let x = finite_or_zero(x) as f64;
        let z = finite_or_zero(z) as f64;
        let w = finite_or_zero(t) as f64 * finite_or_zero(params.small_speed) as f64;

        let mut frequency = base_frequency as f64;
        let mut amplitude = 1.0f32;
        let mut sum = 0.0f32;

        for _ in 0..iterations {
            let n = self.noise.sample_3d(x * frequency, z * frequency, w);
            let layer = match params.small_shape {
                SmallWaveShape::Rolling => n,
                SmallWaveShape::Ridged => -n.abs(),
            };
            sum += layer * amplitude;

            frequency *= 2.0;
            amplitude *= 0.5;
        }

        finite_or_zero(sum * elevation)
    }

    /// Displaced position and ramp color for one surface point
    pub fn evaluate(
        &self,
        x: f32,
        z: f32,
        t: f32,
        waves: &WaveParams,
        colors: &ColorParams,
    ) -> SurfaceSample {
        let y = self.displacement(x, z, t, waves);
        SurfaceSample {
            position: [x, y, z],
            color: shade(y, colors),
        }
    }
}

/// Crossed-sine swell layer
///
/// Frequency components are clamped to be non-negative.
pub fn big_waves(x: f32, z: f32, t: f32, params: &WaveParams) -> f32 {
    let elevation = finite_or_zero(params.big_elevation);
    if elevation == 0.0 {
        return 0.0;
    }

    let freq_x = params.big_frequency.x.max(0.0);
    let freq_z = params.big_frequency.y.max(0.0);
    let phase = finite_or_zero(t) * finite_or_zero(params.big_speed);

    let arg_x = finite_or_zero(x) * freq_x + phase;
    let arg_z = finite_or_zero(z) * freq_z + phase;
    if !(arg_x.is_finite() && arg_z.is_finite()) {
        return 0.0;
    }

    elevation * arg_x.sin() * arg_z.sin()
}

/// Blend weight of the surface color: `clamp01((displacement + offset) * multiplier)`
///
/// NaN collapses to 0 (depth color).
pub fn mix_factor(displacement: f32, offset: f32, multiplier: f32) -> f32 {
    let m = ((displacement + offset) * multiplier).clamp(0.0, 1.0);
    if m.is_nan() {
        0.0
    } else {
        m
    }
}

/// Ramp color for a displacement: depth color at mix 0, surface color at mix 1
pub fn shade(displacement: f32, colors: &ColorParams) -> Rgb {
    let mix = mix_factor(displacement, colors.offset, colors.multiplier);
    colors.depth_color.mix(&colors.surface_color, mix)
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
