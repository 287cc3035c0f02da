//! Noise generation for the small-wave octaves.
//!
//! Classic Perlin gradient noise: smooth, deterministic for a given seed,
//! and zero on integer lattice points.
//!
//! The permutation table hashes each lattice coordinate modulo 256, so the
//! field repeats every 256 units along every axis. Coordinates are wrapped
//! into that period before sampling, which keeps any finite input inside
//! the range the lattice lookup can represent.

use ::noise::{NoiseFn, Perlin};

/// Lattice period of the permutation table
const PERIOD: f64 = 256.0;

/// Seeded 3D gradient noise source
#[derive(Clone)]
pub struct NoiseGenerator {
    perlin: Perlin,
}

impl NoiseGenerator {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample 3D noise at position
    ///
    /// Returns a value in roughly [-1, 1]; non-finite coordinates sample the origin
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f32 {
        self.perlin.get([wrap(x), wrap(y), wrap(z)]) as f32
    }
}

/// Fold a coordinate into `[0, PERIOD]` without changing the sampled value
fn wrap(v: f64) -> f64 {
    if v.is_finite() {
        v.rem_euclid(PERIOD)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_values() {
        let a = NoiseGenerator::new(7);
        let b = NoiseGenerator::new(7);
        for i in 0..32 {
            let p = i as f64 * 0.37;
            assert_eq!(a.sample_3d(p, -p, 0.5 * p), b.sample_3d(p, -p, 0.5 * p));
        }
    }

    #[test]
    fn test_wrapping_preserves_values() {
        let n = NoiseGenerator::new(3);
        for i in 0..40 {
            let p = i as f64 * 0.29 - 5.0;
            let base = n.sample_3d(p, 0.5 * p, 1.7);
            let shifted = n.sample_3d(p + 3.0 * PERIOD, 0.5 * p - PERIOD, 1.7 + 7.0 * PERIOD);
            assert!((base - shifted).abs() < 1e-4, "{} vs {} at {}", base, shifted, p);
        }
    }

    #[test]
    fn test_huge_coordinates_do_not_panic() {
        let n = NoiseGenerator::new(0);
        for v in [1e20, -1e30, f32::MAX as f64, f64::MAX, f64::MIN, f64::NAN, f64::INFINITY] {
            let s = n.sample_3d(v, 0.25, v);
            assert!(s.is_finite(), "sample {} at {}", s, v);
        }
    }

    #[test]
    fn test_bounded() {
        let n = NoiseGenerator::new(0);
        for i in 0..200 {
            let p = i as f64 * 0.173;
            let v = n.sample_3d(p, p * 1.3, -p);
            assert!(v.is_finite());
            assert!(v.abs() <= 1.5, "noise {} out of range", v);
        }
    }
}
