//! Per-frame ocean update: runs the wave field over every grid vertex.

use rayon::prelude::*;

use super::mesh::WaterGrid;
use crate::params::{WaterMeshConfig, WaveParams};
use crate::water::WaveField;

/// High-level ocean system: water mesh plus the wave field evaluator
pub struct OceanSystem {
    pub grid: WaterGrid,
    field: WaveField,
}

impl OceanSystem {
    /// Create new ocean system with specified parameters
    pub fn new(mesh: &WaterMeshConfig, noise_seed: u32) -> Self {
        Self {
            grid: WaterGrid::new(mesh),
            field: WaveField::new(noise_seed),
        }
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Displace every vertex for time `time_s`
    ///
    /// Parameters are read fresh on every call; nothing is cached between frames.
    /// The color ramp is applied per fragment from the interpolated height.
    pub fn update(&mut self, time_s: f32, waves: &WaveParams) {
        if self.field.seed() != waves.noise_seed {
            log::debug!("Reseeding wave noise: {}", waves.noise_seed);
            self.field = WaveField::new(waves.noise_seed);
        }

        let field = &self.field;
        self.grid
            .vertices
            .par_iter_mut()
            .zip(self.grid.rest_positions.par_iter())
            .for_each(|(vertex, &[x, z])| {
                vertex.position = [x, field.displacement(x, z, time_s, waves), z];
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_mesh() -> WaterMeshConfig {
        WaterMeshConfig {
            size: 3.0,
            segments: 8,
        }
    }

    #[test]
    fn test_calm_sea_stays_flat() {
        let mut ocean = OceanSystem::new(&small_mesh(), 0);
        let waves = WaveParams {
            big_elevation: 0.0,
            small_iterations: 0,
            ..Default::default()
        };

        ocean.update(3.0, &waves);

        for v in &ocean.grid.vertices {
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn test_vertices_match_field() {
        let mut ocean = OceanSystem::new(&small_mesh(), 9);
        let waves = WaveParams {
            noise_seed: 9,
            ..Default::default()
        };
        ocean.update(1.75, &waves);

        for (v, &[x, z]) in ocean.grid.vertices.iter().zip(&ocean.grid.rest_positions) {
            assert_eq!(v.position[0], x);
            assert_eq!(v.position[2], z);
            assert_eq!(v.position[1], ocean.field().displacement(x, z, 1.75, &waves));
        }
    }

    #[test]
    fn test_live_parameter_changes_apply_next_frame() {
        let mut ocean = OceanSystem::new(&small_mesh(), 0);
        let mut waves = WaveParams::default();

        ocean.update(2.0, &waves);
        let before: Vec<f32> = ocean.grid.vertices.iter().map(|v| v.position[1]).collect();

        waves.big_elevation = 0.8;
        ocean.update(2.0, &waves);
        let after: Vec<f32> = ocean.grid.vertices.iter().map(|v| v.position[1]).collect();

        assert_ne!(before, after);
    }

    #[test]
    fn test_reseed_follows_params() {
        let mut ocean = OceanSystem::new(&small_mesh(), 0);
        let waves = WaveParams {
            noise_seed: 1234,
            ..Default::default()
        };
        ocean.update(0.5, &waves);
        assert_eq!(ocean.field().seed(), 1234);
    }
}
