//! Ocean surface: water mesh animated by the wave field.

mod mesh;
mod system;

// Re-export public types
pub use mesh::{Vertex, WaterGrid};
pub use system::OceanSystem;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WaterMeshConfig;

    #[test]
    fn test_water_grid_creation() {
        let config = WaterMeshConfig::default();
        let grid = WaterGrid::new(&config);

        // Check vertex count: (segments + 1)^2
        assert_eq!(grid.vertices.len(), (config.segments + 1).pow(2));
        assert_eq!(grid.rest_positions.len(), grid.vertices.len());

        // Check triangle count: segments^2 * 2 triangles * 3 indices
        assert_eq!(grid.indices.len(), config.segments.pow(2) * 6);
    }
}
