//! Water plane mesh: a flat, centered XZ grid.

use bytemuck::{Pod, Zeroable};

use crate::params::WaterMeshConfig;

/// Vertex data for the water mesh; `y` carries the displacement the shader ramps on
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

/// Water grid mesh; `y` is rewritten every frame
pub struct WaterGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Undisplaced (x, z) of each vertex, parallel to `vertices`
    pub rest_positions: Vec<[f32; 2]>,
    segments: usize,
}

impl WaterGrid {
    /// Create a flat grid of `size` x `size` world units with `segments` subdivisions per side
    pub fn new(config: &WaterMeshConfig) -> Self {
        let segments = config.segments.max(1);
        let half_size = config.size / 2.0;
        let cell = config.size / segments as f32;
        let side = segments + 1;

        let mut vertices = Vec::with_capacity(side * side);
        let mut rest_positions = Vec::with_capacity(side * side);
        let mut indices = Vec::with_capacity(segments * segments * 6);

        // Generate flat XZ plane grid
        for z in 0..=segments {
            for x in 0..=segments {
                let x_pos = x as f32 * cell - half_size;
                let z_pos = z as f32 * cell - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                });
                rest_positions.push([x_pos, z_pos]);
            }
        }

        // Generate triangle indices (counter-clockwise seen from +Y)
        for z in 0..segments {
            for x in 0..segments {
                let top_left = (z * side + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * side + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            rest_positions,
            segments,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spans_plane() {
        let config = WaterMeshConfig {
            size: 3.0,
            segments: 4,
        };
        let grid = WaterGrid::new(&config);

        let first = grid.rest_positions[0];
        let last = grid.rest_positions[grid.rest_positions.len() - 1];
        assert_eq!(first, [-1.5, -1.5]);
        assert!((last[0] - 1.5).abs() < 1e-6);
        assert!((last[1] - 1.5).abs() < 1e-6);
        assert!(grid.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_zero_segments_clamped() {
        let grid = WaterGrid::new(&WaterMeshConfig {
            size: 1.0,
            segments: 0,
        });
        assert_eq!(grid.segments(), 1);
        assert_eq!(grid.vertices.len(), 4);
        assert_eq!(grid.indices.len(), 6);
    }
}
