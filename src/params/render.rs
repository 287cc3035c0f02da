//! Rendering and water mesh configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Water plane tessellation
#[derive(Debug, Clone)]
pub struct WaterMeshConfig {
    /// Side length of the square plane (world units)
    pub size: f32,

    /// Subdivisions per side (vertices per side = segments + 1)
    pub segments: usize,
}

impl Default for WaterMeshConfig {
    fn default() -> Self {
        Self {
            size: 3.0,
            segments: 512, // 263,169 vertices
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_zero_height() {
        let config = RenderConfig {
            window_height: 0,
            ..Default::default()
        };
        assert!(config.aspect_ratio().is_finite());
    }
}
