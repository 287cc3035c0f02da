//! Command-line argument parsing.

use clap::Parser;

use crate::params::{
    RenderConfig, Rgb, SceneParams, SmallWaveShape, WaterMeshConfig, MAX_SMALL_WAVE_ITERATIONS,
};

/// Command line arguments
///
/// Every wave/color option is an override: left unset, the tuned default
/// from `params` is used.
#[derive(Parser, Debug)]
#[command(name = "Ragingsea")]
#[command(about = "Raging sea with a bobbing ship under a scattering sky", long_about = None)]
pub struct Args {
    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Water mesh subdivisions per side
    #[arg(long, value_name = "N", default_value_t = 512)]
    pub segments: usize,

    /// Noise seed for the small waves
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u32>,

    /// Sharp-crested small waves instead of rolling ones
    #[arg(long)]
    pub ridged: bool,

    /// Crest color, e.g. "#9bd8ff"
    #[arg(long, value_name = "HEX")]
    pub surface_color: Option<Rgb>,

    /// Trough color, e.g. "#186691"
    #[arg(long, value_name = "HEX")]
    pub depth_color: Option<Rgb>,

    #[arg(long, value_name = "VALUE")]
    pub color_offset: Option<f32>,

    #[arg(long, value_name = "VALUE")]
    pub color_multiplier: Option<f32>,

    /// Swell amplitude (world units)
    #[arg(long, value_name = "VALUE")]
    pub big_elevation: Option<f32>,

    #[arg(long, value_name = "VALUE")]
    pub big_speed: Option<f32>,

    /// Chop amplitude (world units)
    #[arg(long, value_name = "VALUE")]
    pub small_elevation: Option<f32>,

    #[arg(long, value_name = "VALUE")]
    pub small_speed: Option<f32>,

    /// Small-wave octaves (at most 10 are evaluated)
    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,
}

impl Args {
    /// Apply the overrides on top of `params`
    pub fn apply(&self, params: &mut SceneParams) {
        let waves = &mut params.waves;
        if let Some(seed) = self.seed {
            waves.noise_seed = seed;
        }
        if self.ridged {
            waves.small_shape = SmallWaveShape::Ridged;
        }
        if let Some(v) = self.big_elevation {
            waves.big_elevation = v;
        }
        if let Some(v) = self.big_speed {
            waves.big_speed = v;
        }
        if let Some(v) = self.small_elevation {
            waves.small_elevation = v;
        }
        if let Some(v) = self.small_speed {
            waves.small_speed = v;
        }
        if let Some(n) = self.iterations {
            if n > MAX_SMALL_WAVE_ITERATIONS {
                log::warn!(
                    "Requested {} small-wave iterations; only {} are evaluated",
                    n,
                    MAX_SMALL_WAVE_ITERATIONS
                );
            }
            waves.small_iterations = n;
        }

        let colors = &mut params.colors;
        if let Some(c) = self.surface_color {
            colors.surface_color = c;
        }
        if let Some(c) = self.depth_color {
            colors.depth_color = c;
        }
        if let Some(v) = self.color_offset {
            colors.offset = v;
        }
        if let Some(v) = self.color_multiplier {
            colors.multiplier = v;
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..Default::default()
        }
    }

    pub fn mesh_config(&self) -> WaterMeshConfig {
        WaterMeshConfig {
            segments: self.segments,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let args = Args::parse_from(["ragingsea"]);
        let mut params = SceneParams::default();
        args.apply(&mut params);

        assert_eq!(params.waves.big_elevation, 0.16);
        assert_eq!(params.waves.small_shape, SmallWaveShape::Rolling);
        assert_eq!(params.colors.surface_color, Rgb::from_u32(0x9bd8ff));
        assert_eq!(args.render_config().window_width, 1280);
        assert_eq!(args.mesh_config().segments, 512);
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::parse_from([
            "ragingsea",
            "--seed",
            "7",
            "--ridged",
            "--surface-color",
            "#ffffff",
            "--color-offset",
            "0.5",
            "--iterations",
            "4",
            "--segments",
            "64",
        ]);
        let mut params = SceneParams::default();
        args.apply(&mut params);

        assert_eq!(params.waves.noise_seed, 7);
        assert_eq!(params.waves.small_shape, SmallWaveShape::Ridged);
        assert_eq!(params.waves.small_iterations, 4);
        assert_eq!(params.colors.surface_color, Rgb::from_u32(0xffffff));
        assert_eq!(params.colors.offset, 0.5);
        assert_eq!(args.mesh_config().segments, 64);
    }

    #[test]
    fn test_bad_color_rejected() {
        let result = Args::try_parse_from(["ragingsea", "--depth-color", "#12345"]);
        assert!(result.is_err());
    }
}
