//! Parameter definitions with documented defaults and ranges.
//!
//! Defaults reproduce the tuned scene; ranges are the ones the debug
//! panel enforces.

mod camera;
mod colors;
mod render;
mod scene;
mod waves;

// Re-export all types
pub use camera::OrbitCameraParams;
pub use colors::{ColorParams, ParseColorError, Rgb};
pub use render::{RenderConfig, WaterMeshConfig};
pub use scene::{LightParams, SceneParams, ShipParams, SkyParams};
pub use waves::{SmallWaveShape, WaveParams, MAX_SMALL_WAVE_ITERATIONS};
