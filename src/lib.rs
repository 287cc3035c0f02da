//! Ragingsea library - wave field evaluation, ship, sky and rendering

pub mod camera;
pub mod cli;
pub mod debug_panel;
pub mod noise;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod ship;
pub mod sky;
pub mod water;
