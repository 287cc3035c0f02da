//! Live-tweak panel: keyboard-driven sliders over the scene parameters.
//!
//! Each control edits one field of [`SceneParams`] within a fixed range and
//! step. Values always land on the step grid and inside the range, so the
//! water never sees an out-of-range value from the panel. The ramp colors
//! are edited one channel at a time in 1/255 steps.

use crate::params::{Rgb, SceneParams};

/// One 8-bit step of a color channel
const CHANNEL_STEP: f32 = 1.0 / 255.0;

/// Scene field a control is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    BigWavesElevation,
    BigWavesFrequencyX,
    BigWavesFrequencyY,
    BigWavesSpeed,
    SmallWavesElevation,
    SmallWavesFrequency,
    SmallWavesSpeed,
    SmallWavesIterations,
    ColorOffset,
    ColorMultiplier,
    DepthColor(Channel),
    SurfaceColor(Channel),
    ShipDownOffset,
}

/// One channel of an [`Rgb`] color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    fn get(self, color: &Rgb) -> f32 {
        match self {
            Channel::R => color.r,
            Channel::G => color.g,
            Channel::B => color.b,
        }
    }

    fn set(self, color: &mut Rgb, value: f32) {
        match self {
            Channel::R => color.r = value,
            Channel::G => color.g = value,
            Channel::B => color.b = value,
        }
    }
}

impl Knob {
    fn get(self, params: &SceneParams) -> f32 {
        match self {
            Knob::BigWavesElevation => params.waves.big_elevation,
            Knob::BigWavesFrequencyX => params.waves.big_frequency.x,
            Knob::BigWavesFrequencyY => params.waves.big_frequency.y,
            Knob::BigWavesSpeed => params.waves.big_speed,
            Knob::SmallWavesElevation => params.waves.small_elevation,
            Knob::SmallWavesFrequency => params.waves.small_frequency,
            Knob::SmallWavesSpeed => params.waves.small_speed,
            Knob::SmallWavesIterations => params.waves.small_iterations as f32,
            Knob::ColorOffset => params.colors.offset,
            Knob::ColorMultiplier => params.colors.multiplier,
            Knob::DepthColor(c) => c.get(&params.colors.depth_color),
            Knob::SurfaceColor(c) => c.get(&params.colors.surface_color),
            Knob::ShipDownOffset => params.ship.down_offset,
        }
    }

    fn set(self, params: &mut SceneParams, value: f32) {
        match self {
            Knob::BigWavesElevation => params.waves.big_elevation = value,
            Knob::BigWavesFrequencyX => params.waves.big_frequency.x = value,
            Knob::BigWavesFrequencyY => params.waves.big_frequency.y = value,
            Knob::BigWavesSpeed => params.waves.big_speed = value,
            Knob::SmallWavesElevation => params.waves.small_elevation = value,
            Knob::SmallWavesFrequency => params.waves.small_frequency = value,
            Knob::SmallWavesSpeed => params.waves.small_speed = value,
            Knob::SmallWavesIterations => params.waves.small_iterations = value.round() as u32,
            Knob::ColorOffset => params.colors.offset = value,
            Knob::ColorMultiplier => params.colors.multiplier = value,
            Knob::DepthColor(c) => c.set(&mut params.colors.depth_color, value),
            Knob::SurfaceColor(c) => c.set(&mut params.colors.surface_color, value),
            Knob::ShipDownOffset => params.ship.down_offset = value,
        }
    }
}

/// One slider
#[derive(Debug, Clone)]
pub struct Control {
    pub name: &'static str,
    pub knob: Knob,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    default: f32,
}

impl Control {
    fn new(name: &'static str, knob: Knob, min: f32, max: f32, step: f32) -> Self {
        Self {
            name,
            knob,
            min,
            max,
            step,
            default: 0.0,
        }
    }

    /// Clamp into range and snap onto the step grid anchored at `min`
    pub fn quantize(&self, value: f32) -> f32 {
        let clamped = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        // Range ends are exact even when the step does not divide the range in f32
        if clamped == self.min || clamped == self.max {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    pub fn value(&self, params: &SceneParams) -> f32 {
        self.knob.get(params)
    }
}

/// Debug panel state (selected control plus the control list)
pub struct DebugPanel {
    controls: Vec<Control>,
    selected: usize,
}

impl DebugPanel {
    /// Build the panel, remembering `params` as the reset values
    pub fn new(params: &SceneParams) -> Self {
        let mut controls = vec![
            Control::new("uBigWavesElevation", Knob::BigWavesElevation, 0.0, 1.0, 0.01),
            Control::new("uBigWavesFrequencyX", Knob::BigWavesFrequencyX, 0.0, 10.0, 0.01),
            Control::new("uBigWavesFrequencyY", Knob::BigWavesFrequencyY, 0.0, 10.0, 0.01),
            Control::new("uBigWaveSpeed", Knob::BigWavesSpeed, 0.0, 10.0, 0.01),
            Control::new("uSmallWavesElevation", Knob::SmallWavesElevation, 0.0, 10.0, 0.001),
            Control::new("uSmallWavesFrequency", Knob::SmallWavesFrequency, 0.0, 10.0, 0.001),
            Control::new("uSmallWavesSpeed", Knob::SmallWavesSpeed, 0.0, 10.0, 0.001),
            Control::new("uSmallIterations", Knob::SmallWavesIterations, 0.0, 10.0, 1.0),
            Control::new("uColorOffset", Knob::ColorOffset, 0.0, 1.0, 0.001),
            Control::new("uColorMultiplier", Knob::ColorMultiplier, 0.0, 15.0, 0.01),
            Control::new("depthColor.r", Knob::DepthColor(Channel::R), 0.0, 1.0, CHANNEL_STEP),
            Control::new("depthColor.g", Knob::DepthColor(Channel::G), 0.0, 1.0, CHANNEL_STEP),
            Control::new("depthColor.b", Knob::DepthColor(Channel::B), 0.0, 1.0, CHANNEL_STEP),
            Control::new("surfaceColor.r", Knob::SurfaceColor(Channel::R), 0.0, 1.0, CHANNEL_STEP),
            Control::new("surfaceColor.g", Knob::SurfaceColor(Channel::G), 0.0, 1.0, CHANNEL_STEP),
            Control::new("surfaceColor.b", Knob::SurfaceColor(Channel::B), 0.0, 1.0, CHANNEL_STEP),
            Control::new("shipDownOffset", Knob::ShipDownOffset, -2.0, 2.0, 0.001),
        ];
        for control in &mut controls {
            control.default = control.knob.get(params);
        }

        Self {
            controls,
            selected: 0,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected(&self) -> &Control {
        &self.controls[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.controls.len();
        log::info!("Selected {}", self.selected().name);
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
        log::info!("Selected {}", self.selected().name);
    }

    /// Move the selected control by `steps` increments (negative = down)
    ///
    /// Returns the new value.
    pub fn nudge(&mut self, params: &mut SceneParams, steps: i32) -> f32 {
        let control = &self.controls[self.selected];
        let target = control.value(params) + steps as f32 * control.step;
        let value = control.quantize(target);
        control.knob.set(params, value);
        log::info!("{} = {}", control.name, format_value(control, value));
        value
    }

    /// Restore the selected control to its initial value
    pub fn reset_selected(&mut self, params: &mut SceneParams) {
        let control = &self.controls[self.selected];
        control.knob.set(params, control.default);
        log::info!("{} reset to {}", control.name, format_value(control, control.default));
    }

    /// Restore every control to its initial value
    pub fn reset_all(&mut self, params: &mut SceneParams) {
        for control in &self.controls {
            control.knob.set(params, control.default);
        }
        log::info!("All controls reset");
    }

    /// One line per control, the selected one marked with `>`
    pub fn summary(&self, params: &SceneParams) -> String {
        let mut lines = Vec::with_capacity(self.controls.len());
        for (i, control) in self.controls.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            lines.push(format!(
                "{} {:<22} {:>8} [{} .. {}]",
                marker,
                control.name,
                format_value(control, control.value(params)),
                control.min,
                control.max
            ));
        }
        lines.push(format!(
            "  surfaceColor {}  depthColor {}",
            params.colors.surface_color, params.colors.depth_color
        ));
        lines.join("\n")
    }
}

fn format_value(control: &Control, value: f32) -> String {
    let decimals = if control.step >= 1.0 {
        0
    } else {
        (-control.step.log10()).ceil() as usize
    };
    format!("{:.*}", decimals, value)
}
