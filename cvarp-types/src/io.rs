//! Per-sample snapshots exchanged between the host and the engine.

use crate::{MAX_STEPS, NUM_ROWS};

/// Everything the engine reads from the host for one sample.
///
/// Button fields carry the raw button level (0.0 released, 1.0 pressed);
/// signal fields carry voltages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInputs {
    /// Internal clock rate as log2 of steps per second.
    pub clock_rate: f32,
    /// Added to `clock_rate` before exponentiation.
    pub clock_cv: f32,
    /// External clock level, `None` when nothing is patched in.
    pub ext_clock: Option<f32>,
    pub run_button: f32,
    pub reset_button: f32,
    pub reset_cv: f32,
    /// Step count knob, 1-8.
    pub steps: f32,
    pub steps_cv: f32,
    /// Direction switch position, see `DirectionMode::from_control`.
    pub direction: f32,
    pub gate_buttons: [f32; MAX_STEPS],
    /// Per-row pitch offset in volts.
    pub pitch_cv: [f32; NUM_ROWS],
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            clock_rate: 2.0,
            clock_cv: 0.0,
            ext_clock: None,
            run_button: 0.0,
            reset_button: 0.0,
            reset_cv: 0.0,
            steps: MAX_STEPS as f32,
            steps_cv: 0.0,
            direction: 2.0,
            gate_buttons: [0.0; MAX_STEPS],
            pitch_cv: [0.0; NUM_ROWS],
        }
    }
}

/// Indicator brightness levels, each 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lights {
    pub running: f32,
    pub reset: f32,
    pub gates: f32,
    pub rows: [f32; NUM_ROWS],
    pub steps: [f32; MAX_STEPS],
}

/// Everything the engine hands back to the host for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Outputs {
    /// Current step index after this sample's advancement.
    pub step: usize,
    /// Whether a step began on this sample.
    pub advanced: bool,
    /// Row pitch CVs in volts.
    pub rows: [f32; NUM_ROWS],
    /// Aggregate gate for whichever step is active.
    pub gates: f32,
    pub step_gates: [f32; MAX_STEPS],
    pub lights: Lights,
}

impl Outputs {
    pub fn gate_high(&self) -> bool {
        self.gates > 0.0
    }

    pub fn step_gate_high(&self, step: usize) -> bool {
        self.step_gates.get(step).is_some_and(|&v| v > 0.0)
    }
}
