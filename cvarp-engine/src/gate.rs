//! Gate engine: per-step enable mask plus gate-mode shaping.

use cvarp_types::{GateMode, MAX_STEPS};

use crate::edge::EdgeDetector;
use crate::pulse::PulseGenerator;
use crate::sequencer::StepRng;

/// Gate levels computed for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateLevels {
    pub steps: [bool; MAX_STEPS],
    pub aggregate: bool,
}

#[derive(Debug, Clone)]
pub struct GateEngine {
    mask: [bool; MAX_STEPS],
    mode: GateMode,
    pulse: PulseGenerator,
    pulse_samples: u32,
    buttons: [EdgeDetector; MAX_STEPS],
}

impl GateEngine {
    pub fn new(pulse_samples: u32) -> Self {
        Self {
            mask: [true; MAX_STEPS],
            mode: GateMode::default(),
            pulse: PulseGenerator::new(),
            pulse_samples: pulse_samples.max(1),
            buttons: [EdgeDetector::new(); MAX_STEPS],
        }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GateMode) {
        self.mode = mode;
    }

    pub fn mask(&self) -> [bool; MAX_STEPS] {
        self.mask
    }

    pub fn is_enabled(&self, step: usize) -> bool {
        self.mask.get(step).copied().unwrap_or(false)
    }

    pub fn set_enabled(&mut self, step: usize, enabled: bool) {
        if let Some(slot) = self.mask.get_mut(step) {
            *slot = enabled;
        }
    }

    pub fn enable_all(&mut self) {
        self.mask = [true; MAX_STEPS];
    }

    pub fn randomize(&mut self, rng: &mut StepRng) {
        for slot in self.mask.iter_mut() {
            *slot = rng.coin();
        }
    }

    pub fn set_pulse_samples(&mut self, samples: u32) {
        self.pulse_samples = samples.max(1);
    }

    /// Fire the step-start pulse.
    pub fn fire(&mut self) {
        self.pulse.trigger(self.pulse_samples);
    }

    /// Advance the pulse by one sample; returns whether it is active.
    pub fn tick_pulse(&mut self) -> bool {
        self.pulse.process()
    }

    /// Toggle the mask for every button that has a rising edge.
    pub fn handle_buttons(&mut self, levels: &[f32; MAX_STEPS]) {
        for ((button, slot), &level) in self.buttons.iter_mut().zip(self.mask.iter_mut()).zip(levels) {
            if button.process(level) {
                *slot = !*slot;
            }
        }
    }

    /// Whether the selected mode lets a gate through on this sample.
    pub fn shaped(&self, gate_window: bool, pulse: bool) -> bool {
        match self.mode {
            GateMode::Trigger => pulse,
            GateMode::Retrigger => !pulse,
            GateMode::Continuous => gate_window,
        }
    }

    /// Gate levels for the active step `index`.
    pub fn levels(&self, running: bool, index: usize, gate_window: bool, pulse: bool) -> GateLevels {
        let open = running && self.is_enabled(index) && self.shaped(gate_window, pulse);
        let mut steps = [false; MAX_STEPS];
        if let Some(slot) = steps.get_mut(index) {
            *slot = open;
        }
        GateLevels {
            steps,
            aggregate: open,
        }
    }
}
