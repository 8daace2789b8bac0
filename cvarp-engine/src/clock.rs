//! Clock and transport: decides once per sample whether a step begins.

use cvarp_types::ControlInputs;

use crate::edge::EdgeDetector;

/// Result of one transport tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTick {
    /// A new step should begin on this sample.
    pub advance: bool,
    /// The advance was forced by a reset edge.
    pub reset: bool,
    /// Raw clock gate window (external clock high, or first half of the
    /// internal phase). Always low while stopped.
    pub gate_window: bool,
}

/// Owns the running flag, the internal phase accumulator and the edge
/// detectors for the run button, reset and external clock.
#[derive(Debug, Clone)]
pub struct Transport {
    running: bool,
    phase: f64,
    run_trigger: EdgeDetector,
    reset_trigger: EdgeDetector,
    clock_trigger: EdgeDetector,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            running: true,
            phase: 0.0,
            run_trigger: EdgeDetector::new(),
            reset_trigger: EdgeDetector::new(),
            clock_trigger: EdgeDetector::new(),
        }
    }
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Internal clock phase, always in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase as f32
    }

    /// Whether the combined reset input is currently held high.
    pub fn reset_held(&self) -> bool {
        self.reset_trigger.is_high()
    }

    /// Advance the transport by one sample of length `sample_time` seconds.
    pub fn tick(&mut self, inputs: &ControlInputs, sample_time: f64) -> ClockTick {
        if self.run_trigger.process(inputs.run_button) {
            self.running = !self.running;
        }

        let mut advance = false;
        let mut gate_window = false;
        if self.running {
            match inputs.ext_clock {
                Some(level) => {
                    if self.clock_trigger.process(level) {
                        self.phase = 0.0;
                        advance = true;
                    }
                    gate_window = self.clock_trigger.is_high();
                }
                None => {
                    let rate = (inputs.clock_rate as f64 + inputs.clock_cv as f64).exp2();
                    if rate.is_finite() {
                        self.phase += rate * sample_time;
                    }
                    if self.phase >= 1.0 {
                        self.phase -= 1.0;
                        // Rates above one step per sample cannot be honoured
                        if self.phase >= 1.0 {
                            self.phase = 0.0;
                        }
                        advance = true;
                    }
                    gate_window = self.phase < 0.5;
                }
            }
        }

        // Button and jack are ORed, then edge-detected together
        let reset = self
            .reset_trigger
            .process(inputs.reset_button.max(inputs.reset_cv));
        if reset {
            self.phase = 0.0;
            advance = true;
        }

        ClockTick {
            advance,
            reset,
            gate_window,
        }
    }
}
