//! The per-sample sequencing engine.

use cvarp_types::{
    ControlInputs, DirectionMode, GateMode, Lights, NoteCell, NoteTable, Outputs,
    RunningDirection, GATE_HIGH, MAX_STEPS, NUM_ROWS,
};

use crate::clock::{ClockTick, Transport};
use crate::gate::GateEngine;
use crate::light::LightSmoother;
use crate::pitch::row_voltages;
use crate::pulse::pulse_samples;
use crate::sequencer::{step_count, DirectionSequencer};
use crate::settings::EngineSettings;

/// Step brightness for an enabled step that is not playing.
const LIGHT_ENABLED: f32 = 0.66;
/// Step brightness for a disabled step that is playing.
const LIGHT_MUTED_ACTIVE: f32 = 0.33;
/// Row voltage that lights a row indicator at full brightness.
const LIGHT_FULL_SCALE_VOLTS: f32 = 10.0;

#[derive(Debug, Clone)]
struct LightBank {
    reset: LightSmoother,
    gates: LightSmoother,
    steps: [LightSmoother; MAX_STEPS],
}

impl LightBank {
    fn new(decay_ms: f32, sample_rate: f32) -> Self {
        let light = LightSmoother::new(decay_ms, sample_rate);
        Self {
            reset: light,
            gates: light,
            steps: [light; MAX_STEPS],
        }
    }

    fn set_decay(&mut self, decay_ms: f32, sample_rate: f32) {
        self.reset.set_decay(decay_ms, sample_rate);
        self.gates.set_decay(decay_ms, sample_rate);
        for light in self.steps.iter_mut() {
            light.set_decay(decay_ms, sample_rate);
        }
    }
}

/// CV step sequencer core.
///
/// Call [`Engine::process`] once per sample. Everything else is for the
/// host layer (panel edits, context menu, patch load) and must not run
/// concurrently with `process`.
#[derive(Debug, Clone)]
pub struct Engine {
    settings: EngineSettings,
    sample_time: f64,
    transport: Transport,
    sequencer: DirectionSequencer,
    direction_mode: DirectionMode,
    gates: GateEngine,
    notes: NoteTable,
    lights: LightBank,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Self {
        let sample_rate = sanitize_rate(settings.sample_rate);
        let settings = EngineSettings {
            sample_rate,
            ..settings
        };
        Self {
            sample_time: 1.0 / sample_rate as f64,
            transport: Transport::new(),
            sequencer: DirectionSequencer::new(settings.seed),
            direction_mode: DirectionMode::Up,
            gates: GateEngine::new(pulse_samples(settings.pulse_ms, sample_rate)),
            notes: NoteTable::default(),
            lights: LightBank::new(settings.light_decay_ms, sample_rate),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn sample_rate(&self) -> f32 {
        self.settings.sample_rate
    }

    /// Change the processing rate; pulse length and light decay follow.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let sample_rate = sanitize_rate(sample_rate);
        self.settings.sample_rate = sample_rate;
        self.sample_time = 1.0 / sample_rate as f64;
        self.gates
            .set_pulse_samples(pulse_samples(self.settings.pulse_ms, sample_rate));
        self.lights.set_decay(self.settings.light_decay_ms, sample_rate);
        log::debug!(target: "engine", "sample rate set to {} Hz", sample_rate);
    }

    /// Run one sample.
    pub fn process(&mut self, inputs: &ControlInputs) -> Outputs {
        let clock = self.transport.tick(inputs, self.sample_time);
        let num_steps = step_count(inputs.steps, inputs.steps_cv);

        if clock.reset {
            self.sequencer.park();
        }
        if clock.advance {
            self.direction_mode = DirectionMode::from_control(inputs.direction);
            self.sequencer.advance(self.direction_mode, num_steps);
            self.gates.fire();
        } else {
            self.sequencer.constrain(num_steps);
        }
        let index = self.sequencer.index();
        if clock.advance {
            self.lights.steps[index].flash();
        }

        let pulse = self.gates.tick_pulse();
        self.gates.handle_buttons(&inputs.gate_buttons);

        let running = self.transport.is_running();
        let levels = self.gates.levels(running, index, clock.gate_window, pulse);
        let rows = row_voltages(&self.notes, index, &inputs.pitch_cv);

        let mut step_gates = [0.0; MAX_STEPS];
        for (out, &high) in step_gates.iter_mut().zip(levels.steps.iter()) {
            *out = gate_volts(high);
        }

        Outputs {
            step: index,
            advanced: clock.advance,
            rows,
            gates: gate_volts(levels.aggregate),
            step_gates,
            lights: self.update_lights(&clock, index, rows),
        }
    }

    fn update_lights(&mut self, clock: &ClockTick, index: usize, rows: [f32; NUM_ROWS]) -> Lights {
        let mut steps = [0.0; MAX_STEPS];
        for (i, (out, light)) in steps.iter_mut().zip(self.lights.steps.iter_mut()).enumerate() {
            let enabled = self.gates.is_enabled(i);
            let target = match (clock.gate_window && i == index, enabled) {
                (true, true) => 1.0,
                (true, false) => LIGHT_MUTED_ACTIVE,
                (false, true) => LIGHT_ENABLED,
                (false, false) => 0.0,
            };
            *out = light.process(target);
        }
        Lights {
            running: if self.transport.is_running() { 1.0 } else { 0.0 },
            reset: self
                .lights
                .reset
                .process(if self.transport.reset_held() { 1.0 } else { 0.0 }),
            gates: self
                .lights
                .gates
                .process(if clock.gate_window { 1.0 } else { 0.0 }),
            rows: rows.map(|v| v / LIGHT_FULL_SCALE_VOLTS),
            steps,
        }
    }

    pub fn is_running(&self) -> bool {
        self.transport.is_running()
    }

    pub fn set_running(&mut self, running: bool) {
        self.transport.set_running(running);
    }

    pub fn phase(&self) -> f32 {
        self.transport.phase()
    }

    pub fn index(&self) -> usize {
        self.sequencer.index()
    }

    pub fn running_direction(&self) -> RunningDirection {
        self.sequencer.running_direction()
    }

    /// Direction mode used for the most recent advance. Re-read from the
    /// panel control on every advance.
    pub fn direction_mode(&self) -> DirectionMode {
        self.direction_mode
    }

    pub fn set_direction_mode(&mut self, mode: DirectionMode) {
        self.direction_mode = mode;
    }

    pub fn gate_mode(&self) -> GateMode {
        self.gates.mode()
    }

    pub fn set_gate_mode(&mut self, mode: GateMode) {
        if mode != self.gates.mode() {
            log::debug!(target: "engine", "gate mode {} -> {}", self.gates.mode().name(), mode.name());
        }
        self.gates.set_mode(mode);
    }

    pub fn gate_mask(&self) -> [bool; MAX_STEPS] {
        self.gates.mask()
    }

    pub fn gate_enabled(&self, step: usize) -> bool {
        self.gates.is_enabled(step)
    }

    /// Out-of-range steps are ignored.
    pub fn set_gate_enabled(&mut self, step: usize, enabled: bool) {
        self.gates.set_enabled(step, enabled);
    }

    /// Enable every gate.
    pub fn reset_gates(&mut self) {
        self.gates.enable_all();
        log::debug!(target: "engine", "gates reset");
    }

    /// Enable each gate with probability one half.
    pub fn randomize_gates(&mut self) {
        let rng = self.sequencer.rng_mut();
        self.gates.randomize(rng);
        log::debug!(target: "engine", "gates randomized: {:?}", self.gates.mask());
    }

    pub fn note(&self, row: usize, step: usize) -> Option<NoteCell> {
        self.notes.get(row, step)
    }

    /// Out-of-range coordinates are ignored; returns whether the write
    /// happened.
    pub fn set_note(&mut self, row: usize, step: usize, cell: NoteCell) -> bool {
        self.notes.set(row, step, cell)
    }

    pub fn note_table(&self) -> &NoteTable {
        &self.notes
    }

    pub fn note_table_mut(&mut self) -> &mut NoteTable {
        &mut self.notes
    }
}

fn gate_volts(high: bool) -> f32 {
    if high {
        GATE_HIGH
    } else {
        0.0
    }
}

fn sanitize_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate >= 1.0 {
        sample_rate
    } else {
        log::warn!(target: "engine", "invalid sample rate {}, using default", sample_rate);
        crate::settings::DEFAULT_SAMPLE_RATE
    }
}
