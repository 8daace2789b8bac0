/// Construction-time parameters for an `Engine`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub sample_rate: f32,
    /// Length of the step trigger pulse.
    pub pulse_ms: f32,
    /// Time constant of the indicator light decay.
    pub light_decay_ms: f32,
    /// Seed for the random direction mode and gate randomization.
    pub seed: u64,
}

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub const DEFAULT_PULSE_MS: f32 = 1.0;
pub const DEFAULT_LIGHT_DECAY_MS: f32 = 75.0;
pub const DEFAULT_SEED: u64 = 0x2545_f491_4f6c_dd1d;

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            pulse_ms: DEFAULT_PULSE_MS,
            light_decay_ms: DEFAULT_LIGHT_DECAY_MS,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineSettings {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
