/// Retriggerable monostable counted in samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseGenerator {
    remaining: u32,
}

impl PulseGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or extend) a pulse lasting `samples` calls to `process`.
    /// A pulse already running longer is kept.
    pub fn trigger(&mut self, samples: u32) {
        self.remaining = self.remaining.max(samples);
    }

    /// Advance one sample; returns whether the pulse is active on it.
    pub fn process(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

/// Pulse length in samples for a duration in milliseconds (at least one).
pub fn pulse_samples(duration_ms: f32, sample_rate: f32) -> u32 {
    let samples = (duration_ms * 1e-3 * sample_rate).round();
    if samples.is_finite() && samples >= 1.0 {
        samples as u32
    } else {
        1
    }
}
