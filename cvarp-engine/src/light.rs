//! Indicator brightness smoothing.

/// Light level that jumps up instantly and decays exponentially.
#[derive(Debug, Clone, Copy)]
pub struct LightSmoother {
    value: f32,
    coefficient: f32,
}

impl LightSmoother {
    pub fn new(decay_ms: f32, sample_rate: f32) -> Self {
        Self {
            value: 0.0,
            coefficient: decay_coefficient(decay_ms, sample_rate),
        }
    }

    pub fn set_decay(&mut self, decay_ms: f32, sample_rate: f32) {
        self.coefficient = decay_coefficient(decay_ms, sample_rate);
    }

    /// Move one sample toward `target` and return the new level.
    pub fn process(&mut self, target: f32) -> f32 {
        if target >= self.value {
            self.value = target;
        } else {
            self.value += (target - self.value) * self.coefficient;
        }
        self.value
    }

    /// Force the light to full brightness; it decays from there.
    pub fn flash(&mut self) {
        self.value = 1.0;
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// One-pole coefficient for a time constant of `decay_ms`.
fn decay_coefficient(decay_ms: f32, sample_rate: f32) -> f32 {
    let tau_samples = decay_ms * 1e-3 * sample_rate;
    if tau_samples.is_finite() && tau_samples > 0.0 {
        1.0 - (-1.0 / tau_samples).exp()
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_instantly() {
        let mut light = LightSmoother::new(75.0, 48_000.0);
        assert_eq!(light.process(1.0), 1.0);
    }

    #[test]
    fn decays_by_one_time_constant() {
        let sample_rate = 48_000.0;
        let mut light = LightSmoother::new(75.0, sample_rate);
        light.process(1.0);
        // 75 ms worth of samples
        for _ in 0..3600 {
            light.process(0.0);
        }
        let expected = (-1.0f32).exp();
        assert!((light.value() - expected).abs() < 0.01, "got {}", light.value());
    }

    #[test]
    fn zero_decay_snaps() {
        let mut light = LightSmoother::new(0.0, 48_000.0);
        light.flash();
        assert_eq!(light.process(0.25), 0.25);
    }
}
