//! Rising-edge detection with hysteresis.

/// Level at or above which a signal counts as high.
pub const HIGH_THRESHOLD: f32 = 1.0;
/// Level at or below which a signal counts as low.
pub const LOW_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Latch {
    #[default]
    Unknown,
    Low,
    High,
}

/// Schmitt-style edge detector used for buttons and clock/reset jacks.
///
/// Values between the two thresholds keep the previous state, so a signal
/// hovering around a single threshold does not chatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    latch: Latch,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample. Returns `true` only on the sample where the signal
    /// goes from low (or never seen) to high.
    pub fn process(&mut self, level: f32) -> bool {
        match self.latch {
            Latch::Unknown | Latch::Low => {
                if level >= HIGH_THRESHOLD {
                    self.latch = Latch::High;
                    return true;
                }
                if level <= LOW_THRESHOLD {
                    self.latch = Latch::Low;
                }
            }
            Latch::High => {
                if level <= LOW_THRESHOLD {
                    self.latch = Latch::Low;
                }
            }
        }
        false
    }

    /// Whether the last processed sample left the latch high.
    pub fn is_high(&self) -> bool {
        self.latch == Latch::High
    }
}
