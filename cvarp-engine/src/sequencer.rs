//! Direction sequencer: picks the next step index.

use cvarp_types::{DirectionMode, RunningDirection, MAX_STEPS};

/// Small LCG used for random step selection and gate randomization.
#[derive(Debug, Clone)]
pub struct StepRng {
    state: u64,
}

impl StepRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 31-bit value from the high bits of the LCG state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) as u32
    }

    /// Uniform draw in `[0, n)`. The draw is a 31-bit value reduced
    /// modulo `n`; for step counts of 1-8 the bias is below 2^-28.
    pub fn below(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.next_u32() as usize % n
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_u32() >= 1 << 30
    }
}

/// Effective step count from the knob plus CV: rounded, then clamped to
/// `1..=MAX_STEPS`.
pub fn step_count(knob: f32, cv: f32) -> usize {
    // NaN casts to 0
    ((knob + cv).round() as i32).clamp(1, MAX_STEPS as i32) as usize
}

/// Step index state machine.
#[derive(Debug, Clone)]
pub struct DirectionSequencer {
    index: usize,
    running_direction: RunningDirection,
    rng: StepRng,
}

impl DirectionSequencer {
    pub fn new(seed: u64) -> Self {
        Self {
            index: 0,
            running_direction: RunningDirection::Ascending,
            rng: StepRng::new(seed),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn running_direction(&self) -> RunningDirection {
        self.running_direction
    }

    pub fn rng_mut(&mut self) -> &mut StepRng {
        &mut self.rng
    }

    /// Park the index one past the last slot so the next `advance`
    /// recomputes a first step.
    pub fn park(&mut self) {
        self.index = MAX_STEPS;
    }

    /// Pull the index back into `[0, num_steps)` without moving otherwise.
    /// Used when the step count shrinks between advances.
    pub fn constrain(&mut self, num_steps: usize) {
        let n = num_steps.clamp(1, MAX_STEPS);
        if self.index >= n {
            self.index = n - 1;
        }
    }

    /// Move to the next step and return it.
    pub fn advance(&mut self, mode: DirectionMode, num_steps: usize) -> usize {
        let n = num_steps.clamp(1, MAX_STEPS);
        match mode {
            DirectionMode::Up => {
                self.index += 1;
                if self.index >= n {
                    self.index = 0;
                }
            }
            DirectionMode::UpDown => match self.running_direction {
                RunningDirection::Ascending => {
                    self.index += 1;
                    if self.index >= n {
                        self.index = self.index.saturating_sub(2);
                        self.running_direction = RunningDirection::Descending;
                    }
                }
                RunningDirection::Descending => {
                    if self.index == 0 {
                        // Bounce forward two from -1; for a single step this
                        // lands one past the end and is pulled back below.
                        self.index = 1.min(n);
                        self.running_direction = RunningDirection::Ascending;
                    } else {
                        self.index -= 1;
                    }
                }
            },
            DirectionMode::Random => {
                self.index = self.rng.below(n);
            }
        }
        // Parked or one-past-the-end positions never reach the outputs
        if self.index >= n {
            self.index = n - 1;
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(mode: DirectionMode, n: usize, count: usize) -> Vec<usize> {
        let mut seq = DirectionSequencer::new(7);
        (0..count).map(|_| seq.advance(mode, n)).collect()
    }

    #[test]
    fn step_count_rounds_and_clamps() {
        assert_eq!(step_count(4.0, 0.0), 4);
        assert_eq!(step_count(4.0, 1.6), 6);
        assert_eq!(step_count(4.0, 0.4), 4);
        assert_eq!(step_count(8.0, 5.0), 8);
        assert_eq!(step_count(1.0, -5.0), 1);
        assert_eq!(step_count(f32::NAN, 0.0), 1);
    }

    #[test]
    fn up_wraps() {
        assert_eq!(sequence(DirectionMode::Up, 4, 6), vec![1, 2, 3, 0, 1, 2]);
        assert_eq!(sequence(DirectionMode::Up, 1, 3), vec![0, 0, 0]);
    }

    #[test]
    fn up_down_does_not_repeat_endpoints() {
        assert_eq!(
            sequence(DirectionMode::UpDown, 4, 10),
            vec![1, 2, 3, 2, 1, 0, 1, 2, 3, 2]
        );
        assert_eq!(sequence(DirectionMode::UpDown, 2, 5), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn up_down_single_step_stays_in_range() {
        let mut seq = DirectionSequencer::new(1);
        for _ in 0..20 {
            assert_eq!(seq.advance(DirectionMode::UpDown, 1), 0);
        }
    }

    #[test]
    fn parked_index_restarts_at_zero_going_up() {
        let mut seq = DirectionSequencer::new(1);
        seq.advance(DirectionMode::Up, 8);
        seq.advance(DirectionMode::Up, 8);
        seq.park();
        assert_eq!(seq.index(), MAX_STEPS);
        assert_eq!(seq.advance(DirectionMode::Up, 5), 0);
    }

    #[test]
    fn parked_index_in_up_down_lands_in_range() {
        for n in 1..=MAX_STEPS {
            let mut seq = DirectionSequencer::new(1);
            seq.park();
            let index = seq.advance(DirectionMode::UpDown, n);
            assert!(index < n, "n={} index={}", n, index);
        }
    }

    #[test]
    fn constrain_pulls_index_back() {
        let mut seq = DirectionSequencer::new(1);
        for _ in 0..6 {
            seq.advance(DirectionMode::Up, 8);
        }
        assert_eq!(seq.index(), 6);
        seq.constrain(4);
        assert_eq!(seq.index(), 3);
        seq.constrain(8);
        assert_eq!(seq.index(), 3);
    }

    #[test]
    fn rng_below_stays_in_range() {
        let mut rng = StepRng::new(99);
        for n in 1..=MAX_STEPS {
            for _ in 0..500 {
                assert!(rng.below(n) < n);
            }
        }
    }
}
