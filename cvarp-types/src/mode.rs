use serde::{Deserialize, Serialize};

/// How the step index moves when the clock fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectionMode {
    #[default]
    Up,
    UpDown,
    Random,
}

impl DirectionMode {
    pub const ALL: [DirectionMode; 3] = [
        DirectionMode::Up,
        DirectionMode::UpDown,
        DirectionMode::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DirectionMode::Up => "Up",
            DirectionMode::UpDown => "Up/Down",
            DirectionMode::Random => "Random",
        }
    }

    /// Decode the 3-position panel switch. The switch runs the opposite way
    /// to the declaration order: 0 is Random, 1 is Up/Down, 2 is Up.
    pub fn from_control(value: f32) -> Self {
        // NaN casts to 0
        match value.round().clamp(0.0, 2.0) as i32 {
            0 => DirectionMode::Random,
            1 => DirectionMode::UpDown,
            _ => DirectionMode::Up,
        }
    }

    /// Panel switch position that selects this mode.
    pub fn control_value(&self) -> f32 {
        match self {
            DirectionMode::Random => 0.0,
            DirectionMode::UpDown => 1.0,
            DirectionMode::Up => 2.0,
        }
    }

    /// Stable integer used in saved patches (declaration order).
    pub fn to_index(self) -> i64 {
        match self {
            DirectionMode::Up => 0,
            DirectionMode::UpDown => 1,
            DirectionMode::Random => 2,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(DirectionMode::Up),
            1 => Some(DirectionMode::UpDown),
            2 => Some(DirectionMode::Random),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Some(DirectionMode::Up),
            "updown" | "up-down" | "up/down" | "pingpong" => Some(DirectionMode::UpDown),
            "random" | "rand" => Some(DirectionMode::Random),
            _ => None,
        }
    }
}

/// Sweep direction remembered between steps in `UpDown` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunningDirection {
    #[default]
    Ascending,
    Descending,
}

/// Shape of the gate emitted for each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GateMode {
    /// Short pulse at the start of the step.
    #[default]
    Trigger,
    /// High for the whole step, with a short gap at the start.
    Retrigger,
    /// Follows the clock's gate window.
    Continuous,
}

impl GateMode {
    pub const ALL: [GateMode; 3] = [GateMode::Trigger, GateMode::Retrigger, GateMode::Continuous];

    pub fn name(&self) -> &'static str {
        match self {
            GateMode::Trigger => "Trigger",
            GateMode::Retrigger => "Retrigger",
            GateMode::Continuous => "Continuous",
        }
    }

    pub fn next(&self) -> GateMode {
        match self {
            GateMode::Trigger => GateMode::Retrigger,
            GateMode::Retrigger => GateMode::Continuous,
            GateMode::Continuous => GateMode::Trigger,
        }
    }

    pub fn prev(&self) -> GateMode {
        match self {
            GateMode::Trigger => GateMode::Continuous,
            GateMode::Retrigger => GateMode::Trigger,
            GateMode::Continuous => GateMode::Retrigger,
        }
    }

    /// Stable integer used in saved patches.
    pub fn to_index(self) -> i64 {
        match self {
            GateMode::Trigger => 0,
            GateMode::Retrigger => 1,
            GateMode::Continuous => 2,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(GateMode::Trigger),
            1 => Some(GateMode::Retrigger),
            2 => Some(GateMode::Continuous),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trigger" | "trig" => Some(GateMode::Trigger),
            "retrigger" | "retrig" => Some(GateMode::Retrigger),
            "continuous" | "gate" => Some(GateMode::Continuous),
            _ => None,
        }
    }
}
