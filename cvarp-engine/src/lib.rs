//! # cvarp-engine
//!
//! Real-time sequencing engine for an 8-step, 3-row CV arpeggiator.
//!
//! The host builds a [`ControlInputs`] snapshot each sample, hands it to
//! [`Engine::process`] and reads back an [`Outputs`] snapshot. Nothing on
//! that path allocates, blocks or logs.
//!
//! ## Module Overview
//!
//! - [`edge`]: hysteresis edge detector for buttons and clock/reset jacks
//! - [`clock`]: running flag, internal phase accumulator, external clock
//! - [`sequencer`]: step index state machine (Up, Up/Down, Random)
//! - [`gate`]: gate-enable mask, gate modes and the step pulse
//! - [`pitch`]: row voltages from the note table
//! - [`light`], [`pulse`]: indicator smoothing and the monostable

pub mod clock;
pub mod edge;
pub mod engine;
pub mod gate;
pub mod light;
pub mod pitch;
pub mod pulse;
pub mod sequencer;
pub mod settings;

pub use engine::Engine;
pub use settings::EngineSettings;

pub use cvarp_types::{ControlInputs, Outputs};
