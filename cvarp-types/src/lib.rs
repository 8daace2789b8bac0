//! # cvarp-types
//!
//! Shared type definitions for the cvarp step sequencer.
//! Plain data only: sequencing modes, the per-row note table, and the
//! per-sample control/output snapshots exchanged with the host.

mod io;
mod mode;
mod note;

pub use io::{ControlInputs, Lights, Outputs};
pub use mode::{DirectionMode, GateMode, RunningDirection};
pub use note::{NoteCell, NoteTable, MAX_OCTAVE, MAX_SEMITONE};

/// Number of step slots in a sequence.
pub const MAX_STEPS: usize = 8;

/// Number of independent pitch rows.
pub const NUM_ROWS: usize = 3;

/// Voltage emitted by a gate output while high.
pub const GATE_HIGH: f32 = 10.0;
