//! Per-row note table.

use crate::{MAX_STEPS, NUM_ROWS};

pub const MAX_SEMITONE: u8 = 11;
pub const MAX_OCTAVE: u8 = 7;

/// One step's pitch within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteCell {
    pub semitone: u8, // 0-11
    pub octave: u8,   // 0-7
}

impl NoteCell {
    /// Build a cell, clamping both fields into range.
    pub fn new(semitone: u8, octave: u8) -> Self {
        Self {
            semitone: semitone.min(MAX_SEMITONE),
            octave: octave.min(MAX_OCTAVE),
        }
    }

    /// Semitones relative to the 0 V reference note.
    pub fn semitones_from_zero(&self) -> i32 {
        (self.octave as i32 + 2) * 12 + self.semitone as i32 - 60
    }

    /// 1 V/oct control voltage for this cell. Octave 3, semitone 0 is 0 V.
    pub fn volts(&self) -> f32 {
        self.semitones_from_zero() as f32 / 12.0
    }
}

/// 3 rows x 8 steps of note cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteTable {
    cells: [[NoteCell; MAX_STEPS]; NUM_ROWS],
}

impl NoteTable {
    pub fn filled(cell: NoteCell) -> Self {
        Self {
            cells: [[cell; MAX_STEPS]; NUM_ROWS],
        }
    }

    /// Returns `None` when `row` or `step` is out of range.
    pub fn get(&self, row: usize, step: usize) -> Option<NoteCell> {
        self.cells.get(row).and_then(|r| r.get(step)).copied()
    }

    /// Writes a cell. Out-of-range coordinates are ignored; returns whether
    /// the write happened.
    pub fn set(&mut self, row: usize, step: usize, cell: NoteCell) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(step)) {
            Some(slot) => {
                *slot = NoteCell::new(cell.semitone, cell.octave);
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[[NoteCell; MAX_STEPS]; NUM_ROWS] {
        &self.cells
    }

    pub fn set_octave(&mut self, row: usize, step: usize, octave: u8) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(step)) {
            Some(slot) => {
                slot.octave = octave.min(MAX_OCTAVE);
                true
            }
            None => false,
        }
    }

    pub fn set_semitone(&mut self, row: usize, step: usize, semitone: u8) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(step)) {
            Some(slot) => {
                slot.semitone = semitone.min(MAX_SEMITONE);
                true
            }
            None => false,
        }
    }
}
