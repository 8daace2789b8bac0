//! Row pitch outputs.

use cvarp_types::{NoteTable, NUM_ROWS};

/// Row voltages for `index`: the cell's 1 V/oct value plus the row's
/// external offset, passed through unclamped.
pub fn row_voltages(table: &NoteTable, index: usize, offsets: &[f32; NUM_ROWS]) -> [f32; NUM_ROWS] {
    let mut out = [0.0; NUM_ROWS];
    for (row, (slot, offset)) in out.iter_mut().zip(offsets).enumerate() {
        let base = table.get(row, index).map_or(0.0, |cell| cell.volts());
        *slot = base + offset;
    }
    out
}
