use serde_json::Value;

use cvarp_engine::Engine;
use cvarp_types::{DirectionMode, GateMode, MAX_OCTAVE, MAX_SEMITONE, MAX_STEPS, NUM_ROWS};

use super::{
    LoadReport, PersistError, KEY_DIRECTION_MODE, KEY_GATES, KEY_GATE_MODE, KEY_OCTAVES,
    KEY_RUNNING, KEY_SEMITONES,
};

/// Apply a saved patch to `engine`.
///
/// Every key is optional. A missing key, a missing table cell, or a value of
/// the wrong type leaves the engine's current value in place; only a root
/// that is not an object is an error.
pub fn load_patch(engine: &mut Engine, doc: &Value) -> Result<LoadReport, PersistError> {
    let root = doc.as_object().ok_or(PersistError::NotAnObject)?;
    let mut report = LoadReport::default();

    if let Some(value) = root.get(KEY_RUNNING) {
        match value.as_bool() {
            Some(running) => {
                engine.set_running(running);
                report.applied += 1;
            }
            None => skip(&mut report, KEY_RUNNING, value),
        }
    }

    if let Some(value) = root.get(KEY_OCTAVES) {
        load_table(&mut report, KEY_OCTAVES, value, |row, step, v| {
            engine
                .note_table_mut()
                .set_octave(row, step, v.min(MAX_OCTAVE as u64) as u8)
        });
    }

    if let Some(value) = root.get(KEY_SEMITONES) {
        load_table(&mut report, KEY_SEMITONES, value, |row, step, v| {
            engine
                .note_table_mut()
                .set_semitone(row, step, v.min(MAX_SEMITONE as u64) as u8)
        });
    }

    if let Some(value) = root.get(KEY_GATES) {
        match value.as_array() {
            Some(gates) => {
                for (step, gate) in gates.iter().take(MAX_STEPS).enumerate() {
                    let enabled = gate
                        .as_i64()
                        .map(|g| g != 0)
                        .or_else(|| gate.as_bool());
                    match enabled {
                        Some(enabled) => {
                            engine.set_gate_enabled(step, enabled);
                            report.applied += 1;
                        }
                        None => skip(&mut report, KEY_GATES, gate),
                    }
                }
            }
            None => skip(&mut report, KEY_GATES, value),
        }
    }

    if let Some(value) = root.get(KEY_GATE_MODE) {
        match value.as_i64().and_then(GateMode::from_index) {
            Some(mode) => {
                engine.set_gate_mode(mode);
                report.applied += 1;
            }
            None => skip(&mut report, KEY_GATE_MODE, value),
        }
    }

    if let Some(value) = root.get(KEY_DIRECTION_MODE) {
        match value.as_i64().and_then(DirectionMode::from_index) {
            Some(mode) => {
                engine.set_direction_mode(mode);
                report.applied += 1;
            }
            None => skip(&mut report, KEY_DIRECTION_MODE, value),
        }
    }

    log::debug!(
        target: "persistence",
        "patch loaded: {} values applied, {} skipped",
        report.applied,
        report.skipped
    );
    Ok(report)
}

/// Parse `text` as JSON and apply it with [`load_patch`].
pub fn load_patch_str(engine: &mut Engine, text: &str) -> Result<LoadReport, PersistError> {
    let doc: Value = serde_json::from_str(text)?;
    load_patch(engine, &doc)
}

/// Walk a rows x steps array of non-negative integers, calling `apply` for
/// every cell that is present and well-formed.
fn load_table(
    report: &mut LoadReport,
    key: &str,
    value: &Value,
    mut apply: impl FnMut(usize, usize, u64) -> bool,
) {
    let Some(rows) = value.as_array() else {
        skip(report, key, value);
        return;
    };
    for (row, cells) in rows.iter().take(NUM_ROWS).enumerate() {
        let Some(cells) = cells.as_array() else {
            skip(report, key, cells);
            continue;
        };
        for (step, cell) in cells.iter().take(MAX_STEPS).enumerate() {
            if cell.as_u64().is_some_and(|v| apply(row, step, v)) {
                report.applied += 1;
            } else {
                skip(report, key, cell);
            }
        }
    }
}

fn skip(report: &mut LoadReport, key: &str, value: &Value) {
    report.skipped += 1;
    log::warn!(target: "persistence", "ignoring malformed {}: {}", key, value);
}
