use serde_json::{json, Value};

use cvarp_engine::Engine;
use cvarp_types::NoteCell;

use super::{
    PersistError, KEY_DIRECTION_MODE, KEY_GATES, KEY_GATE_MODE, KEY_OCTAVES, KEY_RUNNING,
    KEY_SEMITONES,
};

/// Snapshot the persistent part of `engine`.
pub fn save_patch(engine: &Engine) -> Value {
    let table = engine.note_table();
    let column = |pick: fn(&NoteCell) -> u8| -> Vec<Vec<u8>> {
        table
            .rows()
            .iter()
            .map(|row| row.iter().map(pick).collect())
            .collect()
    };
    let gates: Vec<u8> = engine.gate_mask().iter().map(|&g| g as u8).collect();

    let mut doc = serde_json::Map::new();
    doc.insert(KEY_RUNNING.into(), json!(engine.is_running()));
    doc.insert(KEY_OCTAVES.into(), json!(column(|c| c.octave)));
    doc.insert(KEY_SEMITONES.into(), json!(column(|c| c.semitone)));
    doc.insert(KEY_GATES.into(), json!(gates));
    doc.insert(KEY_GATE_MODE.into(), json!(engine.gate_mode().to_index()));
    doc.insert(
        KEY_DIRECTION_MODE.into(),
        json!(engine.direction_mode().to_index()),
    );
    Value::Object(doc)
}

pub fn save_patch_string(engine: &Engine) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&save_patch(engine))?)
}
