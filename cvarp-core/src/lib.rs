//! # cvarp-core
//!
//! Host-side services around the sequencing engine: TOML configuration and
//! patch persistence.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cvarp_core::config::Config;
//! use cvarp_core::persistence::{load_patch_str, save_patch_string};
//!
//! let config = Config::load();
//! let mut engine = cvarp_core::new_engine(&config);
//! let report = load_patch_str(&mut engine, &saved_text)?;
//! // ... call engine.process(&inputs) once per sample ...
//! let text = save_patch_string(&engine)?;
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: embedded `config.toml` plus user override
//! - [`persistence`]: patch JSON save/load with stable key names

pub mod config;
pub mod persistence;

use cvarp_engine::Engine;
use cvarp_types::{NoteCell, NoteTable};

use crate::config::Config;

/// Build an engine from configuration: engine settings, default gate mode
/// and the default octave for every note cell.
pub fn new_engine(config: &Config) -> Engine {
    let mut engine = Engine::new(config.engine_settings());
    engine.set_gate_mode(config.default_gate_mode());
    *engine.note_table_mut() = NoteTable::filled(NoteCell::new(0, config.default_octave()));
    engine
}
