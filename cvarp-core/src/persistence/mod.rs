//! Patch persistence.
//!
//! A patch is a JSON object the host stores inside its own file format.
//! Key names are stable; older patches must keep loading.

mod load;
mod save;

pub use load::{load_patch, load_patch_str};
pub use save::{save_patch, save_patch_string};

pub(crate) const KEY_RUNNING: &str = "running";
pub(crate) const KEY_OCTAVES: &str = "octaves";
pub(crate) const KEY_SEMITONES: &str = "semitones";
pub(crate) const KEY_GATES: &str = "gates";
pub(crate) const KEY_GATE_MODE: &str = "gateMode";
pub(crate) const KEY_DIRECTION_MODE: &str = "directionMode";

/// Error type for patch load/save.
#[derive(Debug)]
pub enum PersistError {
    Json(serde_json::Error),
    /// The document parsed but its root is not a JSON object.
    NotAnObject,
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::NotAnObject => write!(f, "patch root is not a JSON object"),
        }
    }
}

impl std::error::Error for PersistError {}

/// What a load applied and what it had to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Values written into the engine (a table cell counts as one).
    pub applied: usize,
    /// Present but malformed values left at their old setting.
    pub skipped: usize,
}
