use std::path::{Path, PathBuf};

use serde::Deserialize;

use cvarp_engine::settings::{
    DEFAULT_LIGHT_DECAY_MS, DEFAULT_PULSE_MS, DEFAULT_SAMPLE_RATE, DEFAULT_SEED,
};
use cvarp_engine::EngineSettings;
use cvarp_types::{GateMode, MAX_OCTAVE};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
    #[serde(default)]
    defaults: DefaultsConfig,
}

#[derive(Deserialize, Default)]
struct EngineConfig {
    sample_rate: Option<f32>,
    pulse_ms: Option<f32>,
    light_decay_ms: Option<f32>,
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    gate_mode: Option<String>,
    // Clamped in `default_octave`
    octave: Option<i64>,
}

pub struct Config {
    engine: EngineConfig,
    defaults: DefaultsConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        let mut config = Self::embedded();
        if let Some(path) = user_config_path() {
            if path.exists() {
                config.merge_file(&path);
            }
        }
        config
    }

    /// Embedded defaults merged with an explicit file.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::embedded();
        config.merge_file(path);
        config
    }

    /// Embedded defaults merged with TOML text.
    pub fn from_toml(contents: &str) -> Self {
        let mut config = Self::embedded();
        match toml::from_str::<ConfigFile>(contents) {
            Ok(user) => config.merge(user),
            Err(e) => log::warn!(target: "config", "ignoring malformed config: {}", e),
        }
        config
    }

    fn embedded() -> Self {
        let base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!(target: "config", "embedded config.toml is invalid: {}", e);
            ConfigFile::default()
        });
        Config {
            engine: base.engine,
            defaults: base.defaults,
        }
    }

    fn merge_file(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => {
                    self.merge(user);
                    log::debug!(target: "config", "loaded {}", path.display());
                }
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
    }

    fn merge(&mut self, user: ConfigFile) {
        merge_engine(&mut self.engine, user.engine);
        merge_defaults(&mut self.defaults, user.defaults);
    }

    /// Engine construction parameters, clamped to sane ranges.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            sample_rate: clamp_or(self.engine.sample_rate, DEFAULT_SAMPLE_RATE, 1_000.0, 384_000.0),
            pulse_ms: clamp_or(self.engine.pulse_ms, DEFAULT_PULSE_MS, 0.1, 100.0),
            light_decay_ms: clamp_or(self.engine.light_decay_ms, DEFAULT_LIGHT_DECAY_MS, 1.0, 2_000.0),
            seed: self.engine.seed.unwrap_or(DEFAULT_SEED),
        }
    }

    pub fn default_gate_mode(&self) -> GateMode {
        self.defaults
            .gate_mode
            .as_deref()
            .and_then(GateMode::parse)
            .unwrap_or_default()
    }

    /// Octave given to every note cell of a fresh engine.
    pub fn default_octave(&self) -> u8 {
        self.defaults.octave.unwrap_or(0).clamp(0, MAX_OCTAVE as i64) as u8
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cvarp").join("config.toml"))
}

fn clamp_or(value: Option<f32>, fallback: f32, min: f32, max: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => fallback,
    }
}

fn merge_engine(base: &mut EngineConfig, user: EngineConfig) {
    if user.sample_rate.is_some() {
        base.sample_rate = user.sample_rate;
    }
    if user.pulse_ms.is_some() {
        base.pulse_ms = user.pulse_ms;
    }
    if user.light_decay_ms.is_some() {
        base.light_decay_ms = user.light_decay_ms;
    }
    if user.seed.is_some() {
        base.seed = user.seed;
    }
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.gate_mode.is_some() {
        base.gate_mode = user.gate_mode;
    }
    if user.octave.is_some() {
        base.octave = user.octave;
    }
}
