//! Simulation configuration resource.
//!
//! Settings for a headless simulation session, loaded from an INI file.
//! Every key is optional; anything missing keeps its default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! fixed_dt = 0.016666
//! ticks = 600
//! time_scale = 1.0
//! seed = 42
//!
//! [actors]
//! player_tag = player
//!
//! [audio]
//! cue_voices = 4
//! cue_length = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_TICKS: u64 = 600;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_PLAYER_TAG: &str = "player";
const DEFAULT_CUE_VOICES: usize = 4;
const DEFAULT_CUE_LENGTH: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./stagehand.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Seconds per simulation tick.
    pub fixed_dt: f32,
    /// Number of ticks the runner executes.
    pub ticks: u64,
    pub time_scale: f32,
    /// Session seed for parameter jitter.
    pub seed: u64,
    /// Group name of the actor that triggers sensors and uses actuators.
    pub player_tag: String,
    pub cue_voices: usize,
    /// Seconds a cue keeps its voice busy.
    pub cue_length: f32,
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            fixed_dt: DEFAULT_FIXED_DT,
            ticks: DEFAULT_TICKS,
            time_scale: DEFAULT_TIME_SCALE,
            seed: DEFAULT_SEED,
            player_tag: DEFAULT_PLAYER_TAG.to_string(),
            cue_voices: DEFAULT_CUE_VOICES,
            cue_length: DEFAULT_CUE_LENGTH,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded config: dt={} ticks={} time_scale={} seed={} player_tag={} cue_voices={}",
            self.fixed_dt, self.ticks, self.time_scale, self.seed, self.player_tag, self.cue_voices
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [simulation] section
        if let Some(dt) = config.getfloat("simulation", "fixed_dt").ok().flatten() {
            self.fixed_dt = dt as f32;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks").ok().flatten() {
            self.ticks = ticks;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = seed;
        }

        // [actors] section
        if let Some(tag) = config.get("actors", "player_tag") {
            self.player_tag = tag;
        }

        // [audio] section
        if let Some(voices) = config.getuint("audio", "cue_voices").ok().flatten() {
            self.cue_voices = voices as usize;
        }
        if let Some(length) = config.getfloat("audio", "cue_length").ok().flatten() {
            self.cue_length = length as f32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "fixed_dt", Some(self.fixed_dt.to_string()));
        config.set("simulation", "ticks", Some(self.ticks.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));
        config.set("simulation", "seed", Some(self.seed.to_string()));
        config.set("actors", "player_tag", Some(self.player_tag.clone()));
        config.set("audio", "cue_voices", Some(self.cue_voices.to_string()));
        config.set("audio", "cue_length", Some(self.cue_length.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::new();
        assert_eq!(config.ticks, 600);
        assert_eq!(config.player_tag, "player");
        assert_eq!(config.cue_voices, 4);
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = SimConfig::new();
        config
            .load_from_str("[simulation]\nfixed_dt = 0.125\nseed = 9\n[actors]\nplayer_tag = hero\n")
            .unwrap();
        assert_eq!(config.fixed_dt, 0.125);
        assert_eq!(config.seed, 9);
        assert_eq!(config.player_tag, "hero");
        assert_eq!(config.ticks, 600);
        assert_eq!(config.cue_length, 1.0);
    }

    #[test]
    fn test_malformed_value_is_ignored() {
        let mut config = SimConfig::new();
        config
            .load_from_str("[simulation]\nticks = lots\n")
            .unwrap();
        assert_eq!(config.ticks, 600);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = SimConfig::with_path("/nonexistent/dir/stagehand.ini");
        assert!(config.load_from_file().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("stagehand-config-{}.ini", std::process::id()));
        let mut saved = SimConfig::with_path(&path);
        saved.ticks = 42;
        saved.cue_voices = 2;
        saved.player_tag = "runner".into();
        saved.save_to_file().unwrap();

        let mut loaded = SimConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.ticks, 42);
        assert_eq!(loaded.cue_voices, 2);
        assert_eq!(loaded.player_tag, "runner");
    }
}
