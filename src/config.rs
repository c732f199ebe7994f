use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aimer::RefirePolicy;
use crate::target::{TRACK_MAX_X, TRACK_MIN_X};

pub const DEFAULT_ANIMATION_INTERVAL_MS: u64 = 12;
pub const DEFAULT_SHOT_INTERVAL_MS: u64 = 10;
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.01;
pub const DEFAULT_HIT_SOUND: &str = "assets/hit.wav";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("roster is empty")]
    EmptyRoster,
    #[error("duck {index} spawns at x = {x}, outside the track [{min}, {max}]")]
    SpawnOutOfTrack { index: usize, x: f32, min: f32, max: f32 },
    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },
    #[error("mouse sensitivity must be a positive finite number, got {0}")]
    BadSensitivity(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpawn {
    pub x: f32,
    #[serde(default)]
    pub mirrored: bool,
}

impl TargetSpawn {
    pub const fn new(x: f32, mirrored: bool) -> Self {
        Self { x, mirrored }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub roster: Vec<TargetSpawn>,
    pub bob: bool,
    pub refire: RefirePolicy,
    pub animation_interval_ms: u64,
    pub shot_interval_ms: u64,
    pub mouse_sensitivity: f32,
    pub hit_sound: Option<PathBuf>,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            // three riding the track, three hanging under it heading the other way
            roster: vec![
                TargetSpawn::new(-8.0, false),
                TargetSpawn::new(0.0, false),
                TargetSpawn::new(8.0, false),
                TargetSpawn::new(8.0, true),
                TargetSpawn::new(0.0, true),
                TargetSpawn::new(-8.0, true),
            ],
            bob: true,
            refire: RefirePolicy::Ignore,
            animation_interval_ms: DEFAULT_ANIMATION_INTERVAL_MS,
            shot_interval_ms: DEFAULT_SHOT_INTERVAL_MS,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            hit_sound: Some(PathBuf::from(DEFAULT_HIT_SOUND)),
        }
    }
}

impl RangeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_owned(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for (index, spawn) in self.roster.iter().enumerate() {
            if !(TRACK_MIN_X..=TRACK_MAX_X).contains(&spawn.x) {
                return Err(ConfigError::SpawnOutOfTrack {
                    index,
                    x: spawn.x,
                    min: TRACK_MIN_X,
                    max: TRACK_MAX_X,
                });
            }
        }
        if self.animation_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "animation_interval_ms" });
        }
        if self.shot_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "shot_interval_ms" });
        }
        if !self.mouse_sensitivity.is_finite() || self.mouse_sensitivity <= 0.0 {
            return Err(ConfigError::BadSensitivity(self.mouse_sensitivity));
        }
        Ok(())
    }
}
