//! Game settings and variant presets
//!
//! Sizes and the hit threshold are tuned per variant. Settings can be
//! loaded from JSON; any field left out takes the classic default.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GameSession, RespawnPolicy};

/// Piece size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameVariant {
    /// Two 80px letters
    #[default]
    Classic,
    /// 140px striker, 165px target
    Large,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Classic => "Classic",
            GameVariant::Large => "Large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "small" => Some(GameVariant::Classic),
            "large" | "big" => Some(GameVariant::Large),
            _ => None,
        }
    }

    /// Striker edge length in pixels
    pub fn striker_size(&self) -> f32 {
        match self {
            GameVariant::Classic => CLASSIC_STRIKER_SIZE,
            GameVariant::Large => LARGE_STRIKER_SIZE,
        }
    }

    /// Target edge length in pixels
    pub fn target_size(&self) -> f32 {
        match self {
            GameVariant::Classic => CLASSIC_TARGET_SIZE,
            GameVariant::Large => LARGE_TARGET_SIZE,
        }
    }

    /// Center distance that counts as a hit
    pub fn collision_threshold(&self) -> f32 {
        match self {
            GameVariant::Classic => CLASSIC_COLLISION_THRESHOLD,
            GameVariant::Large => LARGE_COLLISION_THRESHOLD,
        }
    }
}

/// Settings parse/validation failure
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Malformed JSON or wrong field types
    Parse(serde_json::Error),
    /// Well-formed but unusable value
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "cannot parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Tunables for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the sizes were taken from
    pub variant: GameVariant,

    // === Playfield ===
    /// Playfield width and height
    pub viewport: Vec2,
    /// Striker width and height
    pub striker_size: Vec2,
    /// Target width and height
    pub target_size: Vec2,
    /// Center distance below which a release scores
    pub collision_threshold: f32,

    // === Timing ===
    /// Milliseconds per timer tick
    pub tick_interval_ms: u32,

    // === Rules ===
    /// Target scores offered on the setup screen
    pub target_score_presets: Vec<u32>,
    /// Pieces relocated after a non-final hit
    pub respawn: RespawnPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(GameVariant::Classic)
    }
}

impl Settings {
    /// Settings with the sizes and threshold of `variant`
    pub fn from_variant(variant: GameVariant) -> Self {
        Self {
            variant,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            striker_size: Vec2::splat(variant.striker_size()),
            target_size: Vec2::splat(variant.target_size()),
            collision_threshold: variant.collision_threshold(),
            tick_interval_ms: TICK_INTERVAL_MS,
            target_score_presets: TARGET_SCORE_PRESETS.to_vec(),
            respawn: RespawnPolicy::default(),
        }
    }

    /// Switch variant (updates sizes and threshold, keeps the rest)
    pub fn apply_variant(&mut self, variant: GameVariant) {
        self.variant = variant;
        self.striker_size = Vec2::splat(variant.striker_size());
        self.target_size = Vec2::splat(variant.target_size());
        self.collision_threshold = variant.collision_threshold();
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded {} settings from {}", settings.variant.as_str(), path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: Vec2| v.is_finite() && v.x > 0.0 && v.y > 0.0;
        if !positive(self.viewport) {
            return Err(SettingsError::Invalid("viewport must be positive".into()));
        }
        if !positive(self.striker_size) || !positive(self.target_size) {
            return Err(SettingsError::Invalid("piece sizes must be positive".into()));
        }
        if self.striker_size.cmpgt(self.viewport).any() || self.target_size.cmpgt(self.viewport).any() {
            return Err(SettingsError::Invalid("pieces must fit inside the viewport".into()));
        }
        if !(self.collision_threshold.is_finite() && self.collision_threshold > 0.0) {
            return Err(SettingsError::Invalid("collision threshold must be positive".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Invalid("tick interval must be at least 1 ms".into()));
        }
        if self.target_score_presets.is_empty() || self.target_score_presets.contains(&0) {
            return Err(SettingsError::Invalid("target score presets must be non-empty and positive".into()));
        }
        Ok(())
    }

    /// Fresh session in Setup sized by these settings
    pub fn new_session(&self, seed: u64) -> GameSession {
        GameSession::new(seed, self.viewport, self.striker_size, self.target_size)
    }
}
