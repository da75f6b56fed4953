//! A to M - drag the letter A onto the letter M
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (bounds, collision, drag, timer, session)
//! - `game`: Driver composing the core with host signals
//! - `platform`: Host signal seam (pointer observers, interval timer)
//! - `settings`: Variant presets and tunables

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, Snapshot};
pub use settings::{GameVariant, Settings, SettingsError};
pub use sim::{GamePhase, PieceId, RespawnPolicy, format_time};

/// Game configuration constants
pub mod consts {
    /// Playfield width in pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    /// Playfield height in pixels
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Classic variant: both letters are 80px squares
    pub const CLASSIC_STRIKER_SIZE: f32 = 80.0;
    pub const CLASSIC_TARGET_SIZE: f32 = 80.0;
    /// Center distance below which a release counts as a hit (classic)
    pub const CLASSIC_COLLISION_THRESHOLD: f32 = 40.0;

    /// Large variant sizes
    pub const LARGE_STRIKER_SIZE: f32 = 140.0;
    pub const LARGE_TARGET_SIZE: f32 = 165.0;
    pub const LARGE_COLLISION_THRESHOLD: f32 = 70.0;

    /// Timer granularity (one tick = 10 ms)
    pub const TICK_INTERVAL_MS: u32 = 10;

    /// Target scores offered on the setup screen
    pub const TARGET_SCORE_PRESETS: [u32; 3] = [5, 10, 20];
}
