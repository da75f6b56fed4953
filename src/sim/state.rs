//! Session state and core gameplay types
//!
//! Everything the presentation layer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::clamp_position;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing a target score
    #[default]
    Setup,
    /// Dragging for hits
    Playing,
    /// Target score reached
    Finished,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        }
    }
}

/// Which of the two pieces a pointer signal refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceId {
    /// The letter the player drags (A)
    Striker,
    /// The letter the player aims for (M)
    Target,
}

/// An axis-aligned piece on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Top-left corner, viewport-local
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Piece {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Center point (origin + size / 2)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move to `pos`, clamped to the viewport
    pub fn set_pos(&mut self, pos: Vec2, viewport: Vec2) {
        self.pos = clamp_position(pos, self.size, viewport);
    }
}

/// Complete per-session state.
///
/// Fields are public for reading; mutation goes through
/// [`apply`](super::session::apply) so that phase, score and timer flags
/// stay consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Seed used for piece placement
    pub seed: u64,
    pub phase: GamePhase,
    /// Hits so far, never above `target_score`
    pub score: u32,
    /// Hits needed to finish
    pub target_score: u32,
    /// Logical elapsed time (sum of timer ticks)
    pub elapsed_ms: u64,
    /// Set by the first drag of a Playing phase
    pub timer_started: bool,
    pub striker: Piece,
    pub target: Piece,
    /// Playfield size
    pub viewport: Vec2,
}

impl GameSession {
    /// Create a session in Setup with both pieces parked at the origin
    pub fn new(seed: u64, viewport: Vec2, striker_size: Vec2, target_size: Vec2) -> Self {
        Self {
            seed,
            phase: GamePhase::Setup,
            score: 0,
            target_score: 1,
            elapsed_ms: 0,
            timer_started: false,
            striker: Piece::new(Vec2::ZERO, striker_size),
            target: Piece::new(Vec2::ZERO, target_size),
            viewport,
        }
    }

    /// Borrow a piece by id
    pub fn piece(&self, id: PieceId) -> &Piece {
        match id {
            PieceId::Striker => &self.striker,
            PieceId::Target => &self.target,
        }
    }

    /// Whether the timer should be accumulating right now
    pub fn is_timing(&self) -> bool {
        self.phase == GamePhase::Playing && self.timer_started
    }

    /// Zero the per-run counters
    pub(crate) fn reset_counters(&mut self) {
        self.score = 0;
        self.elapsed_ms = 0;
        self.timer_started = false;
    }
}
