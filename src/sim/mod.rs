//! Deterministic gameplay core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Logical timer ticks, never wall-clock
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod drag;
pub mod layout;
pub mod session;
pub mod state;
pub mod timer;

pub use bounds::{clamp_position, random_position};
pub use collision::collides;
pub use drag::{DragController, DragSession, DragState, Hit};
pub use layout::{RespawnPolicy, respawn, scatter};
pub use session::{SessionEvent, Transition, apply};
pub use state::{GamePhase, GameSession, Piece, PieceId};
pub use timer::{Timer, format_time};
