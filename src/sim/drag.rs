//! Pointer drag state machine
//!
//! Idle -> Dragging on a grab of the striker, Dragging -> Idle on release.
//! While dragging, global pointer moves are turned into clamped striker
//! positions; the release checks for a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::collides;
use super::state::{Piece, PieceId};

/// Live drag, created on grab and dropped on release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Grab point relative to the striker's origin
    pub offset: Vec2,
}

/// Drag controller state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Produced by a release with the pieces overlapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit;

/// Converts grab/move/release signals into striker motion
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Start a drag if `grabbed` is the striker and no drag is active.
    ///
    /// `grab_point` is viewport-local. Returns true on Idle -> Dragging.
    pub fn grab(&mut self, grab_point: Vec2, grabbed: PieceId, striker: &Piece) -> bool {
        if grabbed != PieceId::Striker || self.is_dragging() {
            return false;
        }
        let offset = grab_point - striker.pos;
        self.state = DragState::Dragging(DragSession { offset });
        log::debug!("Drag start, offset ({:.1}, {:.1})", offset.x, offset.y);
        true
    }

    /// Follow the pointer. `point` is in page coordinates and
    /// `viewport_origin` is the playfield's top-left in the same space.
    ///
    /// Returns true if the striker moved. Ignored while idle.
    pub fn pointer_move(
        &mut self,
        point: Vec2,
        viewport_origin: Vec2,
        striker: &mut Piece,
        viewport: Vec2,
    ) -> bool {
        let DragState::Dragging(session) = self.state else {
            return false;
        };
        let candidate = point - session.offset - viewport_origin;
        let before = striker.pos;
        striker.set_pos(candidate, viewport);
        striker.pos != before
    }

    /// End the drag; reports a hit if the pieces overlap.
    ///
    /// A release with no active drag is discarded.
    pub fn release(&mut self, striker: &Piece, target: &Piece, threshold: f32) -> Option<Hit> {
        if !self.is_dragging() {
            log::trace!("Release without drag ignored");
            return None;
        }
        self.state = DragState::Idle;
        if collides(striker, target, threshold) {
            log::debug!("Release over target");
            Some(Hit)
        } else {
            None
        }
    }

    /// Drop any active drag without checking for a hit.
    ///
    /// Returns true if a drag was active.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}
