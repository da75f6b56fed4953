//! Hit detection between the two pieces
//!
//! A hit is decided by center distance against a tuned threshold rather than
//! box overlap: the letters have to sit mostly on top of each other.

use super::state::Piece;

/// Whether the centers of `a` and `b` are closer than `threshold`
pub fn collides(a: &Piece, b: &Piece, threshold: f32) -> bool {
    a.center().distance(b.center()) < threshold
}
