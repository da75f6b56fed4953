//! Piece placement at round start
//!
//! Spawns are independent uniform samples; the two pieces may overlap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::random_position;
use super::state::GameSession;

/// Which pieces move after a hit that does not finish the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RespawnPolicy {
    /// Relocate striker and target
    #[default]
    Both,
    /// Leave the striker where it was dropped
    TargetOnly,
}

/// Place both pieces at fresh random positions
pub fn scatter<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R) {
    let viewport = session.viewport;
    session.striker.pos = random_position(rng, session.striker.size, viewport);
    session.target.pos = random_position(rng, session.target.size, viewport);
}

/// Relocate pieces for the next round according to `policy`
pub fn respawn<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R, policy: RespawnPolicy) {
    match policy {
        RespawnPolicy::Both => scatter(session, rng),
        RespawnPolicy::TargetOnly => {
            session.target.pos = random_position(rng, session.target.size, session.viewport);
        }
    }
}
