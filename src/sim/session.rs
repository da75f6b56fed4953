//! Session transition function
//!
//! `apply` is the only place phase, score and elapsed time change.
//! Events that make no sense in the current phase come back as
//! `Transition::Ignored` and leave the session untouched.

use rand::Rng;

use super::layout::{respawn, scatter};
use super::state::{GamePhase, GameSession};
use crate::settings::Settings;

/// Inputs to the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Player picked a target score on the setup screen
    SelectTargetScore(u32),
    /// First drag of the run
    TimerStarted,
    /// Striker released over the target
    Hit,
    /// Periodic timer callback
    Tick { interval_ms: u32 },
    /// Back to setup
    Restart,
}

/// What `apply` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    /// Setup -> Playing
    Started,
    TimerStarted,
    Ticked,
    /// Hit below the target score
    Scored,
    /// Hit that reached the target score
    Finished,
    /// Finished -> Setup
    Reset,
}

/// Advance `session` by one event
pub fn apply<R: Rng + ?Sized>(
    session: &mut GameSession,
    event: SessionEvent,
    settings: &Settings,
    rng: &mut R,
) -> Transition {
    match (session.phase, event) {
        (GamePhase::Setup, SessionEvent::SelectTargetScore(value)) => {
            if !settings.target_score_presets.contains(&value) || value == 0 {
                log::warn!("Target score {} is not an offered preset", value);
                return Transition::Ignored;
            }
            session.reset_counters();
            session.target_score = value;
            session.phase = GamePhase::Playing;
            scatter(session, rng);
            log::info!("Run started, first to {}", value);
            Transition::Started
        }
        (GamePhase::Playing, SessionEvent::TimerStarted) => {
            if session.timer_started {
                return Transition::Ignored;
            }
            session.timer_started = true;
            Transition::TimerStarted
        }
        (GamePhase::Playing, SessionEvent::Tick { interval_ms }) if session.timer_started => {
            session.elapsed_ms += u64::from(interval_ms);
            Transition::Ticked
        }
        (GamePhase::Playing, SessionEvent::Hit) => {
            session.score = (session.score + 1).min(session.target_score);
            if session.score >= session.target_score {
                session.phase = GamePhase::Finished;
                log::info!(
                    "Run finished: {} hits in {}",
                    session.score,
                    super::format_time(session.elapsed_ms)
                );
                Transition::Finished
            } else {
                respawn(session, rng, settings.respawn);
                log::debug!("Hit {}/{}", session.score, session.target_score);
                Transition::Scored
            }
        }
        (GamePhase::Finished, SessionEvent::Restart) => {
            session.reset_counters();
            session.phase = GamePhase::Setup;
            log::info!("Back to setup");
            Transition::Reset
        }
        (phase, event) => {
            log::trace!("{:?} ignored in {}", event, phase.as_str());
            Transition::Ignored
        }
    }
}
