//! Game driver
//!
//! Owns the session, drag controller, timer and RNG, and is the only thing
//! the presentation layer talks to. Every signal is handled to completion
//! before the method returns, so a render that follows a release always
//! sees the scored hit and any phase change.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::platform::{NullHost, SignalHost};
use crate::settings::Settings;
use crate::sim::{
    DragController, GamePhase, GameSession, Hit, Piece, PieceId, SessionEvent, Timer, Transition,
    apply, format_time,
};

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub target_score: u32,
    pub elapsed_ms: u64,
    /// `elapsed_ms` as `M:SS.CC`
    pub elapsed_label: String,
    pub striker: Piece,
    pub target: Piece,
    pub is_dragging: bool,
}

/// A running game wired to a signal host
pub struct Game<H: SignalHost = NullHost> {
    settings: Settings,
    session: GameSession,
    drag: DragController,
    timer: Timer,
    rng: Pcg32,
    /// Playfield top-left in pointer coordinates
    viewport_origin: Vec2,
    host: H,
}

impl Game<NullHost> {
    /// Game with no callbacks; the caller delivers every signal
    pub fn headless(settings: Settings, seed: u64) -> Self {
        Self::new(settings, seed, NullHost)
    }
}

impl<H: SignalHost> Game<H> {
    pub fn new(settings: Settings, seed: u64, host: H) -> Self {
        log::info!(
            "New {} game (seed {}, threshold {})",
            settings.variant.as_str(),
            seed,
            settings.collision_threshold
        );
        Self {
            session: settings.new_session(seed),
            timer: Timer::new(settings.tick_interval_ms),
            drag: DragController::new(),
            rng: Pcg32::seed_from_u64(seed),
            viewport_origin: Vec2::ZERO,
            settings,
            host,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase,
            score: self.session.score,
            target_score: self.session.target_score,
            elapsed_ms: self.session.elapsed_ms,
            elapsed_label: format_time(self.session.elapsed_ms),
            striker: self.session.striker,
            target: self.session.target,
            is_dragging: self.drag.is_dragging(),
        }
    }

    /// Where the playfield sits in pointer coordinates (page layout changes)
    pub fn set_viewport_origin(&mut self, origin: Vec2) {
        self.viewport_origin = origin;
    }

    /// Setup screen choice
    pub fn select_target_score(&mut self, value: u32) -> Transition {
        let transition = self.apply(SessionEvent::SelectTargetScore(value));
        if transition == Transition::Started {
            self.timer = Timer::new(self.settings.tick_interval_ms);
        }
        transition
    }

    /// Pointer down on a piece. `point` is viewport-local.
    ///
    /// Returns true if a drag started.
    pub fn grab(&mut self, point: Vec2, piece: PieceId) -> bool {
        if self.session.phase != GamePhase::Playing {
            return false;
        }
        if !self.drag.grab(point, piece, &self.session.striker) {
            return false;
        }
        self.host.attach_pointer_observers();

        if self.apply(SessionEvent::TimerStarted) == Transition::TimerStarted && self.timer.arm() {
            log::debug!("Timer armed at {} ms", self.timer.interval_ms);
            self.host.arm_interval(self.timer.interval_ms);
        }
        true
    }

    /// Global pointer move. Returns true if the striker moved.
    pub fn pointer_move(&mut self, point: Vec2) -> bool {
        let viewport = self.session.viewport;
        self.drag
            .pointer_move(point, self.viewport_origin, &mut self.session.striker, viewport)
    }

    /// Global pointer release; scores if the striker is over the target
    pub fn release(&mut self) -> Transition {
        if !self.drag.is_dragging() {
            return Transition::Ignored;
        }
        let hit = self
            .drag
            .release(&self.session.striker, &self.session.target, self.settings.collision_threshold);
        self.host.detach_pointer_observers();

        match hit {
            Some(Hit) => {
                let transition = self.apply(SessionEvent::Hit);
                if transition == Transition::Finished {
                    self.stop_timer();
                }
                transition
            }
            None => Transition::Ignored,
        }
    }

    /// Periodic timer callback. Returns true if time was added.
    pub fn tick(&mut self) -> bool {
        if !self.timer.should_count(&self.session) {
            log::trace!("Tick discarded in {}", self.session.phase.as_str());
            return false;
        }
        let interval_ms = self.timer.interval_ms;
        self.apply(SessionEvent::Tick { interval_ms }) == Transition::Ticked
    }

    /// Finished -> Setup
    pub fn restart(&mut self) -> Transition {
        let transition = self.apply(SessionEvent::Restart);
        if transition == Transition::Reset {
            self.end_drag();
            self.stop_timer();
        }
        transition
    }

    fn apply(&mut self, event: SessionEvent) -> Transition {
        apply(&mut self.session, event, &self.settings, &mut self.rng)
    }

    fn end_drag(&mut self) {
        if self.drag.cancel() {
            self.host.detach_pointer_observers();
        }
    }

    fn stop_timer(&mut self) {
        if self.timer.disarm() {
            log::debug!("Timer stopped at {}", format_time(self.session.elapsed_ms));
            self.host.cancel_interval();
        }
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}

impl<H: SignalHost> Drop for Game<H> {
    fn drop(&mut self) {
        self.end_drag();
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingHost {
        observing: bool,
        attaches: u32,
        detaches: u32,
        interval: Option<u32>,
        arms: u32,
        cancels: u32,
    }

    impl SignalHost for CountingHost {
        fn attach_pointer_observers(&mut self) {
            assert!(!self.observing, "observers attached twice");
            self.observing = true;
            self.attaches += 1;
        }
        fn detach_pointer_observers(&mut self) {
            assert!(self.observing, "detach without attach");
            self.observing = false;
            self.detaches += 1;
        }
        fn arm_interval(&mut self, interval_ms: u32) {
            assert!(self.interval.is_none(), "interval armed twice");
            self.interval = Some(interval_ms);
            self.arms += 1;
        }
        fn cancel_interval(&mut self) {
            assert!(self.interval.take().is_some(), "cancel without arm");
            self.cancels += 1;
        }
    }

    fn playing(target: u32) -> Game<CountingHost> {
        let mut game = Game::new(Settings::default(), 12345, CountingHost::default());
        assert_eq!(game.select_target_score(target), Transition::Started);
        game
    }

    /// Stack the striker on the target and drop it there
    fn score_hit<H: SignalHost>(game: &mut Game<H>) -> Transition {
        let pos = game.session().target.pos;
        game.session_mut().striker.pos = pos;
        assert!(game.grab(pos + Vec2::splat(1.0), PieceId::Striker));
        game.release()
    }

    #[test]
    fn test_grab_in_setup_ignored() {
        let mut game = Game::new(Settings::default(), 1, CountingHost::default());
        let striker = game.session().striker.pos;
        assert!(!game.grab(striker, PieceId::Striker));
        assert!(!game.is_dragging());
        assert_eq!(game.host().attaches, 0);
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut game = playing(10);
        game.session_mut().striker.pos = Vec2::new(100.0, 100.0);

        assert!(game.grab(Vec2::new(105.0, 105.0), PieceId::Striker));
        assert!(game.host().observing);
        assert!(game.pointer_move(Vec2::new(300.0, 300.0)));
        assert_eq!(game.session().striker.pos, Vec2::new(295.0, 295.0));
        assert!(game.snapshot().is_dragging);
    }

    #[test]
    fn test_viewport_origin_offsets_moves() {
        let mut game = playing(10);
        game.session_mut().striker.pos = Vec2::new(100.0, 100.0);
        game.set_viewport_origin(Vec2::new(50.0, 20.0));
        game.grab(Vec2::new(105.0, 105.0), PieceId::Striker);
        game.pointer_move(Vec2::new(300.0, 300.0));
        assert_eq!(game.session().striker.pos, Vec2::new(245.0, 275.0));
    }

    #[test]
    fn test_grab_target_does_nothing() {
        let mut game = playing(10);
        let target = game.session().target.pos;
        assert!(!game.grab(target, PieceId::Target));
        assert!(!game.session().timer_started);
        assert_eq!(game.host().attaches, 0);
        assert_eq!(game.host().arms, 0);
    }

    #[test]
    fn test_first_drag_arms_timer_once() {
        let mut game = playing(10);
        assert!(!game.tick());

        game.session_mut().striker.pos = Vec2::ZERO;
        game.session_mut().target.pos = Vec2::new(700.0, 500.0);
        let striker = Vec2::ZERO;
        game.grab(striker, PieceId::Striker);
        assert!(game.session().timer_started);
        assert_eq!(game.host().interval, Some(10));
        game.release();

        game.grab(striker, PieceId::Striker);
        game.release();
        assert_eq!(game.host().arms, 1);
        assert_eq!(game.host().attaches, 2);
        assert_eq!(game.host().detaches, 2);
    }

    #[test]
    fn test_ticks_accumulate_exactly() {
        let mut game = playing(10);
        let striker = game.session().striker.pos;
        game.grab(striker, PieceId::Striker);
        for _ in 0..137 {
            assert!(game.tick());
        }
        assert_eq!(game.session().elapsed_ms, 1370);
        assert_eq!(game.snapshot().elapsed_label, "0:01.37");
    }

    #[test]
    fn test_ten_hits_finish_and_freeze_timer() {
        let mut game = playing(10);
        for i in 1..10 {
            assert_eq!(score_hit(&mut game), Transition::Scored);
            assert_eq!(game.session().score, i);
            game.tick();
        }
        assert_eq!(score_hit(&mut game), Transition::Finished);
        assert_eq!(game.session().phase, GamePhase::Finished);
        assert_eq!(game.session().score, 10);
        assert!(!game.is_timer_armed());
        assert_eq!(game.host().cancels, 1);

        let elapsed = game.session().elapsed_ms;
        for _ in 0..50 {
            assert!(!game.tick());
        }
        assert_eq!(game.session().elapsed_ms, elapsed);
    }

    #[test]
    fn test_miss_keeps_score() {
        let mut game = playing(5);
        game.session_mut().striker.pos = Vec2::ZERO;
        game.session_mut().target.pos = Vec2::new(700.0, 500.0);
        game.grab(Vec2::new(10.0, 10.0), PieceId::Striker);
        assert_eq!(game.release(), Transition::Ignored);
        assert_eq!(game.session().score, 0);
        assert!(!game.host().observing);
    }

    #[test]
    fn test_release_without_drag_discarded() {
        let mut game = playing(5);
        let target = game.session().target.pos;
        game.session_mut().striker.pos = target;
        assert_eq!(game.release(), Transition::Ignored);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.host().detaches, 0);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut game = playing(5);
        for _ in 0..5 {
            score_hit(&mut game);
        }
        assert_eq!(game.session().phase, GamePhase::Finished);

        assert_eq!(game.restart(), Transition::Reset);
        let snap = game.snapshot();
        assert_eq!(snap.phase, GamePhase::Setup);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.elapsed_ms, 0);
        assert!(!game.session().timer_started);

        let striker = game.session().striker.pos;
        assert!(!game.pointer_move(Vec2::new(400.0, 400.0)));
        assert_eq!(game.session().striker.pos, striker);
    }

    #[test]
    fn test_restart_while_playing_ignored() {
        let mut game = playing(5);
        score_hit(&mut game);
        assert_eq!(game.restart(), Transition::Ignored);
        assert_eq!(game.session().score, 1);
    }

    #[test]
    fn test_new_run_after_restart_rearms() {
        let mut game = playing(5);
        for _ in 0..5 {
            score_hit(&mut game);
        }
        game.restart();
        assert_eq!(game.select_target_score(10), Transition::Started);
        assert!(!game.is_timer_armed());
        score_hit(&mut game);
        assert_eq!(game.host().arms, 2);
        assert!(game.tick());
        assert_eq!(game.session().elapsed_ms, 10);
    }

    #[test]
    fn test_drop_releases_everything() {
        let mut host = CountingHost::default();
        {
            let mut game = Game::new(Settings::default(), 7, &mut host);
            game.select_target_score(5);
            let striker = game.session().striker.pos;
            game.grab(striker, PieceId::Striker);
        }
        assert!(!host.observing);
        assert_eq!(host.attaches, host.detaches);
        assert_eq!(host.interval, None);
        assert_eq!(host.cancels, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let game = playing(5);
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["target_score"], 5);
        assert_eq!(json["elapsed_label"], "0:00.00");
    }
}
