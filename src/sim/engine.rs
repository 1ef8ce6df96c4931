//! The engine state machine
//!
//! `Engine` owns the three state entities and drives them from two directions:
//! commands (begin charge, release, pause) and timer callbacks fired by the host.
//! It never talks to collaborators directly; everything outward goes through the
//! `GameEvent` queue, and everything drawn goes through the returned `Frame`.

use std::f32::consts::PI;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::frame::{CharacterFrame, Frame, TargetSprite, TrajectoryPreview};
use super::level::{self, TargetPlan};
use super::scene;
use super::state::{
    Action, Character, GameState, TargetKind, TargetRecord, Targets, VICTIM_KINDS,
};
use super::timers::TimerPhase;
use super::trajectory::{self, ArcStep, ChargeStep};
use crate::consts::*;
use crate::tuning::Tuning;

/// Tooltip texts
pub mod tips {
    pub const NEW_GAME: &str = "Hold Space or touch the screen to aim, release to jump";
    pub const FIRST_VICTIM: &str = "Land right on the prey: match the arc to where it stands";
    pub const FIRST_BARRIER: &str = "Clear obstacles: the arc has to rise above them";
    pub const FIRST_TIMEOUT: &str = "Don't wait too long, prey won't sit still forever";
}

/// Why an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    Normal,
    Timeout,
}

pub struct Engine {
    tuning: Tuning,
    rng: Pcg32,
    state: GameState,
    character: Character,
    targets: Targets,
    events: Vec<GameEvent>,
}

impl Engine {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let threshold = tuning.target_base_height * tuning.success_height_ratio;
        let mut state = GameState::new(
            tuning.initial_score,
            tuning.base_speed,
            tuning.movement_speed,
            threshold,
        );
        state.runaway_speed = tuning.runaway_speed;

        Self {
            rng: Pcg32::seed_from_u64(seed),
            character: Character::new(tuning.jump_height_min),
            targets: Targets::new(
                tuning.target_base_height,
                tuning.target_stop_x,
                tuning.runaway_delay_ms,
            ),
            state,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Bind input and set up the first (or next) target
    pub fn start(&mut self) {
        log::info!("Game: start (score {})", self.state.score);
        if self.state.paused && self.state.action != Action::None {
            // Interrupted game: resume it, a scene in progress carries on
            self.pause(false);
        } else {
            self.events.push(GameEvent::BindInput);
        }
        self.prepare_level();
    }

    /// Unbind input; state is left as it is
    pub fn stop(&mut self) {
        log::info!("Game: stop");
        self.events.push(GameEvent::UnbindInput);
    }

    /// Pause or resume. Repeating the current state is a no-op.
    pub fn pause(&mut self, paused: bool) {
        if self.state.paused == paused {
            return;
        }
        self.state.paused = paused;
        log::info!("Game: {}", if paused { "Pause" } else { "Continue" });

        if paused {
            self.state.timers.cancel(TimerPhase::Frame);
            self.state.timers.cancel(TimerPhase::Timeout);
            // A charge still settling is dropped; its release would arrive unbound
            if self.state.timers.cancel(TimerPhase::ChargeDelay).is_some() {
                self.state.charging = false;
                self.state.hold = false;
            }
            self.events.push(GameEvent::UnbindInput);
            self.events.push(GameEvent::BackgroundStop);
            self.events.push(GameEvent::Paused);
        } else {
            self.events.push(GameEvent::BindInput);
            if self.state.action == Action::Scene {
                self.events.push(GameEvent::BackgroundStart {
                    interval_ms: self.state.tick_interval(),
                });
            }
            if self.state.awaiting_engagement {
                self.state
                    .timers
                    .schedule(TimerPhase::Timeout, self.targets.runaway_delay_ms);
            }
            self.request_frame(0);
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Start charging a jump after a one-tick settle
    pub fn begin_charge(&mut self) {
        if self.state.hold || self.state.paused {
            log::debug!("begin charge ignored (hold {})", self.state.hold);
            return;
        }
        self.state.hold = true;
        self.state.charging = true;
        self.state.action = Action::None;
        let delay = self.state.tick_interval();
        self.state.timers.schedule(TimerPhase::ChargeDelay, delay);
    }

    /// Release the charge: jump, or drop it if it was only a tap
    pub fn release_jump(&mut self) {
        if !self.state.charging {
            log::debug!("release ignored, no charge in progress");
            return;
        }
        self.state.charging = false;
        self.state.hold = false;

        let settling = self.state.timers.cancel(TimerPhase::ChargeDelay).is_some();
        let height = self.character.jump_height;
        if settling
            || self.state.action != Action::Path
            || trajectory::is_tap(height, &self.tuning)
        {
            self.state.action = Action::Stay;
            self.request_frame(0);
            return;
        }

        self.state.action = Action::Jump;
        self.state.hold = true;
        self.character.jump_phase = -PI;
        self.state.jump_succeeded = trajectory::verdict(
            height,
            self.state.success_threshold,
            self.targets.is_barrier,
        );
        // A jump attempt disarms the runaway timeout
        self.state.timers.cancel(TimerPhase::Timeout);
        self.state.awaiting_engagement = false;
        log::debug!(
            "Jump height {:.0}/{:.0} at {}: {}",
            height,
            self.state.success_threshold,
            self.targets.current.kind.as_str(),
            if self.state.jump_succeeded { "success" } else { "miss" }
        );
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Earliest callback due at or before `until`
    pub fn pop_due(&mut self, until: u64) -> Option<TimerPhase> {
        self.state.timers.pop_due(until)
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.state.timers.now()
    }

    /// Move the virtual clock up to the host's time
    pub fn settle(&mut self, now: u64) {
        self.state.timers.settle(now);
    }

    /// When the next callback is due, if any
    pub fn next_due(&self) -> Option<u64> {
        [TimerPhase::Frame, TimerPhase::ChargeDelay, TimerPhase::Timeout]
            .into_iter()
            .filter_map(|phase| self.state.timers.due_at(phase))
            .min()
    }

    /// Run a fired callback. Frames need loaded sprites; otherwise they retry later.
    pub fn fire(&mut self, phase: TimerPhase, sprites_ready: bool) -> Option<Frame> {
        match phase {
            TimerPhase::Frame => {
                if self.state.paused {
                    return None;
                }
                if !sprites_ready {
                    log::debug!("Waiting for sprites");
                    let backoff = self.tuning.resource_backoff_ms;
                    self.state.timers.schedule(TimerPhase::Frame, backoff);
                    return None;
                }
                Some(self.run_frame())
            }
            TimerPhase::ChargeDelay => {
                self.state.action = Action::Path;
                trajectory::start_charge(&mut self.character, &self.tuning);
                self.request_frame(0);
                None
            }
            TimerPhase::Timeout => {
                if self.state.awaiting_engagement {
                    self.commit_fail(FailReason::Timeout);
                }
                None
            }
        }
    }

    fn request_frame(&mut self, delay_ms: u32) {
        if !self.state.paused {
            self.state.timers.schedule(TimerPhase::Frame, delay_ms);
        }
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    fn run_frame(&mut self) -> Frame {
        let interval = self.state.tick_interval();
        let mut fleeing = None;
        let mut preview = None;

        match self.state.action {
            Action::Return => {
                scene::retreat(&mut self.state, &mut self.character);
                self.request_frame(interval);
            }
            Action::Scene => {
                let missed = !self.state.jump_succeeded;
                fleeing = scene::advance(
                    &mut self.state,
                    &mut self.character,
                    &mut self.targets,
                    &mut self.rng,
                    &mut self.events,
                )
                .map(|record| TargetSprite::from_record(&record, missed));
                self.request_frame(interval);
            }
            Action::Run => self.request_frame(interval),
            Action::Path => {
                match trajectory::step_charge(&mut self.character, &self.tuning) {
                    ChargeStep::Charging => self.request_frame(interval),
                    ChargeStep::Abandoned => {
                        self.state.action = Action::Stay;
                        self.request_frame(0);
                    }
                }
                preview = Some(TrajectoryPreview {
                    origin: self.character.pos,
                    height: self.character.jump_height,
                });
            }
            Action::Jump => {
                self.step_jump();
                self.request_frame(interval);
            }
            Action::Stay | Action::None => {}
        }

        self.frame(fleeing, preview)
    }

    fn step_jump(&mut self) {
        let outcome = trajectory::step_arc(
            &mut self.character,
            self.state.requires_full_arc,
            self.state.jump_succeeded,
        );
        match outcome {
            ArcStep::Airborne(_) => {}
            ArcStep::CutShort => self.commit_fail(FailReason::Normal),
            ArcStep::Landed if self.state.jump_succeeded => self.commit_success(),
            ArcStep::Landed => self.commit_fail(FailReason::Normal),
        }
    }

    fn frame(&self, fleeing: Option<TargetSprite>, preview: Option<TrajectoryPreview>) -> Frame {
        let (character, character_pos) = match self.state.action {
            Action::Jump => {
                let phase = self.character.jump_phase;
                (
                    CharacterFrame::Indexed(trajectory::airborne_frame(phase)),
                    trajectory::arc_point(self.character.jump_height, phase),
                )
            }
            Action::Path => (CharacterFrame::Indexed(CHARGE_FRAME), self.character.pos),
            Action::Scene | Action::Return | Action::Run => {
                (CharacterFrame::Still, self.character.pos)
            }
            Action::Stay | Action::None => (CharacterFrame::Indexed(REST_FRAME), self.character.pos),
        };

        Frame {
            target: TargetSprite::from_record(&self.targets.current, false),
            fleeing,
            trajectory: preview,
            character,
            character_pos,
        }
    }

    // ------------------------------------------------------------------
    // Outcomes
    // ------------------------------------------------------------------

    fn commit_success(&mut self) {
        let kind = self.targets.current.kind;
        self.add_score(kind.score().success);
        if !self.targets.is_barrier {
            if let Some(count) = self.state.caught.record(kind) {
                self.events.push(GameEvent::Caught { kind, count });
            }
            // Caught prey does not run away
            self.targets.current.kind = TargetKind::None;
        }
        self.prepare_level();
    }

    fn commit_fail(&mut self, reason: FailReason) {
        let kind = self.targets.current.kind;
        self.state.charging = false;
        self.state.awaiting_engagement = false;
        self.state.timers.cancel(TimerPhase::ChargeDelay);
        self.state.timers.cancel(TimerPhase::Timeout);

        let penalty = kind.fail_penalty();
        if self.state.score + penalty < 0 {
            self.game_over();
            return;
        }

        self.show_first_tooltip(reason);
        self.state.hold = true;
        self.state.jump_succeeded = false;
        self.state.action = Action::Return;
        self.add_score(penalty);
        log::debug!("Missed {} ({:?})", kind.as_str(), reason);

        if !self.targets.is_barrier {
            self.prepare_level();
        }
    }

    fn game_over(&mut self) {
        log::info!("Game over at score {}", self.state.score);
        self.state.score = self.tuning.initial_score;
        self.state.paused = true;
        self.state.action = Action::None;
        self.state.hold = true;
        self.state.timers.cancel_all();
        self.events.push(GameEvent::ScoreChanged(self.state.score));
        // The tally belongs to one game, like the score
        let tally = std::mem::take(&mut self.state.caught);
        for kind in VICTIM_KINDS {
            if tally.count(kind) > 0 {
                self.events.push(GameEvent::Caught { kind, count: 0 });
            }
        }
        self.events.push(GameEvent::UnbindInput);
        self.events.push(GameEvent::BackgroundStop);
        self.events.push(GameEvent::GameOver);
    }

    fn add_score(&mut self, delta: i32) {
        self.state.score += delta;
        self.events.push(GameEvent::ScoreChanged(self.state.score));
        if self.state.jump_succeeded {
            self.show_tooltip(None);
        }
    }

    fn show_tooltip(&mut self, text: Option<&str>) {
        let tooltip = &mut self.state.tooltip;
        match text {
            None if tooltip.shown => {
                tooltip.shown = false;
                tooltip.first_tip = false;
                self.events.push(GameEvent::Tooltip(String::new()));
            }
            None => {}
            Some(text) => {
                tooltip.shown = true;
                self.events.push(GameEvent::Tooltip(text.to_string()));
            }
        }
    }

    /// First-time hint after a miss: barrier, then timeout, then victim
    fn show_first_tooltip(&mut self, reason: FailReason) {
        let tooltip = &mut self.state.tooltip;
        let text = if self.targets.is_barrier {
            std::mem::take(&mut tooltip.first_barrier).then_some(tips::FIRST_BARRIER)
        } else if reason == FailReason::Timeout {
            std::mem::take(&mut tooltip.first_timeout).then_some(tips::FIRST_TIMEOUT)
        } else {
            std::mem::take(&mut tooltip.first_victim).then_some(tips::FIRST_VICTIM)
        };
        if let Some(text) = text {
            self.show_tooltip(Some(text));
        }
    }

    // ------------------------------------------------------------------
    // Level director
    // ------------------------------------------------------------------

    /// Recompute level and speed, spawn the next target and start the scene.
    /// Re-entering while a scene is already running does nothing.
    fn prepare_level(&mut self) {
        if self.state.action == Action::Scene {
            log::debug!("Scene already in progress");
            return;
        }
        self.state.timers.cancel(TimerPhase::Timeout);
        self.state.timers.cancel(TimerPhase::ChargeDelay);
        self.state.awaiting_engagement = false;
        self.state.charging = false;

        let level = level::level_for_score(self.state.score, &self.tuning);
        if level != self.state.level {
            log::info!("Level {} -> {}", self.state.level, level);
        }
        self.state.level = level;
        self.events.push(GameEvent::LevelChanged(level));
        self.events.push(GameEvent::ScoreChanged(self.state.score));
        // A miss hint shown just now stays up
        if self.state.tooltip.first_tip && !self.state.tooltip.shown {
            self.show_tooltip(Some(tips::NEW_GAME));
        }

        self.state.speed_factor = level::speed_for_level(level, &self.tuning);
        let plan = level::plan_target(level, &self.tuning, &mut self.rng);
        self.spawn(plan);

        self.state.action = Action::Scene;
        self.state.hold = true;
        self.state.paused = false;
        self.state.movement_speed = self.tuning.movement_speed;
        self.state.runaway_speed = self.tuning.runaway_speed;
        self.character.at_rest_position = false;

        self.events.push(GameEvent::BackgroundStart {
            interval_ms: self.state.tick_interval(),
        });
        self.request_frame(0);
    }

    fn spawn(&mut self, plan: TargetPlan) {
        self.targets.previous = self.targets.current;
        let spawn_x = (self.character.pos.x + CANVAS_WIDTH / 2.0).max(CANVAS_WIDTH);
        self.targets.current = TargetRecord {
            kind: plan.kind,
            pos: Vec2::new(spawn_x, TARGET_GROUND_Y),
            height: plan.height,
        };
        self.targets.is_barrier = plan.is_barrier;
        self.targets.stop_x = plan.stop_x;
        self.targets.runaway_delay_ms = plan.runaway_delay_ms;
        self.state.success_threshold = plan.success_threshold;
        self.state.requires_full_arc = plan.requires_full_arc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(Tuning::default(), 42)
    }

    /// Fire the next pending callback regardless of its due time
    fn fire_next(engine: &mut Engine) -> Option<TimerPhase> {
        let phase = engine.pop_due(u64::MAX)?;
        engine.fire(phase, true);
        Some(phase)
    }

    fn fire_while(engine: &mut Engine, cond: impl Fn(&Engine) -> bool) {
        let mut fired = 0;
        while cond(engine) {
            assert!(fire_next(engine).is_some(), "engine stalled");
            fired += 1;
            assert!(fired < 10_000, "engine never settled");
        }
    }

    /// Put the cat at rest in front of a waiting target of `kind`
    fn stand_before(engine: &mut Engine, kind: TargetKind) {
        engine.start();
        engine.state.timers.cancel_all();
        engine.take_events();

        let is_barrier = kind.is_barrier();
        let height = level::target_height(is_barrier, 0, &engine.tuning);
        engine.targets.current = TargetRecord {
            kind,
            pos: Vec2::new(300.0, TARGET_GROUND_Y),
            height,
        };
        engine.targets.previous.kind = TargetKind::None;
        engine.targets.is_barrier = is_barrier;
        engine.targets.stop_x = 300.0;
        engine.state.success_threshold =
            level::success_threshold(is_barrier, height, 300.0, &engine.tuning);
        engine.state.requires_full_arc = kind.requires_full_arc();
        engine.state.action = Action::Stay;
        engine.state.hold = false;
        engine.character.pos = Vec2::new(CAT_REST_X, CAT_REST_Y);
    }

    /// Charge, force the height, and release
    fn jump_with(engine: &mut Engine, height: f32) {
        engine.begin_charge();
        fire_while(engine, |e| e.state.action != Action::Path);
        engine.character.jump_height = height;
        engine.release_jump();
    }

    #[test]
    fn begin_charge_during_hold_is_a_no_op() {
        let mut engine = engine();
        engine.start();
        assert!(engine.state.hold);
        let action = engine.state.action;
        engine.take_events();

        engine.begin_charge();
        assert_eq!(engine.state.action, action);
        assert!(!engine.state.charging);
        assert!(!engine.state.timers.is_pending(TimerPhase::ChargeDelay));
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn release_without_charge_is_ignored() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.release_jump();
        assert_eq!(engine.state.action, Action::Stay);
        assert!(!engine.state.hold);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn victim_example_catches_prey() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        assert_eq!(engine.state.success_threshold, 120.0);

        jump_with(&mut engine, 121.0);
        assert_eq!(engine.state.action, Action::Jump);
        assert!(engine.state.jump_succeeded);
        assert!(engine.state.hold);

        fire_while(&mut engine, |e| e.state.action == Action::Jump);
        assert_eq!(engine.state.score, 10);
        assert_eq!(engine.state.caught.mouse, 1);
        assert_eq!(engine.state.action, Action::Scene);
        // Caught prey does not run away
        assert_eq!(engine.targets.previous.kind, TargetKind::None);

        let events = engine.take_events();
        assert!(events.contains(&GameEvent::Caught {
            kind: TargetKind::Mouse,
            count: 1
        }));
        assert!(events.contains(&GameEvent::ScoreChanged(10)));
    }

    #[test]
    fn cleared_barrier_scrolls_away() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Stone);
        assert_eq!(engine.state.success_threshold, 48.0);

        jump_with(&mut engine, 100.0);
        assert!(engine.state.jump_succeeded);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        assert_eq!(engine.state.score, 10);
        assert_eq!(engine.targets.previous.kind, TargetKind::Stone);
        assert_eq!(engine.state.caught.total(), 0);
    }

    #[test]
    fn missed_solid_barrier_cuts_the_arc_short() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Stone);
        engine.state.score = 30;

        jump_with(&mut engine, 30.0);
        assert!(!engine.state.jump_succeeded);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        assert!(engine.character.jump_phase < 0.0);
        assert_eq!(engine.state.action, Action::Return);
        assert_eq!(engine.state.score, 20);
        // Barriers are retried, not replaced
        assert_eq!(engine.targets.current.kind, TargetKind::Stone);

        fire_while(&mut engine, |e| e.state.action == Action::Return);
        assert_eq!(engine.state.action, Action::Stay);
        assert!(!engine.state.hold);
        assert_eq!(engine.character.pos.x, CAT_REST_X);
    }

    #[test]
    fn missed_victim_flees_while_next_target_arrives() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.state.score = 30;

        jump_with(&mut engine, 60.0);
        assert!(!engine.state.jump_succeeded);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        assert_eq!(engine.state.score, 25);
        assert_eq!(engine.state.action, Action::Scene);
        assert_eq!(engine.targets.previous.kind, TargetKind::Mouse);
    }

    #[test]
    fn game_over_resets_score_and_fires_once() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Stone);
        engine.state.score = 5;

        jump_with(&mut engine, 33.0);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        assert_eq!(engine.state.score, engine.tuning.initial_score);
        assert!(engine.state.paused);
        let events = engine.take_events();
        let overs = events.iter().filter(|e| **e == GameEvent::GameOver).count();
        assert_eq!(overs, 1);
        assert!(events.contains(&GameEvent::UnbindInput));
        assert!(engine.next_due().is_none());

        // Frozen until started again
        engine.begin_charge();
        assert!(!engine.state.charging);
        engine.start();
        assert_eq!(engine.state.action, Action::Scene);
        assert!(!engine.state.paused);
    }

    #[test]
    fn taps_do_not_jump() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        let height = engine.tuning.jump_height_min + 4.0;
        jump_with(&mut engine, height);
        assert_eq!(engine.state.action, Action::Stay);
        assert!(!engine.state.hold);
    }

    #[test]
    fn release_during_settle_cancels_the_charge() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.character.jump_height = 150.0;
        engine.begin_charge();
        engine.release_jump();
        assert_eq!(engine.state.action, Action::Stay);
        assert!(!engine.state.timers.is_pending(TimerPhase::ChargeDelay));
        fire_while(&mut engine, |e| e.next_due().is_some());
        assert_eq!(engine.state.action, Action::Stay);
    }

    #[test]
    fn abandoned_charge_holds_until_release() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.begin_charge();
        fire_while(&mut engine, |e| e.state.action != Action::Stay);

        assert_eq!(engine.character.jump_height, engine.tuning.jump_height_min);
        assert!(engine.state.hold);
        engine.begin_charge();
        assert!(engine.state.charging);

        engine.release_jump();
        assert!(!engine.state.hold);
        assert_eq!(engine.state.action, Action::Stay);
    }

    #[test]
    fn charge_ticks_keep_height_in_bounds() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.begin_charge();
        fire_while(&mut engine, |e| e.state.action != Action::Path);
        for _ in 0..120 {
            fire_next(&mut engine);
            let height = engine.character.jump_height;
            assert!(height >= engine.tuning.jump_height_min);
            assert!(height <= engine.tuning.jump_height_max);
        }
    }

    #[test]
    fn timeout_fails_waiting_victim_with_hint() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.state.score = 20;
        engine.state.awaiting_engagement = true;
        engine.state.timers.schedule(TimerPhase::Timeout, 3000);

        assert_eq!(fire_next(&mut engine), Some(TimerPhase::Timeout));
        assert_eq!(engine.state.score, 15);
        assert_eq!(engine.state.action, Action::Scene);
        assert!(!engine.state.tooltip.first_timeout);
        assert!(engine.state.tooltip.first_victim);
        assert!(
            engine
                .take_events()
                .contains(&GameEvent::Tooltip(tips::FIRST_TIMEOUT.to_string()))
        );
    }

    #[test]
    fn jump_attempt_disarms_timeout() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.state.awaiting_engagement = true;
        engine.state.timers.schedule(TimerPhase::Timeout, 3000);
        jump_with(&mut engine, 121.0);
        assert!(!engine.state.timers.is_pending(TimerPhase::Timeout));
    }

    #[test]
    fn barrier_hint_shows_once() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Fence);
        engine.state.score = 100;

        jump_with(&mut engine, 33.0);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);
        let hint = GameEvent::Tooltip(tips::FIRST_BARRIER.to_string());
        assert!(engine.take_events().contains(&hint));

        fire_while(&mut engine, |e| e.state.action == Action::Return);
        jump_with(&mut engine, 33.0);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);
        assert!(!engine.take_events().contains(&hint));
    }

    #[test]
    fn success_hides_visible_tooltip() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        assert!(engine.state.tooltip.shown);
        jump_with(&mut engine, 120.0);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        let events = engine.take_events();
        assert!(events.contains(&GameEvent::Tooltip(String::new())));
        assert!(!engine.state.tooltip.first_tip);
    }

    #[test]
    fn preparing_during_scene_is_idempotent() {
        let mut engine = engine();
        engine.start();
        let current = engine.targets.current;
        let previous = engine.targets.previous;
        engine.take_events();

        engine.start();
        assert_eq!(engine.targets.current, current);
        assert_eq!(engine.targets.previous, previous);
        assert_eq!(engine.take_events(), vec![GameEvent::BindInput]);
    }

    #[test]
    fn pause_is_idempotent_and_resume_rearms() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.state.awaiting_engagement = true;
        engine.state.timers.schedule(TimerPhase::Timeout, 3000);

        engine.pause(true);
        engine.pause(true);
        let events = engine.take_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Paused).count(), 1);
        assert!(engine.next_due().is_none());

        engine.pause(false);
        assert!(engine.state.timers.is_pending(TimerPhase::Timeout));
        assert!(engine.state.timers.is_pending(TimerPhase::Frame));
        let events = engine.take_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::BindInput).count(), 1);
    }

    #[test]
    fn start_while_paused_in_scene_resumes() {
        let mut engine = engine();
        engine.start();
        fire_next(&mut engine);
        engine.pause(true);
        engine.take_events();

        engine.start();
        assert!(!engine.state.paused);
        assert_eq!(engine.state.action, Action::Scene);
        assert!(engine.state.timers.is_pending(TimerPhase::Frame));
        let events = engine.take_events();
        assert!(events.contains(&GameEvent::BindInput));
        assert!(!events.contains(&GameEvent::Paused));

        // Pausing works again afterwards
        engine.pause(true);
        assert!(engine.take_events().contains(&GameEvent::Paused));
    }

    #[test]
    fn pause_drops_a_settling_charge() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.begin_charge();
        let action = engine.state.action;

        engine.pause(true);
        assert!(engine.next_due().is_none());
        assert_eq!(engine.state.action, action);
        assert!(!engine.state.charging);
        assert!(!engine.state.hold);

        engine.pause(false);
        fire_while(&mut engine, |e| e.next_due().is_some());
        assert_ne!(engine.state.action, Action::Path);

        engine.begin_charge();
        assert!(engine.state.charging);
    }

    #[test]
    fn game_over_clears_the_catch_tally() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Stone);
        engine.state.caught.record(TargetKind::Mouse);
        engine.state.caught.record(TargetKind::Mouse);

        jump_with(&mut engine, 33.0);
        fire_while(&mut engine, |e| e.state.action == Action::Jump);

        assert!(engine.state.paused);
        assert_eq!(engine.state.caught.total(), 0);
        let events = engine.take_events();
        assert!(events.contains(&GameEvent::Caught {
            kind: TargetKind::Mouse,
            count: 0
        }));
        assert!(!events.iter().any(|e| matches!(
            e,
            GameEvent::Caught {
                kind: TargetKind::Bird,
                ..
            }
        )));
    }

    #[test]
    fn stay_frames_do_not_reschedule() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        engine.state.timers.schedule(TimerPhase::Frame, 0);
        let phase = engine.pop_due(0).unwrap();
        let frame = engine.fire(phase, true).unwrap();
        assert_eq!(frame.character, CharacterFrame::Indexed(REST_FRAME));
        assert!(engine.next_due().is_none());
    }

    #[test]
    fn loading_sprites_defer_frames() {
        let mut engine = engine();
        engine.start();
        let phase = engine.pop_due(0).unwrap();
        assert!(engine.fire(phase, false).is_none());
        assert_eq!(
            engine.state.timers.due_at(TimerPhase::Frame),
            Some(u64::from(engine.tuning.resource_backoff_ms))
        );
    }

    #[test]
    fn airborne_frames_follow_the_arc() {
        let mut engine = engine();
        stand_before(&mut engine, TargetKind::Mouse);
        jump_with(&mut engine, 120.0);
        let phase = engine.pop_due(u64::MAX).unwrap();
        let frame = engine.fire(phase, true).unwrap();
        assert_eq!(frame.character, CharacterFrame::Indexed(0));
        assert!(frame.character_pos.y < CAT_REST_Y);
    }
}
