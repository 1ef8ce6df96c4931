//! In-memory collaborators
//!
//! Everything records into one shared log so a test (or the native demo) can look at
//! what the engine asked for after the fact.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::{InputHost, RawInput};
use crate::renderer::{BackgroundMotion, Renderer, SpriteSource};
use crate::sim::{Action, CharacterFrame, Engine, TargetKind};
use crate::ui::GameHandlers;

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Target {
        kind: TargetKind,
        x: f32,
        y: f32,
        height: f32,
        missed: bool,
    },
    Character {
        frame: CharacterFrame,
        x: f32,
        y: f32,
    },
    Trajectory {
        x: f32,
        y: f32,
        height: f32,
    },
}

/// What the UI handlers were told
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudState {
    pub score: i32,
    pub level: u32,
    pub tooltip: String,
    pub pauses: u32,
    pub game_overs: u32,
    pub caught: Vec<(TargetKind, u32)>,
}

#[derive(Debug, Default)]
struct Log {
    draws: Vec<DrawCall>,
    /// `Some(interval)` for start, `None` for stop
    background: Vec<Option<u32>>,
    attached: u32,
    detached: u32,
    hud: HudState,
}

/// Shared log and factory for the recording collaborators
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Log>>,
}

impl Recorder {
    pub fn renderer(&self) -> RecordingRenderer {
        RecordingRenderer {
            log: self.log.clone(),
        }
    }

    pub fn background(&self) -> RecordingBackground {
        RecordingBackground {
            log: self.log.clone(),
        }
    }

    pub fn input(&self) -> RecordingInput {
        RecordingInput {
            log: self.log.clone(),
        }
    }

    pub fn handlers(&self) -> RecordingHandlers {
        RecordingHandlers {
            log: self.log.clone(),
        }
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.log.borrow().draws.clone()
    }

    pub fn clears(&self) -> usize {
        self.log
            .borrow()
            .draws
            .iter()
            .filter(|call| **call == DrawCall::Clear)
            .count()
    }

    pub fn background_log(&self) -> Vec<Option<u32>> {
        self.log.borrow().background.clone()
    }

    pub fn attached(&self) -> u32 {
        self.log.borrow().attached
    }

    pub fn detached(&self) -> u32 {
        self.log.borrow().detached
    }

    pub fn hud(&self) -> HudState {
        self.log.borrow().hud.clone()
    }
}

pub struct RecordingRenderer {
    log: Rc<RefCell<Log>>,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.log.borrow_mut().draws.push(DrawCall::Clear);
    }

    fn draw_target(&mut self, kind: TargetKind, x: f32, y: f32, height: f32, missed: bool) {
        self.log.borrow_mut().draws.push(DrawCall::Target {
            kind,
            x,
            y,
            height,
            missed,
        });
    }

    fn draw_character(&mut self, frame: CharacterFrame, x: f32, y: f32) {
        self.log
            .borrow_mut()
            .draws
            .push(DrawCall::Character { frame, x, y });
    }

    fn draw_trajectory(&mut self, x: f32, y: f32, height: f32) {
        self.log
            .borrow_mut()
            .draws
            .push(DrawCall::Trajectory { x, y, height });
    }
}

pub struct RecordingBackground {
    log: Rc<RefCell<Log>>,
}

impl BackgroundMotion for RecordingBackground {
    fn start(&mut self, interval_ms: u32) {
        self.log.borrow_mut().background.push(Some(interval_ms));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().background.push(None);
    }
}

pub struct RecordingInput {
    log: Rc<RefCell<Log>>,
}

impl InputHost for RecordingInput {
    fn attach(&mut self) {
        self.log.borrow_mut().attached += 1;
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detached += 1;
    }
}

pub struct RecordingHandlers {
    log: Rc<RefCell<Log>>,
}

impl GameHandlers for RecordingHandlers {
    fn handle_pause(&mut self) {
        self.log.borrow_mut().hud.pauses += 1;
    }

    fn handle_game_over(&mut self) {
        self.log.borrow_mut().hud.game_overs += 1;
    }

    fn set_level(&mut self, level: u32) {
        self.log.borrow_mut().hud.level = level;
    }

    fn set_score(&mut self, score: i32) {
        self.log.borrow_mut().hud.score = score;
    }

    fn set_tooltip(&mut self, text: &str) {
        self.log.borrow_mut().hud.tooltip = text.to_string();
    }

    fn set_caught(&mut self, kind: TargetKind, count: u32) {
        self.log.borrow_mut().hud.caught.push((kind, count));
    }
}

/// Sprite source with a fixed frame count. Clones share the loading flag.
#[derive(Debug, Clone)]
pub struct StaticSprites {
    frames: usize,
    loading: Rc<Cell<bool>>,
}

impl StaticSprites {
    pub fn new(frames: usize, loading: bool) -> Self {
        Self {
            frames,
            loading: Rc::new(Cell::new(loading)),
        }
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }
}

impl SpriteSource for StaticSprites {
    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn frame_count(&self) -> usize {
        self.frames
    }
}

/// Bot that charges toward the current threshold, missing now and then
pub struct Autoplay {
    rng: Pcg32,
    miss_chance: f32,
    aim: Option<f32>,
}

impl Autoplay {
    pub fn new(seed: u64, miss_chance: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            miss_chance: miss_chance.clamp(0.0, 1.0),
            aim: None,
        }
    }

    /// Input to feed for the engine as it stands, if any
    pub fn decide(&mut self, engine: &Engine) -> Option<RawInput> {
        let state = engine.state();
        match state.action {
            Action::Stay if !state.hold && !state.charging => {
                let tuning = engine.tuning();
                let threshold = state.success_threshold;
                let miss = self.rng.random::<f32>() < self.miss_chance;
                let aim = match (engine.targets().is_barrier, miss) {
                    (true, false) => threshold + tuning.trajectory_step / 2.0,
                    // Just outside the tolerance band below the bar
                    (true, true) => threshold - 14.0,
                    (false, false) => threshold,
                    (false, true) => threshold + 30.0,
                };
                self.aim = Some(aim.clamp(tuning.jump_height_min, tuning.jump_height_max));
                Some(RawInput::PointerDown)
            }
            Action::Path => {
                let aim = self.aim?;
                if engine.character().jump_height >= aim {
                    self.aim = None;
                    Some(RawInput::PointerUp)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
