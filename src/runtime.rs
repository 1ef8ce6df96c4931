//! Engine bound to its collaborators
//!
//! `Runtime` feeds input and the host clock into the engine, draws the frames it
//! produces, and applies the collaborator events (background, listeners) it queues.
//! UI events are handed back to the caller.

use crate::consts::MAX_FIRINGS_PER_ADVANCE;
use crate::input::{Command, InputController, InputHost, RawInput};
use crate::renderer::{self, BackgroundMotion, Renderer, SpriteSource};
use crate::settings::Settings;
use crate::sim::{Engine, GameEvent};

/// Everything the engine needs from its host
pub struct Collaborators {
    pub renderer: Box<dyn Renderer>,
    pub sprites: Box<dyn SpriteSource>,
    pub background: Box<dyn BackgroundMotion>,
    pub input: Box<dyn InputHost>,
}

pub struct Runtime {
    engine: Engine,
    renderer: Box<dyn Renderer>,
    sprites: Box<dyn SpriteSource>,
    background: Box<dyn BackgroundMotion>,
    controller: InputController,
    settings: Settings,
}

impl Runtime {
    pub fn new(engine: Engine, collaborators: Collaborators, settings: Settings) -> Self {
        let Collaborators {
            renderer,
            sprites,
            background,
            input,
        } = collaborators;
        Self {
            engine,
            renderer,
            sprites,
            background,
            controller: InputController::new(&settings, input),
            settings,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input_bound(&self) -> bool {
        self.controller.is_bound()
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.controller.apply_settings(&settings);
        if !settings.background_motion {
            self.background.stop();
        }
        self.settings = settings;
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        self.engine.start();
        self.route()
    }

    pub fn stop(&mut self) -> Vec<GameEvent> {
        self.engine.stop();
        self.route()
    }

    pub fn pause(&mut self, paused: bool) -> Vec<GameEvent> {
        self.engine.pause(paused);
        self.route()
    }

    /// Feed one raw host event
    pub fn input(&mut self, raw: &RawInput) -> Vec<GameEvent> {
        match self.controller.translate(raw) {
            Some(Command::BeginCharge) => self.engine.begin_charge(),
            Some(Command::ReleaseJump) => self.engine.release_jump(),
            Some(Command::Pause) => self.engine.pause(true),
            None => {}
        }
        self.route()
    }

    /// Fire every callback due by `now_ms`, drawing frames as they come
    pub fn advance(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let mut ui = Vec::new();
        let mut fired = 0;

        while let Some(phase) = self.engine.pop_due(now_ms) {
            let ready = !self.sprites.is_loading();
            if let Some(frame) = self.engine.fire(phase, ready) {
                renderer::dispatch(
                    &frame,
                    self.renderer.as_mut(),
                    self.sprites.frame_count(),
                    self.settings.show_trajectory,
                );
            }
            ui.extend(self.route());

            fired += 1;
            if fired >= MAX_FIRINGS_PER_ADVANCE {
                log::warn!(
                    "Timer overrun at {}ms, deferring the rest to the next advance",
                    now_ms
                );
                break;
            }
        }

        self.engine.settle(now_ms);
        ui
    }

    /// Apply collaborator events, return the UI ones
    fn route(&mut self) -> Vec<GameEvent> {
        let mut ui = Vec::new();
        for event in self.engine.take_events() {
            match event {
                GameEvent::BackgroundStart { interval_ms } => {
                    if self.settings.background_motion {
                        self.background.start(interval_ms);
                    }
                }
                GameEvent::BackgroundStop => self.background.stop(),
                GameEvent::BindInput => self.controller.bind(),
                GameEvent::UnbindInput => self.controller.unbind(),
                event => ui.push(event),
            }
        }
        ui
    }
}
