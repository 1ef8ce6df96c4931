//! UI callback bundle
//!
//! The only way the outside world learns about score, level and tooltips.

use crate::sim::{GameEvent, TargetKind};

/// Handlers supplied when the engine is first created
pub trait GameHandlers {
    /// The game went from running to paused
    fn handle_pause(&mut self);

    /// Score-driven game over; call `start()` again to play on
    fn handle_game_over(&mut self);

    fn set_level(&mut self, level: u32);

    fn set_score(&mut self, score: i32);

    /// Empty text hides the tooltip
    fn set_tooltip(&mut self, text: &str);

    fn set_caught(&mut self, _kind: TargetKind, _count: u32) {}
}

/// Forward a UI event to its handler. Collaborator events are ignored here.
pub fn dispatch(event: &GameEvent, handlers: &mut dyn GameHandlers) {
    match event {
        GameEvent::ScoreChanged(score) => handlers.set_score(*score),
        GameEvent::LevelChanged(level) => handlers.set_level(*level),
        GameEvent::Tooltip(text) => handlers.set_tooltip(text),
        GameEvent::Caught { kind, count } => handlers.set_caught(*kind, *count),
        GameEvent::GameOver => handlers.handle_game_over(),
        GameEvent::Paused => handlers.handle_pause(),
        GameEvent::BackgroundStart { .. }
        | GameEvent::BackgroundStop
        | GameEvent::BindInput
        | GameEvent::UnbindInput => {}
    }
}
