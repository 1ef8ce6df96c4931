//! Events emitted by the engine
//!
//! The engine never calls out while it is mutating. It queues events here and the
//! runtime drains them once the step is finished.

use super::state::TargetKind;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // --- UI feedback ---
    ScoreChanged(i32),
    LevelChanged(u32),
    /// Tooltip text; empty hides it
    Tooltip(String),
    /// A victim was caught; `count` is the new total for its kind
    Caught { kind: TargetKind, count: u32 },
    GameOver,
    Paused,

    // --- Collaborator control ---
    BackgroundStart { interval_ms: u32 },
    BackgroundStop,
    BindInput,
    UnbindInput,
}

impl GameEvent {
    /// Whether the event is for the UI handlers rather than a collaborator
    pub fn is_ui(&self) -> bool {
        !matches!(
            self,
            GameEvent::BackgroundStart { .. }
                | GameEvent::BackgroundStop
                | GameEvent::BindInput
                | GameEvent::UnbindInput
        )
    }
}
