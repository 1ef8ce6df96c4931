//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only (the host feeds the clock through `Engine::pop_due`)
//! - Seeded RNG only
//! - Outward effects queued as `GameEvent`s, never called directly
//! - No rendering or platform dependencies

pub mod engine;
pub mod events;
pub mod frame;
pub mod level;
pub mod scene;
pub mod state;
pub mod timers;
pub mod trajectory;

pub use engine::{Engine, FailReason, tips};
pub use events::GameEvent;
pub use frame::{CharacterFrame, Frame, TargetSprite, TrajectoryPreview};
pub use level::TargetPlan;
pub use state::{
    Action, BARRIER_KINDS, CatchTally, Character, GameState, TargetKind, TargetRecord, Targets,
    TooltipState, VICTIM_KINDS,
};
pub use timers::{TimerHandle, TimerPhase, Timers};
pub use trajectory::{ArcStep, ChargeStep};
