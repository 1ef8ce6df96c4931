//! Pounce - a one-button reaction game
//!
//! Core modules:
//! - `sim`: Deterministic engine (state machine, jump arc, scene and level direction)
//! - `renderer`: Drawing collaborators and per-tick render dispatch
//! - `input`: Raw input to engine commands, listener lifecycle
//! - `runtime`: Engine bound to its collaborators
//! - `instance`: Process-scoped engine handle
//! - `platform`: Headless and browser collaborators
//! - `ui`: Callback bundle for score, level and tooltips
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod input;
pub mod instance;
pub mod platform;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use instance::EngineHandle;
pub use runtime::{Collaborators, Runtime};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Drawing surface size
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;

    /// Element id of the drawing surface
    pub const CANVAS_ELEMENT_ID: &str = "game_canvas";

    /// Character rest position (top-left of the sprite)
    pub const CAT_REST_X: f32 = 60.0;
    pub const CAT_REST_Y: f32 = 330.0;

    /// Ground line targets stand on
    pub const TARGET_GROUND_Y: f32 = 400.0;

    /// Milliseconds per tick at full speed
    pub const BASE_FRAME_MS: f32 = 17.0;

    /// Victim verdict tolerance (|height - threshold| must be below this)
    pub const VICTIM_TOLERANCE: f32 = 10.0;

    /// Sprite frames used while airborne
    pub const AIRBORNE_FRAMES: usize = 3;
    /// Frame shown while charging
    pub const CHARGE_FRAME: usize = 0;
    /// Frame shown while standing
    pub const REST_FRAME: usize = 2;

    /// Timer firings allowed per `advance` call before the rest is deferred
    pub const MAX_FIRINGS_PER_ADVANCE: u32 = 512;
}

/// Tick interval in milliseconds for a speed factor in (0, 1].
///
/// Derived on demand so it can never go stale against `speed_factor`.
#[inline]
pub fn tick_interval(speed_factor: f32) -> u32 {
    let speed = speed_factor.clamp(f32::EPSILON, 1.0);
    (consts::BASE_FRAME_MS / speed).floor() as u32
}
