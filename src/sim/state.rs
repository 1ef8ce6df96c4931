//! Game state and core simulation types
//!
//! Three entities, each owned by the engine: `GameState` (mode, score, flags, timers),
//! `Character` (the cat) and `Targets` (current and previous target).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timers::Timers;
use crate::consts::*;

/// Current behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    /// Idle, or settling before a charge starts
    #[default]
    None,
    /// Plain forward motion
    Run,
    /// Grounded and waiting for input
    Stay,
    /// Airborne, outcome already decided
    Jump,
    /// Charging, arc preview animates
    Path,
    /// Target and character advancing toward engagement
    Scene,
    /// Character retreating to the rest position
    Return,
}

/// Target kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    None,
    // Victims
    Mouse,
    Grasshopper,
    Butterfly,
    Bird,
    // Barriers
    Puddle,
    Stone,
    Crate,
    Fence,
}

/// Kinds the cat must clear rather than land on
pub const BARRIER_KINDS: [TargetKind; 4] = [
    TargetKind::Puddle,
    TargetKind::Stone,
    TargetKind::Crate,
    TargetKind::Fence,
];

/// Kinds the cat must land on
pub const VICTIM_KINDS: [TargetKind; 4] = [
    TargetKind::Mouse,
    TargetKind::Grasshopper,
    TargetKind::Butterfly,
    TargetKind::Bird,
];

/// Score change for resolving an attempt against a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDelta {
    pub success: i32,
    pub fail: i32,
}

impl TargetKind {
    pub fn is_barrier(self) -> bool {
        BARRIER_KINDS.contains(&self)
    }

    pub fn is_victim(self) -> bool {
        VICTIM_KINDS.contains(&self)
    }

    /// Whether a missed jump over this kind must still run the whole arc.
    /// Solid barriers stop the cat mid-air; puddles and prey do not.
    pub fn requires_full_arc(self) -> bool {
        self == TargetKind::Puddle || self.is_victim()
    }

    pub fn score(self) -> ScoreDelta {
        let (success, fail) = match self {
            TargetKind::None => (0, 0),
            TargetKind::Mouse => (10, -5),
            TargetKind::Grasshopper => (15, -5),
            TargetKind::Butterfly => (20, -10),
            TargetKind::Bird => (30, -15),
            TargetKind::Puddle => (5, -5),
            TargetKind::Stone => (10, -10),
            TargetKind::Crate => (15, -10),
            TargetKind::Fence => (20, -15),
        };
        ScoreDelta { success, fail }
    }

    pub fn fail_penalty(self) -> i32 {
        self.score().fail
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::None => "none",
            TargetKind::Mouse => "mouse",
            TargetKind::Grasshopper => "grasshopper",
            TargetKind::Butterfly => "butterfly",
            TargetKind::Bird => "bird",
            TargetKind::Puddle => "puddle",
            TargetKind::Stone => "stone",
            TargetKind::Crate => "crate",
            TargetKind::Fence => "fence",
        }
    }
}

/// First-time tooltip bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipState {
    /// A tooltip is on screen
    pub shown: bool,
    /// The new-game tip is still due
    pub first_tip: bool,
    pub first_victim: bool,
    pub first_barrier: bool,
    pub first_timeout: bool,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            shown: false,
            first_tip: true,
            first_victim: true,
            first_barrier: true,
            first_timeout: true,
        }
    }
}

/// Catches per victim kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatchTally {
    pub mouse: u32,
    pub grasshopper: u32,
    pub butterfly: u32,
    pub bird: u32,
}

impl CatchTally {
    /// Count a catch, returning the new total for that kind
    pub fn record(&mut self, kind: TargetKind) -> Option<u32> {
        let slot = match kind {
            TargetKind::Mouse => &mut self.mouse,
            TargetKind::Grasshopper => &mut self.grasshopper,
            TargetKind::Butterfly => &mut self.butterfly,
            TargetKind::Bird => &mut self.bird,
            _ => return None,
        };
        *slot += 1;
        Some(*slot)
    }

    pub fn count(&self, kind: TargetKind) -> u32 {
        match kind {
            TargetKind::Mouse => self.mouse,
            TargetKind::Grasshopper => self.grasshopper,
            TargetKind::Butterfly => self.butterfly,
            TargetKind::Bird => self.bird,
            _ => 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.mouse + self.grasshopper + self.butterfly + self.bird
    }
}

/// Mutable engine-wide state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Difficulty in (0, 1]; tick interval and scroll speed follow it
    pub speed_factor: f32,
    pub action: Action,
    /// Set while the current sequence must not accept a new jump request
    pub hold: bool,
    /// A charge was begun and not yet released
    pub charging: bool,
    /// Per-tick pixel delta for scene and return motion
    pub movement_speed: f32,
    /// Per-tick pixel delta for a fleeing previous target
    pub runaway_speed: f32,
    pub success_threshold: f32,
    /// Verdict for the jump in flight
    pub jump_succeeded: bool,
    /// Whether a failed jump must still run to landing
    pub requires_full_arc: bool,
    pub score: i32,
    pub level: u32,
    pub paused: bool,
    /// A victim is waiting and its runaway timeout applies
    pub awaiting_engagement: bool,
    pub tooltip: TooltipState,
    pub caught: CatchTally,
    /// Pending callbacks, one slot per phase
    pub timers: Timers,
}

impl GameState {
    pub fn new(initial_score: i32, base_speed: f32, movement_speed: f32, threshold: f32) -> Self {
        Self {
            speed_factor: base_speed,
            action: Action::None,
            hold: false,
            charging: false,
            movement_speed,
            runaway_speed: movement_speed,
            success_threshold: threshold,
            jump_succeeded: false,
            requires_full_arc: true,
            score: initial_score,
            level: 0,
            paused: false,
            awaiting_engagement: false,
            tooltip: TooltipState::default(),
            caught: CatchTally::default(),
            timers: Timers::default(),
        }
    }

    /// Tick interval derived from the current speed factor
    pub fn tick_interval(&self) -> u32 {
        crate::tick_interval(self.speed_factor)
    }
}

/// The jumping character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Arc radius, kept within the tuning bounds
    pub jump_height: f32,
    /// Arc parameter, walks from -π to 0
    pub jump_phase: f32,
    /// +1 while the charge grows, -1 once it peaked
    pub arc_direction: f32,
    pub pos: Vec2,
    /// Reached the rest X during the current scene
    pub at_rest_position: bool,
}

impl Character {
    pub fn new(jump_height_min: f32) -> Self {
        Self {
            jump_height: jump_height_min,
            jump_phase: -std::f32::consts::PI,
            arc_direction: 1.0,
            pos: Vec2::new(CAT_REST_X, CAT_REST_Y),
            at_rest_position: false,
        }
    }

    pub fn is_at_rest_x(&self) -> bool {
        self.pos.x <= CAT_REST_X
    }
}

/// One target on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub height: f32,
}

/// Current and immediately previous target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Targets {
    pub current: TargetRecord,
    /// Runs off screen while the next target approaches; `None` kind otherwise
    pub previous: TargetRecord,
    pub is_barrier: bool,
    /// X where the current target stops
    pub stop_x: f32,
    /// Milliseconds a victim waits before running away
    pub runaway_delay_ms: u32,
}

impl Targets {
    pub fn new(base_height: f32, stop_x: f32, runaway_delay_ms: u32) -> Self {
        Self {
            current: TargetRecord {
                kind: TargetKind::None,
                pos: Vec2::new(CAT_REST_X + CANVAS_WIDTH / 2.0, TARGET_GROUND_Y),
                height: base_height,
            },
            previous: TargetRecord {
                kind: TargetKind::None,
                pos: Vec2::new(stop_x, TARGET_GROUND_Y),
                height: base_height,
            },
            is_barrier: false,
            stop_x,
            runaway_delay_ms,
        }
    }
}
