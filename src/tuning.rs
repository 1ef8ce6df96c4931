//! Data-driven game balance
//!
//! Every number the level director and jump model scale with lives here, so a
//! balance pass is a JSON edit rather than a code change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::CAT_REST_X;
use crate::sim::{TargetKind, level};

/// Why a tuning table was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("jump height bounds are inverted: min {min} >= max {max}")]
    JumpBounds { min: f32, max: f32 },
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("target_stop_x {stop_x} is not ahead of the cat at {rest_x}")]
    StopBehindCat { stop_x: f32, rest_x: f32 },
    #[error("{kind} needs a {threshold} jump, outside {min}..={max}")]
    OutOfReach {
        kind: &'static str,
        threshold: f32,
        min: f32,
        max: f32,
    },
    #[error("no target candidates for level {0}")]
    MissingLevel(u32),
    #[error("level {level} lists `none` as a candidate")]
    NoneCandidate { level: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Jump ===
    pub jump_height_min: f32,
    pub jump_height_max: f32,
    /// Height added per tick while charging
    pub trajectory_step: f32,
    /// Barrier success needs a jump this many times the barrier height
    pub success_height_ratio: f32,

    // === Score and levels ===
    pub initial_score: i32,
    pub score_per_level: i32,
    pub max_level: u32,
    pub base_speed: f32,
    pub speed_per_level: f32,

    // === Motion (pixels per tick) ===
    pub movement_speed: f32,
    pub runaway_speed: f32,

    // === Targets ===
    pub target_stop_x: f32,
    /// Victims stop up to this far past `target_stop_x`
    pub victim_stop_jitter: f32,
    pub target_base_height: f32,
    /// Barriers grow by this much each level
    pub barrier_height_per_level: f32,
    pub runaway_delay_ms: u32,
    pub runaway_delay_step_ms: u32,
    pub runaway_delay_floor_ms: u32,
    /// Candidate kinds per level index
    pub levels: Vec<Vec<TargetKind>>,

    // === Resources ===
    /// Retry interval while sprites are still loading
    pub resource_backoff_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        use TargetKind::*;

        Self {
            jump_height_min: 20.0,
            jump_height_max: 200.0,
            trajectory_step: 4.0,
            success_height_ratio: 1.2,

            initial_score: 0,
            score_per_level: 50,
            max_level: 5,
            base_speed: 0.5,
            speed_per_level: 0.1,

            movement_speed: 6.0,
            runaway_speed: 6.0,

            target_stop_x: 300.0,
            victim_stop_jitter: 120.0,
            target_base_height: 40.0,
            barrier_height_per_level: 10.0,
            runaway_delay_ms: 3000,
            runaway_delay_step_ms: 400,
            runaway_delay_floor_ms: 500,
            levels: vec![
                vec![Mouse, Puddle],
                vec![Mouse, Grasshopper, Puddle, Stone],
                vec![Mouse, Grasshopper, Butterfly, Puddle, Stone],
                vec![Grasshopper, Butterfly, Puddle, Stone, Crate],
                vec![Grasshopper, Butterfly, Bird, Stone, Crate],
                vec![Butterfly, Bird, Stone, Crate, Fence],
            ],

            resource_backoff_ms: 500,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.jump_height_min >= self.jump_height_max {
            return Err(TuningError::JumpBounds {
                min: self.jump_height_min,
                max: self.jump_height_max,
            });
        }
        if self.trajectory_step <= 0.0 {
            return Err(TuningError::NotPositive("trajectory_step"));
        }
        if self.score_per_level <= 0 {
            return Err(TuningError::NotPositive("score_per_level"));
        }
        if self.base_speed <= 0.0 {
            return Err(TuningError::NotPositive("base_speed"));
        }
        if self.speed_per_level < 0.0 {
            return Err(TuningError::Negative("speed_per_level"));
        }
        if self.movement_speed <= 0.0 {
            return Err(TuningError::NotPositive("movement_speed"));
        }
        if self.runaway_speed <= 0.0 {
            return Err(TuningError::NotPositive("runaway_speed"));
        }
        if self.resource_backoff_ms == 0 {
            return Err(TuningError::NotPositive("resource_backoff_ms"));
        }
        if self.victim_stop_jitter < 0.0 {
            return Err(TuningError::Negative("victim_stop_jitter"));
        }
        if self.target_stop_x <= CAT_REST_X {
            return Err(TuningError::StopBehindCat {
                stop_x: self.target_stop_x,
                rest_x: CAT_REST_X,
            });
        }

        // Nearest and farthest victim stops
        for stop_x in [self.target_stop_x, self.target_stop_x + self.victim_stop_jitter] {
            self.reachable("victim", level::success_threshold(false, 0.0, stop_x, self))?;
        }

        for level in 0..=self.max_level {
            let candidates = self
                .levels
                .get(level as usize)
                .filter(|c| !c.is_empty())
                .ok_or(TuningError::MissingLevel(level))?;
            if candidates.contains(&TargetKind::None) {
                return Err(TuningError::NoneCandidate { level });
            }
            if let Some(barrier) = candidates.iter().find(|kind| kind.is_barrier()) {
                let height = level::target_height(true, level, self);
                let threshold = level::success_threshold(true, height, self.target_stop_x, self);
                self.reachable(barrier.as_str(), threshold)?;
            }
        }
        Ok(())
    }

    fn reachable(&self, kind: &'static str, threshold: f32) -> Result<(), TuningError> {
        if (self.jump_height_min..=self.jump_height_max).contains(&threshold) {
            Ok(())
        } else {
            Err(TuningError::OutOfReach {
                kind,
                threshold,
                min: self.jump_height_min,
                max: self.jump_height_max,
            })
        }
    }
}
