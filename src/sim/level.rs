//! Level director maths
//!
//! Pure functions from score and level to the next target's parameters.
//! The engine applies the resulting `TargetPlan` to its state.

use rand::Rng;

use super::state::TargetKind;
use crate::consts::*;
use crate::tuning::Tuning;

/// Parameters for the next target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPlan {
    pub kind: TargetKind,
    pub is_barrier: bool,
    pub height: f32,
    pub stop_x: f32,
    pub runaway_delay_ms: u32,
    pub success_threshold: f32,
    pub requires_full_arc: bool,
}

/// Level reached at `score`, capped at the last level
pub fn level_for_score(score: i32, tuning: &Tuning) -> u32 {
    let level = score.max(0) / tuning.score_per_level.max(1);
    (level as u32).min(tuning.max_level)
}

/// Speed factor for `level`, never above 1
pub fn speed_for_level(level: u32, tuning: &Tuning) -> f32 {
    (tuning.base_speed + level as f32 * tuning.speed_per_level).min(1.0)
}

/// How long a victim waits at `level` before running away
pub fn runaway_delay_ms(level: u32, tuning: &Tuning) -> u32 {
    tuning
        .runaway_delay_ms
        .saturating_sub(tuning.runaway_delay_step_ms.saturating_mul(level))
        .max(tuning.runaway_delay_floor_ms)
}

/// Spawn height: barriers grow per level, victims keep the base height
pub fn target_height(is_barrier: bool, level: u32, tuning: &Tuning) -> f32 {
    if is_barrier {
        tuning.target_base_height + tuning.barrier_height_per_level * level as f32
    } else {
        tuning.target_base_height
    }
}

/// Jump height that scores against a target
pub fn success_threshold(is_barrier: bool, height: f32, stop_x: f32, tuning: &Tuning) -> f32 {
    if is_barrier {
        (height * tuning.success_height_ratio).floor()
    } else {
        // The arc spans twice its radius, so land exactly on the victim
        (stop_x - CAT_REST_X) / 2.0
    }
}

/// Candidate kinds unlocked at `level`
pub fn candidates(level: u32, tuning: &Tuning) -> &[TargetKind] {
    tuning
        .levels
        .get(level as usize)
        .or_else(|| tuning.levels.last())
        .map(Vec::as_slice)
        .unwrap_or(&[TargetKind::Mouse])
}

/// Pick and size the next target
pub fn plan_target<R: Rng>(level: u32, tuning: &Tuning, rng: &mut R) -> TargetPlan {
    let pool = candidates(level, tuning);
    let kind = if pool.is_empty() {
        TargetKind::Mouse
    } else {
        pool[rng.random_range(0..pool.len())]
    };
    let is_barrier = kind.is_barrier();

    let stop_x = if is_barrier {
        tuning.target_stop_x
    } else {
        tuning.target_stop_x + (rng.random::<f32>() * tuning.victim_stop_jitter).floor()
    };
    let height = target_height(is_barrier, level, tuning);

    TargetPlan {
        kind,
        is_barrier,
        height,
        stop_x,
        runaway_delay_ms: runaway_delay_ms(level, tuning),
        success_threshold: success_threshold(is_barrier, height, stop_x, tuning),
        requires_full_arc: kind.requires_full_arc(),
    }
}
