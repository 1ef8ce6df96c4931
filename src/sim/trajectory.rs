//! Jump model
//!
//! The arc is a stylised half circle of radius `jump_height` starting at the rest
//! position: `x = rest_x + r + r·cos θ`, `y = rest_y + r·sin θ` for θ from -π to 0.
//! Charging grows the radius; releasing fixes it and walks θ.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::state::Character;
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of one charging tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStep {
    Charging,
    /// Height fell back under the minimum; the charge is dropped
    Abandoned,
}

/// Result of one airborne tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcStep {
    Airborne(Vec2),
    /// Failed jump stopped at the midpoint
    CutShort,
    Landed,
}

/// Reset the character for a fresh charge
pub fn start_charge(character: &mut Character, tuning: &Tuning) {
    character.jump_height = tuning.jump_height_min;
    character.arc_direction = 1.0;
}

/// Grow (or, past the peak, shrink) the charge by one step
pub fn step_charge(character: &mut Character, tuning: &Tuning) -> ChargeStep {
    character.jump_height += tuning.trajectory_step * character.arc_direction;
    if character.jump_height >= tuning.jump_height_max {
        character.jump_height = tuning.jump_height_max;
        character.arc_direction = -1.0;
    }
    if character.jump_height < tuning.jump_height_min {
        character.jump_height = tuning.jump_height_min;
        character.jump_phase = -PI;
        return ChargeStep::Abandoned;
    }
    ChargeStep::Charging
}

/// A release this close to the minimum is an accidental tap
pub fn is_tap(height: f32, tuning: &Tuning) -> bool {
    height <= tuning.jump_height_min + tuning.trajectory_step * 2.0
}

/// Decide a jump at release time
pub fn verdict(height: f32, threshold: f32, is_barrier: bool) -> bool {
    (is_barrier && height > threshold) || (height - threshold).abs() < VICTIM_TOLERANCE
}

/// Angular step per tick; smaller arcs get fewer, coarser positions
pub fn arc_step(height: f32) -> f32 {
    let points = (height / 4.0).max(1.0);
    PI / points
}

/// Point on the arc for `height` at `phase`
pub fn arc_point(height: f32, phase: f32) -> Vec2 {
    Vec2::new(
        CAT_REST_X + height + height * phase.cos(),
        CAT_REST_Y + height * phase.sin(),
    )
}

/// Sprite frame for an airborne phase in [-π, 0)
pub fn airborne_frame(phase: f32) -> usize {
    let t = ((phase + PI) / PI).clamp(0.0, 1.0);
    ((t * AIRBORNE_FRAMES as f32).floor() as usize).min(AIRBORNE_FRAMES - 1)
}

/// Advance the jump in flight by one tick
pub fn step_arc(character: &mut Character, requires_full_arc: bool, succeeded: bool) -> ArcStep {
    let height = character.jump_height;
    character.jump_phase += arc_step(height);
    let phase = character.jump_phase;

    if phase >= 0.0 {
        return ArcStep::Landed;
    }

    let point = arc_point(height, phase);
    character.pos.x = point.x;

    if !requires_full_arc && !succeeded && phase > -FRAC_PI_2 {
        return ArcStep::CutShort;
    }
    ArcStep::Airborne(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn charged(tuning: &Tuning, ticks: usize) -> (Character, Vec<ChargeStep>) {
        let mut cat = Character::new(tuning.jump_height_min);
        start_charge(&mut cat, tuning);
        let steps = (0..ticks).map(|_| step_charge(&mut cat, tuning)).collect();
        (cat, steps)
    }

    #[test]
    fn charge_peaks_then_descends_then_abandons() {
        let tuning = Tuning::default();
        // 45 steps up to the max, 45 back down, one more drops below min
        let (cat, steps) = charged(&tuning, 45);
        assert_eq!(cat.jump_height, tuning.jump_height_max);
        assert_eq!(cat.arc_direction, -1.0);
        assert!(steps.iter().all(|s| *s == ChargeStep::Charging));

        let (cat, steps) = charged(&tuning, 91);
        assert_eq!(steps.last(), Some(&ChargeStep::Abandoned));
        assert_eq!(cat.jump_height, tuning.jump_height_min);
    }

    #[test]
    fn taps_are_short_charges() {
        let tuning = Tuning::default();
        assert!(is_tap(20.0, &tuning));
        assert!(is_tap(28.0, &tuning));
        assert!(!is_tap(32.0, &tuning));
    }

    #[test]
    fn victim_example_succeeds_within_tolerance() {
        // stop at 300, rest at 60 -> threshold 120
        assert!(verdict(121.0, 120.0, false));
        assert!(!verdict(131.0, 120.0, false));
        assert!(!verdict(110.0, 120.0, false));
    }

    #[test]
    fn barrier_succeeds_above_threshold() {
        assert!(verdict(200.0, 48.0, true));
        assert!(verdict(49.0, 48.0, true));
        // still inside the tolerance band just below
        assert!(verdict(45.0, 48.0, true));
        assert!(!verdict(30.0, 48.0, true));
    }

    #[test]
    fn arc_starts_and_ends_on_ground() {
        let start = arc_point(50.0, -PI);
        assert!((start.x - CAT_REST_X).abs() < 1e-3);
        assert!((start.y - CAT_REST_Y).abs() < 1e-3);
        let apex = arc_point(50.0, -FRAC_PI_2);
        assert!((apex.y - (CAT_REST_Y - 50.0)).abs() < 1e-3);
    }

    #[test]
    fn airborne_frames_cover_the_arc() {
        assert_eq!(airborne_frame(-PI), 0);
        assert_eq!(airborne_frame(-FRAC_PI_2), 1);
        assert_eq!(airborne_frame(-0.01), 2);
    }

    #[test]
    fn full_arc_lands() {
        let mut cat = Character::new(20.0);
        cat.jump_height = 40.0;
        let mut ticks = 0;
        loop {
            ticks += 1;
            match step_arc(&mut cat, true, false) {
                ArcStep::Airborne(_) => continue,
                ArcStep::Landed => break,
                ArcStep::CutShort => panic!("full arcs are never cut"),
            }
        }
        // 10 positions per half circle, give or take float drift at the end
        assert!((10..=11).contains(&ticks));
    }

    #[test]
    fn failed_partial_arc_cuts_at_midpoint() {
        let mut cat = Character::new(20.0);
        cat.jump_height = 40.0;
        let mut last = ArcStep::Landed;
        for _ in 0..10 {
            last = step_arc(&mut cat, false, false);
            if last == ArcStep::CutShort {
                break;
            }
        }
        assert_eq!(last, ArcStep::CutShort);
        assert!(cat.jump_phase > -FRAC_PI_2 && cat.jump_phase < 0.0);
    }

    proptest! {
        #[test]
        fn charge_height_stays_in_bounds(ticks in 1usize..400) {
            let tuning = Tuning::default();
            let mut cat = Character::new(tuning.jump_height_min);
            start_charge(&mut cat, &tuning);
            for _ in 0..ticks {
                let step = step_charge(&mut cat, &tuning);
                prop_assert!(cat.jump_height >= tuning.jump_height_min);
                prop_assert!(cat.jump_height <= tuning.jump_height_max);
                if step == ChargeStep::Abandoned {
                    break;
                }
            }
        }

        #[test]
        fn verdict_matches_rule(height in 20.0f32..200.0, threshold in 20.0f32..200.0, barrier: bool) {
            let expected = if barrier {
                height > threshold || (height - threshold).abs() < 10.0
            } else {
                (height - threshold).abs() < 10.0
            };
            prop_assert_eq!(verdict(height, threshold, barrier), expected);
        }
    }
}
