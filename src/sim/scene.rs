//! Scene direction: the approach of a new target, the exit of the old one, and the
//! character's walk back to its rest position.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{Action, Character, GameState, TargetKind, TargetRecord, Targets};
use super::timers::TimerPhase;
use crate::consts::*;

/// Per-tick displacement of a target leaving the screen
pub fn runaway_delta<R: Rng>(
    kind: TargetKind,
    movement_speed: f32,
    runaway_speed: f32,
    rng: &mut R,
) -> Vec2 {
    match kind {
        // Flutters upward at a random rate
        TargetKind::Butterfly => Vec2::new(-runaway_speed, -rng.random::<f32>() * 6.0),
        TargetKind::Bird => Vec2::new(-runaway_speed, -4.0),
        TargetKind::Grasshopper => Vec2::new(-runaway_speed, 0.0),
        // Mice bolt back the way they came
        TargetKind::Mouse => Vec2::new(runaway_speed, 0.0),
        // Barriers scroll away with the ground
        _ => Vec2::new(-movement_speed, 0.0),
    }
}

/// Advance one scene tick. Returns the fleeing previous target to draw, if any.
pub fn advance<R: Rng>(
    state: &mut GameState,
    character: &mut Character,
    targets: &mut Targets,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<TargetRecord> {
    let mut fleeing = None;
    if targets.previous.kind != TargetKind::None {
        let delta = runaway_delta(
            targets.previous.kind,
            state.movement_speed,
            state.runaway_speed,
            rng,
        );
        targets.previous.pos += delta;
        fleeing = Some(targets.previous);

        let x = targets.previous.pos.x;
        if !(0.0..=CANVAS_WIDTH).contains(&x) {
            targets.previous.kind = TargetKind::None;
        }
    }

    if character.pos.x > CAT_REST_X {
        let stride = (state.movement_speed / 3.0 * 2.0).floor();
        character.pos.x = (character.pos.x - stride).max(CAT_REST_X);
    } else if !character.at_rest_position {
        character.at_rest_position = true;
        // Slower scroll once the cat stands still
        let interval_ms = (state.tick_interval() as f32 / 2.0 * 3.0).floor() as u32;
        events.push(GameEvent::BackgroundStart { interval_ms });
    }

    targets.current.pos.x -= state.movement_speed;
    if targets.current.pos.x <= targets.stop_x {
        targets.current.pos.x = targets.stop_x;
        arrive(state, character, targets, events);
    }

    fleeing
}

/// The current target reached its stop position
fn arrive(
    state: &mut GameState,
    character: &Character,
    targets: &mut Targets,
    events: &mut Vec<GameEvent>,
) {
    events.push(GameEvent::BackgroundStop);
    // Nothing animates outside a scene
    targets.previous.kind = TargetKind::None;

    if !targets.is_barrier {
        state
            .timers
            .schedule(TimerPhase::Timeout, targets.runaway_delay_ms);
        state.awaiting_engagement = true;
    }

    if character.is_at_rest_x() {
        state.action = Action::Stay;
        state.hold = false;
    } else {
        state.action = Action::Return;
    }
}

/// Walk the character back one tick. Returns true once it is standing at rest.
pub fn retreat(state: &mut GameState, character: &mut Character) -> bool {
    if character.pos.x > CAT_REST_X {
        character.pos.x = (character.pos.x - state.movement_speed).max(CAT_REST_X);
        return false;
    }
    character.at_rest_position = true;
    state.action = Action::Stay;
    state.hold = false;
    true
}
