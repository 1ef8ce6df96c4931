//! Per-tick render dispatch

use super::Renderer;
use crate::sim::{CharacterFrame, Frame, TargetKind, TargetSprite};

/// Draw one tick: clear, targets, optional preview, then the character on top
pub fn dispatch(
    frame: &Frame,
    renderer: &mut dyn Renderer,
    frame_count: usize,
    show_trajectory: bool,
) {
    renderer.clear();

    draw_target(renderer, &frame.target);
    if let Some(fleeing) = &frame.fleeing {
        draw_target(renderer, fleeing);
    }

    if show_trajectory {
        if let Some(preview) = &frame.trajectory {
            renderer.draw_trajectory(preview.origin.x, preview.origin.y, preview.height);
        }
    }

    let character = match frame.character {
        CharacterFrame::Indexed(_) if frame_count == 0 => CharacterFrame::Still,
        CharacterFrame::Indexed(index) => CharacterFrame::Indexed(index.min(frame_count - 1)),
        CharacterFrame::Still => CharacterFrame::Still,
    };
    renderer.draw_character(character, frame.character_pos.x, frame.character_pos.y);
}

fn draw_target(renderer: &mut dyn Renderer, sprite: &TargetSprite) {
    if sprite.kind == TargetKind::None {
        return;
    }
    renderer.draw_target(
        sprite.kind,
        sprite.pos.x,
        sprite.pos.y,
        sprite.height,
        sprite.missed,
    );
}
