//! What one tick should draw
//!
//! Built by the engine after it has stepped, consumed by render dispatch.

use glam::Vec2;

use super::state::{TargetKind, TargetRecord};

/// Which character image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterFrame {
    /// Plain sprite used while walking
    Still,
    /// Animation frame by index
    Indexed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSprite {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub height: f32,
    /// Drawn as escaped (the attempt on it failed)
    pub missed: bool,
}

impl TargetSprite {
    pub fn from_record(record: &TargetRecord, missed: bool) -> Self {
        Self {
            kind: record.kind,
            pos: record.pos,
            height: record.height,
            missed,
        }
    }
}

/// Arc preview while charging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPreview {
    pub origin: Vec2,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub target: TargetSprite,
    pub fleeing: Option<TargetSprite>,
    pub trajectory: Option<TrajectoryPreview>,
    pub character: CharacterFrame,
    pub character_pos: Vec2,
}
