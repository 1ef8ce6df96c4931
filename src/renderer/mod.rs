//! Drawing collaborators
//!
//! The engine describes each tick as a `Frame`; `dispatch` turns that into calls on a
//! `Renderer`. Sprite loading and the scrolling background sit behind their own traits
//! so the engine can run headless.

pub mod dispatch;

pub use dispatch::dispatch;

use crate::sim::{CharacterFrame, TargetKind};

/// Something that can draw the game onto a 2D surface
pub trait Renderer {
    fn clear(&mut self);

    fn draw_target(&mut self, kind: TargetKind, x: f32, y: f32, height: f32, missed: bool);

    fn draw_character(&mut self, frame: CharacterFrame, x: f32, y: f32);

    /// Arc preview while charging. Optional.
    fn draw_trajectory(&mut self, _x: f32, _y: f32, _height: f32) {}
}

/// Character sprite frames, possibly still loading
pub trait SpriteSource {
    fn is_loading(&self) -> bool;

    /// Number of indexable animation frames
    fn frame_count(&self) -> usize;
}

/// Scrolling background driver
pub trait BackgroundMotion {
    fn start(&mut self, interval_ms: u32);

    fn stop(&mut self);
}
