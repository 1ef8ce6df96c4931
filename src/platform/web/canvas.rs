//! Canvas 2D renderer and image sprite sheet

use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::SetupError;
use crate::consts::*;
use crate::renderer::{Renderer, SpriteSource};
use crate::sim::{BARRIER_KINDS, CharacterFrame, TargetKind, VICTIM_KINDS};

const CAT_FRAMES: usize = 3;

struct Images {
    frames: Vec<HtmlImageElement>,
    still: HtmlImageElement,
    targets: HashMap<TargetKind, HtmlImageElement>,
}

/// Character and target images. Clones share the same elements.
#[derive(Clone)]
pub struct SpriteSheet {
    images: Rc<Images>,
}

fn image(src: String) -> Result<HtmlImageElement, SetupError> {
    let img = HtmlImageElement::new().map_err(|_| SetupError::Image(src.clone()))?;
    img.set_src(&src);
    Ok(img)
}

fn loaded(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

impl SpriteSheet {
    /// Start loading every image; `is_loading` reports when they are ready
    pub fn load() -> Result<Self, SetupError> {
        let frames = (0..CAT_FRAMES)
            .map(|i| image(format!("assets/cat/frame_{}.png", i)))
            .collect::<Result<Vec<_>, _>>()?;
        let still = image("assets/cat/still.png".to_string())?;

        let mut targets = HashMap::new();
        for kind in VICTIM_KINDS.into_iter().chain(BARRIER_KINDS) {
            targets.insert(kind, image(format!("assets/targets/{}.png", kind.as_str()))?);
        }
        log::info!("Loading {} sprites", CAT_FRAMES + 1 + targets.len());

        Ok(Self {
            images: Rc::new(Images {
                frames,
                still,
                targets,
            }),
        })
    }
}

impl SpriteSource for SpriteSheet {
    fn is_loading(&self) -> bool {
        let images = &self.images;
        !(images.frames.iter().all(loaded)
            && loaded(&images.still)
            && images.targets.values().all(loaded))
    }

    fn frame_count(&self) -> usize {
        self.images.frames.len()
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: SpriteSheet) -> Self {
        Self { ctx, sprites }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
    }

    fn draw_target(&mut self, kind: TargetKind, x: f32, y: f32, height: f32, missed: bool) {
        let Some(img) = self.sprites.images.targets.get(&kind) else {
            return;
        };
        let (x, y, h) = (x as f64, y as f64, height as f64);
        if missed {
            self.ctx.set_global_alpha(0.6);
        }
        // Targets stand on the ground line, scaled to their height
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, x, y - h, h, h);
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_character(&mut self, frame: CharacterFrame, x: f32, y: f32) {
        let images = &self.sprites.images;
        let img = match frame {
            CharacterFrame::Indexed(index) => images.frames.get(index).unwrap_or(&images.still),
            CharacterFrame::Still => &images.still,
        };
        let _ = self
            .ctx
            .draw_image_with_html_image_element(img, x as f64, y as f64);
    }

    fn draw_trajectory(&mut self, x: f32, y: f32, height: f32) {
        let r = height as f64;
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str("rgba(255, 255, 255, 0.5)");
        self.ctx.set_line_width(2.0);
        let _ = self.ctx.arc(x as f64 + r, y as f64, r, PI, 2.0 * PI);
        self.ctx.stroke();
    }
}
