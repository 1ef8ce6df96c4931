//! Browser collaborators (wasm32 only)
//!
//! Canvas 2D drawing, image sprites, CSS background scrolling, DOM listeners and the
//! DOM HUD. `collaborators` wires them all up from the page.

mod background;
mod canvas;
mod hud;
mod input;

pub use background::CssBackground;
pub use canvas::{CanvasRenderer, SpriteSheet};
pub use hud::DomHud;
pub use input::WebInput;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use crate::consts::CANVAS_ELEMENT_ID;
use crate::runtime::Collaborators;

/// Element id of the scrolling background
pub const BACKGROUND_ELEMENT_ID: &str = "game_background";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(&'static str),
    #[error("element #{0} is not a {1}")]
    WrongElement(&'static str, &'static str),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("failed to create image element for {0}")]
    Image(String),
}

pub fn window() -> Result<Window, SetupError> {
    web_sys::window().ok_or(SetupError::NoWindow)
}

pub fn document() -> Result<Document, SetupError> {
    window()?.document().ok_or(SetupError::NoDocument)
}

/// Element by id, cast to `T`
pub fn element<T: JsCast>(id: &'static str, kind: &'static str) -> Result<T, SetupError> {
    document()?
        .get_element_by_id(id)
        .ok_or(SetupError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| SetupError::WrongElement(id, kind))
}

/// The drawing surface and its 2D context
pub fn surface() -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), SetupError> {
    let canvas: HtmlCanvasElement = element(CANVAS_ELEMENT_ID, "canvas")?;
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(SetupError::NoContext)?;
    Ok((canvas, ctx))
}

/// Build every browser collaborator from the page
pub fn collaborators() -> Result<Collaborators, SetupError> {
    let (canvas, ctx) = surface()?;
    let sprites = SpriteSheet::load()?;
    let background: HtmlElement = element(BACKGROUND_ELEMENT_ID, "html element")?;

    Ok(Collaborators {
        renderer: Box::new(CanvasRenderer::new(ctx, sprites.clone())),
        sprites: Box::new(sprites),
        background: Box::new(CssBackground::new(window()?, background)),
        input: Box::new(WebInput::new(window()?, canvas)),
    })
}
