//! Platform collaborators
//!
//! Handles browser/native differences for:
//! - Drawing (canvas 2D on web, recording natively)
//! - Sprite loading
//! - Background motion
//! - Input listeners
//! - HUD callbacks

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
