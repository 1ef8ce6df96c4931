//! DOM HUD handlers

use web_sys::Document;

use crate::sim::TargetKind;
use crate::ui::GameHandlers;

pub struct DomHud {
    document: Document,
}

impl DomHud {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, id: &str, class: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }
}

impl GameHandlers for DomHud {
    fn handle_pause(&mut self) {
        self.set_class("pause-menu", "");
    }

    fn handle_game_over(&mut self) {
        self.set_class("game-over", "");
    }

    fn set_level(&mut self, level: u32) {
        self.set_text("#hud-level .hud-value", &(level + 1).to_string());
    }

    fn set_score(&mut self, score: i32) {
        self.set_text("#hud-score .hud-value", &score.to_string());
    }

    fn set_tooltip(&mut self, text: &str) {
        self.set_text("#tooltip", text);
        self.set_class("tooltip", if text.is_empty() { "hidden" } else { "" });
    }

    fn set_caught(&mut self, kind: TargetKind, count: u32) {
        let selector = format!("#caught-{} .hud-value", kind.as_str());
        self.set_text(&selector, &count.to_string());
    }
}
