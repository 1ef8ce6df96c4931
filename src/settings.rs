//! Player preferences
//!
//! Persisted separately from gameplay (which is never saved) in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// `KeyboardEvent.code` that charges (down) and jumps (up)
    pub charge_key: String,
    /// `KeyboardEvent.code` that pauses on key up
    pub pause_key: String,

    // === Visuals ===
    /// Draw the arc preview while charging
    pub show_trajectory: bool,
    /// Scroll the background during scenes
    pub background_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            charge_key: "Space".to_string(),
            pause_key: "Escape".to_string(),
            show_trajectory: true,
            background_motion: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pounce_settings";

    /// Parse stored JSON, falling back to defaults for anything unusable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("Ignoring stored settings: {}", err);
                Self::default()
            }
        }
    }

    /// Replace unusable bindings with the defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.charge_key.is_empty() {
            log::warn!("Empty charge key, using {}", defaults.charge_key);
            self.charge_key = defaults.charge_key.clone();
        }
        if self.pause_key.is_empty() || self.pause_key == self.charge_key {
            log::warn!("Pause key must differ from charge key, using defaults");
            self.charge_key = defaults.charge_key;
            self.pause_key = defaults.pause_key;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} store natively, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
