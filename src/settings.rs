//! Player control preferences
//!
//! Persisted in LocalStorage on the web. Gameplay constants are not settings;
//! they live in `consts`.

use serde::{Deserialize, Serialize};

/// Which input device drives the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Touch/mouse drag, relative to where the drag began
    #[default]
    Drag,
    /// Device tilt sensor
    Tilt,
    /// Left/right buttons or keys
    Buttons,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Drag => "Drag",
            ControlScheme::Tilt => "Tilt",
            ControlScheme::Buttons => "Buttons",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drag" | "touch" => Some(ControlScheme::Drag),
            "tilt" | "gyro" => Some(ControlScheme::Tilt),
            "buttons" | "keys" => Some(ControlScheme::Buttons),
            _ => None,
        }
    }
}

/// Control settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active control scheme (presentation hint; every source is accepted)
    pub control_scheme: ControlScheme,

    // === Tilt ===
    /// Pixels moved per reading at full tilt
    pub tilt_sensitivity: f32,
    /// Readings with smaller magnitude are ignored
    pub tilt_dead_zone: f32,
    /// Flip tilt direction
    pub invert_tilt: bool,

    // === Buttons ===
    /// Pixels moved per button press
    pub button_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::Drag,
            tilt_sensitivity: 20.0,
            tilt_dead_zone: 0.05,
            invert_tilt: false,
            button_step: 30.0,
        }
    }
}

impl Settings {
    /// Signed tilt after applying the inversion preference
    pub fn effective_tilt(&self, tilt: f32) -> f32 {
        if self.invert_tilt { -tilt } else { tilt }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "downpour_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
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
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
