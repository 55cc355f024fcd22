//! Browser facade
//!
//! Exposes the inbound commands and the outbound snapshot to a JS host. The
//! host owns rendering and input devices; it forwards input as commands and
//! calls `update` from its animation frame callback.

use wasm_bindgen::prelude::*;

use crate::sim::Step;
use crate::{Command, Game, Settings, frame_delta_from_millis};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Downpour core loaded");
}

/// Game handle owned by the JS host
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            game: Game::new(seed, Settings::load()),
        }
    }

    pub fn start(&mut self) {
        self.game.push(Command::Start);
    }

    pub fn reset(&mut self) {
        self.game.push(Command::Reset);
    }

    pub fn fire(&mut self) {
        self.game.push(Command::Fire);
    }

    pub fn move_by(&mut self, delta: f32) {
        self.game.push(Command::MoveBy(delta));
    }

    pub fn set_x(&mut self, x: f32) {
        self.game.push(Command::SetAbsolute(x));
    }

    pub fn step_left(&mut self) {
        self.game.push(Command::Step(Step::Left));
    }

    pub fn step_right(&mut self) {
        self.game.push(Command::Step(Step::Right));
    }

    pub fn drag_begin(&mut self) {
        self.game.push(Command::DragBegin);
    }

    pub fn drag_move(&mut self, delta_from_start: f32) {
        self.game.push(Command::DragMove(delta_from_start));
    }

    pub fn drag_end(&mut self) {
        self.game.push(Command::DragEnd);
    }

    pub fn tilt(&mut self, reading: f32) {
        self.game.push(Command::Tilt(reading));
    }

    /// Apply queued input and advance by the frame delta (milliseconds)
    pub fn update(&mut self, dt_ms: f64) {
        self.game.update(frame_delta_from_millis(dt_ms));
    }

    /// Replace control settings from JSON and persist them
    pub fn set_settings_json(&mut self, json: &str) -> bool {
        match Settings::from_json(json) {
            Ok(settings) => {
                settings.save();
                self.game.set_settings(settings);
                true
            }
            Err(e) => {
                log::warn!("Rejected settings: {}", e);
                false
            }
        }
    }

    pub fn control_scheme(&self) -> String {
        self.game.control_scheme().as_str().to_string()
    }

    /// Switch and persist the control scheme; false for unknown names
    pub fn set_control_scheme(&mut self, name: &str) -> bool {
        if !self.game.set_control_scheme(name) {
            return false;
        }
        self.game.settings().save();
        true
    }

    pub fn score(&self) -> f64 {
        self.game.state().score() as f64
    }

    pub fn lifecycle(&self) -> String {
        self.game.state().lifecycle().as_str().to_string()
    }

    /// Current state as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
