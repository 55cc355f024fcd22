//! Game driver
//!
//! Owns the simulation state, the periodic task scheduler and a queue of
//! inbound commands. Hosts push commands whenever input arrives and call
//! [`Game::update`] once per frame; commands are applied first, in arrival
//! order, then the periodic tasks catch up to the new time.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA;
use crate::settings::{ControlScheme, Settings};
use crate::sim::{
    AdvanceReport, DragGesture, FireSource, GameEvent, GameState, Scheduler, Snapshot, Step,
    tilt_candidate,
};

/// One inbound request from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Reset,
    Fire,
    /// Relative move (discrete controls)
    MoveBy(f32),
    /// Absolute position (continuous controls)
    SetAbsolute(f32),
    /// Drag gesture began; captures the current player x
    DragBegin,
    /// Total drag displacement since `DragBegin`
    DragMove(f32),
    DragEnd,
    /// Tilt sensor reading
    Tilt(f32),
    Step(Step),
}

/// Convert a host frame delta in milliseconds, clamped to
/// `[0, MAX_FRAME_DELTA]`. NaN counts as no time passing.
pub fn frame_delta_from_millis(dt_ms: f64) -> Duration {
    if dt_ms.is_nan() || dt_ms <= 0.0 {
        return Duration::ZERO;
    }
    let max_ms = MAX_FRAME_DELTA.as_secs_f64() * 1000.0;
    Duration::from_nanos((dt_ms.min(max_ms) * 1_000_000.0) as u64)
}

/// A running game instance
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    scheduler: Scheduler,
    settings: Settings,
    drag: DragGesture,
    commands: VecDeque<Command>,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed),
            scheduler: Scheduler::new(),
            settings,
            drag: DragGesture::default(),
            commands: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn control_scheme(&self) -> ControlScheme {
        self.settings.control_scheme
    }

    /// Switch the control scheme by name. Unknown names leave it unchanged.
    pub fn set_control_scheme(&mut self, name: &str) -> bool {
        match ControlScheme::from_str(name) {
            Some(scheme) => {
                log::info!("Control scheme: {}", scheme.as_str());
                self.settings.control_scheme = scheme;
                true
            }
            None => {
                log::warn!("Unknown control scheme {:?}", name);
                false
            }
        }
    }

    /// Queue a command for the next update
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply one command immediately
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => {
                if let Err(e) = self.state.start() {
                    log::warn!("Start ignored: {}", e);
                }
            }
            Command::Reset => match self.state.reset() {
                Ok(()) => self.drag.end(),
                Err(e) => log::warn!("Reset ignored: {}", e),
            },
            Command::Fire => {
                self.state.fire_projectile(FireSource::Manual);
            }
            Command::MoveBy(delta) => self.state.move_player_by(delta),
            Command::SetAbsolute(x) => self.state.set_player_absolute(x),
            Command::DragBegin => self.drag.begin(self.state.player().x()),
            Command::DragMove(delta) => match self.drag.candidate(delta) {
                Some(x) => self.state.set_player_x(x),
                None => log::warn!("Drag move without an active gesture"),
            },
            Command::DragEnd => self.drag.end(),
            Command::Tilt(tilt) => {
                let tilt = self.settings.effective_tilt(tilt);
                if let Some(x) = tilt_candidate(
                    self.state.player().x(),
                    tilt,
                    self.settings.tilt_sensitivity,
                    self.settings.tilt_dead_zone,
                ) {
                    self.state.set_player_x(x);
                }
            }
            Command::Step(step) => {
                self.state.move_player_by(step.delta(self.settings.button_step));
            }
        }
    }

    /// Apply queued commands, then advance the periodic tasks by `dt`
    pub fn update(&mut self, dt: Duration) -> AdvanceReport {
        while let Some(command) = self.commands.pop_front() {
            self.apply(command);
        }
        let dt = dt.min(MAX_FRAME_DELTA);
        self.scheduler.advance(&mut self.state, dt)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
