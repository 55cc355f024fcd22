//! Downpour - a falling-obstacle arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `game`: Command queue + cooperative scheduler driving the simulation
//! - `settings`: Player control preferences
//! - `web`: Browser facade (wasm32 only)

pub mod game;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Command, Game, frame_delta_from_millis};
pub use settings::{ControlScheme, Settings};

/// Game configuration constants
///
/// Screen-space coordinates: x grows right, y grows down. Every entity
/// position is the top-left corner of its footprint.
pub mod consts {
    use std::time::Duration;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 360.0;
    pub const ARENA_HEIGHT: f32 = 640.0;
    /// Height of the HUD/exclusion band at the top of the arena
    pub const HUD_BAND_HEIGHT: f32 = 60.0;

    /// Player footprint
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player's bottom edge and the arena bottom
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    /// Fixed top edge of the player
    pub const PLAYER_Y: f32 = ARENA_HEIGHT - PLAYER_BOTTOM_OFFSET - PLAYER_HEIGHT;
    /// Largest legal player x
    pub const PLAYER_MAX_X: f32 = ARENA_WIDTH - PLAYER_WIDTH;
    /// Player x that centers the player in the arena
    pub const PLAYER_CENTER_X: f32 = PLAYER_MAX_X / 2.0;

    /// Projectile footprint
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    /// Projectiles leave from just above the player
    pub const PROJECTILE_SPAWN_Y: f32 = PLAYER_Y - PROJECTILE_HEIGHT;

    /// Obstacle footprint
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Obstacles appear at the bottom of the exclusion band
    pub const OBSTACLE_SPAWN_Y: f32 = HUD_BAND_HEIGHT;

    /// Per-tick displacement (pixels). Projectiles outrun obstacles.
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const OBSTACLE_SPEED: f32 = 5.0;

    /// Points per destroyed obstacle
    pub const SCORE_PER_OBSTACLE: u64 = 10;

    /// Periodic task cadences
    pub const TICK_PERIOD: Duration = Duration::from_millis(16);
    pub const OBSTACLE_SPAWN_PERIOD: Duration = Duration::from_millis(700);
    pub const AUTOFIRE_PERIOD: Duration = Duration::from_millis(50);

    /// Largest wall-clock delta accepted per update (prevents spiral of death)
    pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);
    /// Maximum simulation ticks per scheduler advance
    pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

    /// Safety caps on live entities; spawns past these are skipped
    pub const MAX_OBSTACLES: usize = 256;
    pub const MAX_PROJECTILES: usize = 512;
}
