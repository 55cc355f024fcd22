//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Virtual clock for periodic tasks
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve_collisions};
pub use input::{DragGesture, Step, clamp_player_x, tilt_candidate};
pub use rect::Rect;
pub use schedule::{AdvanceReport, PeriodicTimer, Scheduler, Task};
pub use state::{
    EntityId, FireSource, GameEvent, GameState, Lifecycle, LifecycleError, Obstacle, Player,
    Projectile, Snapshot,
};
pub use tick::tick;
