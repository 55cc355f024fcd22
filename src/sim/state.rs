//! Game state and core simulation types
//!
//! `GameState` is the single explicit simulation object. Every task (tick,
//! spawners, input) mutates it through `&mut`, one at a time, so each
//! mutation is atomic from the point of view of anything reading between
//! tasks.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Unique-within-session entity identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Waiting for an explicit start
    #[default]
    NotStarted,
    /// Active gameplay; periodic tasks run
    Running,
    /// An obstacle reached the player
    Over,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::NotStarted => "not-started",
            Lifecycle::Running => "running",
            Lifecycle::Over => "over",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle transition requested from the wrong state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    NotStartable { current: Lifecycle },
    NotResettable { current: Lifecycle },
    NotRunning { current: Lifecycle },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::NotStartable { current } => {
                write!(f, "cannot start a session that is {current}")
            }
            LifecycleError::NotResettable { current } => {
                write!(f, "cannot reset a session that is {current}")
            }
            LifecycleError::NotRunning { current } => {
                write!(f, "cannot end a session that is {current}")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

/// What produced a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireSource {
    Manual,
    Autofire,
}

/// Something the presentation layer may want to react to (sound, flash, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ObstacleSpawned { id: EntityId },
    ProjectileFired { id: EntityId, source: FireSource },
    /// Projectile left the top of the playable area
    ProjectileSpent { id: EntityId },
    /// Obstacle left the bottom of the arena
    ObstacleEscaped { id: EntityId },
    ObstacleDestroyed { id: EntityId },
    Scored { delta: u64, total: u64 },
    GameOver { score: u64, obstacle: Option<EntityId> },
    Reset,
}

/// The player's emitter. Only `x` moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self { x: PLAYER_CENTER_X }
    }
}

impl Player {
    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Player footprint at its fixed height
    pub fn rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, PLAYER_Y), PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Horizontal centre, where projectiles leave from
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + PLAYER_WIDTH / 2.0
    }
}

/// A projectile travelling up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// An obstacle falling down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }
}

/// Everything the presentation layer reads after a committed update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lifecycle: Lifecycle,
    pub score: u64,
    pub tick: u64,
    pub player_x: f32,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
}

/// Complete game state (deterministic for a given seed and command stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Obstacle placement RNG
    pub(crate) rng: Pcg32,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) score: u64,
    /// Simulation ticks run in the current session
    pub(crate) tick: u64,
    pub(crate) player: Player,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) obstacles: Vec<Obstacle>,
    /// Events since the last drain
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID (never rewound, not even by reset)
    next_id: u32,
}

impl GameState {
    /// Create a new, not yet started, game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lifecycle: Lifecycle::NotStarted,
            score: 0,
            tick: 0,
            player: Player::default(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// NotStarted -> Running
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle != Lifecycle::NotStarted {
            return Err(LifecycleError::NotStartable {
                current: self.lifecycle,
            });
        }
        self.lifecycle = Lifecycle::Running;
        self.events.push(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
        Ok(())
    }

    /// Running -> Over. `obstacle` is the one that reached the player, if any.
    pub fn end(&mut self, obstacle: Option<EntityId>) -> Result<(), LifecycleError> {
        if self.lifecycle != Lifecycle::Running {
            return Err(LifecycleError::NotRunning {
                current: self.lifecycle,
            });
        }
        self.finish_run(obstacle);
        Ok(())
    }

    /// Enter Over without checking the current lifecycle. Callers must
    /// already know the session is running.
    pub(crate) fn finish_run(&mut self, obstacle: Option<EntityId>) {
        debug_assert!(self.is_running());
        self.lifecycle = Lifecycle::Over;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            obstacle,
        });
        log::info!(
            "Game over after {} ticks, score {}",
            self.tick,
            self.score
        );
    }

    /// Over -> NotStarted, clearing score, entities and player position
    pub fn reset(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle != Lifecycle::Over {
            return Err(LifecycleError::NotResettable {
                current: self.lifecycle,
            });
        }
        self.lifecycle = Lifecycle::NotStarted;
        self.score = 0;
        self.tick = 0;
        self.projectiles = Vec::new();
        self.obstacles = Vec::new();
        self.player = Player::default();
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
        Ok(())
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Copy of everything observable
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lifecycle: self.lifecycle,
            score: self.score,
            tick: self.tick,
            player_x: self.player.x,
            projectiles: self.projectiles.clone(),
            obstacles: self.obstacles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_state() -> GameState {
        let mut state = GameState::new(7);
        state.start().unwrap();
        state.player.x = 12.0;
        state.score = 40;
        state.tick = 99;
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(10.0, 200.0),
        });
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(10.0, 100.0),
        });
        state.end(Some(id)).unwrap();
        state
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(1);
        assert_eq!(state.lifecycle(), Lifecycle::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.player().x(), PLAYER_CENTER_X);
        assert!(state.projectiles().is_empty());
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_lifecycle_round_trip() {
        let mut state = GameState::new(1);
        state.start().unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::Running);
        state.end(None).unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::Over);
        state.reset().unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::NotStarted);
        state.start().unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn test_reset_completeness() {
        let mut state = finished_state();
        state.reset().unwrap();
        assert_eq!(state.score(), 0);
        assert!(state.projectiles().is_empty());
        assert!(state.obstacles().is_empty());
        assert_eq!(state.player().x(), PLAYER_CENTER_X);
        assert_eq!(state.lifecycle(), Lifecycle::NotStarted);
        assert_eq!(state.tick_count(), 0);
    }

    #[test]
    fn test_player_center_is_arena_center() {
        let player = Player::default();
        assert_eq!(player.center_x(), ARENA_WIDTH / 2.0);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut state = GameState::new(1);
        assert_eq!(
            state.reset(),
            Err(LifecycleError::NotResettable {
                current: Lifecycle::NotStarted
            })
        );
        assert!(state.end(None).is_err());

        state.start().unwrap();
        assert_eq!(
            state.start(),
            Err(LifecycleError::NotStartable {
                current: Lifecycle::Running
            })
        );
        assert!(state.reset().is_err());
        assert_eq!(state.lifecycle(), Lifecycle::Running);

        let mut over = finished_state();
        assert!(over.start().is_err());
        assert_eq!(over.score(), 40);
        assert_eq!(over.obstacles().len(), 1);
    }

    #[test]
    fn test_ids_survive_reset() {
        let mut state = finished_state();
        let before = state.next_entity_id();
        state.reset().unwrap();
        let after = state.next_entity_id();
        assert!(after > before);
    }

    #[test]
    fn test_events_drain() {
        let mut state = finished_state();
        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::Started));
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver { score: 40, .. })
        ));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = LifecycleError::NotResettable {
            current: Lifecycle::Running,
        };
        assert_eq!(err.to_string(), "cannot reset a session that is running");
    }
}
