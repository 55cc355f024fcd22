//! Entity spawning: obstacles from the top band, projectiles from the player
//!
//! All spawners are no-ops unless the session is running.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityId, FireSource, GameEvent, GameState, Obstacle, Projectile};
use crate::consts::*;

impl GameState {
    /// Fire one projectile centred on the player's current x
    pub fn fire_projectile(&mut self, source: FireSource) -> Option<EntityId> {
        if !self.is_running() {
            return None;
        }
        if self.projectiles.len() >= MAX_PROJECTILES {
            log::debug!("Projectile cap reached, skipping {:?} shot", source);
            return None;
        }

        let id = self.next_entity_id();
        let x = self.player.center_x() - PROJECTILE_WIDTH / 2.0;
        self.projectiles.push(Projectile {
            id,
            pos: Vec2::new(x, PROJECTILE_SPAWN_Y),
        });
        self.events.push(GameEvent::ProjectileFired { id, source });
        Some(id)
    }

    /// Spawn one obstacle at a random x along the bottom of the top band
    pub fn spawn_obstacle(&mut self) -> Option<EntityId> {
        if !self.is_running() {
            return None;
        }
        let x = self.rng.random_range(0.0..=ARENA_WIDTH - OBSTACLE_WIDTH);
        self.spawn_obstacle_at(x)
    }

    /// Spawn one obstacle at a chosen x (clamped into the arena). Non-finite
    /// positions are rejected.
    pub fn spawn_obstacle_at(&mut self, x: f32) -> Option<EntityId> {
        if !self.is_running() {
            return None;
        }
        if !x.is_finite() {
            log::warn!("Ignoring obstacle spawn at non-finite x={}", x);
            return None;
        }
        if self.obstacles.len() >= MAX_OBSTACLES {
            log::debug!("Obstacle cap reached, skipping spawn");
            return None;
        }

        let id = self.next_entity_id();
        let x = x.clamp(0.0, ARENA_WIDTH - OBSTACLE_WIDTH);
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, OBSTACLE_SPAWN_Y),
        });
        self.events.push(GameEvent::ObstacleSpawned { id });
        log::debug!("Obstacle {} spawned at x={:.1}", id, x);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Lifecycle;

    fn running() -> GameState {
        let mut state = GameState::new(2024);
        state.start().unwrap();
        state
    }

    #[test]
    fn test_spawners_inert_unless_running() {
        let mut state = GameState::new(1);
        assert_eq!(state.fire_projectile(FireSource::Manual), None);
        assert_eq!(state.spawn_obstacle(), None);
        assert!(state.projectiles().is_empty());
        assert!(state.obstacles().is_empty());

        state.start().unwrap();
        state.end(None).unwrap();
        assert_eq!(state.lifecycle(), Lifecycle::Over);
        assert_eq!(state.fire_projectile(FireSource::Autofire), None);
        assert_eq!(state.spawn_obstacle_at(10.0), None);
    }

    #[test]
    fn test_projectile_centred_on_player_at_fire_time() {
        let mut state = running();
        state.set_player_x(0.0);
        state.fire_projectile(FireSource::Manual).unwrap();
        state.set_player_x(200.0);
        state.fire_projectile(FireSource::Autofire).unwrap();

        let shots = state.projectiles();
        assert_eq!(shots.len(), 2);
        assert_eq!(shots[0].pos.x, PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0);
        assert_eq!(shots[1].pos.x, 200.0 + PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0);
        assert!(shots.iter().all(|p| p.pos.y == PROJECTILE_SPAWN_Y));
    }

    #[test]
    fn test_obstacles_spawn_in_bounds() {
        let mut state = running();
        for _ in 0..200 {
            state.spawn_obstacle().unwrap();
            // Keep well under the cap
            if state.obstacles.len() > 100 {
                state.obstacles.clear();
            }
        }
        for obstacle in state.obstacles() {
            assert!(obstacle.pos.x >= 0.0);
            assert!(obstacle.pos.x <= ARENA_WIDTH - OBSTACLE_WIDTH);
            assert_eq!(obstacle.pos.y, OBSTACLE_SPAWN_Y);
        }
    }

    #[test]
    fn test_non_finite_obstacle_x_rejected() {
        let mut state = running();
        state.drain_events();
        for x in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(state.spawn_obstacle_at(x), None);
        }
        assert!(state.obstacles().is_empty());
        assert!(state.drain_events().is_empty());

        // Out-of-range finite positions still clamp
        state.spawn_obstacle_at(-50.0).unwrap();
        state.spawn_obstacle_at(1.0e9).unwrap();
        assert_eq!(state.obstacles()[0].pos.x, 0.0);
        assert_eq!(state.obstacles()[1].pos.x, ARENA_WIDTH - OBSTACLE_WIDTH);
    }

    #[test]
    fn test_obstacle_placement_is_seeded() {
        let mut a = running();
        let mut b = running();
        for _ in 0..10 {
            a.spawn_obstacle();
            b.spawn_obstacle();
        }
        assert_eq!(a.obstacles(), b.obstacles());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = running();
        let mut ids = Vec::new();
        for i in 0..20 {
            if i % 2 == 0 {
                ids.extend(state.fire_projectile(FireSource::Manual));
            } else {
                ids.extend(state.spawn_obstacle());
            }
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_caps_skip_spawns() {
        let mut state = running();
        for _ in 0..MAX_OBSTACLES {
            state.spawn_obstacle_at(0.0).unwrap();
        }
        assert_eq!(state.spawn_obstacle(), None);
        assert_eq!(state.obstacles().len(), MAX_OBSTACLES);

        for _ in 0..MAX_PROJECTILES {
            state.fire_projectile(FireSource::Autofire).unwrap();
        }
        assert_eq!(state.fire_projectile(FireSource::Manual), None);
        assert_eq!(state.projectiles().len(), MAX_PROJECTILES);
    }
}
