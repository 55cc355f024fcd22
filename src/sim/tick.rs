//! Fixed-step simulation tick
//!
//! Order within one tick: move projectiles, move obstacles, resolve
//! collisions against the moved positions, then commit everything at once.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GameState, Obstacle, Projectile};
use crate::consts::*;

/// Advance the game state by one fixed step. No-op unless running.
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    // Movement works on copies; nothing is visible until commit
    let mut events = Vec::new();
    let moved_projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .filter_map(|p| {
            let mut p = *p;
            p.pos.y -= PROJECTILE_SPEED;
            if p.pos.y <= HUD_BAND_HEIGHT {
                events.push(GameEvent::ProjectileSpent { id: p.id });
                None
            } else {
                Some(p)
            }
        })
        .collect();

    let moved_obstacles: Vec<Obstacle> = state
        .obstacles
        .iter()
        .filter_map(|o| {
            let mut o = *o;
            o.pos.y += OBSTACLE_SPEED;
            if o.pos.y >= ARENA_HEIGHT {
                events.push(GameEvent::ObstacleEscaped { id: o.id });
                None
            } else {
                Some(o)
            }
        })
        .collect();

    let resolution = resolve_collisions(&state.player, &moved_projectiles, &moved_obstacles);

    // Commit
    state.tick += 1;
    state.projectiles = resolution.projectiles;
    state.obstacles = resolution.obstacles;
    state.events.append(&mut events);

    if resolution.terminal {
        state.finish_run(resolution.fatal_obstacle);
        return;
    }

    for id in resolution.destroyed_obstacles {
        state.events.push(GameEvent::ObstacleDestroyed { id });
    }
    if resolution.score_delta > 0 {
        state.score += resolution.score_delta;
        state.events.push(GameEvent::Scored {
            delta: resolution.score_delta,
            total: state.score,
        });
    }
}
