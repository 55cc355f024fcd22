//! Collision resolution
//!
//! Runs after movement, against post-movement positions. A pure function:
//! the caller commits the result.

use super::state::{EntityId, Obstacle, Player, Projectile};
use crate::consts::SCORE_PER_OBSTACLE;

/// Outcome of resolving one tick's collisions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub score_delta: u64,
    /// An obstacle reached the player
    pub terminal: bool,
    /// The obstacle that ended the run (terminal only)
    pub fatal_obstacle: Option<EntityId>,
    pub destroyed_projectiles: Vec<EntityId>,
    pub destroyed_obstacles: Vec<EntityId>,
}

/// Resolve player and projectile collisions against the obstacle set
///
/// The player check comes first; if any obstacle overlaps the player the run
/// ends and nothing is destroyed or scored. Otherwise every projectile and
/// obstacle that overlaps at least one of the other kind is destroyed, and
/// each destroyed obstacle scores once regardless of how many projectiles hit it.
pub fn resolve_collisions(
    player: &Player,
    projectiles: &[Projectile],
    obstacles: &[Obstacle],
) -> Resolution {
    let player_rect = player.rect();
    if let Some(fatal) = obstacles.iter().find(|o| o.rect().overlaps(&player_rect)) {
        return Resolution {
            projectiles: projectiles.to_vec(),
            obstacles: obstacles.to_vec(),
            terminal: true,
            fatal_obstacle: Some(fatal.id),
            ..Default::default()
        };
    }

    let mut projectile_hit = vec![false; projectiles.len()];
    let mut obstacle_hit = vec![false; obstacles.len()];

    for (pi, projectile) in projectiles.iter().enumerate() {
        let p_rect = projectile.rect();
        for (oi, obstacle) in obstacles.iter().enumerate() {
            if p_rect.overlaps(&obstacle.rect()) {
                projectile_hit[pi] = true;
                obstacle_hit[oi] = true;
            }
        }
    }

    let mut resolution = Resolution::default();
    for (projectile, hit) in projectiles.iter().zip(&projectile_hit) {
        if *hit {
            resolution.destroyed_projectiles.push(projectile.id);
        } else {
            resolution.projectiles.push(*projectile);
        }
    }
    for (obstacle, hit) in obstacles.iter().zip(&obstacle_hit) {
        if *hit {
            resolution.destroyed_obstacles.push(obstacle.id);
        } else {
            resolution.obstacles.push(*obstacle);
        }
    }
    resolution.score_delta = resolution.destroyed_obstacles.len() as u64 * SCORE_PER_OBSTACLE;
    resolution
}
