//! Downpour entry point
//!
//! Native builds run a headless autopilot session and log the outcome. The
//! browser build is driven through `downpour::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use downpour::consts::*;
    use downpour::sim::{GameEvent, Lifecycle};
    use downpour::{Command, Game, Settings};

    env_logger::init();
    log::info!("Downpour (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("Headless autopilot session, seed {}", seed);

    let mut game = Game::new(seed, Settings::load());
    log::info!("Control scheme: {}", game.control_scheme().as_str());
    game.push(Command::Start);

    let frame = TICK_PERIOD;
    let limit = Duration::from_secs(120);
    let mut elapsed = Duration::ZERO;
    let mut destroyed = 0u32;

    while elapsed < limit {
        // Line up under the lowest obstacle
        if let Some(target) = game
            .state()
            .obstacles()
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        {
            let x = target.pos.x + OBSTACLE_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
            game.push(Command::SetAbsolute(x));
        }

        game.update(frame);
        elapsed += frame;

        for event in game.drain_events() {
            match event {
                GameEvent::ObstacleDestroyed { .. } => destroyed += 1,
                GameEvent::GameOver { score, obstacle } => {
                    log::info!("Hit by obstacle {:?} with score {}", obstacle, score);
                }
                _ => {}
            }
        }

        if game.state().lifecycle() == Lifecycle::Over {
            break;
        }
    }

    let state = game.state();
    println!(
        "{} after {:.1}s: score {}, {} obstacles destroyed, {} ticks",
        state.lifecycle(),
        elapsed.as_secs_f32(),
        state.score(),
        destroyed,
        state.tick_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is downpour::web, this is just to satisfy the compiler
}
