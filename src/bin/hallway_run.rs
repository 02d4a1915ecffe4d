//! Hallway Run - scripted headless demo
//!
//! Run with: `cargo run --bin hallway_run [config.json]`
//!
//! Drives ten seconds of the hallway course at 60 Hz with a fixed key script:
//! sprint down the hall, jump, strafe into a wall section, jump off it, fire
//! and reload. Logs a summary line every simulated second.
//!
//! Logging:
//! - `RUST_LOG=debug` shows wall-run, landing and weapon events
//! - `LOG_FORMAT=json` switches to JSON lines

use std::collections::HashSet;
use std::path::Path;

use glam::{Vec2, Vec3};
use tracing::{debug, info};

use wallrunner_engine::config::{ConfigError, GameConfig};
use wallrunner_engine::input::{KeyBindings, KeyCode};
use wallrunner_engine::physics::horizontal_speed;
use wallrunner_engine::presentation::PresentationEvent;
use wallrunner_engine::session::GameSession;
use wallrunner_engine::world::HallwayLevel;

const TICK_HZ: u32 = 60;
const RUN_SECONDS: u32 = 10;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Keys held and pointer motion for tick `tick`.
fn script(tick: u32) -> (HashSet<KeyCode>, Vec2) {
    let t = tick as f32 / TICK_HZ as f32;
    let mut keys = HashSet::new();
    let mut look = Vec2::ZERO;

    if t < 9.0 {
        keys.insert(KeyCode::W);
    }
    // Edge-triggered jumps: hold Space for a single tick
    if tick == 2 * TICK_HZ || tick == 4 * TICK_HZ || tick == 6 * TICK_HZ {
        keys.insert(KeyCode::Space);
    }
    if (2.0..4.0).contains(&t) {
        keys.insert(KeyCode::D);
        look.x = 2.0;
    }
    if (4.0..4.5).contains(&t) {
        look.x = -8.0;
    }
    if (5.0..6.5).contains(&t) {
        keys.insert(KeyCode::MouseLeft);
    }
    if tick == 7 * TICK_HZ {
        keys.insert(KeyCode::R);
    }

    (keys, look)
}

fn main() -> Result<(), ConfigError> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            GameConfig::load(Path::new(&path))?
        }
        None => GameConfig::default(),
    };

    let level = HallwayLevel::new(config.level);
    let mut session = GameSession::new(level, config);
    session.spawn_enemy(Vec3::new(-3.0, 1.0, -40.0));
    session.spawn_enemy(Vec3::new(3.0, 1.0, -70.0));

    let bindings = KeyBindings::new();
    let dt = 1.0 / TICK_HZ as f32;

    let mut wall_runs = 0u32;
    let mut wall_jumps = 0u32;
    let mut shots = 0u32;

    for tick in 0..RUN_SECONDS * TICK_HZ {
        let (keys, look) = script(tick);
        let input = bindings.resolve(&keys, look);
        let output = session.update(dt, &input);

        for event in &output.events {
            match event {
                PresentationEvent::WallRunStarted { .. } => wall_runs += 1,
                PresentationEvent::WallJumped => wall_jumps += 1,
                PresentationEvent::Fired { .. } => shots += 1,
                _ => {}
            }
            debug!(tick, ?event, "event");
        }

        if (tick + 1) % TICK_HZ == 0 {
            let hud = output.hud();
            info!(
                second = (tick + 1) / TICK_HZ,
                x = output.position.x,
                y = output.position.y,
                z = output.position.z,
                speed = horizontal_speed(session.player().velocity()),
                grounded = output.grounded,
                wall_running = output.wall_running,
                health = ?hud.health_tier,
                ammo = %hud.ammo_label(),
                projectiles = output.projectiles.len(),
                "summary"
            );
        }
    }

    info!(
        wall_runs,
        wall_jumps,
        shots,
        enemies_left = session.enemies().len(),
        "run complete"
    );
    Ok(())
}
