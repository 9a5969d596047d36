//! Headless Course Runner
//!
//! Run with: `cargo run --bin headless_run [physics.json]`
//!
//! Drives the physics core over a built-in course with no window and no
//! audio device. Frames arrive with a deterministic jitter around 60 fps and
//! the music clock is the sum of the frame deltas. An autopilot plays the
//! course: it jumps spikes and platforms in Cube mode, hovers in Ship mode
//! and flips past spikes in Ball mode. Portals, pads and checkpoints are
//! resolved here through the driver's control operations, the way a game
//! layer would.
//!
//! The autopilot fumbles the first spike after the first checkpoint on its
//! first attempt, so a run shows a death and a checkpoint respawn.
//!
//! Logging: `RUST_LOG=debug` shows mode switches, gravity flips and
//! respawns; `RUST_LOG=trace` adds per-tick collision resolution.

use std::collections::HashSet;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_runner_engine::game::{Checkpoint, PhysicsEvent, TickDriver};
use pulse_runner_engine::input::{InputState, JumpInputTracker};
use pulse_runner_engine::physics::{
    CategoryMask, Collidable, CollisionCategory, ObstacleKind, query_overlaps,
};
use pulse_runner_engine::player::{ModeId, PhysicsConfig};
use pulse_runner_engine::world::{SpeedTier, WorldConfig};

// ============================================================================
// CONSTANTS
// ============================================================================

const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Frame-time multipliers cycled to imitate an uneven render loop.
const FRAME_JITTER: [f32; 8] = [1.0, 1.12, 0.91, 1.04, 0.86, 1.18, 0.95, 0.94];

const MAX_FRAMES: usize = 60 * 60;
const MAX_RETRIES: u32 = 3;

const LEVEL_LENGTH: f32 = 6000.0;

/// Launch speed of a jump pad, as a multiple of the jump force.
const PAD_LAUNCH_SCALE: f32 = 1.4;

/// Launch speed of a jump orb, as a multiple of the jump force.
const ORB_LAUNCH_SCALE: f32 = 1.1;

/// Ship autopilot cruising height (center Y).
const SHIP_CRUISE_Y: f32 = -100.0;

/// Seconds of vertical velocity the ship autopilot looks ahead, so it lets
/// go of thrust before overshooting the cruising height.
const SHIP_LEAD_TIME: f32 = 0.15;

/// Distance window (player right edge to obstacle left edge) in which the
/// cube autopilot jumps.
const CUBE_JUMP_WINDOW: (f32, f32) = (30.0, 60.0);

/// Look-ahead of the ball autopilot.
const BALL_LOOKAHEAD: f32 = 120.0;

// ============================================================================
// COURSE
// ============================================================================

fn ground_spike(x: f32) -> Collidable {
    Collidable::new(ObstacleKind::Spike, Vec2::new(x, -15.0), Vec2::splat(30.0))
}

/// Full-height trigger column (portals and checkpoints).
fn gate(kind: ObstacleKind, x: f32) -> Collidable {
    Collidable::new(kind, Vec2::new(x, -150.0), Vec2::new(30.0, 300.0))
}

fn slab(left: f32, top: f32, width: f32, height: f32) -> Collidable {
    Collidable::from_corner(ObstacleKind::Slab, Vec2::new(left, top), Vec2::new(width, height))
}

/// The built-in course. The default ground plane (y = 0) is the floor.
fn build_course() -> Vec<Collidable> {
    vec![
        // Cube warm-up
        ground_spike(600.0),
        ground_spike(900.0),
        Collidable::new(ObstacleKind::JumpPad, Vec2::new(1100.0, -4.0), Vec2::new(30.0, 8.0)),
        slab(1300.0, -40.0, 400.0, 40.0),
        gate(ObstacleKind::Checkpoint, 2000.0),
        ground_spike(2150.0),
        // Ship
        gate(ObstacleKind::ShipPortal, 2300.0),
        ground_spike(2600.0),
        ground_spike(2800.0),
        gate(ObstacleKind::CubePortal, 3200.0),
        // Inverted gravity under a ceiling
        slab(3550.0, -330.0, 650.0, 30.0),
        gate(ObstacleKind::GravityPortal, 3600.0),
        gate(ObstacleKind::GravityPortal, 4100.0),
        gate(ObstacleKind::Checkpoint, 4300.0),
        // Ball under a ceiling
        slab(4350.0, -230.0, 750.0, 30.0),
        gate(ObstacleKind::BallPortal, 4400.0),
        ground_spike(4700.0),
        // Fast finish
        gate(ObstacleKind::SpeedPortal(SpeedTier::Fast), 5100.0),
        gate(ObstacleKind::CubePortal, 5300.0),
        ground_spike(5600.0),
        Collidable::new(ObstacleKind::Decoration, Vec2::new(5900.0, -60.0), Vec2::splat(60.0)),
    ]
}

// ============================================================================
// AUTOPILOT
// ============================================================================

/// Distance from the player's right edge to the nearest obstacle of
/// `category` whose left edge is still ahead and which rises above the floor
/// band the player occupies.
fn distance_ahead(
    driver: &TickDriver,
    obstacles: &[Collidable],
    category: CollisionCategory,
) -> Option<f32> {
    let hitbox = driver.get_hitbox();
    obstacles
        .iter()
        .filter(|o| o.active && o.category == category)
        .map(|o| o.visual_box())
        .filter(|b| b.bottom() > hitbox.top && b.top < hitbox.bottom() + 1.0)
        .map(|b| b.left - hitbox.right())
        .filter(|d| *d >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// Decides the raw jump level for this frame.
fn autopilot(driver: &TickDriver, obstacles: &[Collidable], skip_x: Option<f32>) -> bool {
    let state = driver.state();
    match driver.mode() {
        ModeId::Cube => {
            let in_window = |d: f32| d >= CUBE_JUMP_WINDOW.0 && d <= CUBE_JUMP_WINDOW.1;
            let spike = distance_ahead(driver, obstacles, CollisionCategory::Hazard);
            let platform = distance_ahead(driver, obstacles, CollisionCategory::Solid);
            let fumbling = skip_x.is_some_and(|x| (x - state.position.x).abs() < 200.0);
            state.is_grounded
                && ((spike.is_some_and(in_window) && !fumbling) || platform.is_some_and(in_window))
        }
        ModeId::Ship => state.position.y + state.velocity.y * SHIP_LEAD_TIME > SHIP_CRUISE_Y,
        ModeId::Ball => {
            let threat = distance_ahead(driver, obstacles, CollisionCategory::Hazard)
                .is_some_and(|d| d <= BALL_LOOKAHEAD)
                || obstacles.iter().any(|o| {
                    o.category == CollisionCategory::Hazard
                        && (o.center.x - state.position.x).abs() < BALL_LOOKAHEAD * 0.5
                });
            state.is_grounded && threat != state.gravity_inverted
        }
    }
}

// ============================================================================
// CALLER-SIDE OBJECT RESOLUTION
// ============================================================================

/// Applies portals, pads, orbs and checkpoints the player just touched.
///
/// Only obstacles entered this tick (not overlapped the tick before) act,
/// except orbs, which fire on a jump press while overlapped.
fn resolve_interactions(
    driver: &mut TickDriver,
    obstacles: &[Collidable],
    touching: &[usize],
    previous: &HashSet<usize>,
    input: &InputState,
    music_time: f32,
    checkpoint: &mut Option<Checkpoint>,
) {
    let jump_force = driver.config().jump_force;
    for &index in touching {
        let obstacle = &obstacles[index];
        let entered = !previous.contains(&index);
        match obstacle.kind {
            ObstacleKind::JumpPad if entered => {
                driver.apply_vertical_impulse(jump_force * PAD_LAUNCH_SCALE);
            }
            ObstacleKind::JumpOrb if input.jump_pressed => {
                driver.apply_vertical_impulse(jump_force * ORB_LAUNCH_SCALE);
            }
            ObstacleKind::GravityPortal if entered => {
                let inverted = !driver.state().gravity_inverted;
                driver.set_gravity_inverted(inverted);
            }
            ObstacleKind::CubePortal | ObstacleKind::ShipPortal | ObstacleKind::BallPortal
                if entered =>
            {
                if let Some(mode) = obstacle.kind.target_mode() {
                    driver.switch_mode(mode);
                }
            }
            ObstacleKind::SpeedPortal(speed) if entered => driver.set_speed(speed),
            ObstacleKind::Checkpoint if entered => {
                *checkpoint = Some(driver.capture_checkpoint(music_time));
                info!(x = obstacle.center.x, music_time, "checkpoint reached");
            }
            _ => {}
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<()> {
    init_tracing("info");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read physics config {path}"))?;
            PhysicsConfig::from_json_str(&json)
                .with_context(|| format!("Invalid physics config {path}"))?
        }
        None => PhysicsConfig::default(),
    };
    let world = WorldConfig {
        level_length: LEVEL_LENGTH,
        ..WorldConfig::default()
    };

    let mut driver = TickDriver::try_new(config, world)?;
    let obstacles = build_course();
    info!(
        obstacles = obstacles.len(),
        gravity = config.gravity,
        jump_force = config.jump_force,
        "course loaded"
    );

    let mut jump = JumpInputTracker::new();
    let mut music_time = 0.0_f32;
    let mut checkpoint: Option<Checkpoint> = None;
    let mut previous_touching: HashSet<usize> = HashSet::new();
    let mut deaths = 0_u32;
    let fumble_x = obstacles
        .iter()
        .find(|o| o.kind == ObstacleKind::Spike && o.center.x > 2000.0)
        .map(|o| o.center.x);
    let mut frame = 0_usize;

    while frame < MAX_FRAMES && !driver.is_complete() {
        let dt = NOMINAL_DT * FRAME_JITTER[frame % FRAME_JITTER.len()];
        music_time += dt;
        frame += 1;

        let skip = if deaths == 0 { fumble_x } else { None };
        let input = jump.sample(autopilot(&driver, &obstacles, skip));
        let report = driver.tick(&input, dt, Some(music_time), &obstacles);

        if !report.side_contacts.is_empty() && !driver.is_dead() {
            warn!(x = driver.state().position.x, "crashed into a wall");
            driver.kill();
        }

        if !driver.is_dead() {
            resolve_interactions(
                &mut driver,
                &obstacles,
                &report.interactions,
                &previous_touching,
                &input,
                music_time,
                &mut checkpoint,
            );
        }
        previous_touching = report.interactions.iter().copied().collect();

        let mut events = report.events;
        events.extend(driver.drain_events());
        for event in &events {
            log_event(event);
        }

        if driver.is_dead() {
            deaths += 1;
            if deaths > MAX_RETRIES {
                warn!(deaths, progress = driver.progress(), "out of retries");
                break;
            }
            match &checkpoint {
                Some(saved) => {
                    driver.respawn_at(saved);
                    music_time = saved.music_time;
                }
                None => {
                    driver.reset();
                    music_time = 0.0;
                }
            }
            jump.reset(false);
            // The respawn point overlaps its own checkpoint; that is not an entry
            previous_touching =
                query_overlaps(&driver.get_hitbox(), &obstacles, CategoryMask::CALLER_RESOLVED)
                    .collect();
            info!(attempt = deaths + 1, music_time, "retrying");
        }
    }

    info!(
        frames = frame,
        deaths,
        progress = driver.progress(),
        complete = driver.is_complete(),
        mode = driver.mode().name(),
        "run finished"
    );
    Ok(())
}

fn log_event(event: &PhysicsEvent) {
    match event {
        PhysicsEvent::Death { x, y } => info!(x, y, "death"),
        PhysicsEvent::Jump { x, y } => debug!(x, y, "jump"),
        PhysicsEvent::Land { x, y } => debug!(x, y, "land"),
        PhysicsEvent::ModeChange { mode } => info!(mode = mode.name(), "mode change"),
        PhysicsEvent::GravityFlip { now_inverted } => info!(now_inverted, "gravity flip"),
    }
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
