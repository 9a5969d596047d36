//! Collision Tests - Solid Resolution, Forgiving Hitboxes and Caller Queries
//!
//! Exercises the tick driver's collision pass against hand-placed obstacles
//! and the overlap query a game layer uses for pads, portals and checkpoints.

use glam::Vec2;
use pulse_runner_engine::game::{PhysicsEvent, TickDriver};
use pulse_runner_engine::input::InputState;
use pulse_runner_engine::physics::{
    Aabb, CategoryMask, Collidable, CollisionCategory, ObstacleKind, query_overlaps,
};
use pulse_runner_engine::player::{ModeId, PhysicsConfig};
use pulse_runner_engine::world::WorldConfig;

const DT: f32 = 1.0 / 60.0;

fn floating_world(spawn_y: f32) -> WorldConfig {
    WorldConfig {
        ground_y: None,
        spawn_y: Some(spawn_y),
        ..WorldConfig::default()
    }
}

// ============================================================================
// Solid Resolution
// ============================================================================

#[test]
fn test_upward_push_keeps_rising_velocity() {
    // Bottom of the hitbox starts 20 units inside a slab
    let mut driver = TickDriver::new(PhysicsConfig::default(), floating_world(6.5));
    let slab = [Collidable::from_corner(
        ObstacleKind::Slab,
        Vec2::new(-100.0, 0.0),
        Vec2::new(300.0, 30.0),
    )];

    driver.apply_vertical_impulse(800.0);
    let report = driver.tick(&InputState::new(), DT, Some(0.0), &slab);

    let state = driver.state();
    assert!(state.velocity.y < 0.0, "push-out cancelled the jump");
    assert!(driver.get_hitbox().bottom().abs() < 1e-3);
    assert!(report.side_contacts.is_empty());
}

#[test]
fn test_ceiling_bump_stops_rising_velocity() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), floating_world(0.0));
    let ceiling = [Collidable::from_corner(
        ObstacleKind::Block,
        Vec2::new(-100.0, -60.0),
        Vec2::new(300.0, 47.0),
    )];

    driver.apply_vertical_impulse(800.0);
    driver.tick(&InputState::new(), DT, Some(0.0), &ceiling);

    assert_eq!(driver.state().velocity.y, 0.0);
    assert!((driver.get_hitbox().top - -13.0).abs() < 1e-3);
}

#[test]
fn test_zero_velocity_push_leaves_velocity_zero() {
    let config = PhysicsConfig {
        gravity: 0.0,
        ..PhysicsConfig::default()
    };
    let mut driver = TickDriver::new(config, floating_world(-10.0));
    let slab = [Collidable::from_corner(
        ObstacleKind::Slab,
        Vec2::new(-100.0, 0.0),
        Vec2::new(300.0, 30.0),
    )];

    driver.tick(&InputState::new(), DT, Some(0.0), &slab);
    assert_eq!(driver.state().velocity.y, 0.0);
    assert!(driver.get_hitbox().bottom().abs() < 1e-3);
    assert!(driver.state().is_grounded);
}

#[test]
fn test_wall_overlap_reported_not_displaced() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let wall = [Collidable::from_corner(
        ObstacleKind::Block,
        Vec2::new(12.0, -60.0),
        Vec2::new(30.0, 60.0),
    )];
    let before = driver.state().position;

    let report = driver.tick(&InputState::new(), DT, Some(0.0), &wall);

    assert_eq!(report.side_contacts, vec![0]);
    assert_eq!(driver.state().position.x, before.x);
    assert!((driver.state().position.y - before.y).abs() < 1e-3);
    assert!(!driver.is_dead());
}

/// Adjacent 30-unit blocks forming a flat floor at `y = 0`.
fn tiled_floor(tiles: usize) -> Vec<Collidable> {
    (0..tiles)
        .map(|i| {
            Collidable::from_corner(
                ObstacleKind::Block,
                Vec2::new(i as f32 * 30.0, 0.0),
                Vec2::new(30.0, 30.0),
            )
        })
        .collect()
}

#[test]
fn test_tile_seam_is_not_a_wall() {
    // Hitbox left edge at 29.5: half a unit over the first tile
    let world = WorldConfig {
        start_x: 43.0,
        ..floating_world(-13.5)
    };
    let mut driver = TickDriver::new(PhysicsConfig::default(), world);
    let floor = tiled_floor(2);

    let report = driver.tick(&InputState::new(), DT, Some(0.0), &floor);

    assert!(report.side_contacts.is_empty(), "seam reported: {:?}", report.side_contacts);
    assert!(driver.state().is_grounded);
    assert!(driver.get_hitbox().bottom().abs() < 1e-3);
}

#[test]
fn test_running_across_tiled_floor() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), floating_world(-13.5));
    let floor = tiled_floor(40);

    let mut music_time = 0.0;
    for frame in 0..180 {
        music_time += DT;
        let report = driver.tick(&InputState::new(), DT, Some(music_time), &floor);
        assert!(report.side_contacts.is_empty(), "side contact at frame {frame}");
        assert!(!report.died());
    }
    assert!(driver.state().is_grounded);
    assert!(driver.get_hitbox().bottom().abs() < 1e-3);
}

#[test]
fn test_inactive_solid_is_ignored() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), floating_world(0.0));
    let mut slab = Collidable::from_corner(
        ObstacleKind::Slab,
        Vec2::new(-100.0, 0.0),
        Vec2::new(300.0, 30.0),
    );
    slab.active = false;

    let y = driver.state().position.y;
    driver.tick(&InputState::new(), DT, Some(0.0), &[slab]);
    assert!(driver.state().position.y > y);
    assert!(!driver.state().is_grounded);
}

#[test]
fn test_landing_on_slab_reports_land() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), floating_world(-100.0));
    let slab = [Collidable::from_corner(
        ObstacleKind::Slab,
        Vec2::new(-100.0, 0.0),
        Vec2::new(1000.0, 30.0),
    )];

    let mut landed = false;
    for _ in 0..60 {
        let report = driver.tick(&InputState::new(), DT, None, &slab);
        if report.events.iter().any(|e| matches!(e, PhysicsEvent::Land { .. })) {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(driver.state().is_grounded);
    assert!(driver.get_hitbox().bottom().abs() < 1e-3);
}

// ============================================================================
// Inverted Gravity
// ============================================================================

#[test]
fn test_inverted_cube_stands_on_ceiling() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let ceiling = [Collidable::from_corner(
        ObstacleKind::Slab,
        Vec2::new(-100.0, -130.0),
        Vec2::new(2000.0, 30.0),
    )];
    driver.set_gravity_inverted(true);

    let mut landed = false;
    for _ in 0..120 {
        let report = driver.tick(&InputState::new(), DT, None, &ceiling);
        if report.events.iter().any(|e| matches!(e, PhysicsEvent::Land { .. })) {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!((driver.get_hitbox().top - -100.0).abs() < 1e-3);

    // Jumping under inverted gravity goes toward +Y
    driver.tick(&InputState::pressed(), DT, None, &ceiling);
    assert_eq!(driver.state().velocity.y, driver.config().jump_force);
}

// ============================================================================
// Forgiving Hitboxes
// ============================================================================

#[test]
fn test_visual_graze_of_spike_survives() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let spike = Collidable::new(ObstacleKind::Spike, Vec2::new(25.0, -15.0), Vec2::splat(30.0));

    let player_visual = Aabb::from_center(driver.state().position, Vec2::splat(30.0));
    assert!(player_visual.overlaps(&spike.visual_box()));

    let report = driver.tick(&InputState::new(), DT, Some(0.0), &[spike]);
    assert!(!report.died());
}

#[test]
fn test_ship_hitbox_is_smaller_than_cube() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let cube = driver.get_hitbox();
    driver.switch_mode(ModeId::Ship);
    let ship = driver.get_hitbox();
    assert!(ship.width < cube.width);
    assert_eq!(ship.center(), cube.center());
}

// ============================================================================
// Caller Queries
// ============================================================================

#[test]
fn test_caller_query_matches_tick_interactions() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let at = driver.state().position;
    let obstacles = [
        Collidable::new(ObstacleKind::JumpPad, Vec2::new(at.x, -4.0), Vec2::new(30.0, 8.0)),
        Collidable::new(ObstacleKind::Decoration, at, Vec2::splat(30.0)),
        Collidable::new(ObstacleKind::GravityPortal, at, Vec2::new(30.0, 90.0)),
        Collidable::new(ObstacleKind::Checkpoint, Vec2::new(500.0, -45.0), Vec2::new(30.0, 90.0)),
    ];

    let report = driver.tick(&InputState::new(), DT, Some(0.0), &obstacles);
    assert_eq!(report.interactions, vec![0, 2]);

    let hitbox = driver.get_hitbox();
    let portals: Vec<_> =
        query_overlaps(&hitbox, &obstacles, CollisionCategory::Portal.into()).collect();
    assert_eq!(portals, vec![2]);
    let caller: Vec<_> =
        query_overlaps(&hitbox, &obstacles, CategoryMask::CALLER_RESOLVED).collect();
    assert_eq!(caller, report.interactions);
}

#[test]
fn test_pad_launch_through_driver() {
    let mut driver = TickDriver::new(PhysicsConfig::default(), WorldConfig::default());
    let pad = [Collidable::new(
        ObstacleKind::JumpPad,
        Vec2::new(0.0, -4.0),
        Vec2::new(30.0, 8.0),
    )];

    let report = driver.tick(&InputState::new(), DT, Some(0.0), &pad);
    for &index in &report.interactions {
        if pad[index].kind == ObstacleKind::JumpPad {
            driver.apply_vertical_impulse(driver.config().jump_force * 1.4);
        }
    }
    driver.tick(&InputState::new(), DT, Some(DT), &pad);
    assert!(driver.state().velocity.y < -1000.0);
    assert!(!driver.state().is_grounded);
}
