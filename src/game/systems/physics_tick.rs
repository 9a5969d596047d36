//! Physics tick driver.
//!
//! Owns the player's [`PhysicsState`] for a whole session and advances it
//! one rendered frame at a time:
//!
//! 1. Horizontal position from the music clock (never velocity-integrated)
//! 2. The active mode's vertical/rotational update
//! 3. Floor clamp against the default ground plane
//! 4. Hazards: any overlap kills immediately and ends the tick
//! 5. Solids: vertical push-outs first, then leftover horizontal overlaps
//!    are reported
//! 6. Grounded query and landing/jump/coyote bookkeeping
//!
//! Pads, orbs, portals and checkpoints are resolved by the caller through
//! [`TickReport::interactions`] and the control operations
//! ([`TickDriver::switch_mode`], [`TickDriver::set_gravity_inverted`],
//! [`TickDriver::set_speed`], [`TickDriver::apply_vertical_impulse`]).
//!
//! The obstacle slice passed to [`TickDriver::tick`] is only borrowed for the
//! duration of the call; nothing in it is retained.

use tracing::{debug, info, trace};

use crate::config::ConfigError;
use crate::game::checkpoint::Checkpoint;
use crate::game::events::{EventQueue, PhysicsEvent};
use crate::input::InputState;
use crate::physics::types::Vec2;
use crate::physics::{
    Aabb, CategoryMask, Collidable, CollisionCategory, GroundPlane, is_grounded, player_hitbox,
    player_hitbox_scale, query_overlaps,
};
use crate::player::{ModeController, ModeId, PhysicsConfig, PhysicsState};
use crate::world::{HorizontalClock, SpeedTier, WorldConfig};

/// What happened during one [`TickDriver::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Notifications of this tick, including those queued by control
    /// operations since the previous tick
    pub events: Vec<PhysicsEvent>,
    /// Indices of overlapped Interactive/Portal/Trigger obstacles
    pub interactions: Vec<usize>,
    /// Indices of solids overlapped on the horizontal axis (not displaced)
    pub side_contacts: Vec<usize>,
}

impl TickReport {
    /// Whether this tick killed the player.
    pub fn died(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, PhysicsEvent::Death { .. }))
    }
}

/// Per-session simulation driver.
pub struct TickDriver {
    config: PhysicsConfig,
    world: WorldConfig,
    state: PhysicsState,
    modes: ModeController,
    clock: HorizontalClock,
    events: EventQueue,
    completed: bool,
}

impl TickDriver {
    /// Creates a driver with the player at the spawn point.
    ///
    /// The configs are trusted as-is; use [`TickDriver::try_new`] for
    /// configs that come from outside the program.
    pub fn new(config: PhysicsConfig, world: WorldConfig) -> Self {
        let mut driver = Self {
            config,
            world,
            state: PhysicsState::default(),
            modes: ModeController::new(),
            clock: HorizontalClock::new(world.start_x, world.start_speed),
            events: EventQueue::new(),
            completed: false,
        };
        driver.reset();
        driver
    }

    /// Validates both configs, then creates the driver.
    pub fn try_new(config: PhysicsConfig, world: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        world.validate()?;
        Ok(Self::new(config, world))
    }

    /// Spawn center: `spawn_y` if set, otherwise a Cube resting on the
    /// ground plane (or `y = 0` with no ground plane).
    pub fn spawn_position(&self) -> Vec2 {
        let y = match (self.world.spawn_y, self.world.ground_y) {
            (Some(y), _) => y,
            (None, Some(ground_y)) => {
                ground_y - self.world.player_size * player_hitbox_scale(ModeId::Cube) * 0.5
            }
            (None, None) => 0.0,
        };
        Vec2::new(self.world.start_x, y)
    }

    pub fn state(&self) -> &PhysicsState {
        &self.state
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn clock(&self) -> &HorizontalClock {
        &self.clock
    }

    pub fn mode(&self) -> ModeId {
        self.modes.mode()
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead
    }

    /// Current player collision box.
    pub fn get_hitbox(&self) -> Aabb {
        player_hitbox(self.state.position, self.world.player_size, self.state.mode)
    }

    /// Level completion in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.world.progress_at(self.state.position.x)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    fn ground_plane(&self) -> Option<GroundPlane> {
        self.world.ground_y.map(|y| GroundPlane {
            y,
            tolerance: self.world.ground_tolerance,
        })
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the simulation by one frame.
    ///
    /// # Arguments
    /// * `input` - Jump edge/level for this frame
    /// * `dt` - Frame delta in seconds (vertical physics, clock fallback)
    /// * `music_time` - Authoritative audio position, if the audio is playing
    /// * `obstacles` - Live obstacles for this frame only
    ///
    /// A dead player is frozen: the tick only hands back pending events.
    pub fn tick(
        &mut self,
        input: &InputState,
        dt: f32,
        music_time: Option<f32>,
        obstacles: &[Collidable],
    ) -> TickReport {
        if self.state.is_dead {
            return TickReport {
                events: self.events.drain(),
                ..TickReport::default()
            };
        }

        let was_grounded = self.state.is_grounded;
        let was_inverted = self.state.gravity_inverted;

        self.state.position.x = self.clock.advance(music_time, dt);
        self.state.velocity.x = self.clock.velocity();
        self.state.speed = self.clock.speed();

        self.modes.update(&mut self.state, input, dt, &self.config);

        if self.state.gravity_inverted != was_inverted {
            self.events.push(PhysicsEvent::GravityFlip {
                now_inverted: self.state.gravity_inverted,
            });
            debug!(inverted = self.state.gravity_inverted, "gravity flip");
        }

        self.clamp_to_ground();

        let mut report = TickReport::default();

        let hitbox = self.get_hitbox();
        let hazard = query_overlaps(&hitbox, obstacles, CollisionCategory::Hazard.into()).next();
        if let Some(index) = hazard {
            self.kill();
            trace!(obstacle = index, "hazard overlap");
            report.events = self.events.drain();
            return report;
        }

        self.resolve_solids(obstacles, &mut report.side_contacts);

        let hitbox = self.get_hitbox();
        report.interactions =
            query_overlaps(&hitbox, obstacles, CategoryMask::CALLER_RESOLVED).collect();

        let grounded = is_grounded(
            &hitbox,
            self.state.gravity_inverted,
            obstacles,
            self.ground_plane(),
        );
        self.update_grounded(was_grounded, grounded);

        if !self.completed && self.is_complete() {
            self.completed = true;
            info!(x = self.state.position.x, "level complete");
        }

        report.events = self.events.drain();
        report
    }

    /// Keeps the hitbox bottom on or above the ground plane.
    fn clamp_to_ground(&mut self) {
        let Some(ground_y) = self.world.ground_y else {
            return;
        };
        let penetration = self.get_hitbox().bottom() - ground_y;
        if penetration > 0.0 {
            self.state.position.y -= penetration;
            if self.state.velocity.y > 0.0 {
                self.state.velocity.y = 0.0;
            }
        }
    }

    /// Pushes the player out of solids along Y.
    ///
    /// Vertical push-outs run first, in slice order. Solids that resolved on
    /// X are re-tested afterwards, so the seam between two floor tiles does
    /// not register as a wall. `velocity.y` is zeroed only when it points
    /// into the solid, so a jump started this tick is not cancelled.
    /// Remaining horizontal overlaps are collected into `side_contacts`.
    fn resolve_solids(&mut self, obstacles: &[Collidable], side_contacts: &mut Vec<usize>) {
        let mut deferred = Vec::new();
        for (index, obstacle) in obstacles.iter().enumerate() {
            if !obstacle.active || obstacle.category != CollisionCategory::Solid {
                continue;
            }
            if !self.push_out_vertically(index, &obstacle.hitbox()) {
                deferred.push(index);
            }
        }

        for index in deferred {
            if !self.push_out_vertically(index, &obstacles[index].hitbox()) {
                side_contacts.push(index);
                trace!(obstacle = index, "solid side contact");
            }
        }
    }

    /// Applies a vertical push-out against `solid`.
    ///
    /// Returns `false` when the boxes overlap on the horizontal axis.
    /// No overlap at all counts as resolved.
    fn push_out_vertically(&mut self, index: usize, solid: &Aabb) -> bool {
        let hit = self.get_hitbox().collide(solid);
        if !hit.colliding {
            return true;
        }
        if !hit.is_vertical() {
            return false;
        }

        self.state.position.y += hit.push().y;
        if self.state.velocity.y * hit.normal.y < 0.0 {
            self.state.velocity.y = 0.0;
        }
        trace!(obstacle = index, push = hit.overlap, "solid push-out");
        true
    }

    fn update_grounded(&mut self, was_grounded: bool, grounded: bool) {
        let at = self.state.position;
        match (was_grounded, grounded) {
            (false, true) => {
                self.state.coyote_time_remaining = 0.0;
                self.events.push(PhysicsEvent::Land { x: at.x, y: at.y });
            }
            (true, false) => {
                self.state.coyote_time_remaining = self.config.coyote_time;
                if self.state.velocity.y * self.state.gravity_sign() < 0.0 {
                    self.events.push(PhysicsEvent::Jump { x: at.x, y: at.y });
                }
            }
            (true, true) => self.state.coyote_time_remaining = 0.0,
            (false, false) => {}
        }
        self.state.is_grounded = grounded;
    }

    /// Kills the player.
    ///
    /// Hazards call this from inside the tick; callers use it for their own
    /// fatal rules (e.g. treating [`TickReport::side_contacts`] as crashes).
    pub fn kill(&mut self) {
        if self.state.is_dead {
            return;
        }
        let at = self.state.position;
        self.state.is_dead = true;
        self.events.push(PhysicsEvent::Death { x: at.x, y: at.y });
        info!(x = at.x, y = at.y, progress = self.progress(), "player died");
    }

    // ========================================================================
    // Control operations (caller-resolved obstacles)
    // ========================================================================

    /// Switches the movement mode (mode portals).
    ///
    /// Returns `false` when dead or already in `target`.
    pub fn switch_mode(&mut self, target: ModeId) -> bool {
        if self.state.is_dead {
            return false;
        }
        let changed = self.modes.switch_to(target, &mut self.state, &self.config);
        if changed {
            self.events.push(PhysicsEvent::ModeChange { mode: target });
        }
        changed
    }

    /// Sets the gravity direction (gravity portals).
    ///
    /// Returns `false` when dead or when the direction is unchanged.
    pub fn set_gravity_inverted(&mut self, inverted: bool) -> bool {
        if self.state.is_dead || self.state.gravity_inverted == inverted {
            return false;
        }
        self.state.gravity_inverted = inverted;
        self.state.is_grounded = false;
        self.state.coyote_time_remaining = 0.0;
        self.events.push(PhysicsEvent::GravityFlip {
            now_inverted: inverted,
        });
        debug!(inverted, "gravity set");
        true
    }

    /// Changes the speed tier (speed portals), keeping `x` continuous.
    pub fn set_speed(&mut self, speed: SpeedTier) {
        if self.state.is_dead {
            return;
        }
        self.clock.set_speed(speed);
        self.state.speed = speed;
        self.state.velocity.x = speed.units_per_second();
        debug!(speed = speed.name(), "speed change");
    }

    /// Launches the player against gravity (pads and orbs).
    ///
    /// Positive `impulse` points away from the current gravity direction.
    /// The result is clamped to the mode's terminal velocity.
    pub fn apply_vertical_impulse(&mut self, impulse: f32) {
        if self.state.is_dead {
            return;
        }
        let terminal = self.modes.terminal_velocity(&self.config);
        self.state.velocity.y = (-self.state.gravity_sign() * impulse).clamp(-terminal, terminal);
        self.state.is_grounded = false;
        self.state.coyote_time_remaining = 0.0;
    }

    // ========================================================================
    // Reset / checkpoints
    // ========================================================================

    /// Fresh Cube state at the spawn point, clock back at music time zero.
    pub fn reset(&mut self) {
        let spawn = self.spawn_position();
        self.state = PhysicsState::new(spawn, self.world.start_speed);
        self.state.is_grounded = is_grounded(&self.get_hitbox(), false, &[], self.ground_plane());
        self.modes.enter(ModeId::Cube, &mut self.state, &self.config);
        self.clock = HorizontalClock::new(self.world.start_x, self.world.start_speed);
        self.events.clear();
        self.completed = false;
        debug!(x = spawn.x, y = spawn.y, "player reset");
    }

    /// Snapshot of the live state at `music_time`.
    pub fn capture_checkpoint(&self, music_time: f32) -> Checkpoint {
        Checkpoint::capture(&self.state, music_time)
    }

    /// Restores a live player from `checkpoint`.
    ///
    /// The caller is expected to seek the audio to `checkpoint.music_time`.
    pub fn respawn_at(&mut self, checkpoint: &Checkpoint) {
        self.state = checkpoint.to_state();
        self.modes.enter(checkpoint.mode, &mut self.state, &self.config);
        self.clock.reanchor(
            checkpoint.position.x,
            checkpoint.music_time,
            checkpoint.speed,
        );
        self.events.clear();
        self.completed = self.is_complete();
        debug!(
            x = checkpoint.position.x,
            music_time = checkpoint.music_time,
            mode = checkpoint.mode.name(),
            "respawn at checkpoint"
        );
    }

    /// Takes pending notifications without ticking.
    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        self.events.drain()
    }
}
