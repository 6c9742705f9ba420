use crate::camera::Camera;
use crate::controller::PlayerController;
use crate::targeting::TargetingSystem;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use voxshot_common::{BlockId, BlockKind, GridPos};
use voxshot_input::ControlState;
use voxshot_physics::PhysicsIntegrator;
use voxshot_world::{Block, VoxelWorld, WorldError, WorldEvent, worldgen};

/// Display name used until (or in place of) the async naming call.
pub const DEFAULT_DISPLAY_NAME: &str = "Flatland";

/// Read-only player view for the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub grounded: bool,
}

/// Read-only frame snapshot consumed by the presentation layer.
///
/// Presentation never mutates core state; it renders from this and from the
/// drained world events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub display_name: String,
    pub player: PlayerSnapshot,
    pub blocks: Vec<Block>,
}

/// One play session: the explicit simulation context.
///
/// Owns every piece of shared mutable state (world, physics, controls,
/// camera) instead of leaving it ambient, so each tick has a single writer
/// per component and tests can inject fixtures freely.
pub struct Session {
    world: VoxelWorld,
    physics: PhysicsIntegrator,
    pub controls: ControlState,
    pub camera: Camera,
    controller: PlayerController,
    targeting: TargetingSystem,
    display_name: String,
    tick: u64,
}

impl Session {
    /// Bootstrap a session: generate the terrain, mirror every block into a
    /// static collider, spawn the player.
    pub fn new() -> Self {
        Self::with_world_size(worldgen::WORLD_SIZE)
    }

    /// Bootstrap with an explicit terrain size (tests use small worlds).
    pub fn with_world_size(size: i32) -> Self {
        let world = VoxelWorld::generated(size);
        let mut physics = PhysicsIntegrator::new();
        physics.add_blocks(world.blocks().iter().map(|b| (&b.id, b.position)));
        let camera = Camera::new(physics.player_position());
        tracing::info!(blocks = world.len(), "session bootstrapped");

        Self {
            world,
            physics,
            controls: ControlState::new(),
            camera,
            controller: PlayerController::new(),
            targeting: TargetingSystem::new(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            tick: 0,
        }
    }

    /// Start from an empty world (no terrain). Test fixture constructor.
    pub fn empty() -> Self {
        Self {
            world: VoxelWorld::new(),
            physics: PhysicsIntegrator::new(),
            controls: ControlState::new(),
            camera: Camera::new(voxshot_physics::PLAYER_SPAWN),
            controller: PlayerController::new(),
            targeting: TargetingSystem::new(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            tick: 0,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Applied when the async naming call resolves. Cosmetic only; never
    /// gates tick progress.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// Order per tick: cooldown lapse → fire processing → movement intent →
    /// velocity application and solver step → camera follows the body.
    pub fn tick(&mut self, dt: f32, now: Instant) {
        self.targeting.update(now);
        self.targeting.try_fire(
            now,
            &self.camera,
            &mut self.physics,
            &mut self.world,
            &mut self.controls,
        );

        let intent = self.controller.intent(&self.controls, &self.camera);
        self.physics.apply_intent(intent, self.controls.jump);
        self.physics.step(dt);

        self.camera.position = self.physics.player_position();
        self.tick += 1;
    }

    /// Place a block of the default kind, keeping world and collider in
    /// lockstep. The single add-block interaction.
    pub fn place_block(&mut self, pos: GridPos) -> Result<BlockId, WorldError> {
        let id = self.world.add(pos)?.id.clone();
        self.physics.add_block(&id, pos);
        Ok(id)
    }

    /// Place a block of an explicit kind (world generation repairs, tests).
    pub fn place_block_of(&mut self, pos: GridPos, kind: BlockKind) -> Result<BlockId, WorldError> {
        let id = self.world.place(pos, kind)?.id.clone();
        self.physics.add_block(&id, pos);
        Ok(id)
    }

    /// Drain the world's mutation events for the presentation layer.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.world.drain_events()
    }

    /// Capture the read-only frame snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tick: self.tick,
            display_name: self.display_name.clone(),
            player: PlayerSnapshot {
                position: self.physics.player_position(),
                velocity: self.physics.player_velocity(),
                yaw: self.camera.yaw,
                pitch: self.camera.pitch,
                grounded: self.physics.grounded(),
            },
            blocks: self.world.blocks().to_vec(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
