use crate::camera::Camera;
use std::time::{Duration, Instant};
use voxshot_input::ControlState;
use voxshot_physics::PhysicsIntegrator;
use voxshot_world::{Block, VoxelWorld};

/// Minimum interval between consecutive shots.
pub const FIRE_COOLDOWN: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Ready,
    Cooling { since: Instant },
}

/// Fire handling: view raycast, block destruction, rate limiting.
///
/// A two-state machine. `Ready → Cooling` on a processed fire event;
/// `Cooling → Ready` once the cooldown has elapsed, checked against the
/// caller-supplied clock rather than a scheduled callback.
#[derive(Debug, Clone, Copy)]
pub struct TargetingSystem {
    trigger: Trigger,
    cooldown: Duration,
}

impl TargetingSystem {
    pub fn new() -> Self {
        Self {
            trigger: Trigger::Ready,
            cooldown: FIRE_COOLDOWN,
        }
    }

    /// Whether a fire event would be processed at `now`.
    pub fn ready(&self, now: Instant) -> bool {
        match self.trigger {
            Trigger::Ready => true,
            Trigger::Cooling { since } => now.duration_since(since) >= self.cooldown,
        }
    }

    /// Lapse the cooldown if it has elapsed.
    pub fn update(&mut self, now: Instant) {
        if let Trigger::Cooling { since } = self.trigger {
            if now.duration_since(since) >= self.cooldown {
                self.trigger = Trigger::Ready;
            }
        }
    }

    /// Process the fire intent, if set.
    ///
    /// While ready: enter cooling, cast a ray from the camera along its
    /// forward vector, and destroy the nearest hit block together with its
    /// collider. A miss, an empty world, or a hit collider with no block
    /// association all mutate nothing. While cooling: mutate nothing even
    /// if the flag is forced true. In every case the fire flag is cleared
    /// after processing so a held trigger cannot out-pace the cooldown.
    ///
    /// Returns the destroyed block, if any.
    pub fn try_fire(
        &mut self,
        now: Instant,
        camera: &Camera,
        physics: &mut PhysicsIntegrator,
        world: &mut VoxelWorld,
        controls: &mut ControlState,
    ) -> Option<Block> {
        if !controls.fire {
            return None;
        }
        if !self.ready(now) {
            controls.clear_fire();
            return None;
        }

        self.trigger = Trigger::Cooling { since: now };
        let removed = physics
            .cast_view_ray(camera.position, camera.forward(), f32::MAX)
            .and_then(|hit| hit.block)
            .and_then(|id| {
                physics.remove_block(&id);
                world.remove(&id)
            });
        if let Some(block) = &removed {
            tracing::debug!(id = %block.id, "block destroyed");
        }
        controls.clear_fire();
        removed
    }
}

impl Default for TargetingSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxshot_common::{BlockKind, GridPos};
    use voxshot_input::Intent;

    /// World + physics with a single block straight ahead of the default
    /// camera (which looks down −Z from the player spawn).
    fn one_block_ahead() -> (VoxelWorld, PhysicsIntegrator, Camera) {
        let mut world = VoxelWorld::new();
        let mut physics = PhysicsIntegrator::new();
        let pos = GridPos::new(0, 2, -4);
        let id = world.place(pos, BlockKind::Grass).unwrap().id.clone();
        physics.add_block(&id, pos);
        let camera = Camera::new(Vec3::new(0.0, 2.0, 0.0));
        (world, physics, camera)
    }

    fn firing_controls() -> ControlState {
        let mut c = ControlState::new();
        c.set(Intent::Fire, true);
        c
    }

    #[test]
    fn fire_destroys_block_ahead_and_clears_flag() {
        let (mut world, mut physics, camera) = one_block_ahead();
        let mut controls = firing_controls();
        let mut targeting = TargetingSystem::new();

        let hit = targeting.try_fire(Instant::now(), &camera, &mut physics, &mut world, &mut controls);
        assert_eq!(hit.unwrap().position, GridPos::new(0, 2, -4));
        assert!(world.is_empty());
        assert_eq!(physics.block_collider_count(), 0);
        assert!(!controls.fire);
    }

    #[test]
    fn second_fire_within_cooldown_mutates_nothing() {
        let mut world = VoxelWorld::new();
        let mut physics = PhysicsIntegrator::new();
        for z in [-4, -6] {
            let pos = GridPos::new(0, 2, z);
            let id = world.place(pos, BlockKind::Stone).unwrap().id.clone();
            physics.add_block(&id, pos);
        }
        let camera = Camera::new(Vec3::new(0.0, 2.0, 0.0));
        let mut targeting = TargetingSystem::new();
        let t0 = Instant::now();

        let mut controls = firing_controls();
        assert!(targeting.try_fire(t0, &camera, &mut physics, &mut world, &mut controls).is_some());
        assert_eq!(world.len(), 1);

        // Force the flag back on inside the cooldown window.
        controls.set(Intent::Fire, true);
        let t1 = t0 + Duration::from_millis(50);
        assert!(targeting.try_fire(t1, &camera, &mut physics, &mut world, &mut controls).is_none());
        assert_eq!(world.len(), 1);
        assert!(!controls.fire, "flag must clear even while cooling");

        // After the cooldown the next block falls.
        controls.set(Intent::Fire, true);
        let t2 = t0 + Duration::from_millis(250);
        assert!(targeting.try_fire(t2, &camera, &mut physics, &mut world, &mut controls).is_some());
        assert!(world.is_empty());
    }

    #[test]
    fn firing_at_empty_world_is_a_clean_miss() {
        let mut world = VoxelWorld::new();
        let mut physics = PhysicsIntegrator::new();
        let camera = Camera::new(Vec3::new(0.0, 2.0, 0.0));
        let mut controls = firing_controls();
        let mut targeting = TargetingSystem::new();

        let hit = targeting.try_fire(Instant::now(), &camera, &mut physics, &mut world, &mut controls);
        assert!(hit.is_none());
        assert!(!controls.fire);
        // A miss still consumes the shot.
        assert!(!targeting.ready(Instant::now()));
    }

    #[test]
    fn nearest_of_two_blocks_is_destroyed() {
        let mut world = VoxelWorld::new();
        let mut physics = PhysicsIntegrator::new();
        for z in [-6, -3] {
            let pos = GridPos::new(0, 2, z);
            let id = world.place(pos, BlockKind::Stone).unwrap().id.clone();
            physics.add_block(&id, pos);
        }
        let camera = Camera::new(Vec3::new(0.0, 2.0, 0.0));
        let mut controls = firing_controls();
        let mut targeting = TargetingSystem::new();

        let hit = targeting
            .try_fire(Instant::now(), &camera, &mut physics, &mut world, &mut controls)
            .unwrap();
        assert_eq!(hit.position.z, -3);
    }

    #[test]
    fn idle_trigger_does_nothing_without_fire_intent() {
        let (mut world, mut physics, camera) = one_block_ahead();
        let mut controls = ControlState::new();
        let mut targeting = TargetingSystem::new();

        let hit = targeting.try_fire(Instant::now(), &camera, &mut physics, &mut world, &mut controls);
        assert!(hit.is_none());
        assert_eq!(world.len(), 1);
        assert!(targeting.ready(Instant::now()));
    }

    #[test]
    fn cooldown_lapses_by_clock() {
        let (mut world, mut physics, camera) = one_block_ahead();
        let mut controls = firing_controls();
        let mut targeting = TargetingSystem::new();
        let t0 = Instant::now();

        targeting.try_fire(t0, &camera, &mut physics, &mut world, &mut controls);
        assert!(!targeting.ready(t0 + Duration::from_millis(199)));
        assert!(targeting.ready(t0 + FIRE_COOLDOWN));

        targeting.update(t0 + FIRE_COOLDOWN);
        assert!(targeting.ready(t0 + FIRE_COOLDOWN));
    }
}
