use glam::Vec3;
use rapier3d::prelude::*;
use std::collections::HashMap;
use voxshot_common::{BlockId, GridPos};

/// World gravity. Stronger than Earth's so falls read snappy at block scale.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -25.0, 0.0);
/// Vertical velocity applied on a grounded jump.
pub const JUMP_SPEED: f32 = 6.0;
/// Length of the downward ray used for ground detection.
pub const GROUND_PROBE: f32 = 1.1;
/// Half-extents of the player's cuboid collider.
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.9, 0.4);
/// Player spawn point at session start.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);

const BLOCK_HALF_EXTENT: f32 = 0.5;

/// Result of a view raycast against the block colliders.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// Id of the block owning the hit collider. `None` for a collider with
    /// no side-table entry; callers treat that as a miss.
    pub block: Option<BlockId>,
    /// Distance along the ray to the intersection.
    pub distance: f32,
}

/// Owns the rapier physics world and steps it once per simulation tick.
///
/// The player is a rotation-locked dynamic body driven by direct velocity
/// overrides (kinematic-style, no force accumulation); blocks are fixed
/// cuboid colliders. Contact resolution and resting behavior are delegated
/// to the solver.
pub struct PhysicsIntegrator {
    pipeline: PhysicsPipeline,
    integration: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
    gravity: Vector<Real>,
    player: RigidBodyHandle,
    /// Side table: collider handle → owning block id. Raycast results are
    /// resolved through this map rather than through any per-collider
    /// user data.
    block_of: HashMap<ColliderHandle, BlockId>,
    collider_of: HashMap<BlockId, ColliderHandle>,
}

impl PhysicsIntegrator {
    /// Create a physics world containing only the player body at the spawn
    /// point. Block colliders are added separately, in lockstep with the
    /// voxel world.
    pub fn new() -> Self {
        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        // The camera rotates, the body never does.
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![PLAYER_SPAWN.x, PLAYER_SPAWN.y, PLAYER_SPAWN.z])
            .lock_rotations()
            .build();
        let player = bodies.insert(body);
        let shape = ColliderBuilder::cuboid(
            PLAYER_HALF_EXTENTS.x,
            PLAYER_HALF_EXTENTS.y,
            PLAYER_HALF_EXTENTS.z,
        )
        .build();
        colliders.insert_with_parent(shape, player, &mut bodies);

        Self {
            pipeline: PhysicsPipeline::new(),
            integration: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
            gravity: vector![GRAVITY.x, GRAVITY.y, GRAVITY.z],
            player,
            block_of: HashMap::new(),
            collider_of: HashMap::new(),
        }
    }

    /// Number of live block colliders.
    pub fn block_collider_count(&self) -> usize {
        self.block_of.len()
    }

    /// Add a fixed unit-cube collider for the block at `pos`, tagged with
    /// its id in the side table.
    pub fn add_block(&mut self, id: &BlockId, pos: GridPos) {
        self.insert_block_collider(id, pos);
        self.queries.update(&self.colliders);
    }

    /// Add colliders for many blocks at once, rebuilding the query
    /// acceleration structure a single time at the end. Bootstrap path;
    /// per-insertion rebuilds make generating a full world quadratic.
    pub fn add_blocks<'a>(&mut self, blocks: impl IntoIterator<Item = (&'a BlockId, GridPos)>) {
        for (id, pos) in blocks {
            self.insert_block_collider(id, pos);
        }
        self.queries.update(&self.colliders);
    }

    fn insert_block_collider(&mut self, id: &BlockId, pos: GridPos) {
        let center = pos.center();
        let collider = ColliderBuilder::cuboid(BLOCK_HALF_EXTENT, BLOCK_HALF_EXTENT, BLOCK_HALF_EXTENT)
            .translation(vector![center.x, center.y, center.z])
            .build();
        let handle = self.colliders.insert(collider);
        self.block_of.insert(handle, id.clone());
        self.collider_of.insert(id.clone(), handle);
    }

    /// Remove the collider owned by `id`, if any. The solver drops every
    /// contact referencing the collider as part of the structural removal,
    /// so nothing dangles into the next step. Returns whether a collider
    /// existed.
    pub fn remove_block(&mut self, id: &BlockId) -> bool {
        let Some(handle) = self.collider_of.remove(id) else {
            return false;
        };
        self.block_of.remove(&handle);
        self.colliders
            .remove(handle, &mut self.islands, &mut self.bodies, true);
        self.queries.update(&self.colliders);
        true
    }

    /// Apply this tick's movement intent to the player body.
    ///
    /// The horizontal components override the current velocity directly;
    /// the vertical component is preserved so gravity and jumps govern it.
    /// A jump only fires while grounded and overrides vertical velocity to
    /// the fixed jump speed, leaving the fresh horizontal velocity intact.
    pub fn apply_intent(&mut self, horizontal: Vec3, jump: bool) {
        let current = *self.bodies[self.player].linvel();
        let mut next = vector![horizontal.x, current.y, horizontal.z];
        if jump && self.grounded() {
            next.y = JUMP_SPEED;
        }
        self.bodies[self.player].set_linvel(next, true);
    }

    /// Advance the solver by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.queries),
            &(),
            &(),
        );
    }

    /// Whether a short downward ray from the body origin hits any non-player
    /// collider.
    pub fn grounded(&self) -> bool {
        let origin = self.player_position();
        let ray = Ray::new(point![origin.x, origin.y, origin.z], vector![0.0, -1.0, 0.0]);
        self.queries
            .cast_ray(
                &self.bodies,
                &self.colliders,
                &ray,
                GROUND_PROBE,
                true,
                QueryFilter::default().exclude_rigid_body(self.player),
            )
            .is_some()
    }

    /// Cast a ray from `origin` along `dir` against the block colliders and
    /// return the nearest intersection, if any. The player body never
    /// occludes the ray.
    pub fn cast_view_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], vector![dir.x, dir.y, dir.z]);
        let (handle, toi) = self.queries.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            QueryFilter::default().exclude_rigid_body(self.player),
        )?;
        Some(RayHit {
            block: self.block_of.get(&handle).cloned(),
            distance: toi,
        })
    }

    /// Current player body position (body origin, not feet).
    pub fn player_position(&self) -> Vec3 {
        let t = self.bodies[self.player].translation();
        Vec3::new(t.x, t.y, t.z)
    }

    /// Current player linear velocity.
    pub fn player_velocity(&self) -> Vec3 {
        let v = self.bodies[self.player].linvel();
        Vec3::new(v.x, v.y, v.z)
    }
}

impl Default for PhysicsIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn block_at(physics: &mut PhysicsIntegrator, x: i32, y: i32, z: i32) -> BlockId {
        let pos = GridPos::new(x, y, z);
        let id = BlockId::from_grid(pos);
        physics.add_block(&id, pos);
        id
    }

    #[test]
    fn player_spawns_at_origin_column() {
        let physics = PhysicsIntegrator::new();
        assert_eq!(physics.player_position(), PLAYER_SPAWN);
        assert_eq!(physics.player_velocity(), Vec3::ZERO);
    }

    #[test]
    fn player_falls_under_gravity_in_empty_world() {
        let mut physics = PhysicsIntegrator::new();
        for _ in 0..30 {
            physics.step(DT);
        }
        assert!(physics.player_position().y < PLAYER_SPAWN.y);
        assert!(physics.player_velocity().y < 0.0);
    }

    #[test]
    fn ground_probe_detects_block_within_range() {
        let mut physics = PhysicsIntegrator::new();
        assert!(!physics.grounded());

        // Top face at y=1.5; probe from y=2.0 reaches down to 0.9.
        block_at(&mut physics, 0, 1, 0);
        assert!(physics.grounded());
    }

    #[test]
    fn ground_probe_ignores_blocks_out_of_range() {
        let mut physics = PhysicsIntegrator::new();
        // Top face at y=0.5, below the 1.1-unit probe from y=2.0.
        block_at(&mut physics, 0, 0, 0);
        assert!(!physics.grounded());
    }

    #[test]
    fn grounded_jump_sets_exact_jump_speed() {
        let mut physics = PhysicsIntegrator::new();
        block_at(&mut physics, 0, 1, 0);

        physics.apply_intent(Vec3::new(2.0, 0.0, 0.0), true);
        let v = physics.player_velocity();
        assert_eq!(v.y, JUMP_SPEED);
        // Horizontal override survives the jump branch.
        assert_eq!(v.x, 2.0);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn airborne_jump_leaves_vertical_velocity_alone() {
        let mut physics = PhysicsIntegrator::new();
        for _ in 0..10 {
            physics.step(DT);
        }
        let falling = physics.player_velocity().y;
        assert!(falling < 0.0);

        physics.apply_intent(Vec3::ZERO, true);
        assert_eq!(physics.player_velocity().y, falling);
    }

    #[test]
    fn horizontal_override_preserves_vertical_velocity() {
        let mut physics = PhysicsIntegrator::new();
        for _ in 0..10 {
            physics.step(DT);
        }
        let vy = physics.player_velocity().y;

        physics.apply_intent(Vec3::new(5.0, 0.0, -3.0), false);
        let v = physics.player_velocity();
        assert_eq!(v, Vec3::new(5.0, vy, -3.0));
    }

    #[test]
    fn view_ray_hits_nearest_block() {
        let mut physics = PhysicsIntegrator::new();
        let near = block_at(&mut physics, 0, 2, -3);
        block_at(&mut physics, 0, 2, -6);

        let hit = physics
            .cast_view_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, f32::MAX)
            .expect("ray should hit");
        assert_eq!(hit.block, Some(near));
        // Near face of the closest cube sits 2.5 units out.
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn bulk_inserted_colliders_are_queryable() {
        let mut physics = PhysicsIntegrator::new();
        let blocks: Vec<(BlockId, GridPos)> = [-6, -4, -2]
            .into_iter()
            .map(|z| {
                let pos = GridPos::new(0, 2, z);
                (BlockId::from_grid(pos), pos)
            })
            .collect();

        physics.add_blocks(blocks.iter().map(|(id, pos)| (id, *pos)));
        assert_eq!(physics.block_collider_count(), 3);

        // The single rebuild at the end must leave every collider visible
        // to the query pipeline, same as one-at-a-time insertion.
        let hit = physics
            .cast_view_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, f32::MAX)
            .expect("ray should hit");
        assert_eq!(hit.block.as_ref(), Some(&blocks[2].0));
        assert!(physics.remove_block(&blocks[2].0));
        let next = physics
            .cast_view_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, f32::MAX)
            .expect("ray should hit the next block");
        assert_eq!(next.block.as_ref(), Some(&blocks[1].0));
    }

    #[test]
    fn view_ray_misses_empty_world() {
        let physics = PhysicsIntegrator::new();
        let hit = physics.cast_view_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, f32::MAX);
        assert!(hit.is_none());
    }

    #[test]
    fn removed_collider_no_longer_blocks_rays() {
        let mut physics = PhysicsIntegrator::new();
        let id = block_at(&mut physics, 0, 2, -3);
        assert_eq!(physics.block_collider_count(), 1);

        assert!(physics.remove_block(&id));
        assert_eq!(physics.block_collider_count(), 0);
        let hit = physics.cast_view_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z, f32::MAX);
        assert!(hit.is_none());

        // Second removal is an idempotent miss.
        assert!(!physics.remove_block(&id));
    }

    #[test]
    fn player_comes_to_rest_on_a_floor() {
        let mut physics = PhysicsIntegrator::new();
        for x in -2..=2 {
            for z in -2..=2 {
                block_at(&mut physics, x, 0, z);
            }
        }
        // Spawned at y=2.0, floor top at y=0.5: fall, collide, settle.
        for _ in 0..240 {
            physics.apply_intent(Vec3::ZERO, false);
            physics.step(DT);
        }
        let pos = physics.player_position();
        assert!(pos.y > 0.5, "player sank into the floor: {pos}");
        assert!(pos.y < 2.0, "player never fell: {pos}");
        assert!(physics.grounded());
        assert!(physics.player_velocity().y.abs() < 0.1);
    }
}
