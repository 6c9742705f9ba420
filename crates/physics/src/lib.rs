//! Physics integration over the rapier3d rigid-body solver.
//!
//! # Invariants
//! - Exactly one dynamic body (the player) exists; every other collider is a
//!   fixed unit cube owned by a live block.
//! - The collider ↔ block-id side table stays in lockstep with the world:
//!   colliders are created and destroyed only through this crate's
//!   add/remove operations.
//! - Collision response is the solver's contract; this crate only
//!   orchestrates velocities, the ground probe, and raycasts.

pub mod integrator;

pub use integrator::{
    GRAVITY, GROUND_PROBE, JUMP_SPEED, PLAYER_HALF_EXTENTS, PLAYER_SPAWN, PhysicsIntegrator,
    RayHit,
};
