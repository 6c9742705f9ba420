//! Simulation kernel: the per-tick control flow of the voxel shooter.
//!
//! # Invariants
//! - All shared mutable state (controls, world, physics) lives inside the
//!   session and is mutated from exactly one place per tick.
//! - Block and collider lifecycles stay in lockstep: every placement and
//!   removal goes through the session or the targeting system.
//! - Nothing in the tick path blocks or suspends; the only time-bounded
//!   behavior is the fire cooldown, a monotonic-clock comparison.

pub mod camera;
pub mod controller;
pub mod session;
pub mod targeting;

pub use camera::Camera;
pub use controller::{MOVE_SPEED, PlayerController};
pub use session::{PlayerSnapshot, Session, SessionSnapshot};
pub use targeting::{FIRE_COOLDOWN, TargetingSystem};
