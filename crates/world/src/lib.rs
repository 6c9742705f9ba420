//! Voxel world state: the authoritative block collection and its generator.
//!
//! # Invariants
//! - At most one live block per id; duplicate placement is rejected.
//! - All mutations flow through explicit operations and are recorded in the
//!   event log for the presentation layer.
//! - Generation is bit-for-bit reproducible for a given world size.

pub mod worldgen;
pub mod world;

pub use worldgen::{WORLD_SIZE, generate};
pub use world::{Block, VoxelWorld, WorldError, WorldEvent};
