//! Shared types and utilities for the voxshot simulation core.
//!
//! # Invariants
//! - Block ids derive deterministically from integer grid position.
//! - One grid cell is one world unit; colliders and rendering agree on this.

pub mod types;

pub use types::{BlockId, BlockKind, GridPos};
