use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer position of one grid cell. One cell = one world unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Center of this cell in world space. Blocks are unit cubes centered
    /// on their grid position.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Unique identifier for a placed block.
///
/// Derived deterministically from the grid position as `"x-y-z"`, so the
/// same cell always yields the same id and ids never collide across cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn from_grid(pos: GridPos) -> Self {
        Self(format!("{}-{}-{}", pos.x, pos.y, pos.z))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual material of a block. Cosmetic only; no gameplay behavior differs
/// by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaves,
}
