use crate::world::Block;
use voxshot_common::{BlockKind, GridPos};

/// Default side length of the square terrain slab, in cells.
pub const WORLD_SIZE: i32 = 32;

/// Deterministic procedural fill: a flat three-layer slab plus one tree.
///
/// For x, z in [-size/2, size/2): stone at y=0, dirt at y=1, grass at y=2.
/// The tree sits on the origin column: two wood blocks at y=3..4, a leaf
/// crown at y=5 and at the four horizontal neighbors of the y=4 trunk.
/// Total count is 3·size² + 7. No randomness is involved; two calls with
/// the same size produce identical output.
pub fn generate(size: i32) -> Vec<Block> {
    let half = size / 2;
    let mut blocks = Vec::with_capacity((3 * size * size + 7) as usize);

    for x in -half..half {
        for z in -half..half {
            blocks.push(Block::new(GridPos::new(x, 0, z), BlockKind::Stone));
            blocks.push(Block::new(GridPos::new(x, 1, z), BlockKind::Dirt));
            blocks.push(Block::new(GridPos::new(x, 2, z), BlockKind::Grass));
        }
    }

    // Trunk
    blocks.push(Block::new(GridPos::new(0, 3, 0), BlockKind::Wood));
    blocks.push(Block::new(GridPos::new(0, 4, 0), BlockKind::Wood));
    // Crown: cap plus the four horizontal neighbors of the upper trunk
    blocks.push(Block::new(GridPos::new(0, 5, 0), BlockKind::Leaves));
    blocks.push(Block::new(GridPos::new(1, 4, 0), BlockKind::Leaves));
    blocks.push(Block::new(GridPos::new(-1, 4, 0), BlockKind::Leaves));
    blocks.push(Block::new(GridPos::new(0, 4, 1), BlockKind::Leaves));
    blocks.push(Block::new(GridPos::new(0, 4, -1), BlockKind::Leaves));

    blocks
}
