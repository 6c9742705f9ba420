use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxshot_common::{BlockId, BlockKind, GridPos};

/// An event record produced by every interactive mutation to the world.
///
/// The presentation layer drains these once per frame to keep its scene in
/// sync, replacing implicit reactivity with an explicit change feed. Bulk
/// generation does not emit events; the initial scene is built from a full
/// snapshot instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A block was placed interactively.
    Placed {
        id: BlockId,
        position: GridPos,
        kind: BlockKind,
    },
    /// A block was destroyed.
    Removed {
        id: BlockId,
        position: GridPos,
        kind: BlockKind,
    },
}

/// Errors produced by world mutations.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A block with this id is already placed. The source this design is
    /// derived from silently allowed duplicate ids; we reject them so that
    /// remove-by-id stays unambiguous.
    #[error("cell {0} is already occupied")]
    Occupied(GridPos),
}

/// One placed unit-cube world element. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub position: GridPos,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(position: GridPos, kind: BlockKind) -> Self {
        Self {
            id: BlockId::from_grid(position),
            position,
            kind,
        }
    }
}

/// The authoritative set of placed blocks.
///
/// Insertion order defines iteration order for rendering; it carries no
/// gameplay meaning. Owned exclusively by the session and mutated only
/// through [`VoxelWorld::add`] / [`VoxelWorld::remove`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxelWorld {
    blocks: Vec<Block>,
    /// Append-only log of interactive mutations.
    #[serde(skip)]
    event_log: Vec<WorldEvent>,
}

impl VoxelWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world pre-filled with the deterministic flat terrain for
    /// the given size. No events are emitted for generated blocks.
    pub fn generated(size: i32) -> Self {
        Self {
            blocks: crate::worldgen::generate(size),
            event_log: Vec::new(),
        }
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Read-only snapshot of all blocks in insertion order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Look up a block by id.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Drain and return the event log. Called once per frame by the
    /// presentation layer.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the pending event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Place a block of the fixed default kind (stone; there is no
    /// block-type selection surface). Rejects occupied cells.
    pub fn add(&mut self, position: GridPos) -> Result<&Block, WorldError> {
        self.place(position, BlockKind::Stone)
    }

    /// Place a block of an explicit kind. Rejects occupied cells.
    pub fn place(&mut self, position: GridPos, kind: BlockKind) -> Result<&Block, WorldError> {
        let id = BlockId::from_grid(position);
        if self.contains(&id) {
            return Err(WorldError::Occupied(position));
        }
        tracing::debug!(%id, %position, ?kind, "block placed");
        self.event_log.push(WorldEvent::Placed {
            id: id.clone(),
            position,
            kind,
        });
        self.blocks.push(Block { id, position, kind });
        Ok(self.blocks.last().expect("just pushed"))
    }

    /// Remove the block with the given id. Returns the block if it existed;
    /// a miss is a silent no-op, not an error (remove is idempotent).
    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let idx = self.blocks.iter().position(|b| &b.id == id)?;
        let block = self.blocks.remove(idx);
        tracing::debug!(%id, "block removed");
        self.event_log.push(WorldEvent::Removed {
            id: block.id.clone(),
            position: block.position,
            kind: block.kind,
        });
        Some(block)
    }
}
