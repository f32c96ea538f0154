// src/chunk.rs

use std::collections::HashMap;

use crate::catalog::BlockTypeId;
use crate::coords::{ChunkId, VoxelCoordinate};
use crate::error::WorldError;

/// A placed voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub coordinate: VoxelCoordinate,
    pub block_type: BlockTypeId,
}

/// What a `set` did to the chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockChange {
    Inserted,
    Replaced { previous: BlockTypeId },
    Unchanged,
}

impl BlockChange {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, BlockChange::Unchanged)
    }
}

/// A full-height column of sparse blocks. Holds at most one block per coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    id: ChunkId,
    blocks: HashMap<VoxelCoordinate, BlockTypeId>,
}

impl Chunk {
    pub fn new(id: ChunkId) -> Self {
        Self {
            id,
            blocks: HashMap::new(),
        }
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn get(&self, coord: VoxelCoordinate) -> Option<BlockTypeId> {
        self.blocks.get(&coord).copied()
    }

    pub fn contains(&self, coord: VoxelCoordinate) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Insert or replace the block at `coord`. The coordinate must belong to this chunk.
    ///
    /// Heights outside `0..WORLD_HEIGHT` are refused, so every stored block encodes.
    pub fn set(
        &mut self,
        coord: VoxelCoordinate,
        block_type: BlockTypeId,
    ) -> Result<BlockChange, WorldError> {
        debug_assert_eq!(coord.chunk(), self.id, "{coord} is not inside chunk {}", self.id);
        if !coord.in_world_bounds() {
            return Err(WorldError::OutOfBounds { y: coord.y });
        }
        Ok(match self.blocks.insert(coord, block_type) {
            None => BlockChange::Inserted,
            Some(previous) if previous == block_type => BlockChange::Unchanged,
            Some(previous) => BlockChange::Replaced { previous },
        })
    }

    pub fn remove(&mut self, coord: VoxelCoordinate) -> Option<Block> {
        self.blocks.remove(&coord).map(|block_type| Block {
            coordinate: coord,
            block_type,
        })
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks.iter().map(|(&coordinate, &block_type)| Block {
            coordinate,
            block_type,
        })
    }

    /// Blocks in (y, z, x) order, the order the codec writes them in.
    pub fn sorted_blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self.blocks().collect();
        blocks.sort_by_key(|b| (b.coordinate.y, b.coordinate.z, b.coordinate.x));
        blocks
    }
}
