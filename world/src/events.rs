use crate::catalog::BlockTypeId;
use crate::coords::{ChunkId, VoxelCoordinate};

/// One accepted change, enough for a renderer to add or dispose a single instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    Placed {
        coordinate: VoxelCoordinate,
        block_type: BlockTypeId,
    },
    Removed {
        coordinate: VoxelCoordinate,
    },
}

impl WorldEvent {
    pub fn coordinate(&self) -> VoxelCoordinate {
        match self {
            WorldEvent::Placed { coordinate, .. } | WorldEvent::Removed { coordinate } => *coordinate,
        }
    }

    pub fn chunk(&self) -> ChunkId {
        self.coordinate().chunk()
    }

    /// `None` for removals.
    pub fn block_type(&self) -> Option<BlockTypeId> {
        match self {
            WorldEvent::Placed { block_type, .. } => Some(*block_type),
            WorldEvent::Removed { .. } => None,
        }
    }
}
