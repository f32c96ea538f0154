// src/prelude.rs
//! A convenient prelude re-exporting the common world types.

pub use crate::catalog::{catalog, BlockCatalog, BlockType, BlockTypeId, RenderClass};
pub use crate::chunk::{Block, BlockChange, Chunk};
pub use crate::coords::{
    chunk_id_of, local_offset_of, ChunkId, LocalOffset, VoxelCoordinate, CHUNK_SIZE, WORLD_HEIGHT,
};
pub use crate::error::{ChunkDataError, WorldError};
pub use crate::events::WorldEvent;
pub use crate::placement::{PlacementEngine, PlacementResult, RemovalResult, PLACEMENT_REWARD};
pub use crate::profile::{TgId, UserProfile, STARTER_COINS, STARTER_INVENTORY};
pub use crate::store::ChunkStore;
