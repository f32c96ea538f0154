// src/store.rs

use std::collections::HashMap;

use log::debug;

use crate::catalog::BlockTypeId;
use crate::chunk::{Block, BlockChange, Chunk};
use crate::codec::{decode_chunk, encode_chunk};
use crate::coords::{chunk_id_of, ChunkId, VoxelCoordinate};
use crate::error::WorldError;

/// Owns every loaded chunk. Pure in-memory; persistence belongs to the caller.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkId, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    pub fn ensure(&mut self, id: ChunkId) -> &Chunk {
        self.chunks.entry(id).or_insert_with(|| Chunk::new(id))
    }

    pub fn block_at(&self, coord: VoxelCoordinate) -> Option<BlockTypeId> {
        self.chunks.get(&chunk_id_of(coord))?.get(coord)
    }

    /// Fails with `OutOfBounds` for heights the chunk codec cannot represent.
    pub fn set_block(
        &mut self,
        coord: VoxelCoordinate,
        block_type: BlockTypeId,
    ) -> Result<BlockChange, WorldError> {
        if !coord.in_world_bounds() {
            return Err(WorldError::OutOfBounds { y: coord.y });
        }
        let id = chunk_id_of(coord);
        self.chunks
            .entry(id)
            .or_insert_with(|| Chunk::new(id))
            .set(coord, block_type)
    }

    /// Removes the block at `coord` if present. A chunk left empty is dropped.
    pub fn remove_block(&mut self, coord: VoxelCoordinate) -> Option<Block> {
        let id = chunk_id_of(coord);
        let chunk = self.chunks.get_mut(&id)?;
        let removed = chunk.remove(coord);
        if chunk.is_empty() {
            debug!("Collapsing empty chunk {}", id);
            self.chunks.remove(&id);
        }
        removed
    }

    /// Registers a chunk loaded from persistence, replacing any resident copy.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.id(), chunk);
    }

    pub fn take_chunk(&mut self, id: ChunkId) -> Option<Chunk> {
        self.chunks.remove(&id)
    }

    /// Encodes the chunk for persistence. An absent chunk encodes as empty.
    pub fn serialize(&self, id: ChunkId) -> Vec<u8> {
        match self.chunks.get(&id) {
            Some(chunk) => encode_chunk(chunk),
            None => encode_chunk(&Chunk::new(id)),
        }
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Chunk, WorldError> {
        Ok(decode_chunk(bytes)?)
    }

    /// Decodes `bytes` and registers the result, returning its id.
    pub fn load(&mut self, bytes: &[u8]) -> Result<ChunkId, WorldError> {
        let chunk = Self::deserialize(bytes)?;
        let id = chunk.id();
        if chunk.is_empty() {
            self.chunks.remove(&id);
        } else {
            self.insert_chunk(chunk);
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }
}
