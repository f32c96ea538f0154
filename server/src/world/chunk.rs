// src/world/chunk.rs

use blockplot_world::chunk::Chunk;
use blockplot_world::codec::encode_chunk;
use blockplot_world::coords::ChunkId;
use blockplot_world::store::ChunkStore;
use log::{debug, error};
use spacetimedb::{table, ReducerContext, Table, Timestamp};

/// One persisted chunk: the LZ4-compressed block list under `world:chunk:{cx}:{cz}`.
///
/// Chunks with no blocks have no row.
#[table(
    name = world_chunk,
    index(name = idx_chunk_xz, btree(columns = [chunk_x, chunk_z])),
    public
)]
#[derive(Clone, Debug)]
pub struct WorldChunk {
    #[primary_key]
    pub key: String,
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub block_count: u32,
    pub payload: Vec<u8>,
    pub updated_at: Timestamp,
}

impl WorldChunk {
    pub fn id(&self) -> ChunkId {
        ChunkId::new(self.chunk_x, self.chunk_z)
    }
}

/// Loads the chunk into `store`. A missing row leaves the store untouched.
pub fn load_chunk(ctx: &ReducerContext, store: &mut ChunkStore, id: ChunkId) -> Result<(), String> {
    let Some(row) = ctx.db.world_chunk().key().find(id.storage_key()) else {
        return Ok(());
    };
    let loaded = store.load(&row.payload).map_err(|e| {
        error!("Chunk {} failed to decode: {}", id, e);
        format!("chunk {} is corrupt: {}", id, e)
    })?;
    if loaded != id {
        error!("Row {} holds chunk {}", row.key, loaded);
        store.take_chunk(loaded);
        return Err(format!("chunk {} is stored under the wrong key", loaded));
    }
    Ok(())
}

/// Writes the resident copy of `id` back, deleting the row once the chunk is empty.
pub fn save_chunk(ctx: &ReducerContext, store: &ChunkStore, id: ChunkId) {
    let table = ctx.db.world_chunk();
    let key = id.storage_key();
    let chunk = match store.get(id) {
        Some(chunk) if !chunk.is_empty() => chunk,
        _ => {
            if table.key().delete(key) {
                debug!("Chunk {} emptied, row dropped", id);
            }
            return;
        }
    };
    let row = chunk_row(chunk, ctx.timestamp);
    if table.key().find(&row.key).is_some() {
        table.key().update(row);
    } else {
        table.insert(row);
    }
}

pub(crate) fn chunk_row(chunk: &Chunk, updated_at: Timestamp) -> WorldChunk {
    let id = chunk.id();
    WorldChunk {
        key: id.storage_key(),
        chunk_x: id.x,
        chunk_z: id.z,
        block_count: chunk.len() as u32,
        payload: encode_chunk(chunk),
        updated_at,
    }
}
