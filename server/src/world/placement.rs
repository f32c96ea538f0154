// src/world/placement.rs

use blockplot_world::placement::activity_line;
use blockplot_world::prelude::{ChunkStore, PlacementEngine, TgId, UserProfile, VoxelCoordinate};
use log::{info, warn};
use spacetimedb::{reducer, table, ReducerContext, Table, Timestamp};

use crate::account::profile::{get_or_create_profile, save_profile, UserProfileRow};
use crate::account::session::require_session;
use crate::world::chunk::{load_chunk, save_chunk};
use crate::world::retention::{prune_mutations, MUTATION_HISTORY_PER_CHUNK};

/// Marks a client request id as already applied for its user.
#[table(name = placement_receipt)]
#[derive(Clone, Debug)]
pub struct PlacementReceipt {
    #[primary_key]
    pub key: String,
    pub tg_id: i64,
    pub at: Timestamp,
}

pub fn receipt_key(tg_id: TgId, request_id: &str) -> String {
    format!("{}:{}", tg_id, request_id)
}

#[table(name = activity_log)]
#[derive(Clone, Debug)]
pub struct ActivityLog {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub tg_id: i64,
    pub line: String,
    pub at: Timestamp,
}

/// Public change feed. `block_type` is `None` for removals.
///
/// Only the newest `MUTATION_HISTORY_PER_CHUNK` rows per chunk are kept.
#[table(
    name = block_mutation,
    index(name = idx_mutation_chunk, btree(columns = [chunk_x, chunk_z])),
    public
)]
#[derive(Clone, Debug)]
pub struct BlockMutation {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub coordinate: VoxelCoordinate,
    pub block_type: Option<u16>,
    pub tg_id: i64,
    pub at: Timestamp,
}

fn record_mutation(ctx: &ReducerContext, tg_id: TgId, coordinate: VoxelCoordinate, block_type: Option<u16>) {
    let chunk = coordinate.chunk();
    ctx.db.block_mutation().insert(BlockMutation {
        id: 0,
        chunk_x: chunk.x,
        chunk_z: chunk.z,
        coordinate,
        block_type,
        tg_id,
        at: ctx.timestamp,
    });
    prune_mutations(ctx, chunk, MUTATION_HISTORY_PER_CHUNK);
}

/// Places `block_type` at `coord` for the logged-in caller and credits the reward.
///
/// A repeated `request_id` is acknowledged without touching the world or the balance.
#[reducer]
pub fn place_block(
    ctx: &ReducerContext,
    coord: VoxelCoordinate,
    block_type: u16,
    request_id: Option<String>,
) -> Result<(), String> {
    let tg_id = require_session(ctx)?;

    let receipt = request_id.as_deref().map(|req| receipt_key(tg_id, req));
    if let Some(key) = &receipt {
        if ctx.db.placement_receipt().key().find(key).is_some() {
            info!("Duplicate placement request {} ignored", key);
            return Ok(());
        }
    }

    let row = get_or_create_profile(ctx, tg_id);
    let mut profile = UserProfile::from(row);

    let engine = PlacementEngine::default();
    engine
        .validate_place(&profile, coord, block_type)
        .map_err(|e| {
            warn!("User {} rejected at {}: {}", tg_id, coord, e);
            e.to_string()
        })?;

    let id = coord.chunk();
    let mut store = ChunkStore::new();
    load_chunk(ctx, &mut store, id)?;
    let result = engine
        .place(&mut store, &profile, coord, block_type)
        .map_err(|e| e.to_string())?;
    let mutated = result.change.is_mutation();
    if mutated {
        save_chunk(ctx, &store, id);
    }

    let balance = profile.credit(result.reward);
    save_profile(ctx, UserProfileRow::from(&profile));

    if let Some(key) = receipt {
        ctx.db.placement_receipt().insert(PlacementReceipt {
            key,
            tg_id,
            at: ctx.timestamp,
        });
    }
    ctx.db.activity_log().insert(ActivityLog {
        id: 0,
        tg_id,
        line: activity_line(tg_id, &result.block),
        at: ctx.timestamp,
    });
    if mutated {
        record_mutation(ctx, tg_id, coord, Some(block_type));
    }
    info!("User {} placed {} at {}, balance {}", tg_id, block_type, coord, balance);
    Ok(())
}

/// Clears the block at `coord`. Empty cells are reported as an error and change nothing.
#[reducer]
pub fn remove_block(ctx: &ReducerContext, coord: VoxelCoordinate) -> Result<(), String> {
    let tg_id = require_session(ctx)?;
    let id = coord.chunk();
    let mut store = ChunkStore::new();
    load_chunk(ctx, &mut store, id)?;
    let result = PlacementEngine::default()
        .remove(&mut store, tg_id, coord)
        .map_err(|e| {
            warn!("User {} remove at {} failed: {}", tg_id, coord, e);
            e.to_string()
        })?;
    save_chunk(ctx, &store, result.chunk);
    record_mutation(ctx, tg_id, coord, None);
    Ok(())
}
