// src/world/retention.rs

use std::time::Duration;

use blockplot_world::coords::ChunkId;
use log::{debug, info};
use spacetimedb::{reducer, table, ReducerContext, ScheduleAt, Table};

use crate::account::session::unix_secs;
use crate::world::placement::{activity_log, block_mutation, placement_receipt};

/// Mutation rows kept per chunk; older edits are already folded into `world_chunk`.
pub const MUTATION_HISTORY_PER_CHUNK: usize = 64;

/// A request id older than this may be replayed and will be applied again.
pub const RECEIPT_TTL_SECS: u64 = 86_400;

pub const ACTIVITY_TTL_SECS: u64 = 30 * 86_400;

pub const SWEEP_INTERVAL_SECS: u64 = 3_600;

#[table(name = retention_sweep, scheduled(sweep_expired))]
pub struct RetentionSweep {
    #[primary_key]
    #[auto_inc]
    pub scheduled_id: u64,
    pub scheduled_at: ScheduleAt,
}

pub fn is_expired(at_secs: u64, now_secs: u64, ttl_secs: u64) -> bool {
    now_secs.saturating_sub(at_secs) >= ttl_secs
}

/// Ids to delete so that only the newest `keep` remain. Auto-inc ids grow with time.
pub fn ids_beyond_history(mut ids: Vec<u64>, keep: usize) -> Vec<u64> {
    ids.sort_unstable_by(|a, b| b.cmp(a));
    let keep = keep.min(ids.len());
    ids.split_off(keep)
}

pub(crate) fn schedule_sweep(ctx: &ReducerContext) {
    let table = ctx.db.retention_sweep();
    if table.count() == 0 {
        table.insert(RetentionSweep {
            scheduled_id: 0,
            scheduled_at: ScheduleAt::Interval(Duration::from_secs(SWEEP_INTERVAL_SECS).into()),
        });
    }
}

/// Trims the public mutation feed of `chunk` to its newest `keep` rows.
pub(crate) fn prune_mutations(ctx: &ReducerContext, chunk: ChunkId, keep: usize) {
    let mutations = ctx.db.block_mutation();
    let ids: Vec<u64> = mutations
        .idx_mutation_chunk()
        .filter((chunk.x, chunk.z))
        .map(|m| m.id)
        .collect();
    let stale = ids_beyond_history(ids, keep);
    if !stale.is_empty() {
        debug!("Pruning {} mutation rows of chunk {}", stale.len(), chunk);
    }
    for id in stale {
        mutations.id().delete(id);
    }
}

#[reducer]
pub fn sweep_expired(ctx: &ReducerContext, _sweep: RetentionSweep) -> Result<(), String> {
    if ctx.sender != ctx.identity() {
        return Err("sweep_expired is run by the scheduler only".to_string());
    }
    let now = unix_secs(ctx.timestamp);

    let receipts = ctx.db.placement_receipt();
    let expired: Vec<String> = receipts
        .iter()
        .filter(|r| is_expired(unix_secs(r.at), now, RECEIPT_TTL_SECS))
        .map(|r| r.key)
        .collect();
    let receipt_count = expired.len();
    for key in expired {
        receipts.key().delete(key);
    }

    let activity = ctx.db.activity_log();
    let old: Vec<u64> = activity
        .iter()
        .filter(|a| is_expired(unix_secs(a.at), now, ACTIVITY_TTL_SECS))
        .map(|a| a.id)
        .collect();
    let activity_count = old.len();
    for id in old {
        activity.id().delete(id);
    }

    if receipt_count + activity_count > 0 {
        info!(
            "Swept {} receipts and {} activity lines",
            receipt_count, activity_count
        );
    }
    Ok(())
}
