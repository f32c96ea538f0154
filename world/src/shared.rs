//! A thread-safe world for hosts that run outside SpacetimeDB.
//!
//! Chunks are the unit of isolation: an edit holds the chunk's map entry for the
//! whole read-modify-write, so two edits to one chunk serialize while edits to
//! other chunks proceed. Coin credits take the user's entry, and a per-user
//! receipt window of recent request ids makes retried placements credit once.

use std::collections::{HashSet, VecDeque};

use dashmap::DashMap;
use log::{debug, info};

use crate::catalog::{catalog, BlockTypeId};
use crate::chunk::Chunk;
use crate::codec::{decode_chunk, encode_chunk};
use crate::coords::{ChunkId, VoxelCoordinate};
use crate::error::WorldError;
use crate::placement::{
    placement_result, removal_result, PlacementEngine, PlacementResult, RemovalResult,
};
use crate::profile::{TgId, UserProfile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub result: PlacementResult,
    /// Coins actually credited; zero for a recognised retry.
    pub credited: u64,
    /// Balance after the credit.
    pub coins: u64,
    pub duplicate: bool,
}

/// Request ids remembered per user. Older ids are forgotten first.
pub const RECEIPT_WINDOW: usize = 256;

/// The most recent request ids of one user, capped at a fixed size.
#[derive(Clone, Debug)]
pub struct ReceiptWindow {
    capacity: usize,
    order: VecDeque<String>,
    seen: HashSet<String>,
}

impl ReceiptWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    /// Records `request_id`. Returns false if it is already in the window.
    pub fn insert(&mut self, request_id: &str) -> bool {
        if self.seen.contains(request_id) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.order.push_back(request_id.to_string());
        self.seen.insert(request_id.to_string());
        true
    }

    pub fn contains(&self, request_id: &str) -> bool {
        self.seen.contains(request_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub struct SharedWorld {
    engine: PlacementEngine<'static>,
    chunks: DashMap<ChunkId, Chunk>,
    profiles: DashMap<TgId, UserProfile>,
    receipts: DashMap<TgId, ReceiptWindow>,
}

impl Default for SharedWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedWorld {
    pub fn new() -> Self {
        Self {
            engine: PlacementEngine::new(catalog()),
            chunks: DashMap::new(),
            profiles: DashMap::new(),
            receipts: DashMap::new(),
        }
    }

    /// Snapshot of the user's profile, created with starter values on first access.
    pub fn profile(&self, tg_id: TgId) -> UserProfile {
        self.profiles
            .entry(tg_id)
            .or_insert_with(|| UserProfile::new(tg_id))
            .clone()
    }

    pub fn upsert_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.tg_id, profile);
    }

    pub fn block_at(&self, coord: VoxelCoordinate) -> Option<BlockTypeId> {
        self.chunks.get(&coord.chunk())?.get(coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk_len(&self, id: ChunkId) -> usize {
        self.chunks.get(&id).map_or(0, |chunk| chunk.len())
    }

    /// Places a block and credits the reward. A `request_id` still in the user's
    /// receipt window re-applies the block (a no-op) but credits nothing.
    pub fn place(
        &self,
        tg_id: TgId,
        request_id: Option<&str>,
        coord: VoxelCoordinate,
        block_type: BlockTypeId,
    ) -> Result<PlacementOutcome, WorldError> {
        let profile = self.profile(tg_id);
        self.engine.validate_place(&profile, coord, block_type)?;

        let id = coord.chunk();
        let change = self
            .chunks
            .entry(id)
            .or_insert_with(|| Chunk::new(id))
            .set(coord, block_type)?;
        let result = placement_result(coord, block_type, change);

        let fresh = match request_id {
            Some(request_id) => self
                .receipts
                .entry(tg_id)
                .or_insert_with(|| ReceiptWindow::new(RECEIPT_WINDOW))
                .insert(request_id),
            None => true,
        };
        let mut entry = self
            .profiles
            .entry(tg_id)
            .or_insert_with(|| UserProfile::new(tg_id));
        let credited = if fresh { result.reward } else { 0 };
        let coins = entry.credit(credited);
        drop(entry);

        if fresh {
            debug!("User {} placed {} at {}", tg_id, block_type, coord);
        } else {
            info!(
                "Duplicate placement request {:?} from user {}, not credited",
                request_id, tg_id
            );
        }
        Ok(PlacementOutcome {
            result,
            credited,
            coins,
            duplicate: !fresh,
        })
    }

    pub fn remove(&self, tg_id: TgId, coord: VoxelCoordinate) -> Result<RemovalResult, WorldError> {
        let id = coord.chunk();
        let removed = self
            .chunks
            .get_mut(&id)
            .and_then(|mut chunk| chunk.remove(coord))
            .ok_or(WorldError::NothingToRemove(coord))?;
        self.chunks.remove_if(&id, |_, chunk| chunk.is_empty());
        debug!("User {} removed block at {}", tg_id, coord);
        Ok(removal_result(removed))
    }

    /// Number of request ids currently remembered for `tg_id`.
    pub fn receipt_count(&self, tg_id: TgId) -> usize {
        self.receipts.get(&tg_id).map_or(0, |window| window.len())
    }

    /// Encoded chunk for persistence, taken under the chunk's lock.
    pub fn snapshot_chunk(&self, id: ChunkId) -> Option<Vec<u8>> {
        self.chunks.get(&id).map(|chunk| encode_chunk(&chunk))
    }

    pub fn load_chunk(&self, bytes: &[u8]) -> Result<ChunkId, WorldError> {
        let chunk = decode_chunk(bytes)?;
        let id = chunk.id();
        if chunk.is_empty() {
            self.chunks.remove(&id);
        } else {
            self.chunks.insert(id, chunk);
        }
        Ok(id)
    }
}
