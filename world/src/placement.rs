// src/placement.rs

use log::{debug, info};

use crate::catalog::{catalog, BlockCatalog, BlockType, BlockTypeId};
use crate::chunk::{Block, BlockChange};
use crate::coords::{ChunkId, VoxelCoordinate};
use crate::error::WorldError;
use crate::events::WorldEvent;
use crate::profile::{TgId, UserProfile};
use crate::store::ChunkStore;

/// Coins credited for every accepted placement.
pub const PLACEMENT_REWARD: u64 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementResult {
    pub block: Block,
    pub chunk: ChunkId,
    pub change: BlockChange,
    /// Coins the caller must credit together with persisting `chunk`.
    pub reward: u64,
    pub event: WorldEvent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalResult {
    pub removed: Block,
    pub chunk: ChunkId,
    pub event: WorldEvent,
}

/// Validates and applies block edits against a [`ChunkStore`].
///
/// The engine never touches balances or storage; it reports the reward and the
/// touched chunk so the caller can persist both in one step.
#[derive(Clone, Copy, Debug)]
pub struct PlacementEngine<'a> {
    catalog: &'a BlockCatalog,
}

impl Default for PlacementEngine<'static> {
    fn default() -> Self {
        Self::new(catalog())
    }
}

impl<'a> PlacementEngine<'a> {
    pub fn new(catalog: &'a BlockCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a BlockCatalog {
        self.catalog
    }

    /// Every check a placement must pass, in order: bounds, catalog, entitlement.
    pub fn validate_place(
        &self,
        profile: &UserProfile,
        coord: VoxelCoordinate,
        block_type: BlockTypeId,
    ) -> Result<&'a BlockType, WorldError> {
        if !coord.in_world_bounds() {
            return Err(WorldError::OutOfBounds { y: coord.y });
        }
        let block = self
            .catalog
            .get(block_type)
            .ok_or(WorldError::UnknownBlockType(block_type))?;
        if !profile.is_entitled_to(block) {
            return Err(WorldError::NotAuthorized { block_type });
        }
        Ok(block)
    }

    pub fn place(
        &self,
        store: &mut ChunkStore,
        profile: &UserProfile,
        coord: VoxelCoordinate,
        block_type: BlockTypeId,
    ) -> Result<PlacementResult, WorldError> {
        let block = self.validate_place(profile, coord, block_type)?;
        let change = store.set_block(coord, block_type)?;
        debug!(
            "User {} placed {} at {} ({:?})",
            profile.tg_id, block.name, coord, change
        );
        Ok(placement_result(coord, block_type, change))
    }

    pub fn remove(
        &self,
        store: &mut ChunkStore,
        tg_id: TgId,
        coord: VoxelCoordinate,
    ) -> Result<RemovalResult, WorldError> {
        let removed = store
            .remove_block(coord)
            .ok_or(WorldError::NothingToRemove(coord))?;
        info!("User {} removed block {} at {}", tg_id, removed.block_type, coord);
        Ok(removal_result(removed))
    }
}

pub(crate) fn placement_result(
    coord: VoxelCoordinate,
    block_type: BlockTypeId,
    change: BlockChange,
) -> PlacementResult {
    PlacementResult {
        block: Block {
            coordinate: coord,
            block_type,
        },
        chunk: coord.chunk(),
        change,
        reward: PLACEMENT_REWARD,
        event: WorldEvent::Placed {
            coordinate: coord,
            block_type,
        },
    }
}

pub(crate) fn removal_result(removed: Block) -> RemovalResult {
    RemovalResult {
        chunk: removed.coordinate.chunk(),
        event: WorldEvent::Removed {
            coordinate: removed.coordinate,
        },
        removed,
    }
}

/// Audit line appended to the activity log for a placement.
pub fn activity_line(tg_id: TgId, block: &Block) -> String {
    format!("{} placed {} at {}", tg_id, block.block_type, block.coordinate)
}
