// src/profile.rs

use crate::catalog::{BlockType, BlockTypeId};

/// Coins a brand new player starts with.
pub const STARTER_COINS: u64 = 50;

/// Block types every player owns from the start.
pub const STARTER_INVENTORY: [BlockTypeId; 5] = [1, 2, 3, 4, 5];

/// Telegram user id.
pub type TgId = i64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub tg_id: TgId,
    pub username: Option<String>,
    pub coins: u64,
    pub premium: bool,
    /// Sorted, no duplicates.
    inventory: Vec<BlockTypeId>,
    pub streak: u32,
    /// Unix milliseconds of the last daily reward claim, 0 if never.
    pub last_daily: u64,
}

impl UserProfile {
    /// The profile created on first access.
    pub fn new(tg_id: TgId) -> Self {
        Self {
            tg_id,
            username: None,
            coins: STARTER_COINS,
            premium: false,
            inventory: STARTER_INVENTORY.to_vec(),
            streak: 0,
            last_daily: 0,
        }
    }

    pub fn with_inventory(mut self, inventory: impl IntoIterator<Item = BlockTypeId>) -> Self {
        self.inventory = inventory.into_iter().collect();
        self.inventory.sort_unstable();
        self.inventory.dedup();
        self
    }

    pub fn inventory(&self) -> &[BlockTypeId] {
        &self.inventory
    }

    pub fn owns(&self, block_type: BlockTypeId) -> bool {
        self.inventory.binary_search(&block_type).is_ok()
    }

    /// Adds a block type to the inventory. Returns false if it was already owned.
    pub fn grant(&mut self, block_type: BlockTypeId) -> bool {
        match self.inventory.binary_search(&block_type) {
            Ok(_) => false,
            Err(at) => {
                self.inventory.insert(at, block_type);
                true
            }
        }
    }

    /// Whether the player may place this block type.
    pub fn is_entitled_to(&self, block: &BlockType) -> bool {
        !block.is_premium || self.premium || self.owns(block.id)
    }

    /// Adds coins, saturating rather than wrapping.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }
}
