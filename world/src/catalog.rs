// src/catalog.rs

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Which block type occupies a voxel. Zero is never a valid id.
pub type BlockTypeId = u16;

/// How a renderer should treat the block's material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderClass {
    Solid,
    Fluid,
    Light,
}

impl RenderClass {
    /// Emissive scale applied to the base color.
    pub fn emissive(&self) -> f32 {
        match self {
            RenderClass::Light => 0.6,
            RenderClass::Solid | RenderClass::Fluid => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockType {
    pub id: BlockTypeId,
    pub name: &'static str,
    /// `#RRGGBB`
    pub color: &'static str,
    pub is_premium: bool,
    pub class: RenderClass,
}

impl BlockType {
    /// Base color as linear 0..1 RGB, for renderers.
    pub fn base_color(&self) -> [f32; 3] {
        let channel = |range: std::ops::Range<usize>| {
            self.color
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .map_or(0.0, |v| v as f32 / 255.0)
        };
        [channel(1..3), channel(3..5), channel(5..7)]
    }
}

/// Immutable table of every block type a player can place.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    blocks: BTreeMap<BlockTypeId, BlockType>,
}

impl BlockCatalog {
    pub fn new(blocks: impl IntoIterator<Item = BlockType>) -> Self {
        Self {
            blocks: blocks.into_iter().map(|b| (b.id, b)).collect(),
        }
    }

    pub fn standard() -> Self {
        use RenderClass::*;
        let block = |id, name, color, is_premium, class| BlockType {
            id,
            name,
            color,
            is_premium,
            class,
        };
        Self::new([
            block(1, "Dirt", "#5D4037", false, Solid),
            block(2, "Grass", "#7CB342", false, Solid),
            block(3, "Stone", "#9E9E9E", false, Solid),
            block(4, "Wood", "#795548", false, Solid),
            block(5, "Leaves", "#2E7D32", false, Solid),
            block(31, "Neon Blue", "#00D1FF", true, Light),
            block(32, "Lava", "#FF5722", true, Light),
            block(33, "Gold", "#FFD700", true, Solid),
            block(34, "Diamond", "#00E5FF", true, Solid),
            block(35, "TNT", "#D50000", true, Solid),
        ])
    }

    pub fn get(&self, id: BlockTypeId) -> Option<&BlockType> {
        self.blocks.get(&id)
    }

    pub fn contains(&self, id: BlockTypeId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

static CATALOG: Lazy<BlockCatalog> = Lazy::new(BlockCatalog::standard);

/// The process-wide catalog, built on first use.
pub fn catalog() -> &'static BlockCatalog {
    &CATALOG
}
