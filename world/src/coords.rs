// src/coords.rs

use std::fmt;

#[cfg(feature = "server")]
use spacetimedb::SpacetimeType;

/// How many voxels per edge of a chunk (x and z).
pub const CHUNK_SIZE: i32 = 32;

/// Number of placeable layers; y must lie in `0..WORLD_HEIGHT`.
pub const WORLD_HEIGHT: i32 = 128;

/// Smallest chunk index whose voxels fit in `i32`.
pub const MIN_CHUNK_INDEX: i32 = i32::MIN.div_euclid(CHUNK_SIZE);

/// Largest chunk index whose voxels fit in `i32`.
pub const MAX_CHUNK_INDEX: i32 = i32::MAX.div_euclid(CHUNK_SIZE);

/// A voxel position in world space.
#[cfg_attr(feature = "server", derive(SpacetimeType))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn in_world_bounds(&self) -> bool {
        (0..WORLD_HEIGHT).contains(&self.y)
    }

    pub fn chunk(&self) -> ChunkId {
        chunk_id_of(*self)
    }

    pub fn local(&self) -> LocalOffset {
        local_offset_of(*self)
    }

    /// `None` when any axis would leave the `i32` range.
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }
}

impl fmt::Display for VoxelCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Chunk column indices on the XZ plane.
#[cfg_attr(feature = "server", derive(SpacetimeType))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId {
    pub x: i32,
    pub z: i32,
}

impl ChunkId {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// True when every voxel of the chunk has an `i32` world coordinate.
    /// Ids derived from a coordinate always are; ids read from storage may not be.
    pub fn is_addressable(&self) -> bool {
        let range = MIN_CHUNK_INDEX..=MAX_CHUNK_INDEX;
        range.contains(&self.x) && range.contains(&self.z)
    }

    /// World coordinate of the chunk's local (0, 0, 0). The id must be addressable.
    pub fn origin(&self) -> VoxelCoordinate {
        VoxelCoordinate::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    pub fn world_coordinate(&self, local: LocalOffset) -> VoxelCoordinate {
        VoxelCoordinate::new(
            self.x * CHUNK_SIZE + local.x as i32,
            local.y,
            self.z * CHUNK_SIZE + local.z as i32,
        )
    }

    /// Key the chunk is persisted under.
    pub fn storage_key(&self) -> String {
        format!("world:chunk:{}:{}", self.x, self.z)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Position inside a chunk column. x and z are in `0..CHUNK_SIZE`, y is the world y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalOffset {
    pub x: u8,
    pub y: i32,
    pub z: u8,
}

pub fn chunk_id_of(coord: VoxelCoordinate) -> ChunkId {
    // div_euclid floors for a positive divisor, so -1 lands in chunk -1
    ChunkId {
        x: coord.x.div_euclid(CHUNK_SIZE),
        z: coord.z.div_euclid(CHUNK_SIZE),
    }
}

pub fn local_offset_of(coord: VoxelCoordinate) -> LocalOffset {
    LocalOffset {
        x: coord.x.rem_euclid(CHUNK_SIZE) as u8,
        y: coord.y,
        z: coord.z.rem_euclid(CHUNK_SIZE) as u8,
    }
}
