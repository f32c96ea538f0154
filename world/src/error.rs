use std::fmt;

use crate::catalog::BlockTypeId;
use crate::coords::VoxelCoordinate;

/// Why a stored chunk payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkDataError {
    Decompress(String),
    BadMagic([u8; 4]),
    UnsupportedVersion(u8),
    Truncated { needed: usize, actual: usize },
    LengthMismatch { expected: usize, actual: usize },
    ChunkIdOutOfRange { x: i32, z: i32 },
    LocalOutOfRange { x: u8, y: u8, z: u8 },
    ZeroBlockType { index: usize },
    DuplicateBlock(VoxelCoordinate),
}

impl fmt::Display for ChunkDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decompress(message) => write!(f, "chunk payload failed to decompress: {message}"),
            Self::BadMagic(magic) => write!(f, "chunk payload has bad magic {magic:?}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported chunk payload version {version}")
            }
            Self::Truncated { needed, actual } => {
                write!(f, "chunk payload truncated: need {needed} bytes, got {actual}")
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "chunk payload length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::ChunkIdOutOfRange { x, z } => {
                write!(f, "chunk id ({x}, {z}) is outside the addressable world")
            }
            Self::LocalOutOfRange { x, y, z } => {
                write!(f, "chunk entry local offset ({x}, {y}, {z}) out of range")
            }
            Self::ZeroBlockType { index } => write!(f, "chunk entry {index} has block type 0"),
            Self::DuplicateBlock(coord) => write!(f, "chunk payload repeats block at {coord}"),
        }
    }
}

impl std::error::Error for ChunkDataError {}

/// Rejections from the placement engine and the chunk store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    OutOfBounds { y: i32 },
    UnknownBlockType(BlockTypeId),
    NotAuthorized { block_type: BlockTypeId },
    NothingToRemove(VoxelCoordinate),
    CorruptChunkData(ChunkDataError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { y } => write!(f, "y = {y} is outside the world height"),
            Self::UnknownBlockType(id) => write!(f, "unknown block type {id}"),
            Self::NotAuthorized { block_type } => {
                write!(f, "not entitled to place premium block {block_type}")
            }
            Self::NothingToRemove(coord) => write!(f, "no block at {coord} to remove"),
            Self::CorruptChunkData(error) => write!(f, "corrupt chunk data: {error}"),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CorruptChunkData(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ChunkDataError> for WorldError {
    fn from(value: ChunkDataError) -> Self {
        Self::CorruptChunkData(value)
    }
}
