//! Compact on-disk form of a chunk.
//!
//! Layout before compression, all integers little-endian:
//!
//! ```text
//! magic   b"BPCK"
//! version u8
//! cx      i32
//! cz      i32
//! count   u32
//! count * { lx u8, ly u8, lz u8, block_type u16 }
//! ```
//!
//! The whole payload is LZ4 block-compressed with its uncompressed size prepended.

use std::collections::HashSet;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::chunk::Chunk;
use crate::coords::{ChunkId, LocalOffset, CHUNK_SIZE, WORLD_HEIGHT};
use crate::error::ChunkDataError;

const MAGIC: [u8; 4] = *b"BPCK";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 1 + 4 + 4 + 4;
const ENTRY_LEN: usize = 5;
const MAX_ENTRIES: usize = (CHUNK_SIZE * CHUNK_SIZE * WORLD_HEIGHT) as usize;
const MAX_PAYLOAD_LEN: usize = HEADER_LEN + ENTRY_LEN * MAX_ENTRIES;

pub fn encode_chunk(chunk: &Chunk) -> Vec<u8> {
    let blocks = chunk.sorted_blocks();
    let mut raw = Vec::with_capacity(HEADER_LEN + ENTRY_LEN * blocks.len());
    raw.extend_from_slice(&MAGIC);
    raw.push(VERSION);
    raw.extend_from_slice(&chunk.id().x.to_le_bytes());
    raw.extend_from_slice(&chunk.id().z.to_le_bytes());
    raw.extend_from_slice(&(blocks.len() as u32).to_le_bytes());
    for block in &blocks {
        debug_assert!(block.coordinate.in_world_bounds(), "{} is outside the world", block.coordinate);
        let local = block.coordinate.local();
        raw.push(local.x);
        raw.push(local.y as u8);
        raw.push(local.z);
        raw.extend_from_slice(&block.block_type.to_le_bytes());
    }
    compress_prepend_size(&raw)
}

pub fn decode_chunk(bytes: &[u8]) -> Result<Chunk, ChunkDataError> {
    // refuse to allocate for a size prefix no valid chunk could produce
    let claimed = bytes
        .get(..4)
        .map(|prefix| u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize)
        .ok_or(ChunkDataError::Truncated {
            needed: 4,
            actual: bytes.len(),
        })?;
    if claimed > MAX_PAYLOAD_LEN {
        return Err(ChunkDataError::LengthMismatch {
            expected: MAX_PAYLOAD_LEN,
            actual: claimed,
        });
    }

    let raw = decompress_size_prepended(bytes)
        .map_err(|e| ChunkDataError::Decompress(e.to_string()))?;
    decode_raw(&raw)
}

fn decode_raw(raw: &[u8]) -> Result<Chunk, ChunkDataError> {
    if raw.len() < HEADER_LEN {
        return Err(ChunkDataError::Truncated {
            needed: HEADER_LEN,
            actual: raw.len(),
        });
    }
    let magic = [raw[0], raw[1], raw[2], raw[3]];
    if magic != MAGIC {
        return Err(ChunkDataError::BadMagic(magic));
    }
    if raw[4] != VERSION {
        return Err(ChunkDataError::UnsupportedVersion(raw[4]));
    }
    let cx = i32::from_le_bytes([raw[5], raw[6], raw[7], raw[8]]);
    let cz = i32::from_le_bytes([raw[9], raw[10], raw[11], raw[12]]);
    let count = u32::from_le_bytes([raw[13], raw[14], raw[15], raw[16]]) as usize;

    let expected = count
        .checked_mul(ENTRY_LEN)
        .and_then(|body| body.checked_add(HEADER_LEN))
        .unwrap_or(usize::MAX);
    if raw.len() != expected {
        return Err(ChunkDataError::LengthMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let id = ChunkId::new(cx, cz);
    if !id.is_addressable() {
        return Err(ChunkDataError::ChunkIdOutOfRange { x: cx, z: cz });
    }
    let mut chunk = Chunk::new(id);
    let mut seen = HashSet::with_capacity(count);
    for (index, entry) in raw[HEADER_LEN..].chunks_exact(ENTRY_LEN).enumerate() {
        let (lx, ly, lz) = (entry[0], entry[1], entry[2]);
        if lx as i32 >= CHUNK_SIZE || ly as i32 >= WORLD_HEIGHT || lz as i32 >= CHUNK_SIZE {
            return Err(ChunkDataError::LocalOutOfRange {
                x: lx,
                y: ly,
                z: lz,
            });
        }
        let block_type = u16::from_le_bytes([entry[3], entry[4]]);
        if block_type == 0 {
            return Err(ChunkDataError::ZeroBlockType { index });
        }
        let coordinate = id.world_coordinate(LocalOffset {
            x: lx,
            y: ly as i32,
            z: lz,
        });
        if !seen.insert(coordinate) {
            return Err(ChunkDataError::DuplicateBlock(coordinate));
        }
        chunk
            .set(coordinate, block_type)
            .map_err(|_| ChunkDataError::LocalOutOfRange {
                x: lx,
                y: ly,
                z: lz,
            })?;
    }
    Ok(chunk)
}

#[cfg(test)]
pub(crate) fn encode_raw_for_test(raw: &[u8]) -> Vec<u8> {
    compress_prepend_size(raw)
}
