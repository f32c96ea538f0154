pub mod chunk;
pub mod placement;
pub mod retention;

pub use chunk::WorldChunk;
pub use placement::{receipt_key, ActivityLog, BlockMutation, PlacementReceipt};
