use crate::coords::{ChunkId, VoxelCoordinate};
use crate::error::WorldError;
use crate::placement::PLACEMENT_REWARD;
use crate::profile::{UserProfile, STARTER_COINS};
use crate::shared::{ReceiptWindow, SharedWorld, RECEIPT_WINDOW};
use std::thread;

#[test]
fn test_duplicate_request_credits_once() {
    let world = SharedWorld::new();
    let coord = VoxelCoordinate::new(5, 0, 5);

    let first = world.place(1, Some("req-1"), coord, 2).expect("first");
    let retry = world.place(1, Some("req-1"), coord, 2).expect("retry");

    assert!(!first.duplicate);
    assert_eq!(first.credited, PLACEMENT_REWARD);
    assert!(retry.duplicate);
    assert_eq!(retry.credited, 0);
    assert_eq!(world.block_at(coord), Some(2));
    assert_eq!(world.chunk_len(ChunkId::new(0, 0)), 1);
    assert_eq!(world.profile(1).coins, STARTER_COINS + 1);
}

#[test]
fn test_distinct_requests_credit_each() {
    let world = SharedWorld::new();
    let coord = VoxelCoordinate::new(5, 0, 5);
    world.place(1, Some("a"), coord, 2).expect("a");
    world.place(1, Some("b"), coord, 2).expect("b");
    world.place(1, None, coord, 2).expect("anonymous");
    assert_eq!(world.profile(1).coins, STARTER_COINS + 3);
}

#[test]
fn test_same_request_id_from_different_users_is_not_a_duplicate() {
    let world = SharedWorld::new();
    world.place(1, Some("r"), VoxelCoordinate::new(0, 0, 0), 1).expect("user 1");
    let other = world.place(2, Some("r"), VoxelCoordinate::new(1, 0, 0), 1).expect("user 2");
    assert!(!other.duplicate);
    assert_eq!(world.profile(2).coins, STARTER_COINS + 1);
}

#[test]
fn test_rejection_leaves_no_state() {
    let world = SharedWorld::new();
    world.upsert_profile(UserProfile::new(7).with_inventory([]));
    assert_eq!(
        world.place(7, Some("x"), VoxelCoordinate::new(0, 0, 0), 31),
        Err(WorldError::NotAuthorized { block_type: 31 })
    );
    assert_eq!(world.chunk_count(), 0);
    assert_eq!(world.profile(7).coins, STARTER_COINS);
    // the rejected request id did not consume a receipt
    world.upsert_profile(UserProfile::new(7).with_inventory([31]));
    let accepted = world.place(7, Some("x"), VoxelCoordinate::new(0, 0, 0), 31).expect("now entitled");
    assert!(!accepted.duplicate);
}

#[test]
fn test_remove_collapses_and_reports_missing() {
    let world = SharedWorld::new();
    let coord = VoxelCoordinate::new(-1, 3, -1);
    world.place(1, None, coord, 4).expect("placed");
    assert_eq!(world.chunk_count(), 1);

    let removed = world.remove(1, coord).expect("removed");
    assert_eq!(removed.removed.block_type, 4);
    assert_eq!(world.chunk_count(), 0);
    assert_eq!(world.remove(1, coord), Err(WorldError::NothingToRemove(coord)));
    assert_eq!(world.profile(1).coins, STARTER_COINS + 1);
}

#[test]
fn test_snapshot_and_load() {
    let world = SharedWorld::new();
    world.place(1, None, VoxelCoordinate::new(33, 1, 2), 3).expect("placed");
    let bytes = world.snapshot_chunk(ChunkId::new(1, 0)).expect("chunk present");
    assert!(world.snapshot_chunk(ChunkId::new(5, 5)).is_none());

    let restored = SharedWorld::new();
    assert_eq!(restored.load_chunk(&bytes), Ok(ChunkId::new(1, 0)));
    assert_eq!(restored.block_at(VoxelCoordinate::new(33, 1, 2)), Some(3));
}

#[test]
fn test_concurrent_placements_in_one_chunk_lose_nothing() {
    let world = SharedWorld::new();
    let threads = 8;
    let per_thread = 64;

    thread::scope(|scope| {
        for t in 0..threads {
            let world = &world;
            scope.spawn(move || {
                for i in 0..per_thread {
                    let coord = VoxelCoordinate::new(i % 32, t, i / 32);
                    world.place(1, None, coord, 1).expect("placement");
                }
            });
        }
    });

    assert_eq!(world.chunk_count(), 1);
    assert_eq!(world.chunk_len(ChunkId::new(0, 0)), (threads * per_thread) as usize);
    assert_eq!(
        world.profile(1).coins,
        STARTER_COINS + (threads * per_thread) as u64 * PLACEMENT_REWARD
    );
}

#[test]
fn test_concurrent_retries_credit_exactly_once() {
    let world = SharedWorld::new();
    thread::scope(|scope| {
        for _ in 0..16 {
            let world = &world;
            scope.spawn(move || {
                world
                    .place(9, Some("tap-77"), VoxelCoordinate::new(-40, 2, 70), 5)
                    .expect("placement");
            });
        }
    });
    assert_eq!(world.profile(9).coins, STARTER_COINS + 1);
    assert_eq!(world.block_at(VoxelCoordinate::new(-40, 2, 70)), Some(5));
}

#[test]
fn test_receipt_window_forgets_oldest_first() {
    let mut window = ReceiptWindow::new(3);
    assert!(window.insert("a"));
    assert!(window.insert("b"));
    assert!(window.insert("c"));
    assert!(!window.insert("b"));
    assert_eq!(window.len(), 3);

    assert!(window.insert("d"));
    assert_eq!(window.len(), 3);
    assert!(!window.contains("a"));
    assert!(window.contains("b"));
    assert!(window.insert("a"));
}

#[test]
fn test_receipts_per_user_stay_bounded() {
    let world = SharedWorld::new();
    let coord = VoxelCoordinate::new(2, 0, 2);
    for i in 0..RECEIPT_WINDOW + 10 {
        world.place(9, Some(format!("req-{i}").as_str()), coord, 1).expect("place");
    }
    assert_eq!(world.receipt_count(9), RECEIPT_WINDOW);
    assert_eq!(world.receipt_count(10), 0);

    let recent = world.place(9, Some(format!("req-{}", RECEIPT_WINDOW + 9).as_str()), coord, 1).expect("recent");
    assert!(recent.duplicate);
    let evicted = world.place(9, Some("req-0"), coord, 1).expect("evicted");
    assert!(!evicted.duplicate);
}
