use crate::coords::VoxelCoordinate;
use crate::pick::{
    face_offset, ghost_position, resolve_target, round_to_grid, Action, BlockMeta, PickEvent,
    PickOutcome, PickTarget, PointerButton,
};
use nalgebra::Vector3;
use test_case::test_case;

fn block_hit(coordinate: VoxelCoordinate, hit: [f32; 3], normal: [f32; 3], button: PointerButton) -> PickEvent {
    PickEvent {
        hit_point: Vector3::from(hit),
        normal: Vector3::from(normal),
        target: PickTarget::Block(BlockMeta {
            coordinate,
            block_type: 2,
        }),
        button,
    }
}

fn ground_hit(x: f32, z: f32, button: PointerButton) -> PickEvent {
    PickEvent {
        hit_point: Vector3::new(x, 0.0, z),
        normal: Vector3::new(0.0, 1.0, 0.0),
        target: PickTarget::Ground,
        button,
    }
}

#[test_case(0.5, 1 ; "half rounds up")]
#[test_case(-0.5, -1 ; "negative half rounds away from zero")]
#[test_case(0.49, 0 ; "just below half")]
#[test_case(-0.49, 0 ; "just above negative half")]
#[test_case(2.5, 3 ; "two and a half")]
#[test_case(-2.5, -3 ; "negative two and a half")]
fn test_round_half_away_from_zero(v: f32, expected: i32) {
    assert_eq!(round_to_grid(v), expected);
}

#[test]
fn test_ground_placement_lands_on_layer_zero() {
    let outcome = resolve_target(&ground_hit(3.6, -2.4, PointerButton::Primary));
    assert_eq!(
        outcome,
        Some(PickOutcome {
            coordinate: VoxelCoordinate::new(4, 0, -2),
            action: Action::Place,
        })
    );
}

#[test]
fn test_ground_secondary_does_nothing() {
    assert_eq!(resolve_target(&ground_hit(1.0, 1.0, PointerButton::Secondary)), None);
}

#[test]
fn test_secondary_on_block_removes_that_block() {
    let coord = VoxelCoordinate::new(-3, 4, 9);
    // hit geometry is ignored; the instance metadata wins
    let event = block_hit(coord, [100.0, 100.0, 100.0], [0.0, 1.0, 0.0], PointerButton::Secondary);
    assert_eq!(
        resolve_target(&event),
        Some(PickOutcome {
            coordinate: coord,
            action: Action::Remove,
        })
    );
}

#[test_case([0.0, 1.0, 0.0], (5, 3, 5) ; "top face")]
#[test_case([0.0, -1.0, 0.0], (5, 1, 5) ; "bottom face")]
#[test_case([1.0, 0.0, 0.0], (6, 2, 5) ; "east face")]
#[test_case([-1.0, 0.0, 0.0], (4, 2, 5) ; "west face")]
#[test_case([0.0, 0.0, 1.0], (5, 2, 6) ; "south face")]
#[test_case([0.0, 0.0, -1.0], (5, 2, 4) ; "north face")]
fn test_primary_on_block_places_adjacent(normal: [f32; 3], expected: (i32, i32, i32)) {
    let coord = VoxelCoordinate::new(5, 2, 5);
    let hit = [5.0 + normal[0] * 0.5, 2.0 + normal[1] * 0.5, 5.0 + normal[2] * 0.5];
    let event = block_hit(coord, hit, normal, PointerButton::Primary);
    let outcome = resolve_target(&event).expect("placement");
    assert_eq!(outcome.action, Action::Place);
    assert_eq!(
        outcome.coordinate,
        VoxelCoordinate::new(expected.0, expected.1, expected.2)
    );
}

#[test]
fn test_adjacent_matches_rounded_hit_plus_normal() {
    // for a block centred on its cell, hit + normal rounds to the neighbour cell
    let coord = VoxelCoordinate::new(-2, 0, -7);
    let hit = [-2.2, 0.1, -7.475];
    let normal = [0.0, 0.0, -1.0];
    let event = block_hit(coord, hit, normal, PointerButton::Primary);
    let outcome = resolve_target(&event).expect("placement");
    let rounded = VoxelCoordinate::new(
        round_to_grid(hit[0] + normal[0]),
        round_to_grid(hit[1] + normal[1]),
        round_to_grid(hit[2] + normal[2]),
    );
    assert_eq!(outcome.coordinate, rounded);
}

#[test]
fn test_slanted_normal_uses_dominant_axis() {
    let normal = Vector3::new(0.3, 0.9, -0.2);
    assert_eq!(face_offset(&normal), Some((0, 1, 0)));
    assert_eq!(face_offset(&Vector3::zeros()), None);
    assert_eq!(face_offset(&Vector3::new(f32::NAN, 1.0, 0.0)), None);
}

#[test]
fn test_non_finite_hit_is_ignored() {
    let event = ground_hit(f32::INFINITY, 0.0, PointerButton::Primary);
    assert_eq!(resolve_target(&event), None);
    assert_eq!(ghost_position(&event), None);
}

#[test]
fn test_ghost_follows_place_target_and_stays_above_ground() {
    let coord = VoxelCoordinate::new(1, 0, 1);
    let below = block_hit(coord, [1.0, -0.5, 1.0], [0.0, -1.0, 0.0], PointerButton::Secondary);
    assert_eq!(ghost_position(&below), Some(VoxelCoordinate::new(1, 0, 1)));

    let top = block_hit(coord, [1.0, 0.5, 1.0], [0.0, 1.0, 0.0], PointerButton::Secondary);
    assert_eq!(ghost_position(&top), Some(VoxelCoordinate::new(1, 1, 1)));

    let ground = ground_hit(-0.5, 0.4, PointerButton::Primary);
    assert_eq!(ghost_position(&ground), Some(VoxelCoordinate::new(-1, 0, 0)));
}

#[test]
fn test_face_past_world_edge_places_nothing() {
    let coord = VoxelCoordinate::new(i32::MAX, 4, 0);
    let event = block_hit(coord, [i32::MAX as f32, 4.0, 0.0], [1.0, 0.0, 0.0], PointerButton::Primary);
    assert_eq!(resolve_target(&event), None);
    assert_eq!(ghost_position(&event), None);

    let inward = block_hit(coord, [i32::MAX as f32, 4.0, 0.0], [-1.0, 0.0, 0.0], PointerButton::Primary);
    assert_eq!(
        resolve_target(&inward).map(|o| o.coordinate),
        Some(VoxelCoordinate::new(i32::MAX - 1, 4, 0))
    );
}
