// src/pick.rs

//! Turns renderer ray-pick hits into discrete block edits.

use nalgebra::Vector3;

use crate::catalog::BlockTypeId;
use crate::coords::VoxelCoordinate;

/// Which pointer button produced the pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Left click / tap: place.
    Primary,
    /// Right click / long press: remove.
    Secondary,
}

/// Metadata the renderer attaches to every block instance it draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMeta {
    pub coordinate: VoxelCoordinate,
    pub block_type: BlockTypeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Ground,
    Block(BlockMeta),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickEvent {
    pub hit_point: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub target: PickTarget,
    pub button: PointerButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Place,
    Remove,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickOutcome {
    pub coordinate: VoxelCoordinate,
    pub action: Action,
}

/// Rounds half away from zero, so 0.5 -> 1 and -0.5 -> -1.
pub fn round_to_grid(v: f32) -> i32 {
    v.round() as i32
}

/// Unit step along the normal's dominant axis. `None` for a zero or non-finite normal.
pub fn face_offset(normal: &Vector3<f32>) -> Option<(i32, i32, i32)> {
    if !normal.iter().all(|c| c.is_finite()) {
        return None;
    }
    let axis = normal.iamax();
    let component = normal[axis];
    if component == 0.0 {
        return None;
    }
    let step = if component > 0.0 { 1 } else { -1 };
    Some(match axis {
        0 => (step, 0, 0),
        1 => (0, step, 0),
        _ => (0, 0, step),
    })
}

fn place_target(event: &PickEvent) -> Option<VoxelCoordinate> {
    if !event.hit_point.iter().all(|c| c.is_finite()) {
        return None;
    }
    match event.target {
        PickTarget::Ground => Some(VoxelCoordinate::new(
            round_to_grid(event.hit_point.x),
            0,
            round_to_grid(event.hit_point.z),
        )),
        PickTarget::Block(meta) => {
            let (dx, dy, dz) = face_offset(&event.normal)?;
            meta.coordinate.offset(dx, dy, dz)
        }
    }
}

/// Resolves a pick into the voxel to edit and how. `None` means the pick does nothing.
pub fn resolve_target(event: &PickEvent) -> Option<PickOutcome> {
    match (event.target, event.button) {
        (PickTarget::Block(meta), PointerButton::Secondary) => Some(PickOutcome {
            coordinate: meta.coordinate,
            action: Action::Remove,
        }),
        (_, PointerButton::Primary) => place_target(event).map(|coordinate| PickOutcome {
            coordinate,
            action: Action::Place,
        }),
        (PickTarget::Ground, PointerButton::Secondary) => None,
    }
}

/// Where the preview block should hover for this pick, regardless of button.
pub fn ghost_position(event: &PickEvent) -> Option<VoxelCoordinate> {
    place_target(event).map(|c| VoxelCoordinate::new(c.x, c.y.max(0), c.z))
}
