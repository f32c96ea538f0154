use std::collections::HashMap;

use crate::catalog::BlockTypeId;
use crate::coords::VoxelCoordinate;
use crate::events::WorldEvent;

/// Maps placed coordinates to renderer-owned handles (mesh instances, entities).
///
/// Only [`RenderIndex::apply`] changes it, one spawn or despawn per event.
#[derive(Debug)]
pub struct RenderIndex<H> {
    handles: HashMap<VoxelCoordinate, H>,
}

impl<H> Default for RenderIndex<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> RenderIndex<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: VoxelCoordinate) -> Option<&H> {
        self.handles.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Applies one mutation event. A placement over an existing instance despawns it first.
    pub fn apply<S, D>(&mut self, event: &WorldEvent, mut spawn: S, mut despawn: D)
    where
        S: FnMut(VoxelCoordinate, BlockTypeId) -> H,
        D: FnMut(H),
    {
        match *event {
            WorldEvent::Placed {
                coordinate,
                block_type,
            } => {
                if let Some(old) = self.handles.remove(&coordinate) {
                    despawn(old);
                }
                self.handles.insert(coordinate, spawn(coordinate, block_type));
            }
            WorldEvent::Removed { coordinate } => {
                if let Some(old) = self.handles.remove(&coordinate) {
                    despawn(old);
                }
            }
        }
    }

    /// Drops every handle, e.g. when the scene is torn down.
    pub fn clear<D: FnMut(H)>(&mut self, despawn: D) {
        self.handles.drain().map(|(_, h)| h).for_each(despawn);
    }
}
