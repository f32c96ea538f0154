// src/lib.rs

//! Voxel world model shared by the server module and native hosts.
//! Server builds enable the `server` feature to derive SpacetimeType on coordinates.

pub mod auth;
pub mod catalog;
pub mod chunk;
pub mod codec;
pub mod coords;
pub mod error;
pub mod events;
pub mod game_state;
pub mod pick;
pub mod placement;
pub mod prelude;
pub mod profile;
pub mod render_index;
pub mod shared;
pub mod store;

#[cfg(test)]
mod tests;
