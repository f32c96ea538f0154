use log::info;
use spacetimedb::{reducer, ReducerContext};

pub mod account;
pub mod admin;
pub mod config;
pub mod world;

#[cfg(test)]
mod tests;

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    // Called when the module is initially published
    config::install_defaults(ctx);
    world::retention::schedule_sweep(ctx);
    info!("blockplot module published by {}", ctx.sender);
}

#[reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) {
    info!("Client {} connected", ctx.sender);
}

#[reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) {
    account::session::end_session(ctx);
}
