// src/account/session.rs

use blockplot_world::auth::verify_init_data;
use blockplot_world::profile::TgId;
use log::{info, warn};
use spacetimedb::{reducer, table, Identity, ReducerContext, Table, Timestamp};

use crate::account::profile::{get_or_create_profile, save_profile};
use crate::config::load_config;

/// Binds a connected identity to the Telegram user it proved to be.
#[table(name = session)]
#[derive(Clone, Debug)]
pub struct Session {
    #[primary_key]
    pub identity: Identity,
    pub tg_id: i64,
    pub started_at: Timestamp,
}

pub(crate) fn unix_secs(ts: Timestamp) -> u64 {
    (ts.to_micros_since_unix_epoch() / 1_000_000).max(0) as u64
}

/// The Telegram user behind the caller, or an error if it never logged in.
pub fn require_session(ctx: &ReducerContext) -> Result<TgId, String> {
    ctx.db
        .session()
        .identity()
        .find(ctx.sender)
        .map(|s| s.tg_id)
        .ok_or_else(|| "not logged in".to_string())
}

pub(crate) fn end_session(ctx: &ReducerContext) {
    if ctx.db.session().identity().delete(ctx.sender) {
        info!("Session for {} closed", ctx.sender);
    }
}

/// Verifies Telegram `initData` and starts a session for the caller.
#[reducer]
pub fn login(ctx: &ReducerContext, init_data: String) -> Result<(), String> {
    let config = load_config(ctx)?;
    let verified = verify_init_data(
        &init_data,
        &config.bot_token,
        unix_secs(ctx.timestamp),
        config.auth_max_age_secs,
    )
    .map_err(|e| {
        warn!("Rejected login from {}: {}", ctx.sender, e);
        e.to_string()
    })?;
    let tg_id = verified.user.id;

    let sessions = ctx.db.session();
    let session = Session {
        identity: ctx.sender,
        tg_id,
        started_at: ctx.timestamp,
    };
    if sessions.identity().find(ctx.sender).is_some() {
        sessions.identity().update(session);
    } else {
        sessions.insert(session);
    }

    let mut profile = get_or_create_profile(ctx, tg_id);
    if verified.user.username.is_some() && profile.username != verified.user.username {
        profile.username = verified.user.username;
        save_profile(ctx, profile);
    }
    info!("User {} logged in as {}", tg_id, ctx.sender);
    Ok(())
}
