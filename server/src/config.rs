// src/config.rs

use blockplot_world::auth::secrets_match;
use log::info;
use spacetimedb::{reducer, table, Identity, ReducerContext, Table};

/// Default freshness window for Telegram `initData`, one day.
pub const DEFAULT_AUTH_MAX_AGE_SECS: u64 = 86_400;

const CONFIG_ID: u8 = 0;

/// Runtime secrets. Private: never replicated to clients.
#[table(name = server_config)]
#[derive(Clone, Debug)]
pub struct ServerConfig {
    #[primary_key]
    pub id: u8,
    /// Identity that published the module; the only one allowed to reconfigure it.
    pub owner: Identity,
    pub bot_token: String,
    pub admin_password: String,
    pub auth_max_age_secs: Option<u64>,
}

impl ServerConfig {
    pub fn unconfigured(owner: Identity) -> Self {
        Self {
            id: CONFIG_ID,
            owner,
            bot_token: String::new(),
            admin_password: String::new(),
            auth_max_age_secs: Some(DEFAULT_AUTH_MAX_AGE_SECS),
        }
    }

    /// An empty configured password never matches, so admin actions stay locked until set.
    pub fn check_admin_password(&self, password: &str) -> Result<(), String> {
        if self.admin_password.is_empty() {
            return Err("admin password is not configured".to_string());
        }
        if !secrets_match(&self.admin_password, password) {
            return Err("invalid admin password".to_string());
        }
        Ok(())
    }
}

pub(crate) fn install_defaults(ctx: &ReducerContext) {
    let table = ctx.db.server_config();
    if table.id().find(CONFIG_ID).is_none() {
        table.insert(ServerConfig::unconfigured(ctx.sender));
    }
}

pub fn load_config(ctx: &ReducerContext) -> Result<ServerConfig, String> {
    ctx.db
        .server_config()
        .id()
        .find(CONFIG_ID)
        .ok_or_else(|| "server is not initialised".to_string())
}

#[reducer]
pub fn configure(
    ctx: &ReducerContext,
    bot_token: String,
    admin_password: String,
    auth_max_age_secs: Option<u64>,
) -> Result<(), String> {
    let mut config = load_config(ctx)?;
    if ctx.sender != config.owner {
        return Err("only the module owner may configure the server".to_string());
    }
    config.bot_token = bot_token;
    config.admin_password = admin_password;
    config.auth_max_age_secs = auth_max_age_secs;
    ctx.db.server_config().id().update(config);
    info!("Server configuration updated");
    Ok(())
}
