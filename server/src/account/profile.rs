// src/account/profile.rs

use blockplot_world::profile::{TgId, UserProfile};
use log::info;
use spacetimedb::{table, ReducerContext, Table};

/// Persisted player record, keyed like `user:{tgId}`.
#[table(name = user_profile, public)]
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfileRow {
    #[primary_key]
    pub tg_id: i64,
    pub username: Option<String>,
    pub coins: u64,
    pub premium: bool,
    pub inventory: Vec<u16>,
    pub streak: u32,
    pub last_daily: u64,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        let mut profile = UserProfile::new(row.tg_id).with_inventory(row.inventory);
        profile.username = row.username;
        profile.coins = row.coins;
        profile.premium = row.premium;
        profile.streak = row.streak;
        profile.last_daily = row.last_daily;
        profile
    }
}

impl From<&UserProfile> for UserProfileRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            tg_id: profile.tg_id,
            username: profile.username.clone(),
            coins: profile.coins,
            premium: profile.premium,
            inventory: profile.inventory().to_vec(),
            streak: profile.streak,
            last_daily: profile.last_daily,
        }
    }
}

/// Fetches the profile, creating the starter profile on first access.
pub fn get_or_create_profile(ctx: &ReducerContext, tg_id: TgId) -> UserProfileRow {
    let table = ctx.db.user_profile();
    match table.tg_id().find(tg_id) {
        Some(row) => row,
        None => {
            info!("Creating profile for user {}", tg_id);
            table.insert(UserProfileRow::from(&UserProfile::new(tg_id)))
        }
    }
}

pub fn save_profile(ctx: &ReducerContext, row: UserProfileRow) -> UserProfileRow {
    ctx.db.user_profile().tg_id().update(row)
}
