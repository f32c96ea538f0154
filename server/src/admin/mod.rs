// src/admin/mod.rs

use std::fmt;
use std::str::FromStr;

use blockplot_world::coords::ChunkId;
use log::{info, warn};
use spacetimedb::rand::Rng;
use spacetimedb::{reducer, table, ReducerContext, Table, Timestamp};

use crate::config::load_config;
use crate::world::chunk::world_chunk;
use crate::world::retention::prune_mutations;

pub const MAX_PROMO_BATCH: u32 = 100;

#[table(name = promo_code)]
#[derive(Clone, Debug)]
pub struct PromoCode {
    #[primary_key]
    pub code: String,
    pub kind: String,
    pub valid_days: u32,
    pub used: bool,
    pub created_at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromoKind {
    Basic,
    Pro,
    Limited,
}

impl PromoKind {
    pub fn valid_days(self) -> u32 {
        match self {
            PromoKind::Basic => 30,
            PromoKind::Pro => 60,
            PromoKind::Limited => 90,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromoKind::Basic => "basic",
            PromoKind::Pro => "pro",
            PromoKind::Limited => "limited",
        }
    }
}

impl FromStr for PromoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(PromoKind::Basic),
            "pro" => Ok(PromoKind::Pro),
            "limited" => Ok(PromoKind::Limited),
            other => Err(format!("unknown promo kind '{}'", other)),
        }
    }
}

impl fmt::Display for PromoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats 128 random bits as a version-4 UUID string.
pub fn format_promo_code(bits: u128) -> String {
    let bits = (bits & !(0xFu128 << 76)) | (0x4u128 << 76);
    let bits = (bits & !(0x3u128 << 62)) | (0x2u128 << 62);
    format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        (bits >> 96) as u32,
        (bits >> 80) as u16,
        (bits >> 64) as u16,
        (bits >> 48) as u16,
        bits & 0xFFFF_FFFF_FFFF
    )
}

pub fn check_batch_size(count: u32) -> Result<(), String> {
    if count == 0 || count > MAX_PROMO_BATCH {
        return Err(format!("count must be between 1 and {}", MAX_PROMO_BATCH));
    }
    Ok(())
}

fn require_admin(ctx: &ReducerContext, password: &str) -> Result<(), String> {
    load_config(ctx)?.check_admin_password(password).map_err(|e| {
        warn!("Admin check failed for {}: {}", ctx.sender, e);
        e
    })
}

#[reducer]
pub fn admin_login(ctx: &ReducerContext, password: String) -> Result<(), String> {
    require_admin(ctx, &password)?;
    info!("Admin login by {}", ctx.sender);
    Ok(())
}

#[reducer]
pub fn generate_promo_codes(
    ctx: &ReducerContext,
    password: String,
    count: u32,
    kind: String,
) -> Result<(), String> {
    require_admin(ctx, &password)?;
    check_batch_size(count)?;
    let kind: PromoKind = kind.parse()?;

    let table = ctx.db.promo_code();
    let mut created = 0;
    while created < count {
        let code = format_promo_code(ctx.rng().gen::<u128>());
        if table.code().find(&code).is_some() {
            continue;
        }
        table.insert(PromoCode {
            code,
            kind: kind.to_string(),
            valid_days: kind.valid_days(),
            used: false,
            created_at: ctx.timestamp,
        });
        created += 1;
    }
    info!("Generated {} {} promo codes", count, kind);
    Ok(())
}

/// Drops the stored row for `chunk`, the recovery path for undecodable chunk data.
#[reducer]
pub fn reset_chunk(ctx: &ReducerContext, password: String, chunk: ChunkId) -> Result<(), String> {
    require_admin(ctx, &password)?;
    if ctx.db.world_chunk().key().delete(chunk.storage_key()) {
        warn!("Chunk {} reset by {}", chunk, ctx.sender);
    } else {
        info!("Chunk {} has no stored data", chunk);
    }
    prune_mutations(ctx, chunk, 0);
    Ok(())
}
