//! Telegram Mini-App `initData` verification.
//!
//! The client forwards `window.Telegram.WebApp.initData` verbatim. It is a URL
//! encoded query string whose `hash` field is
//! `hex(HMAC_SHA256(HMAC_SHA256("WebAppData", bot_token), data_check_string))`,
//! where the data check string is every other field as `key=value`, sorted by
//! key and joined with `\n`.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::profile::TgId;

type HmacSha256 = Hmac<Sha256>;

const WEB_APP_KEY: &[u8] = b"WebAppData";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TelegramUser {
    pub id: TgId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// The verified contents of an `initData` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitData {
    pub user: TelegramUser,
    /// Unix seconds at which Telegram issued the payload.
    pub auth_date: u64,
    pub query_id: Option<String>,
    pub start_param: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingBotToken,
    MissingHash,
    MalformedHash,
    SignatureMismatch,
    MissingAuthDate,
    MalformedAuthDate(String),
    Expired { age_secs: u64, max_age_secs: u64 },
    MissingUser,
    MalformedUser(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBotToken => write!(f, "bot token is not configured"),
            Self::MissingHash => write!(f, "initData has no hash field"),
            Self::MalformedHash => write!(f, "initData hash is not a hex digest"),
            Self::SignatureMismatch => write!(f, "initData signature does not match"),
            Self::MissingAuthDate => write!(f, "initData has no auth_date field"),
            Self::MalformedAuthDate(raw) => write!(f, "initData auth_date {raw:?} is not a timestamp"),
            Self::Expired {
                age_secs,
                max_age_secs,
            } => write!(f, "initData is {age_secs}s old, limit is {max_age_secs}s"),
            Self::MissingUser => write!(f, "initData has no user field"),
            Self::MalformedUser(message) => write!(f, "initData user is malformed: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

fn mac(key: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length
    match <HmacSha256 as Mac>::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 takes keys of any length"),
    }
}

fn signing_mac(bot_token: &str, data_check_string: &str) -> HmacSha256 {
    let mut secret = mac(WEB_APP_KEY);
    secret.update(bot_token.as_bytes());
    let secret_key = secret.finalize().into_bytes();

    let mut signer = mac(&secret_key);
    signer.update(data_check_string.as_bytes());
    signer
}

const SECRET_COMPARE_KEY: &[u8] = b"blockplot secret compare";

/// Compares two shared secrets in constant time.
///
/// Both sides are reduced to HMAC digests first, so the comparison time does not
/// depend on the secret's length or on where the first differing byte is.
pub fn secrets_match(expected: &str, provided: &str) -> bool {
    let mut reference = mac(SECRET_COMPARE_KEY);
    reference.update(expected.as_bytes());
    let digest = reference.finalize().into_bytes();

    let mut candidate = mac(SECRET_COMPARE_KEY);
    candidate.update(provided.as_bytes());
    candidate.verify_slice(&digest).is_ok()
}

/// All fields except `hash`, as sorted `key=value` lines.
pub fn data_check_string(fields: &[(String, String)]) -> String {
    let mut signed: Vec<&(String, String)> =
        fields.iter().filter(|(key, _)| key != "hash").collect();
    signed.sort_by(|a, b| a.0.cmp(&b.0));
    signed
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hex digest Telegram would attach to `fields` for this bot.
pub fn compute_hash(fields: &[(String, String)], bot_token: &str) -> String {
    let digest = signing_mac(bot_token, &data_check_string(fields))
        .finalize()
        .into_bytes();
    hex::encode(digest)
}

/// Encodes `fields` as an `initData` string signed for `bot_token`.
pub fn sign_init_data(fields: &[(&str, &str)], bot_token: &str) -> String {
    let owned: Vec<(String, String)> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let hash = compute_hash(&owned, bot_token);
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        query.append_pair(key, value);
    }
    query.append_pair("hash", &hash);
    query.finish()
}

/// Verifies the signature and, when `max_age_secs` is set, the freshness of `init_data`.
pub fn verify_init_data(
    init_data: &str,
    bot_token: &str,
    now_secs: u64,
    max_age_secs: Option<u64>,
) -> Result<InitData, AuthError> {
    if bot_token.is_empty() {
        return Err(AuthError::MissingBotToken);
    }
    let fields: Vec<(String, String)> = form_urlencoded::parse(init_data.as_bytes())
        .into_owned()
        .collect();
    let field = |name: &str| {
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    let hash = field("hash").ok_or(AuthError::MissingHash)?;
    let expected = hex::decode(hash).map_err(|_| AuthError::MalformedHash)?;
    signing_mac(bot_token, &data_check_string(&fields))
        .verify_slice(&expected)
        .map_err(|_| AuthError::SignatureMismatch)?;

    let raw_date = field("auth_date").ok_or(AuthError::MissingAuthDate)?;
    let auth_date: u64 = raw_date
        .parse()
        .map_err(|_| AuthError::MalformedAuthDate(raw_date.to_string()))?;
    if let Some(max_age_secs) = max_age_secs {
        let age_secs = now_secs.saturating_sub(auth_date);
        if age_secs > max_age_secs {
            return Err(AuthError::Expired {
                age_secs,
                max_age_secs,
            });
        }
    }

    let user_json = field("user").ok_or(AuthError::MissingUser)?;
    let user: TelegramUser =
        serde_json::from_str(user_json).map_err(|e| AuthError::MalformedUser(e.to_string()))?;

    Ok(InitData {
        user,
        auth_date,
        query_id: field("query_id").map(str::to_string),
        start_param: field("start_param").map(str::to_string),
    })
}
