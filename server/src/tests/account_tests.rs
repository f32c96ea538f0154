use blockplot_world::profile::{UserProfile, STARTER_COINS, STARTER_INVENTORY};
use spacetimedb::{Identity, Timestamp};

use crate::account::profile::UserProfileRow;
use crate::account::session::unix_secs;
use crate::config::{ServerConfig, DEFAULT_AUTH_MAX_AGE_SECS};

#[test]
fn test_starter_profile_row() {
    let row = UserProfileRow::from(&UserProfile::new(42));
    assert_eq!(row.tg_id, 42);
    assert_eq!(row.coins, STARTER_COINS);
    assert_eq!(row.inventory, STARTER_INVENTORY.to_vec());
    assert!(!row.premium);
}

#[test]
fn test_row_profile_conversion_keeps_fields() {
    let row = UserProfileRow {
        tg_id: 7,
        username: Some("builder".to_string()),
        coins: 120,
        premium: true,
        inventory: vec![3, 1, 31, 3],
        streak: 4,
        last_daily: 1_700_000_000,
    };
    let profile = UserProfile::from(row.clone());
    assert_eq!(profile.inventory(), &[1, 3, 31]);
    assert_eq!(profile.coins, 120);
    assert!(profile.premium);

    let back = UserProfileRow::from(&profile);
    assert_eq!(back.inventory, vec![1, 3, 31]);
    assert_eq!(back.username, row.username);
    assert_eq!(back.streak, 4);
    assert_eq!(back.last_daily, row.last_daily);
}

#[test]
fn test_unix_secs_truncates_micros() {
    let ts = Timestamp::from_micros_since_unix_epoch(1_700_000_000_999_999);
    assert_eq!(unix_secs(ts), 1_700_000_000);
}

#[test]
fn test_unconfigured_server_rejects_admin() {
    let config = ServerConfig::unconfigured(Identity::ZERO);
    assert_eq!(config.auth_max_age_secs, Some(DEFAULT_AUTH_MAX_AGE_SECS));
    assert!(config.check_admin_password("").is_err());
    assert!(config.check_admin_password("anything").is_err());
}

#[test]
fn test_admin_password_must_match() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config = ServerConfig::unconfigured(Identity::ZERO);
    config.admin_password = "hunter2".to_string();
    assert!(config.check_admin_password("hunter2").is_ok());
    assert!(config.check_admin_password("hunter3").is_err());
    assert!(config.check_admin_password("hunter2 ").is_err());
}
