use test_case::test_case;

use crate::admin::{check_batch_size, format_promo_code, PromoKind};

#[test_case("basic", PromoKind::Basic, 30 ; "basic")]
#[test_case("pro", PromoKind::Pro, 60 ; "pro")]
#[test_case("limited", PromoKind::Limited, 90 ; "limited")]
fn test_promo_kind_parse(input: &str, kind: PromoKind, days: u32) {
    let parsed: PromoKind = input.parse().unwrap();
    assert_eq!(parsed, kind);
    assert_eq!(parsed.valid_days(), days);
    assert_eq!(parsed.to_string(), input);
}

#[test_case("" ; "empty")]
#[test_case("Basic" ; "wrong case")]
#[test_case("gold" ; "unknown")]
fn test_promo_kind_rejects(input: &str) {
    assert!(input.parse::<PromoKind>().is_err());
}

#[test_case(0, false ; "zero")]
#[test_case(1, true ; "one")]
#[test_case(100, true ; "max")]
#[test_case(101, false ; "over max")]
fn test_batch_size(count: u32, ok: bool) {
    assert_eq!(check_batch_size(count).is_ok(), ok);
}

#[test]
fn test_promo_code_sets_version_and_variant() {
    assert_eq!(format_promo_code(0), "00000000-0000-4000-8000-000000000000");
    assert_eq!(format_promo_code(u128::MAX), "ffffffff-ffff-4fff-bfff-ffffffffffff");
}

#[test]
fn test_promo_code_shape() {
    let code = format_promo_code(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
    let groups: Vec<&str> = code.split('-').collect();
    assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), vec![8, 4, 4, 4, 12]);
    assert_eq!(code, "01234567-89ab-4def-8123-456789abcdef");
}
