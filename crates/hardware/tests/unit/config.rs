//! # Configuration Tests
//!
//! Defaults, environment overrides, JSON deserialization, and validation.

use std::io::Write;

use pretty_assertions::assert_eq;
use rstest::rstest;
use sysver_core::config::*;
use sysver_core::regmap::Field;

use crate::common::fixtures::env;

#[test]
fn test_config_default() {
    let config = HarnessConfig::default();
    assert_eq!(config.params, HardwareParams::default());
    assert_eq!(config.widths, DeclaredWidths::default());
    assert_eq!(config.timing, TimingConfig::default());
    assert_eq!(config.seed, None);
}

#[test]
fn test_reference_defaults() {
    let params = HardwareParams::default();
    assert_eq!(params.ver_maj, 0);
    assert_eq!(params.ver_min, 0);
    assert_eq!(params.ver_build, 0);

    let widths = DeclaredWidths::default();
    assert_eq!(widths.board_type, 4);
    assert_eq!(widths.board_rev, 4);

    let timing = TimingConfig::default();
    assert_eq!(timing.clock_period_ns, 10);
    assert_eq!(timing.reset_hold_cycles, 10);
    assert_eq!(timing.settle_cycles, 10);
    assert_eq!(timing.bus_latency, 2);
    assert_eq!(timing.base_addr, 0);
}

#[test]
fn test_empty_environment_gives_defaults() {
    let config = HarnessConfig::from_lookup(env(&[])).unwrap();
    assert_eq!(config, HarnessConfig::default());
}

#[test]
fn test_environment_overrides() {
    let config = HarnessConfig::from_lookup(env(&[
        ("PARAM_C_VER_MAJ", "2"),
        ("PARAM_C_VER_MIN", "7"),
        ("PARAM_C_VER_BUILD", "123456"),
        ("PARAM_C_BOARD_TYPE_WIDTH", "8"),
        ("PARAM_C_BOARD_REV_WIDTH", "16"),
        ("RANDOM_SEED", "0xC0FFEE"),
    ]))
    .unwrap();

    assert_eq!(
        config.params,
        HardwareParams {
            ver_maj: 2,
            ver_min: 7,
            ver_build: 123456,
        }
    );
    assert_eq!(config.widths.board_type, 8);
    assert_eq!(config.widths.board_rev, 16);
    assert_eq!(config.seed, Some(0xC0FFEE));
}

#[test]
fn test_overrides_keep_unset_values() {
    let base = HarnessConfig {
        params: HardwareParams {
            ver_maj: 1,
            ver_min: 2,
            ver_build: 3,
        },
        ..HarnessConfig::default()
    };
    let config = base.with_overrides(env(&[("PARAM_C_VER_MIN", "9")])).unwrap();
    assert_eq!(config.params.ver_maj, 1);
    assert_eq!(config.params.ver_min, 9);
    assert_eq!(config.params.ver_build, 3);
}

#[rstest]
#[case("123", 123)]
#[case(" 42 ", 42)]
#[case("0x1F", 0x1F)]
#[case("0X1f", 0x1F)]
#[case("1_000", 1000)]
#[case("0xFFFF_FFFF", 0xFFFF_FFFF)]
fn test_parse_u64_accepts(#[case] raw: &str, #[case] expected: u64) {
    assert_eq!(parse_u64("K", raw).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("-1")]
#[case("seven")]
#[case("0x")]
#[case("0xZZ")]
fn test_parse_u64_rejects(#[case] raw: &str) {
    let err = parse_u64("K", raw).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_environment_value_beyond_u32_is_invalid() {
    let err = HarnessConfig::from_lookup(env(&[("PARAM_C_VER_BUILD", "4294967296")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PARAM_C_VER_BUILD"));
}

#[rstest]
#[case("PARAM_C_BOARD_TYPE_WIDTH", Field::BoardType)]
#[case("PARAM_C_BOARD_REV_WIDTH", Field::BoardRev)]
fn test_width_wider_than_field_is_rejected(#[case] key: &str, #[case] field: Field) {
    let err = HarnessConfig::from_lookup(env(&[(key, "17")])).unwrap_err();
    match err {
        ConfigError::WidthTooWide {
            field: f,
            width,
            max,
        } => {
            assert_eq!(f, field);
            assert_eq!(width, 17);
            assert_eq!(max, 16);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_full_field_width_is_accepted() {
    let config = HarnessConfig::from_lookup(env(&[
        ("PARAM_C_BOARD_TYPE_WIDTH", "16"),
        ("PARAM_C_BOARD_REV_WIDTH", "0"),
    ]))
    .unwrap();
    assert_eq!(config.widths.board_type, 16);
    assert_eq!(config.widths.board_rev, 0);
}

#[rstest]
#[case("PARAM_C_VER_MAJ", Field::FpgaVersionMajor)]
#[case("PARAM_C_VER_MIN", Field::FpgaVersionMinor)]
fn test_version_wider_than_field_is_rejected(#[case] key: &str, #[case] field: Field) {
    let err = HarnessConfig::from_lookup(env(&[(key, "256")])).unwrap_err();
    assert!(
        matches!(err, ConfigError::ValueTooWide { field: f, value: 256, max: 255 } if f == field)
    );
}

#[test]
fn test_json_deserialization_partial() {
    let json = r#"{ "params": { "ver_maj": 3 }, "seed": 99 }"#;
    let config = HarnessConfig::from_json(json).unwrap();
    assert_eq!(config.params.ver_maj, 3);
    assert_eq!(config.params.ver_min, 0);
    assert_eq!(config.widths, DeclaredWidths::default());
    assert_eq!(config.timing, TimingConfig::default());
    assert_eq!(config.seed, Some(99));
}

#[test]
fn test_json_deserialization_full() {
    let json = r#"{
        "params": { "ver_maj": 1, "ver_min": 4, "ver_build": 20240601 },
        "widths": { "board_type": 6, "board_rev": 2 },
        "timing": {
            "clock_period_ns": 8,
            "reset_hold_cycles": 3,
            "settle_cycles": 1,
            "bus_latency": 4,
            "base_addr": 4096
        }
    }"#;
    let config = HarnessConfig::from_json(json).unwrap();
    assert_eq!(config.params.ver_build, 20240601);
    assert_eq!(config.widths.board_type, 6);
    assert_eq!(config.widths.board_rev, 2);
    assert_eq!(config.timing.clock_period_ns, 8);
    assert_eq!(config.timing.reset_hold_cycles, 3);
    assert_eq!(config.timing.settle_cycles, 1);
    assert_eq!(config.timing.bus_latency, 4);
    assert_eq!(config.timing.base_addr, 0x1000);
    assert_eq!(config.seed, None);
}

#[test]
fn test_json_validation_applies() {
    let err = HarnessConfig::from_json(r#"{ "widths": { "board_rev": 20 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::WidthTooWide { .. }));
}

#[rstest]
#[case::huge_clock_period(r#"{ "timing": { "clock_period_ns": 18446744073709551615 } }"#, "clock_period_ns")]
#[case::zero_clock_period(r#"{ "timing": { "clock_period_ns": 0 } }"#, "clock_period_ns")]
#[case::huge_reset_hold(r#"{ "timing": { "reset_hold_cycles": 18446744073709551615 } }"#, "reset_hold_cycles")]
#[case::huge_settle(r#"{ "timing": { "settle_cycles": 1000001 } }"#, "settle_cycles")]
#[case::huge_latency(r#"{ "timing": { "bus_latency": 4294967296 } }"#, "bus_latency")]
fn test_timing_out_of_range_is_rejected(#[case] json: &str, #[case] key: &str) {
    match HarnessConfig::from_json(json).unwrap_err() {
        ConfigError::TimingOutOfRange { name, .. } => assert_eq!(name, key),
        other => panic!("expected a timing error, got {other:?}"),
    }
}

#[test]
fn test_timing_bounds_are_inclusive() {
    let config = HarnessConfig::from_json(
        r#"{ "timing": { "clock_period_ns": 1000000, "reset_hold_cycles": 0, "settle_cycles": 1000000 } }"#,
    )
    .unwrap();
    assert_eq!(config.timing.reset_hold_cycles, 0);
    assert_eq!(config.timing.clock_period_ns, 1_000_000);
}

#[test]
fn test_timing_error_message_names_key() {
    let err = HarnessConfig::from_json(r#"{ "timing": { "clock_period_ns": 0 } }"#).unwrap_err();
    assert_eq!(err.to_string(), "timing value clock_period_ns=0 is outside 1..=1000000");
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = HarnessConfig::from_json("{ params: }").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_json_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "params": {{ "ver_min": 7 }} }}"#).unwrap();
    let config = HarnessConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.params.ver_min, 7);
}

#[test]
fn test_missing_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = HarnessConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_env_pairs_reproduce_config() {
    let original = HarnessConfig::from_lookup(env(&[
        ("PARAM_C_VER_MAJ", "5"),
        ("PARAM_C_VER_BUILD", "77"),
        ("RANDOM_SEED", "31337"),
    ]))
    .unwrap();
    let pairs: Vec<(String, String)> = original
        .to_env_pairs()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let rebuilt = HarnessConfig::from_lookup(env(&refs)).unwrap();
    assert_eq!(rebuilt, original);
}

#[test]
fn test_randomized_params_fit_their_fields() {
    for seed in 0..256 {
        let params = HardwareParams::randomized(seed);
        assert!(params.ver_maj <= 0xFF);
        assert!(params.ver_min <= 0xFF);
    }
    assert_eq!(HardwareParams::randomized(11), HardwareParams::randomized(11));
}

#[test]
fn test_declared_width_lookup() {
    let widths = DeclaredWidths {
        board_type: 3,
        board_rev: 5,
    };
    assert_eq!(widths.for_field(Field::BoardType), Some(3));
    assert_eq!(widths.for_field(Field::BoardRev), Some(5));
    assert_eq!(widths.for_field(Field::FpgaBuild), None);
}
