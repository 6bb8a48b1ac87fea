//! Config Store Tests
//!
//! Dotted-key lookup semantics: missing keys are defaults, never errors.

use std::fs;

use nrfmon::config::Config;

fn config(json: &str) -> Config {
    Config::from_json(json).expect("test config must parse")
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn dotted_keys_reach_nested_objects() {
    let cfg = config(r#"{"radio": {"baud": "2MHz", "channel": 108}}"#);
    assert_eq!(cfg.get_value("radio.baud"), "2MHz");
    assert_eq!(cfg.get_value_as_integer("radio.channel"), 108);
}

#[test]
fn literal_dotted_keys_also_resolve() {
    let cfg = config(r#"{"radio.baud": "250KHz", "radio.channel": 12}"#);
    assert_eq!(cfg.get_value("radio.baud"), "250KHz");
    assert_eq!(cfg.get_value_as_integer("radio.channel"), 12);
}

#[test]
fn missing_keys_resolve_to_defaults() {
    let cfg = config(r#"{"radio": {"baud": "2MHz"}}"#);
    assert_eq!(cfg.get_value("radio.localaddress"), "");
    assert_eq!(cfg.get_value("log.filename"), "");
    assert_eq!(cfg.get_value_as_integer("radio.channel"), 0);
}

#[test]
fn numbers_read_back_as_strings() {
    let cfg = config(r#"{"radio": {"channel": 76}}"#);
    assert_eq!(cfg.get_value("radio.channel"), "76");
}

#[test]
fn integers_parse_from_string_values() {
    let cfg = config(r#"{"radio": {"channel": " 42 "}}"#);
    assert_eq!(cfg.get_value_as_integer("radio.channel"), 42);
}

#[test]
fn malformed_integers_default_to_zero() {
    let cfg = config(r#"{"radio": {"channel": "lots"}}"#);
    assert_eq!(cfg.get_value_as_integer("radio.channel"), 0);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn invalid_json_is_an_error() {
    assert!(Config::from_json("channel = 5").is_err());
}

#[test]
fn missing_file_is_an_error() {
    assert!(Config::load("/nonexistent/nrfmon.json".as_ref()).is_err());
}

#[test]
fn loads_a_config_file_from_disk() {
    let path = std::env::temp_dir().join("nrfmon-config-test.json");
    fs::write(&path, r#"{"radio": {"localaddress": "NODE1"}}"#).expect("temp file");

    let cfg = Config::load(&path).expect("config must load");
    assert_eq!(cfg.get_value("radio.localaddress"), "NODE1");

    let _ = fs::remove_file(&path);
}

#[test]
fn dump_round_trips_through_the_parser() {
    let cfg = config(r#"{"radio": {"baud": "1MHz", "channel": 5}}"#);
    let dumped = cfg.dump();

    let reparsed = Config::from_json(&dumped).expect("dump must be valid JSON");
    assert_eq!(reparsed.get_value("radio.baud"), "1MHz");
    assert_eq!(reparsed.get_value_as_integer("radio.channel"), 5);
}
