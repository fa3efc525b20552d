/// Precedence tests for server configuration: defaults, TOML file,
/// HOLDEM_* environment variables, then command-line flags.
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use holdem_web::config::{load, ConfigError, ServerArgs, ServerConfig};
use serial_test::serial;

const VARS: &[&str] = &[
    "HOLDEM_CONFIG",
    "HOLDEM_HOST",
    "HOLDEM_PORT",
    "HOLDEM_SEED",
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_STARTING_CHIPS",
    "HOLDEM_HAND_LOG",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn no_flags() -> ServerArgs {
    ServerArgs::try_parse_from(["holdem-server"]).expect("empty args")
}

fn write_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write toml");
    file
}

#[test]
#[serial]
fn defaults_when_nothing_is_set() {
    clear_env();
    let cfg = load(&no_flags()).expect("load");
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.table.small_blind, 10);
    assert_eq!(cfg.table.big_blind, 20);
    assert_eq!(cfg.table.starting_chips, 1000);
    assert_eq!(cfg.table.max_players, 6);
    assert_eq!(cfg.table.seed, None);
}

#[test]
#[serial]
fn file_then_env_then_flags() {
    clear_env();
    let file = write_toml(
        r#"
port = 7000
host = "0.0.0.0"

[table]
small_blind = 25
big_blind = 50
seed = 1
"#,
    );
    std::env::set_var("HOLDEM_CONFIG", file.path());
    std::env::set_var("HOLDEM_PORT", "7100");
    std::env::set_var("HOLDEM_SEED", "2");

    let from_env = load(&no_flags()).expect("load");
    assert_eq!(from_env.host, "0.0.0.0");
    assert_eq!(from_env.port, 7100);
    assert_eq!(from_env.table.small_blind, 25);
    assert_eq!(from_env.table.big_blind, 50);
    assert_eq!(from_env.table.seed, Some(2));

    let flags = ServerArgs::try_parse_from(["holdem-server", "--seed", "3", "--port", "7200"])
        .expect("flags");
    let from_flags = load(&flags).expect("load");
    assert_eq!(from_flags.port, 7200);
    assert_eq!(from_flags.table.seed, Some(3));
    assert_eq!(from_flags.table.small_blind, 25);

    clear_env();
}

#[test]
#[serial]
fn config_flag_beats_env_file() {
    clear_env();
    let env_file = write_toml("port = 1111\n");
    let flag_file = write_toml("port = 2222\n");
    std::env::set_var("HOLDEM_CONFIG", env_file.path());

    let flags = ServerArgs::try_parse_from([
        PathBuf::from("holdem-server"),
        PathBuf::from("--config"),
        flag_file.path().to_path_buf(),
    ])
    .expect("flags");
    assert_eq!(load(&flags).expect("load").port, 2222);
    clear_env();
}

#[test]
#[serial]
fn hand_log_path_from_env() {
    clear_env();
    std::env::set_var("HOLDEM_HAND_LOG", "logs/hands.jsonl");
    let cfg = load(&no_flags()).expect("load");
    assert_eq!(cfg.hand_log, Some(PathBuf::from("logs/hands.jsonl")));
    clear_env();
}

#[test]
#[serial]
fn empty_env_values_are_ignored() {
    clear_env();
    std::env::set_var("HOLDEM_PORT", "");
    let cfg = load(&no_flags()).expect("load");
    assert_eq!(cfg.port, 8080);
    clear_env();
}

#[test]
#[serial]
fn bad_env_value_is_reported() {
    clear_env();
    std::env::set_var("HOLDEM_PORT", "eighty");
    match load(&no_flags()) {
        Err(ConfigError::InvalidEnv { name, value }) => {
            assert_eq!(name, "HOLDEM_PORT");
            assert_eq!(value, "eighty");
        }
        other => panic!("expected InvalidEnv, got {other:?}"),
    }
    clear_env();
}

#[test]
#[serial]
fn inconsistent_blinds_fail_validation() {
    clear_env();
    std::env::set_var("HOLDEM_SMALL_BLIND", "50");
    std::env::set_var("HOLDEM_BIG_BLIND", "20");
    assert!(matches!(
        load(&no_flags()),
        Err(ConfigError::Invalid(_))
    ));
    clear_env();
}

#[test]
#[serial]
fn stacks_too_large_for_one_pot_fail_validation() {
    clear_env();
    std::env::set_var("HOLDEM_STARTING_CHIPS", "3000000000");
    assert!(matches!(
        load(&no_flags()),
        Err(ConfigError::Invalid(_))
    ));
    clear_env();
}

#[test]
#[serial]
fn unreadable_or_malformed_file_errors() {
    clear_env();
    std::env::set_var("HOLDEM_CONFIG", "/definitely/not/here.toml");
    assert!(matches!(load(&no_flags()), Err(ConfigError::Io(_))));

    let bad = write_toml("port = \"not a number\"\n");
    std::env::set_var("HOLDEM_CONFIG", bad.path());
    assert!(matches!(load(&no_flags()), Err(ConfigError::Parse(_))));
    clear_env();
}
