use std::fs;
use std::path::PathBuf;

use clap::Parser;
use holdem_engine::config::TableConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

/// Everything the server needs to boot: where to listen, the table stakes,
/// and where (if anywhere) to append hand records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub table: TableConfig,
    pub hand_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            table: TableConfig::default(),
            hand_log: None,
        }
    }
}

impl ServerConfig {
    /// Ephemeral port on loopback with a fixed deck seed.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            table: TableConfig {
                seed: Some(42),
                ..TableConfig::default()
            },
            hand_log: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line flags. Each one, when given, beats the file and environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "holdem-server", about = "Texas Hold'em table over HTTP")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (0 picks a free one)
    #[arg(long, short)]
    pub port: Option<u16>,
    /// Fixed deck seed for reproducible hands
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub small_blind: Option<u32>,
    #[arg(long)]
    pub big_blind: Option<u32>,
    #[arg(long)]
    pub starting_chips: Option<u32>,
    /// Append finished hands to this JSONL file
    #[arg(long)]
    pub hand_log: Option<PathBuf>,
    /// TOML config file (overrides HOLDEM_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ServerArgs {
    fn apply(&self, cfg: &mut ServerConfig) {
        if let Some(v) = &self.host {
            cfg.host = v.clone();
        }
        if let Some(v) = self.port {
            cfg.port = v;
        }
        if let Some(v) = self.seed {
            cfg.table.seed = Some(v);
        }
        if let Some(v) = self.small_blind {
            cfg.table.small_blind = v;
        }
        if let Some(v) = self.big_blind {
            cfg.table.big_blind = v;
        }
        if let Some(v) = self.starting_chips {
            cfg.table.starting_chips = v;
        }
        if let Some(v) = &self.hand_log {
            cfg.hand_log = Some(v.clone());
        }
    }
}

/// Resolves the configuration: defaults, then the TOML file, then
/// `HOLDEM_*` environment variables, then command-line flags.
pub fn load(args: &ServerArgs) -> Result<ServerConfig, ConfigError> {
    let mut cfg = ServerConfig::default();

    let file = args
        .config
        .clone()
        .or_else(|| non_empty_env(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = file {
        let text = fs::read_to_string(&path)?;
        let f: FileConfig = toml::from_str(&text)?;
        f.apply(&mut cfg);
    }

    apply_env(&mut cfg)?;
    args.apply(&mut cfg);

    cfg.table
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(cfg)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    hand_log: Option<PathBuf>,
    #[serde(default)]
    table: Option<FileTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileTable {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    max_players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

impl FileConfig {
    fn apply(self, cfg: &mut ServerConfig) {
        if let Some(v) = self.host {
            cfg.host = v;
        }
        if let Some(v) = self.port {
            cfg.port = v;
        }
        if let Some(v) = self.hand_log {
            cfg.hand_log = Some(v);
        }
        if let Some(t) = self.table {
            if let Some(v) = t.small_blind {
                cfg.table.small_blind = v;
            }
            if let Some(v) = t.big_blind {
                cfg.table.big_blind = v;
            }
            if let Some(v) = t.starting_chips {
                cfg.table.starting_chips = v;
            }
            if let Some(v) = t.max_players {
                cfg.table.max_players = v;
            }
            if let Some(v) = t.seed {
                cfg.table.seed = Some(v);
            }
        }
    }
}

fn apply_env(cfg: &mut ServerConfig) -> Result<(), ConfigError> {
    if let Some(v) = non_empty_env("HOLDEM_HOST") {
        cfg.host = v;
    }
    if let Some(v) = parse_env("HOLDEM_PORT")? {
        cfg.port = v;
    }
    if let Some(v) = parse_env("HOLDEM_SEED")? {
        cfg.table.seed = Some(v);
    }
    if let Some(v) = parse_env("HOLDEM_SMALL_BLIND")? {
        cfg.table.small_blind = v;
    }
    if let Some(v) = parse_env("HOLDEM_BIG_BLIND")? {
        cfg.table.big_blind = v;
    }
    if let Some(v) = parse_env("HOLDEM_STARTING_CHIPS")? {
        cfg.table.starting_chips = v;
    }
    if let Some(v) = non_empty_env("HOLDEM_HAND_LOG") {
        cfg.hand_log = Some(PathBuf::from(v));
    }
    Ok(())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty_env(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_everything_they_name() {
        let args = ServerArgs::try_parse_from([
            "holdem-server",
            "--port",
            "9000",
            "--seed",
            "5",
            "--big-blind",
            "40",
        ])
        .expect("parse flags");
        let mut cfg = ServerConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.table.seed, Some(5));
        assert_eq!(cfg.table.big_blind, 40);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.table.small_blind, 10);
    }

    #[test]
    fn file_sections_are_optional() {
        let f: FileConfig = toml::from_str("port = 7000\n[table]\nseed = 3\n").unwrap();
        let mut cfg = ServerConfig::default();
        f.apply(&mut cfg);
        assert_eq!(cfg.port, 7000);
        assert_eq!(cfg.table.seed, Some(3));
        assert_eq!(cfg.table.starting_chips, 1000);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("prot = 1\n").is_err());
    }
}
