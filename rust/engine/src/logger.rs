use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::best::BestHand;
use crate::betting::Stage;
use crate::cards::Card;
use crate::player::PlayerAction;

/// A single accepted action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index of the actor
    pub player_index: usize,
    /// Display name of the actor
    pub player: String,
    /// Street on which the action was taken
    pub stage: Stage,
    pub action: PlayerAction,
    /// Chips that actually moved into the pot
    pub paid: u32,
    /// Chips a call-down took back out of the pot
    #[serde(default, skip_serializing_if = "is_zero")]
    pub returned: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// How the pot was awarded.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winner_index: usize,
    pub winner: String,
    pub pot: u32,
    /// Absent when everyone else folded and no cards were compared
    #[serde(default)]
    pub winning_hand: Option<BestHand>,
}

/// Complete record of one hand, written as a JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Identifier in `YYYYMMDD-NNNNNN` form
    pub hand_id: String,
    /// Seed of the deck this hand was dealt from
    pub seed: u64,
    /// Seated players in turn order
    pub players: Vec<String>,
    /// Chronological list of accepted actions
    pub actions: Vec<ActionRecord>,
    /// Community cards dealt before the hand ended
    pub board: Vec<Card>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    /// RFC3339 timestamp, filled in by the logger when missing
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends hand records to a JSONL file.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
}

impl HandLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
        })
    }

    /// A logger that serializes records but writes nowhere.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for HandLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandLogger")
            .field("enabled", &self.writer.is_some())
            .finish()
    }
}
