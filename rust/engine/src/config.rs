use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::STARTING_CHIPS;

/// Seats at most six; 6 × 2 hole cards + 5 community cards stays far below 52.
pub const MAX_PLAYERS: usize = 6;
pub const MIN_PLAYERS: usize = 2;

/// Stakes and seating for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_chips: u32,
    pub max_players: usize,
    /// Fixed deck seed. Each hand uses `seed + hand_number` so hands differ
    /// but replay identically. `None` draws fresh entropy per hand.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            starting_chips: STARTING_CHIPS,
            max_players: MAX_PLAYERS,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small_blind must be >0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big_blind must be >= small_blind".into(),
            ));
        }
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig(
                "starting_chips must be >0".into(),
            ));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(GameError::InvalidConfig(format!(
                "max_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
            )));
        }
        // every chip at a full table must fit in one pot
        let table_chips = u64::from(self.starting_chips) * self.max_players as u64;
        if table_chips > u64::from(u32::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "starting_chips x max_players must not exceed {}",
                u32::MAX
            )));
        }
        Ok(())
    }
}
