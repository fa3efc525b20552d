use std::sync::{Arc, Mutex, MutexGuard};

use holdem_engine::config::TableConfig;
use holdem_engine::errors::{ActionRejection, GameError};
use holdem_engine::logger::HandLogger;
use holdem_engine::player::PlayerAction;
use holdem_engine::session::{GameSession, Resolution};
use serde_json::json;
use thiserror::Error;
use warp::http::StatusCode;

use crate::config::ServerConfig;
use crate::dto::GameStateResponse;
use crate::errors::{ErrorSeverity, IntoErrorResponse};

/// The one table this server runs, plus the log its finished hands go to.
#[derive(Debug)]
pub struct Table {
    game: GameSession,
    hand_log: HandLogger,
}

/// Handle passed into every route. The mutex serializes all table calls.
pub type SharedTable = Arc<Mutex<Table>>;

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("table lock poisoned")]
    LockPoisoned,
    #[error("hand log unavailable: {0}")]
    HandLog(#[from] std::io::Error),
}

impl Table {
    pub fn new(table: TableConfig, hand_log: HandLogger) -> Result<Self, TableError> {
        Ok(Self {
            game: GameSession::new(table)?,
            hand_log,
        })
    }

    /// Builds the table and opens the configured hand log, if any.
    pub fn open(config: &ServerConfig) -> Result<Self, TableError> {
        let hand_log = match &config.hand_log {
            Some(path) => HandLogger::open(path)?,
            None => HandLogger::disabled(),
        };
        Self::new(config.table.clone(), hand_log)
    }

    pub fn shared(self) -> SharedTable {
        Arc::new(Mutex::new(self))
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn join(&mut self, name: &str) -> Result<usize, TableError> {
        Ok(self.game.add_player(name)?)
    }

    pub fn start(&mut self) -> Result<(), TableError> {
        Ok(self.game.start()?)
    }

    /// Applies the action and, if it ended the hand, awards the pot right
    /// away and appends the hand record.
    pub fn act(
        &mut self,
        index: usize,
        action: PlayerAction,
    ) -> Result<Option<Resolution>, TableError> {
        self.game.act(index, action)?;
        if !self.game.is_awaiting_resolution() {
            return Ok(None);
        }

        let resolution = self.game.resolve()?;
        if let Some(record) = self.game.last_hand_record() {
            // the pot is already paid; a logging failure must not undo that
            if let Err(err) = self.hand_log.write(record) {
                tracing::error!(hand_id = %record.hand_id, error = %err, "failed to append hand record");
            }
        }
        Ok(Some(resolution))
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn state(&self) -> GameStateResponse {
        GameStateResponse::from(&self.game.snapshot())
    }
}

/// Locks the shared table, mapping a poisoned lock to an error.
pub fn lock(table: &SharedTable) -> Result<MutexGuard<'_, Table>, TableError> {
    table.lock().map_err(|_| TableError::LockPoisoned)
}

impl IntoErrorResponse for TableError {
    fn status_code(&self) -> StatusCode {
        match self {
            TableError::Game(err) => match err {
                GameError::TableFull { .. } | GameError::HandInProgress => StatusCode::CONFLICT,
                GameError::NoActiveHand => StatusCode::CONFLICT,
                GameError::NotEnoughPlayers { .. } | GameError::InvalidAction(_) => {
                    StatusCode::BAD_REQUEST
                }
                GameError::EmptyDeck
                | GameError::InsufficientCards { .. }
                | GameError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            TableError::LockPoisoned | TableError::HandLog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TableError::Game(err) => match err {
                GameError::TableFull { .. } => "table_full",
                GameError::NotEnoughPlayers { .. } => "not_enough_players",
                GameError::InvalidAction(_) => "invalid_action",
                GameError::EmptyDeck => "empty_deck",
                GameError::InsufficientCards { .. } => "insufficient_cards",
                GameError::NoActiveHand => "no_active_hand",
                GameError::HandInProgress => "hand_in_progress",
                GameError::InvalidConfig(_) => "invalid_config",
            },
            TableError::LockPoisoned => "table_unavailable",
            TableError::HandLog(_) => "hand_log_unavailable",
        }
    }

    fn error_message(&self) -> String {
        match self {
            TableError::Game(GameError::TableFull { .. }) => "Game is full".to_string(),
            TableError::Game(GameError::NotEnoughPlayers { .. }) => {
                "Need at least 2 players".to_string()
            }
            TableError::Game(GameError::InvalidAction(_)) => "Invalid action".to_string(),
            other => other.to_string(),
        }
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            TableError::Game(GameError::TableFull { capacity }) => {
                Some(json!({ "capacity": capacity }))
            }
            TableError::Game(GameError::NotEnoughPlayers { required, actual }) => {
                Some(json!({ "required": required, "actual": actual }))
            }
            TableError::Game(GameError::InvalidAction(reason)) => {
                let mut details = json!({ "reason": reason.to_string() });
                if let ActionRejection::NotPlayersTurn { expected, .. } = reason {
                    details["current_player"] = json!(expected);
                }
                Some(details)
            }
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            TableError::LockPoisoned => ErrorSeverity::Critical,
            other if other.status_code().is_server_error() => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
