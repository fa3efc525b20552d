use thiserror::Error;

use crate::betting::Stage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Table is full ({capacity} seats)")]
    TableFull { capacity: usize },
    #[error("Need at least {required} players, have {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },
    #[error("Invalid action: {0}")]
    InvalidAction(#[from] ActionRejection),
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Need at least 5 cards to score a hand, have {available}")]
    InsufficientCards { available: usize },
    #[error("No hand awaiting resolution")]
    NoActiveHand,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

/// Why an `act` call was refused. The session is left untouched in every case.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionRejection {
    #[error("no player at index {0}")]
    UnknownPlayer(usize),
    #[error("it's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("player {0} has already folded")]
    PlayerFolded(usize),
    #[error("no betting round during {0}")]
    NoBettingRound(Stage),
    #[error("raise amount must be positive")]
    ZeroRaise,
}
